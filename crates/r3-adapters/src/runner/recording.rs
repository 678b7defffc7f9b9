//! Scripted command runner for tests: records every call, spawns nothing.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use r3_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, CommandSpec},
    },
    error::ScaffoldResult,
};

#[derive(Debug, Default)]
struct Script {
    calls: Vec<CommandSpec>,
    failing: HashMap<String, CommandOutput>,
    unavailable: HashSet<String>,
}

/// Records calls; succeeds unless told otherwise per program.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    inner: Arc<Mutex<Script>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call to `program` exits with status 1 and `stderr`.
    pub fn failing(self, program: &str, stderr: &str) -> Self {
        if let Ok(mut script) = self.inner.lock() {
            script
                .failing
                .insert(program.to_string(), CommandOutput::failed(1, stderr));
        }
        self
    }

    /// Every call to `program` fails to spawn, as if it were not on PATH.
    pub fn unavailable(self, program: &str) -> Self {
        if let Ok(mut script) = self.inner.lock() {
            script.unavailable.insert(program.to_string());
        }
        self
    }

    /// Calls so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.inner
            .lock()
            .map(|s| s.calls.clone())
            .unwrap_or_default()
    }

    /// Calls so far rendered as command lines.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> ScaffoldResult<CommandOutput> {
        let mut script = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?;
        script.calls.push(spec.clone());

        if script.unavailable.contains(&spec.program) {
            return Err(ApplicationError::CommandFailed {
                command: spec.to_string(),
                reason: "No such file or directory (os error 2)".into(),
            }
            .into());
        }
        Ok(script
            .failing
            .get(&spec.program)
            .cloned()
            .unwrap_or_else(CommandOutput::ok))
    }
}
