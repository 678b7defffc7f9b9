//! `std::process` command runner.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use r3_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, CommandSpec},
    },
    error::{ScaffoldError, ScaffoldResult},
};
use tracing::{debug, instrument, warn};

const CHUNK: usize = 8 * 1024;

/// Runs commands as real child processes, capturing stdout and stderr.
///
/// stdin is closed so a tool that prompts fails instead of hanging.  Both
/// pipes are drained as the child runs; once together they pass
/// `spec.max_output` the child is killed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Forward `reader` to `tx` chunk by chunk until EOF or the receiver is gone.
fn pump(stream: Stream, mut reader: impl Read, tx: Sender<(Stream, Vec<u8>)>) {
    let mut buf = [0u8; CHUNK];
    loop {
        match reader.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                if tx.send((stream, buf[..n].to_vec())).is_err() {
                    break;
                }
            }
        }
    }
}

fn spawn_failure(spec: &CommandSpec, reason: impl ToString) -> ScaffoldError {
    ApplicationError::CommandFailed {
        command: spec.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Collect output until both pipes close.  Returns `None` once the allowance
/// is exceeded.
fn collect(
    rx: &Receiver<(Stream, Vec<u8>)>,
    limit: usize,
) -> Option<(Vec<u8>, Vec<u8>)> {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    for (stream, chunk) in rx {
        if stdout.len() + stderr.len() + chunk.len() > limit {
            return None;
        }
        match stream {
            Stream::Stdout => stdout.extend_from_slice(&chunk),
            Stream::Stderr => stderr.extend_from_slice(&chunk),
        }
    }
    Some((stdout, stderr))
}

fn kill(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!(error = %e, "Child already exited");
    }
    if let Err(e) = child.wait() {
        debug!(error = %e, "Failed to reap child");
    }
}

impl CommandRunner for SystemCommandRunner {
    #[instrument(skip(self), fields(command = %spec, cwd = %spec.cwd.display()))]
    fn run(&self, spec: &CommandSpec) -> ScaffoldResult<CommandOutput> {
        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_failure(spec, e))?;

        let (tx, rx) = mpsc::channel();
        if let Some(out) = child.stdout.take() {
            let tx = tx.clone();
            thread::spawn(move || pump(Stream::Stdout, out, tx));
        }
        if let Some(err) = child.stderr.take() {
            let tx = tx.clone();
            thread::spawn(move || pump(Stream::Stderr, err, tx));
        }
        drop(tx);

        let Some((stdout, stderr)) = collect(&rx, spec.max_output) else {
            kill(&mut child);
            warn!(limit = spec.max_output, "Output allowance exceeded, child killed");
            return Err(ApplicationError::OutputLimitExceeded {
                command: spec.to_string(),
                limit: spec.max_output,
            }
            .into());
        };

        let status = child.wait().map_err(|e| spawn_failure(spec, e))?;
        debug!(
            status = ?status.code(),
            bytes = stdout.len() + stderr.len(),
            "Command finished"
        );
        Ok(CommandOutput {
            success: status.success(),
            code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }
}
