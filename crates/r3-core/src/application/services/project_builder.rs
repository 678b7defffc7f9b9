//! Project Builder - child-process policy for git and the package manager.
//!
//! The [`CommandRunner`] port only spawns and captures. This service decides
//! what a failure means:
//!
//! | step | on failure |
//! |------|------------|
//! | version control (`init`, `add`, `commit`) | warning, pipeline continues |
//! | dependency install | fatal |
//! | named script (`run`, `build`, `test`) | fatal to the caller |

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandSpec, Filesystem},
    },
    error::{ScaffoldError, ScaffoldResult},
};

/// 10 MiB, enough for a noisy `npm install`.
pub const DEFAULT_MAX_OUTPUT: usize = 10 * 1024 * 1024;

/// Which executables and files the builder works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    pub vcs_program: String,
    pub package_manager: String,
    pub manifest_file: String,
    pub commit_message: String,
    pub max_output_bytes: usize,
}

impl Default for ToolchainSettings {
    fn default() -> Self {
        Self {
            vcs_program: "git".into(),
            package_manager: "npm".into(),
            manifest_file: "package.json".into(),
            commit_message: "Initial commit from R3 scaffold".into(),
            max_output_bytes: DEFAULT_MAX_OUTPUT,
        }
    }
}

/// Result of the version-control step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsOutcome {
    /// Turned off with `--skip-git`.
    Skipped,
    Initialized,
    /// Some step failed; the project is still usable.
    Failed { reason: String },
}

/// Result of the dependency-install step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Turned off with `--skip-install`.
    Skipped,
    Installed,
    /// No manifest in the project root, nothing to install.
    NoManifest,
}

/// Runs git and the package manager inside a project directory.
pub struct ProjectBuilder {
    runner: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
    settings: ToolchainSettings,
}

impl ProjectBuilder {
    pub fn new(runner: Box<dyn CommandRunner>, filesystem: Box<dyn Filesystem>) -> Self {
        Self::with_settings(runner, filesystem, ToolchainSettings::default())
    }

    pub fn with_settings(
        runner: Box<dyn CommandRunner>,
        filesystem: Box<dyn Filesystem>,
        settings: ToolchainSettings,
    ) -> Self {
        Self {
            runner,
            filesystem,
            settings,
        }
    }

    pub fn settings(&self) -> &ToolchainSettings {
        &self.settings
    }

    /// `git init`, `git add .`, `git commit -m <message>`.
    ///
    /// Never fails: the first failing step ends the sequence and is reported
    /// as [`VcsOutcome::Failed`].
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn init_version_control(&self, path: &Path) -> VcsOutcome {
        info!("Initializing Git repository");

        let vcs = &self.settings.vcs_program;
        let steps = [
            CommandSpec::new(vcs, path).arg("init"),
            CommandSpec::new(vcs, path).args(["add", "."]),
            CommandSpec::new(vcs, path).args([
                "commit",
                "-m",
                self.settings.commit_message.as_str(),
            ]),
        ];

        for step in steps {
            let spec = step.max_output(self.settings.max_output_bytes);
            let reason = match self.runner.run(&spec) {
                Ok(output) if output.success => continue,
                Ok(output) => format!("`{spec}`: {}", output.failure_reason()),
                Err(e) => e.to_string(),
            };
            warn!(%reason, "Failed to initialize Git repository");
            return VcsOutcome::Failed { reason };
        }

        info!("Git repository initialized");
        VcsOutcome::Initialized
    }

    /// `npm install` in `path`, if it has a manifest.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn install_dependencies(&self, path: &Path) -> ScaffoldResult<InstallOutcome> {
        let manifest = path.join(&self.settings.manifest_file);
        if !self.filesystem.exists(&manifest) {
            warn!(
                manifest = %self.settings.manifest_file,
                "No manifest found, skipping dependency installation"
            );
            return Ok(InstallOutcome::NoManifest);
        }

        info!("Installing dependencies");
        let spec = CommandSpec::new(&self.settings.package_manager, path)
            .arg("install")
            .max_output(self.settings.max_output_bytes);

        let output = self.runner.run(&spec)?;
        if !output.success {
            warn!(code = ?output.code, "Failed to install dependencies");
            return Err(ApplicationError::CommandFailed {
                command: spec.to_string(),
                reason: output.failure_reason(),
            }
            .into());
        }

        info!("Dependencies installed successfully");
        Ok(InstallOutcome::Installed)
    }

    /// `npm run <script>` in `path`.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn run_script(&self, path: &Path, script: &str) -> ScaffoldResult<()> {
        info!("Running script: {script}");
        let spec = CommandSpec::new(&self.settings.package_manager, path)
            .args(["run", script])
            .max_output(self.settings.max_output_bytes);

        let failure = |reason: String| -> ScaffoldError {
            warn!(%reason, "Failed to run script: {script}");
            ApplicationError::ScriptFailed {
                script: script.to_string(),
                reason,
            }
            .into()
        };

        match self.runner.run(&spec) {
            Ok(output) if output.success => {
                info!("Script \"{script}\" completed successfully");
                Ok(())
            }
            Ok(output) => Err(failure(output.failure_reason())),
            Err(e) => Err(failure(e.root_cause().to_string())),
        }
    }

    pub fn build(&self, path: &Path) -> ScaffoldResult<()> {
        self.run_script(path, "build")
    }

    pub fn test(&self, path: &Path) -> ScaffoldResult<()> {
        self.run_script(path, "test")
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mockall::Sequence;

    use super::*;
    use crate::application::ports::{CommandOutput, MockCommandRunner, MockFilesystem};

    fn fs_with_manifest(present: bool) -> Box<MockFilesystem> {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(move |_| present);
        Box::new(fs)
    }

    fn root() -> PathBuf {
        PathBuf::from("/tmp/demo-app")
    }

    #[test]
    fn git_runs_init_add_commit_in_order() {
        let mut runner = MockCommandRunner::new();
        let mut seq = Sequence::new();
        for expected in [
            vec!["init"],
            vec!["add", "."],
            vec!["commit", "-m", "Initial commit from R3 scaffold"],
        ] {
            runner
                .expect_run()
                .withf(move |spec| {
                    spec.program == "git" && spec.args == expected && spec.cwd == root()
                })
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(CommandOutput::ok()));
        }

        let builder = ProjectBuilder::new(Box::new(runner), fs_with_manifest(true));
        assert_eq!(builder.init_version_control(&root()), VcsOutcome::Initialized);
    }

    #[test]
    fn git_failure_is_an_outcome_not_an_error() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec| spec.args == ["init"])
            .returning(|_| Ok(CommandOutput::ok()));
        runner
            .expect_run()
            .withf(|spec| spec.args == ["add", "."])
            .returning(|_| Ok(CommandOutput::failed(128, "fatal: not a git repository")));

        let builder = ProjectBuilder::new(Box::new(runner), fs_with_manifest(true));
        match builder.init_version_control(&root()) {
            VcsOutcome::Failed { reason } => assert!(reason.contains("not a git repository")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn git_missing_from_path_is_a_warning() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|spec| {
            Err(ApplicationError::CommandFailed {
                command: spec.to_string(),
                reason: "No such file or directory".into(),
            }
            .into())
        });

        let builder = ProjectBuilder::new(Box::new(runner), fs_with_manifest(true));
        assert!(matches!(
            builder.init_version_control(&root()),
            VcsOutcome::Failed { .. }
        ));
    }

    #[test]
    fn install_without_manifest_skips_without_spawning() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let builder = ProjectBuilder::new(Box::new(runner), fs_with_manifest(false));
        assert_eq!(
            builder.install_dependencies(&root()).unwrap(),
            InstallOutcome::NoManifest
        );
    }

    #[test]
    fn install_uses_ten_mebibyte_allowance() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec| {
                spec.program == "npm"
                    && spec.args == ["install"]
                    && spec.max_output >= 10 * 1024 * 1024
            })
            .times(1)
            .returning(|_| Ok(CommandOutput::ok()));

        let builder = ProjectBuilder::new(Box::new(runner), fs_with_manifest(true));
        assert_eq!(
            builder.install_dependencies(&root()).unwrap(),
            InstallOutcome::Installed
        );
    }

    #[test]
    fn install_failure_is_fatal() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(CommandOutput::failed(1, "npm ERR! code E404")));

        let builder = ProjectBuilder::new(Box::new(runner), fs_with_manifest(true));
        let err = builder.install_dependencies(&root()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Application(ApplicationError::CommandFailed { .. })
        ));
        assert!(err.to_string().contains("E404"));
    }

    #[test]
    fn install_output_overflow_is_fatal() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|spec| {
            Err(ApplicationError::OutputLimitExceeded {
                command: spec.to_string(),
                limit: spec.max_output,
            }
            .into())
        });

        let builder = ProjectBuilder::new(Box::new(runner), fs_with_manifest(true));
        assert!(builder.install_dependencies(&root()).is_err());
    }

    #[test]
    fn run_script_failure_names_script() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec| spec.args == ["run", "lint"])
            .returning(|_| Ok(CommandOutput::failed(1, "missing script: lint")));

        let builder = ProjectBuilder::new(Box::new(runner), fs_with_manifest(true));
        let err = builder.run_script(&root(), "lint").unwrap_err();
        match err {
            ScaffoldError::Application(ApplicationError::ScriptFailed { script, .. }) => {
                assert_eq!(script, "lint")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn build_and_test_delegate_to_run_script() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec| spec.args == ["run", "build"])
            .times(1)
            .returning(|_| Ok(CommandOutput::ok()));
        runner
            .expect_run()
            .withf(|spec| spec.args == ["run", "test"])
            .times(1)
            .returning(|_| Ok(CommandOutput::ok()));

        let builder = ProjectBuilder::new(Box::new(runner), fs_with_manifest(true));
        builder.build(&root()).unwrap();
        builder.test(&root()).unwrap();
    }

    #[test]
    fn custom_toolchain_is_respected() {
        let settings = ToolchainSettings {
            package_manager: "pnpm".into(),
            ..ToolchainSettings::default()
        };
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec| spec.program == "pnpm")
            .returning(|_| Ok(CommandOutput::ok()));

        let builder =
            ProjectBuilder::with_settings(Box::new(runner), fs_with_manifest(true), settings);
        builder.run_script(&root(), "dev").unwrap();
    }
}
