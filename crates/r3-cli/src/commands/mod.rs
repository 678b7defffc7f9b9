//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core calls and print results.  The
//! adapter wiring every handler shares lives here.

use std::path::{Path, PathBuf};

use r3_adapters::{LocalFilesystem, PlaceholderRenderer, SystemCommandRunner};
use r3_core::application::{ProjectBuilder, ScaffoldService};

use crate::{
    config::AppConfig,
    error::{CliResult, IntoCli},
};

pub mod completions;
pub mod config;
pub mod create;
pub mod init;
pub mod list;
#[cfg(feature = "interactive")]
mod prompt;
pub mod run;

/// Scaffold service over the local disk and real child processes.
pub(crate) fn scaffold_service(config: &AppConfig) -> ScaffoldService {
    let renderer = PlaceholderRenderer::new(Box::new(LocalFilesystem::new()), config.template_dir());
    ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(renderer),
        project_builder(config),
    )
}

/// Builder using the configured toolchain.
pub(crate) fn project_builder(config: &AppConfig) -> ProjectBuilder {
    ProjectBuilder::with_settings(
        Box::new(SystemCommandRunner::new()),
        Box::new(LocalFilesystem::new()),
        config.toolchain.clone(),
    )
}

/// `path` made absolute against the current directory, or the current
/// directory itself.
pub(crate) fn resolve_dir(path: Option<&Path>) -> CliResult<PathBuf> {
    match path {
        Some(p) => std::path::absolute(p)
            .with_cli_context(|| format!("Failed to resolve path {}", p.display())),
        None => std::env::current_dir().with_cli_context(|| "Failed to read the current directory"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_becomes_absolute() {
        let resolved = resolve_dir(Some(Path::new("demo-app"))).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("demo-app"));
    }

    #[test]
    fn missing_path_is_current_dir() {
        assert_eq!(resolve_dir(None).unwrap(), std::env::current_dir().unwrap());
    }
}
