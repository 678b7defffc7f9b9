//! `r3 init`: retrofit an existing directory.
//!
//! Adds the layout and seed files of the chosen project type that are
//! missing and writes `r3.config.json`.  Nothing that exists is overwritten.

use std::path::Path;

use tracing::{debug, instrument};

use r3_adapters::filesystem::utils;
use r3_core::domain::{CONFIG_FILE, ProjectConfig, ProjectType};

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Retrofit the target directory.
#[instrument(skip_all)]
pub fn execute(args: InitArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let root = super::resolve_dir(args.path.as_deref())?;
    output.info(&format!("Initializing R3 in {}...", root.display()))?;

    let existing = load_existing(&root);
    let (default_name, default_type) = defaults_for(&root, existing.as_ref(), config)?;

    let prompt = output.is_interactive() && !args.yes;
    let name = match args.name {
        Some(name) => name,
        None if prompt => ask_name(&default_name)?,
        None => default_name,
    };
    let project_type = match args.project_type {
        Some(t) => t.into(),
        None if prompt => ask_type(default_type)?,
        None => default_type,
    };

    let mut builder = ProjectConfig::builder(name)
        .project_type(project_type)
        .license(config.defaults.license);
    if let Some(author) = &config.defaults.author {
        builder = builder.author(author);
    }
    let project = builder.build().map_err(|e| CliError::Core(e.into()))?;

    let report = super::scaffold_service(config).init(&root, &project)?;

    for dir in &report.directories_created {
        output.print(&format!("  + {}/", relative(&root, dir)))?;
    }
    for file in &report.files_written {
        output.print(&format!("  + {}", relative(&root, file)))?;
    }
    for file in &report.files_kept {
        output.print(&format!("  = {} (kept)", relative(&root, file)))?;
    }
    output.success("R3 initialized successfully!")?;
    Ok(())
}

/// An `r3.config.json` from an earlier run, if one parses.
fn load_existing(root: &Path) -> Option<ProjectConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
        return None;
    }
    match utils::read_json(&path) {
        Ok(config) => Some(config),
        Err(e) => {
            debug!(error = %e, "Ignoring unreadable {CONFIG_FILE}");
            None
        }
    }
}

/// Name and type to offer: an earlier config, else the directory name and
/// the configured default type.
fn defaults_for(
    root: &Path,
    existing: Option<&ProjectConfig>,
    config: &AppConfig,
) -> CliResult<(String, ProjectType)> {
    if let Some(existing) = existing {
        return Ok((existing.name().to_string(), existing.project_type()));
    }
    let name = root
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::UnusableDirectory {
            path: root.to_path_buf(),
        })?;
    Ok((name.to_string(), config.defaults.project_type))
}

#[cfg(feature = "interactive")]
fn ask_name(default: &str) -> CliResult<String> {
    super::prompt::project_name(Some(default))
}

#[cfg(not(feature = "interactive"))]
fn ask_name(default: &str) -> CliResult<String> {
    Ok(default.to_string())
}

#[cfg(feature = "interactive")]
fn ask_type(default: ProjectType) -> CliResult<ProjectType> {
    super::prompt::project_type(default)
}

#[cfg(not(feature = "interactive"))]
fn ask_type(default: ProjectType) -> CliResult<ProjectType> {
    Ok(default)
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
