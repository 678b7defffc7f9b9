//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the pieces handed to it
//! (for example [`ToolchainSettings`]).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `R3__SECTION__KEY` (e.g. `R3__DEFAULTS__LICENSE`)
//! 3. Config file (`--config FILE`, else the platform config dir)
//! 4. Built-in defaults (always present, via `#[serde(default)]`)

use std::path::PathBuf;

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use r3_core::{
    application::ToolchainSettings,
    domain::{License, ProjectType},
};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Executables used for git and dependency installation.
    pub toolchain: ToolchainSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub project_type: ProjectType,
    pub license: License,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            project_type: ProjectType::Webapp,
            license: License::Mit,
            description: "A project built with R3 scaffold".into(),
            author: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Where named templates live.  Defaults to `~/.r3/templates`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `R3__*`
    /// environment variables.
    ///
    /// A file named with `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);

        Config::builder()
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(config_file.is_some()),
            )
            .add_source(
                Environment::with_prefix("R3")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.r3.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "r3", "r3")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".r3.toml"))
    }

    /// Directory named templates are loaded from.
    pub fn template_dir(&self) -> PathBuf {
        self.templates.dir.clone().unwrap_or_else(|| {
            directories::BaseDirs::new()
                .map(|d| d.home_dir().join(".r3").join("templates"))
                .unwrap_or_else(|| PathBuf::from(".r3/templates"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_project_type_is_webapp() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.project_type, ProjectType::Webapp);
        assert_eq!(cfg.defaults.license, License::Mit);
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn default_toolchain_is_git_and_npm() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.toolchain.vcs_program, "git");
        assert_eq!(cfg.toolchain.package_manager, "npm");
    }

    #[test]
    fn file_values_override_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("r3.toml");
        fs::write(
            &path,
            "[defaults]\nproject_type = \"cli\"\nlicense = \"Apache-2.0\"\n\n\
             [toolchain]\npackage_manager = \"pnpm\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.project_type, ProjectType::Cli);
        assert_eq!(cfg.defaults.license, License::Apache2);
        assert_eq!(cfg.toolchain.package_manager, "pnpm");
        // Untouched keys keep their defaults.
        assert_eq!(cfg.toolchain.vcs_program, "git");
        assert_eq!(cfg.defaults.description, "A project built with R3 scaffold");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[defaults]\nproject_type = \"game\"\n").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn serialises_to_toml() {
        let toml = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml.contains("[defaults]"));
        assert!(toml.contains("project_type = \"webapp\""));
        assert!(toml.contains("[toolchain]"));
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }

    #[test]
    fn explicit_template_dir_wins() {
        let mut cfg = AppConfig::default();
        cfg.templates.dir = Some(PathBuf::from("/opt/r3"));
        assert_eq!(cfg.template_dir(), PathBuf::from("/opt/r3"));
    }
}
