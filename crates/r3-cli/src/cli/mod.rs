//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use r3_core::domain::{License, ProjectType};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "r3",
    bin_name = "r3",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "R3 (River 3) - project scaffolding",
    long_about = "R3 generates a project layout, renders template files, \
                  initialises git and installs dependencies.",
    after_help = "EXAMPLES:\n\
        \x20 r3 create my-app --type webapp\n\
        \x20 r3 create my-tool -t cli --skip-install --skip-git -y\n\
        \x20 r3 list-templates --format json\n\
        \x20 r3 completions bash > /usr/share/bash-completion/completions/r3",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_alias = "new",
        about = "Create a new R3 project",
        after_help = "EXAMPLES:\n\
            \x20 r3 create my-app\n\
            \x20 r3 create my-api --type api --feature express --feature postgres\n\
            \x20 r3 create my-lib -t library -p ./libs/my-lib --template-dir ./tpl -y"
    )]
    Create(CreateArgs),

    /// Retrofit the current directory.
    #[command(
        about = "Initialize R3 in an existing project",
        after_help = "EXAMPLES:\n\
            \x20 r3 init\n\
            \x20 r3 init --name my-app --type cli"
    )]
    Init(InitArgs),

    /// List the project-type catalog.
    #[command(
        name = "list-templates",
        visible_alias = "ls",
        about = "List available project templates",
        after_help = "EXAMPLES:\n\
            \x20 r3 list-templates\n\
            \x20 r3 ls --format json"
    )]
    ListTemplates(ListArgs),

    /// Run a manifest script.
    #[command(
        about = "Run a package.json script",
        after_help = "EXAMPLES:\n\
            \x20 r3 run lint\n\
            \x20 r3 run dev --path ./my-app"
    )]
    Run(RunArgs),

    /// Run the `build` script.
    #[command(about = "Build the project (runs the \"build\" script)")]
    Build(ProjectPathArgs),

    /// Run the `test` script.
    #[command(about = "Test the project (runs the \"test\" script)")]
    Test(ProjectPathArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 r3 completions bash > ~/.local/share/bash-completion/completions/r3\n\
            \x20 r3 completions zsh  > ~/.zfunc/_r3\n\
            \x20 r3 completions fish > ~/.config/fish/completions/r3.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the R3 configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 r3 config get defaults.project_type\n\
            \x20 r3 config list\n\
            \x20 r3 config path"
    )]
    Config(ConfigCommands),
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `r3 create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Project name; prompted for when omitted.
    #[arg(value_name = "PROJECT_NAME", help = "Project name")]
    pub name: Option<String>,

    /// Project type.
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        value_enum,
        help = "Project type"
    )]
    pub project_type: Option<ProjectKind>,

    /// Project directory.  Defaults to `./<PROJECT_NAME>`.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Project path (default: ./<PROJECT_NAME>)"
    )]
    pub path: Option<PathBuf>,

    #[arg(long = "skip-install", help = "Skip dependency installation")]
    pub skip_install: bool,

    #[arg(long = "skip-git", help = "Skip git initialization")]
    pub skip_git: bool,

    #[arg(long = "description", value_name = "TEXT", help = "Project description")]
    pub description: Option<String>,

    #[arg(long = "author", value_name = "NAME", help = "Author")]
    pub author: Option<String>,

    #[arg(long = "license", value_name = "LICENSE", value_enum, help = "License")]
    pub license: Option<LicenseArg>,

    /// Feature tag; repeat for several.
    #[arg(
        short = 'f',
        long = "feature",
        value_name = "FEATURE",
        help = "Feature tag (repeatable)"
    )]
    pub features: Vec<String>,

    /// Directory whose tree is copied into the project before rendering.
    #[arg(
        long = "template-dir",
        value_name = "DIR",
        help = "Template directory copied into the project"
    )]
    pub template_dir: Option<PathBuf>,

    /// Skip all prompts.
    #[arg(short = 'y', long = "yes", help = "Use defaults instead of prompting")]
    pub yes: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `r3 init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project name.  Defaults to the directory's name.
    #[arg(long = "name", value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        value_enum,
        help = "Project type"
    )]
    pub project_type: Option<ProjectKind>,

    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Directory to initialize (default: current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(short = 'y', long = "yes", help = "Use defaults instead of prompting")]
    pub yes: bool,
}

// ── list-templates ────────────────────────────────────────────────────────────

/// Arguments for `r3 list-templates`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list-templates` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One type per line.
    List,
    /// JSON array.
    Json,
}

// ── run / build / test ────────────────────────────────────────────────────────

/// Arguments for `r3 run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Script name from package.json.
    #[arg(value_name = "SCRIPT")]
    pub script: String,

    #[command(flatten)]
    pub project: ProjectPathArgs,
}

/// Where to run a script.
#[derive(Debug, Args)]
pub struct ProjectPathArgs {
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Project directory (default: current directory)"
    )]
    pub path: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `r3 completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `r3 config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.project_type`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Project types accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ProjectKind {
    #[value(alias = "web")]
    Webapp,
    #[value(alias = "rest")]
    Api,
    Fullstack,
    Cli,
    #[value(alias = "lib")]
    Library,
    Mobile,
    Desktop,
}

impl From<ProjectKind> for ProjectType {
    fn from(kind: ProjectKind) -> Self {
        match kind {
            ProjectKind::Webapp => ProjectType::Webapp,
            ProjectKind::Api => ProjectType::Api,
            ProjectKind::Fullstack => ProjectType::Fullstack,
            ProjectKind::Cli => ProjectType::Cli,
            ProjectKind::Library => ProjectType::Library,
            ProjectKind::Mobile => ProjectType::Mobile,
            ProjectKind::Desktop => ProjectType::Desktop,
        }
    }
}

impl std::fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(ProjectType::from(*self).as_str())
    }
}

/// Licenses accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LicenseArg {
    #[value(name = "MIT", alias = "mit")]
    Mit,
    #[value(name = "Apache-2.0", alias = "apache")]
    Apache2,
    #[value(name = "GPL-3.0", alias = "gpl")]
    Gpl3,
    #[value(name = "BSD-3-Clause", alias = "bsd")]
    Bsd3Clause,
    #[value(name = "None", alias = "none")]
    None,
}

impl From<LicenseArg> for License {
    fn from(arg: LicenseArg) -> Self {
        match arg {
            LicenseArg::Mit => License::Mit,
            LicenseArg::Apache2 => License::Apache2,
            LicenseArg::Gpl3 => License::Gpl3,
            LicenseArg::Bsd3Clause => License::Bsd3Clause,
            LicenseArg::None => License::None,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
