//! Implementation of the `r3 create` command.
//!
//! Responsibility: resolve every project detail (flags, then prompts, then
//! config defaults), build a `ProjectConfig`, run the scaffold pipeline and
//! report the outcome.  No business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use r3_adapters::filesystem::utils;
use r3_core::{
    application::{InstallOutcome, ScaffoldOptions, ScaffoldReport, VcsOutcome},
    domain::{License, ProjectConfig, ProjectType},
};

use crate::{
    cli::{CreateArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Every value the pipeline needs, resolved from flags, prompts and config.
#[derive(Debug, Clone, PartialEq)]
struct Answers {
    name: String,
    project_type: ProjectType,
    description: String,
    author: Option<String>,
    license: License,
    features: Vec<String>,
    skip_install: bool,
    skip_git: bool,
}

/// Execute the `r3 create` command.
///
/// 1. Resolve the project details (prompting only on a TTY without `--yes`)
/// 2. Validate them into a `ProjectConfig`
/// 3. Run the scaffold pipeline into `--path` or `./<name>`
/// 4. Print warnings, the generated tree (with `-v`) and next steps
#[instrument(skip_all, fields(project = args.name.as_deref().unwrap_or("<prompt>")))]
pub fn execute(
    args: CreateArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let answers = if output.is_interactive() && !args.yes {
        ask(&args, config)?
    } else {
        from_flags(&args, config)?
    };

    let project = build_config(&answers)?;
    let project_path = project_path(args.path.as_deref(), &answers.name)?;
    debug!(
        project_type = %project.project_type(),
        path = %project_path.display(),
        "Project resolved"
    );

    let mut options = ScaffoldOptions::new(project, &project_path)
        .skip_install(answers.skip_install)
        .skip_git(answers.skip_git)
        .verbose(global.verbose > 0);
    if let Some(dir) = &args.template_dir {
        options = options.template_source(crate::commands::resolve_dir(Some(dir.as_path()))?);
    }

    output.header(&format!("Creating R3 project \"{}\"", answers.name))?;
    let spinner = output.spinner("Scaffolding project...");
    let service = crate::commands::scaffold_service(config);
    let report = match service.create(&options) {
        Ok(report) => report,
        Err(e) => {
            spinner.finish_error();
            return Err(e.into());
        }
    };
    spinner.finish_success("Project scaffolded");
    info!(run_id = %report.run_id, "Scaffold completed");

    for warning in &report.warnings {
        output.warning(warning)?;
    }
    print_summary(&report, output)?;
    if global.verbose > 0 {
        print_tree(&report.project_path, output)?;
    }

    output.success(&format!(
        "R3 project \"{}\" created successfully!",
        answers.name
    ))?;
    print_next_steps(&answers, &report, output)?;
    Ok(())
}

// ── Answer resolution ─────────────────────────────────────────────────────────

/// Resolve everything without prompting.
fn from_flags(args: &CreateArgs, config: &AppConfig) -> CliResult<Answers> {
    let name = args.name.clone().ok_or(CliError::MissingProjectName)?;
    let defaults = &config.defaults;
    Ok(Answers {
        name,
        project_type: args
            .project_type
            .map(Into::into)
            .unwrap_or(defaults.project_type),
        description: args
            .description
            .clone()
            .unwrap_or_else(|| defaults.description.clone()),
        author: args.author.clone().or_else(|| defaults.author.clone()),
        license: args.license.map(Into::into).unwrap_or(defaults.license),
        features: args.features.clone(),
        skip_install: args.skip_install,
        skip_git: args.skip_git,
    })
}

/// Prompt for every value the flags left open.
#[cfg(feature = "interactive")]
fn ask(args: &CreateArgs, config: &AppConfig) -> CliResult<Answers> {
    use super::prompt;

    let defaults = &config.defaults;
    let name = match &args.name {
        Some(name) => name.clone(),
        None => prompt::project_name(None)?,
    };
    let description = match &args.description {
        Some(d) => d.clone(),
        None => prompt::description(&defaults.description)?,
    };
    let author = match &args.author {
        Some(a) => Some(a.clone()),
        None => prompt::author(defaults.author.as_deref())?,
    };
    let license = match args.license {
        Some(l) => l.into(),
        None => prompt::license(defaults.license)?,
    };
    let project_type = match args.project_type {
        Some(t) => t.into(),
        None => prompt::project_type(defaults.project_type)?,
    };
    let features = if args.features.is_empty() {
        prompt::features(project_type)?
    } else {
        args.features.clone()
    };
    let skip_install = args.skip_install || prompt::confirm("Skip dependency installation?")?;
    let skip_git = args.skip_git || prompt::confirm("Skip git initialization?")?;

    Ok(Answers {
        name,
        project_type,
        description,
        author,
        license,
        features,
        skip_install,
        skip_git,
    })
}

#[cfg(not(feature = "interactive"))]
fn ask(args: &CreateArgs, config: &AppConfig) -> CliResult<Answers> {
    from_flags(args, config)
}

fn build_config(answers: &Answers) -> CliResult<ProjectConfig> {
    let mut builder = ProjectConfig::builder(&answers.name)
        .project_type(answers.project_type)
        .description(&answers.description)
        .license(answers.license)
        .features(answers.features.iter().cloned());
    if let Some(author) = &answers.author {
        builder = builder.author(author);
    }
    builder.build().map_err(|e| CliError::Core(e.into()))
}

/// `--path` as given, else `./<name>`; always absolute.
fn project_path(path: Option<&Path>, name: &str) -> CliResult<PathBuf> {
    let path = path.map_or_else(|| PathBuf::from(name), Path::to_path_buf);
    crate::commands::resolve_dir(Some(path.as_path()))
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn print_summary(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    output.print(&format!("  Location:    {}", report.project_path.display()))?;
    output.print(&format!(
        "  Structure:   {} directories, {} files",
        report.directories_created, report.seed_files_written
    ))?;
    if report.files_copied > 0 || !report.templates_rendered.is_empty() {
        output.print(&format!(
            "  Templates:   {} copied, {} rendered",
            report.files_copied,
            report.templates_rendered.len()
        ))?;
    }
    let git = match &report.version_control {
        VcsOutcome::Skipped => "skipped",
        VcsOutcome::Initialized => "initialized",
        VcsOutcome::Failed { .. } => "failed",
    };
    let install = match report.install {
        InstallOutcome::Skipped => "skipped",
        InstallOutcome::Installed => "installed",
        InstallOutcome::NoManifest => "no manifest",
    };
    output.print(&format!("  Git:         {git}"))?;
    output.print(&format!("  Install:     {install}"))?;
    Ok(())
}

/// Every generated file with a short content hash, then the total size.
fn print_tree(root: &Path, output: &OutputManager) -> CliResult<()> {
    let files = utils::find_files(root, |name| name != ".DS_Store")?;
    output.print("")?;
    output.print("Generated files:")?;
    for file in &files {
        let hash = utils::file_hash(file)?;
        let rel = file.strip_prefix(root).unwrap_or(file);
        output.print(&format!("  {}  {}", &hash[..12], rel.display()))?;
    }
    let size = utils::directory_size(root)?;
    output.print(&format!(
        "  {} files, {}",
        files.len(),
        utils::format_bytes(size)
    ))?;
    output.print("")?;
    Ok(())
}

fn print_next_steps(
    answers: &Answers,
    report: &ScaffoldReport,
    output: &OutputManager,
) -> CliResult<()> {
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", report.project_path.display()))?;
    if report.install != InstallOutcome::Installed {
        output.print("  npm install")?;
    }
    let start = match answers.project_type {
        ProjectType::Cli | ProjectType::Library => "npm run build",
        _ => "npm run dev",
    };
    output.print(&format!("  {start}"))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
