//! Interactive prompts for values missing from the command line.

use dialoguer::{Confirm, Input, MultiSelect, Select};

use r3_core::domain::{License, ProjectType, Validator};

use crate::error::{CliError, CliResult, IntoCli};

pub(crate) fn project_name(default: Option<&str>) -> CliResult<String> {
    let mut input = Input::<String>::new()
        .with_prompt("Project name")
        .validate_with(|name: &String| -> Result<(), String> {
            let errors = Validator::project_name_errors(name);
            if errors.is_empty() {
                Ok(())
            } else {
                Err(errors.join(", "))
            }
        });
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    input
        .interact_text()
        .with_cli_context(|| "Failed to read project name")
}

pub(crate) fn description(default: &str) -> CliResult<String> {
    Input::<String>::new()
        .with_prompt("Project description")
        .default(default.to_string())
        .interact_text()
        .with_cli_context(|| "Failed to read description")
}

/// Empty input means no author.
pub(crate) fn author(default: Option<&str>) -> CliResult<Option<String>> {
    let mut input = Input::<String>::new().with_prompt("Author").allow_empty(true);
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    let author = input
        .interact_text()
        .with_cli_context(|| "Failed to read author")?;
    let author = author.trim();
    Ok((!author.is_empty()).then(|| author.to_string()))
}

pub(crate) fn license(default: License) -> CliResult<License> {
    let items: Vec<&str> = License::ALL.iter().map(License::as_str).collect();
    let start = License::ALL.iter().position(|l| *l == default).unwrap_or(0);
    Select::new()
        .with_prompt("License")
        .items(&items)
        .default(start)
        .interact_opt()
        .with_cli_context(|| "Failed to read license")?
        .map(|i| License::ALL[i])
        .ok_or(CliError::Cancelled)
}

pub(crate) fn project_type(default: ProjectType) -> CliResult<ProjectType> {
    let items: Vec<&str> = ProjectType::ALL.iter().map(|t| display_name(*t)).collect();
    let start = ProjectType::ALL
        .iter()
        .position(|t| *t == default)
        .unwrap_or(0);
    Select::new()
        .with_prompt("Project type")
        .items(&items)
        .default(start)
        .interact_opt()
        .with_cli_context(|| "Failed to read project type")?
        .map(|i| ProjectType::ALL[i])
        .ok_or(CliError::Cancelled)
}

pub(crate) fn features(project_type: ProjectType) -> CliResult<Vec<String>> {
    let choices = project_type.feature_choices();
    let picked = MultiSelect::new()
        .with_prompt("Select features")
        .items(&choices)
        .interact_opt()
        .with_cli_context(|| "Failed to read features")?
        .ok_or(CliError::Cancelled)?;
    Ok(picked.into_iter().map(|i| choices[i].to_string()).collect())
}

pub(crate) fn confirm(prompt: &str) -> CliResult<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact_opt()
        .with_cli_context(|| "Failed to read answer")?
        .ok_or(CliError::Cancelled)
}

fn display_name(project_type: ProjectType) -> &'static str {
    match project_type {
        ProjectType::Webapp => "Web Application",
        ProjectType::Api => "REST API",
        ProjectType::Fullstack => "Full Stack",
        ProjectType::Cli => "CLI Tool",
        ProjectType::Library => "Library",
        ProjectType::Mobile => "Mobile App",
        ProjectType::Desktop => "Desktop App",
    }
}
