//! Implementation of the `r3 list-templates` command.

use r3_adapters::InMemoryStore;
use r3_core::{application::TemplateService, domain::ProjectTemplate};

use crate::{
    cli::{ListArgs, ListFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: &OutputManager) -> CliResult<()> {
    let store = InMemoryStore::with_builtin()?;
    let templates = TemplateService::new(Box::new(store)).list()?;

    match args.format {
        ListFormat::Table => {
            output.header("Available project templates:")?;
            for line in table_lines(&templates) {
                output.print(&line)?;
            }
        }
        // Machine-readable formats ignore --quiet.
        ListFormat::List => {
            for t in &templates {
                output.raw(t.project_type.as_str())?;
            }
        }
        ListFormat::Json => {
            let json =
                serde_json::to_string_pretty(&templates).map_err(|e| CliError::InvalidInput {
                    message: format!("Failed to serialise templates: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.raw(&json)?;
        }
    }

    Ok(())
}

fn table_lines(templates: &[ProjectTemplate]) -> Vec<String> {
    let width = templates
        .iter()
        .map(|t| t.project_type.as_str().len())
        .max()
        .unwrap_or(0);
    templates
        .iter()
        .map(|t| {
            format!(
                "  \u{2022} {:<width$}  {} - {}",
                t.project_type.as_str(),
                t.name,
                t.description
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use r3_core::domain::ProjectType;

    #[test]
    fn table_has_a_line_per_type() {
        let templates = r3_adapters::builtin_templates::all_templates();
        let lines = table_lines(&templates);
        assert_eq!(lines.len(), ProjectType::ALL.len());
        assert!(lines.iter().any(|l| l.contains("fullstack")));
    }

    #[test]
    fn names_start_in_one_column() {
        let templates = r3_adapters::builtin_templates::all_templates();
        let width = ProjectType::ALL.iter().map(|t| t.as_str().len()).max().unwrap();
        for line in table_lines(&templates) {
            let rest = line.strip_prefix("  \u{2022} ").unwrap();
            assert_eq!(&rest[width..width + 2], "  ", "{line}");
            assert_ne!(rest.as_bytes()[width + 2], b' ', "{line}");
        }
    }
}
