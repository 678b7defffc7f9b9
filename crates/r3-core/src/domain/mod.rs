// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for R3.
//!
//! Pure values and rules: nothing in here touches the filesystem or spawns a
//! process. All I/O goes through the ports defined in the application layer.
//!
//! ## What lives here
//!
//! - **Value objects**: `ProjectType`, `License`
//! - **Entities**: `ProjectConfig` (validated once, then immutable),
//!   `ProjectStructure` (directories + seed files per type),
//!   `TemplateContext` (flat `{{key}}` substitution), `ProjectTemplate`
//!   (catalog entry)
//! - **Validation**: `Validator`, the syntactic predicates used before any
//!   mutation happens
pub mod entities;
pub mod error;
pub mod validation;
pub mod value_objects;

pub use entities::{
    CONFIG_FILE, DEFAULT_VERSION, ProjectConfig, ProjectConfigBuilder, ProjectStructure,
    ProjectTemplate, RelativePath, TEMPLATE_MARKERS, TemplateContext, is_template_file,
    strip_marker, structure_for, structure_for_tag,
};
pub use error::{DomainError, ErrorCategory};
pub use validation::{MAX_NAME_LENGTH, Validator};
pub use value_objects::{License, ProjectType};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Config -> Context
    // ========================================================================

    #[test]
    fn context_reflects_every_config_field() {
        let config = ProjectConfig::builder("@acme/widgets")
            .version("1.2.3")
            .description("Widgets")
            .author("Ada")
            .license(License::Gpl3)
            .project_type(ProjectType::Library)
            .feature("testing")
            .build()
            .unwrap();

        let ctx = TemplateContext::from_config_with_year(&config, 2030);
        let rendered = ctx.render(
            "{{projectName}}@{{projectVersion}} {{description}} {{author}} \
             {{license}} {{year}} {{projectType}} {{features}}",
        );
        assert_eq!(
            rendered,
            "@acme/widgets@1.2.3 Widgets Ada GPL-3.0 2030 library testing"
        );
    }

    #[test]
    fn context_uses_current_year_by_default() {
        use chrono::Datelike;
        let config = ProjectConfig::builder("demo").build().unwrap();
        let ctx = TemplateContext::from_config(&config);
        assert_eq!(
            ctx.get("year"),
            Some(chrono::Local::now().year().to_string().as_str())
        );
    }

    // ========================================================================
    // Validator <-> Config
    // ========================================================================

    #[test]
    fn validator_and_builder_agree_on_names() {
        for name in ["demo", "Demo", ".x", "@s/p", "fs", "a b"] {
            assert_eq!(
                Validator::is_valid_project_name(name),
                ProjectConfig::builder(name).build().is_ok(),
                "{name}"
            );
        }
    }

    #[test]
    fn validate_config_rechecks_deserialized_values() {
        let json = r#"{"name":"Bad Name","version":"0.1.0"}"#;
        let config: ProjectConfig = serde_json::from_str(json).unwrap();
        assert!(Validator::validate_config(&config).is_err());
    }

    // ========================================================================
    // Structure generation
    // ========================================================================

    #[test]
    fn every_type_produces_a_valid_structure() {
        for ty in ProjectType::ALL {
            assert!(Validator::validate_project_structure(&structure_for(ty)).is_ok());
        }
    }

    #[test]
    fn seed_files_are_never_templates() {
        for ty in ProjectType::ALL {
            for (path, _) in structure_for(ty).files() {
                assert!(!is_template_file(&path.to_string()), "{path}");
            }
        }
    }
}
