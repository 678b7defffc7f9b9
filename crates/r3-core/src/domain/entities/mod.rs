pub mod common;
pub mod project_config;
pub mod project_structure;
pub mod template;

pub use crate::domain::DomainError;
pub use common::RelativePath;
pub use project_config::{CONFIG_FILE, DEFAULT_VERSION, ProjectConfig, ProjectConfigBuilder};
pub use project_structure::{ProjectStructure, structure_for, structure_for_tag};
pub use template::{
    ProjectTemplate, TEMPLATE_MARKERS, TemplateContext, is_template_file, strip_marker,
};
