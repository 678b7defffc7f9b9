//! Template Service - catalog queries.
//!
//! Separated from ScaffoldService for single responsibility: nothing in the
//! scaffold pipeline reads the catalog.

use crate::{
    application::ports::TemplateStore,
    domain::{ProjectTemplate, ProjectType},
    error::ScaffoldResult,
};

/// Service for template catalog operations.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Get the catalog entry for a project type.
    pub fn get(&self, project_type: ProjectType) -> ScaffoldResult<ProjectTemplate> {
        self.store.get(project_type)
    }

    /// List all catalog entries.
    pub fn list(&self) -> ScaffoldResult<Vec<ProjectTemplate>> {
        self.store.list()
    }

    /// Every project type the catalog knows about.
    pub fn types(&self) -> ScaffoldResult<Vec<ProjectType>> {
        Ok(self.list()?.into_iter().map(|t| t.project_type).collect())
    }
}
