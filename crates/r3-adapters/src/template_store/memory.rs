//! In-memory template store with the built-in catalog.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use r3_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{ProjectTemplate, ProjectType},
    error::ScaffoldResult,
};

use crate::builtin_templates;

/// Thread-safe in-memory template store, keyed by project type.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<ProjectType, ProjectTemplate>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create a store with the built-in catalog loaded.
    pub fn with_builtin() -> ScaffoldResult<Self> {
        let store = Self::new();
        for template in builtin_templates::all_templates() {
            store.insert(template)?;
        }
        Ok(store)
    }

    /// Insert or replace the entry for a project type.
    pub fn insert(&self, template: ProjectTemplate) -> ScaffoldResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(template.project_type, template);
        Ok(())
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, project_type: ProjectType) -> ScaffoldResult<ProjectTemplate> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(&project_type).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                name: project_type.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> ScaffoldResult<Vec<ProjectTemplate>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_store_lists_all_types_in_order() {
        let store = InMemoryStore::with_builtin().unwrap();
        let types: Vec<_> = store.list().unwrap().into_iter().map(|t| t.project_type).collect();
        assert_eq!(types, ProjectType::ALL.to_vec());
    }

    #[test]
    fn get_returns_entry() {
        let store = InMemoryStore::with_builtin().unwrap();
        assert_eq!(store.get(ProjectType::Api).unwrap().name, "REST API");
    }

    #[test]
    fn empty_store_reports_not_found() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        assert!(store.get(ProjectType::Cli).is_err());
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let store = InMemoryStore::with_builtin().unwrap();
        store
            .insert(ProjectTemplate::new(ProjectType::Cli, "Custom CLI", "mine"))
            .unwrap();
        assert_eq!(store.len(), 7);
        assert_eq!(store.get(ProjectType::Cli).unwrap().name, "Custom CLI");
    }
}
