//! The immutable description of a project to generate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    validation::Validator,
    value_objects::{License, ProjectType},
};

/// Version given to freshly scaffolded projects.
pub const DEFAULT_VERSION: &str = "0.1.0";

/// Name of the file `r3 init` writes into a retrofitted project.
pub const CONFIG_FILE: &str = "r3.config.json";

/// Everything the pipeline needs to know about the project.
///
/// Built once through [`ProjectConfigBuilder`] (which validates), then passed
/// by reference through the pipeline. There are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    name: String,
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(default)]
    license: License,
    #[serde(default)]
    project_type: ProjectType,
    #[serde(default)]
    features: BTreeSet<String>,
}

impl ProjectConfig {
    pub fn builder(name: impl Into<String>) -> ProjectConfigBuilder {
        ProjectConfigBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn license(&self) -> License {
        self.license
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    /// Feature tags, deduplicated and sorted.
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }

    pub fn has_feature(&self, tag: &str) -> bool {
        self.features.contains(tag)
    }

    /// Re-check invariants, e.g. after deserializing `r3.config.json`.
    pub fn validate(&self) -> Result<(), DomainError> {
        Validator::validate_project_name(&self.name)?;
        if let Err(e) = semver::Version::parse(&self.version) {
            return Err(DomainError::InvalidVersion {
                version: self.version.clone(),
                reason: e.to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`ProjectConfig`].
///
/// Only the name is required; everything else falls back to the defaults
/// new projects get (version `0.1.0`, MIT, webapp, no features).
#[derive(Debug, Clone)]
pub struct ProjectConfigBuilder {
    name: String,
    version: Option<String>,
    description: Option<String>,
    author: Option<String>,
    license: License,
    project_type: ProjectType,
    features: BTreeSet<String>,
}

impl ProjectConfigBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            description: None,
            author: None,
            license: License::default(),
            project_type: ProjectType::default(),
            features: BTreeSet::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Blank descriptions are treated as absent.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    /// Blank authors are treated as absent.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = non_blank(author.into());
        self
    }

    pub fn license(mut self, license: License) -> Self {
        self.license = license;
        self
    }

    pub fn project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = project_type;
        self
    }

    pub fn feature(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let tag = tag.trim();
        if !tag.is_empty() {
            self.features.insert(tag.to_string());
        }
        self
    }

    pub fn features<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tags.into_iter().fold(self, |builder, tag| builder.feature(tag))
    }

    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        let config = ProjectConfig {
            name: self.name,
            version: self.version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            description: self.description,
            author: self.author,
            license: self.license,
            project_type: self.project_type,
            features: self.features,
        };
        config.validate()?;
        Ok(config)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
