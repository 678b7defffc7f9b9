//! Template-side domain types.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ProjectTemplate (catalog entry)                            │
//! │  └── type, display name, description, dependency hints      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TemplateContext (Value Object)                             │
//! │  └── Flat substitution: {{projectName}} -> "demo-app"       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Template files on disk are recognised purely by name: anything ending in
//! one of [`TEMPLATE_MARKERS`] is rendered and renamed with the marker
//! stripped. Everything else is left untouched.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::Datelike;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::domain::{entities::project_config::ProjectConfig, value_objects::ProjectType};

/// File-name suffixes that mark a file as a template.
pub const TEMPLATE_MARKERS: [&str; 3] = [".ejs", ".hbs", ".tpl"];

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid placeholder regex"));

/// `true` if `file_name` ends in a template marker.
pub fn is_template_file(file_name: &str) -> bool {
    strip_marker(file_name).is_some()
}

/// The output name for a template file, or `None` if it carries no marker.
///
/// A bare marker (`".tpl"`) is not a template: stripping it would leave an
/// empty name.
pub fn strip_marker(file_name: &str) -> Option<&str> {
    TEMPLATE_MARKERS
        .iter()
        .find_map(|marker| file_name.strip_suffix(marker))
        .filter(|stem| !stem.is_empty())
}

/// Mapping from placeholder key to substitution value.
///
/// Built once per run from a [`ProjectConfig`] and the current year. The key
/// space is open: callers may merge extra keys with [`with_variable`].
///
/// ## Built-in Keys
///
/// | Key | Example | Present when |
/// |-----|---------|--------------|
/// | `projectName` | "demo-app" | always |
/// | `projectVersion` | "0.1.0" | always |
/// | `description` | "A demo" | set on the config |
/// | `author` | "Ada" | set on the config |
/// | `license` | "MIT" | always |
/// | `year` | "2026" | always |
/// | `projectType` | "cli" | always |
/// | `features` | "eslint,react" | at least one feature |
///
/// [`with_variable`]: TemplateContext::with_variable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    variables: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for `config` stamped with the current calendar year.
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self::from_config_with_year(config, chrono::Local::now().year())
    }

    /// Same as [`from_config`](Self::from_config) with a fixed year.
    pub fn from_config_with_year(config: &ProjectConfig, year: i32) -> Self {
        let mut ctx = Self::new()
            .with_variable("projectName", config.name())
            .with_variable("projectVersion", config.version())
            .with_variable("license", config.license().as_str())
            .with_variable("year", year.to_string())
            .with_variable("projectType", config.project_type().as_str());

        if let Some(description) = config.description() {
            ctx.insert("description", description);
        }
        if let Some(author) = config.author() {
            ctx.insert("author", author);
        }
        let features = config.features().collect::<Vec<_>>().join(",");
        if !features.is_empty() {
            ctx.insert("features", features);
        }
        ctx
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Merge `other` into `self`; keys from `other` win.
    pub fn merge(mut self, other: TemplateContext) -> Self {
        self.variables.extend(other.variables);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every `{{key}}` in `template` with its value.
    ///
    /// Single pass: substituted values are never rescanned, so a value that
    /// itself contains `{{...}}` is emitted literally. Unknown keys and keys
    /// bound to an empty string are left verbatim. Keys are flat word
    /// identifiers; `{{a.b}}` never matches.
    pub fn render(&self, template: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(template, |caps: &Captures<'_>| {
                match self.get(&caps[1]).filter(|v| !v.is_empty()) {
                    Some(value) => value.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

/// One entry of the built-in template catalog.
///
/// Purely descriptive; it drives `list-templates` and nothing in the pipeline
/// depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTemplate {
    pub project_type: ProjectType,
    pub name: String,
    pub description: String,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

impl ProjectTemplate {
    pub fn new(
        project_type: ProjectType,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            project_type,
            name: name.into(),
            description: description.into(),
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(deps.into_iter().map(Into::into));
        self
    }

    pub fn with_dev_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dev_dependencies.extend(deps.into_iter().map(Into::into));
        self
    }
}
