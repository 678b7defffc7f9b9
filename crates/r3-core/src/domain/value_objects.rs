//! Domain value objects: ProjectType, License.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add its extra directories in `entities/project_structure.rs`
//! 4. Add a catalog entry in `r3-adapters/src/builtin_templates.rs`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ProjectType ───────────────────────────────────────────────────────────────

/// The type of project to scaffold.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Webapp,
    Api,
    Fullstack,
    Cli,
    Library,
    Mobile,
    Desktop,
}

impl ProjectType {
    /// Every project type, in catalog order.
    pub const ALL: [ProjectType; 7] = [
        Self::Webapp,
        Self::Api,
        Self::Fullstack,
        Self::Cli,
        Self::Library,
        Self::Mobile,
        Self::Desktop,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Webapp => "webapp",
            Self::Api => "api",
            Self::Fullstack => "fullstack",
            Self::Cli => "cli",
            Self::Library => "library",
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }

    /// Feature tags offered for this project type.
    ///
    /// Features are an open set; these are only the suggestions shown by the
    /// prompt and by `list-templates`.
    pub fn feature_choices(self) -> Vec<&'static str> {
        let mut features = vec![
            "typescript",
            "eslint",
            "prettier",
            "testing",
            "github-actions",
        ];
        match self {
            Self::Webapp => features.extend(["react", "vue", "tailwind", "pwa"]),
            Self::Api => features.extend([
                "express", "fastify", "postgres", "mongodb", "auth", "api-docs",
            ]),
            Self::Cli => features.extend(["prompts", "progress", "colors"]),
            _ => {}
        }
        features
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "webapp" | "web" => Ok(Self::Webapp),
            "api" | "rest" => Ok(Self::Api),
            "fullstack" => Ok(Self::Fullstack),
            "cli" => Ok(Self::Cli),
            "library" | "lib" => Ok(Self::Library),
            "mobile" => Ok(Self::Mobile),
            "desktop" => Ok(Self::Desktop),
            other => Err(DomainError::UnknownProjectType(other.to_string())),
        }
    }
}

// ── License ───────────────────────────────────────────────────────────────────

/// License written into the project context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum License {
    #[default]
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "Apache-2.0")]
    Apache2,
    #[serde(rename = "GPL-3.0")]
    Gpl3,
    #[serde(rename = "BSD-3-Clause")]
    Bsd3Clause,
    #[serde(rename = "None")]
    None,
}

impl License {
    pub const ALL: [License; 5] = [
        Self::Mit,
        Self::Apache2,
        Self::Gpl3,
        Self::Bsd3Clause,
        Self::None,
    ];

    /// SPDX identifier, or `"None"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mit => "MIT",
            Self::Apache2 => "Apache-2.0",
            Self::Gpl3 => "GPL-3.0",
            Self::Bsd3Clause => "BSD-3-Clause",
            Self::None => "None",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for License {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mit" => Ok(Self::Mit),
            "apache-2.0" | "apache2" | "apache" => Ok(Self::Apache2),
            "gpl-3.0" | "gpl3" | "gpl" => Ok(Self::Gpl3),
            "bsd-3-clause" | "bsd3" | "bsd" => Ok(Self::Bsd3Clause),
            "none" | "unlicensed" => Ok(Self::None),
            other => Err(DomainError::UnknownLicense(other.to_string())),
        }
    }
}
