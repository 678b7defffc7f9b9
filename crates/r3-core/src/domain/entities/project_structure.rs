use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use crate::domain::{
    entities::common::RelativePath, error::DomainError, value_objects::ProjectType,
};

const BASE_DIRECTORIES: &[&str] = &["src", "tests", "docs"];

const GITIGNORE: &str = "node_modules/
dist/
build/
.env
.env.local
*.log
.DS_Store
coverage/
.vscode/
.idea/";

const README: &str = "# Project

Generated with R3 (River 3) Scaffold

## Getting Started

```bash
npm install
npm run dev
```

## Scripts

- `npm run dev` - Start development server
- `npm run build` - Build for production
- `npm test` - Run tests
";

/// Directories and seed files every generated project starts with.
///
/// This is the output of [`ProjectStructure::for_type`]. It contains no
/// business logic, only data. Seed files are written verbatim; they are never
/// templated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStructure {
    pub(crate) directories: Vec<RelativePath>,
    pub(crate) files: BTreeMap<RelativePath, String>,
}

impl ProjectStructure {
    pub fn new() -> Self {
        Self {
            directories: Vec::new(),
            files: BTreeMap::new(),
        }
    }

    /// The canonical layout for `project_type`.
    ///
    /// Pure: the same type always yields the same structure. Per-type
    /// directories are only ever added on top of the base set.
    pub fn for_type(project_type: ProjectType) -> Self {
        let extra: &[&str] = match project_type {
            ProjectType::Webapp => &["public", "src/components", "src/pages", "src/styles"],
            ProjectType::Api => &[
                "src/routes",
                "src/controllers",
                "src/models",
                "src/middleware",
            ],
            ProjectType::Cli => &["src/commands", "src/utils"],
            ProjectType::Fullstack
            | ProjectType::Library
            | ProjectType::Mobile
            | ProjectType::Desktop => &[],
        };

        let mut structure = Self::base();
        for dir in extra {
            structure.directories.push(RelativePath::builtin(*dir));
        }
        structure
    }

    /// Layout for a free-form type tag. Unrecognized tags get the base layout.
    pub fn for_tag(tag: &str) -> Self {
        tag.parse::<ProjectType>()
            .map(Self::for_type)
            .unwrap_or_else(|_| Self::base())
    }

    /// `src`, `tests`, `docs` plus `.gitignore` and `README.md`.
    pub fn base() -> Self {
        let mut structure = Self::new();
        for dir in BASE_DIRECTORIES {
            structure.directories.push(RelativePath::builtin(*dir));
        }
        structure
            .files
            .insert(RelativePath::builtin(".gitignore"), GITIGNORE.to_string());
        structure
            .files
            .insert(RelativePath::builtin("README.md"), README.to_string());
        structure
    }

    /// Fails if `path` is absolute or climbs out of the root.
    pub fn add_directory(&mut self, path: impl Into<PathBuf>) -> Result<(), DomainError> {
        self.directories.push(RelativePath::try_new(path)?);
        Ok(())
    }

    /// Fails if `path` is absolute or climbs out of the root.
    pub fn add_file(
        &mut self,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.files.insert(RelativePath::try_new(path)?, content.into());
        Ok(())
    }

    pub fn with_directory(mut self, path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        self.add_directory(path)?;
        Ok(self)
    }

    pub fn with_file(
        mut self,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        self.add_file(path, content)?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for dir in &self.directories {
            if !seen.insert(dir) {
                return Err(DomainError::DuplicatePath {
                    path: dir.to_string(),
                });
            }
        }
        for file in self.files.keys() {
            if seen.contains(file) {
                return Err(DomainError::DuplicatePath {
                    path: file.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn directories(&self) -> impl Iterator<Item = &RelativePath> {
        self.directories.iter()
    }

    pub fn files(&self) -> impl Iterator<Item = (&RelativePath, &str)> {
        self.files.iter().map(|(path, content)| (path, content.as_str()))
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Shorthand for [`ProjectStructure::for_type`].
pub fn structure_for(project_type: ProjectType) -> ProjectStructure {
    ProjectStructure::for_type(project_type)
}

/// Shorthand for [`ProjectStructure::for_tag`]. Never fails.
pub fn structure_for_tag(tag: &str) -> ProjectStructure {
    ProjectStructure::for_tag(tag)
}

impl Default for ProjectStructure {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir_names(structure: &ProjectStructure) -> Vec<String> {
        structure.directories().map(|d| d.to_string()).collect()
    }

    #[test]
    fn base_structure_has_three_dirs_and_two_seed_files() {
        let s = ProjectStructure::base();
        assert_eq!(dir_names(&s), vec!["src", "tests", "docs"]);
        let files: Vec<_> = s.files().map(|(p, _)| p.to_string()).collect();
        assert_eq!(files, vec![".gitignore", "README.md"]);
    }

    #[test]
    fn cli_adds_commands_and_utils() {
        let s = ProjectStructure::for_type(ProjectType::Cli);
        assert_eq!(
            dir_names(&s),
            vec!["src", "tests", "docs", "src/commands", "src/utils"]
        );
    }

    #[test]
    fn webapp_adds_public_and_ui_dirs() {
        let dirs = dir_names(&ProjectStructure::for_type(ProjectType::Webapp));
        for d in ["public", "src/components", "src/pages", "src/styles"] {
            assert!(dirs.contains(&d.to_string()), "missing {d}");
        }
    }

    #[test]
    fn api_adds_server_dirs() {
        let dirs = dir_names(&ProjectStructure::for_type(ProjectType::Api));
        for d in ["src/routes", "src/controllers", "src/models", "src/middleware"] {
            assert!(dirs.contains(&d.to_string()), "missing {d}");
        }
    }

    #[test]
    fn remaining_types_use_base_layout() {
        for ty in [
            ProjectType::Fullstack,
            ProjectType::Library,
            ProjectType::Mobile,
            ProjectType::Desktop,
        ] {
            assert_eq!(ProjectStructure::for_type(ty), ProjectStructure::base());
        }
    }

    #[test]
    fn every_type_is_a_superset_of_base() {
        let base = ProjectStructure::base();
        for ty in ProjectType::ALL {
            let s = ProjectStructure::for_type(ty);
            for dir in base.directories() {
                assert!(s.directories().any(|d| d == dir));
            }
            assert_eq!(s.files, base.files);
            assert!(s.validate().is_ok());
        }
    }

    #[test]
    fn structure_for_is_deterministic() {
        for ty in ProjectType::ALL {
            assert_eq!(ProjectStructure::for_type(ty), ProjectStructure::for_type(ty));
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_base() {
        assert_eq!(structure_for_tag("spaceship"), ProjectStructure::base());
        assert_eq!(structure_for_tag(""), ProjectStructure::base());
        assert_eq!(
            ProjectStructure::for_tag("cli"),
            ProjectStructure::for_type(ProjectType::Cli)
        );
    }

    #[test]
    fn gitignore_seed_is_fixed() {
        let s = ProjectStructure::base();
        let (_, gitignore) = s.files().find(|(p, _)| p.to_string() == ".gitignore").unwrap();
        assert!(gitignore.starts_with("node_modules/\n"));
        assert!(gitignore.ends_with(".idea/"));
    }

    #[test]
    fn validate_rejects_duplicate_directories() {
        let s = ProjectStructure::base().with_directory("src").unwrap();
        assert!(matches!(s.validate(), Err(DomainError::DuplicatePath { .. })));
    }

    #[test]
    fn validate_rejects_file_shadowing_directory() {
        let s = ProjectStructure::base().with_file("docs", "oops").unwrap();
        assert!(s.validate().is_err());
    }

    #[test]
    fn escaping_paths_are_rejected_not_panicked_on() {
        let mut s = ProjectStructure::base();
        assert!(matches!(
            s.add_directory("/etc"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
        assert!(s.add_file("../outside.txt", "x").is_err());
        assert!(ProjectStructure::new().with_directory("src/../..").is_err());
        assert_eq!(s, ProjectStructure::base());
    }
}
