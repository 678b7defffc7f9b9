//! Built-in template catalog.
//!
//! One entry per project type with its display name, a one-line description
//! and the dependencies a project of that type usually starts with. The
//! entries are informational: `list-templates` shows them and the generated
//! layout comes from `ProjectStructure`, not from here.

use r3_core::domain::{ProjectTemplate, ProjectType};

/// The entry for `project_type`.
pub fn template_for(project_type: ProjectType) -> ProjectTemplate {
    match project_type {
        ProjectType::Webapp => ProjectTemplate::new(
            ProjectType::Webapp,
            "Web Application",
            "Modern web application with React and Vite",
        )
        .with_dependencies(["react", "react-dom"])
        .with_dev_dependencies(["vite", "@vitejs/plugin-react", "typescript"]),

        ProjectType::Api => ProjectTemplate::new(
            ProjectType::Api,
            "REST API",
            "RESTful API with Express and TypeScript",
        )
        .with_dependencies(["express", "cors", "dotenv"])
        .with_dev_dependencies(["tsx", "typescript", "@types/express"]),

        ProjectType::Fullstack => ProjectTemplate::new(
            ProjectType::Fullstack,
            "Full Stack Application",
            "Full stack application with frontend and backend",
        )
        .with_dependencies(["express", "react", "react-dom"])
        .with_dev_dependencies(["vite", "typescript", "concurrently"]),

        ProjectType::Cli => ProjectTemplate::new(
            ProjectType::Cli,
            "CLI Tool",
            "Command-line tool with Commander and TypeScript",
        )
        .with_dependencies(["commander", "chalk", "inquirer"])
        .with_dev_dependencies(["tsx", "typescript", "@types/node"]),

        ProjectType::Library => ProjectTemplate::new(
            ProjectType::Library,
            "NPM Library",
            "Publishable NPM package",
        )
        .with_dev_dependencies(["typescript", "vitest", "tsup"]),

        ProjectType::Mobile => ProjectTemplate::new(
            ProjectType::Mobile,
            "Mobile Application",
            "React Native mobile application",
        )
        .with_dependencies(["react", "react-native"])
        .with_dev_dependencies(["typescript", "@types/react-native"]),

        ProjectType::Desktop => ProjectTemplate::new(
            ProjectType::Desktop,
            "Desktop Application",
            "Electron desktop application",
        )
        .with_dependencies(["electron"])
        .with_dev_dependencies(["typescript", "electron-builder"]),
    }
}

/// Every built-in entry, in `ProjectType::ALL` order.
pub fn all_templates() -> Vec<ProjectTemplate> {
    ProjectType::ALL.into_iter().map(template_for).collect()
}
