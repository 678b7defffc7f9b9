//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//!
//! ```text
//! ValidateTargetEmpty -> CreateDirectories -> WriteSeedFiles
//!   -> [CopyTemplateSource] -> RenderTemplates
//!   -> [InitVersionControl] -> [InstallDependencies]
//! ```
//!
//! Every failure is wrapped in `ScaffoldError::Stage` naming the step. Nothing
//! is rolled back once `CreateDirectories` has started.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
        services::project_builder::{InstallOutcome, ProjectBuilder, VcsOutcome},
    },
    domain::{
        CONFIG_FILE, ProjectConfig, ProjectStructure, TemplateContext, Validator, structure_for,
    },
    error::{Context, ScaffoldResult, ScaffoldStage, StageContext},
};

/// Input of [`ScaffoldService::create`].
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    pub project_name: String,
    /// Absolute path of the directory to generate into.
    pub project_path: PathBuf,
    pub config: ProjectConfig,
    pub skip_install: bool,
    pub skip_git: bool,
    /// Log every created path at `info` instead of `debug`.
    pub verbose: bool,
    /// Directory whose tree is copied into the project before rendering.
    pub template_source: Option<PathBuf>,
    /// Extra placeholder keys, merged over the built-in ones.
    pub extra_context: TemplateContext,
}

impl ScaffoldOptions {
    pub fn new(config: ProjectConfig, project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_name: config.name().to_string(),
            project_path: project_path.into(),
            config,
            skip_install: false,
            skip_git: false,
            verbose: false,
            template_source: None,
            extra_context: TemplateContext::new(),
        }
    }

    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    pub fn skip_git(mut self, skip: bool) -> Self {
        self.skip_git = skip;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn template_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.template_source = Some(source.into());
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_context.insert(key, value);
        self
    }
}

/// What a successful [`ScaffoldService::create`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub run_id: Uuid,
    pub project_path: PathBuf,
    pub directories_created: usize,
    pub seed_files_written: usize,
    pub files_copied: usize,
    pub templates_rendered: Vec<PathBuf>,
    pub version_control: VcsOutcome,
    pub install: InstallOutcome,
    /// Non-fatal problems, in the order they were raised.
    pub warnings: Vec<String>,
}

/// What [`ScaffoldService::init`] did to an existing directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub directories_created: Vec<PathBuf>,
    pub files_written: Vec<PathBuf>,
    /// Seed files and config that already existed and were left alone.
    pub files_kept: Vec<PathBuf>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn TemplateRenderer>,
    builder: ProjectBuilder,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        renderer: Box<dyn TemplateRenderer>,
        builder: ProjectBuilder,
    ) -> Self {
        Self {
            filesystem,
            renderer,
            builder,
        }
    }

    pub fn builder(&self) -> &ProjectBuilder {
        &self.builder
    }

    /// Generate a new project.
    #[instrument(
        skip_all,
        fields(
            run_id = tracing::field::Empty,
            project = %options.project_name,
            path = %options.project_path.display()
        )
    )]
    pub fn create(&self, options: &ScaffoldOptions) -> ScaffoldResult<ScaffoldReport> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));
        info!("Initializing R3 project: {}", options.project_name);

        let root = options.project_path.as_path();
        let mut report = ScaffoldReport {
            run_id,
            project_path: root.to_path_buf(),
            directories_created: 0,
            seed_files_written: 0,
            files_copied: 0,
            templates_rendered: Vec::new(),
            version_control: VcsOutcome::Skipped,
            install: InstallOutcome::Skipped,
            warnings: Vec::new(),
        };

        // 1. Precondition, before anything touches the disk.
        self.validate_target(root)
            .stage(ScaffoldStage::ValidateTargetEmpty)?;

        let structure = structure_for(options.config.project_type());
        Validator::validate_project_structure(&structure)
            .stage(ScaffoldStage::CreateDirectories)?;

        // 2-3. Layout and seed files.
        report.directories_created = self
            .create_directories(root, &structure, options.verbose)
            .stage(ScaffoldStage::CreateDirectories)?;
        report.seed_files_written = self
            .write_seed_files(root, &structure, options.verbose)
            .stage(ScaffoldStage::WriteSeedFiles)?;

        // 4. Optional user template tree.
        if let Some(source) = &options.template_source {
            report.files_copied = self
                .copy_template_source(source, root)
                .stage(ScaffoldStage::CopyTemplateSource)?;
        }

        // 5. Render in place.
        let context =
            TemplateContext::from_config(&options.config).merge(options.extra_context.clone());
        let rendered = self
            .renderer
            .render(root, &context)
            .stage(ScaffoldStage::RenderTemplates)?;
        info!(count = rendered.rendered_count(), "Templates rendered");
        report.templates_rendered = rendered.rendered;

        // 6. Version control never aborts.
        if !options.skip_git {
            report.version_control = self.builder.init_version_control(root);
            if let VcsOutcome::Failed { reason } = &report.version_control {
                warn!(
                    stage = %ScaffoldStage::InitVersionControl,
                    %reason,
                    "Continuing without version control"
                );
                report
                    .warnings
                    .push(format!("Failed to initialize Git repository: {reason}"));
            }
        }

        // 7. Install failures do.
        if !options.skip_install {
            report.install = self
                .builder
                .install_dependencies(root)
                .stage(ScaffoldStage::InstallDependencies)?;
            if report.install == InstallOutcome::NoManifest {
                report.warnings.push(format!(
                    "No {} found, skipping dependency installation",
                    self.builder.settings().manifest_file
                ));
            }
        }

        info!("R3 project \"{}\" created successfully", options.project_name);
        Ok(report)
    }

    /// Retrofit an existing directory: add missing layout and seed files and
    /// write `r3.config.json`. Existing files are never overwritten.
    #[instrument(skip_all, fields(path = %root.display(), project = %config.name()))]
    pub fn init(&self, root: &Path, config: &ProjectConfig) -> ScaffoldResult<InitReport> {
        let structure = structure_for(config.project_type());
        let mut report = InitReport::default();

        for dir in structure.directories() {
            let path = root.join(dir);
            if !self.filesystem.exists(&path) {
                self.filesystem.create_dir_all(&path)?;
                debug!(path = %path.display(), "Created directory");
                report.directories_created.push(path);
            }
        }

        let config_json = serde_json::to_string_pretty(config).context("serialize config")?;
        let files = structure
            .files()
            .map(|(path, content)| (root.join(path), content.to_string()))
            .chain(std::iter::once((root.join(CONFIG_FILE), config_json)));

        for (path, content) in files {
            if self.filesystem.exists(&path) {
                debug!(path = %path.display(), "Keeping existing file");
                report.files_kept.push(path);
                continue;
            }
            self.filesystem.write_file(&path, &content)?;
            report.files_written.push(path);
        }

        info!(
            directories = report.directories_created.len(),
            files = report.files_written.len(),
            "Project initialized"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn validate_target(&self, root: &Path) -> ScaffoldResult<()> {
        if self.filesystem.is_empty_dir(root)? {
            Ok(())
        } else {
            Err(ApplicationError::TargetNotEmpty {
                path: root.to_path_buf(),
            }
            .into())
        }
    }

    fn create_directories(
        &self,
        root: &Path,
        structure: &ProjectStructure,
        verbose: bool,
    ) -> ScaffoldResult<usize> {
        self.filesystem.create_dir_all(root)?;
        for dir in structure.directories() {
            let path = root.join(dir);
            self.filesystem.create_dir_all(&path)?;
            log_path(verbose, "Created directory", &path);
        }
        Ok(structure.directory_count())
    }

    fn write_seed_files(
        &self,
        root: &Path,
        structure: &ProjectStructure,
        verbose: bool,
    ) -> ScaffoldResult<usize> {
        for (rel, content) in structure.files() {
            let path = root.join(rel);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, content)?;
            log_path(verbose, "Wrote file", &path);
        }
        Ok(structure.file_count())
    }

    fn copy_template_source(&self, source: &Path, root: &Path) -> ScaffoldResult<usize> {
        if !self.filesystem.exists(source) {
            warn!(source = %source.display(), "Template source not found");
            return Err(ApplicationError::TemplateNotFound {
                name: source.display().to_string(),
            }
            .into());
        }
        let copied = self.filesystem.copy_dir(source, root)?;
        info!(copied, source = %source.display(), "Copied template source");
        Ok(copied)
    }
}

fn log_path(verbose: bool, message: &str, path: &Path) {
    if verbose {
        info!(path = %path.display(), "{message}");
    } else {
        debug!(path = %path.display(), "{message}");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::{
        CommandOutput, MockCommandRunner, MockFilesystem, MockTemplateRenderer, RenderReport,
    };
    use crate::domain::ProjectType;
    use crate::error::ScaffoldError;

    type Writes = Arc<Mutex<BTreeMap<PathBuf, String>>>;

    /// A mock filesystem that records directory creations and writes.
    fn recording_fs(empty: bool) -> (MockFilesystem, Arc<Mutex<Vec<PathBuf>>>, Writes) {
        let dirs = Arc::new(Mutex::new(Vec::new()));
        let writes: Writes = Arc::default();
        let mut fs = MockFilesystem::new();
        fs.expect_is_empty_dir().returning(move |_| Ok(empty));
        let d = Arc::clone(&dirs);
        fs.expect_create_dir_all().returning(move |p| {
            d.lock().unwrap().push(p.to_path_buf());
            Ok(())
        });
        let w = Arc::clone(&writes);
        fs.expect_write_file().returning(move |p, c| {
            w.lock().unwrap().insert(p.to_path_buf(), c.to_string());
            Ok(())
        });
        fs.expect_exists().returning(|_| false);
        (fs, dirs, writes)
    }

    fn noop_renderer() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .returning(|_, _| Ok(RenderReport::default()));
        renderer
    }

    fn unused_builder() -> ProjectBuilder {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();
        let mut fs = MockFilesystem::new();
        fs.expect_exists().never();
        ProjectBuilder::new(Box::new(runner), Box::new(fs))
    }

    fn cli_options() -> ScaffoldOptions {
        let config = ProjectConfig::builder("demo-app")
            .project_type(ProjectType::Cli)
            .build()
            .unwrap();
        ScaffoldOptions::new(config, "/tmp/demo-app")
            .skip_git(true)
            .skip_install(true)
    }

    #[test]
    fn creates_cli_layout_without_spawning() {
        let (fs, dirs, writes) = recording_fs(true);
        let service = ScaffoldService::new(Box::new(fs), Box::new(noop_renderer()), unused_builder());

        let report = service.create(&cli_options()).unwrap();

        let dirs = dirs.lock().unwrap();
        for d in ["src", "tests", "docs", "src/commands", "src/utils"] {
            assert!(dirs.contains(&PathBuf::from("/tmp/demo-app").join(d)), "{d}");
        }
        let writes = writes.lock().unwrap();
        assert!(writes.contains_key(Path::new("/tmp/demo-app/.gitignore")));
        assert!(writes.contains_key(Path::new("/tmp/demo-app/README.md")));
        assert_eq!(report.directories_created, 5);
        assert_eq!(report.seed_files_written, 2);
        assert_eq!(report.version_control, VcsOutcome::Skipped);
        assert_eq!(report.install, InstallOutcome::Skipped);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn non_empty_target_fails_before_any_mutation() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_empty_dir().returning(|_| Ok(false));
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(renderer), unused_builder());
        let err = service.create(&cli_options()).unwrap_err();

        assert_eq!(err.stage(), Some(ScaffoldStage::ValidateTargetEmpty));
        assert!(err.to_string().contains("/tmp/demo-app"));
    }

    #[test]
    fn unreadable_target_reports_io_cause_not_emptiness() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_empty_dir().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "Failed to read directory: Permission denied".into(),
            }
            .into())
        });
        fs.expect_create_dir_all().never();
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(renderer), unused_builder());
        let err = service.create(&cli_options()).unwrap_err();

        assert_eq!(err.stage(), Some(ScaffoldStage::ValidateTargetEmpty));
        assert!(matches!(
            err.root_cause(),
            ScaffoldError::Application(ApplicationError::FilesystemError { .. })
        ));
        assert!(err.to_string().contains("Permission denied"));
    }

    #[test]
    fn render_receives_context_from_config() {
        let (fs, _, _) = recording_fs(true);
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .withf(|root, ctx| {
                root == Path::new("/tmp/demo-app")
                    && ctx.get("projectName") == Some("demo-app")
                    && ctx.get("projectType") == Some("cli")
                    && ctx.get("extra") == Some("yes")
            })
            .times(1)
            .returning(|_, _| {
                Ok(RenderReport {
                    rendered: vec![PathBuf::from("/tmp/demo-app/package.json")],
                    skipped: 0,
                })
            });

        let service = ScaffoldService::new(Box::new(fs), Box::new(renderer), unused_builder());
        let report = service
            .create(&cli_options().with_variable("extra", "yes"))
            .unwrap();
        assert_eq!(report.templates_rendered.len(), 1);
    }

    #[test]
    fn render_failure_is_staged() {
        let (fs, _, _) = recording_fs(true);
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|_, _| {
            Err(ApplicationError::RenderFailed {
                path: PathBuf::from("/tmp/demo-app/a.tpl"),
                reason: "denied".into(),
            }
            .into())
        });

        let service = ScaffoldService::new(Box::new(fs), Box::new(renderer), unused_builder());
        let err = service.create(&cli_options()).unwrap_err();
        assert_eq!(err.stage(), Some(ScaffoldStage::RenderTemplates));
        assert!(err.to_string().contains("a.tpl"));
    }

    #[test]
    fn git_failure_becomes_warning_and_install_still_runs() {
        let (fs, _, _) = recording_fs(true);
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec| spec.program == "git")
            .returning(|_| Ok(CommandOutput::failed(1, "git: not configured")));
        runner
            .expect_run()
            .withf(|spec| spec.program == "npm")
            .times(1)
            .returning(|_| Ok(CommandOutput::ok()));
        let mut builder_fs = MockFilesystem::new();
        builder_fs.expect_exists().returning(|_| true);
        let builder = ProjectBuilder::new(Box::new(runner), Box::new(builder_fs));

        let service = ScaffoldService::new(Box::new(fs), Box::new(noop_renderer()), builder);
        let options = cli_options().skip_git(false).skip_install(false);
        let report = service.create(&options).unwrap();

        assert!(matches!(report.version_control, VcsOutcome::Failed { .. }));
        assert_eq!(report.install, InstallOutcome::Installed);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn install_failure_aborts_with_stage() {
        let (fs, _, _) = recording_fs(true);
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(CommandOutput::failed(1, "npm ERR!")));
        let mut builder_fs = MockFilesystem::new();
        builder_fs.expect_exists().returning(|_| true);
        let builder = ProjectBuilder::new(Box::new(runner), Box::new(builder_fs));

        let service = ScaffoldService::new(Box::new(fs), Box::new(noop_renderer()), builder);
        let err = service
            .create(&cli_options().skip_install(false))
            .unwrap_err();
        assert_eq!(err.stage(), Some(ScaffoldStage::InstallDependencies));
        assert!(matches!(
            err.root_cause(),
            ScaffoldError::Application(ApplicationError::CommandFailed { .. })
        ));
    }

    #[test]
    fn missing_manifest_is_a_warning() {
        let (fs, _, _) = recording_fs(true);
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();
        let mut builder_fs = MockFilesystem::new();
        builder_fs.expect_exists().returning(|_| false);
        let builder = ProjectBuilder::new(Box::new(runner), Box::new(builder_fs));

        let service = ScaffoldService::new(Box::new(fs), Box::new(noop_renderer()), builder);
        let report = service.create(&cli_options().skip_install(false)).unwrap();
        assert_eq!(report.install, InstallOutcome::NoManifest);
        assert!(report.warnings[0].contains("package.json"));
    }

    #[test]
    fn missing_template_source_is_staged() {
        let (fs, _, _) = recording_fs(true);
        let service = ScaffoldService::new(Box::new(fs), Box::new(noop_renderer()), unused_builder());
        let err = service
            .create(&cli_options().template_source("/nowhere"))
            .unwrap_err();
        assert_eq!(err.stage(), Some(ScaffoldStage::CopyTemplateSource));
    }

    #[test]
    fn init_writes_config_and_missing_seed_files_only() {
        let writes: Writes = Arc::default();
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p.ends_with("README.md") || p.ends_with("src"));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let w = Arc::clone(&writes);
        fs.expect_write_file().returning(move |p, c| {
            w.lock().unwrap().insert(p.to_path_buf(), c.to_string());
            Ok(())
        });

        let service = ScaffoldService::new(Box::new(fs), Box::new(noop_renderer()), unused_builder());
        let config = ProjectConfig::builder("retro").build().unwrap();
        let report = service.init(Path::new("/work/retro"), &config).unwrap();

        let writes = writes.lock().unwrap();
        assert!(!writes.contains_key(Path::new("/work/retro/README.md")));
        assert!(writes.contains_key(Path::new("/work/retro/.gitignore")));
        let json = &writes[Path::new("/work/retro/r3.config.json")];
        assert!(json.contains("\"name\": \"retro\""));
        assert_eq!(report.files_kept, vec![PathBuf::from("/work/retro/README.md")]);
        assert!(!report
            .directories_created
            .contains(&PathBuf::from("/work/retro/src")));
    }
}
