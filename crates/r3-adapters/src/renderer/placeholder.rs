//! In-place `{{key}}` renderer.
//!
//! Walks a project tree, and for every file whose name ends in a template
//! marker writes the substituted content next to it (marker stripped) and
//! deletes the template. Each file is handled on its own:
//!
//! - write fails: the template is left untouched
//! - delete fails after a successful write: the output is removed again
//!
//! Either way the pass stops at the first failing file.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::RwLock,
};

use r3_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, RenderReport, TemplateRenderer},
    },
    domain::{TemplateContext, strip_marker},
    error::{ScaffoldError, ScaffoldResult},
};
use tracing::{debug, instrument, trace, warn};

/// Renderer that substitutes flat `{{key}}` placeholders.
pub struct PlaceholderRenderer {
    filesystem: Box<dyn Filesystem>,
    template_dir: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl PlaceholderRenderer {
    /// `template_dir` is where [`load_template`](TemplateRenderer::load_template)
    /// looks up named templates.
    pub fn new(filesystem: Box<dyn Filesystem>, template_dir: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            template_dir: template_dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Number of cached named templates.
    pub fn cached(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }

    fn render_file(
        &self,
        template: &Path,
        output: &Path,
        context: &TemplateContext,
    ) -> ScaffoldResult<()> {
        let source = self
            .filesystem
            .read_to_string(template)
            .map_err(|e| render_failed(template, e))?;
        let rendered = context.render(&source);

        self.filesystem
            .write_file(output, &rendered)
            .map_err(|e| render_failed(template, e))?;

        if let Err(e) = self.filesystem.remove_file(template) {
            if let Err(cleanup) = self.filesystem.remove_file(output) {
                warn!(
                    output = %output.display(),
                    error = %cleanup,
                    "Could not remove rendered output after failed template delete"
                );
            }
            return Err(render_failed(template, e));
        }
        Ok(())
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    #[instrument(skip(self, context), fields(root = %root.display()))]
    fn render(&self, root: &Path, context: &TemplateContext) -> ScaffoldResult<RenderReport> {
        // Collect first so outputs written during the pass are never revisited.
        let files = self.filesystem.walk_files(root)?;
        let mut report = RenderReport::default();

        for template in files {
            let output_name = template
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(strip_marker);
            let Some(output_name) = output_name else {
                trace!(path = %template.display(), "Not a template");
                report.skipped += 1;
                continue;
            };

            let output = template.with_file_name(output_name);
            self.render_file(&template, &output, context)?;
            debug!(template = %template.display(), output = %output.display(), "Rendered");
            report.rendered.push(output);
        }

        Ok(report)
    }

    fn load_template(&self, name: &str) -> ScaffoldResult<String> {
        {
            let cache = self
                .cache
                .read()
                .map_err(|_| ApplicationError::StoreLockError)?;
            if let Some(content) = cache.get(name) {
                return Ok(content.clone());
            }
        }

        let path = self.template_dir.join(name);
        if !self.filesystem.exists(&path) {
            return Err(ApplicationError::TemplateNotFound {
                name: name.to_string(),
            }
            .into());
        }
        let content = self.filesystem.read_to_string(&path)?;

        self.cache
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?
            .insert(name.to_string(), content.clone());
        Ok(content)
    }
}

fn render_failed(path: &Path, cause: ScaffoldError) -> ScaffoldError {
    let reason = match cause.root_cause() {
        ScaffoldError::Application(ApplicationError::FilesystemError { reason, .. }) => {
            reason.clone()
        }
        other => other.to_string(),
    };
    ApplicationError::RenderFailed {
        path: path.to_path_buf(),
        reason,
    }
    .into()
}
