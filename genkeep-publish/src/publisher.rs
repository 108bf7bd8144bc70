//! The per-run publishing orchestrator.

use std::path::{Path, PathBuf};

use genkeep_core::{FileStore, WriteResult};
use genkeep_manifest::{Config, Layout};
use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    Artifact, ArtifactRegistry, ConflictResolver, Diagnostic, NullProgress, PathResolver,
    PlannedWrite, ProgressCallback, PublishError, ShellError, SplitPublisher, WriteRole,
    shell::{DefaultShell, DescriptorMerger, ShellCallback},
};

/// Outcome of a publishing run.
#[derive(Debug, Default, Serialize)]
pub struct PublishReport {
    /// Base and candidate files written this run
    pub written: Vec<PathBuf>,
    /// Extensions created this run
    pub scaffolded: Vec<PathBuf>,
    /// Extensions that already existed and were left untouched
    pub preserved: Vec<PathBuf>,
    /// Projects refreshed at the end of the run, in first-touched order
    pub refreshed: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PublishReport {
    /// Warning messages, in the order they were raised.
    pub fn warnings(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .map(|d| d.message.as_str())
            .collect()
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Number of files written or created.
    pub fn files_changed(&self) -> usize {
        self.written.len() + self.scaffolded.len()
    }
}

/// The writes a run would perform against the current store.
#[derive(Debug, Default, Serialize)]
pub struct Preview {
    /// Writes at their final paths, after conflict resolution
    pub writes: Vec<PlannedWrite>,
    /// Extensions that already exist and would be left untouched
    pub preserved: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Publishes batches of artifacts into a [`FileStore`].
///
/// # Example
///
/// ```
/// use genkeep_core::{ArtifactKind, MemoryStore};
/// use genkeep_manifest::Layout;
/// use genkeep_publish::{Artifact, DefaultShell, Publisher};
///
/// let store = MemoryStore::new();
/// let publisher = Publisher::new(Layout::default(), DefaultShell::new("/nowhere"), &store);
/// let artifact = Artifact::new("app", "com.acme.model.gen", "Order.java", "", ArtifactKind::Model);
///
/// // The project directory is missing: the artifact is skipped with a warning.
/// let report = publisher.publish([artifact]).unwrap();
/// assert_eq!(report.warnings().len(), 1);
/// assert!(store.is_empty());
/// ```
pub struct Publisher<'a> {
    paths: PathResolver,
    split: bool,
    shell: Box<dyn ShellCallback + 'a>,
    store: Box<dyn FileStore + 'a>,
    descriptor_merger: Option<Box<dyn DescriptorMerger + 'a>>,
    progress: Box<dyn ProgressCallback + 'a>,
}

impl<'a> Publisher<'a> {
    pub fn new(
        layout: Layout,
        shell: impl ShellCallback + 'a,
        store: impl FileStore + 'a,
    ) -> Self {
        Self {
            paths: PathResolver::new(layout),
            split: true,
            shell: Box::new(shell),
            store: Box::new(store),
            descriptor_merger: None,
            progress: Box::new(NullProgress),
        }
    }

    /// A publisher writing below `[output].root` as configured.
    pub fn from_config(config: &Config, store: impl FileStore + 'a) -> Self {
        let shell = DefaultShell::new(&config.output.root).with_overwrite(config.output.overwrite);
        Self::new(config.layout.clone(), shell, store).split(config.output.split)
    }

    /// Enable or disable the base/extension split.
    pub fn split(mut self, enabled: bool) -> Self {
        self.split = enabled;
        self
    }

    pub fn descriptor_merger(mut self, merger: impl DescriptorMerger + 'a) -> Self {
        self.descriptor_merger = Some(Box::new(merger));
        self
    }

    pub fn progress(mut self, progress: impl ProgressCallback + 'a) -> Self {
        self.progress = Box::new(progress);
        self
    }

    pub fn layout(&self) -> &Layout {
        self.paths.layout()
    }

    /// Publish one batch.
    ///
    /// Failures confined to one artifact become warnings and the run goes
    /// on; cancellation, namespace errors and an exhausted rename space
    /// stop the run, leaving files already written in place.
    pub fn publish(
        &self,
        artifacts: impl IntoIterator<Item = Artifact>,
    ) -> Result<PublishReport, PublishError> {
        let mut registry = ArtifactRegistry::new();
        registry.register_all(artifacts);

        let mut report = PublishReport::default();
        let mut touched = IndexSet::new();
        self.progress.save_started(registry.len());
        info!(artifacts = registry.len(), split = self.split, "publishing batch");

        for artifact in registry.in_write_order() {
            match self.publish_artifact(artifact, &registry, &mut report, &mut touched) {
                Ok(()) => {}
                Err(PublishError::Shell(err)) => skip(artifact, err, &mut report.diagnostics),
                Err(fatal) => return Err(fatal),
            }
        }

        for project in &touched {
            self.shell.refresh_project(project);
        }
        report.refreshed = touched.into_iter().collect();
        self.progress.done();
        info!(
            written = report.written.len(),
            scaffolded = report.scaffolded.len(),
            preserved = report.preserved.len(),
            "batch published"
        );

        Ok(report)
    }

    /// Plan a batch without writing anything.
    pub fn preview(
        &self,
        artifacts: impl IntoIterator<Item = Artifact>,
    ) -> Result<Preview, PublishError> {
        let mut registry = ArtifactRegistry::new();
        registry.register_all(artifacts);

        let mut preview = Preview::default();
        for artifact in registry.in_write_order() {
            match self.preview_artifact(artifact, &registry, &mut preview) {
                Ok(()) => {}
                Err(PublishError::Shell(err)) => skip(artifact, err, &mut preview.diagnostics),
                Err(fatal) => return Err(fatal),
            }
        }
        Ok(preview)
    }

    fn plan(
        &self,
        artifact: &Artifact,
        registry: &ArtifactRegistry,
    ) -> Result<Vec<PlannedWrite>, PublishError> {
        artifact.charset()?;
        let planner = SplitPublisher::new(&self.paths, self.shell.as_ref());
        if self.split {
            planner.plan(artifact, registry)
        } else {
            planner.plan_unsplit(artifact)
        }
    }

    fn publish_artifact(
        &self,
        artifact: &Artifact,
        registry: &ArtifactRegistry,
        report: &mut PublishReport,
        touched: &mut IndexSet<String>,
    ) -> Result<(), PublishError> {
        let writes = self.plan(artifact, registry)?;
        debug!(file = artifact.file_name(), writes = writes.len(), "planned");

        for write in writes {
            if self.progress.is_cancelled() {
                warn!(file = artifact.file_name(), "publishing cancelled");
                return Err(PublishError::Cancelled);
            }
            touched.insert(artifact.target_project().to_string());
            self.execute(write, artifact, report)?;
        }
        Ok(())
    }

    fn preview_artifact(
        &self,
        artifact: &Artifact,
        registry: &ArtifactRegistry,
        preview: &mut Preview,
    ) -> Result<(), PublishError> {
        for write in self.plan(artifact, registry)? {
            if write.role == WriteRole::Extension && self.store.exists(&write.path) {
                note_preserved(&write.path, artifact, &mut preview.diagnostics);
                preview.preserved.push(write.path);
                continue;
            }
            let write = self.resolve(write, artifact, &mut preview.diagnostics)?;
            artifact.encode(&write.content)?;
            preview.writes.push(write);
        }
        Ok(())
    }

    /// Final path and content of a candidate write; other roles pass through.
    fn resolve(
        &self,
        write: PlannedWrite,
        artifact: &Artifact,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<PlannedWrite, PublishError> {
        if write.role != WriteRole::Candidate {
            return Ok(write);
        }
        let resolver = ConflictResolver::new(self.shell.as_ref(), self.store.as_ref())
            .with_descriptor_merger(
                self.descriptor_merger
                    .as_deref()
                    .map(|m| m as &dyn DescriptorMerger),
            );
        let disposition = resolver.resolve(&write.path, artifact, diagnostics)?;
        debug!(path = %write.path.display(), ?disposition, "resolved");
        let (path, content) = resolver.render(disposition, &write.path, &write.content, artifact)?;
        Ok(PlannedWrite::candidate(path, content))
    }

    fn execute(
        &self,
        write: PlannedWrite,
        artifact: &Artifact,
        report: &mut PublishReport,
    ) -> Result<(), PublishError> {
        self.progress
            .start_task(&format!("Saving file {}", write.path.display()));

        let write = self.resolve(write, artifact, &mut report.diagnostics)?;
        let bytes = artifact.encode(&write.content)?;
        let result = self
            .store
            .write_with(&write.path, &bytes, write.role.overwrite())
            .map_err(ShellError::io(&write.path))?;

        match (write.role, result) {
            (WriteRole::Extension, WriteResult::Written) => {
                info!(path = %write.path.display(), "scaffolded extension");
                report.scaffolded.push(write.path);
            }
            (WriteRole::Extension, WriteResult::Skipped) => {
                note_preserved(&write.path, artifact, &mut report.diagnostics);
                report.preserved.push(write.path);
            }
            _ => {
                debug!(path = %write.path.display(), role = %write.role, "written");
                report.written.push(write.path);
            }
        }
        Ok(())
    }
}

fn note_preserved(path: &Path, artifact: &Artifact, diagnostics: &mut Vec<Diagnostic>) {
    info!(path = %path.display(), "extension exists, leaving it untouched");
    diagnostics.push(
        Diagnostic::info(format!("{} exists, leaving it untouched", path.display()))
            .at(artifact.file_name()),
    );
}

/// Record an artifact skipped because of a recoverable error.
fn skip(artifact: &Artifact, err: ShellError, diagnostics: &mut Vec<Diagnostic>) {
    warn!(file = artifact.file_name(), "{err}");
    diagnostics.push(Diagnostic::warning(err.to_string()).at(artifact.file_name()));
}
