//! Host environment callbacks.
//!
//! The shell resolves target directories, optionally merges sources into
//! existing files, and is told when a project's files changed. Descriptor
//! merging is a separate collaborator since it needs the artifact itself.

use std::path::{Path, PathBuf};

use genkeep_core::Namespace;

use crate::{Artifact, ShellError};

/// The environment a publishing run writes into.
#[allow(unused_variables)]
pub trait ShellCallback {
    /// Directory for `namespace` inside `project`.
    fn directory(&self, project: &str, namespace: &Namespace) -> Result<PathBuf, ShellError>;

    /// Whether [`merge_source`](Self::merge_source) is available.
    fn is_merge_supported(&self) -> bool {
        false
    }

    /// Merge newly generated source text into the file at `existing`,
    /// keeping members not marked with any of `preserve_tags`.
    fn merge_source(
        &self,
        new_content: &str,
        existing: &Path,
        preserve_tags: &[String],
        encoding: Option<&str>,
    ) -> Result<String, ShellError> {
        Err(ShellError::Merge {
            path: existing.to_path_buf(),
            message: "source merging is not supported".to_string(),
        })
    }

    /// Whether existing files may be overwritten instead of renamed.
    fn is_overwrite_enabled(&self) -> bool {
        false
    }

    /// Called once per touched project at the end of a run.
    fn refresh_project(&self, project: &str) {}
}

impl<T: ShellCallback + ?Sized> ShellCallback for &T {
    fn directory(&self, project: &str, namespace: &Namespace) -> Result<PathBuf, ShellError> {
        (**self).directory(project, namespace)
    }

    fn is_merge_supported(&self) -> bool {
        (**self).is_merge_supported()
    }

    fn merge_source(
        &self,
        new_content: &str,
        existing: &Path,
        preserve_tags: &[String],
        encoding: Option<&str>,
    ) -> Result<String, ShellError> {
        (**self).merge_source(new_content, existing, preserve_tags, encoding)
    }

    fn is_overwrite_enabled(&self) -> bool {
        (**self).is_overwrite_enabled()
    }

    fn refresh_project(&self, project: &str) {
        (**self).refresh_project(project)
    }
}

/// Merges a generated descriptor into an existing one.
pub trait DescriptorMerger {
    fn merged_source(&self, artifact: &Artifact, existing: &Path) -> Result<String, ShellError>;
}

/// Resolves projects as directories below a root on disk.
///
/// A project directory must already exist; namespace directories below it
/// are created on write.
#[derive(Debug, Clone)]
pub struct DefaultShell {
    root: PathBuf,
    overwrite: bool,
}

impl DefaultShell {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            overwrite: false,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ShellCallback for DefaultShell {
    fn directory(&self, project: &str, namespace: &Namespace) -> Result<PathBuf, ShellError> {
        let project_dir = self.root.join(project);
        if !project_dir.is_dir() {
            return Err(ShellError::ProjectMissing { path: project_dir });
        }
        Ok(project_dir.join(namespace.to_relative_path()))
    }

    fn is_overwrite_enabled(&self) -> bool {
        self.overwrite
    }

    fn refresh_project(&self, project: &str) {
        tracing::debug!(project, "project files changed");
    }
}
