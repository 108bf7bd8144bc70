//! Test doubles for publishing runs against a [`MemoryStore`](genkeep_core::MemoryStore).

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use genkeep_core::Namespace;

use crate::{
    Artifact, ShellError,
    shell::{DescriptorMerger, ShellCallback},
};

/// A shell that maps every project below `root` and records refreshes.
pub struct RecordingShell {
    root: PathBuf,
    overwrite: bool,
    source_merge: Option<fn(&str, &Path) -> String>,
    missing_projects: Vec<String>,
    refreshed: Mutex<Vec<String>>,
}

impl RecordingShell {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            overwrite: false,
            source_merge: None,
            missing_projects: Vec::new(),
            refreshed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_source_merge(mut self, merge: fn(&str, &Path) -> String) -> Self {
        self.source_merge = Some(merge);
        self
    }

    pub fn without_project(mut self, project: &str) -> Self {
        self.missing_projects.push(project.to_string());
        self
    }

    pub fn refreshed(&self) -> Vec<String> {
        self.refreshed.lock().unwrap().clone()
    }
}

impl ShellCallback for RecordingShell {
    fn directory(&self, project: &str, namespace: &Namespace) -> Result<PathBuf, ShellError> {
        let project_dir = self.root.join(project);
        if self.missing_projects.iter().any(|p| p == project) {
            return Err(ShellError::ProjectMissing { path: project_dir });
        }
        Ok(project_dir.join(namespace.to_relative_path()))
    }

    fn is_merge_supported(&self) -> bool {
        self.source_merge.is_some()
    }

    fn merge_source(
        &self,
        new_content: &str,
        existing: &Path,
        _preserve_tags: &[String],
        _encoding: Option<&str>,
    ) -> Result<String, ShellError> {
        match self.source_merge {
            Some(merge) => Ok(merge(new_content, existing)),
            None => Err(ShellError::Merge {
                path: existing.to_path_buf(),
                message: "not supported".to_string(),
            }),
        }
    }

    fn is_overwrite_enabled(&self) -> bool {
        self.overwrite
    }

    fn refresh_project(&self, project: &str) {
        self.refreshed.lock().unwrap().push(project.to_string());
    }
}

/// A descriptor merger backed by a closure.
pub struct FnMerger<F>(pub F)
where
    F: Fn(&Artifact, &Path) -> Result<String, ShellError>;

impl<F> DescriptorMerger for FnMerger<F>
where
    F: Fn(&Artifact, &Path) -> Result<String, ShellError>,
{
    fn merged_source(&self, artifact: &Artifact, existing: &Path) -> Result<String, ShellError> {
        (self.0)(artifact, existing)
    }
}
