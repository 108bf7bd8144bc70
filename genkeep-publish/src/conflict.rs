//! Conflict resolution for unsplit writes.
//!
//! When a target file already exists the resolver picks, in order of
//! preference: merge (if the artifact's kind can be merged), overwrite (if
//! the shell allows it) and otherwise a fresh `<name>.N` next to the
//! existing file. Overwrites and renames are reported as warnings.

use std::path::{Path, PathBuf};

use genkeep_core::FileStore;
use tracing::warn;

use crate::{
    Artifact, Diagnostic, PublishError, ShellError,
    paths::unique_name,
    shell::{DescriptorMerger, ShellCallback},
};

/// Markers the upstream generator puts on members it owns in sources.
pub const SOURCE_PRESERVE_TAGS: &[&str] = &[
    "@ibatorgenerated",
    "@abatorgenerated",
    "@mbggenerated",
    "@mbg.generated",
];

/// What to do with one target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    WriteFresh,
    WriteMerged {
        existing: PathBuf,
        preserve_tags: Vec<String>,
    },
    WriteOverwriteWithWarning,
    WriteRenamed(PathBuf),
}

/// Decides and renders the write for a target that may already exist.
pub struct ConflictResolver<'a> {
    shell: &'a dyn ShellCallback,
    store: &'a dyn FileStore,
    descriptor_merger: Option<&'a dyn DescriptorMerger>,
}

impl<'a> ConflictResolver<'a> {
    pub fn new(shell: &'a dyn ShellCallback, store: &'a dyn FileStore) -> Self {
        Self {
            shell,
            store,
            descriptor_merger: None,
        }
    }

    pub fn with_descriptor_merger(mut self, merger: Option<&'a dyn DescriptorMerger>) -> Self {
        self.descriptor_merger = merger;
        self
    }

    /// Pick a disposition for writing `artifact` to `target`.
    ///
    /// Warnings for overwrites and renames are appended to `diagnostics`.
    pub fn resolve(
        &self,
        target: &Path,
        artifact: &Artifact,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Disposition, PublishError> {
        if !self.store.exists(target) {
            return Ok(Disposition::WriteFresh);
        }

        if self.can_merge(artifact) {
            return Ok(Disposition::WriteMerged {
                existing: target.to_path_buf(),
                preserve_tags: preserve_tags(artifact),
            });
        }

        if self.shell.is_overwrite_enabled() {
            let message = format!("Existing file {} was overwritten", display_path(target));
            warn!("{message}");
            diagnostics.push(Diagnostic::warning(message).at(artifact.file_name()));
            return Ok(Disposition::WriteOverwriteWithWarning);
        }

        let directory = target.parent().unwrap_or(Path::new(""));
        let file_name = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| artifact.file_name().to_string());
        let renamed = unique_name(directory, &file_name, self.store)?;
        let message = format!(
            "Existing file not overwritten, the generated file is saved as {}",
            display_path(&renamed)
        );
        warn!("{message}");
        diagnostics.push(Diagnostic::warning(message).at(artifact.file_name()));
        Ok(Disposition::WriteRenamed(renamed))
    }

    /// Final path and content for a resolved disposition.
    pub fn render(
        &self,
        disposition: Disposition,
        target: &Path,
        content: &str,
        artifact: &Artifact,
    ) -> Result<(PathBuf, String), PublishError> {
        match disposition {
            Disposition::WriteFresh | Disposition::WriteOverwriteWithWarning => {
                Ok((target.to_path_buf(), content.to_string()))
            }
            Disposition::WriteRenamed(path) => Ok((path, content.to_string())),
            Disposition::WriteMerged {
                existing,
                preserve_tags,
            } => {
                let merged = if artifact.kind().is_source() {
                    self.shell
                        .merge_source(content, &existing, &preserve_tags, artifact.encoding())?
                } else {
                    let merger = self.descriptor_merger.ok_or_else(|| ShellError::Merge {
                        path: existing.clone(),
                        message: "no descriptor merger is configured".to_string(),
                    })?;
                    merger.merged_source(artifact, &existing)?
                };
                Ok((existing, merged))
            }
        }
    }

    fn can_merge(&self, artifact: &Artifact) -> bool {
        if artifact.kind().is_source() {
            self.shell.is_merge_supported()
        } else {
            artifact.is_mergeable() && self.descriptor_merger.is_some()
        }
    }
}

fn preserve_tags(artifact: &Artifact) -> Vec<String> {
    if artifact.kind().is_source() {
        SOURCE_PRESERVE_TAGS.iter().map(|t| t.to_string()).collect()
    } else {
        artifact.preserve_tags().to_vec()
    }
}

/// Absolute form of `path` for messages, falling back to the path as given.
fn display_path(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
