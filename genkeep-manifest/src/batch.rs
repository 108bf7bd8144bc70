//! Artifact batch files.
//!
//! A batch is the JSON hand-off from the upstream generator: one entry per
//! generated artifact, with its content inline or in a sibling file.

use std::{
    path::{Component, Path, PathBuf},
    str::FromStr,
};

use genkeep_core::{ArtifactKind, Namespace};
use serde::Deserialize;

use crate::{Error, Result, SourceContext};

/// A batch of generated artifacts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Batch {
    #[serde(default)]
    pub artifacts: Vec<BatchEntry>,
}

/// One generated artifact.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchEntry {
    /// Output root the artifact belongs to
    pub project: String,
    /// Target namespace, e.g. `com.acme.model.gen`
    pub namespace: Namespace,
    /// File name including extension
    pub file_name: String,
    /// Explicit role; classified from the file name when absent
    #[serde(default)]
    pub kind: Option<ArtifactKind>,
    /// Inline formatted content
    #[serde(default)]
    pub content: Option<String>,
    /// Content file, relative to the batch file
    #[serde(default)]
    pub content_file: Option<PathBuf>,
    /// Declared encoding (`None` means UTF-8)
    #[serde(default)]
    pub encoding: Option<String>,
    /// Whether an existing descriptor may be merged
    #[serde(default)]
    pub mergeable: bool,
    /// Markers of hand-authored regions to keep when merging
    #[serde(default)]
    pub preserve_tags: Vec<String>,
}

impl BatchEntry {
    /// The inline content. Always set on entries of a loaded batch.
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

impl FromStr for Batch {
    type Err = Box<Error>;

    /// Parse a batch whose entries all carry inline content.
    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "batch.json", Path::new("."))
    }
}

impl Batch {
    /// Load a batch file, resolving `content_file` entries next to it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::from_str_with_filename(&content, &path.display().to_string(), base_dir)
    }

    /// Parse a batch with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str, base_dir: &Path) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let mut batch: Batch = serde_json::from_str(content).map_err(|e| ctx.batch_error(e))?;

        for entry in &mut batch.artifacts {
            entry.validate(&ctx)?;
            if let Some(relative) = entry.content_file.take() {
                let full = base_dir.join(&relative);
                let text = std::fs::read_to_string(&full).map_err(|e| {
                    Box::new(Error::Io {
                        path: full.clone(),
                        source: e,
                    })
                })?;
                entry.content = Some(text);
            }
        }

        Ok(batch)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl BatchEntry {
    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        let quoted = format!("\"{}\"", self.file_name);
        if self.project.is_empty() {
            return Err(ctx.validation_error_near(
                format!("artifact '{}' has an empty project", self.file_name),
                &quoted,
            ));
        }
        if !is_relative_below(&self.project) {
            return Err(ctx.validation_error_near(
                format!(
                    "artifact '{}' has project '{}', which leaves the output root",
                    self.file_name, self.project
                ),
                &format!("\"{}\"", self.project),
            ));
        }
        if self.file_name.is_empty() || self.file_name.contains(['/', '\\']) {
            return Err(ctx.validation_error_near(
                format!("invalid file name '{}'", self.file_name),
                &quoted,
            ));
        }
        if self.namespace.depth() == 0 {
            return Err(ctx.validation_error_near(
                format!("artifact '{}' has an empty namespace", self.file_name),
                &quoted,
            ));
        }
        match (&self.content, &self.content_file) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            _ => Err(ctx.validation_error_near(
                format!(
                    "artifact '{}' needs exactly one of 'content' or 'content_file'",
                    self.file_name
                ),
                &quoted,
            )),
        }
    }
}

/// Whether `path` is relative and never steps above its starting point.
fn is_relative_below(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
