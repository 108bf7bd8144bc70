//! Check command report data structures.

use std::path::PathBuf;

use genkeep_core::ArtifactKind;
use genkeep_manifest::Layout;
use genkeep_publish::Artifact;

use super::output::{Output, Report};

/// Report data from configuration and batch validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// The effective layout.
    pub layout: Layout,
    /// Path to the batch file, if one was checked.
    pub batch_path: Option<PathBuf>,
    /// The artifacts of the batch.
    pub artifacts: Vec<ArtifactLine>,
    /// Number of writes a run would perform.
    pub planned_writes: usize,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
}

/// One artifact as listed by `check`.
#[derive(Debug, Clone)]
pub struct ArtifactLine {
    pub file_name: String,
    pub kind: ArtifactKind,
    pub project: String,
    pub namespace: String,
}

impl From<&Artifact> for ArtifactLine {
    fn from(artifact: &Artifact) -> Self {
        Self {
            file_name: artifact.file_name().to_string(),
            kind: artifact.kind(),
            project: artifact.target_project().to_string(),
            namespace: artifact.target_namespace().to_string(),
        }
    }
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        let checked = match &self.batch_path {
            Some(batch) => format!(
                "{} and {}",
                self.config_path.display(),
                batch.display()
            ),
            None => self.config_path.display().to_string(),
        };
        out.preformatted(&format!("✓ {} valid", checked));
        out.newline();

        let layout = &self.layout;
        out.section("Layout");
        out.key_value("  depth", &layout.depth.to_string());
        out.key_value(
            "  extensions",
            &format!(
                "<parent>.{}, <parent>.{}, <parent>.{}",
                layout.model, layout.persistence, layout.service
            ),
        );
        out.key_value("  base suffix", &layout.base_suffix);

        if self.batch_path.is_some() {
            out.newline();
            out.section(&format!(
                "Artifacts ({}, {} planned writes)",
                self.artifacts.len(),
                self.planned_writes
            ));
            for artifact in &self.artifacts {
                out.list_item(&format!(
                    "{} [{}] {}:{}",
                    artifact.file_name, artifact.kind, artifact.project, artifact.namespace
                ));
            }
        }
    }
}
