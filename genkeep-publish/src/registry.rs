//! Per-run artifact registry.
//!
//! The registry holds every artifact of one publishing run so that
//! persistence interfaces and descriptors can look up the models they
//! reference. It is created fresh for each run and never shared between
//! runs.

use genkeep_core::ArtifactKind;

use crate::Artifact;

/// The artifacts of a single publishing run, in batch order.
#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    artifacts: Vec<Artifact>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, artifact: Artifact) {
        self.artifacts.push(artifact);
    }

    pub fn register_all(&mut self, artifacts: impl IntoIterator<Item = Artifact>) {
        self.artifacts.extend(artifacts);
    }

    /// Find the first artifact whose logical name is exactly `name`.
    pub fn find_by_logical_name(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.logical_name() == name)
    }

    /// Find the first artifact of `kind` whose logical name is exactly `name`.
    pub fn find(&self, name: &str, kind: ArtifactKind) -> Option<&Artifact> {
        self.artifacts
            .iter()
            .find(|a| a.kind() == kind && a.logical_name() == name)
    }

    /// Artifacts in publishing order: every source before any descriptor,
    /// batch order otherwise.
    pub fn in_write_order(&self) -> Vec<&Artifact> {
        let mut ordered: Vec<_> = self.artifacts.iter().collect();
        ordered.sort_by_key(|a| !a.kind().is_source());
        ordered
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn clear(&mut self) {
        self.artifacts.clear();
    }
}
