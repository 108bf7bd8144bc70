//! Core operations.
//!
//! This module contains the logic behind genkeep commands, separated from
//! CLI argument parsing and output rendering.

pub mod check;
pub mod publish;

pub use check::check;
use genkeep_manifest::{Batch, Layout};
use genkeep_publish::Artifact;
pub use publish::publish;

/// Turn loaded batch entries into artifacts, classifying missing kinds.
fn artifacts(batch: Batch, layout: &Layout) -> Vec<Artifact> {
    batch
        .artifacts
        .into_iter()
        .map(|entry| Artifact::from_entry(entry, layout))
        .collect()
}
