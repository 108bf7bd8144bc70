//! Regeneration-safe publishing of generated artifacts.
//!
//! Given a batch of generated sources and descriptors, the [`Publisher`]
//! decides per artifact whether to write it fresh, merge it, overwrite it,
//! or save it under a unique name, and splits models and persistence
//! interfaces into a regenerated base plus a user-owned extension that is
//! created exactly once.
//!
//! # Module Organization
//!
//! - [`artifact`] / [`registry`] - Artifacts of one run and their lookup
//! - [`paths`] - Namespace arithmetic and unique-name probing
//! - [`conflict`] - Fresh / merge / overwrite / rename decisions
//! - [`split`] - The generate-once extension pattern
//! - [`rewrite`] - Boundary-safe reference rewriting
//! - [`scaffold`] - Extension scaffolds written once
//! - [`publisher`] - The per-run orchestrator

pub mod artifact;
pub mod conflict;
mod diagnostic;
mod error;
pub mod paths;
mod plan;
mod progress;
pub mod publisher;
pub mod registry;
pub mod rewrite;
pub mod scaffold;
mod shell;
pub mod split;

#[cfg(test)]
mod testing;

pub use artifact::Artifact;
pub use conflict::{ConflictResolver, Disposition};
pub use diagnostic::{Diagnostic, Severity};
pub use error::{PublishError, ShellError};
pub use paths::PathResolver;
pub use plan::{PlannedWrite, WriteRole};
pub use progress::{CancelFlag, NullProgress, ProgressCallback};
pub use publisher::{Preview, PublishReport, Publisher};
pub use registry::ArtifactRegistry;
pub use rewrite::ReferenceRewriter;
pub use shell::{DefaultShell, DescriptorMerger, ShellCallback};
pub use split::SplitPublisher;
