//! Core utilities and types for the genkeep artifact publisher.
//!
//! This crate provides the fundamental types shared by the configuration,
//! publishing, and command-line crates.

mod file;
mod kind;
mod namespace;
mod utils;

// File operations
pub use file::{DiskStore, FileStore, MemoryStore, Overwrite, WriteResult};
// Fundamental types
pub use kind::{ArtifactKind, EXAMPLE_SUFFIX, MAPPER_SUFFIX};
pub use namespace::Namespace;
// String utilities
pub use utils::{is_ident_char, lower_first, strip_extension, strip_role_suffix};
