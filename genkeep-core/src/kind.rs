//! Artifact kinds produced by the upstream generator.

use serde::{Deserialize, Serialize};

use crate::utils::strip_extension;

/// Suffix of persistence-interface file stems.
pub const MAPPER_SUFFIX: &str = "Mapper";

/// Suffix of criteria-class file stems.
pub const EXAMPLE_SUFFIX: &str = "Example";

/// The role an artifact plays in a publishing run.
///
/// Ordering matters: sources sort before descriptors, so descriptors can
/// resolve the final namespaces of the sources they reference.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Plain domain class. Split into a base and an extension subclass.
    Model,
    /// Persistence interface. Split into a base, an extension interface and
    /// a service facade.
    Mapper,
    /// Criteria class. Never split.
    Example,
    /// Structured markup mapping a persistence interface to statements.
    Descriptor,
}

impl ArtifactKind {
    /// Classify a file by its name.
    ///
    /// Files ending in `.<descriptor_extension>` are descriptors; other
    /// files are sources, classified by their stem's role suffix.
    pub fn classify(file_name: &str, descriptor_extension: &str) -> Self {
        let is_descriptor = file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext == descriptor_extension);
        if is_descriptor {
            return Self::Descriptor;
        }

        let stem = strip_extension(file_name);
        if stem.ends_with(MAPPER_SUFFIX) && stem != MAPPER_SUFFIX {
            Self::Mapper
        } else if stem.ends_with(EXAMPLE_SUFFIX) && stem != EXAMPLE_SUFFIX {
            Self::Example
        } else {
            Self::Model
        }
    }

    /// Whether this kind is a source artifact.
    pub fn is_source(&self) -> bool {
        !matches!(self, Self::Descriptor)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Mapper => "mapper",
            Self::Example => "example",
            Self::Descriptor => "descriptor",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
