//! Planned file writes.

use std::path::PathBuf;

use genkeep_core::Overwrite;
use serde::Serialize;

/// How a planned write treats an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteRole {
    /// Machine-owned; always overwritten.
    Base,
    /// User-owned; created only if absent, never touched afterwards.
    Extension,
    /// Unsplit output; goes through conflict resolution.
    Candidate,
}

impl WriteRole {
    /// Write rule once the final path is known. Candidates are resolved to
    /// a path that may be replaced.
    pub fn overwrite(&self) -> Overwrite {
        match self {
            Self::Extension => Overwrite::IfMissing,
            Self::Base | Self::Candidate => Overwrite::Always,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Extension => "extension",
            Self::Candidate => "candidate",
        }
    }
}

impl std::fmt::Display for WriteRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file the publisher intends to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedWrite {
    pub path: PathBuf,
    pub content: String,
    pub role: WriteRole,
}

impl PlannedWrite {
    pub fn base(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, WriteRole::Base)
    }

    pub fn extension(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, WriteRole::Extension)
    }

    pub fn candidate(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, WriteRole::Candidate)
    }

    fn new(path: impl Into<PathBuf>, content: impl Into<String>, role: WriteRole) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            role,
        }
    }
}
