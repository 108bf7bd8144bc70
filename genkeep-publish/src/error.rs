//! Error types for publishing runs.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A failure confined to one artifact.
///
/// The publisher records these as warnings and continues with the next
/// artifact of the batch.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("the project directory {} does not exist", path.display())]
    ProjectMissing { path: PathBuf },

    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot merge {}: {message}", path.display())]
    Merge { path: PathBuf, message: String },

    #[error("{referrer} references '{name}', which is not part of this batch")]
    MissingReference { name: String, referrer: String },

    #[error("{file_name} declares unknown encoding '{encoding}'")]
    UnsupportedEncoding { file_name: String, encoding: String },

    #[error("{file_name} has characters that cannot be written as {encoding}")]
    Unmappable { file_name: String, encoding: String },
}

impl ShellError {
    /// Wrap an I/O error on `path`.
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// A failure that stops the whole publishing run.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("no free name for {file_name} in {} after {probes} attempts", directory.display())]
    NameSpaceExhausted {
        directory: PathBuf,
        file_name: String,
        probes: usize,
    },

    #[error("namespace '{namespace}' has too few segments to strip {levels} level(s)")]
    MalformedNamespace { namespace: String, levels: usize },

    #[error("publishing was cancelled")]
    Cancelled,

    #[error(transparent)]
    Shell(#[from] ShellError),
}

impl PublishError {
    /// Whether the run can continue past this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Shell(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_errors_are_recoverable() {
        let err: PublishError = ShellError::MissingReference {
            name: "Order".into(),
            referrer: "OrderMapper.java".into(),
        }
        .into();
        assert!(err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "OrderMapper.java references 'Order', which is not part of this batch"
        );
    }

    #[test]
    fn test_fatal_errors() {
        assert!(!PublishError::Cancelled.is_recoverable());
        let err = PublishError::MalformedNamespace {
            namespace: "gen".into(),
            levels: 2,
        };
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("'gen'"));
    }

    #[test]
    fn test_io_helper() {
        let err = ShellError::io("/out/Order.java")(io::Error::other("disk full"));
        assert_eq!(err.to_string(), "cannot write /out/Order.java: disk full");
    }
}
