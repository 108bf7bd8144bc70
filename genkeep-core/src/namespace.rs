//! Segmented target namespaces (packages or directory-like paths).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const SEPARATORS: [char; 3] = ['.', '/', '\\'];

/// A target namespace such as `com.acme.model.gen` or `mappers/gen`.
///
/// Segments may be separated by `.`, `/` or `\`; the original separators
/// are kept when deriving parents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self(namespace.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATORS).filter(|s| !s.is_empty())
    }

    /// Number of non-empty segments.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Strip the trailing `levels` segments.
    ///
    /// Returns `None` unless at least one segment remains.
    pub fn parent(&self, levels: usize) -> Option<Namespace> {
        if levels == 0 {
            return Some(self.clone());
        }
        if self.depth() <= levels {
            return None;
        }

        let trimmed = self.0.trim_end_matches(SEPARATORS);
        let mut end = trimmed.len();
        for _ in 0..levels {
            let cut = trimmed[..end].rfind(SEPARATORS)?;
            end = trimmed[..cut].trim_end_matches(SEPARATORS).len();
        }
        Some(Self(trimmed[..end].to_string()))
    }

    /// Append a leaf segment using this namespace's separator style.
    pub fn child(&self, leaf: &str) -> Namespace {
        if self.0.is_empty() {
            return Self(leaf.to_string());
        }
        let separator = self.0.chars().find(|c| SEPARATORS.contains(c)).unwrap_or('.');
        Self(format!("{}{}{}", self.0, separator, leaf))
    }

    /// Qualify a simple name with this namespace (`<ns>.<name>`).
    pub fn qualify(&self, name: &str) -> String {
        if self.0.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.0, name)
        }
    }

    /// Relative directory path of this namespace.
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Namespace {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Namespace {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
