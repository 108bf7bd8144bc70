//! Namespace arithmetic and unique-name probing.

use std::path::{Path, PathBuf};

use genkeep_core::{FileStore, Namespace};
use genkeep_manifest::Layout;

use crate::PublishError;

/// Upper bound (exclusive) of numeric suffixes tried by [`unique_name`].
pub const MAX_UNIQUE_PROBES: usize = 1000;

/// Derives base and extension namespaces from a [`Layout`].
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    layout: Layout,
}

impl PathResolver {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Strip `levels` trailing segments from `namespace`.
    pub fn parent_namespace(
        &self,
        namespace: &Namespace,
        levels: usize,
    ) -> Result<Namespace, PublishError> {
        namespace
            .parent(levels)
            .ok_or_else(|| PublishError::MalformedNamespace {
                namespace: namespace.to_string(),
                levels,
            })
    }

    /// The namespace `leaf` next to the generated namespace's parent.
    pub fn sibling_namespace(&self, parent: &Namespace, leaf: &str) -> Namespace {
        parent.child(leaf)
    }

    /// Parent of a generated namespace at the configured depth.
    pub fn generated_parent(&self, namespace: &Namespace) -> Result<Namespace, PublishError> {
        self.parent_namespace(namespace, self.layout.depth)
    }

    /// Where model extensions of `namespace` live.
    pub fn model_namespace(&self, namespace: &Namespace) -> Result<Namespace, PublishError> {
        let parent = self.generated_parent(namespace)?;
        Ok(self.sibling_namespace(&parent, &self.layout.model))
    }

    /// Where persistence-interface extensions of `namespace` live.
    pub fn persistence_namespace(&self, namespace: &Namespace) -> Result<Namespace, PublishError> {
        let parent = self.generated_parent(namespace)?;
        Ok(self.sibling_namespace(&parent, &self.layout.persistence))
    }

    /// Where service facades of `namespace` live.
    pub fn service_namespace(&self, namespace: &Namespace) -> Result<Namespace, PublishError> {
        let parent = self.generated_parent(namespace)?;
        Ok(self.sibling_namespace(&parent, &self.layout.service))
    }

    /// `<name><base_suffix>`
    pub fn base_name(&self, name: &str) -> String {
        format!("{name}{}", self.layout.base_suffix)
    }

    pub fn source_file(&self, name: &str) -> String {
        format!("{name}.{}", self.layout.source_extension)
    }

    pub fn descriptor_file(&self, name: &str) -> String {
        format!("{name}.{}", self.layout.descriptor_extension)
    }
}

/// Find a free `file_name.N` in `directory`, for N counting up from 1.
///
/// Exhausting every suffix below [`MAX_UNIQUE_PROBES`] is fatal.
pub fn unique_name(
    directory: &Path,
    file_name: &str,
    store: &dyn FileStore,
) -> Result<PathBuf, PublishError> {
    (1..MAX_UNIQUE_PROBES)
        .map(|i| directory.join(format!("{file_name}.{i}")))
        .find(|candidate| !store.exists(candidate))
        .ok_or_else(|| PublishError::NameSpaceExhausted {
            directory: directory.to_path_buf(),
            file_name: file_name.to_string(),
            probes: MAX_UNIQUE_PROBES - 1,
        })
}
