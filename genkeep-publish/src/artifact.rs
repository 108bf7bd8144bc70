//! Generated artifacts handed to the publisher.

use encoding_rs::{Encoding, UTF_8};
use genkeep_core::{ArtifactKind, Namespace, strip_extension};
use genkeep_manifest::{BatchEntry, Layout};

use crate::ShellError;

/// One generated source or descriptor.
///
/// Artifacts are immutable once built; the publisher derives base and
/// extension content from them without touching the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    target_project: String,
    target_namespace: Namespace,
    file_name: String,
    content: String,
    encoding: Option<String>,
    kind: ArtifactKind,
    mergeable: bool,
    preserve_tags: Vec<String>,
}

impl Artifact {
    pub fn new(
        target_project: impl Into<String>,
        target_namespace: impl Into<Namespace>,
        file_name: impl Into<String>,
        content: impl Into<String>,
        kind: ArtifactKind,
    ) -> Self {
        Self {
            target_project: target_project.into(),
            target_namespace: target_namespace.into(),
            file_name: file_name.into(),
            content: content.into(),
            encoding: None,
            kind,
            mergeable: false,
            preserve_tags: Vec::new(),
        }
    }

    /// Build an artifact whose kind is classified from its file name.
    pub fn classified(
        target_project: impl Into<String>,
        target_namespace: impl Into<Namespace>,
        file_name: impl Into<String>,
        content: impl Into<String>,
        layout: &Layout,
    ) -> Self {
        let file_name = file_name.into();
        let kind = ArtifactKind::classify(&file_name, &layout.descriptor_extension);
        Self::new(target_project, target_namespace, file_name, content, kind)
    }

    /// Build an artifact from a loaded batch entry.
    pub fn from_entry(entry: BatchEntry, layout: &Layout) -> Self {
        let kind = entry
            .kind
            .unwrap_or_else(|| ArtifactKind::classify(&entry.file_name, &layout.descriptor_extension));
        Self {
            target_project: entry.project,
            target_namespace: entry.namespace,
            file_name: entry.file_name,
            content: entry.content.unwrap_or_default(),
            encoding: entry.encoding,
            kind,
            mergeable: entry.mergeable,
            preserve_tags: entry.preserve_tags,
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Allow merging into an existing descriptor, keeping regions marked
    /// with any of `preserve_tags`.
    pub fn mergeable<I, S>(mut self, preserve_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mergeable = true;
        self.preserve_tags = preserve_tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn target_project(&self) -> &str {
        &self.target_project
    }

    pub fn target_namespace(&self) -> &Namespace {
        &self.target_namespace
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn is_mergeable(&self) -> bool {
        self.mergeable
    }

    pub fn preserve_tags(&self) -> &[String] {
        &self.preserve_tags
    }

    /// File name without its extension, e.g. `OrderMapper`.
    pub fn logical_name(&self) -> &str {
        strip_extension(&self.file_name)
    }

    /// Charset the artifact's files are written in; UTF-8 unless declared.
    ///
    /// Labels are resolved as WHATWG encoding labels (`GBK`, `Shift_JIS`,
    /// `ISO-8859-1`, ...). Unknown labels and charsets that can only be
    /// decoded, such as UTF-16, are rejected.
    pub fn charset(&self) -> Result<&'static Encoding, ShellError> {
        let Some(label) = self.encoding.as_deref() else {
            return Ok(UTF_8);
        };
        match Encoding::for_label(label.as_bytes()) {
            Some(charset) if charset.output_encoding() == charset => Ok(charset),
            _ => Err(ShellError::UnsupportedEncoding {
                file_name: self.file_name.clone(),
                encoding: label.to_string(),
            }),
        }
    }

    /// Encode `text` for writing in [`charset`](Self::charset).
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, ShellError> {
        let charset = self.charset()?;
        let (bytes, _, unmappable) = charset.encode(text);
        if unmappable {
            return Err(ShellError::Unmappable {
                file_name: self.file_name.clone(),
                encoding: charset.name().to_string(),
            });
        }
        Ok(bytes.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use genkeep_manifest::Batch;

    use super::*;

    #[test]
    fn test_classified_kinds() {
        let layout = Layout::default();
        let model = Artifact::classified("app", "a.b.gen", "Order.java", "", &layout);
        let mapper = Artifact::classified("app", "a.b.gen", "OrderMapper.java", "", &layout);
        let xml = Artifact::classified("res", "a.b.gen", "OrderMapper.xml", "", &layout);
        assert_eq!(model.kind(), ArtifactKind::Model);
        assert_eq!(mapper.kind(), ArtifactKind::Mapper);
        assert_eq!(xml.kind(), ArtifactKind::Descriptor);
        assert_eq!(xml.logical_name(), "OrderMapper");
    }

    #[test]
    fn test_from_entry_keeps_explicit_kind() {
        let batch = Batch::from_str(
            r#"{"artifacts": [{"project": "app", "namespace": "a.b.gen",
                "file_name": "Audit.java", "kind": "example", "content": "x",
                "mergeable": true, "preserve_tags": ["@keep"]}]}"#,
        )
        .unwrap();
        let entry = batch.artifacts.into_iter().next().unwrap();

        let artifact = Artifact::from_entry(entry, &Layout::default());

        assert_eq!(artifact.kind(), ArtifactKind::Example);
        assert!(artifact.is_mergeable());
        assert_eq!(artifact.preserve_tags(), ["@keep".to_string()]);
        assert_eq!(artifact.content(), "x");
    }

    #[test]
    fn test_charset_resolution() {
        let artifact = Artifact::new("app", "a.b", "A.java", "", ArtifactKind::Model);
        assert_eq!(artifact.charset().unwrap(), UTF_8);
        assert_eq!(
            artifact.clone().with_encoding("gbk").charset().unwrap(),
            encoding_rs::GBK
        );
        assert_eq!(
            artifact.clone().with_encoding(" Shift_JIS ").charset().unwrap(),
            encoding_rs::SHIFT_JIS
        );

        let unknown = artifact.clone().with_encoding("EBCDIC-42").charset().unwrap_err();
        assert!(matches!(unknown, ShellError::UnsupportedEncoding { .. }));
        let decode_only = artifact.with_encoding("UTF-16LE").charset().unwrap_err();
        assert!(matches!(decode_only, ShellError::UnsupportedEncoding { .. }));
    }

    #[test]
    fn test_encode_in_declared_charset() {
        let artifact =
            Artifact::new("app", "a.b", "A.java", "", ArtifactKind::Model).with_encoding("ISO-8859-1");

        assert_eq!(artifact.encode("// café").unwrap(), b"// caf\xE9");

        let err = artifact.encode("// 订单").unwrap_err();
        assert!(matches!(err, ShellError::Unmappable { .. }));
    }
}
