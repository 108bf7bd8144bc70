//! `genkeep.toml` configuration.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{Error, Result, SourceContext};

/// Root of `genkeep.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where and how files are written
    pub output: OutputConfig,
    /// Namespace layout of base and extension files
    pub layout: Layout,
}

/// `[output]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory that target projects are resolved against
    pub root: PathBuf,
    /// Overwrite existing files instead of saving under a unique name
    pub overwrite: bool,
    /// Split sources into a regenerated base and a generate-once extension
    pub split: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            overwrite: false,
            split: true,
        }
    }
}

/// `[layout]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Namespace levels stripped from a generated namespace to find the parent
    pub depth: usize,
    /// Leaf of the namespace holding model extensions
    pub model: String,
    /// Leaf of the namespace holding persistence-interface extensions
    pub persistence: String,
    /// Leaf of the namespace holding service facades
    pub service: String,
    /// Suffix appended to regenerated base type names
    pub base_suffix: String,
    /// File extension of source artifacts, without the dot
    pub source_extension: String,
    /// File extension of descriptor artifacts, without the dot
    pub descriptor_extension: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            depth: 2,
            model: "model".to_string(),
            persistence: "persistence".to_string(),
            service: "service".to_string(),
            base_suffix: "Base".to_string(),
            source_extension: "java".to_string(),
            descriptor_extension: "xml".to_string(),
        }
    }
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "genkeep.toml")
    }
}

impl Config {
    /// Parse a genkeep.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Load the configuration at `path`, or the defaults if the file is absent.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse a genkeep.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let config: Config = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        config.layout.validate(&ctx)?;
        Ok(config)
    }
}

impl Layout {
    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        if self.depth == 0 {
            return Err(ctx.validation_error_near("depth must be at least 1", "depth"));
        }

        let leaves = [
            ("model", &self.model),
            ("persistence", &self.persistence),
            ("service", &self.service),
            ("base_suffix", &self.base_suffix),
        ];
        for (key, value) in leaves {
            if !is_identifier(value) {
                return Err(ctx.validation_error_near(
                    format!("{key} must be a non-empty identifier, got '{value}'"),
                    key,
                ));
            }
        }

        let extensions = [
            ("source_extension", &self.source_extension),
            ("descriptor_extension", &self.descriptor_extension),
        ];
        for (key, value) in extensions {
            if value.is_empty() || value.starts_with('.') {
                return Err(ctx.validation_error_near(
                    format!("{key} must be non-empty and have no leading dot"),
                    key,
                ));
            }
        }
        if self.source_extension == self.descriptor_extension {
            return Err(ctx.validation_error(
                "source_extension and descriptor_extension must differ",
            ));
        }

        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
