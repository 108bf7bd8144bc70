//! Indentation configuration for scaffolds.

/// Indentation style for scaffolded code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// Tab indentation (Java sources).
    pub const JAVA: Self = Self::Tab;

    /// 2-space indentation (XML descriptors).
    pub const XML: Self = Self::Spaces(2);

    /// Append one indent level to `buffer`.
    pub fn push_to(&self, buffer: &mut String) {
        match *self {
            Self::Spaces(width) => buffer.extend(std::iter::repeat_n(' ', usize::from(width))),
            Self::Tab => buffer.push('\t'),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::JAVA
    }
}
