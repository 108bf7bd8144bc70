//! Code builder utility for scaffolding properly indented files.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// # Example
///
/// ```
/// use genkeep_publish::scaffold::CodeBuilder;
///
/// let code = CodeBuilder::java()
///     .block_with_close("public class Order {", "}", |b| {
///         b.line("private Long id;")
///     })
///     .build();
///
/// assert_eq!(code, "public class Order {\n\tprivate Long id;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with tab indentation.
    pub fn java() -> Self {
        Self::new(Indent::JAVA)
    }

    /// Create a new CodeBuilder with 2-space indentation.
    pub fn xml() -> Self {
        Self::new(Indent::XML)
    }

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a block with a closing line.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.indent.push_to(&mut self.buffer);
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::java()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let code = CodeBuilder::java()
            .line("class A {")
            .indent()
            .line("int x;")
            .dedent()
            .line("}")
            .build();

        assert_eq!(code, "class A {\n\tint x;\n}\n");
    }

    #[test]
    fn test_xml_indent() {
        let code = CodeBuilder::xml()
            .block_with_close("<mapper>", "</mapper>", |b| b.line("<select/>"))
            .build();

        assert_eq!(code, "<mapper>\n  <select/>\n</mapper>\n");
    }

    #[test]
    fn test_conditional() {
        let with_import = CodeBuilder::java()
            .when(true, |b| b.line("import a.B;"))
            .line("class C {}")
            .build();
        let without_import = CodeBuilder::java()
            .when(false, |b| b.line("import a.B;"))
            .line("class C {}")
            .build();

        assert_eq!(with_import, "import a.B;\nclass C {}\n");
        assert_eq!(without_import, "class C {}\n");
    }

    #[test]
    fn test_each() {
        let code = CodeBuilder::java()
            .each(["a.B", "c.D"], |b, import| b.line(&format!("import {import};")))
            .build();

        assert_eq!(code, "import a.B;\nimport c.D;\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let code = CodeBuilder::java().dedent().line("x").build();
        assert_eq!(code, "x\n");
    }
}
