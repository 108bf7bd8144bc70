use genkeep_core::Namespace;

use super::{CodeBuilder, Scaffold};

/// `public class Order extends OrderBase {}`
#[derive(Debug, Clone)]
pub struct ModelExtension<'a> {
    /// Namespace the extension is declared in
    pub namespace: &'a Namespace,
    /// Namespace of the regenerated base
    pub base_namespace: &'a Namespace,
    pub name: &'a str,
    pub base_name: &'a str,
    /// Source file extension, without the dot
    pub extension: &'a str,
}

impl Scaffold for ModelExtension<'_> {
    fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }

    fn render(&self) -> String {
        CodeBuilder::java()
            .line(&format!("package {};", self.namespace))
            .blank()
            .when(self.namespace != self.base_namespace, |b| {
                b.line(&format!(
                    "import {};",
                    self.base_namespace.qualify(self.base_name)
                ))
                .blank()
            })
            .block_with_close(
                &format!("public class {} extends {} {{", self.name, self.base_name),
                "}",
                |b| b,
            )
            .build()
    }
}
