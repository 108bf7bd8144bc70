use genkeep_core::{Namespace, lower_first};

use super::{CodeBuilder, Scaffold};

const REPOSITORY: &str = "org.springframework.stereotype.Repository";

/// A persistence interface extending its regenerated base, registered as a
/// repository bean.
#[derive(Debug, Clone)]
pub struct MapperExtension<'a> {
    pub namespace: &'a Namespace,
    pub base_namespace: &'a Namespace,
    pub name: &'a str,
    pub base_name: &'a str,
    pub extension: &'a str,
}

impl MapperExtension<'_> {
    fn imports(&self) -> Vec<String> {
        let mut imports = Vec::new();
        if self.namespace != self.base_namespace {
            imports.push(self.base_namespace.qualify(self.base_name));
        }
        imports.push(REPOSITORY.to_string());
        imports
    }
}

impl Scaffold for MapperExtension<'_> {
    fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }

    fn render(&self) -> String {
        CodeBuilder::java()
            .line(&format!("package {};", self.namespace))
            .blank()
            .each(self.imports(), |b, import| b.line(&format!("import {import};")))
            .blank()
            .line(&format!("@Repository(\"{}\")", lower_first(self.name)))
            .block_with_close(
                &format!(
                    "public interface {} extends {} {{",
                    self.name, self.base_name
                ),
                "}",
                |b| b,
            )
            .build()
    }
}
