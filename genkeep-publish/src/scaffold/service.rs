use genkeep_core::{Namespace, lower_first};

use super::{CodeBuilder, Scaffold};

const AUTOWIRED: &str = "org.springframework.beans.factory.annotation.Autowired";
const SERVICE: &str = "org.springframework.stereotype.Service";

/// A service class with the persistence interface injected.
#[derive(Debug, Clone)]
pub struct ServiceFacade<'a> {
    pub namespace: &'a Namespace,
    /// Namespace of the injected persistence interface
    pub mapper_namespace: &'a Namespace,
    /// Model name, e.g. `Order`; the service is `OrderService`
    pub model: &'a str,
    pub mapper: &'a str,
    pub extension: &'a str,
}

impl ServiceFacade<'_> {
    pub fn name(&self) -> String {
        format!("{}Service", self.model)
    }
}

impl Scaffold for ServiceFacade<'_> {
    fn file_name(&self) -> String {
        format!("{}.{}", self.name(), self.extension)
    }

    fn render(&self) -> String {
        let name = self.name();
        let mapper_import = self.mapper_namespace.qualify(self.mapper);

        CodeBuilder::java()
            .line(&format!("package {};", self.namespace))
            .blank()
            .when(self.namespace != self.mapper_namespace, |b| {
                b.line(&format!("import {mapper_import};"))
            })
            .line(&format!("import {AUTOWIRED};"))
            .line(&format!("import {SERVICE};"))
            .blank()
            .line(&format!("@Service(\"{}\")", lower_first(&name)))
            .block_with_close(&format!("public class {name} {{"), "}", |b| {
                b.line("@Autowired").line(&format!(
                    "private {} {};",
                    self.mapper,
                    lower_first(self.mapper)
                ))
            })
            .build()
    }
}
