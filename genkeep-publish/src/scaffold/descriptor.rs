use super::{CodeBuilder, Scaffold};

const DOCTYPE: &str = "<!DOCTYPE mapper PUBLIC \"-//mybatis.org//DTD Mapper 3.0//EN\" \
                       \"http://mybatis.org/dtd/mybatis-3-mapper.dtd\" >";

/// An empty mapping descriptor bound to the extension interface.
#[derive(Debug, Clone)]
pub struct DescriptorExtension<'a> {
    /// Simple name of the persistence interface, e.g. `OrderMapper`
    pub name: &'a str,
    /// Fully qualified persistence interface the descriptor maps
    pub mapper_type: &'a str,
    pub extension: &'a str,
    /// Charset named in the XML declaration
    pub encoding: &'a str,
}

impl Scaffold for DescriptorExtension<'_> {
    fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }

    fn render(&self) -> String {
        CodeBuilder::xml()
            .line(&format!("<?xml version=\"1.0\" encoding=\"{}\" ?>", self.encoding))
            .line(DOCTYPE)
            .line(&format!("<mapper namespace=\"{}\" >", self.mapper_type))
            .blank()
            .line("</mapper>")
            .build()
    }
}
