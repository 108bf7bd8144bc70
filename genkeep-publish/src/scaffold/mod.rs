//! Extension scaffolds.
//!
//! Scaffolds are the user-owned halves of a split: a subclass of a
//! regenerated model, an interface extending a regenerated persistence
//! interface, a service facade and an empty descriptor. Each one is written
//! only when its file does not exist yet.

mod code_builder;
mod descriptor;
mod indent;
mod mapper;
mod model;
mod service;

use std::path::Path;

pub use code_builder::CodeBuilder;
pub use descriptor::DescriptorExtension;
pub use indent::Indent;
pub use mapper::MapperExtension;
pub use model::ModelExtension;
pub use service::ServiceFacade;

use crate::PlannedWrite;

/// A file created once and owned by the user afterwards.
pub trait Scaffold {
    /// File name, including extension.
    fn file_name(&self) -> String;

    /// Render the file content.
    fn render(&self) -> String;

    /// Plan the scaffold as an extension write in `directory`.
    fn planned(&self, directory: &Path) -> PlannedWrite {
        PlannedWrite::extension(directory.join(self.file_name()), self.render())
    }
}
