// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Configuration (`genkeep.toml`) and artifact batch parsing.

mod batch;
mod config;
mod error;

pub use batch::{Batch, BatchEntry};
pub use config::{Config, Layout, OutputConfig};
pub use error::{Error, Result, SourceContext};
