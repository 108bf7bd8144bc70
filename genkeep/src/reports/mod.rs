//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod output;
mod publish;

pub use check::{ArtifactLine, CheckReport};
pub use output::{Report, TerminalOutput};
pub use publish::{PublishOutcome, PublishSummary};
