use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use genkeep_manifest::{Batch, Config};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to genkeep.toml (defaults to ./genkeep.toml)
    #[arg(short, long, default_value = "genkeep.toml")]
    pub config: PathBuf,

    /// Artifact batch to validate
    #[arg(short, long)]
    pub batch: Option<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config_found = self.config.exists();
        let config = Config::from_file_or_default(&self.config).unwrap_or_exit();
        let batch = self
            .batch
            .as_deref()
            .map(|path| (path, Batch::from_file(path).unwrap_or_exit()));

        let report = ops::check(&config, &self.config, config_found, batch);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
