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
pub struct PublishCommand {
    /// Path to genkeep.toml (defaults to ./genkeep.toml)
    #[arg(short, long, default_value = "genkeep.toml")]
    pub config: PathBuf,

    /// Artifact batch written by the generator
    #[arg(short, long)]
    pub batch: PathBuf,

    /// Overwrite existing unsplit files instead of saving them under a new name
    #[arg(long)]
    pub overwrite: bool,

    /// Publish every artifact as generated, without base/extension split
    #[arg(long)]
    pub no_split: bool,

    /// Preview planned writes without touching the disk
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl PublishCommand {
    pub fn run(&self) -> Result<()> {
        let mut config = Config::from_file_or_default(&self.config).unwrap_or_exit();
        if self.overwrite {
            config.output.overwrite = true;
        }
        if self.no_split {
            config.output.split = false;
        }
        let batch = Batch::from_file(&self.batch).unwrap_or_exit();

        let report = ops::publish(
            &config,
            batch,
            ops::publish::PublishOptions {
                batch_path: &self.batch,
                dry_run: self.dry_run,
            },
        )?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
