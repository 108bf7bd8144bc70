mod check;
mod completions;
mod publish;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use publish::PublishCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for genkeep_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "genkeep")]
#[command(version)]
#[command(about = "Publish generated persistence code without clobbering hand edits")]
pub(crate) struct Cli {
    /// Log publishing steps (GENKEEP_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Publish(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a batch of generated artifacts
    Publish(PublishCommand),

    /// Validate genkeep.toml and a batch without writing anything
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_publish_flags() {
        let cli = Cli::try_parse_from([
            "genkeep", "publish", "-b", "batch.json", "--overwrite", "--dry-run", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Publish(cmd) = cli.command else {
            panic!("expected publish");
        };
        assert_eq!(cmd.batch.to_str(), Some("batch.json"));
        assert_eq!(cmd.config.to_str(), Some("genkeep.toml"));
        assert!(cmd.overwrite);
        assert!(cmd.dry_run);
        assert!(!cmd.no_split);
    }

    #[test]
    fn test_publish_requires_batch() {
        assert!(Cli::try_parse_from(["genkeep", "publish"]).is_err());
    }
}
