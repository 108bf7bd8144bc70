//! Publish operation - writes a batch through the publisher.

use std::path::Path;

use eyre::{Context, Result};
use genkeep_core::DiskStore;
use genkeep_manifest::{Batch, Config};
use genkeep_publish::Publisher;
use tracing::info;

use crate::reports::{PublishOutcome, PublishSummary};

/// Options for the publish operation.
pub struct PublishOptions<'a> {
    /// Batch file the artifacts were loaded from.
    pub batch_path: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the publish operation.
pub fn publish(config: &Config, batch: Batch, opts: PublishOptions) -> Result<PublishSummary> {
    let artifacts = super::artifacts(batch, &config.layout);
    info!(
        batch = %opts.batch_path.display(),
        root = %config.output.root.display(),
        dry_run = opts.dry_run,
        "loaded batch"
    );
    let publisher = Publisher::from_config(config, DiskStore::new());

    let outcome = if opts.dry_run {
        let preview = publisher
            .preview(artifacts)
            .wrap_err("Failed to plan batch")?;
        PublishOutcome::Preview(preview)
    } else {
        let report = publisher
            .publish(artifacts)
            .wrap_err("Failed to publish batch")?;
        PublishOutcome::Published(report)
    };

    Ok(PublishSummary {
        batch_path: opts.batch_path.to_path_buf(),
        root: config.output.root.clone(),
        outcome,
    })
}
