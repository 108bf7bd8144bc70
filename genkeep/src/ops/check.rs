//! Check operation - configuration and batch validation.

use std::path::Path;

use genkeep_core::DiskStore;
use genkeep_manifest::{Batch, Config};
use genkeep_publish::{Diagnostic, Publisher};

use crate::reports::{ArtifactLine, CheckReport};

/// Execute the check operation.
///
/// Plans the batch, if one is given, against the files already on disk and
/// collects the diagnostics a real run would raise. Nothing is written.
pub fn check(
    config: &Config,
    config_path: &Path,
    config_found: bool,
    batch: Option<(&Path, Batch)>,
) -> CheckReport {
    let mut report = CheckReport {
        config_path: config_path.to_path_buf(),
        layout: config.layout.clone(),
        batch_path: None,
        artifacts: Vec::new(),
        planned_writes: 0,
        errors: Vec::new(),
        warnings: Vec::new(),
        infos: Vec::new(),
    };
    if !config_found {
        report.infos.push(format!(
            "{} not found, using defaults",
            config_path.display()
        ));
    }

    let Some((batch_path, batch)) = batch else {
        return report;
    };
    report.batch_path = Some(batch_path.to_path_buf());

    let artifacts = super::artifacts(batch, &config.layout);
    report.artifacts = artifacts.iter().map(ArtifactLine::from).collect();

    let publisher = Publisher::from_config(config, DiskStore::new());
    match publisher.preview(artifacts) {
        Ok(preview) => {
            report.planned_writes = preview.writes.len();
            for diag in &preview.diagnostics {
                let msg = message(diag);
                if diag.severity.is_warning() {
                    report.warnings.push(msg);
                } else {
                    report.infos.push(msg);
                }
            }
        }
        Err(err) => report.errors.push(err.to_string()),
    }

    report
}

fn message(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use genkeep_core::ArtifactKind;

    use super::*;

    #[test]
    fn test_check_without_batch() {
        let report = check(&Config::default(), Path::new("genkeep.toml"), false, None);

        assert!(report.is_valid());
        assert!(report.artifacts.is_empty());
        assert_eq!(report.infos.len(), 1);
    }

    #[test]
    fn test_check_reports_classified_kinds_and_warnings() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.output.root = temp.path().to_path_buf();
        let batch = Batch::from_str(
            r#"{"artifacts": [
                {"project": "app", "namespace": "com.acme.dao.gen",
                 "file_name": "OrderMapper.java", "content": "interface OrderMapper {}"}
            ]}"#,
        )
        .unwrap();

        let report = check(
            &config,
            Path::new("genkeep.toml"),
            true,
            Some((Path::new("batch.json"), batch)),
        );

        assert!(report.is_valid());
        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(report.artifacts[0].kind, ArtifactKind::Mapper);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("references 'Order'"));
    }

    #[test]
    fn test_shallow_namespace_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("app")).unwrap();
        let mut config = Config::default();
        config.output.root = temp.path().to_path_buf();
        let batch = Batch::from_str(
            r#"{"artifacts": [{"project": "app", "namespace": "gen",
                "file_name": "Order.java", "content": "class Order {}"}]}"#,
        )
        .unwrap();

        let report = check(
            &config,
            Path::new("genkeep.toml"),
            true,
            Some((Path::new("batch.json"), batch)),
        );

        assert!(!report.is_valid());
        assert!(report.errors[0].contains("'gen'"));
    }
}
