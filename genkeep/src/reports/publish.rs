//! Publish command report data structures.

use std::path::{Path, PathBuf};

use genkeep_publish::{Preview, PublishReport};
use serde::Serialize;

use super::output::{Output, Report};

/// Report data from a publishing run.
#[derive(Debug, Serialize)]
pub struct PublishSummary {
    /// Batch file the artifacts came from.
    pub batch_path: PathBuf,
    /// Output root projects were resolved against.
    pub root: PathBuf,
    /// Files written, or the planned writes of a dry run.
    #[serde(flatten)]
    pub outcome: PublishOutcome,
}

/// Result of publishing.
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PublishOutcome {
    /// Files were written to disk.
    Published(PublishReport),
    /// Dry-run preview.
    Preview(Preview),
}

impl Report for PublishSummary {
    fn render(&self, out: &mut dyn Output) {
        match &self.outcome {
            PublishOutcome::Published(report) => self.render_published(out, report),
            PublishOutcome::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl PublishSummary {
    fn render_published(&self, out: &mut dyn Output, report: &PublishReport) {
        for warning in report.warnings() {
            out.warning(warning);
        }
        if report.has_warnings() {
            out.newline();
        }

        self.render_paths(out, "Written", &report.written, true);
        self.render_paths(out, "Scaffolded", &report.scaffolded, true);
        self.render_paths(out, "Kept (already present)", &report.preserved, false);

        if !report.refreshed.is_empty() {
            out.key_value("Refreshed", &report.refreshed.join(", "));
        }
        out.preformatted(&format!(
            "{} file{} changed from {}",
            report.files_changed(),
            if report.files_changed() == 1 { "" } else { "s" },
            self.batch_path.display()
        ));
    }

    fn render_paths(&self, out: &mut dyn Output, heading: &str, paths: &[PathBuf], added: bool) {
        if paths.is_empty() {
            return;
        }
        out.section(&format!("{heading} ({})", paths.len()));
        for path in paths {
            let shown = self.relative(path);
            if added {
                out.added_item(&shown);
            } else {
                out.list_item(&shown);
            }
        }
        out.newline();
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &Preview) {
        for diag in &preview.diagnostics {
            if diag.severity.is_warning() {
                out.warning(&diag.message);
            }
        }

        for write in &preview.writes {
            out.divider(&format!("{} ({})", self.relative(&write.path), write.role));
            out.preformatted(&write.content);
        }

        if !preview.preserved.is_empty() {
            out.newline();
            self.render_paths(out, "Kept (already present)", &preview.preserved, false);
        }

        out.divider("Summary");
        let count = preview.writes.len();
        out.preformatted(&format!(
            "{count} file{} would be written, {} kept",
            if count == 1 { "" } else { "s" },
            preview.preserved.len()
        ));
    }

    /// `path` relative to the output root when it lies below it.
    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use genkeep_publish::{Diagnostic, PlannedWrite};

    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_published() {
        let report = PublishReport {
            written: vec![PathBuf::from("/out/app/a/gen/OrderBase.java")],
            scaffolded: vec![PathBuf::from("/out/app/a/model/Order.java")],
            preserved: Vec::new(),
            refreshed: vec!["app".to_string()],
            diagnostics: vec![Diagnostic::warning("something happened").at("Order.java")],
        };
        let summary = PublishSummary {
            batch_path: PathBuf::from("batch.json"),
            root: PathBuf::from("/out"),
            outcome: PublishOutcome::Published(report),
        };
        let mut out = BufferOutput::default();

        summary.render(&mut out);

        assert_eq!(
            out.lines,
            [
                "warning: something happened",
                "",
                "Written (1):",
                "  + app/a/gen/OrderBase.java",
                "",
                "Scaffolded (1):",
                "  + app/a/model/Order.java",
                "",
                "Refreshed: app",
                "2 files changed from batch.json",
            ]
        );
    }

    #[test]
    fn test_render_preview() {
        let preview = Preview {
            writes: vec![PlannedWrite::base("/out/app/gen/OrderBase.java", "class OrderBase {}")],
            preserved: vec![PathBuf::from("/out/app/model/Order.java")],
            diagnostics: vec![Diagnostic::info("/out/app/model/Order.java exists, leaving it untouched")],
        };
        let summary = PublishSummary {
            batch_path: PathBuf::from("batch.json"),
            root: PathBuf::from("/out"),
            outcome: PublishOutcome::Preview(preview),
        };
        let mut out = BufferOutput::default();

        summary.render(&mut out);

        assert_eq!(
            out.lines,
            [
                "── app/gen/OrderBase.java (base) ──",
                "class OrderBase {}",
                "",
                "Kept (already present) (1):",
                "  - app/model/Order.java",
                "",
                "── Summary ──",
                "1 file would be written, 1 kept",
            ]
        );
    }

    #[test]
    fn test_json_is_tagged_by_mode() {
        let summary = PublishSummary {
            batch_path: PathBuf::from("batch.json"),
            root: PathBuf::from("."),
            outcome: PublishOutcome::Published(PublishReport::default()),
        };

        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["mode"], "published");
        assert_eq!(json["batch_path"], "batch.json");
        assert!(json["written"].as_array().unwrap().is_empty());
    }
}
