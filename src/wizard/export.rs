//! Summary export
//!
//! Packs the rendered summary into a date-stamped Markdown artifact and hands
//! it to whatever the host uses to offer files for saving.

use super::summary::SummaryDocument;
use crate::error::{Result, RiskCheckError};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";

/// A generated file ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryExport {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl SummaryExport {
    pub fn new(summary: &SummaryDocument, today: NaiveDate) -> Self {
        Self {
            filename: export_filename(today),
            content_type: MARKDOWN_CONTENT_TYPE,
            bytes: summary.to_markdown().into_bytes(),
        }
    }
}

/// `protocol-risk-summary-YYYY-MM-DD.md`
pub fn export_filename(date: NaiveDate) -> String {
    format!("protocol-risk-summary-{}.md", date.format("%Y-%m-%d"))
}

/// Host facility that receives a generated file
#[cfg_attr(test, mockall::automock)]
pub trait SaveTarget {
    /// Store the export, returning where it ended up
    fn offer(&self, export: &SummaryExport) -> Result<PathBuf>;
}

/// Writes exports into a directory on disk
#[derive(Debug, Clone)]
pub struct DirectorySaveTarget {
    dir: PathBuf,
}

impl DirectorySaveTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveTarget for DirectorySaveTarget {
    fn offer(&self, export: &SummaryExport) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| RiskCheckError::Export {
            message: format!("Failed to create export directory {:?}: {}", self.dir, e),
        })?;

        let path = self.dir.join(&export.filename);
        fs::write(&path, &export.bytes).map_err(|e| RiskCheckError::Export {
            message: format!("Failed to write {:?}: {}", path, e),
        })?;

        tracing::info!(
            "Saved {} ({}, {} bytes) to {:?}",
            export.filename,
            export.content_type,
            export.bytes.len(),
            path
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::answers::{Answer, AnswerSet};
    use crate::wizard::content::Content;
    use crate::wizard::summary::synthesize;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn summary() -> SummaryDocument {
        let mut answers = AnswerSet::new();
        answers.insert("protocol_type", Answer::Single("l2".into()));
        synthesize(&Content::default(), &answers, date())
    }

    #[test]
    fn test_export_filename() {
        insta::assert_snapshot!(export_filename(date()), @"protocol-risk-summary-2026-10-19.md");
    }

    #[test]
    fn test_export_carries_markdown() {
        let doc = summary();
        let export = SummaryExport::new(&doc, date());
        assert_eq!(export.content_type, "text/markdown");
        assert_eq!(String::from_utf8(export.bytes).unwrap(), doc.to_markdown());
    }

    #[test]
    fn test_directory_target_writes_file() {
        let dir = TempDir::new().unwrap();
        let target = DirectorySaveTarget::new(dir.path().join("exports"));
        let export = SummaryExport::new(&summary(), date());

        let path = target.offer(&export).unwrap();
        assert_eq!(path.file_name().unwrap(), "protocol-risk-summary-2026-10-19.md");
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("Sequencer centralization"));
    }

    #[test]
    fn test_directory_target_reports_failure() {
        let dir = TempDir::new().unwrap();
        // A file where the directory should be
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "x").unwrap();
        let target = DirectorySaveTarget::new(&blocker);

        let err = target.offer(&SummaryExport::new(&summary(), date())).unwrap_err();
        assert!(matches!(err, RiskCheckError::Export { .. }));
    }
}
