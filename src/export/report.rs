//! JSON batch report

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::batch::{BatchOutcome, NameCollision};
use crate::error::{AppError, Result};
use crate::metadata::{MetadataRecord, Year};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedEntry {
    pub track_number: u32,
    pub source: String,
    pub output: String,
    pub bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedEntry {
    pub position: u32,
    pub source: String,
    pub error: String,
}

/// Summary of one batch run, written next to the outputs
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub album_title: String,
    pub album_artist: String,
    pub year: Year,
    pub total: usize,
    pub complete: bool,
    pub tagged: Vec<TaggedEntry>,
    pub failures: Vec<FailedEntry>,
    pub collisions: Vec<NameCollision>,
}

impl BatchReport {
    pub fn new(outcome: &BatchOutcome, record: &MetadataRecord) -> Self {
        Self {
            generated_at: Utc::now(),
            album_title: record.album_title.clone(),
            album_artist: record.album_artist.clone(),
            year: record.year,
            total: outcome.total(),
            complete: outcome.is_complete(),
            tagged: outcome
                .tagged
                .iter()
                .map(|t| TaggedEntry {
                    track_number: t.track_number,
                    source: t.source_filename.clone(),
                    output: t.filename.clone(),
                    bytes: t.bytes.len(),
                })
                .collect(),
            failures: outcome
                .failures
                .iter()
                .map(|f| FailedEntry {
                    position: f.position,
                    source: f.filename.clone(),
                    error: f.error.to_string(),
                })
                .collect(),
            collisions: outcome.collisions.clone(),
        }
    }

    /// Write the report as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::Output {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        fs::write(path, json).map_err(|e| AppError::Output {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        log::info!("Report written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{Batch, process};
    use crate::test_fixtures::mpeg_stream;
    use tempfile::TempDir;

    fn sample_outcome() -> (BatchOutcome, MetadataRecord) {
        let record = MetadataRecord {
            album_title: "Night Drive".to_string(),
            album_artist: "The Band".to_string(),
            year: Year::Known(2020),
            ..Default::default()
        };
        let batch: Batch = vec![
            ("good.mp3", mpeg_stream(20)),
            ("bad.mp3", b"nope".to_vec()),
        ]
        .into_iter()
        .collect();
        (process(batch, &record), record)
    }

    #[test]
    fn test_report_from_outcome() {
        let (outcome, record) = sample_outcome();
        let report = BatchReport::new(&outcome, &record);

        assert_eq!(report.total, 2);
        assert!(!report.complete);
        assert_eq!(report.tagged[0].output, "01-the-band-good.mp3");
        assert_eq!(report.failures[0].position, 2);
        assert!(report.failures[0].error.contains("unreadable"));
    }

    #[test]
    fn test_report_json_shape() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("batch-report.json");

        let (outcome, record) = sample_outcome();
        BatchReport::new(&outcome, &record).save(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        let generated_at = value["generated_at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(generated_at).is_ok());
        assert_eq!(value["year"], 2020);
        assert_eq!(value["tagged"][0]["track_number"], 1);
        assert_eq!(value["failures"][0]["source"], "bad.mp3");
        assert!(value["collisions"].as_array().unwrap().is_empty());
    }
}
