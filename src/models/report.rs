//! Persisted report schema and JSON load/save.
//!
//! The report file is the sole hand-off between the scan stage and both
//! the renderer and the threshold evaluator; there is no shared in-memory
//! state between those invocations.

use crate::error::Error;
use crate::models::EnrichedUsage;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name of the persisted report, written to and read from the
/// working directory.
pub const REPORT_FILE: &str = "report.json";

/// Per-tier counts with `unsupported` and `unknown` collapsed into
/// `none`, the two-class risk view used at the summary level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineCounts {
    pub high: usize,
    pub low: usize,
    pub none: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub files: usize,
    /// Total usage count across all extractors. The wire name predates
    /// the HTML/JS extractors and is kept for report compatibility.
    pub declarations: usize,
    pub baseline: BaselineCounts,
}

/// A completed scan result. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "scannedAt")]
    pub scanned_at: String,
    pub root: String,
    pub summary: Summary,
    pub items: Vec<EnrichedUsage>,
}

impl Report {
    /// Read a report from `dir/report.json`. A missing file and a
    /// malformed file are distinct fatal setup failures.
    pub fn load(dir: &Path) -> Result<Report, Error> {
        let path = dir.join(REPORT_FILE);
        if !path.is_file() {
            return Err(Error::ReportMissing(path));
        }
        let data = fs::read_to_string(&path)?;
        serde_json::from_str(&data).map_err(|source| Error::ReportMalformed { path, source })
    }

    /// Write the report to `dir/report.json`, pretty-printed.
    pub fn save(&self, dir: &Path) -> Result<(), Error> {
        let path = dir.join(REPORT_FILE);
        let body = serde_json::to_string_pretty(self).map_err(Error::Serialize)?;
        fs::write(&path, body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SupportTier;
    use tempfile::tempdir;

    #[test]
    fn test_report_round_trip() {
        let dir = tempdir().unwrap();
        let report = Report {
            scanned_at: "2026-01-01T00:00:00Z".into(),
            root: "/proj".into(),
            summary: Summary {
                files: 1,
                declarations: 1,
                baseline: BaselineCounts {
                    high: 0,
                    low: 1,
                    none: 0,
                },
            },
            items: vec![EnrichedUsage {
                file: "a.css".into(),
                loc: 2,
                property: "display".into(),
                bcd_key: "css.properties.display".into(),
                feature_id: None,
                feature_name: None,
                baseline: SupportTier::Newly,
                baseline_low_date: None,
                baseline_high_date: None,
                support: None,
                mdn_url: None,
                advice: "ok".into(),
            }],
        };
        report.save(dir.path()).unwrap();
        let loaded = Report::load(dir.path()).unwrap();
        assert_eq!(loaded.root, "/proj");
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].baseline, SupportTier::Newly);
    }

    #[test]
    fn test_missing_report_is_distinct_error() {
        let dir = tempdir().unwrap();
        match Report::load(dir.path()) {
            Err(Error::ReportMissing(_)) => {}
            other => panic!("expected ReportMissing, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_malformed_report_is_distinct_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(REPORT_FILE), "{not json").unwrap();
        match Report::load(dir.path()) {
            Err(Error::ReportMalformed { .. }) => {}
            other => panic!("expected ReportMalformed, got {:?}", other.map(|_| ())),
        }
    }
}
