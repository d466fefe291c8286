//! Compatibility dataset snapshot.
//!
//! Three sections mirror the upstream data sources this snapshot is
//! condensed from: `features` (the feature catalogue whose key lists get
//! inverted for enrichment), `statuses` (precomputed Baseline status per
//! canonical key), and `compat` (the raw compatibility tree, walked by
//! dot-segment for documentation URLs). A snapshot is bundled into the
//! binary; `[scan] dataset` in the config substitutes an external file.

use crate::error::Error;
use crate::models::SupportTier;
use serde::Deserialize;
use serde_json::Value as Json;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUNDLED_SNAPSHOT: &str = include_str!("../data/baseline-snapshot.json");

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureEntry {
    pub name: String,
    /// Feature-level status, used as a fallback when a key has no status
    /// entry of its own.
    #[serde(default)]
    pub status: Option<StatusRecord>,
    #[serde(default)]
    pub compat_features: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusRecord {
    #[serde(default)]
    pub baseline: SupportTier,
    #[serde(default)]
    pub baseline_low_date: Option<String>,
    #[serde(default)]
    pub baseline_high_date: Option<String>,
    #[serde(default)]
    pub support: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    features: BTreeMap<String, FeatureEntry>,
    #[serde(default)]
    statuses: BTreeMap<String, StatusRecord>,
    #[serde(default)]
    compat: Json,
}

pub struct BaselineDataset {
    features: BTreeMap<String, FeatureEntry>,
    statuses: BTreeMap<String, StatusRecord>,
    compat: Json,
}

impl BaselineDataset {
    /// The snapshot compiled into the binary.
    pub fn bundled() -> Result<BaselineDataset, Error> {
        Self::parse(BUNDLED_SNAPSHOT, "<bundled>")
    }

    /// Load a snapshot from an external file. Missing or malformed files
    /// are fatal setup failures; the scan produces no partial output.
    pub fn from_path(path: &Path) -> Result<BaselineDataset, Error> {
        let origin = path.display().to_string();
        let data = fs::read_to_string(path).map_err(|e| Error::Dataset {
            path: origin.clone(),
            reason: e.to_string(),
        })?;
        Self::parse(&data, &origin)
    }

    pub(crate) fn parse(data: &str, origin: &str) -> Result<BaselineDataset, Error> {
        let snapshot: Snapshot = serde_json::from_str(data).map_err(|e| Error::Dataset {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;
        Ok(BaselineDataset {
            features: snapshot.features,
            statuses: snapshot.statuses,
            compat: snapshot.compat,
        })
    }

    pub fn features(&self) -> &BTreeMap<String, FeatureEntry> {
        &self.features
    }

    /// Resolve the Baseline status for a canonical key: the key's own
    /// entry wins, then the mapped feature's status, then nothing.
    pub fn status_for(&self, feature_id: Option<&str>, key: &str) -> Option<&StatusRecord> {
        if let Some(record) = self.statuses.get(key) {
            return Some(record);
        }
        feature_id
            .and_then(|id| self.features.get(id))
            .and_then(|f| f.status.as_ref())
    }

    /// Walk the compat tree by dot-segment and read `__compat.mdn_url`.
    /// Absence at any segment is an expected outcome, not an error.
    pub fn mdn_url(&self, key: &str) -> Option<String> {
        let mut cur = &self.compat;
        for segment in key.split('.') {
            cur = cur.get(segment)?;
        }
        cur.get("__compat")?
            .get("mdn_url")?
            .as_str()
            .map(str::to_string)
    }
}
