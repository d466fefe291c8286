//! Allowlist schema for the threshold evaluator.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default allowlist file name, resolved against the working directory.
pub const ALLOWLIST_FILE: &str = "baseline-allow.json";

/// Tolerates up to `max` occurrences of `bcd_key` classified in the
/// "none" bucket. Forgiveness is capped per rule and never crosses keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowRule {
    #[serde(rename = "bcdKey")]
    pub bcd_key: String,
    pub max: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AllowFile {
    #[serde(default)]
    pub rules: Vec<AllowRule>,
}

/// Load allowlist rules from `path`. A missing file is an empty
/// allowlist; a present but unparsable file is a fatal setup failure.
pub fn load_allowlist(path: &Path) -> Result<Vec<AllowRule>, Error> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    let file: AllowFile = serde_json::from_str(&data).map_err(|source| Error::AllowlistMalformed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.rules)
}
