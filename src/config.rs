//! Configuration discovery and effective settings resolution.
//!
//! Basecheck reads `basecheck.toml|yaml|yml` from the working directory
//! (or closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config. Defaults:
//! - `output`: `human`
//! - `scan.skip_html`: false
//! - `scan.ignore`: empty (node_modules/dist/hidden are always skipped)
//! - `scan.max_file_bytes`: 2 MiB
//! - `scan.dataset`: bundled snapshot
//! - `threshold.allowlist`: `baseline-allow.json`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::models::allow::ALLOWLIST_FILE;
use crate::scan::DEFAULT_MAX_FILE_BYTES;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Scan-related configuration section under `[scan]`.
pub struct ScanCfg {
    pub skip_html: Option<bool>,
    pub ignore: Option<Vec<String>>,
    pub max_file_bytes: Option<u64>,
    /// Path to an external dataset snapshot, relative to the config root.
    pub dataset: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Threshold-related configuration section under `[threshold]`.
pub struct ThresholdCfg {
    pub allowlist: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `basecheck.toml|yaml`.
pub struct BasecheckConfig {
    pub output: Option<String>,
    #[serde(default)]
    pub scan: Option<ScanCfg>,
    #[serde(default)]
    pub threshold: Option<ThresholdCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub config_root: PathBuf,
    pub output: String,
    pub skip_html: bool,
    pub ignore: Vec<String>,
    pub max_file_bytes: u64,
    pub dataset: Option<PathBuf>,
    pub allowlist: PathBuf,
}

/// Walk upward from `start` to find the directory carrying a config
/// file. Stops when a `basecheck.toml|yaml|yml` or a `.git` directory is
/// found; otherwise returns `start`.
pub fn detect_config_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("basecheck.toml").exists()
            || cur.join("basecheck.yaml").exists()
            || cur.join("basecheck.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `BasecheckConfig` from `basecheck.toml` or `basecheck.yaml|yml`
/// if present.
pub fn load_config(root: &Path) -> Option<BasecheckConfig> {
    let toml_path = root.join("basecheck.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: BasecheckConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["basecheck.yaml", "basecheck.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: BasecheckConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and
/// defaults. `start` is the invocation directory; the scan root is
/// resolved separately by the scan command.
pub fn resolve_effective(
    start: &Path,
    cli_output: Option<&str>,
    cli_skip_html: Option<bool>,
    cli_ignore: &[String],
    cli_allowlist: Option<&str>,
) -> Effective {
    let config_root = detect_config_root(start);
    let cfg = load_config(&config_root).unwrap_or_default();
    let scan = cfg.scan.unwrap_or_default();
    let threshold = cfg.threshold.unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let skip_html = cli_skip_html.or(scan.skip_html).unwrap_or(false);

    // CLI --ignore extends the configured list rather than replacing it
    let mut ignore = scan.ignore.unwrap_or_default();
    ignore.extend(cli_ignore.iter().cloned());

    let max_file_bytes = scan.max_file_bytes.unwrap_or(DEFAULT_MAX_FILE_BYTES);
    let dataset = scan.dataset.map(|p| config_root.join(p));

    let allowlist = cli_allowlist
        .map(|s| s.to_string())
        .or(threshold.allowlist)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(ALLOWLIST_FILE));

    Effective {
        config_root,
        output,
        skip_html,
        ignore,
        max_file_bytes,
        dataset,
        allowlist,
    }
}
