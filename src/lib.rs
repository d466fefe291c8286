//! Basecheck core library.
//!
//! This crate exposes programmatic APIs for scanning a source tree for
//! web-platform feature usage, classifying each usage by its Baseline
//! support status, and gating CI on configurable thresholds.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `keys`: Canonical compatibility-key vocabulary and validation.
//! - `extract`: Per-language extractors (CSS, HTML, scripts).
//! - `dataset`: Compatibility dataset snapshot and lookups.
//! - `enrich`: Resolution of usages to tiers, features, and advice.
//! - `scan`: File discovery and per-file orchestration.
//! - `report`: Risk ordering and report assembly.
//! - `render`: HTML/CSV rendering of a persisted report.
//! - `threshold`: Pass/fail evaluation with allowlist forgiveness.
//! - `models`: Data models for usages, reports, and allowlists.
//! - `output`: Human/JSON printers for scan/render/threshold.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod config;
pub mod dataset;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod keys;
pub mod models;
pub mod output;
pub mod render;
pub mod report;
pub mod scan;
pub mod threshold;
pub mod utils;

pub use error::Error;
