//! Scan orchestration.
//!
//! Enumerates the candidate file set up front, then processes each file
//! sequentially through its extractor: size guard, read, extract, with
//! per-file failures downgraded to warnings. There is no shared mutable
//! state across files; dedup is scoped inside each file's collector.

use crate::dataset::BaselineDataset;
use crate::enrich::Enricher;
use crate::error::Error;
use crate::extract::{css, html, js, FileKind};
use crate::models::report::Report;
use crate::models::RawUsage;
use crate::report;
use crate::utils;
use std::fs;
use std::path::{Path, PathBuf};

/// Default byte-size ceiling; larger files are skipped without parsing
/// to bound worst-case memory and time.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;

const CSS_PATTERNS: &[&str] = &["**/*.css"];
const HTML_PATTERNS: &[&str] = &["**/*.html", "**/*.htm"];
const SCRIPT_PATTERNS: &[&str] = &[
    "**/*.js",
    "**/*.mjs",
    "**/*.cjs",
    "**/*.jsx",
    "**/*.ts",
    "**/*.tsx",
];

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub skip_html: bool,
    /// Extra ignore globs, matched against the forward-slash path
    /// relative to the scan root.
    pub ignore: Vec<String>,
    pub max_file_bytes: u64,
}

#[derive(Debug)]
pub struct ScanWarning {
    pub file: String,
    pub message: String,
}

pub struct ScanOutcome {
    pub report: Report,
    pub warnings: Vec<ScanWarning>,
}

pub fn run_scan(opts: &ScanOptions, dataset: &BaselineDataset) -> Result<ScanOutcome, Error> {
    if !opts.root.is_dir() {
        return Err(Error::RootNotFound(opts.root.clone()));
    }
    let root = opts.root.canonicalize()?;

    let mut warnings = Vec::new();
    let mut ignore = Vec::new();
    for pat in &opts.ignore {
        match glob::Pattern::new(pat) {
            Ok(p) => ignore.push(p),
            Err(e) => warnings.push(ScanWarning {
                file: pat.clone(),
                message: format!("ignoring bad glob pattern: {}", e),
            }),
        }
    }

    let files = discover(&root, opts.skip_html, &ignore);
    let mut raw: Vec<RawUsage> = Vec::new();
    for (path, kind) in &files {
        let rel = utils::rel_path(&root, path);
        match scan_file(path, &rel, *kind, opts.max_file_bytes) {
            Ok(mut items) => raw.append(&mut items),
            Err(message) => warnings.push(ScanWarning { file: rel, message }),
        }
    }

    let enricher = Enricher::new(dataset);
    let enriched = enricher.enrich(raw);
    let report = report::assemble(&root, files.len(), enriched);
    Ok(ScanOutcome { report, warnings })
}

fn discover(root: &Path, skip_html: bool, ignore: &[glob::Pattern]) -> Vec<(PathBuf, FileKind)> {
    let mut patterns: Vec<&str> = Vec::new();
    patterns.extend(CSS_PATTERNS);
    if !skip_html {
        patterns.extend(HTML_PATTERNS);
    }
    patterns.extend(SCRIPT_PATTERNS);

    let mut files: Vec<(PathBuf, FileKind)> = Vec::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        for entry in glob::glob(&pattern).expect("bad glob pattern").flatten() {
            if !entry.is_file() {
                continue;
            }
            let rel = utils::rel_path(root, &entry);
            if is_ignored(&rel, ignore) {
                continue;
            }
            if let Some(kind) = FileKind::for_path(&entry) {
                files.push((entry, kind));
            }
        }
    }
    // Deterministic processing order across runs
    files.sort();
    files
}

fn is_ignored(rel: &str, extra: &[glob::Pattern]) -> bool {
    for component in rel.split('/') {
        if component == "node_modules" || component == "dist" {
            return true;
        }
        if component.starts_with('.') && component.len() > 1 {
            return true;
        }
    }
    extra.iter().any(|p| p.matches(rel))
}

fn scan_file(
    path: &Path,
    rel: &str,
    kind: FileKind,
    max_bytes: u64,
) -> Result<Vec<RawUsage>, String> {
    let meta = fs::metadata(path).map_err(|e| format!("unreadable: {}", e))?;
    if meta.len() > max_bytes {
        return Err(format!(
            "skipped: {} bytes exceeds the {} byte size ceiling",
            meta.len(),
            max_bytes
        ));
    }
    let source = fs::read_to_string(path).map_err(|e| format!("unreadable: {}", e))?;
    match kind {
        FileKind::Css => {
            css::extract(&source, rel).map_err(|e| format!("failed to parse CSS: {}", e))
        }
        FileKind::Html => {
            html::extract(&source, rel).map_err(|e| format!("failed to parse HTML: {}", e))
        }
        FileKind::Script => Ok(js::extract(&source, rel)),
    }
}
