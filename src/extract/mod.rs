//! Per-language feature extractors and their shared dedup collector.
//!
//! Each extractor turns one file into a sequence of `RawUsage` in
//! document order. Ordering here is not a contract (the report assembler
//! re-sorts), but deduplication is: within a file, identical
//! `(line, key)` pairs collapse to one usage, first push wins.

pub mod css;
pub mod html;
pub mod js;

use crate::models::RawUsage;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Which extractor handles a file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileKind {
    Css,
    Html,
    Script,
}

impl FileKind {
    pub fn for_path(path: &Path) -> Option<FileKind> {
        let ext = path.extension().and_then(|e| e.to_str())?.to_ascii_lowercase();
        match ext.as_str() {
            "css" => Some(FileKind::Css),
            "html" | "htm" => Some(FileKind::Html),
            "js" | "mjs" | "cjs" | "jsx" | "ts" | "tsx" => Some(FileKind::Script),
            _ => None,
        }
    }
}

/// A file-local parse failure. The scan loop recovers by skipping the
/// file with a warning; it never aborts the scan.
#[derive(Debug)]
pub struct ParseFailure(pub String);

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseFailure {}

/// Collects usages for one file, collapsing duplicate `(line, key)`
/// pairs. Scoped per file: identical constructs in different files are
/// never merged.
pub struct UsageCollector {
    file: String,
    items: Vec<RawUsage>,
    seen: HashSet<(u32, String)>,
}

impl UsageCollector {
    pub fn new(file: impl Into<String>) -> UsageCollector {
        UsageCollector {
            file: file.into(),
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn push(&mut self, loc: u32, property: &str, bcd_key: String) {
        if !self.seen.insert((loc, bcd_key.clone())) {
            return;
        }
        self.items.push(RawUsage {
            file: self.file.clone(),
            loc,
            property: property.to_string(),
            bcd_key,
        });
    }

    pub fn into_items(self) -> Vec<RawUsage> {
        self.items
    }
}
