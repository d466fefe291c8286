//! Script extractor: best-effort lexical scan against a fixed table of
//! API signatures.
//!
//! Deliberately no parsing. Literal substring search will over-match
//! (occurrences inside comments or string literals) and under-match
//! (aliased imports, destructured references); that imprecision is the
//! accepted trade-off for zero-parse-cost coverage of any script
//! dialect. Do not replace with an AST pass.

use crate::extract::UsageCollector;
use crate::models::RawUsage;
use memchr::{memchr_iter, memmem};

/// (needle, canonical key, human label)
const API_SIGNATURES: &[(&str, &str, &str)] = &[
    ("structuredClone(", "api.structuredClone", "structuredClone"),
    ("navigator.clipboard", "api.Clipboard", "navigator.clipboard"),
    (
        "startViewTransition",
        "api.Document.startViewTransition",
        "startViewTransition",
    ),
    (
        "IntersectionObserver",
        "api.IntersectionObserver",
        "IntersectionObserver",
    ),
    ("ResizeObserver", "api.ResizeObserver", "ResizeObserver"),
    ("BroadcastChannel", "api.BroadcastChannel", "BroadcastChannel"),
    ("navigator.share", "api.Navigator.share", "navigator.share"),
    (
        "requestIdleCallback",
        "api.Window.requestIdleCallback",
        "requestIdleCallback",
    ),
    (
        "AbortSignal.timeout",
        "api.AbortSignal.timeout",
        "AbortSignal.timeout",
    ),
    (
        "scheduler.postTask",
        "api.Scheduler.postTask",
        "scheduler.postTask",
    ),
    ("URLPattern", "api.URLPattern", "URLPattern"),
    (
        "showOpenFilePicker",
        "api.Window.showOpenFilePicker",
        "showOpenFilePicker",
    ),
];

pub fn extract(source: &str, file: &str) -> Vec<RawUsage> {
    let bytes = source.as_bytes();
    let mut out = UsageCollector::new(file);
    for (needle, key, label) in API_SIGNATURES {
        for offset in memmem::find_iter(bytes, needle.as_bytes()) {
            out.push(line_at(bytes, offset), label, (*key).to_string());
        }
    }
    out.into_items()
}

/// 1-based line of a byte offset, by counting preceding newlines.
fn line_at(bytes: &[u8], offset: usize) -> u32 {
    memchr_iter(b'\n', &bytes[..offset]).count() as u32 + 1
}
