//! Supporting helpers: colored stderr prefixes and path normalization.

use owo_colors::OwoColorize;
use std::path::Path;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn warn_prefix() -> String {
    if colors_enabled() {
        "warn:".yellow().bold().to_string()
    } else {
        "warn:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

pub fn info_prefix() -> String {
    if colors_enabled() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}

/// Root-relative, forward-slash path used in report entries and dedup
/// identities. Falls back to the file path itself when it does not live
/// under `root`.
pub fn rel_path(root: &Path, file: &Path) -> String {
    let rel = pathdiff::diff_paths(file, root).unwrap_or_else(|| file.to_path_buf());
    rel.to_string_lossy().replace('\\', "/")
}
