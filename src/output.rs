//! Output rendering for scan, render, and threshold commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form carries
//! the same counts and messages as the human form, shaped for tooling.

use crate::models::report::{BaselineCounts, Report, REPORT_FILE};
use crate::render::{CSV_FILE, HTML_FILE};
use crate::scan::ScanWarning;
use crate::threshold::{Ceilings, ThresholdOutcome, MAX_HIGH_VAR, MAX_LOW_VAR, MAX_NONE_VAR};
use crate::utils;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print the one-line scan summary (plus collected warnings on stderr).
pub fn print_scan(report: &Report, output: &str, warnings: &[ScanWarning]) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_scan_json(report, warnings)).unwrap()
        ),
        _ => {
            for w in warnings {
                eprintln!("{} {}: {}", utils::warn_prefix(), w.file, w.message);
            }
            println!(
                "Wrote {} (root={}, files={}, declarations={})",
                REPORT_FILE, report.root, report.summary.files, report.summary.declarations
            );
            let counts = format!(
                "  Baseline: high={} low={} none={}",
                report.summary.baseline.high,
                report.summary.baseline.low,
                report.summary.baseline.none
            );
            if use_colors(output) {
                println!("{}", counts.bold());
            } else {
                println!("{}", counts);
            }
        }
    }
}

pub fn print_render(output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&json!({"html": HTML_FILE, "csv": CSV_FILE})).unwrap()
        ),
        _ => println!("Wrote {} and {}", HTML_FILE, CSV_FILE),
    }
}

fn show_ceiling(ceiling: Option<usize>) -> String {
    match ceiling {
        Some(v) => v.to_string(),
        None => "unlimited".to_string(),
    }
}

/// Print threshold counts and the verdict. Violations go to stderr;
/// counts are always shown, even on success.
pub fn print_threshold(
    outcome: &ThresholdOutcome,
    ceilings: &Ceilings,
    allow_rules: usize,
    output: &str,
) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_threshold_json(outcome, ceilings, allow_rules))
                .unwrap()
        ),
        _ => {
            println!(
                "Thresholds  -> {}={} {}={} {}={}",
                MAX_HIGH_VAR,
                show_ceiling(ceilings.max_high),
                MAX_LOW_VAR,
                show_ceiling(ceilings.max_low),
                MAX_NONE_VAR,
                show_ceiling(ceilings.max_none),
            );
            println!(
                "Found (raw) -> high={} low={} none={}",
                outcome.raw.high, outcome.raw.low, outcome.raw.none
            );
            println!(
                "Found (eff) -> high={} low={} none={}{}",
                outcome.effective.high,
                outcome.effective.low,
                outcome.effective.none,
                if allow_rules > 0 {
                    "  (after allowlist)"
                } else {
                    ""
                }
            );
            if outcome.passed() {
                let msg = "Baseline threshold passed";
                if use_colors(output) {
                    println!("{}", msg.green().bold());
                } else {
                    println!("{}", msg);
                }
            } else {
                eprintln!(
                    "{} Baseline threshold failed: {}",
                    utils::error_prefix(),
                    outcome.violations.join("; ")
                );
            }
        }
    }
}

fn counts_json(counts: &BaselineCounts) -> JsonVal {
    json!({"high": counts.high, "low": counts.low, "none": counts.none})
}

/// Compose scan JSON (pure) for testing/snapshot purposes.
pub fn compose_scan_json(report: &Report, warnings: &[ScanWarning]) -> JsonVal {
    let warns: Vec<JsonVal> = warnings
        .iter()
        .map(|w| json!({"file": w.file, "message": w.message}))
        .collect();
    json!({
        "report": REPORT_FILE,
        "root": report.root,
        "summary": serde_json::to_value(&report.summary).unwrap(),
        "warnings": warns,
    })
}

/// Compose threshold JSON (pure) for testing/snapshot purposes.
pub fn compose_threshold_json(
    outcome: &ThresholdOutcome,
    ceilings: &Ceilings,
    allow_rules: usize,
) -> JsonVal {
    json!({
        "thresholds": {
            "high": ceilings.max_high,
            "low": ceilings.max_low,
            "none": ceilings.max_none,
        },
        "raw": counts_json(&outcome.raw),
        "effective": counts_json(&outcome.effective),
        "forgiven": outcome.forgiven,
        "allowRules": allow_rules,
        "violations": outcome.violations,
        "passed": outcome.passed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_threshold_json_shape() {
        let outcome = ThresholdOutcome {
            raw: BaselineCounts {
                high: 2,
                low: 1,
                none: 3,
            },
            effective: BaselineCounts {
                high: 2,
                low: 1,
                none: 1,
            },
            forgiven: 2,
            violations: vec!["none (1) exceeds MAX_NONE (0)".into()],
        };
        let out = compose_threshold_json(&outcome, &Ceilings::default(), 1);
        assert_eq!(out["raw"]["none"], 3);
        assert_eq!(out["effective"]["none"], 1);
        assert_eq!(out["thresholds"]["none"], 0);
        assert!(out["thresholds"]["low"].is_null());
        assert_eq!(out["passed"], false);
        assert_eq!(out["violations"][0], "none (1) exceeds MAX_NONE (0)");
    }

    #[test]
    fn test_compose_scan_json_carries_warnings() {
        use crate::models::report::Summary;
        let report = Report {
            scanned_at: "2026-01-01T00:00:00Z".into(),
            root: "/proj".into(),
            summary: Summary {
                files: 2,
                declarations: 0,
                baseline: BaselineCounts::default(),
            },
            items: vec![],
        };
        let warnings = vec![ScanWarning {
            file: "broken.css".into(),
            message: "failed to parse CSS".into(),
        }];
        let out = compose_scan_json(&report, &warnings);
        assert_eq!(out["summary"]["files"], 2);
        assert_eq!(out["warnings"][0]["file"], "broken.css");
    }
}
