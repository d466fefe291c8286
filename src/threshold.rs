//! Threshold evaluator: pass/fail verdict for CI use.
//!
//! Runs as a separate invocation from the scan and communicates with it
//! only through the persisted report. Counts are recomputed from the
//! item list rather than read from the stored summary, as a guard
//! against summary drift.

use crate::error::Error;
use crate::models::allow::AllowRule;
use crate::models::report::{BaselineCounts, Report};
use crate::report::count_tiers;
use std::collections::HashMap;

pub const MAX_LOW_VAR: &str = "MAX_LOW";
pub const MAX_NONE_VAR: &str = "MAX_NONE";
pub const MAX_HIGH_VAR: &str = "MAX_HIGH";

/// Per-bucket ceilings. `None` means unlimited; only the "none" bucket
/// defaults to a hard ceiling (zero).
#[derive(Debug, Clone, Copy)]
pub struct Ceilings {
    pub max_low: Option<usize>,
    pub max_none: Option<usize>,
    pub max_high: Option<usize>,
}

impl Default for Ceilings {
    fn default() -> Ceilings {
        Ceilings {
            max_low: None,
            max_none: Some(0),
            max_high: None,
        }
    }
}

impl Ceilings {
    /// Read ceilings from `MAX_LOW` / `MAX_NONE` / `MAX_HIGH`. An unset
    /// variable keeps its default; an unparsable one is a fatal setup
    /// failure.
    pub fn from_env() -> Result<Ceilings, Error> {
        let mut ceilings = Ceilings::default();
        if let Some(v) = read_var(MAX_LOW_VAR)? {
            ceilings.max_low = Some(v);
        }
        if let Some(v) = read_var(MAX_NONE_VAR)? {
            ceilings.max_none = Some(v);
        }
        if let Some(v) = read_var(MAX_HIGH_VAR)? {
            ceilings.max_high = Some(v);
        }
        Ok(ceilings)
    }
}

fn read_var(var: &str) -> Result<Option<usize>, Error> {
    match std::env::var(var) {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(v) => Ok(Some(v)),
            Err(_) => Err(Error::BadCeiling {
                var: var.to_string(),
                value: raw,
            }),
        },
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(Error::BadCeiling {
            var: var.to_string(),
            value: "<non-utf8>".to_string(),
        }),
    }
}

#[derive(Debug)]
pub struct ThresholdOutcome {
    /// Recomputed from the report's item list.
    pub raw: BaselineCounts,
    /// After allowlist forgiveness.
    pub effective: BaselineCounts,
    pub forgiven: usize,
    pub violations: Vec<String>,
}

impl ThresholdOutcome {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

pub fn evaluate(report: &Report, ceilings: &Ceilings, allows: &[AllowRule]) -> ThresholdOutcome {
    let raw = count_tiers(&report.items);
    let mut effective = raw;
    let mut forgiven_total = 0usize;

    if !allows.is_empty() {
        let mut none_by_key: HashMap<&str, usize> = HashMap::new();
        for item in &report.items {
            if item.baseline.is_none_bucket() {
                *none_by_key.entry(item.bcd_key.as_str()).or_default() += 1;
            }
        }
        // Each rule's forgiveness cap is independent per key; a rule
        // never forgives across keys, and the total cannot go negative.
        for rule in allows {
            let observed = none_by_key.get(rule.bcd_key.as_str()).copied().unwrap_or(0);
            let forgiven = observed.min(rule.max);
            forgiven_total += forgiven;
            effective.none = effective.none.saturating_sub(forgiven);
        }
    }

    let mut violations = Vec::new();
    if let Some(max) = ceilings.max_low {
        if effective.low > max {
            violations.push(format!(
                "low ({}) exceeds {} ({})",
                effective.low, MAX_LOW_VAR, max
            ));
        }
    }
    if let Some(max) = ceilings.max_none {
        if effective.none > max {
            violations.push(format!(
                "none ({}) exceeds {} ({})",
                effective.none, MAX_NONE_VAR, max
            ));
        }
    }
    if let Some(max) = ceilings.max_high {
        if effective.high > max {
            violations.push(format!(
                "high ({}) exceeds {} ({})",
                effective.high, MAX_HIGH_VAR, max
            ));
        }
    }

    ThresholdOutcome {
        raw,
        effective,
        forgiven: forgiven_total,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::Summary;
    use crate::models::{EnrichedUsage, SupportTier};

    fn item(key: &str, tier: SupportTier) -> EnrichedUsage {
        EnrichedUsage {
            file: "a.css".into(),
            loc: 1,
            property: String::new(),
            bcd_key: key.into(),
            feature_id: None,
            feature_name: None,
            baseline: tier,
            baseline_low_date: None,
            baseline_high_date: None,
            support: None,
            mdn_url: None,
            advice: String::new(),
        }
    }

    fn report(items: Vec<EnrichedUsage>) -> Report {
        Report {
            scanned_at: "2026-01-01T00:00:00Z".into(),
            root: "/proj".into(),
            // A deliberately wrong summary: evaluation must recount
            summary: Summary {
                files: 0,
                declarations: 999,
                baseline: BaselineCounts {
                    high: 99,
                    low: 99,
                    none: 99,
                },
            },
            items,
        }
    }

    fn rule(key: &str, max: usize) -> AllowRule {
        AllowRule {
            bcd_key: key.into(),
            max,
            reason: None,
        }
    }

    #[test]
    fn test_clean_report_passes_with_defaults() {
        let rpt = report(vec![
            item("a", SupportTier::Widely),
            item("b", SupportTier::Newly),
        ]);
        let outcome = evaluate(&rpt, &Ceilings::default(), &[]);
        assert!(outcome.passed());
        assert_eq!(outcome.raw.high, 1);
        assert_eq!(outcome.raw.low, 1);
        assert_eq!(outcome.raw.none, 0);
    }

    #[test]
    fn test_counts_recomputed_not_trusted_from_summary() {
        let rpt = report(vec![item("a", SupportTier::Widely)]);
        let outcome = evaluate(&rpt, &Ceilings::default(), &[]);
        assert_eq!(outcome.raw.high, 1);
        assert_eq!(outcome.raw.none, 0);
    }

    #[test]
    fn test_forgiveness_reduces_but_may_still_fail() {
        let rpt = report(vec![
            item("K", SupportTier::Unsupported),
            item("K", SupportTier::Unsupported),
            item("K", SupportTier::Unknown),
        ]);
        let outcome = evaluate(&rpt, &Ceilings::default(), &[rule("K", 2)]);
        assert_eq!(outcome.raw.none, 3);
        assert_eq!(outcome.effective.none, 1);
        assert_eq!(outcome.forgiven, 2);
        assert_eq!(outcome.violations.len(), 1);
        // The message reports the effective count, not the raw one
        assert!(outcome.violations[0].contains("none (1)"));
    }

    #[test]
    fn test_forgiveness_is_per_key() {
        let rpt = report(vec![
            item("K", SupportTier::Unsupported),
            item("L", SupportTier::Unsupported),
        ]);
        // Generous cap on K must not forgive L's occurrence
        let outcome = evaluate(&rpt, &Ceilings::default(), &[rule("K", 10)]);
        assert_eq!(outcome.forgiven, 1);
        assert_eq!(outcome.effective.none, 1);
        assert!(!outcome.passed());
    }

    #[test]
    fn test_forgiveness_never_goes_negative() {
        let rpt = report(vec![item("K", SupportTier::Unsupported)]);
        let outcome = evaluate(
            &rpt,
            &Ceilings::default(),
            &[rule("K", 5), rule("K", 5)],
        );
        assert_eq!(outcome.effective.none, 0);
        assert!(outcome.passed());
    }

    #[test]
    fn test_low_and_high_ceilings() {
        let rpt = report(vec![
            item("a", SupportTier::Newly),
            item("b", SupportTier::Newly),
            item("c", SupportTier::Widely),
        ]);
        let ceilings = Ceilings {
            max_low: Some(1),
            max_none: Some(0),
            max_high: Some(0),
        };
        let outcome = evaluate(&rpt, &ceilings, &[]);
        assert_eq!(outcome.violations.len(), 2);
        assert!(outcome.violations[0].contains("MAX_LOW"));
        assert!(outcome.violations[1].contains("MAX_HIGH"));
    }
}
