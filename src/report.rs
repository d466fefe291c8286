//! Report assembly: aggregate counts and the risk ordering.
//!
//! The sort is a contract: highest-risk items surface first, then file
//! path, then line, so the report reads top-down by severity.

use crate::models::report::{BaselineCounts, Report, Summary};
use crate::models::{EnrichedUsage, SupportTier};
use chrono::{SecondsFormat, Utc};
use std::path::Path;

/// Ordering weight for the report sort; lowest (most risky) first.
/// `unsupported` and `unknown` share the top rank.
pub fn risk_rank(tier: SupportTier) -> u8 {
    match tier {
        SupportTier::Unsupported | SupportTier::Unknown => 0,
        SupportTier::Newly => 1,
        SupportTier::Widely => 2,
    }
}

/// Per-tier counts over an item list. Shared by the scan summary and the
/// threshold evaluator's recount.
pub fn count_tiers(items: &[EnrichedUsage]) -> BaselineCounts {
    let mut counts = BaselineCounts::default();
    for item in items {
        match item.baseline {
            SupportTier::Widely => counts.high += 1,
            SupportTier::Newly => counts.low += 1,
            SupportTier::Unsupported | SupportTier::Unknown => counts.none += 1,
        }
    }
    counts
}

/// Merge enriched usages into the final ordered report.
pub fn assemble(root: &Path, files: usize, mut items: Vec<EnrichedUsage>) -> Report {
    items.sort_by(|a, b| {
        risk_rank(a.baseline)
            .cmp(&risk_rank(b.baseline))
            .then_with(|| a.file.cmp(&b.file))
            .then_with(|| a.loc.cmp(&b.loc))
    });
    let summary = Summary {
        files,
        declarations: items.len(),
        baseline: count_tiers(&items),
    };
    Report {
        scanned_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        root: root.to_string_lossy().replace('\\', "/"),
        summary,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn item(file: &str, loc: u32, tier: SupportTier) -> EnrichedUsage {
        EnrichedUsage {
            file: file.into(),
            loc,
            property: String::new(),
            bcd_key: "k".into(),
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

    #[test]
    fn test_sort_is_rank_then_file_then_line() {
        let items = vec![
            item("b.css", 9, SupportTier::Widely),
            item("b.css", 2, SupportTier::Newly),
            item("a.css", 5, SupportTier::Newly),
            item("z.css", 1, SupportTier::Unknown),
            item("a.css", 7, SupportTier::Unsupported),
            item("a.css", 1, SupportTier::Widely),
        ];
        let report = assemble(&PathBuf::from("/proj"), 3, items);
        for pair in report.items.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (ra, rb) = (risk_rank(a.baseline), risk_rank(b.baseline));
            assert!(ra <= rb);
            if ra == rb {
                assert!(a.file <= b.file);
                if a.file == b.file {
                    assert!(a.loc <= b.loc);
                }
            }
        }
        // unsupported and unknown interleave under the same rank
        assert_eq!(report.items[0].file, "a.css");
        assert_eq!(report.items[1].file, "z.css");
    }

    #[test]
    fn test_summary_collapses_none_bucket() {
        let items = vec![
            item("a.css", 1, SupportTier::Widely),
            item("a.css", 2, SupportTier::Newly),
            item("a.css", 3, SupportTier::Unsupported),
            item("a.css", 4, SupportTier::Unknown),
        ];
        let report = assemble(&PathBuf::from("/proj"), 1, items);
        assert_eq!(report.summary.declarations, 4);
        assert_eq!(report.summary.baseline.high, 1);
        assert_eq!(report.summary.baseline.low, 1);
        assert_eq!(report.summary.baseline.none, 2);
        assert_eq!(report.summary.files, 1);
    }
}
