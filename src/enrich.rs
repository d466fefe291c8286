//! Enrichment stage: resolve each raw usage to a support tier, feature
//! identity, documentation URL, and advisory text.
//!
//! The key→feature index is inverted once at construction and the
//! enricher is passed explicitly to every call site; there is no ambient
//! global or lazy initialization. Resolution never fails past this
//! stage: a key the dataset does not know degrades to the unknown tier
//! and the pass continues.

use crate::dataset::BaselineDataset;
use crate::models::{EnrichedUsage, RawUsage, SupportTier};
use std::collections::HashMap;

pub struct Enricher<'d> {
    dataset: &'d BaselineDataset,
    feature_by_key: HashMap<&'d str, (&'d str, &'d str)>,
}

impl<'d> Enricher<'d> {
    pub fn new(dataset: &'d BaselineDataset) -> Enricher<'d> {
        let mut feature_by_key: HashMap<&str, (&str, &str)> = HashMap::new();
        for (id, feature) in dataset.features() {
            for key in &feature.compat_features {
                feature_by_key
                    .entry(key.as_str())
                    .or_insert((id.as_str(), feature.name.as_str()));
            }
        }
        Enricher {
            dataset,
            feature_by_key,
        }
    }

    /// Enrich usages in order. Each usage resolves independently; input
    /// order is preserved for stable sort behavior downstream.
    pub fn enrich(&self, items: Vec<RawUsage>) -> Vec<EnrichedUsage> {
        items.into_iter().map(|it| self.enrich_one(it)).collect()
    }

    fn enrich_one(&self, raw: RawUsage) -> EnrichedUsage {
        let mapped = self.feature_by_key.get(raw.bcd_key.as_str()).copied();
        let status = self
            .dataset
            .status_for(mapped.map(|(id, _)| id), &raw.bcd_key);
        let (baseline, low_date, high_date, support) = match status {
            Some(rec) => (
                rec.baseline,
                rec.baseline_low_date.clone(),
                rec.baseline_high_date.clone(),
                rec.support.clone(),
            ),
            None => (SupportTier::Unknown, None, None, None),
        };
        let mdn_url = self.dataset.mdn_url(&raw.bcd_key);
        let advice = advice_for(baseline, &raw.bcd_key);
        EnrichedUsage {
            file: raw.file,
            loc: raw.loc,
            property: raw.property,
            feature_id: mapped.map(|(id, _)| id.to_string()),
            feature_name: mapped.map(|(_, name)| name.to_string()),
            baseline,
            baseline_low_date: low_date,
            baseline_high_date: high_date,
            support,
            mdn_url,
            advice,
            bcd_key: raw.bcd_key,
        }
    }
}

/// Advisory text for a tier. Pure function, no I/O; one fixed template
/// per tier.
pub fn advice_for(tier: SupportTier, key: &str) -> String {
    match tier {
        SupportTier::Unsupported => format!(
            "Feature is not in Baseline. Consider a fallback or feature detect before using ({}).",
            key
        ),
        SupportTier::Newly => {
            "Newly Baseline. Some older browsers may break; add a fallback or progressive enhancement where feasible."
                .to_string()
        }
        SupportTier::Widely => {
            "Widely Baseline. Generally safe; still test on your supported browsers.".to_string()
        }
        SupportTier::Unknown => {
            "No Baseline info found; review MDN and test before relying on it.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(key: &str) -> RawUsage {
        RawUsage {
            file: "a.css".into(),
            loc: 1,
            property: "display".into(),
            bcd_key: key.into(),
        }
    }

    #[test]
    fn test_known_key_resolves_feature_and_tier() {
        let dataset = BaselineDataset::bundled().unwrap();
        let enricher = Enricher::new(&dataset);
        let out = enricher.enrich(vec![raw("css.properties.display.grid")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].baseline, SupportTier::Widely);
        assert_eq!(out[0].feature_id.as_deref(), Some("grid"));
        assert_eq!(out[0].feature_name.as_deref(), Some("Grid"));
        assert!(out[0].baseline_low_date.is_some());
        assert!(out[0].mdn_url.is_some());
    }

    #[test]
    fn test_unresolved_key_degrades_to_unknown() {
        let dataset = BaselineDataset::bundled().unwrap();
        let enricher = Enricher::new(&dataset);
        let out = enricher.enrich(vec![raw("css.properties.imaginary-prop")]);
        assert_eq!(out[0].baseline, SupportTier::Unknown);
        assert!(out[0].feature_id.is_none());
        assert!(out[0].mdn_url.is_none());
        assert!(out[0].advice.contains("No Baseline info found"));
    }

    #[test]
    fn test_feature_status_fallback() {
        let dataset = BaselineDataset::parse(
            r#"{
              "features": {
                "flexbox": {
                  "name": "Flexbox",
                  "status": { "baseline": "high" },
                  "compat_features": ["css.properties.flex-basis"]
                }
              }
            }"#,
            "<test>",
        )
        .unwrap();
        let enricher = Enricher::new(&dataset);
        let out = enricher.enrich(vec![raw("css.properties.flex-basis")]);
        assert_eq!(out[0].baseline, SupportTier::Widely);
        assert_eq!(out[0].feature_name.as_deref(), Some("Flexbox"));
    }

    #[test]
    fn test_advice_templates_are_tier_specific() {
        assert!(advice_for(SupportTier::Unsupported, "k").contains("not in Baseline"));
        assert!(advice_for(SupportTier::Unsupported, "some.key").contains("some.key"));
        assert!(advice_for(SupportTier::Newly, "k").starts_with("Newly Baseline."));
        assert!(advice_for(SupportTier::Widely, "k").starts_with("Widely Baseline."));
        assert!(advice_for(SupportTier::Unknown, "k").starts_with("No Baseline info"));
    }
}
