//! Shared data models: raw and enriched usages, support tiers, the
//! persisted report, and allowlist rules.

pub mod allow;
pub mod report;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// One observed occurrence of a web-platform feature in source.
///
/// Produced by an extractor and immutable thereafter. `loc` is 1-based;
/// `0` means the line is unknown. `property` is a cosmetic human label
/// (CSS property, HTML tag, or matched API signature) and is not part of
/// the dedup identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUsage {
    pub file: String,
    pub loc: u32,
    pub property: String,
    pub bcd_key: String,
}

/// Cross-browser Baseline support classification for one usage.
///
/// Wire encoding matches the report format: `"high"` for widely,
/// `"low"` for newly, `false` for unsupported, absent/null for unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupportTier {
    Widely,
    Newly,
    Unsupported,
    #[default]
    Unknown,
}

impl SupportTier {
    pub fn is_unknown(&self) -> bool {
        matches!(self, SupportTier::Unknown)
    }

    /// Whether this tier falls into the summary's "none" bucket.
    /// `Unsupported` and `Unknown` count identically there.
    pub fn is_none_bucket(&self) -> bool {
        matches!(self, SupportTier::Unsupported | SupportTier::Unknown)
    }
}

impl Serialize for SupportTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SupportTier::Widely => serializer.serialize_str("high"),
            SupportTier::Newly => serializer.serialize_str("low"),
            SupportTier::Unsupported => serializer.serialize_bool(false),
            SupportTier::Unknown => serializer.serialize_none(),
        }
    }
}

struct TierVisitor;

impl<'de> Visitor<'de> for TierVisitor {
    type Value = SupportTier;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("\"high\", \"low\", false, or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SupportTier, E> {
        match v {
            "high" => Ok(SupportTier::Widely),
            "low" => Ok(SupportTier::Newly),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<SupportTier, E> {
        if v {
            Err(E::invalid_value(de::Unexpected::Bool(v), &self))
        } else {
            Ok(SupportTier::Unsupported)
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<SupportTier, E> {
        Ok(SupportTier::Unknown)
    }

    fn visit_none<E: de::Error>(self) -> Result<SupportTier, E> {
        Ok(SupportTier::Unknown)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<SupportTier, D::Error> {
        d.deserialize_any(TierVisitor)
    }
}

impl<'de> Deserialize<'de> for SupportTier {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(TierVisitor)
    }
}

/// A `RawUsage` joined with compatibility data. Created once by the
/// enrichment stage and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedUsage {
    pub file: String,
    pub loc: u32,
    #[serde(default)]
    pub property: String,
    #[serde(rename = "bcdKey")]
    pub bcd_key: String,
    #[serde(rename = "featureId", default, skip_serializing_if = "Option::is_none")]
    pub feature_id: Option<String>,
    #[serde(rename = "featureName", default, skip_serializing_if = "Option::is_none")]
    pub feature_name: Option<String>,
    #[serde(default, skip_serializing_if = "SupportTier::is_unknown")]
    pub baseline: SupportTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_low_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_high_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mdn_url: Option<String>,
    pub advice: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(tier: SupportTier) -> EnrichedUsage {
        EnrichedUsage {
            file: "a.css".into(),
            loc: 3,
            property: "display".into(),
            bcd_key: "css.properties.display".into(),
            feature_id: None,
            feature_name: None,
            baseline: tier,
            baseline_low_date: None,
            baseline_high_date: None,
            support: None,
            mdn_url: None,
            advice: "x".into(),
        }
    }

    #[test]
    fn test_tier_serializes_to_wire_values() {
        let v = serde_json::to_value(usage(SupportTier::Widely)).unwrap();
        assert_eq!(v["baseline"], "high");
        let v = serde_json::to_value(usage(SupportTier::Newly)).unwrap();
        assert_eq!(v["baseline"], "low");
        let v = serde_json::to_value(usage(SupportTier::Unsupported)).unwrap();
        assert_eq!(v["baseline"], serde_json::Value::Bool(false));
        // Unknown is omitted entirely, matching the original report shape
        let v = serde_json::to_value(usage(SupportTier::Unknown)).unwrap();
        assert!(v.get("baseline").is_none());
    }

    #[test]
    fn test_tier_deserializes_from_wire_values() {
        let item: EnrichedUsage = serde_json::from_str(
            r#"{"file":"a.css","loc":1,"property":"","bcdKey":"k","baseline":"low","advice":""}"#,
        )
        .unwrap();
        assert_eq!(item.baseline, SupportTier::Newly);
        let item: EnrichedUsage = serde_json::from_str(
            r#"{"file":"a.css","loc":1,"property":"","bcdKey":"k","baseline":false,"advice":""}"#,
        )
        .unwrap();
        assert_eq!(item.baseline, SupportTier::Unsupported);
        // Missing field defaults to Unknown
        let item: EnrichedUsage =
            serde_json::from_str(r#"{"file":"a.css","loc":1,"bcdKey":"k","advice":""}"#).unwrap();
        assert_eq!(item.baseline, SupportTier::Unknown);
        assert_eq!(item.property, "");
    }

    #[test]
    fn test_tier_rejects_true() {
        let res: Result<EnrichedUsage, _> = serde_json::from_str(
            r#"{"file":"a.css","loc":1,"bcdKey":"k","baseline":true,"advice":""}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_none_bucket_membership() {
        assert!(SupportTier::Unsupported.is_none_bucket());
        assert!(SupportTier::Unknown.is_none_bucket());
        assert!(!SupportTier::Newly.is_none_bucket());
        assert!(!SupportTier::Widely.is_none_bucket());
    }
}
