//! Canonical compatibility-key vocabulary.
//!
//! Keys are dot-segmented paths into the compatibility dataset
//! (`css.properties.display`, `html.elements.input.input-types.date`,
//! `api.structuredClone`). They are the join key against the dataset and
//! the identity of an allowlist rule, so construction must be stable:
//! every dynamic segment passes through `normalize_keyword` before
//! concatenation, which keeps case-variant source (`Grid`, `GRID`) from
//! producing duplicate or missed keys.

/// Trim and ASCII-lowercase a source token before it becomes a key segment.
pub fn normalize_keyword(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

pub fn css_property(prop: &str) -> String {
    format!("css.properties.{}", normalize_keyword(prop))
}

pub fn css_property_value(prop: &str, keyword: &str) -> String {
    format!(
        "css.properties.{}.{}",
        normalize_keyword(prop),
        normalize_keyword(keyword)
    )
}

/// At-rules with a tracked compatibility entry. Unrecognized at-rules
/// produce no key.
pub fn css_at_rule(name: &str) -> Option<String> {
    let name = normalize_keyword(name);
    match name.as_str() {
        "container" | "layer" | "starting-style" => Some(format!("css.at-rules.{}", name)),
        _ => None,
    }
}

/// Pseudo-class selectors with a tracked compatibility entry.
pub fn css_selector(name: &str) -> Option<String> {
    let name = normalize_keyword(name);
    match name.as_str() {
        "has" => Some(format!("css.selectors.{}", name)),
        _ => None,
    }
}

pub fn html_element(tag: &str) -> String {
    format!("html.elements.{}", normalize_keyword(tag))
}

/// Attribute-value-dependent variant for `<input type="...">`. Returns
/// `None` when the normalized type is empty.
pub fn html_input_type(ty: &str) -> Option<String> {
    let ty = normalize_keyword(ty);
    if ty.is_empty() {
        return None;
    }
    Some(format!("html.elements.input.input-types.{}", ty))
}

/// Global attributes with a tracked compatibility entry.
pub fn html_global_attribute(attr: &str) -> Option<String> {
    let attr = normalize_keyword(attr);
    match attr.as_str() {
        "popover" | "inert" => Some(format!("html.global_attributes.{}", attr)),
        _ => None,
    }
}

/// Structural validation for externally supplied keys (allowlist rules):
/// non-empty dot segments, no whitespace, and a known top-level namespace.
pub fn is_canonical_key(key: &str) -> bool {
    let mut segments = key.split('.');
    let namespace = match segments.next() {
        Some(ns) => ns,
        None => return false,
    };
    if !matches!(namespace, "css" | "html" | "api") {
        return false;
    }
    let mut rest = 0usize;
    for seg in segments {
        if seg.is_empty() || seg.chars().any(char::is_whitespace) {
            return false;
        }
        rest += 1;
    }
    rest >= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keyword_folds_case_and_trims() {
        assert_eq!(normalize_keyword("  Grid "), "grid");
        assert_eq!(normalize_keyword("GRID"), "grid");
        assert_eq!(normalize_keyword("auto-phrase"), "auto-phrase");
    }

    #[test]
    fn test_css_keys() {
        assert_eq!(css_property("Word-Break"), "css.properties.word-break");
        assert_eq!(
            css_property_value("word-break", "AUTO-PHRASE"),
            "css.properties.word-break.auto-phrase"
        );
        assert_eq!(
            css_at_rule("container").as_deref(),
            Some("css.at-rules.container")
        );
        assert_eq!(
            css_at_rule("starting-style").as_deref(),
            Some("css.at-rules.starting-style")
        );
        assert_eq!(css_at_rule("media"), None);
        assert_eq!(css_selector("has").as_deref(), Some("css.selectors.has"));
        assert_eq!(css_selector("hover"), None);
    }

    #[test]
    fn test_html_keys() {
        assert_eq!(html_element("DIALOG"), "html.elements.dialog");
        assert_eq!(
            html_input_type("Date").as_deref(),
            Some("html.elements.input.input-types.date")
        );
        assert_eq!(html_input_type("   "), None);
        assert_eq!(
            html_global_attribute("Popover").as_deref(),
            Some("html.global_attributes.popover")
        );
        assert_eq!(html_global_attribute("class"), None);
    }

    #[test]
    fn test_is_canonical_key() {
        assert!(is_canonical_key("css.properties.display"));
        assert!(is_canonical_key("api.structuredClone"));
        assert!(is_canonical_key("html.elements.input.input-types.date"));
        assert!(!is_canonical_key("css"));
        assert!(!is_canonical_key("css..display"));
        assert!(!is_canonical_key("js.builtins.Array"));
        assert!(!is_canonical_key("css.prop erties.x"));
    }
}
