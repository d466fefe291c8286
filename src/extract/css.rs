//! CSS extractor.
//!
//! Depth-first walk over the parsed stylesheet. Declarations emit the
//! base property key plus one value-variant key per distinct keyword in
//! that declaration's value; a small set of at-rules and the `:has`
//! relational pseudo-class emit dedicated keys. Everything else is
//! ignored.

use crate::extract::{ParseFailure, UsageCollector};
use crate::keys;
use crate::models::RawUsage;
use std::collections::BTreeSet;
use tree_sitter::{Language, Node, Parser};

pub fn extract(source: &str, file: &str) -> Result<Vec<RawUsage>, ParseFailure> {
    let mut parser = Parser::new();
    let language: Language = tree_sitter_css::LANGUAGE.into();
    parser
        .set_language(&language)
        .map_err(|e| ParseFailure(format!("CSS grammar unavailable: {}", e)))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseFailure("CSS parse produced no tree".into()))?;
    let mut out = UsageCollector::new(file);
    walk(tree.root_node(), source.as_bytes(), &mut out);
    Ok(out.into_items())
}

fn walk(node: Node, src: &[u8], out: &mut UsageCollector) {
    match node.kind() {
        "declaration" => visit_declaration(node, src, out),
        // Keyed on the token, not the enclosing rule node, so an at-rule
        // whose query the grammar cannot fully parse still yields a key.
        "at_keyword" => visit_at_keyword(node, src, out),
        "pseudo_class_selector" => visit_pseudo_class(node, src, out),
        _ => {}
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, src, out);
    }
}

fn line_of(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}

fn visit_declaration(node: Node, src: &[u8], out: &mut UsageCollector) {
    let mut cursor = node.walk();
    let prop_node = match node.children(&mut cursor).find(|c| c.kind() == "property_name") {
        Some(n) => n,
        None => return,
    };
    let prop = match prop_node.utf8_text(src) {
        Ok(text) => keys::normalize_keyword(text),
        Err(_) => return,
    };
    if prop.is_empty() {
        return;
    }
    let line = line_of(node);
    out.push(line, &prop, keys::css_property(&prop));

    // Value keywords, deduplicated within this one declaration so a value
    // like `grid grid grid` emits a single variant key. Unreadable value
    // tokens are skipped silently; the base key above already went out.
    let mut keywords: BTreeSet<String> = BTreeSet::new();
    collect_value_keywords(node, src, prop_node.id(), &mut keywords);
    for kw in keywords {
        out.push(line, &prop, keys::css_property_value(&prop, &kw));
    }
}

fn collect_value_keywords(node: Node, src: &[u8], skip_id: usize, acc: &mut BTreeSet<String>) {
    if node.id() == skip_id {
        return;
    }
    if node.kind() == "plain_value" {
        if let Ok(text) = node.utf8_text(src) {
            let kw = keys::normalize_keyword(text);
            if !kw.is_empty() {
                acc.insert(kw);
            }
        }
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_value_keywords(child, src, skip_id, acc);
    }
}

fn visit_at_keyword(node: Node, src: &[u8], out: &mut UsageCollector) {
    let text = match node.utf8_text(src) {
        Ok(t) => t,
        Err(_) => return,
    };
    let name = text.trim_start_matches('@');
    if let Some(key) = keys::css_at_rule(name) {
        out.push(line_of(node), "", key);
    }
}

fn visit_pseudo_class(node: Node, src: &[u8], out: &mut UsageCollector) {
    let mut cursor = node.walk();
    let class = match node.children(&mut cursor).find(|c| c.kind() == "class_name") {
        Some(n) => n,
        None => return,
    };
    let name = match class.utf8_text(src) {
        Ok(t) => t,
        Err(_) => return,
    };
    if let Some(key) = keys::css_selector(name) {
        out.push(line_of(node), "", key);
    }
}
