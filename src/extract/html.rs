//! HTML extractor.
//!
//! Recursive walk over element nodes (text and comments carry no keys).
//! Every element emits its generic key; recognized global attributes and
//! `<input type=...>` variants emit additional keys at the same line.
//! Attribute names and values are case-folded before lookup.

use crate::extract::{ParseFailure, UsageCollector};
use crate::keys;
use crate::models::RawUsage;
use tree_sitter::{Language, Node, Parser};

pub fn extract(source: &str, file: &str) -> Result<Vec<RawUsage>, ParseFailure> {
    let mut parser = Parser::new();
    let language: Language = tree_sitter_html::LANGUAGE.into();
    parser
        .set_language(&language)
        .map_err(|e| ParseFailure(format!("HTML grammar unavailable: {}", e)))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseFailure("HTML parse produced no tree".into()))?;
    let mut out = UsageCollector::new(file);
    walk(tree.root_node(), source.as_bytes(), &mut out);
    Ok(out.into_items())
}

fn walk(node: Node, src: &[u8], out: &mut UsageCollector) {
    if matches!(node.kind(), "element" | "script_element" | "style_element") {
        visit_element(node, src, out);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, src, out);
    }
}

fn line_of(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}

fn visit_element(node: Node, src: &[u8], out: &mut UsageCollector) {
    // The opening tag carries the name and attributes.
    let mut cursor = node.walk();
    let tag_node = match node
        .children(&mut cursor)
        .find(|c| matches!(c.kind(), "start_tag" | "self_closing_tag"))
    {
        Some(n) => n,
        None => return,
    };
    let mut tag = String::new();
    let mut attrs: Vec<(String, Option<String>)> = Vec::new();
    let mut tag_cursor = tag_node.walk();
    for child in tag_node.children(&mut tag_cursor) {
        match child.kind() {
            "tag_name" => {
                if let Ok(text) = child.utf8_text(src) {
                    tag = keys::normalize_keyword(text);
                }
            }
            "attribute" => {
                if let Some(attr) = read_attribute(child, src) {
                    attrs.push(attr);
                }
            }
            _ => {}
        }
    }
    if tag.is_empty() {
        return;
    }

    let line = line_of(node);
    out.push(line, &tag, keys::html_element(&tag));

    for (name, _) in &attrs {
        if let Some(key) = keys::html_global_attribute(name) {
            out.push(line, &tag, key);
        }
    }

    if tag == "input" {
        if let Some((_, Some(value))) = attrs.iter().find(|(name, _)| name == "type") {
            if let Some(key) = keys::html_input_type(value) {
                out.push(line, &tag, key);
            }
        }
    }
}

fn read_attribute(node: Node, src: &[u8]) -> Option<(String, Option<String>)> {
    let mut cursor = node.walk();
    let mut name = None;
    let mut value = None;
    for child in node.children(&mut cursor) {
        match child.kind() {
            "attribute_name" => {
                name = child
                    .utf8_text(src)
                    .ok()
                    .map(keys::normalize_keyword);
            }
            "attribute_value" => {
                value = child.utf8_text(src).ok().map(str::to_string);
            }
            "quoted_attribute_value" => {
                value = find_value(child, src);
            }
            _ => {}
        }
    }
    name.map(|n| (n, value))
}

fn find_value(node: Node, src: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    let value = node
        .children(&mut cursor)
        .find(|c| c.kind() == "attribute_value")
        .and_then(|c| c.utf8_text(src).ok())
        .map(str::to_string);
    value
}
