//! CSS selector generation.
//!
//! Produces a best-effort selector for an element: its id when it has one,
//! otherwise a child-combinator path of at most [`MAX_DEPTH`] segments built
//! while walking up the parent chain. A path segment only carries an
//! `:nth-child()` suffix when a sibling shares its tag, which keeps
//! selectors short. Uniqueness beyond the depth bound is not guaranteed.

use std::fmt::Write;

use domlens_protocols::{Document, NodeRef};

use crate::extract::split_classes;

/// Maximum number of path segments (the element plus its ancestors).
pub const MAX_DEPTH: usize = 6;

/// Maximum number of class names per path segment.
pub const MAX_SEGMENT_CLASSES: usize = 2;

/// Generate a selector for `node`. Returns `None` for non-element nodes.
pub fn generate(doc: &dyn Document, node: NodeRef) -> Option<String> {
    if !doc.is_element(node) {
        return None;
    }

    if let Some(id) = element_id(doc, node) {
        return Some(format!("#{}", css_escape(&id)));
    }

    let mut segments = Vec::with_capacity(MAX_DEPTH);
    let mut current = Some(node);
    while let Some(element) = current {
        if segments.len() == MAX_DEPTH {
            break;
        }
        segments.push(path_segment(doc, element));
        current = doc.parent_element(element);
    }
    segments.reverse();
    Some(segments.join(" > "))
}

fn element_id(doc: &dyn Document, node: NodeRef) -> Option<String> {
    doc.attribute(node, "id")
        .ok()
        .flatten()
        .filter(|id| !id.is_empty())
}

fn path_segment(doc: &dyn Document, element: NodeRef) -> String {
    let tag = tag_of(doc, element);
    let mut segment = tag.clone();

    if let Ok(Some(class_attr)) = doc.attribute(element, "class") {
        for class in split_classes(&class_attr).iter().take(MAX_SEGMENT_CLASSES) {
            segment.push('.');
            segment.push_str(&css_escape(class));
        }
    }

    if let Some(parent) = doc.parent_element(element) {
        let siblings = doc.element_children(parent);
        let same_tag = siblings
            .iter()
            .filter(|&&sibling| tag_of(doc, sibling) == tag)
            .count();
        if same_tag > 1 {
            if let Some(position) = siblings.iter().position(|&sibling| sibling == element) {
                let _ = write!(segment, ":nth-child({})", position + 1);
            }
        }
    }

    segment
}

fn tag_of(doc: &dyn Document, element: NodeRef) -> String {
    doc.tag_name(element)
        .map(|tag| tag.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Serialize a string as a CSS identifier (the CSSOM `CSS.escape` rules).
pub fn css_escape(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len());

    for (index, &c) in chars.iter().enumerate() {
        match c {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => push_code_point(&mut out, c),
            '0'..='9' if index == 0 => push_code_point(&mut out, c),
            '0'..='9' if index == 1 && chars[0] == '-' => push_code_point(&mut out, c),
            '-' if index == 0 && chars.len() == 1 => out.push_str("\\-"),
            c if c >= '\u{80}' || c == '-' || c == '_' || c.is_ascii_alphanumeric() => out.push(c),
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }

    out
}

fn push_code_point(out: &mut String, c: char) {
    let _ = write!(out, "\\{:x} ", c as u32);
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
