//! Element metadata extraction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use domlens_protocols::{Document, NodeRef, Rect};

use crate::selector;

/// Immutable snapshot of a selected element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementInfo {
    /// Lowercase tag name.
    pub tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Class names in attribute order.
    #[serde(default)]
    pub classes: Vec<String>,

    /// Trimmed visible text.
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// `None` when the rectangle could not be read (e.g. detached node).
    pub bounding_client_rect: Option<Rect>,

    pub selector: Option<String>,

    /// Handle of the originating element. The host owns the node.
    pub element: NodeRef,
}

impl ElementInfo {
    /// Short label like `a#home.nav.link`.
    pub fn label(&self) -> String {
        label(&self.tag, self.id.as_deref(), &self.classes, usize::MAX)
    }
}

/// Extract metadata from an element. Never fails: any field whose read
/// fails degrades to its empty value.
pub fn extract(doc: &dyn Document, element: NodeRef) -> ElementInfo {
    let tag = doc
        .tag_name(element)
        .map(|tag| tag.to_ascii_lowercase())
        .unwrap_or_default();

    let id = read_attribute(doc, element, "id").filter(|id| !id.is_empty());
    let classes = read_attribute(doc, element, "class")
        .map(|value| split_classes(&value))
        .unwrap_or_default();

    let bounding_client_rect = match doc.bounding_client_rect(element) {
        Ok(rect) => Some(rect),
        Err(e) => {
            debug!(node = %element, error = %e, "Bounding rect unavailable");
            None
        }
    };

    ElementInfo {
        tag,
        id,
        classes,
        text: visible_text(doc, element),
        attributes: read_attributes(doc, element),
        bounding_client_rect,
        selector: selector::generate(doc, element),
        element,
    }
}

fn read_attribute(doc: &dyn Document, element: NodeRef, name: &str) -> Option<String> {
    match doc.attribute(element, name) {
        Ok(value) => value,
        Err(e) => {
            debug!(node = %element, attribute = name, error = %e, "Attribute read failed");
            None
        }
    }
}

fn read_attributes(doc: &dyn Document, element: NodeRef) -> BTreeMap<String, String> {
    let names = match doc.attribute_names(element) {
        Ok(names) => names,
        Err(e) => {
            debug!(node = %element, error = %e, "Attribute names unavailable");
            return BTreeMap::new();
        }
    };

    names
        .into_iter()
        .filter_map(|name| {
            let value = read_attribute(doc, element, &name)?;
            Some((name, value))
        })
        .collect()
}

/// Split a class attribute on whitespace, dropping empty entries.
pub(crate) fn split_classes(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

/// Rendered text when available, raw text content otherwise, trimmed.
pub(crate) fn visible_text(doc: &dyn Document, element: NodeRef) -> String {
    doc.rendered_text(element)
        .or_else(|| doc.text_content(element))
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

pub(crate) fn label(tag: &str, id: Option<&str>, classes: &[String], max_classes: usize) -> String {
    let mut label = tag.to_string();
    if let Some(id) = id {
        label.push('#');
        label.push_str(id);
    }
    for class in classes.iter().take(max_classes) {
        label.push('.');
        label.push_str(class);
    }
    label
}

#[cfg(test)]
mod tests {
    use domlens_headless::HeadlessDocument;

    use super::*;

    fn sample(doc: &HeadlessDocument) -> NodeRef {
        let el = doc.create_element(doc.body(), "A").unwrap();
        doc.set_attribute(el, "id", "home").unwrap();
        doc.set_attribute(el, "class", " nav  link ").unwrap();
        doc.set_attribute(el, "href", "/").unwrap();
        doc.append_text(el, "  Home page \n").unwrap();
        doc.set_rect(el, Rect::new(10.0, 20.0, 80.0, 16.0)).unwrap();
        el
    }

    #[test]
    fn test_extract_full_record() {
        let doc = HeadlessDocument::new();
        let el = sample(&doc);
        let info = extract(&doc, el);

        assert_eq!(info.tag, "a");
        assert_eq!(info.id.as_deref(), Some("home"));
        assert_eq!(info.classes, vec!["nav", "link"]);
        assert_eq!(info.text, "Home page");
        assert_eq!(info.attributes.get("href").map(String::as_str), Some("/"));
        assert_eq!(info.attributes.len(), 3);
        assert_eq!(info.bounding_client_rect, Some(Rect::new(10.0, 20.0, 80.0, 16.0)));
        assert_eq!(info.selector.as_deref(), Some("#home"));
        assert_eq!(info.element, el);
        assert_eq!(info.label(), "a#home.nav.link");
    }

    #[test]
    fn test_unreadable_attribute_is_skipped() {
        let doc = HeadlessDocument::new();
        let el = sample(&doc);
        doc.make_attribute_unreadable(el, "href").unwrap();
        let info = extract(&doc, el);
        assert!(!info.attributes.contains_key("href"));
        assert!(info.attributes.contains_key("class"));
    }

    #[test]
    fn test_unreadable_id_degrades_to_none() {
        let doc = HeadlessDocument::new();
        let el = sample(&doc);
        doc.make_attribute_unreadable(el, "id").unwrap();
        let info = extract(&doc, el);
        assert_eq!(info.id, None);
        assert_eq!(info.selector.as_deref(), Some("html > body > a.nav.link"));
    }

    #[test]
    fn test_detached_element_degrades() {
        let doc = HeadlessDocument::new();
        let el = sample(&doc);
        doc.detach(el).unwrap();
        let info = extract(&doc, el);
        assert_eq!(info.bounding_client_rect, None);
        // rendered text is unavailable, raw text content is used instead
        assert_eq!(info.text, "Home page");
        assert_eq!(info.tag, "a");
    }

    #[test]
    fn test_rendered_text_preferred() {
        let doc = HeadlessDocument::new();
        let el = doc.create_element(doc.body(), "p").unwrap();
        doc.append_text(el, "visible").unwrap();
        let hidden = doc.create_element(el, "span").unwrap();
        doc.set_attribute(hidden, "hidden", "").unwrap();
        doc.append_text(hidden, " hidden").unwrap();
        assert_eq!(extract(&doc, el).text, "visible");
    }

    #[test]
    fn test_unknown_node_never_panics() {
        let doc = HeadlessDocument::new();
        let info = extract(&doc, NodeRef::new(4242));
        assert_eq!(info.tag, "");
        assert!(info.classes.is_empty());
        assert!(info.attributes.is_empty());
        assert_eq!(info.selector, None);
        assert_eq!(info.bounding_client_rect, None);
    }

    #[test]
    fn test_split_classes() {
        assert_eq!(split_classes(" a\tb \n c "), vec!["a", "b", "c"]);
        assert!(split_classes("   ").is_empty());
    }

    #[test]
    fn test_serialization_shape() {
        let doc = HeadlessDocument::new();
        let info = extract(&doc, sample(&doc));
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["tag"], "a");
        assert_eq!(json["bounding_client_rect"]["right"], 100.0);
        assert_eq!(json["element"], info.element.raw());
    }
}
