//! JSON page fixtures.
//!
//! A fixture describes the body content of a headless page as a tree of
//! elements. Elements may carry a `name` so scripts and the CLI can refer
//! to them.
//!
//! ```json
//! {
//!   "viewport": { "width": 1024, "height": 768 },
//!   "body": [
//!     { "name": "title", "tag": "h1", "attributes": { "id": "title" },
//!       "text": "Welcome", "rect": { "top": 20, "left": 20, "width": 400, "height": 40 } }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use domlens_protocols::{DomError, NodeRef, Rect, Viewport};

use crate::document::HeadlessDocument;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid fixture: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate element name: {0}")]
    DuplicateName(String),

    #[error("Unknown element name: {0}")]
    UnknownName(String),

    #[error("Document error: {0}")]
    Dom(#[from] DomError),
}

/// Root of a page fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default)]
    pub viewport: Viewport,

    /// Rectangle of the `body` element; defaults to the viewport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_rect: Option<Rect>,

    #[serde(default)]
    pub body: Vec<ElementFixture>,
}

/// One element of a page fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementFixture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub tag: String,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Text placed before the children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,

    #[serde(default)]
    pub children: Vec<ElementFixture>,
}

/// A document built from a fixture, with its named elements.
pub struct LoadedPage {
    pub document: Arc<HeadlessDocument>,
    names: HashMap<String, NodeRef>,
    order: Vec<String>,
}

impl LoadedPage {
    /// Look up a named element.
    pub fn node(&self, name: &str) -> Result<NodeRef, FixtureError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| FixtureError::UnknownName(name.to_string()))
    }

    /// Named elements in document order.
    pub fn named(&self) -> Vec<(&str, NodeRef)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.names[name]))
            .collect()
    }
}

impl PageFixture {
    pub fn from_json(content: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Build a headless document from this fixture.
    pub fn build(&self) -> Result<LoadedPage, FixtureError> {
        let document = Arc::new(HeadlessDocument::with_viewport(self.viewport));
        if let Some(rect) = self.body_rect {
            document.set_rect(document.body(), rect)?;
        }

        let mut page = LoadedPage {
            document,
            names: HashMap::new(),
            order: Vec::new(),
        };
        let body = page.document.body();
        for element in &self.body {
            build_element(&mut page, body, element)?;
        }
        debug!(named = page.order.len(), "Built page fixture");
        Ok(page)
    }
}

fn build_element(
    page: &mut LoadedPage,
    parent: NodeRef,
    fixture: &ElementFixture,
) -> Result<(), FixtureError> {
    let doc = page.document.clone();
    let node = doc.create_element(parent, &fixture.tag)?;
    for (name, value) in &fixture.attributes {
        doc.set_attribute(node, name, value)?;
    }
    if let Some(text) = &fixture.text {
        doc.append_text(node, text)?;
    }
    if let Some(rect) = fixture.rect {
        doc.set_rect(node, rect)?;
    }
    if let Some(name) = &fixture.name {
        if page.names.insert(name.clone(), node).is_some() {
            return Err(FixtureError::DuplicateName(name.clone()));
        }
        page.order.push(name.clone());
    }
    for child in &fixture.children {
        build_element(page, node, child)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use domlens_protocols::Document;
    use tempfile::NamedTempFile;

    use super::*;

    const PAGE: &str = r#"{
        "viewport": { "width": 800, "height": 600 },
        "body": [
            { "name": "nav", "tag": "nav", "attributes": { "class": "top bar" },
              "children": [
                { "name": "home", "tag": "a", "attributes": { "href": "/" }, "text": "Home" }
              ] },
            { "name": "main", "tag": "main", "attributes": { "id": "main" },
              "rect": { "top": 60, "left": 0, "width": 800, "height": 500 } }
        ]
    }"#;

    #[test]
    fn test_build_named_elements() {
        let page = PageFixture::from_json(PAGE).unwrap().build().unwrap();
        let doc = &page.document;
        let home = page.node("home").unwrap();
        assert_eq!(doc.tag_name(home).as_deref(), Some("a"));
        assert_eq!(doc.text_content(home).as_deref(), Some("Home"));
        assert_eq!(doc.parent_element(home), Some(page.node("nav").unwrap()));
        assert_eq!(doc.viewport().width, 800.0);

        let names: Vec<&str> = page.named().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["nav", "home", "main"]);
    }

    #[test]
    fn test_rect_applied() {
        let page = PageFixture::from_json(PAGE).unwrap().build().unwrap();
        let rect = page
            .document
            .bounding_client_rect(page.node("main").unwrap())
            .unwrap();
        assert_eq!(rect.top, 60.0);
        assert_eq!(rect.bottom, 560.0);
    }

    #[test]
    fn test_unknown_name() {
        let page = PageFixture::default().build().unwrap();
        assert!(matches!(page.node("ghost"), Err(FixtureError::UnknownName(_))));
    }

    #[test]
    fn test_duplicate_name() {
        let json = r#"{ "body": [
            { "name": "x", "tag": "div" },
            { "name": "x", "tag": "div" }
        ] }"#;
        let result = PageFixture::from_json(json).unwrap().build();
        assert!(matches!(result, Err(FixtureError::DuplicateName(_))));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            PageFixture::from_json("{ not json"),
            Err(FixtureError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", PAGE).unwrap();
        let fixture = PageFixture::load(file.path()).unwrap();
        assert_eq!(fixture.body.len(), 2);
    }
}
