//! Arena-backed node tree.

use std::collections::{BTreeMap, HashSet};

use domlens_protocols::{DomError, NodeKind, NodeRef, Rect, SurfaceKind, Viewport};

/// Average glyph advance used to size text-only surfaces.
const GLYPH_WIDTH: f64 = 7.0;
const TEXT_PADDING: f64 = 16.0;
const MAX_TEXT_SURFACE_WIDTH: f64 = 360.0;
const LINE_HEIGHT: f64 = 22.0;

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ElementData {
    pub(crate) tag: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) unreadable: HashSet<String>,
    pub(crate) rect: Option<Rect>,
    pub(crate) styles: BTreeMap<String, String>,
    pub(crate) surface: Option<SurfaceKind>,
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) data: NodeData,
}

#[derive(Debug)]
pub(crate) struct DomTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) html: usize,
    pub(crate) body: usize,
    pub(crate) viewport: Viewport,
    pub(crate) scroll_x: f64,
    pub(crate) scroll_y: f64,
}

impl DomTree {
    /// Fresh tree with a `document > html > body` skeleton.
    pub(crate) fn new(viewport: Viewport) -> Self {
        let mut tree = Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
            html: 0,
            body: 0,
            viewport,
            scroll_x: 0.0,
            scroll_y: 0.0,
        };
        tree.html = tree.push(Some(0), NodeData::Element(ElementData::new("html")));
        tree.body = tree.push(Some(tree.html), NodeData::Element(ElementData::new("body")));
        let full = Rect::new(0.0, 0.0, viewport.width, viewport.height);
        tree.set_rect(tree.html, full);
        tree.set_rect(tree.body, full);
        tree
    }

    pub(crate) fn push(&mut self, parent: Option<usize>, data: NodeData) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            data,
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(index);
        }
        index
    }

    pub(crate) fn index(&self, node: NodeRef) -> Result<usize, DomError> {
        let index = node.raw() as usize;
        if index < self.nodes.len() {
            Ok(index)
        } else {
            Err(DomError::UnknownNode(node))
        }
    }

    pub(crate) fn node(&self, node: NodeRef) -> Result<&Node, DomError> {
        let index = self.index(node)?;
        Ok(&self.nodes[index])
    }

    pub(crate) fn element(&self, node: NodeRef) -> Result<&ElementData, DomError> {
        match &self.node(node)?.data {
            NodeData::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(node)),
        }
    }

    pub(crate) fn element_mut(&mut self, node: NodeRef) -> Result<&mut ElementData, DomError> {
        let index = self.index(node)?;
        match &mut self.nodes[index].data {
            NodeData::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(node)),
        }
    }

    pub(crate) fn kind(&self, index: usize) -> NodeKind {
        match self.nodes[index].data {
            NodeData::Document => NodeKind::Document,
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment(_) => NodeKind::Comment,
        }
    }

    pub(crate) fn is_element(&self, index: usize) -> bool {
        matches!(self.nodes[index].data, NodeData::Element(_))
    }

    /// Whether the node is reachable from the document node.
    pub(crate) fn is_attached(&self, index: usize) -> bool {
        let mut current = index;
        loop {
            if current == 0 {
                return true;
            }
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub(crate) fn detach(&mut self, index: usize) {
        if let Some(parent) = self.nodes[index].parent.take() {
            self.nodes[parent].children.retain(|&child| child != index);
        }
    }

    pub(crate) fn set_rect(&mut self, index: usize, rect: Rect) {
        if let NodeData::Element(element) = &mut self.nodes[index].data {
            element.rect = Some(rect);
        }
    }

    /// Concatenated text of the subtree. `skip_hidden` drops subtrees
    /// carrying a `hidden` attribute, like rendered text does.
    pub(crate) fn collect_text(&self, index: usize, skip_hidden: bool, out: &mut String) {
        match &self.nodes[index].data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Comment(_) => {}
            NodeData::Element(element) if skip_hidden && element.has_attribute("hidden") => {}
            NodeData::Element(_) | NodeData::Document => {
                for &child in &self.nodes[index].children {
                    self.collect_text(child, skip_hidden, out);
                }
            }
        }
    }

    /// Replace all children of a node with a single text node. A lone text
    /// child is rewritten in place.
    pub(crate) fn replace_text(&mut self, index: usize, text: &str) {
        if let [child] = self.nodes[index].children[..] {
            if let NodeData::Text(existing) = &mut self.nodes[child].data {
                existing.clear();
                existing.push_str(text);
                return;
            }
        }
        let children = std::mem::take(&mut self.nodes[index].children);
        for child in children {
            self.nodes[child].parent = None;
        }
        self.push(Some(index), NodeData::Text(text.to_string()));
    }

    /// Viewport-relative rectangle of an attached element.
    pub(crate) fn layout_rect(&self, index: usize) -> Rect {
        let element = match &self.nodes[index].data {
            NodeData::Element(element) => element,
            _ => return Rect::default(),
        };
        if element.surface.is_some() {
            return self.surface_rect(index, element);
        }
        element
            .rect
            .map(|rect| rect.scrolled_by(self.scroll_x, self.scroll_y))
            .unwrap_or_default()
    }

    /// Surfaces are fixed-positioned: their rectangle comes from inline
    /// styles, with text-only surfaces sized from their text.
    fn surface_rect(&self, index: usize, element: &ElementData) -> Rect {
        if element.styles.get("display").map(String::as_str) == Some("none") {
            return Rect::default();
        }
        let px = |name: &str| element.styles.get(name).and_then(|v| parse_px(v));
        let mut text = String::new();
        self.collect_text(index, false, &mut text);
        let chars = text.chars().count() as f64;
        let natural_width = (chars * GLYPH_WIDTH + TEXT_PADDING).min(MAX_TEXT_SURFACE_WIDTH);
        let lines = ((chars * GLYPH_WIDTH) / (MAX_TEXT_SURFACE_WIDTH - TEXT_PADDING))
            .ceil()
            .max(1.0);

        Rect::new(
            px("top").unwrap_or(0.0),
            px("left").unwrap_or(0.0),
            px("width").unwrap_or(natural_width),
            px("height").unwrap_or(lines * LINE_HEIGHT),
        )
    }
}

impl ElementData {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }

    pub(crate) fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }
}

fn parse_px(value: &str) -> Option<f64> {
    value.trim().trim_end_matches("px").trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton() {
        let tree = DomTree::new(Viewport::default());
        assert_eq!(tree.nodes.len(), 3);
        assert_eq!(tree.nodes[tree.body].parent, Some(tree.html));
        assert!(tree.is_attached(tree.body));
    }

    #[test]
    fn test_detach_removes_from_parent() {
        let mut tree = DomTree::new(Viewport::default());
        let div = tree.push(Some(tree.body), NodeData::Element(ElementData::new("div")));
        tree.detach(div);
        assert!(!tree.is_attached(div));
        assert!(!tree.nodes[tree.body].children.contains(&div));
    }

    #[test]
    fn test_collect_text_skips_hidden() {
        let mut tree = DomTree::new(Viewport::default());
        let div = tree.push(Some(tree.body), NodeData::Element(ElementData::new("div")));
        tree.push(Some(div), NodeData::Text("shown ".to_string()));
        let mut hidden = ElementData::new("span");
        hidden.set_attribute("hidden", "");
        let span = tree.push(Some(div), NodeData::Element(hidden));
        tree.push(Some(span), NodeData::Text("secret".to_string()));

        let mut rendered = String::new();
        tree.collect_text(div, true, &mut rendered);
        assert_eq!(rendered, "shown ");

        let mut raw = String::new();
        tree.collect_text(div, false, &mut raw);
        assert_eq!(raw, "shown secret");
    }

    #[test]
    fn test_replace_text_reuses_text_child() {
        let mut tree = DomTree::new(Viewport::default());
        let div = tree.push(Some(tree.body), NodeData::Element(ElementData::new("div")));
        tree.replace_text(div, "first");
        let allocated = tree.nodes.len();
        let child = tree.nodes[div].children[0];

        for i in 0..50 {
            tree.replace_text(div, &format!("label {}", i));
        }
        assert_eq!(tree.nodes.len(), allocated);
        assert_eq!(tree.nodes[div].children, vec![child]);

        let mut text = String::new();
        tree.collect_text(div, false, &mut text);
        assert_eq!(text, "label 49");
    }

    #[test]
    fn test_replace_text_drops_element_children() {
        let mut tree = DomTree::new(Viewport::default());
        let div = tree.push(Some(tree.body), NodeData::Element(ElementData::new("div")));
        let span = tree.push(Some(div), NodeData::Element(ElementData::new("span")));
        tree.replace_text(div, "only text");
        assert!(!tree.is_attached(span));
        assert_eq!(tree.nodes[div].children.len(), 1);
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("12px"), Some(12.0));
        assert_eq!(parse_px(" 3.5 "), Some(3.5));
        assert_eq!(parse_px("auto"), None);
    }

    #[test]
    fn test_set_attribute_replaces_existing() {
        let mut element = ElementData::new("a");
        element.set_attribute("href", "/a");
        element.set_attribute("href", "/b");
        assert_eq!(element.attributes.len(), 1);
        assert_eq!(element.get_attribute("href"), Some("/b"));
    }
}
