//! Headless document: a [`Document`] host backed by an in-memory tree.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, trace};

use domlens_protocols::{
    Document, DomError, DomEvent, EventKind, KeyEvent, Listener, ListenerId, Modifiers, NodeKind,
    NodeRef, PointerEvent, Rect, SurfaceKind, Viewport,
};

use crate::tree::{DomTree, ElementData, NodeData};

/// Result of dispatching one event to the registered listeners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    /// Number of listeners invoked.
    pub invoked: usize,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

struct Registration {
    id: ListenerId,
    kind: EventKind,
    listener: Listener,
}

#[derive(Default)]
struct ListenerTable {
    entries: Vec<Registration>,
    next_id: u64,
}

/// In-memory document host.
pub struct HeadlessDocument {
    tree: RwLock<DomTree>,
    listeners: Mutex<ListenerTable>,
    clock: AtomicU64,
    mutations: AtomicU64,
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDocument {
    /// Create an empty document with the default viewport.
    pub fn new() -> Self {
        Self::with_viewport(Viewport::default())
    }

    /// Create an empty document with the given viewport.
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            tree: RwLock::new(DomTree::new(viewport)),
            listeners: Mutex::new(ListenerTable::default()),
            clock: AtomicU64::new(0),
            mutations: AtomicU64::new(0),
        }
    }

    pub fn document_element(&self) -> NodeRef {
        NodeRef::new(self.tree.read().html as u64)
    }

    pub fn body(&self) -> NodeRef {
        NodeRef::new(self.tree.read().body as u64)
    }

    /// The document node itself (not an element).
    pub fn document_node(&self) -> NodeRef {
        NodeRef::new(0)
    }

    // ---- tree construction ----

    /// Append a new element to `parent`.
    pub fn create_element(&self, parent: NodeRef, tag: &str) -> Result<NodeRef, DomError> {
        let mut tree = self.tree.write();
        let parent = tree.index(parent)?;
        let index = tree.push(Some(parent), NodeData::Element(ElementData::new(tag)));
        Ok(NodeRef::new(index as u64))
    }

    /// Create an element that is not part of the document.
    pub fn create_detached_element(&self, tag: &str) -> NodeRef {
        let mut tree = self.tree.write();
        let index = tree.push(None, NodeData::Element(ElementData::new(tag)));
        NodeRef::new(index as u64)
    }

    /// Append a text node to `parent`.
    pub fn append_text(&self, parent: NodeRef, text: &str) -> Result<NodeRef, DomError> {
        let mut tree = self.tree.write();
        let parent = tree.index(parent)?;
        let index = tree.push(Some(parent), NodeData::Text(text.to_string()));
        Ok(NodeRef::new(index as u64))
    }

    /// Append a comment node to `parent`.
    pub fn append_comment(&self, parent: NodeRef, text: &str) -> Result<NodeRef, DomError> {
        let mut tree = self.tree.write();
        let parent = tree.index(parent)?;
        let index = tree.push(Some(parent), NodeData::Comment(text.to_string()));
        Ok(NodeRef::new(index as u64))
    }

    pub fn set_attribute(&self, node: NodeRef, name: &str, value: &str) -> Result<(), DomError> {
        self.tree.write().element_mut(node)?.set_attribute(name, value);
        Ok(())
    }

    /// Make every later read of `name` on `node` fail.
    pub fn make_attribute_unreadable(&self, node: NodeRef, name: &str) -> Result<(), DomError> {
        self.tree
            .write()
            .element_mut(node)?
            .unreadable
            .insert(name.to_string());
        Ok(())
    }

    /// Set the document-relative layout rectangle of an element.
    pub fn set_rect(&self, node: NodeRef, rect: Rect) -> Result<(), DomError> {
        self.tree.write().element_mut(node)?.rect = Some(rect);
        Ok(())
    }

    /// Detach a node (and its subtree) from the document.
    pub fn detach(&self, node: NodeRef) -> Result<(), DomError> {
        let mut tree = self.tree.write();
        let index = tree.index(node)?;
        tree.detach(index);
        debug!(node = %node, "Detached node");
        Ok(())
    }

    // ---- inspection hooks ----

    pub fn is_attached(&self, node: NodeRef) -> bool {
        let tree = self.tree.read();
        tree.index(node).map(|i| tree.is_attached(i)).unwrap_or(false)
    }

    /// Inline style property of a node.
    pub fn style(&self, node: NodeRef, property: &str) -> Option<String> {
        self.tree
            .read()
            .element(node)
            .ok()
            .and_then(|element| element.styles.get(property).cloned())
    }

    /// All child nodes (elements, text and comments), in document order.
    pub fn child_nodes(&self, node: NodeRef) -> Vec<NodeRef> {
        self.tree
            .read()
            .node(node)
            .map(|n| n.children.iter().map(|&child| NodeRef::new(child as u64)).collect())
            .unwrap_or_default()
    }

    /// Number of nodes ever allocated, attached or not.
    pub fn node_count(&self) -> usize {
        self.tree.read().nodes.len()
    }

    /// Attached surfaces, in creation order.
    pub fn surfaces(&self) -> Vec<(NodeRef, SurfaceKind)> {
        let tree = self.tree.read();
        tree.nodes
            .iter()
            .enumerate()
            .filter(|(index, _)| tree.is_attached(*index))
            .filter_map(|(index, node)| match &node.data {
                NodeData::Element(element) => element
                    .surface
                    .map(|kind| (NodeRef::new(index as u64), kind)),
                _ => None,
            })
            .collect()
    }

    /// Number of style/text/remove mutations performed through the
    /// [`Document`] surface API.
    pub fn mutation_count(&self) -> u64 {
        self.mutations.load(Ordering::SeqCst)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .lock()
            .entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.lock().entries.len()
    }

    // ---- clock ----

    /// Current host time in milliseconds.
    pub fn now(&self) -> u64 {
        self.clock.load(Ordering::SeqCst)
    }

    /// Move the clock forward.
    pub fn advance(&self, ms: u64) -> u64 {
        self.clock.fetch_add(ms, Ordering::SeqCst) + ms
    }

    // ---- event dispatch ----

    /// Dispatch an event to every listener registered for its kind.
    ///
    /// The listener table is snapshotted first and no lock is held while a
    /// listener runs. A listener removed by an earlier one in the same
    /// dispatch is skipped.
    pub fn dispatch(&self, event: DomEvent) -> DispatchOutcome {
        let kind = event.kind();
        let snapshot: Vec<(ListenerId, Listener)> = self
            .listeners
            .lock()
            .entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| (entry.id, entry.listener.clone()))
            .collect();

        let mut outcome = DispatchOutcome::default();
        for (id, listener) in snapshot {
            let still_registered = self.listeners.lock().entries.iter().any(|e| e.id == id);
            if !still_registered {
                continue;
            }
            let response = listener(&event);
            outcome.invoked += 1;
            outcome.default_prevented |= response.prevent_default;
            outcome.propagation_stopped |= response.stop_propagation;
        }
        trace!(?kind, invoked = outcome.invoked, "Dispatched event");
        outcome
    }

    pub fn pointer_move(&self, target: NodeRef) -> DispatchOutcome {
        self.pointer_move_with(target, Modifiers::none())
    }

    pub fn pointer_move_with(&self, target: NodeRef, modifiers: Modifiers) -> DispatchOutcome {
        self.dispatch(DomEvent::PointerMove(PointerEvent {
            target,
            modifiers,
            time_stamp: self.now(),
        }))
    }

    pub fn click(&self, target: NodeRef, modifiers: Modifiers) -> DispatchOutcome {
        self.dispatch(DomEvent::Click(PointerEvent {
            target,
            modifiers,
            time_stamp: self.now(),
        }))
    }

    pub fn key_down(&self, key: &str, modifiers: Modifiers) -> DispatchOutcome {
        self.dispatch(DomEvent::KeyDown(KeyEvent {
            key: key.to_string(),
            modifiers,
            time_stamp: self.now(),
        }))
    }

    pub fn key_up(&self, key: &str, modifiers: Modifiers) -> DispatchOutcome {
        self.dispatch(DomEvent::KeyUp(KeyEvent {
            key: key.to_string(),
            modifiers,
            time_stamp: self.now(),
        }))
    }

    /// Scroll the page and dispatch a scroll event.
    pub fn scroll_by(&self, dx: f64, dy: f64) -> DispatchOutcome {
        {
            let mut tree = self.tree.write();
            tree.scroll_x += dx;
            tree.scroll_y += dy;
        }
        self.dispatch(DomEvent::Scroll {
            time_stamp: self.now(),
        })
    }

    /// Resize the viewport and dispatch a resize event.
    pub fn resize(&self, width: f64, height: f64) -> DispatchOutcome {
        self.tree.write().viewport = Viewport { width, height };
        self.dispatch(DomEvent::Resize {
            time_stamp: self.now(),
        })
    }

    fn record_mutation(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

impl Document for HeadlessDocument {
    fn node_kind(&self, node: NodeRef) -> Option<NodeKind> {
        let tree = self.tree.read();
        tree.index(node).ok().map(|index| tree.kind(index))
    }

    fn tag_name(&self, node: NodeRef) -> Option<String> {
        self.tree.read().element(node).ok().map(|e| e.tag.clone())
    }

    fn attribute_names(&self, node: NodeRef) -> Result<Vec<String>, DomError> {
        let tree = self.tree.read();
        let element = tree.element(node)?;
        Ok(element.attributes.iter().map(|(name, _)| name.clone()).collect())
    }

    fn attribute(&self, node: NodeRef, name: &str) -> Result<Option<String>, DomError> {
        let tree = self.tree.read();
        let element = tree.element(node)?;
        if element.unreadable.contains(name) {
            return Err(DomError::AttributeUnreadable {
                node,
                name: name.to_string(),
            });
        }
        Ok(element.get_attribute(name).map(str::to_string))
    }

    fn rendered_text(&self, node: NodeRef) -> Option<String> {
        let tree = self.tree.read();
        let index = tree.index(node).ok()?;
        if !tree.is_attached(index) {
            return None;
        }
        let mut text = String::new();
        tree.collect_text(index, true, &mut text);
        Some(text)
    }

    fn text_content(&self, node: NodeRef) -> Option<String> {
        let tree = self.tree.read();
        let index = tree.index(node).ok()?;
        let mut text = String::new();
        tree.collect_text(index, false, &mut text);
        Some(text)
    }

    fn parent_element(&self, node: NodeRef) -> Option<NodeRef> {
        let tree = self.tree.read();
        let index = tree.index(node).ok()?;
        let parent = tree.nodes[index].parent?;
        tree.is_element(parent).then(|| NodeRef::new(parent as u64))
    }

    fn element_children(&self, node: NodeRef) -> Vec<NodeRef> {
        let tree = self.tree.read();
        match tree.node(node) {
            Ok(n) => n
                .children
                .iter()
                .filter(|&&child| tree.is_element(child))
                .map(|&child| NodeRef::new(child as u64))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn bounding_client_rect(&self, node: NodeRef) -> Result<Rect, DomError> {
        let tree = self.tree.read();
        let index = tree.index(node)?;
        if !tree.is_element(index) {
            return Err(DomError::NotAnElement(node));
        }
        if !tree.is_attached(index) {
            return Err(DomError::Detached(node));
        }
        Ok(tree.layout_rect(index))
    }

    fn viewport(&self) -> Viewport {
        self.tree.read().viewport
    }

    fn create_surface(
        &self,
        kind: SurfaceKind,
        parent: Option<NodeRef>,
    ) -> Result<NodeRef, DomError> {
        let mut tree = self.tree.write();
        let parent = match parent {
            Some(parent) => {
                let index = tree.index(parent)?;
                if !tree.is_element(index) || !tree.is_attached(index) {
                    return Err(DomError::SurfaceFailed(format!(
                        "surface parent {} is not an attached element",
                        parent
                    )));
                }
                index
            }
            None => tree.html,
        };
        if !tree.is_attached(parent) {
            return Err(DomError::SurfaceFailed("document has no root element".to_string()));
        }
        let mut element = ElementData::new("div");
        element.set_attribute("data-domlens", kind.marker());
        element.surface = Some(kind);
        let index = tree.push(Some(parent), NodeData::Element(element));
        debug!(?kind, node = index, "Created surface");
        Ok(NodeRef::new(index as u64))
    }

    fn set_style(&self, node: NodeRef, property: &str, value: &str) -> Result<(), DomError> {
        {
            let mut tree = self.tree.write();
            let element = tree.element_mut(node)?;
            element.styles.insert(property.to_string(), value.to_string());
        }
        self.record_mutation();
        Ok(())
    }

    fn set_text(&self, node: NodeRef, text: &str) -> Result<(), DomError> {
        {
            let mut tree = self.tree.write();
            let index = tree.index(node)?;
            if !tree.is_element(index) {
                return Err(DomError::NotAnElement(node));
            }
            tree.replace_text(index, text);
        }
        self.record_mutation();
        Ok(())
    }

    fn remove_node(&self, node: NodeRef) -> Result<(), DomError> {
        {
            let mut tree = self.tree.write();
            let index = tree.index(node)?;
            tree.detach(index);
        }
        self.record_mutation();
        Ok(())
    }

    fn add_event_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let mut table = self.listeners.lock();
        table.next_id += 1;
        let id = ListenerId(table.next_id);
        table.entries.push(Registration { id, kind, listener });
        trace!(?kind, ?id, "Listener added");
        id
    }

    fn remove_event_listener(&self, id: ListenerId) -> bool {
        let mut table = self.listeners.lock();
        let before = table.entries.len();
        table.entries.retain(|entry| entry.id != id);
        before != table.entries.len()
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
