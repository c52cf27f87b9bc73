//! Host document trait definition.
//!
//! A host is whatever owns the real node tree: a browser binding, or the
//! in-memory headless document used by tests and the CLI. The inspector only
//! ever sees opaque [`NodeRef`] handles and talks to the tree through
//! [`Document`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomError;
use crate::event::{EventKind, Listener, ListenerId};
use crate::geometry::{Rect, Viewport};

/// Opaque handle to a node owned by the host document.
///
/// The inspector never assumes ownership or lifetime control over the node;
/// a handle may outlive the node it names, in which case queries fail with
/// [`DomError::Detached`] or [`DomError::UnknownNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRef(u64);

impl NodeRef {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a node as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Comment,
}

/// Transient surfaces the inspector draws. The container holds the other
/// two and is shown while the inspector is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Container,
    Highlight,
    Tooltip,
}

impl SurfaceKind {
    /// Marker attribute value hosts may put on the created node.
    pub fn marker(self) -> &'static str {
        match self {
            SurfaceKind::Container => "domlens-overlay",
            SurfaceKind::Highlight => "domlens-highlight",
            SurfaceKind::Tooltip => "domlens-tooltip",
        }
    }
}

/// A same-origin document context the inspector can bind to.
///
/// Implementations must not invoke listeners while holding internal locks
/// that other trait methods take: listeners call back into the document
/// (for example to unregister themselves on `Escape`).
pub trait Document: Send + Sync {
    /// Kind of the node, or `None` when the handle is unknown.
    fn node_kind(&self, node: NodeRef) -> Option<NodeKind>;

    /// Whether the node is an element.
    fn is_element(&self, node: NodeRef) -> bool {
        self.node_kind(node) == Some(NodeKind::Element)
    }

    /// Tag name as stored by the host (any case).
    fn tag_name(&self, node: NodeRef) -> Option<String>;

    /// Attribute names of an element, in document order.
    fn attribute_names(&self, node: NodeRef) -> Result<Vec<String>, DomError>;

    /// Read a single attribute. Individual reads may fail.
    fn attribute(&self, node: NodeRef, name: &str) -> Result<Option<String>, DomError>;

    /// Rendered text, or `None` when the host cannot render the node.
    fn rendered_text(&self, node: NodeRef) -> Option<String>;

    /// Raw concatenated text content of the subtree.
    fn text_content(&self, node: NodeRef) -> Option<String>;

    /// Parent element. `None` at the root element or for detached nodes.
    fn parent_element(&self, node: NodeRef) -> Option<NodeRef>;

    /// Element children of a node, in document order.
    fn element_children(&self, node: NodeRef) -> Vec<NodeRef>;

    /// Viewport-relative bounding rectangle. Fails for detached nodes.
    fn bounding_client_rect(&self, node: NodeRef) -> Result<Rect, DomError>;

    /// Current viewport dimensions.
    fn viewport(&self) -> Viewport;

    /// Create a surface node. With a `parent` (an earlier surface) it is
    /// appended there; otherwise hosts should attach it outside `body` so it
    /// never shifts the position of page elements.
    fn create_surface(
        &self,
        kind: SurfaceKind,
        parent: Option<NodeRef>,
    ) -> Result<NodeRef, DomError>;

    /// Set an inline style property on a node the inspector created.
    fn set_style(&self, node: NodeRef, property: &str, value: &str) -> Result<(), DomError>;

    /// Replace the text of a node the inspector created.
    fn set_text(&self, node: NodeRef, text: &str) -> Result<(), DomError>;

    /// Remove a node from the document.
    fn remove_node(&self, node: NodeRef) -> Result<(), DomError>;

    /// Register a listener for one event kind.
    fn add_event_listener(&self, kind: EventKind, listener: Listener) -> ListenerId;

    /// Unregister a listener. Returns whether it was registered.
    fn remove_event_listener(&self, id: ListenerId) -> bool;
}
