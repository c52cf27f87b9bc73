//! Host document errors.

use thiserror::Error;

use crate::document::NodeRef;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("Node {0} is detached from the document")]
    Detached(NodeRef),

    #[error("Node {0} is not an element")]
    NotAnElement(NodeRef),

    #[error("Unknown node: {0}")]
    UnknownNode(NodeRef),

    #[error("Attribute {name} of node {node} could not be read")]
    AttributeUnreadable { node: NodeRef, name: String },

    #[error("Surface operation failed: {0}")]
    SurfaceFailed(String),
}

impl DomError {
    /// Whether the error means the node left the document.
    pub fn is_detached(&self) -> bool {
        matches!(self, DomError::Detached(_) | DomError::UnknownNode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_error() {
        let err = DomError::Detached(NodeRef::new(7));
        assert!(err.to_string().contains("#7"));
        assert!(err.to_string().contains("detached"));
        assert!(err.is_detached());
    }

    #[test]
    fn test_unknown_node_counts_as_detached() {
        assert!(DomError::UnknownNode(NodeRef::new(1)).is_detached());
    }

    #[test]
    fn test_not_an_element_error() {
        let err = DomError::NotAnElement(NodeRef::new(3));
        assert!(err.to_string().contains("not an element"));
        assert!(!err.is_detached());
    }

    #[test]
    fn test_attribute_unreadable_error() {
        let err = DomError::AttributeUnreadable {
            node: NodeRef::new(4),
            name: "data-x".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("data-x"));
        assert!(display.contains("#4"));
    }

    #[test]
    fn test_surface_failed_error() {
        let err = DomError::SurfaceFailed("no body".to_string());
        assert_eq!(err.to_string(), "Surface operation failed: no body");
    }
}
