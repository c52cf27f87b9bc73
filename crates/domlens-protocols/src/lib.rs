//! # domlens Protocols
//!
//! Protocol definitions shared by the inspector and its hosts.
//! Contains only interfaces and plain data types - no inspector logic.
//!
//! ## Core Items
//!
//! - [`Document`] - Trait a host document context implements
//! - [`NodeRef`] - Opaque handle to a node owned by the host
//! - [`DomEvent`] - Input/layout events the host dispatches to listeners
//! - [`Rect`] - Viewport-relative bounding rectangle

pub mod document;
pub mod error;
pub mod event;
pub mod geometry;
pub mod style;

pub use document::{Document, NodeKind, NodeRef, SurfaceKind};
pub use error::DomError;
pub use event::{
    DomEvent, EventKind, EventResponse, KeyEvent, Listener, ListenerId, ModifierKey, Modifiers,
    PointerEvent,
};
pub use geometry::{Rect, Viewport};
pub use style::{HighlightStyle, HighlightStyleOverrides};
