//! Event coordinator.
//!
//! The [`Inspector`] is a small state machine (`Disabled` → `Enabled` →
//! `Disabled` ..., with `Destroyed` terminal). While enabled it holds one
//! listener per event kind on its root document, tracks the hovered element
//! behind a pointer-move throttle, and turns clicks into selections that are
//! delivered to a single callback.

mod inspector_core;
mod inspector_events;

pub use inspector_core::{Inspector, Phase};

#[cfg(test)]
#[path = "inspector_tests.rs"]
mod tests;
