//! # domlens Headless
//!
//! An in-memory [`Document`](domlens_protocols::Document) host. It keeps an
//! arena node tree with explicit layout rectangles, stores inline styles of
//! the surfaces the inspector creates, and dispatches synthetic events to
//! registered listeners. Tests and the `domlens` CLI drive the inspector
//! through it.

mod document;
mod fixture;
mod tree;

pub use document::{DispatchOutcome, HeadlessDocument};
pub use fixture::{ElementFixture, FixtureError, LoadedPage, PageFixture};
