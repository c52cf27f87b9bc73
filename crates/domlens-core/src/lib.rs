//! # domlens Core
//!
//! Visual element inspector. Highlights the element under the pointer and,
//! on click, extracts structured metadata (tag, id, classes, attributes,
//! text, bounding box and a generated CSS selector) about the chosen
//! element(s).
//!
//! The inspector is bound to a host [`Document`](domlens_protocols::Document)
//! passed in at construction:
//!
//! ```ignore
//! let inspector = Inspector::with_callback(
//!     document,
//!     InspectorOptions::default(),
//!     callback(|selection| {
//!         println!("{}", selection[0].selector.as_deref().unwrap_or("-"));
//!         Ok(())
//!     }),
//! )?;
//! inspector.enable();
//! ```

mod error;
pub mod extract;
mod inspector;
mod options;
pub mod overlay;
pub mod selector;

pub use error::InspectorError;
pub use extract::{extract, ElementInfo};
pub use inspector::{Inspector, Phase};
pub use options::{
    callback, CallbackError, InspectorOptions, OptionsUpdate, SelectCallback, DEFAULT_HOVER_THROTTLE_MS,
    DEFAULT_Z_INDEX,
};
pub use overlay::{Overlay, OverlaySettings, RepositionOutcome};
