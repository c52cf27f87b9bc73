//! Inspector options and partial updates.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use domlens_protocols::{Document, HighlightStyle, HighlightStyleOverrides, ModifierKey};

use crate::extract::ElementInfo;

/// Default overlay layer, one below the largest 32-bit z-index.
pub const DEFAULT_Z_INDEX: i64 = 2_147_483_646;

/// Default minimum interval between processed pointer moves (~60/s).
pub const DEFAULT_HOVER_THROTTLE_MS: u64 = 16;

/// Error a selection callback may return. It is logged, never propagated.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Selection callback. Receives a copy of the full selection list.
pub type SelectCallback = Arc<dyn Fn(Vec<ElementInfo>) -> Result<(), CallbackError> + Send + Sync>;

/// Wrap a closure as a [`SelectCallback`].
pub fn callback<F>(f: F) -> SelectCallback
where
    F: Fn(Vec<ElementInfo>) -> Result<(), CallbackError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Inspector options. The root document and the callback are passed
/// separately since they are not serializable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorOptions {
    #[serde(default)]
    pub highlight_style: HighlightStyle,

    #[serde(default = "default_true")]
    pub show_tooltip: bool,

    #[serde(default = "default_true")]
    pub single_selection: bool,

    #[serde(default)]
    pub multi_select_key: ModifierKey,

    #[serde(default = "default_z_index")]
    pub z_index: i64,

    #[serde(default = "default_hover_throttle_ms")]
    pub hover_throttle_ms: u64,
}

impl Default for InspectorOptions {
    fn default() -> Self {
        Self {
            highlight_style: HighlightStyle::default(),
            show_tooltip: true,
            single_selection: true,
            multi_select_key: ModifierKey::Shift,
            z_index: DEFAULT_Z_INDEX,
            hover_throttle_ms: DEFAULT_HOVER_THROTTLE_MS,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_z_index() -> i64 {
    DEFAULT_Z_INDEX
}

fn default_hover_throttle_ms() -> u64 {
    DEFAULT_HOVER_THROTTLE_MS
}

impl InspectorOptions {
    /// Merge the plain option fields of an update. Returns whether any
    /// field that affects the overlay surfaces changed.
    pub(crate) fn merge(&mut self, update: &OptionsUpdate) -> bool {
        let before = (self.highlight_style.clone(), self.show_tooltip, self.z_index);

        if let Some(overrides) = &update.highlight_style {
            self.highlight_style.merge(overrides.clone());
        }
        if let Some(show_tooltip) = update.show_tooltip {
            self.show_tooltip = show_tooltip;
        }
        if let Some(single_selection) = update.single_selection {
            self.single_selection = single_selection;
        }
        if let Some(key) = update.multi_select_key {
            self.multi_select_key = key;
        }
        if let Some(z_index) = update.z_index {
            self.z_index = z_index;
        }
        if let Some(throttle) = update.hover_throttle_ms {
            self.hover_throttle_ms = throttle;
        }

        before != (self.highlight_style.clone(), self.show_tooltip, self.z_index)
    }
}

/// Partial reconfiguration applied by `Inspector::set_options`.
#[derive(Clone, Default)]
pub struct OptionsUpdate {
    pub root: Option<Arc<dyn Document>>,
    /// `Some(None)` removes the callback.
    pub on_select: Option<Option<SelectCallback>>,
    pub highlight_style: Option<HighlightStyleOverrides>,
    pub show_tooltip: Option<bool>,
    pub single_selection: Option<bool>,
    pub multi_select_key: Option<ModifierKey>,
    pub z_index: Option<i64>,
    pub hover_throttle_ms: Option<u64>,
}

impl OptionsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: Arc<dyn Document>) -> Self {
        self.root = Some(root);
        self
    }

    pub fn on_select(mut self, callback: SelectCallback) -> Self {
        self.on_select = Some(Some(callback));
        self
    }

    pub fn clear_on_select(mut self) -> Self {
        self.on_select = Some(None);
        self
    }

    pub fn highlight_style(mut self, overrides: HighlightStyleOverrides) -> Self {
        self.highlight_style = Some(overrides);
        self
    }

    pub fn show_tooltip(mut self, show: bool) -> Self {
        self.show_tooltip = Some(show);
        self
    }

    pub fn single_selection(mut self, single: bool) -> Self {
        self.single_selection = Some(single);
        self
    }

    /// Set the multi-select key by name; unknown names fall back to Shift.
    pub fn multi_select_key(mut self, name: &str) -> Self {
        self.multi_select_key = Some(ModifierKey::parse_lenient(name));
        self
    }

    pub fn z_index(mut self, z_index: i64) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn hover_throttle_ms(mut self, ms: u64) -> Self {
        self.hover_throttle_ms = Some(ms);
        self
    }
}

impl fmt::Debug for OptionsUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsUpdate")
            .field("root", &self.root.as_ref().map(|_| "<document>"))
            .field("on_select", &self.on_select.as_ref().map(|cb| cb.is_some()))
            .field("highlight_style", &self.highlight_style)
            .field("show_tooltip", &self.show_tooltip)
            .field("single_selection", &self.single_selection)
            .field("multi_select_key", &self.multi_select_key)
            .field("z_index", &self.z_index)
            .field("hover_throttle_ms", &self.hover_throttle_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = InspectorOptions::default();
        assert!(options.show_tooltip);
        assert!(options.single_selection);
        assert_eq!(options.multi_select_key, ModifierKey::Shift);
        assert_eq!(options.z_index, 2_147_483_646);
        assert_eq!(options.hover_throttle_ms, 16);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let options: InspectorOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, InspectorOptions::default());
    }

    #[test]
    fn test_deserialize_unknown_key_falls_back() {
        let options: InspectorOptions =
            serde_json::from_str(r#"{"multi_select_key":"Hyper"}"#).unwrap();
        assert_eq!(options.multi_select_key, ModifierKey::Shift);
    }

    #[test]
    fn test_merge_reports_surface_changes() {
        let mut options = InspectorOptions::default();
        assert!(!options.merge(&OptionsUpdate::new().single_selection(false)));
        assert!(!options.single_selection);

        assert!(options.merge(&OptionsUpdate::new().z_index(10)));
        assert_eq!(options.z_index, 10);

        let overrides = HighlightStyleOverrides {
            background: Some("pink".to_string()),
            ..Default::default()
        };
        assert!(options.merge(&OptionsUpdate::new().highlight_style(overrides)));
        assert_eq!(options.highlight_style.background, "pink");
    }

    #[test]
    fn test_merge_multi_select_key_by_name() {
        let mut options = InspectorOptions::default();
        options.merge(&OptionsUpdate::new().multi_select_key("Ctrl"));
        assert_eq!(options.multi_select_key, ModifierKey::Control);
        options.merge(&OptionsUpdate::new().multi_select_key("Banana"));
        assert_eq!(options.multi_select_key, ModifierKey::Shift);
    }

    #[test]
    fn test_update_debug_hides_document() {
        let update = OptionsUpdate::new().clear_on_select().show_tooltip(false);
        let debug = format!("{:?}", update);
        assert!(debug.contains("show_tooltip: Some(false)"));
        assert!(debug.contains("on_select: Some(false)"));
    }
}
