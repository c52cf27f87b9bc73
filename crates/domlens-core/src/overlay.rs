//! Overlay renderer: the highlight box and the tooltip.
//!
//! Both surfaces live inside one container that is created once per bound
//! document. The container is shown while the inspector is enabled and
//! hidden while it is idle. Teardown removes the container and with it
//! everything drawn inside.

use std::sync::Arc;

use tracing::{debug, trace};

use domlens_protocols::{Document, DomError, HighlightStyle, NodeRef, Rect, SurfaceKind, Viewport};

use crate::extract::{label, split_classes, visible_text};
use crate::options::InspectorOptions;

/// Gap between the element and the tooltip.
const TOOLTIP_GAP: f64 = 8.0;
/// Smallest tooltip top before it flips below the element.
const TOOLTIP_MIN_TOP: f64 = 6.0;
const TOOLTIP_RIGHT_MARGIN: f64 = 12.0;
const TOOLTIP_LEFT_MARGIN: f64 = 6.0;
const TOOLTIP_MAX_CLASSES: usize = 3;
const TOOLTIP_MAX_TEXT: usize = 140;

/// Visual settings of the surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySettings {
    pub style: HighlightStyle,
    pub show_tooltip: bool,
    pub z_index: i64,
}

impl From<&InspectorOptions> for OverlaySettings {
    fn from(options: &InspectorOptions) -> Self {
        Self {
            style: options.highlight_style.clone(),
            show_tooltip: options.show_tooltip,
            z_index: options.z_index,
        }
    }
}

/// Result of repositioning over an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepositionOutcome {
    /// The highlight is shown at this (clipped) rectangle.
    Shown(Rect),
    /// The element left the document; both surfaces were hidden.
    Detached,
}

/// Owns the overlay surfaces of one document.
pub struct Overlay {
    doc: Arc<dyn Document>,
    container: NodeRef,
    highlight: NodeRef,
    tooltip: NodeRef,
    settings: OverlaySettings,
}

impl Overlay {
    /// Create the container and both surfaces, hidden, in `doc`.
    pub fn mount(doc: Arc<dyn Document>, settings: OverlaySettings) -> Result<Self, DomError> {
        let container = doc.create_surface(SurfaceKind::Container, None)?;
        let children = doc
            .create_surface(SurfaceKind::Highlight, Some(container))
            .and_then(|highlight| {
                doc.create_surface(SurfaceKind::Tooltip, Some(container))
                    .map(|tooltip| (highlight, tooltip))
            });
        let (highlight, tooltip) = match children {
            Ok(children) => children,
            Err(e) => {
                let _ = doc.remove_node(container);
                return Err(e);
            }
        };

        let overlay = Self {
            doc,
            container,
            highlight,
            tooltip,
            settings,
        };
        overlay.apply_base_styles();
        overlay.apply_visual_styles();
        debug!(
            container = %container,
            highlight = %highlight,
            tooltip = %tooltip,
            "Overlay mounted"
        );
        Ok(overlay)
    }

    pub fn container(&self) -> NodeRef {
        self.container
    }

    pub fn highlight(&self) -> NodeRef {
        self.highlight
    }

    pub fn tooltip(&self) -> NodeRef {
        self.tooltip
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// Whether `node` is one of the overlay's own surfaces.
    pub fn is_surface(&self, node: NodeRef) -> bool {
        node == self.container || node == self.highlight || node == self.tooltip
    }

    /// Whether `node` is a surface or anything drawn inside one, such as
    /// the tooltip's text.
    pub fn owns(&self, node: NodeRef) -> bool {
        let mut current = Some(node);
        while let Some(node) = current {
            if self.is_surface(node) {
                return true;
            }
            current = self.doc.parent_element(node);
        }
        false
    }

    /// Show the container. The highlight and tooltip stay hidden until the
    /// next reposition.
    pub fn show(&self) {
        self.set(self.container, "display", "block");
    }

    /// Hide both surfaces and the container.
    pub fn hide(&self) {
        self.clear();
        self.set(self.container, "display", "none");
    }

    /// Restyle the live surfaces.
    pub fn apply_settings(&mut self, settings: OverlaySettings) {
        let hide_tooltip = self.settings.show_tooltip && !settings.show_tooltip;
        self.settings = settings;
        self.apply_visual_styles();
        if hide_tooltip {
            self.set(self.tooltip, "display", "none");
        }
    }

    /// Move the highlight (and tooltip) over `element`.
    pub fn reposition(&self, element: NodeRef) -> RepositionOutcome {
        let rect = match self.doc.bounding_client_rect(element) {
            Ok(rect) => rect,
            Err(e) => {
                debug!(node = %element, error = %e, "Hovered element is gone");
                self.clear();
                return RepositionOutcome::Detached;
            }
        };

        let shown = rect.clamp_to_origin();
        self.set(self.highlight, "display", "block");
        self.set(self.highlight, "top", &px(shown.top));
        self.set(self.highlight, "left", &px(shown.left));
        self.set(self.highlight, "width", &px(shown.width));
        self.set(self.highlight, "height", &px(shown.height));

        if self.settings.show_tooltip {
            self.place_tooltip(element, &rect);
        } else {
            self.set(self.tooltip, "display", "none");
        }

        RepositionOutcome::Shown(shown)
    }

    /// Hide both surfaces.
    pub fn clear(&self) {
        self.set(self.highlight, "display", "none");
        self.set(self.tooltip, "display", "none");
    }

    /// Remove the container, and the surfaces inside it, from the document.
    pub fn teardown(self) {
        if let Err(e) = self.doc.remove_node(self.container) {
            debug!(node = %self.container, error = %e, "Overlay container already gone");
        }
        debug!("Overlay torn down");
    }

    fn place_tooltip(&self, element: NodeRef, target: &Rect) {
        let text = tooltip_text(self.doc.as_ref(), element);
        if let Err(e) = self.doc.set_text(self.tooltip, &text) {
            debug!(error = %e, "Tooltip text update failed");
        }
        self.set(self.tooltip, "display", "block");

        let tip = self.doc.bounding_client_rect(self.tooltip).unwrap_or_default();
        let (top, left) = tooltip_position(target, tip.width, tip.height, self.doc.viewport());
        self.set(self.tooltip, "top", &px(top));
        self.set(self.tooltip, "left", &px(left));
    }

    fn apply_base_styles(&self) {
        self.set(self.container, "position", "fixed");
        self.set(self.container, "top", "0px");
        self.set(self.container, "left", "0px");
        self.set(self.container, "width", "0px");
        self.set(self.container, "height", "0px");
        for node in [self.container, self.highlight, self.tooltip] {
            self.set(node, "position", "fixed");
            self.set(node, "pointer-events", "none");
            self.set(node, "box-sizing", "border-box");
            self.set(node, "display", "none");
        }
        self.set(self.tooltip, "background", "rgba(17, 24, 39, 0.92)");
        self.set(self.tooltip, "color", "#f9fafb");
        self.set(self.tooltip, "font", "12px/1.4 ui-monospace, SFMono-Regular, Menlo, monospace");
        self.set(self.tooltip, "padding", "3px 8px");
        self.set(self.tooltip, "border-radius", "4px");
        self.set(self.tooltip, "max-width", "360px");
        self.set(self.tooltip, "white-space", "pre-wrap");
    }

    fn apply_visual_styles(&self) {
        let style = &self.settings.style;
        self.set(self.container, "z-index", &self.settings.z_index.to_string());
        self.set(self.highlight, "border", &style.border);
        self.set(self.highlight, "background", &style.background);
        self.set(self.highlight, "border-radius", &style.border_radius);
        self.set(self.highlight, "z-index", &self.settings.z_index.to_string());
        self.set(
            self.tooltip,
            "z-index",
            &self.settings.z_index.saturating_add(1).to_string(),
        );
    }

    fn set(&self, node: NodeRef, property: &str, value: &str) {
        if let Err(e) = self.doc.set_style(node, property, value) {
            trace!(node = %node, property, error = %e, "Style write failed");
        }
    }
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Tooltip label: tag, id, up to three classes, then a text excerpt.
pub(crate) fn tooltip_text(doc: &dyn Document, element: NodeRef) -> String {
    let tag = doc
        .tag_name(element)
        .map(|tag| tag.to_ascii_lowercase())
        .unwrap_or_default();
    let id = doc
        .attribute(element, "id")
        .ok()
        .flatten()
        .filter(|id| !id.is_empty());
    let classes = doc
        .attribute(element, "class")
        .ok()
        .flatten()
        .map(|value| split_classes(&value))
        .unwrap_or_default();

    let mut text = label(&tag, id.as_deref(), &classes, TOOLTIP_MAX_CLASSES);
    let excerpt = excerpt(&visible_text(doc, element), TOOLTIP_MAX_TEXT);
    if !excerpt.is_empty() {
        text.push_str(" \"");
        text.push_str(&excerpt);
        text.push('"');
    }
    text
}

/// Collapse whitespace and cut to at most `max` characters, the last of
/// which marks the cut.
pub(crate) fn excerpt(text: &str, max: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max.saturating_sub(1)).collect();
    cut.push('\u{2026}');
    cut
}

/// Tooltip top/left for a target rectangle and tooltip size.
pub(crate) fn tooltip_position(
    target: &Rect,
    tip_width: f64,
    tip_height: f64,
    viewport: Viewport,
) -> (f64, f64) {
    let mut top = target.top - tip_height - TOOLTIP_GAP;
    if top < TOOLTIP_MIN_TOP {
        top = target.bottom + TOOLTIP_GAP;
    }

    let mut left = target.left;
    let max_left = viewport.width - tip_width - TOOLTIP_RIGHT_MARGIN;
    if left > max_left {
        left = max_left;
    }
    if left < TOOLTIP_LEFT_MARGIN {
        left = TOOLTIP_LEFT_MARGIN;
    }

    (top, left)
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
