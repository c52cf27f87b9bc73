//! Event handlers: pointer movement, clicks, keys, scroll and resize.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, error, trace, warn};

use domlens_protocols::{
    Document, DomEvent, EventResponse, KeyEvent, NodeKind, NodeRef, PointerEvent,
};

use super::inspector_core::{InspectorState, Phase, Shared};
use crate::extract::{extract, ElementInfo};
use crate::options::SelectCallback;
use crate::overlay::RepositionOutcome;

const ESCAPE: &str = "Escape";

impl Shared {
    pub(super) fn handle_event(&self, event: &DomEvent) -> EventResponse {
        match event {
            DomEvent::PointerMove(pointer) => self.on_pointer_move(pointer),
            DomEvent::Click(pointer) => self.on_click(pointer),
            DomEvent::KeyDown(key) => self.on_key_down(key),
            DomEvent::KeyUp(key) => {
                trace!(key = %key.key, "Key released");
                EventResponse::pass()
            }
            DomEvent::Scroll { .. } | DomEvent::Resize { .. } => self.on_layout_change(),
        }
    }

    fn on_pointer_move(&self, event: &PointerEvent) -> EventResponse {
        let mut state = self.state.lock();
        if state.phase != Phase::Enabled {
            return EventResponse::pass();
        }

        let throttle = state.options.hover_throttle_ms;
        if let Some(last) = state.hover.last_move {
            if event.time_stamp >= last && event.time_stamp - last < throttle {
                trace!(time_stamp = event.time_stamp, "Pointer move throttled");
                return EventResponse::pass();
            }
        }
        state.hover.last_move = Some(event.time_stamp);

        if state.owns(event.target) {
            state.hover.element = None;
            if let Some(overlay) = &state.overlay {
                overlay.clear();
            }
            return EventResponse::pass();
        }

        let Some(target) = resolve_target(state.root.as_ref(), event.target) else {
            return EventResponse::pass();
        };
        if state.hover.element == Some(target) {
            return EventResponse::pass();
        }

        state.hover.element = Some(target);
        reposition_hovered(&mut state);
        EventResponse::pass()
    }

    fn on_click(&self, event: &PointerEvent) -> EventResponse {
        let (payload, on_select, auto_disable) = {
            let mut state = self.state.lock();
            if state.phase != Phase::Enabled {
                return EventResponse::pass();
            }
            if state.owns(event.target) {
                trace!("Click on own surface suppressed");
                return EventResponse::swallow();
            }
            let Some(target) = resolve_target(state.root.as_ref(), event.target) else {
                return EventResponse::swallow();
            };

            let multi = event.modifiers.is_held(state.options.multi_select_key);
            let info = extract(state.root.as_ref(), target);
            debug!(
                selector = info.selector.as_deref().unwrap_or("-"),
                multi,
                "Element selected"
            );
            if !multi {
                state.selection.clear();
            }
            state.selection.push(info);

            (
                state.selection.clone(),
                state.on_select.clone(),
                state.options.single_selection && !multi,
            )
        };

        if let Some(on_select) = on_select {
            notify(&on_select, payload);
        }
        if auto_disable {
            self.disable();
        }
        EventResponse::swallow()
    }

    fn on_key_down(&self, event: &KeyEvent) -> EventResponse {
        if event.key == ESCAPE {
            debug!("Escape pressed");
            self.disable();
        }
        EventResponse::pass()
    }

    fn on_layout_change(&self) -> EventResponse {
        let mut state = self.state.lock();
        if state.phase == Phase::Enabled && state.hover.element.is_some() {
            reposition_hovered(&mut state);
        }
        EventResponse::pass()
    }
}

/// Reposition the overlay over the hovered element, forgetting the hover
/// if the element has left the document.
fn reposition_hovered(state: &mut InspectorState) {
    let (Some(element), Some(overlay)) = (state.hover.element, &state.overlay) else {
        return;
    };
    if overlay.reposition(element) == RepositionOutcome::Detached {
        state.hover.element = None;
    }
}

/// Event targets are elements; text targets resolve to their parent
/// element and anything else is ignored.
fn resolve_target(doc: &dyn Document, target: NodeRef) -> Option<NodeRef> {
    match doc.node_kind(target)? {
        NodeKind::Element => Some(target),
        NodeKind::Text => doc.parent_element(target),
        NodeKind::Document | NodeKind::Comment => None,
    }
}

/// Invoke the selection callback, containing its failures.
fn notify(on_select: &SelectCallback, payload: Vec<ElementInfo>) {
    let count = payload.len();
    match catch_unwind(AssertUnwindSafe(|| on_select(payload))) {
        Ok(Ok(())) => trace!(count, "Selection callback returned"),
        Ok(Err(e)) => warn!(error = %e, "Selection callback failed"),
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!(panic = %message, "Selection callback panicked");
        }
    }
}
