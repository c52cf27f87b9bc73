//! Inspector struct definition, construction and lifecycle transitions.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use domlens_protocols::{Document, DomEvent, EventKind, EventResponse, Listener, ListenerId, NodeRef};

use crate::error::InspectorError;
use crate::extract::ElementInfo;
use crate::options::{InspectorOptions, OptionsUpdate, SelectCallback};
use crate::overlay::{Overlay, OverlaySettings};

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disabled,
    Enabled,
    Destroyed,
}

/// Hovered element and the time of the last processed pointer move.
#[derive(Debug, Default)]
pub(super) struct HoverState {
    pub(super) element: Option<NodeRef>,
    pub(super) last_move: Option<u64>,
}

impl HoverState {
    pub(super) fn reset(&mut self) {
        self.element = None;
        self.last_move = None;
    }
}

pub(super) struct InspectorState {
    pub(super) phase: Phase,
    pub(super) root: Arc<dyn Document>,
    pub(super) options: InspectorOptions,
    pub(super) on_select: Option<SelectCallback>,
    pub(super) overlay: Option<Overlay>,
    pub(super) listeners: Vec<ListenerId>,
    pub(super) selection: Vec<ElementInfo>,
    pub(super) hover: HoverState,
}

impl InspectorState {
    /// Whether `node` belongs to the overlay, surfaces and their content alike.
    pub(super) fn owns(&self, node: NodeRef) -> bool {
        self.overlay
            .as_ref()
            .map(|overlay| overlay.owns(node))
            .unwrap_or(false)
    }

    /// Unregister listeners, hide the overlay and forget the hover.
    pub(super) fn deactivate(&mut self) {
        for id in self.listeners.drain(..) {
            self.root.remove_event_listener(id);
        }
        if let Some(overlay) = &self.overlay {
            overlay.hide();
        }
        self.hover.reset();
        self.phase = Phase::Disabled;
    }
}

pub(super) struct Shared {
    pub(super) state: Mutex<InspectorState>,
}

/// Visual element inspector bound to one document.
///
/// Cloning yields another handle to the same inspector. Call
/// [`Inspector::destroy`] to release listeners and surfaces; dropping the
/// last handle leaves inert listeners behind until the host drops them.
#[derive(Clone)]
pub struct Inspector {
    pub(super) shared: Arc<Shared>,
}

impl Inspector {
    /// Create a disabled inspector bound to `root`.
    pub fn new(root: Arc<dyn Document>, options: InspectorOptions) -> Result<Self, InspectorError> {
        Self::build(root, options, None)
    }

    /// Create a disabled inspector with a selection callback.
    pub fn with_callback(
        root: Arc<dyn Document>,
        options: InspectorOptions,
        on_select: SelectCallback,
    ) -> Result<Self, InspectorError> {
        Self::build(root, options, Some(on_select))
    }

    fn build(
        root: Arc<dyn Document>,
        options: InspectorOptions,
        on_select: Option<SelectCallback>,
    ) -> Result<Self, InspectorError> {
        let overlay = Overlay::mount(root.clone(), OverlaySettings::from(&options))?;
        let state = InspectorState {
            phase: Phase::Disabled,
            root,
            options,
            on_select,
            overlay: Some(overlay),
            listeners: Vec::new(),
            selection: Vec::new(),
            hover: HoverState::default(),
        };
        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
            }),
        })
    }

    pub fn phase(&self) -> Phase {
        self.shared.state.lock().phase
    }

    pub fn is_enabled(&self) -> bool {
        self.phase() == Phase::Enabled
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase() == Phase::Destroyed
    }

    /// Current options (without root and callback).
    pub fn options(&self) -> InspectorOptions {
        self.shared.state.lock().options.clone()
    }

    /// Start listening. No-op when already enabled.
    pub fn enable(&self) {
        self.shared.enable();
    }

    /// Stop listening and hide the overlay. No-op when already disabled.
    pub fn disable(&self) {
        self.shared.disable();
    }

    /// Flip between enabled and disabled.
    pub fn toggle(&self) {
        match self.phase() {
            Phase::Enabled => self.disable(),
            Phase::Disabled => self.enable(),
            Phase::Destroyed => warn!("toggle() called on a destroyed inspector"),
        }
    }

    /// Release listeners and surfaces, drop the callback and the selection.
    /// Terminal.
    pub fn destroy(&self) {
        let mut state = self.shared.state.lock();
        if state.phase == Phase::Destroyed {
            return;
        }
        state.deactivate();
        if let Some(overlay) = state.overlay.take() {
            overlay.teardown();
        }
        state.on_select = None;
        state.selection.clear();
        state.phase = Phase::Destroyed;
        info!("Inspector destroyed");
    }

    /// Copy of the current selection list.
    pub fn get_selected(&self) -> Vec<ElementInfo> {
        self.shared.state.lock().selection.clone()
    }

    /// Merge a partial configuration.
    ///
    /// A different root document rebinds the inspector: it is disabled, its
    /// surfaces are removed from the old document and recreated in the new
    /// one, and it is re-enabled if it was enabled before.
    pub fn set_options(&self, update: OptionsUpdate) -> Result<(), InspectorError> {
        let reenable = {
            let mut state = self.shared.state.lock();
            if state.phase == Phase::Destroyed {
                warn!("set_options() called on a destroyed inspector");
                return Ok(());
            }

            let surfaces_changed = state.options.merge(&update);
            if let Some(on_select) = update.on_select {
                state.on_select = on_select;
            }

            match update.root {
                Some(root) if !same_document(&root, &state.root) => {
                    let was_enabled = state.phase == Phase::Enabled;
                    state.deactivate();
                    if let Some(overlay) = state.overlay.take() {
                        overlay.teardown();
                    }
                    state.root = root.clone();
                    let settings = OverlaySettings::from(&state.options);
                    state.overlay = Some(Overlay::mount(root, settings)?);
                    debug!(was_enabled, "Inspector rebound to a new document");
                    was_enabled
                }
                _ => {
                    if surfaces_changed {
                        let settings = OverlaySettings::from(&state.options);
                        if let Some(overlay) = state.overlay.as_mut() {
                            overlay.apply_settings(settings);
                        }
                    }
                    false
                }
            }
        };

        if reenable {
            self.enable();
        }
        Ok(())
    }
}

impl Shared {
    pub(super) fn enable(self: &Arc<Self>) {
        let mut state = self.state.lock();
        match state.phase {
            Phase::Enabled => return,
            Phase::Destroyed => {
                warn!("enable() called on a destroyed inspector");
                return;
            }
            Phase::Disabled => {}
        }

        let weak = Arc::downgrade(self);
        let root = state.root.clone();
        state.listeners = EventKind::ALL
            .iter()
            .map(|&kind| root.add_event_listener(kind, listener_for(weak.clone())))
            .collect();
        if let Some(overlay) = &state.overlay {
            overlay.show();
        }
        state.phase = Phase::Enabled;
        debug!(listeners = state.listeners.len(), "Inspector enabled");
    }

    pub(super) fn disable(&self) {
        let mut state = self.state.lock();
        if state.phase != Phase::Enabled {
            return;
        }
        state.deactivate();
        debug!("Inspector disabled");
    }
}

fn listener_for(weak: Weak<Shared>) -> Listener {
    Arc::new(move |event: &DomEvent| match weak.upgrade() {
        Some(shared) => shared.handle_event(event),
        None => EventResponse::pass(),
    })
}

fn same_document(a: &Arc<dyn Document>, b: &Arc<dyn Document>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
