//! Events dispatched by a host document to registered listeners.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::document::NodeRef;

/// Event kinds a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PointerMove,
    Click,
    KeyDown,
    KeyUp,
    Scroll,
    Resize,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::PointerMove,
        EventKind::Click,
        EventKind::KeyDown,
        EventKind::KeyUp,
        EventKind::Scroll,
        EventKind::Resize,
    ];
}

/// Modifier keys held while an event was produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: ModifierKey) -> Self {
        match key {
            ModifierKey::Shift => self.shift = true,
            ModifierKey::Control => self.ctrl = true,
            ModifierKey::Alt => self.alt = true,
            ModifierKey::Meta => self.meta = true,
        }
        self
    }

    /// Whether the given modifier is held.
    pub fn is_held(&self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Shift => self.shift,
            ModifierKey::Control => self.ctrl,
            ModifierKey::Alt => self.alt,
            ModifierKey::Meta => self.meta,
        }
    }
}

/// A modifier key name usable for multi-select.
///
/// Parsing is lenient: unknown names fall back to [`ModifierKey::Shift`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModifierKey {
    #[default]
    Shift,
    Control,
    Alt,
    Meta,
}

impl ModifierKey {
    /// Strict lookup. Returns `None` for names outside the recognized set.
    pub fn lookup(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        let key = match normalized.as_str() {
            "shift" | "shiftkey" => ModifierKey::Shift,
            "ctrl" | "control" | "ctrlkey" => ModifierKey::Control,
            "alt" | "option" | "altkey" => ModifierKey::Alt,
            "meta" | "cmd" | "command" | "super" | "metakey" => ModifierKey::Meta,
            _ => return None,
        };
        Some(key)
    }

    /// Lenient parse: unknown names fall back to Shift with a warning.
    pub fn parse_lenient(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            warn!("Unknown multi-select key {:?}, falling back to Shift", name);
            ModifierKey::Shift
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModifierKey::Shift => "Shift",
            ModifierKey::Control => "Control",
            ModifierKey::Alt => "Alt",
            ModifierKey::Meta => "Meta",
        }
    }
}

impl FromStr for ModifierKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl From<String> for ModifierKey {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<ModifierKey> for String {
    fn from(value: ModifierKey) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pointer event (movement or click).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Topmost node under the pointer.
    pub target: NodeRef,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Host timestamp in milliseconds.
    pub time_stamp: u64,
}

/// Keyboard event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// DOM key value, e.g. `"Escape"` or `"Shift"`.
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    pub time_stamp: u64,
}

/// An event dispatched by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomEvent {
    PointerMove(PointerEvent),
    Click(PointerEvent),
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    Scroll { time_stamp: u64 },
    Resize { time_stamp: u64 },
}

impl DomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomEvent::PointerMove(_) => EventKind::PointerMove,
            DomEvent::Click(_) => EventKind::Click,
            DomEvent::KeyDown(_) => EventKind::KeyDown,
            DomEvent::KeyUp(_) => EventKind::KeyUp,
            DomEvent::Scroll { .. } => EventKind::Scroll,
            DomEvent::Resize { .. } => EventKind::Resize,
        }
    }
}

/// What a listener asks the host to do with the event after it returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResponse {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl EventResponse {
    /// Let the event continue untouched.
    pub fn pass() -> Self {
        Self::default()
    }

    /// Cancel the default action and stop propagation.
    pub fn swallow() -> Self {
        Self {
            prevent_default: true,
            stop_propagation: true,
        }
    }
}

/// Registration handle returned by [`crate::Document::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// A registered event listener.
pub type Listener = Arc<dyn Fn(&DomEvent) -> EventResponse + Send + Sync>;

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
