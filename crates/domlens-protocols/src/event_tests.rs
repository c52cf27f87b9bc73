use super::*;

#[test]
fn test_modifier_key_lookup_known_names() {
    assert_eq!(ModifierKey::lookup("Shift"), Some(ModifierKey::Shift));
    assert_eq!(ModifierKey::lookup("shiftKey"), Some(ModifierKey::Shift));
    assert_eq!(ModifierKey::lookup("Ctrl"), Some(ModifierKey::Control));
    assert_eq!(ModifierKey::lookup("control"), Some(ModifierKey::Control));
    assert_eq!(ModifierKey::lookup("Option"), Some(ModifierKey::Alt));
    assert_eq!(ModifierKey::lookup("altKey"), Some(ModifierKey::Alt));
    assert_eq!(ModifierKey::lookup("Cmd"), Some(ModifierKey::Meta));
    assert_eq!(ModifierKey::lookup(" META "), Some(ModifierKey::Meta));
}

#[test]
fn test_modifier_key_lookup_unknown() {
    assert_eq!(ModifierKey::lookup("Hyper"), None);
    assert_eq!(ModifierKey::lookup(""), None);
}

#[test]
fn test_modifier_key_lenient_falls_back_to_shift() {
    assert_eq!(ModifierKey::parse_lenient("CapsLock"), ModifierKey::Shift);
    assert_eq!("Alt".parse::<ModifierKey>().unwrap(), ModifierKey::Alt);
}

#[test]
fn test_modifier_key_serde() {
    let key: ModifierKey = serde_json::from_str("\"ctrlKey\"").unwrap();
    assert_eq!(key, ModifierKey::Control);
    let unknown: ModifierKey = serde_json::from_str("\"fn\"").unwrap();
    assert_eq!(unknown, ModifierKey::Shift);
    assert_eq!(serde_json::to_string(&ModifierKey::Meta).unwrap(), "\"Meta\"");
}

#[test]
fn test_modifiers_is_held() {
    let mods = Modifiers::none().with(ModifierKey::Alt);
    assert!(mods.is_held(ModifierKey::Alt));
    assert!(!mods.is_held(ModifierKey::Shift));
    assert!(!mods.is_held(ModifierKey::Control));
    assert!(!mods.is_held(ModifierKey::Meta));
}

#[test]
fn test_dom_event_kind() {
    let pointer = PointerEvent {
        target: NodeRef::new(1),
        modifiers: Modifiers::none(),
        time_stamp: 10,
    };
    assert_eq!(DomEvent::PointerMove(pointer).kind(), EventKind::PointerMove);
    assert_eq!(DomEvent::Click(pointer).kind(), EventKind::Click);
    assert_eq!(DomEvent::Scroll { time_stamp: 0 }.kind(), EventKind::Scroll);
    assert_eq!(DomEvent::Resize { time_stamp: 0 }.kind(), EventKind::Resize);
}

#[test]
fn test_dom_event_serialization() {
    let event = DomEvent::KeyDown(KeyEvent {
        key: "Escape".to_string(),
        modifiers: Modifiers::default(),
        time_stamp: 5,
    });
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"key_down\""));
    assert!(json.contains("Escape"));
}

#[test]
fn test_event_response_swallow() {
    let response = EventResponse::swallow();
    assert!(response.prevent_default);
    assert!(response.stop_propagation);
    assert_eq!(EventResponse::pass(), EventResponse::default());
}

#[test]
fn test_event_kind_all_is_distinct() {
    let kinds: std::collections::HashSet<_> = EventKind::ALL.iter().collect();
    assert_eq!(kinds.len(), 6);
}
