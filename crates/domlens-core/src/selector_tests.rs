use domlens_headless::HeadlessDocument;

use super::*;

#[test]
fn test_id_selector_ignores_ancestors() {
    let doc = HeadlessDocument::new();
    let wrapper = doc.create_element(doc.body(), "section").unwrap();
    doc.set_attribute(wrapper, "class", "outer").unwrap();
    let el = doc.create_element(wrapper, "div").unwrap();
    doc.set_attribute(el, "id", "main").unwrap();
    assert_eq!(generate(&doc, el).as_deref(), Some("#main"));
}

#[test]
fn test_id_selector_is_escaped() {
    let doc = HeadlessDocument::new();
    let el = doc.create_element(doc.body(), "div").unwrap();
    doc.set_attribute(el, "id", "1st item").unwrap();
    assert_eq!(generate(&doc, el).as_deref(), Some("#\\31 st\\ item"));
}

#[test]
fn test_empty_id_falls_back_to_path() {
    let doc = HeadlessDocument::new();
    let el = doc.create_element(doc.body(), "span").unwrap();
    doc.set_attribute(el, "id", "").unwrap();
    assert_eq!(generate(&doc, el).as_deref(), Some("html > body > span"));
}

#[test]
fn test_non_element_returns_none() {
    let doc = HeadlessDocument::new();
    let text = doc.append_text(doc.body(), "hello").unwrap();
    let comment = doc.append_comment(doc.body(), "note").unwrap();
    assert_eq!(generate(&doc, text), None);
    assert_eq!(generate(&doc, comment), None);
    assert_eq!(generate(&doc, doc.document_node()), None);
    assert_eq!(generate(&doc, NodeRef::new(9999)), None);
}

#[test]
fn test_nth_child_counts_all_element_children() {
    let doc = HeadlessDocument::new();
    let parent = doc.create_element(doc.body(), "section").unwrap();
    doc.create_element(parent, "p").unwrap();
    doc.append_text(parent, "loose text").unwrap();
    doc.create_element(parent, "div").unwrap();
    let second_div = doc.create_element(parent, "div").unwrap();

    assert_eq!(
        generate(&doc, second_div).as_deref(),
        Some("html > body > section > div:nth-child(3)")
    );
}

#[test]
fn test_no_nth_child_without_same_tag_siblings() {
    let doc = HeadlessDocument::new();
    let parent = doc.create_element(doc.body(), "ul").unwrap();
    doc.create_element(parent, "p").unwrap();
    let li = doc.create_element(parent, "li").unwrap();
    assert_eq!(generate(&doc, li).as_deref(), Some("html > body > ul > li"));
}

#[test]
fn test_classes_limited_to_two() {
    let doc = HeadlessDocument::new();
    let el = doc.create_element(doc.body(), "button").unwrap();
    doc.set_attribute(el, "class", "  btn   primary large ").unwrap();
    assert_eq!(
        generate(&doc, el).as_deref(),
        Some("html > body > button.btn.primary")
    );
}

#[test]
fn test_ancestor_segments_are_disambiguated() {
    let doc = HeadlessDocument::new();
    doc.create_element(doc.body(), "div").unwrap();
    let card = doc.create_element(doc.body(), "div").unwrap();
    doc.set_attribute(card, "class", "card").unwrap();
    let title = doc.create_element(card, "h2").unwrap();
    assert_eq!(
        generate(&doc, title).as_deref(),
        Some("html > body > div.card:nth-child(2) > h2")
    );
}

#[test]
fn test_depth_bounded_to_six_segments() {
    let doc = HeadlessDocument::new();
    let mut current = doc.body();
    for _ in 0..8 {
        current = doc.create_element(current, "div").unwrap();
    }
    let selector = generate(&doc, current).unwrap();
    assert_eq!(selector.split(" > ").count(), MAX_DEPTH);
    assert_eq!(selector, vec!["div"; 6].join(" > "));
}

#[test]
fn test_uppercase_tags_are_lowercased() {
    let doc = HeadlessDocument::new();
    let el = doc.create_element(doc.body(), "SVG").unwrap();
    assert_eq!(generate(&doc, el).as_deref(), Some("html > body > svg"));
}

#[test]
fn test_detached_element_uses_own_segment() {
    let doc = HeadlessDocument::new();
    let el = doc.create_detached_element("aside");
    assert_eq!(generate(&doc, el).as_deref(), Some("aside"));
}

#[test]
fn test_css_escape() {
    assert_eq!(css_escape("plain"), "plain");
    assert_eq!(css_escape("a.b"), "a\\.b");
    assert_eq!(css_escape("1a"), "\\31 a");
    assert_eq!(css_escape("-1"), "-\\31 ");
    assert_eq!(css_escape("-"), "\\-");
    assert_eq!(css_escape("--x"), "--x");
    assert_eq!(css_escape("a\u{0}b"), "a\u{FFFD}b");
    assert_eq!(css_escape("tab\there"), "tab\\9 here");
    assert_eq!(css_escape("caf\u{e9}"), "caf\u{e9}");
    assert_eq!(css_escape("w-[50%]"), "w-\\[50\\%\\]");
}
