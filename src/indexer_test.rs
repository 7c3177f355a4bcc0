use super::*;
use crate::dom::{Rect, Viewport};
use pretty_assertions::assert_eq;

fn at(tag: &str, y: f64) -> Element {
    Element::new(tag).with_rect(Rect::new(10.0, y, 120.0, 30.0))
}

fn sample_page() -> Document {
    let mut builder = Document::builder(Viewport::new(1024.0, 768.0));
    let nav = builder.push(at("nav", 0.0).with_text("Home Sign in"));
    builder.push_child(nav, at("a", 0.0).with_attr("href", "/").with_text("Home"));
    // Scrolled out of view
    builder.push_child(nav, at("a", 2000.0).with_attr("href", "/far").with_text("Far"));
    builder.push_child(nav, at("button", 40.0).with_text("Sign in"));
    builder.push(at("div", 80.0).with_attr("tabindex", "-1").with_text("Not focusable"));
    builder.push(at("div", 120.0).with_attr("tabindex", "0").with_text("Card"));
    builder.push(
        at("input", 160.0)
            .with_attr("placeholder", "Search")
            .with_style("none", "visible", "1"),
    );
    builder.push(at("span", 200.0).with_attr("role", "button").with_text("Menu"));
    builder.push(at("p", 240.0).with_text("Plain text"));
    builder.build()
}

#[test]
fn test_indices_are_contiguous_in_document_order() {
    let found = capture_interactive_elements(&sample_page());
    let summary: Vec<(usize, &str, &str)> = found
        .records()
        .iter()
        .map(|r| (r.index, r.tag.as_str(), r.text.as_str()))
        .collect();

    assert_eq!(
        summary,
        vec![
            (0, "a", "Home"),
            (1, "button", "Sign in"),
            (2, "div", "Card"),
            (3, "span", "Menu"),
        ]
    );
}

#[test]
fn test_selectors_and_node_table() {
    let found = capture_interactive_elements(&sample_page());

    assert_eq!(found.len(), 4);
    assert_eq!(
        found.get(0).unwrap().selector,
        "[data-manus-id=\"manus-element-0\"]"
    );
    assert_eq!(found.node(0), Some(NodeId(1)));
    assert_eq!(found.node(1), Some(NodeId(3)));
    assert_eq!(found.node(2), Some(NodeId(5)));
    assert_eq!(found.node(3), Some(NodeId(7)));
    assert_eq!(found.node(4), None);

    let markers: Vec<(NodeId, String)> = found
        .markers()
        .into_iter()
        .map(|marker| (marker.node, marker.value))
        .collect();
    assert_eq!(
        markers,
        vec![
            (NodeId(1), "manus-element-0".to_string()),
            (NodeId(3), "manus-element-1".to_string()),
            (NodeId(5), "manus-element-2".to_string()),
            (NodeId(7), "manus-element-3".to_string()),
        ]
    );

    // Each marker carries the tag its element was collected with
    for (marker, record) in found.markers().iter().zip(found.records()) {
        assert_eq!(marker.tag, record.tag);
    }
}

#[test]
fn test_repeated_capture_is_stable() {
    let document = sample_page();
    let first = capture_interactive_elements(&document);
    let second = capture_interactive_elements(&document);
    assert_eq!(first, second);
}

#[test]
fn test_candidates() {
    for tag in ["button", "a", "input", "textarea", "select"] {
        assert!(is_candidate(&Element::new(tag)), "{tag} should be a candidate");
    }
    assert!(is_candidate(&Element::new("div").with_attr("role", "button")));
    assert!(is_candidate(&Element::new("li").with_attr("tabindex", "0")));
    assert!(is_candidate(&Element::new("li").with_attr("tabindex", "3")));
    assert!(!is_candidate(&Element::new("li").with_attr("tabindex", "-1")));
    assert!(!is_candidate(&Element::new("div").with_attr("role", "link")));
    assert!(!is_candidate(&Element::new("label")));
}

#[test]
fn test_empty_document() {
    let document = Document::builder(Viewport::new(800.0, 600.0)).build();
    let found = capture_interactive_elements(&document);
    assert!(found.is_empty());
    assert!(found.markers().is_empty());
}

#[test]
fn test_form_labels_flow_into_records() {
    let mut builder = Document::builder(Viewport::new(800.0, 600.0));
    builder.push(at("label", 0.0).with_attr("for", "tos").with_text("Accept terms"));
    builder.push(
        at("input", 40.0)
            .with_attr("id", "tos")
            .with_attr("type", "checkbox"),
    );
    builder.push(at("input", 80.0).with_value("Ada").with_attr("placeholder", "Name"));
    let found = capture_interactive_elements(&builder.build());

    let texts: Vec<&str> = found.records().iter().map(|r| r.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["[Label: Accept terms] [checkbox]", "Ada [Placeholder: Name]"]
    );
}

#[test]
fn test_marker_helpers() {
    assert_eq!(marker_value(7), "manus-element-7");
    assert_eq!(marker_selector(7), "[data-manus-id=\"manus-element-7\"]");
}
