// Unit tests for the page model

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn form_document() -> (Document, NodeId, NodeId) {
    let mut builder = Document::builder(Viewport::new(800.0, 600.0));
    let form = builder.push(Element::new("form"));
    let label = builder.push_child(form, Element::new("label").with_text("Email"));
    let input = builder.push_child(label, Element::new("INPUT").with_attr("id", "email"));
    (builder.build(), label, input)
}

#[test]
fn test_builder_assigns_document_order() {
    let (document, label, input) = form_document();

    assert_eq!(document.len(), 3);
    assert_eq!(label, NodeId(1));
    assert_eq!(input, NodeId(2));
    assert_eq!(document[input].tag, "input");
    assert_eq!(document[input].parent, Some(label));
}

#[test]
fn test_closest_includes_self_and_ancestors() {
    let (document, label, input) = form_document();

    assert_eq!(document.closest(input, "label"), Some(label));
    assert_eq!(document.closest(label, "label"), Some(label));
    assert_eq!(document.closest(input, "form"), Some(NodeId(0)));
    assert_eq!(document.closest(input, "table"), None);
}

#[test]
fn test_ancestors_nearest_first() {
    let (document, _, input) = form_document();

    let tags: Vec<&str> = document
        .ancestors(input)
        .map(|(_, e)| e.tag.as_str())
        .collect();
    assert_eq!(tags, vec!["label", "form"]);
}

#[test]
fn test_label_for_finds_first_match() {
    let mut builder = Document::builder(Viewport::new(800.0, 600.0));
    builder.push(Element::new("label").with_attr("for", "name").with_text("Name"));
    builder.push(Element::new("label").with_attr("for", "name").with_text("Other"));
    builder.push(Element::new("input").with_attr("id", "name"));
    let document = builder.build();

    assert_eq!(document.label_for("name"), Some(NodeId(0)));
    assert_eq!(document.label_for("missing"), None);
}

#[test]
fn test_reflected_properties() {
    let input = Element::new("input");
    assert_eq!(input.element_type(), Some("text"));

    let checkbox = Element::new("input").with_attr("type", "checkbox");
    assert_eq!(checkbox.element_type(), Some("checkbox"));

    assert_eq!(Element::new("button").element_type(), Some("submit"));
    assert_eq!(Element::new("textarea").element_type(), Some("textarea"));
    assert_eq!(Element::new("select").element_type(), Some("select-one"));
    assert_eq!(
        Element::new("select")
            .with_attr("multiple", "")
            .element_type(),
        Some("select-multiple")
    );
    assert_eq!(Element::new("a").element_type(), None);
    assert_eq!(
        Element::new("a").with_attr("type", "Text/HTML").element_type(),
        Some("Text/HTML")
    );
    assert_eq!(Element::new("div").with_attr("type", "x").element_type(), None);

    // alt and placeholder only reflect on the elements that define them
    assert_eq!(Element::new("img").with_attr("alt", "Logo").alt(), Some("Logo"));
    assert_eq!(Element::new("div").with_attr("alt", "Logo").alt(), None);
    assert_eq!(
        Element::new("button").with_attr("placeholder", "x").placeholder(),
        None
    );
    assert_eq!(
        Element::new("div").with_attr("title", "Help").title(),
        Some("Help")
    );
}

#[test]
fn test_empty_id_is_absent() {
    assert_eq!(Element::new("input").with_attr("id", "").id(), None);
    assert_eq!(Element::new("input").with_attr("id", "q").id(), Some("q"));
}

#[test]
fn test_outer_html_fallback_rendering() {
    let button = Element::new("button")
        .with_attr("class", "a\"b")
        .with_text("Save & exit");
    assert_eq!(
        button.outer_html(),
        "<button class=\"a&quot;b\">Save &amp; exit</button>"
    );

    let input = Element::new("input").with_attr("type", "text");
    assert_eq!(input.outer_html(), "<input type=\"text\">");

    let collected = Element::new("p").with_text("x").with_html("<p>x</p>");
    assert_eq!(collected.outer_html(), "<p>x</p>");
}

#[test]
fn test_from_snapshot() {
    let snapshot = json!({
        "viewport": { "width": 1280, "height": 720 },
        "elements": [
            {
                "tag": "DIV",
                "attributes": [["id", "main"]],
                "innerText": "Hello",
                "outerHTML": "<div id=\"main\">Hello</div>",
                "rect": { "top": 0, "left": 0, "bottom": 20, "right": 100, "width": 100, "height": 20 },
                "style": { "display": "block", "visibility": "visible", "opacity": "1" },
                "parent": null
            },
            {
                "tag": "input",
                "value": "abc",
                "parent": 0
            }
        ]
    });

    let document = Document::from_snapshot(snapshot).unwrap();
    assert_eq!(document.viewport(), Viewport::new(1280.0, 720.0));
    assert_eq!(document.len(), 2);
    assert_eq!(document[NodeId(0)].tag, "div");
    assert_eq!(document[NodeId(0)].id(), Some("main"));
    assert_eq!(document[NodeId(1)].value.as_deref(), Some("abc"));
    assert_eq!(document[NodeId(1)].parent, Some(NodeId(0)));
    // Missing style falls back to a visible default
    assert_eq!(document[NodeId(1)].style, ComputedStyle::default());
}

#[test]
fn test_from_snapshot_rejects_forward_parent() {
    let snapshot = json!({
        "viewport": { "width": 100, "height": 100 },
        "elements": [
            { "tag": "span", "parent": 1 },
            { "tag": "div" }
        ]
    });

    let err = Document::from_snapshot(snapshot).unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidParent { node: 0, parent: 1 }));
}

#[test]
fn test_from_snapshot_rejects_malformed_json() {
    let err = Document::from_snapshot(json!({ "elements": [] })).unwrap_err();
    assert!(matches!(err, SnapshotError::Decode(_)));

    let err = Document::from_snapshot(json!({
        "viewport": { "width": -1, "height": 100 }
    }))
    .unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidViewport { .. }));
}

#[test]
fn test_rect_new() {
    let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(rect.left, 10.0);
    assert_eq!(rect.top, 20.0);
    assert_eq!(rect.right, 40.0);
    assert_eq!(rect.bottom, 60.0);
}

#[test]
fn test_type_keywords_are_normalized() {
    let typed = |tag: &str, value: &str| Element::new(tag).with_attr("type", value);

    assert_eq!(typed("input", "CHECKBOX").element_type(), Some("checkbox"));
    assert_eq!(typed("input", "Email").element_type(), Some("email"));
    assert_eq!(typed("input", "bogus").element_type(), Some("text"));
    assert_eq!(typed("button", "Reset").element_type(), Some("reset"));
    assert_eq!(typed("button", "nonsense").element_type(), Some("submit"));
}
