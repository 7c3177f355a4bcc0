//! Read-only model of a rendered page.
//!
//! A [`Document`] holds every element under `<body>` in document order,
//! together with the layout and style facts the extraction passes need.
//! It is collected from a live page in one script evaluation (see
//! [`crate::webdriver::Browser::capture_document`]) or assembled by hand
//! with [`DocumentBuilder`].

use std::borrow::Cow;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position of an element in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// Bounding box in viewport coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            top: y,
            left: x,
            bottom: y + height,
            right: x + width,
            width,
            height,
        }
    }
}

/// The subset of computed style that decides visibility.
///
/// Values are kept as the strings the browser reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: String,
    pub opacity: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        ComputedStyle {
            display: "block".to_string(),
            visibility: "visible".to_string(),
            opacity: "1".to_string(),
        }
    }
}

/// Layout viewport (`window.innerWidth` x `window.innerHeight`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }
}

/// Tags whose `type` property reflects the attribute as written
const TYPED_TAGS: [&str; 6] = ["a", "ol", "ul", "li", "source", "embed"];

/// Keywords the `type` attribute of `<input>` accepts
const INPUT_TYPES: [&str; 22] = [
    "button",
    "checkbox",
    "color",
    "date",
    "datetime-local",
    "email",
    "file",
    "hidden",
    "image",
    "month",
    "number",
    "password",
    "radio",
    "range",
    "reset",
    "search",
    "submit",
    "tel",
    "text",
    "time",
    "url",
    "week",
];

const BUTTON_TYPES: [&str; 3] = ["submit", "reset", "button"];

/// The keyword matching `declared` case-insensitively, else `default`
fn enumerated(
    declared: Option<&str>,
    keywords: &[&'static str],
    default: &'static str,
) -> &'static str {
    declared
        .and_then(|value| {
            keywords
                .iter()
                .find(|keyword| keyword.eq_ignore_ascii_case(value.trim()))
        })
        .copied()
        .unwrap_or(default)
}

/// One element as it was at collection time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub tag: String,
    #[serde(default)]
    pub attributes: Vec<(String, String)>,
    /// Live form value; only collected for input, textarea and select
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub inner_text: String,
    #[serde(default, rename = "outerHTML")]
    pub outer_html: String,
    #[serde(default)]
    pub rect: Rect,
    #[serde(default)]
    pub style: ComputedStyle,
    #[serde(default)]
    pub parent: Option<NodeId>,
}

impl Element {
    /// Start an element with no attributes, no text and an empty box
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            value: None,
            inner_text: String::new(),
            outer_html: String::new(),
            rect: Rect::default(),
            style: ComputedStyle::default(),
            parent: None,
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes
            .push((name.to_ascii_lowercase(), value.to_string()));
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.inner_text = text.to_string();
        self
    }

    pub fn with_html(mut self, html: &str) -> Self {
        self.outer_html = html.to_string();
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_style(mut self, display: &str, visibility: &str, opacity: &str) -> Self {
        self.style = ComputedStyle {
            display: display.to_string(),
            visibility: visibility.to_string(),
            opacity: opacity.to_string(),
        };
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Non-empty `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// The `alt` property; only images, image inputs and areas carry one
    pub fn alt(&self) -> Option<&str> {
        match self.tag.as_str() {
            "img" | "input" | "area" => self.attribute("alt"),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.attribute("title")
    }

    /// The `placeholder` property; only text-entry controls carry one
    pub fn placeholder(&self) -> Option<&str> {
        match self.tag.as_str() {
            "input" | "textarea" => self.attribute("placeholder"),
            _ => None,
        }
    }

    /// The `type` property. Inputs and buttons report a lowercase keyword,
    /// falling back to their default for missing or unknown values.
    pub fn element_type(&self) -> Option<&str> {
        let declared = self.attribute("type").filter(|t| !t.is_empty());
        match self.tag.as_str() {
            "input" => Some(enumerated(declared, &INPUT_TYPES, "text")),
            "button" => Some(enumerated(declared, &BUTTON_TYPES, "submit")),
            "textarea" => Some("textarea"),
            "select" if self.has_attribute("multiple") => Some("select-multiple"),
            "select" => Some("select-one"),
            tag if TYPED_TAGS.contains(&tag) => declared,
            _ => None,
        }
    }

    /// Serialized markup. Falls back to a rendering from tag, attributes
    /// and text when the collector did not provide one.
    pub fn outer_html(&self) -> Cow<'_, str> {
        if !self.outer_html.is_empty() {
            return Cow::Borrowed(&self.outer_html);
        }

        let mut html = format!("<{}", self.tag);
        for (name, value) in &self.attributes {
            let _ = write!(html, " {}=\"{}\"", name, escape_attribute(value));
        }
        html.push('>');
        if is_void_element(&self.tag) {
            return Cow::Owned(html);
        }
        html.push_str(&escape_text(&self.inner_text));
        let _ = write!(html, "</{}>", self.tag);
        Cow::Owned(html)
    }
}

fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta" | "source" | "wbr"
    )
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Errors from decoding a collected page snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid page snapshot: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("element {node} names parent {parent}, which does not precede it")]
    InvalidParent { node: usize, parent: usize },
    #[error("viewport must be finite and non-negative, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
}

#[derive(Deserialize)]
struct RawSnapshot {
    viewport: Viewport,
    #[serde(default)]
    elements: Vec<Element>,
}

/// Every element under `<body>`, in document order
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    viewport: Viewport,
    elements: Vec<Element>,
}

impl Document {
    pub fn builder(viewport: Viewport) -> DocumentBuilder {
        DocumentBuilder {
            viewport,
            elements: Vec::new(),
        }
    }

    /// Decode the JSON produced by the page collector script.
    ///
    /// Parents must precede their children; that is what a pre-order
    /// `querySelectorAll("body *")` walk yields.
    pub fn from_snapshot(value: serde_json::Value) -> Result<Self, SnapshotError> {
        let raw: RawSnapshot = serde_json::from_value(value)?;
        let Viewport { width, height } = raw.viewport;
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(SnapshotError::InvalidViewport { width, height });
        }

        let mut elements = raw.elements;
        for (node, element) in elements.iter_mut().enumerate() {
            if let Some(NodeId(parent)) = element.parent
                && parent >= node
            {
                return Err(SnapshotError::InvalidParent { node, parent });
            }
            element.tag.make_ascii_lowercase();
        }

        Ok(Document {
            viewport: raw.viewport,
            elements,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Elements with their ids, in document order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, element)| (NodeId(i), element))
    }

    /// Ancestors of `id`, nearest first, stopping below `<body>`
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Element)> {
        let mut next = self.get(id).and_then(|e| e.parent);
        std::iter::from_fn(move || {
            let current = next?;
            let element = self.get(current)?;
            next = element.parent;
            Some((current, element))
        })
    }

    /// Like `Element.closest(tag)`: the element itself or its nearest
    /// ancestor with the given tag.
    pub fn closest(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let element = self.get(id)?;
        if element.is(tag) {
            return Some(id);
        }
        self.ancestors(id)
            .find(|(_, ancestor)| ancestor.is(tag))
            .map(|(ancestor_id, _)| ancestor_id)
    }

    /// First `<label for="...">` naming the given id
    pub fn label_for(&self, element_id: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, e)| e.is("label") && e.attribute("for") == Some(element_id))
            .map(|(id, _)| id)
    }
}

impl std::ops::Index<NodeId> for Document {
    type Output = Element;

    fn index(&self, id: NodeId) -> &Element {
        &self.elements[id.0]
    }
}

/// Assembles a [`Document`] element by element.
///
/// Push order is document order, so a subtree must be pushed right after
/// its root.
pub struct DocumentBuilder {
    viewport: Viewport,
    elements: Vec<Element>,
}

impl DocumentBuilder {
    /// Add a direct child of `<body>`
    pub fn push(&mut self, element: Element) -> NodeId {
        self.insert(None, element)
    }

    pub fn push_child(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.insert(Some(parent), element)
    }

    fn insert(&mut self, parent: Option<NodeId>, mut element: Element) -> NodeId {
        let id = NodeId(self.elements.len());
        element.parent = parent.filter(|p| p.0 < id.0);
        self.elements.push(element);
        id
    }

    pub fn build(self) -> Document {
        Document {
            viewport: self.viewport,
            elements: self.elements,
        }
    }
}

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;
