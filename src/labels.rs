//! Display labels for interactive elements.
//!
//! A label comes from the first [`LabelStrategy`] in priority order that
//! yields a non-empty string:
//!
//! 1. [`FormValue`]: the current value of an input, textarea or select
//! 2. [`RenderedText`]: rendered text with whitespace collapsed
//! 3. [`AltText`]
//! 4. [`TitleText`]
//! 5. [`PlaceholderText`]: `[Placeholder: ...]`
//! 6. [`ElementType`]: `[type]`
//!
//! and `[No text]` otherwise. For inputs, the value and type strategies
//! also prepend the associated `<label>` and append the placeholder.
//! Results longer than [`MAX_LABEL_CHARS`] are cut with an ellipsis.

use crate::dom::{Document, Element, NodeId};

pub const MAX_LABEL_CHARS: usize = 100;
const TRUNCATED_CHARS: usize = 97;
const ELLIPSIS: &str = "...";
pub const NO_TEXT: &str = "[No text]";

const FORM_CONTROLS: [&str; 3] = ["input", "textarea", "select"];

/// The element being labeled, with the document around it
#[derive(Clone, Copy)]
pub struct Subject<'a> {
    pub document: &'a Document,
    pub node: NodeId,
    pub element: &'a Element,
}

impl<'a> Subject<'a> {
    pub fn new(document: &'a Document, node: NodeId) -> Option<Self> {
        let element = document.get(node)?;
        Some(Subject {
            document,
            node,
            element,
        })
    }
}

/// One source of label text
pub trait LabelStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` or an empty string means "no opinion, try the next one"
    fn resolve(&self, subject: &Subject<'_>) -> Option<String>;
}

pub struct FormValue;

impl LabelStrategy for FormValue {
    fn name(&self) -> &'static str {
        "value"
    }

    fn resolve(&self, subject: &Subject<'_>) -> Option<String> {
        let element = subject.element;
        if !FORM_CONTROLS.contains(&element.tag.as_str()) {
            return None;
        }
        let value = element.value.as_deref().filter(|v| !v.is_empty())?;

        if element.is("input") {
            Some(augment_input(subject, value.to_string(), Some(value)))
        } else {
            Some(value.to_string())
        }
    }
}

pub struct RenderedText;

impl LabelStrategy for RenderedText {
    fn name(&self) -> &'static str {
        "text"
    }

    fn resolve(&self, subject: &Subject<'_>) -> Option<String> {
        Some(collapse_whitespace(&subject.element.inner_text))
    }
}

pub struct AltText;

impl LabelStrategy for AltText {
    fn name(&self) -> &'static str {
        "alt"
    }

    fn resolve(&self, subject: &Subject<'_>) -> Option<String> {
        subject.element.alt().map(str::to_string)
    }
}

pub struct TitleText;

impl LabelStrategy for TitleText {
    fn name(&self) -> &'static str {
        "title"
    }

    fn resolve(&self, subject: &Subject<'_>) -> Option<String> {
        subject.element.title().map(str::to_string)
    }
}

pub struct PlaceholderText;

impl LabelStrategy for PlaceholderText {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    fn resolve(&self, subject: &Subject<'_>) -> Option<String> {
        let placeholder = subject.element.placeholder().filter(|p| !p.is_empty())?;
        Some(format!("[Placeholder: {placeholder}]"))
    }
}

pub struct ElementType;

impl LabelStrategy for ElementType {
    fn name(&self) -> &'static str {
        "type"
    }

    fn resolve(&self, subject: &Subject<'_>) -> Option<String> {
        let element_type = subject.element.element_type().filter(|t| !t.is_empty())?;
        let text = format!("[{element_type}]");

        if subject.element.is("input") {
            // No value here, so the label text is used as-is
            Some(augment_input(subject, text, None))
        } else {
            Some(text)
        }
    }
}

/// `[Label: ...] text [Placeholder: ...]`, each part only when present
fn augment_input(subject: &Subject<'_>, text: String, value: Option<&str>) -> String {
    let mut text = text;
    if let Some(label) = associated_label(subject, value) {
        text = format!("[Label: {label}] {text}");
    }
    if let Some(placeholder) = subject.element.placeholder().filter(|p| !p.is_empty()) {
        text = format!("{text} [Placeholder: {placeholder}]");
    }
    text
}

/// Text of the `<label for=id>`, or else of the enclosing `<label>`.
///
/// An enclosing label's text contains the control's own value, so the
/// first occurrence of `value` is removed from it.
fn associated_label(subject: &Subject<'_>, value: Option<&str>) -> Option<String> {
    let document = subject.document;

    if let Some(id) = subject.element.id()
        && let Some(label) = document.label_for(id)
    {
        let text = document[label].inner_text.trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }

    let enclosing = document.closest(subject.node, "label")?;
    let text = document[enclosing].inner_text.trim();
    let text = match value {
        Some(value) => text.replacen(value, "", 1).trim().to_string(),
        None => text.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Trim and turn every whitespace run into one space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut to 97 characters plus `...` when longer than 100 characters
pub fn truncate_label(text: String) -> String {
    if text.chars().count() <= MAX_LABEL_CHARS {
        return text;
    }
    let mut truncated: String = text.chars().take(TRUNCATED_CHARS).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Runs the strategies in order; the first non-empty answer wins
pub struct LabelResolver {
    strategies: Vec<Box<dyn LabelStrategy>>,
}

impl Default for LabelResolver {
    fn default() -> Self {
        LabelResolver::new(vec![
            Box::new(FormValue),
            Box::new(RenderedText),
            Box::new(AltText),
            Box::new(TitleText),
            Box::new(PlaceholderText),
            Box::new(ElementType),
        ])
    }
}

impl LabelResolver {
    pub fn new(strategies: Vec<Box<dyn LabelStrategy>>) -> Self {
        LabelResolver { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolved and truncated label for one element
    pub fn resolve(&self, document: &Document, node: NodeId) -> String {
        let Some(subject) = Subject::new(document, node) else {
            return NO_TEXT.to_string();
        };

        let text = self
            .strategies
            .iter()
            .find_map(|strategy| strategy.resolve(&subject).filter(|t| !t.is_empty()))
            .unwrap_or_else(|| NO_TEXT.to_string());

        truncate_label(text)
    }
}

#[cfg(test)]
#[path = "labels_test.rs"]
mod labels_test;
