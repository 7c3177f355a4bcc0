//! Captures what a sighted user currently sees as one HTML fragment.

use std::fmt;

use tracing::{debug, trace};

use crate::dom::{Document, Element};
use crate::visibility::check_visibility;

/// Tags kept even without rendered text
const CONTENT_TAGS: [&str; 3] = ["img", "input", "button"];

/// Serialized markup of visible, content-bearing elements in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleFragment {
    parts: Vec<String>,
}

impl VisibleFragment {
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Parts joined by a single space inside one `<div>`
    pub fn to_html(&self) -> String {
        format!("<div>{}</div>", self.parts.join(" "))
    }
}

impl fmt::Display for VisibleFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn is_content_bearing(element: &Element) -> bool {
    !element.inner_text.is_empty() || CONTENT_TAGS.contains(&element.tag.as_str())
}

/// Walk every element and keep the visible ones that carry content.
///
/// Nothing is deduplicated: a relevant parent and a relevant child both
/// appear, so the child's markup shows up twice.
pub fn capture_visible_content(document: &Document) -> VisibleFragment {
    let viewport = document.viewport();
    let mut parts = Vec::new();

    for (id, element) in document.iter() {
        if let Err(reason) = check_visibility(element, viewport) {
            trace!("Skipping <{}> #{}: {}", element.tag, id.0, reason);
            continue;
        }
        if is_content_bearing(element) {
            parts.push(element.outer_html().into_owned());
        }
    }

    debug!(
        "Captured {} visible content element(s) out of {}",
        parts.len(),
        document.len()
    );
    VisibleFragment { parts }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;
