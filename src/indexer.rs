//! Indexes the visible interactive controls of a page.
//!
//! The document is never written to. Each pass returns its records along
//! with a table from index to [`NodeId`]; the browser layer turns that table
//! into `data-manus-id` markers on the live page so every record's
//! selector finds exactly its element.

use tracing::{debug, trace};

use crate::dom::{Document, Element, NodeId};
use crate::labels::LabelResolver;
use crate::types::InteractiveElement;
use crate::visibility::check_visibility;

pub const MARKER_ATTRIBUTE: &str = "data-manus-id";
const MARKER_PREFIX: &str = "manus-element-";

const INTERACTIVE_TAGS: [&str; 5] = ["button", "a", "input", "textarea", "select"];

/// `manus-element-<index>`
pub fn marker_value(index: usize) -> String {
    format!("{MARKER_PREFIX}{index}")
}

/// `[data-manus-id="manus-element-<index>"]`
pub fn marker_selector(index: usize) -> String {
    format!("[{MARKER_ATTRIBUTE}=\"{}\"]", marker_value(index))
}

/// Matches `button, a, input, textarea, select, [role="button"],
/// [tabindex]:not([tabindex="-1"])`
pub fn is_candidate(element: &Element) -> bool {
    INTERACTIVE_TAGS.contains(&element.tag.as_str())
        || element.attribute("role") == Some("button")
        || element.attribute("tabindex").is_some_and(|t| t != "-1")
}

/// Where one marker goes on the live page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub node: NodeId,
    /// Tag the element had when it was collected
    pub tag: String,
    pub value: String,
}

/// Result of one indexing pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractiveElements {
    records: Vec<InteractiveElement>,
    nodes: Vec<NodeId>,
}

impl InteractiveElements {
    pub fn records(&self) -> &[InteractiveElement] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&InteractiveElement> {
        self.records.get(index)
    }

    /// The element an index was assigned to
    pub fn node(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    /// Markers to write onto the live page, in index order
    pub fn markers(&self) -> Vec<Marker> {
        self.records
            .iter()
            .zip(&self.nodes)
            .map(|(record, node)| Marker {
                node: *node,
                tag: record.tag.clone(),
                value: marker_value(record.index),
            })
            .collect()
    }
}

#[derive(Default)]
pub struct Indexer {
    resolver: LabelResolver,
}

impl Indexer {
    pub fn new(resolver: LabelResolver) -> Self {
        Indexer { resolver }
    }

    /// Label and number every visible candidate in document order.
    ///
    /// Hidden candidates do not consume an index, so indices are always
    /// `0..len` without gaps.
    pub fn capture(&self, document: &Document) -> InteractiveElements {
        let viewport = document.viewport();
        let mut found = InteractiveElements::default();

        for (node, element) in document.iter().filter(|(_, e)| is_candidate(e)) {
            if let Err(reason) = check_visibility(element, viewport) {
                trace!("Skipping <{}> #{}: {}", element.tag, node.0, reason);
                continue;
            }

            let index = found.records.len();
            found.records.push(InteractiveElement {
                index,
                tag: element.tag.clone(),
                text: self.resolver.resolve(document, node),
                selector: marker_selector(index),
            });
            found.nodes.push(node);
        }

        debug!("Indexed {} interactive element(s)", found.len());
        found
    }
}

pub fn capture_interactive_elements(document: &Document) -> InteractiveElements {
    Indexer::default().capture(document)
}

#[cfg(test)]
#[path = "indexer_test.rs"]
mod indexer_test;
