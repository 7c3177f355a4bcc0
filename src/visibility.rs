//! Decides whether an element is on screen and not hidden by style.

use std::fmt;

use crate::dom::{Element, Viewport};

/// The first rule an element failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hidden {
    /// Zero width or zero height
    ZeroSize,
    /// Entirely above, below, left or right of the viewport
    OutsideViewport,
    DisplayNone,
    VisibilityHidden,
    /// `opacity` is exactly `"0"`
    Transparent,
}

impl fmt::Display for Hidden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Hidden::ZeroSize => "zero-size box",
            Hidden::OutsideViewport => "outside viewport",
            Hidden::DisplayNone => "display: none",
            Hidden::VisibilityHidden => "visibility: hidden",
            Hidden::Transparent => "opacity: 0",
        };
        f.write_str(reason)
    }
}

/// Check the rules in order and stop at the first failure.
///
/// Partial overlap with the viewport counts as visible, and so does a box
/// touching its edge. Only the element's own computed style is consulted.
pub fn check_visibility(element: &Element, viewport: Viewport) -> Result<(), Hidden> {
    let rect = &element.rect;
    if rect.width == 0.0 || rect.height == 0.0 {
        return Err(Hidden::ZeroSize);
    }

    if rect.bottom < 0.0
        || rect.top > viewport.height
        || rect.right < 0.0
        || rect.left > viewport.width
    {
        return Err(Hidden::OutsideViewport);
    }

    let style = &element.style;
    if style.display == "none" {
        return Err(Hidden::DisplayNone);
    }
    if style.visibility == "hidden" {
        return Err(Hidden::VisibilityHidden);
    }
    if style.opacity == "0" {
        return Err(Hidden::Transparent);
    }

    Ok(())
}

pub fn is_visible(element: &Element, viewport: Viewport) -> bool {
    check_visibility(element, viewport).is_ok()
}

#[cfg(test)]
#[path = "visibility_test.rs"]
mod visibility_test;
