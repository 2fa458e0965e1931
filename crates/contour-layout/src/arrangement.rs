//! One-dimensional arrangement of a sibling set.

use contour_tree::{Axis, Rect};
use serde::Serialize;
use strum_macros::{AsRefStr, Display};

use crate::config::HeuristicConfig;

/// How a set of siblings is laid out relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Arrangement {
    /// Stacked top to bottom without (significant) overlap.
    Vertical,
    /// Lined up left to right without (significant) overlap.
    Horizontal,
    /// Neither; overlapping or two-dimensional.
    Complex,
}

impl Arrangement {
    /// The flow axis of a one-dimensional arrangement.
    #[must_use]
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::Vertical => Some(Axis::Vertical),
            Self::Horizontal => Some(Axis::Horizontal),
            Self::Complex => None,
        }
    }
}

/// Classify sibling boxes as vertical, horizontal, or complex.
///
/// Boxes are sorted along each axis in turn; the set is sequential along an
/// axis when every box starts no earlier than the previous one ends, less
/// the overlap tolerance. Vertical wins when both hold. Fewer than two boxes
/// is always complex.
#[must_use]
pub fn detect_arrangement(boxes: &[Rect], config: &HeuristicConfig) -> Arrangement {
    if boxes.len() < 2 {
        return Arrangement::Complex;
    }
    if is_sequential(boxes, Axis::Vertical, config.overlap_tolerance) {
        Arrangement::Vertical
    } else if is_sequential(boxes, Axis::Horizontal, config.overlap_tolerance) {
        Arrangement::Horizontal
    } else {
        Arrangement::Complex
    }
}

/// Copy of `boxes` sorted by leading edge along `axis`. The sort is stable,
/// so boxes starting at the same coordinate keep their sibling order.
#[must_use]
pub fn sorted_along(boxes: &[Rect], axis: Axis) -> Vec<Rect> {
    let mut sorted = boxes.to_vec();
    sorted.sort_by(|a, b| a.start(axis).total_cmp(&b.start(axis)));
    sorted
}

fn is_sequential(boxes: &[Rect], axis: Axis, tolerance: f64) -> bool {
    sorted_along(boxes, axis)
        .windows(2)
        .all(|pair| pair[1].start(axis) >= pair[0].end(axis) - tolerance)
}
