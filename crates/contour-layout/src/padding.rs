//! Inner padding from the space around a group of children.

use contour_tree::{EdgeSizes, Rect};

use crate::config::HeuristicConfig;

/// Distance from the box enclosing all `children` to each edge of
/// `parent`, floored at zero and rounded. `None` without children.
#[must_use]
pub fn estimate_padding(
    parent: &Rect,
    children: &[Rect],
    config: &HeuristicConfig,
) -> Option<EdgeSizes> {
    let content = Rect::enclosing(children)?;
    let side = |distance: f64| config.round(distance.max(0.0));
    Some(EdgeSizes {
        top: side(content.y - parent.y),
        right: side(parent.right() - content.right()),
        bottom: side(parent.bottom() - content.bottom()),
        left: side(content.x - parent.x),
    })
}
