//! Cross-axis and main-axis alignment of a flowing sibling set.
//!
//! [§ 8 Alignment](https://www.w3.org/TR/css-flexbox-1/#alignment)
//!
//! The keywords produced here map one to one onto `align-items` and
//! `justify-content`. They are inferred from where the children sit inside
//! their parent, not declared.

use contour_tree::{Axis, Rect, within};
use serde::Serialize;
use strum_macros::{AsRefStr, Display};

use crate::config::HeuristicConfig;

/// [§ 8.3 Cross-axis Alignment](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
///
/// "Flex items can be aligned in the cross axis of the current line of the
/// flex container, similar to justify-content but in the perpendicular
/// direction."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
pub enum AlignItems {
    /// `flex-start`
    #[strum(serialize = "flex-start")]
    #[serde(rename = "flex-start")]
    Start,
    /// `center`
    #[strum(serialize = "center")]
    #[serde(rename = "center")]
    Center,
    /// `flex-end`
    #[strum(serialize = "flex-end")]
    #[serde(rename = "flex-end")]
    End,
    /// `stretch`
    #[strum(serialize = "stretch")]
    #[serde(rename = "stretch")]
    Stretch,
    /// `baseline`
    #[strum(serialize = "baseline")]
    #[serde(rename = "baseline")]
    Baseline,
}

/// [§ 8.2 Axis Alignment](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
///
/// "The justify-content property aligns flex items along the main axis of
/// the current line of the flex container."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
pub enum JustifyContent {
    /// `flex-start`
    #[strum(serialize = "flex-start")]
    #[serde(rename = "flex-start")]
    Start,
    /// `center`
    #[strum(serialize = "center")]
    #[serde(rename = "center")]
    Center,
    /// `flex-end`
    #[strum(serialize = "flex-end")]
    #[serde(rename = "flex-end")]
    End,
    /// `space-between`
    #[strum(serialize = "space-between")]
    #[serde(rename = "space-between")]
    SpaceBetween,
}

/// Inferred alignment pair. Either half is absent when there are no
/// children to infer it from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Alignment {
    /// Cross-axis alignment.
    pub align_items: Option<AlignItems>,
    /// Main-axis distribution.
    pub justify_content: Option<JustifyContent>,
}

/// Infer both alignments for children flowing along `main` inside `parent`.
#[must_use]
pub fn classify_alignment(
    main: Axis,
    parent: &Rect,
    children: &[Rect],
    config: &HeuristicConfig,
) -> Alignment {
    Alignment {
        align_items: classify_cross_axis(main, parent, children, config),
        justify_content: classify_main_axis(main, parent, children, config),
    }
}

/// Cross-axis alignment by majority vote.
///
/// Each child votes for the first category it fits: centered (center
/// within `center_tolerance` of the parent's), start or end (edge within
/// `edge_tolerance` of the parent's). A category wins when its votes reach
/// the group's majority share (0.6 of three or more children, 0.5 of fewer);
/// if none does, the plurality wins. Ties go to center, start, end in that
/// order. When no child voted at all the children are `stretch` if all of
/// them fill the parent's cross size, else `flex-start`.
#[must_use]
pub fn classify_cross_axis(
    main: Axis,
    parent: &Rect,
    children: &[Rect],
    config: &HeuristicConfig,
) -> Option<AlignItems> {
    if children.is_empty() {
        return None;
    }
    let cross = main.cross();

    let mut center = 0_usize;
    let mut start = 0_usize;
    let mut end = 0_usize;
    for child in children {
        if within(child.center(cross), parent.center(cross), config.center_tolerance) {
            center += 1;
        } else if within(child.start(cross), parent.start(cross), config.edge_tolerance) {
            start += 1;
        } else if within(child.end(cross), parent.end(cross), config.edge_tolerance) {
            end += 1;
        }
    }

    let tally = [
        (AlignItems::Center, center),
        (AlignItems::Start, start),
        (AlignItems::End, end),
    ];
    let required = children.len() as f64 * config.majority_for(children.len());
    let winner = leader(&tally, required).or_else(|| leader(&tally, 0.0));
    if let Some(align) = winner {
        return Some(align);
    }

    let stretched = children
        .iter()
        .all(|child| within(child.size(cross), parent.size(cross), config.stretch_tolerance));
    Some(if stretched {
        AlignItems::Stretch
    } else {
        AlignItems::Start
    })
}

/// The category with the most votes among those with at least one vote
/// and at least `required` votes. Earlier entries win ties.
fn leader(tally: &[(AlignItems, usize)], required: f64) -> Option<AlignItems> {
    tally
        .iter()
        .filter(|&&(_, votes)| votes > 0 && votes as f64 >= required)
        .fold(None, |best: Option<(AlignItems, usize)>, &entry| match best {
            Some((_, votes)) if votes >= entry.1 => best,
            _ => Some(entry),
        })
        .map(|(align, _)| align)
}

/// Main-axis distribution from the free space before the first and after
/// the last child.
#[must_use]
pub fn classify_main_axis(
    main: Axis,
    parent: &Rect,
    children: &[Rect],
    config: &HeuristicConfig,
) -> Option<JustifyContent> {
    let content = Rect::enclosing(children)?;
    let leading = content.start(main) - parent.start(main);
    let trailing = parent.end(main) - content.end(main);
    let span = content.size(main);
    let available = parent.size(main);

    let justify = match main {
        Axis::Vertical => {
            if span > available * config.content_fill_ratio {
                JustifyContent::Start
            } else if (leading - trailing).abs() < config.symmetry_ratio * (leading + trailing) {
                JustifyContent::Center
            } else {
                lean(leading, trailing, config.vertical_edge_threshold, config)
            }
        }
        Axis::Horizontal => {
            let n = children.len();
            let occupied: f64 = children.iter().map(|c| c.width).sum();
            let uniform = (available - occupied) / (n as f64 + 1.0);
            let evenly_spread = n >= 2
                && within(leading, uniform, config.space_between_tolerance)
                && within(trailing, uniform, config.space_between_tolerance);

            if evenly_spread {
                JustifyContent::SpaceBetween
            } else if span > available * config.content_fill_ratio {
                JustifyContent::Start
            } else if (leading - trailing).abs() < config.horizontal_edge_threshold {
                JustifyContent::Center
            } else {
                lean(leading, trailing, config.horizontal_edge_threshold, config)
            }
        }
    };
    Some(justify)
}

/// Which edge asymmetric content belongs to: the one it nearly touches,
/// else the one it is clearly closer to, else the start.
fn lean(
    leading: f64,
    trailing: f64,
    edge_threshold: f64,
    config: &HeuristicConfig,
) -> JustifyContent {
    if leading < edge_threshold {
        JustifyContent::Start
    } else if trailing < edge_threshold {
        JustifyContent::End
    } else if leading < config.edge_gap_ratio * trailing {
        JustifyContent::Start
    } else if trailing < config.edge_gap_ratio * leading {
        JustifyContent::End
    } else {
        JustifyContent::Start
    }
}
