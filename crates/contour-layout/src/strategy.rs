//! Per-node layout strategy selection.
//!
//! Each node is decided from its own geometry, its children's boxes, and
//! the decision already made for its parent. Nothing else is consulted, so
//! a single top-down pass decides the whole tree.

use contour_tree::{
    AutoLayout, Axis, Constraints, CounterAxisAlign, DesignTree, EdgeSizes, LayoutMode, NodeId,
    PrimaryAxisAlign, within,
};
use serde::Serialize;
use strum_macros::{AsRefStr, Display};

use crate::alignment::{AlignItems, JustifyContent, classify_alignment};
use crate::arrangement::{Arrangement, detect_arrangement};
use crate::config::HeuristicConfig;
use crate::containment::is_decorative;
use crate::gap::estimate_gap;
use crate::grid::{GridTemplate, detect_grid};
use crate::padding::estimate_padding;

/// How a node lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    /// Children are placed by explicit offsets.
    Absolute,
    /// Children flow along one axis.
    Flexbox,
    /// Children fill the cells of a grid.
    Grid,
    /// Normal flow; used for leaves.
    Static,
}

/// [§ 5.1 Flex Flow Direction](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    /// `row`: main axis is horizontal.
    Row,
    /// `column`: main axis is vertical.
    Column,
}

impl FlowDirection {
    /// The direction whose main axis is `axis`.
    #[must_use]
    pub const fn along(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::Row,
            Axis::Vertical => Self::Column,
        }
    }

    /// The main axis.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Row => Axis::Horizontal,
            Self::Column => Axis::Vertical,
        }
    }
}

/// How a node positions itself inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// The root of the conversion.
    Root,
    /// Positioned by the parent's flow, flex or grid algorithm.
    Flow,
    /// Positioned by offsets from the parent's origin.
    Absolute,
}

/// Everything the emitter needs to know about one node's layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutDecision {
    /// How children are laid out.
    pub strategy: LayoutStrategy,
    /// Flex direction (flexbox only).
    pub direction: Option<FlowDirection>,
    /// Spacing between flex items.
    pub gap: Option<f64>,
    /// Inner padding.
    pub padding: Option<EdgeSizes>,
    /// Cross-axis alignment.
    pub align_items: Option<AlignItems>,
    /// Main-axis distribution.
    pub justify_content: Option<JustifyContent>,
    /// Grid tracks (grid only).
    pub grid: Option<GridTemplate>,
    /// Arrangement detected among the children, when there were enough
    /// boxed children to classify.
    pub arrangement: Option<Arrangement>,
    /// Whether the flex values were declared by the designer rather than
    /// inferred.
    pub declared: bool,
    /// How the node positions itself inside its parent.
    pub placement: Placement,
    /// Whether the node is a decorative element.
    pub decorative: bool,
    /// Absolutely placed node to be centered horizontally in its parent.
    pub center_horizontally: bool,
    /// Resize constraints to apply after positioning.
    pub constraints: Option<Constraints>,
    /// Whether some child is absolutely placed against this node, which
    /// then has to be its containing block.
    pub positions_children: bool,
}

impl LayoutDecision {
    /// A decision with only the strategy set.
    #[must_use]
    pub const fn new(strategy: LayoutStrategy) -> Self {
        Self {
            strategy,
            direction: None,
            gap: None,
            padding: None,
            align_items: None,
            justify_content: None,
            grid: None,
            arrangement: None,
            declared: false,
            placement: Placement::Flow,
            decorative: false,
            center_horizontally: false,
            constraints: None,
            positions_children: false,
        }
    }

    /// Flexbox decision carrying the designer's auto-layout values verbatim.
    #[must_use]
    pub fn declared(auto: &AutoLayout) -> Self {
        let direction = if auto.mode == LayoutMode::Horizontal {
            FlowDirection::Row
        } else {
            FlowDirection::Column
        };
        Self {
            direction: Some(direction),
            gap: Some(auto.item_spacing),
            padding: Some(auto.padding),
            align_items: Some(match auto.counter_align {
                CounterAxisAlign::Min => AlignItems::Start,
                CounterAxisAlign::Center => AlignItems::Center,
                CounterAxisAlign::Max => AlignItems::End,
                CounterAxisAlign::Baseline => AlignItems::Baseline,
            }),
            justify_content: Some(match auto.primary_align {
                PrimaryAxisAlign::Min => JustifyContent::Start,
                PrimaryAxisAlign::Center => JustifyContent::Center,
                PrimaryAxisAlign::Max => JustifyContent::End,
                PrimaryAxisAlign::SpaceBetween => JustifyContent::SpaceBetween,
            }),
            declared: true,
            ..Self::new(LayoutStrategy::Flexbox)
        }
    }
}

/// The strategy a node would get on its own, before any parent-dependent
/// override.
///
/// In order of precedence:
///
/// 1. no usable bounding box: static leaf;
/// 2. declared auto-layout: flexbox with the declared values;
/// 3. two or more boxed children stacked along one axis: flexbox with
///    estimated gap, padding and alignment;
/// 4. two or more boxed children forming a regular matrix: grid;
/// 5. any children: absolute;
/// 6. otherwise: static leaf.
#[must_use]
pub fn naive_layout(tree: &DesignTree, id: NodeId, config: &HeuristicConfig) -> LayoutDecision {
    let node = &tree[id];
    let Some(bounds) = node.bounds else {
        return LayoutDecision::new(LayoutStrategy::Static);
    };
    if let Some(auto) = &node.auto_layout {
        return LayoutDecision::declared(auto);
    }

    let children = tree.child_bounds(id);
    let mut arrangement = None;
    if children.len() >= 2 {
        let detected = detect_arrangement(&children, config);
        arrangement = Some(detected);

        if let Some(axis) = detected.axis() {
            let alignment = classify_alignment(axis, &bounds, &children, config);
            return LayoutDecision {
                direction: Some(FlowDirection::along(axis)),
                gap: Some(estimate_gap(&children, axis, config)),
                padding: estimate_padding(&bounds, &children, config),
                align_items: alignment.align_items,
                justify_content: alignment.justify_content,
                arrangement,
                ..LayoutDecision::new(LayoutStrategy::Flexbox)
            };
        }

        if let Some(grid) = detect_grid(&children, config) {
            return LayoutDecision {
                padding: estimate_padding(&bounds, &children, config),
                grid: Some(grid),
                arrangement,
                ..LayoutDecision::new(LayoutStrategy::Grid)
            };
        }
    }

    let strategy = if tree.children(id).is_empty() {
        LayoutStrategy::Static
    } else {
        LayoutStrategy::Absolute
    };
    LayoutDecision {
        arrangement,
        ..LayoutDecision::new(strategy)
    }
}

/// Decide a node's layout given its parent's decision (`None` for the
/// root of the conversion).
///
/// A decorative node that would lay its children out absolutely inside a
/// flexbox parent is downgraded to static, so the flex algorithm positions
/// it instead of offsets that only existed for lack of layout metadata.
#[must_use]
pub fn select_layout(
    tree: &DesignTree,
    id: NodeId,
    parent: Option<(NodeId, &LayoutDecision)>,
    config: &HeuristicConfig,
) -> LayoutDecision {
    let node = &tree[id];
    let mut decision = naive_layout(tree, id, config);
    decision.decorative = is_decorative(node, config);
    decision.constraints = node.constraints;

    let parent_strategy = parent.map(|(_, d)| d.strategy);
    if decision.decorative
        && decision.strategy == LayoutStrategy::Absolute
        && parent_strategy == Some(LayoutStrategy::Flexbox)
    {
        log::debug!("{}: decorative node inside flexbox parent, using static", node.id);
        decision.strategy = LayoutStrategy::Static;
    }

    decision.placement = match parent_strategy {
        None => Placement::Root,
        Some(LayoutStrategy::Absolute) => Placement::Absolute,
        Some(_) if decision.strategy == LayoutStrategy::Absolute => Placement::Absolute,
        Some(_) => Placement::Flow,
    };

    if decision.placement == Placement::Absolute {
        let parent_bounds = parent.and_then(|(parent_id, _)| tree[parent_id].bounds);
        if let (Some(bounds), Some(parent_bounds)) = (node.bounds, parent_bounds) {
            decision.center_horizontally = decision.decorative
                || within(
                    bounds.center_x(),
                    parent_bounds.center_x(),
                    config.near_center_tolerance,
                );
        }
    }

    log::trace!(
        "{}: {} ({} placement)",
        node.id,
        decision.strategy,
        decision.placement
    );
    decision
}
