//! Layout property emission.
//!
//! [§ 9.3 Positioning schemes](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme)
//!
//! Turns one node's [`LayoutDecision`] into an ordered list of CSS layout
//! declarations. Emission is a pure function of the decision, the node's
//! box, and its parent's decision and box; it never looks further up or
//! down the tree.

use std::fmt;

use contour_tree::{Axis, ConstraintKind, EdgeSizes, Rect};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::HeuristicConfig;
use crate::grid::GridTemplate;
use crate::strategy::{LayoutDecision, LayoutStrategy, Placement};

/// Ordered CSS declarations for one node.
///
/// Declaration order is emission order; setting an existing property
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutProperties {
    declarations: Vec<(&'static str, String)>,
}

impl LayoutProperties {
    /// An empty declaration list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Set `name` to `value`, replacing any earlier value.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.declarations.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.declarations.push((name, value)),
        }
    }

    /// Remove `name`, returning its value if it was set.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.declarations.iter().position(|(n, _)| *n == name)?;
        Some(self.declarations.remove(index).1)
    }

    /// The value of `name`, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether `name` is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Declarations in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.declarations
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl fmt::Display for LayoutProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}: {value};")?;
        }
        Ok(())
    }
}

impl Serialize for LayoutProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// What the emitter needs to know about a node's parent.
#[derive(Debug, Clone, Copy)]
pub struct ParentContext<'a> {
    /// The parent's decision.
    pub decision: &'a LayoutDecision,
    /// The parent's box, if it has one.
    pub bounds: Option<Rect>,
}

/// Pending `translate` components, composed into one `transform` at the
/// end so the two axes never overwrite each other.
#[derive(Debug, Clone, Copy, Default)]
struct Centering {
    x: bool,
    y: bool,
}

impl Centering {
    const fn set(&mut self, axis: Axis, on: bool) {
        match axis {
            Axis::Horizontal => self.x = on,
            Axis::Vertical => self.y = on,
        }
    }

    const fn transform(self) -> Option<&'static str> {
        match (self.x, self.y) {
            (true, true) => Some("translate(-50%, -50%)"),
            (true, false) => Some("translateX(-50%)"),
            (false, true) => Some("translateY(-50%)"),
            (false, false) => None,
        }
    }
}

/// Emit the layout declarations for one node.
///
/// Order of emission: positioning, box size, container properties, then
/// resize-constraint overrides, then the composed `transform`.
#[must_use]
pub fn emit_properties(
    decision: &LayoutDecision,
    bounds: Option<&Rect>,
    parent: Option<ParentContext<'_>>,
    config: &HeuristicConfig,
) -> LayoutProperties {
    let mut props = LayoutProperties::new();
    let mut centering = Centering::default();
    let parent_bounds = parent.and_then(|p| p.bounds);

    match decision.placement {
        Placement::Root => {
            if decision.strategy == LayoutStrategy::Absolute {
                props.set("position", "relative");
                props.set("overflow", "hidden");
            } else if decision.positions_children {
                props.set("position", "relative");
            }
        }
        Placement::Absolute => {
            props.set("position", "absolute");
            if let (Some(bounds), Some(parent_bounds)) = (bounds, parent_bounds.as_ref()) {
                let (left, top) = bounds.offset_from(parent_bounds);
                if decision.center_horizontally {
                    props.set("left", "50%");
                    centering.x = true;
                } else {
                    props.set("left", px(left, config));
                }
                props.set("top", px(top, config));
            }
        }
        Placement::Flow => {
            // Absolutely placed children measure left/top from this box.
            if decision.positions_children {
                props.set("position", "relative");
            }
            if parent.is_some_and(|p| p.decision.strategy == LayoutStrategy::Flexbox) {
                props.set("flex-shrink", "0");
            }
        }
    }

    if let Some(bounds) = bounds {
        props.set("width", px(bounds.width, config));
        props.set("height", px(bounds.height, config));
    }

    match decision.strategy {
        LayoutStrategy::Flexbox => emit_flex(decision, &mut props, config),
        LayoutStrategy::Grid => emit_grid(decision, &mut props, config),
        LayoutStrategy::Absolute | LayoutStrategy::Static => {}
    }

    // Constraints only move absolutely placed boxes.
    let constraints = decision
        .constraints
        .filter(|_| decision.placement == Placement::Absolute);
    if let (Some(constraints), Some(bounds), Some(parent_bounds)) =
        (constraints, bounds, parent_bounds.as_ref())
    {
        for (axis, kind) in [
            (Axis::Horizontal, constraints.horizontal),
            (Axis::Vertical, constraints.vertical),
        ] {
            apply_constraint(
                axis,
                kind,
                bounds,
                parent_bounds,
                &mut props,
                &mut centering,
                config,
            );
        }
    }

    if let Some(transform) = centering.transform() {
        props.set("transform", transform);
    }
    props
}

/// [§ 5 Ordering and Orientation](https://www.w3.org/TR/css-flexbox-1/#flow-order)
fn emit_flex(decision: &LayoutDecision, props: &mut LayoutProperties, config: &HeuristicConfig) {
    props.set("display", "flex");
    if let Some(direction) = decision.direction {
        props.set("flex-direction", direction.as_ref());
    }
    if let Some(gap) = decision.gap.map(|g| config.round(g)).filter(|g| *g > 0.0) {
        props.set("gap", px(gap, config));
    }
    if let Some(padding) = decision.padding.as_ref().and_then(|p| padding_shorthand(p, config)) {
        props.set("padding", padding);
    }
    if let Some(align) = decision.align_items {
        props.set("align-items", align.as_ref());
    }
    if let Some(justify) = decision.justify_content {
        props.set("justify-content", justify.as_ref());
    }
}

/// [§ 7.2 Explicit Track Sizing](https://www.w3.org/TR/css-grid-1/#track-sizing)
fn emit_grid(decision: &LayoutDecision, props: &mut LayoutProperties, config: &HeuristicConfig) {
    props.set("display", "grid");
    if let Some(grid) = &decision.grid {
        if let Some(columns) = grid_columns(grid, config) {
            props.set("grid-template-columns", columns);
        }
        let column_gap = config.round(grid.column_gap);
        if column_gap > 0.0 {
            props.set("column-gap", px(column_gap, config));
        }
        let row_gap = config.round(grid.row_gap);
        if row_gap > 0.0 {
            props.set("row-gap", px(row_gap, config));
        }
    }
    if let Some(padding) = decision.padding.as_ref().and_then(|p| padding_shorthand(p, config)) {
        props.set("padding", padding);
    }
}

/// `repeat(n, W)` for equal tracks, else the explicit track list.
#[must_use]
pub fn grid_columns(grid: &GridTemplate, config: &HeuristicConfig) -> Option<String> {
    let first = *grid.columns.first()?;
    if grid.is_uniform() {
        return Some(format!("repeat({}, {})", grid.columns.len(), px(first, config)));
    }
    Some(
        grid.columns
            .iter()
            .map(|width| px(*width, config))
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// [§ 8.4 Padding shorthand](https://www.w3.org/TR/CSS2/box.html#propdef-padding)
///
/// "If there is only one component value, it applies to all sides. If
/// there are two values, the top and bottom paddings are set to the first
/// value and the right and left paddings are set to the second."
///
/// Returns `None` when every side is zero.
#[must_use]
pub fn padding_shorthand(padding: &EdgeSizes, config: &HeuristicConfig) -> Option<String> {
    let EdgeSizes {
        top,
        right,
        bottom,
        left,
    } = *padding;
    let (top, right, bottom, left) = (
        config.round(top),
        config.round(right),
        config.round(bottom),
        config.round(left),
    );
    if top == 0.0 && right == 0.0 && bottom == 0.0 && left == 0.0 {
        return None;
    }
    let value = if top == right && right == bottom && bottom == left {
        px(top, config)
    } else if top == bottom && right == left {
        format!("{} {}", px(top, config), px(right, config))
    } else {
        format!(
            "{} {} {} {}",
            px(top, config),
            px(right, config),
            px(bottom, config),
            px(left, config)
        )
    };
    Some(value)
}

/// Rewrite one axis of an absolutely placed box for its resize constraint.
///
/// Each axis touches only its own edge and size properties and its own
/// half of the centering transform.
fn apply_constraint(
    axis: Axis,
    kind: ConstraintKind,
    bounds: &Rect,
    parent: &Rect,
    props: &mut LayoutProperties,
    centering: &mut Centering,
    config: &HeuristicConfig,
) {
    let (start, end, size) = match axis {
        Axis::Horizontal => ("left", "right", "width"),
        Axis::Vertical => ("top", "bottom", "height"),
    };
    let leading = bounds.start(axis) - parent.start(axis);
    let trailing = parent.end(axis) - bounds.end(axis);

    match kind {
        ConstraintKind::Start => {}
        ConstraintKind::End => {
            let _ = props.remove(start);
            props.set(end, px(trailing, config));
            centering.set(axis, false);
        }
        ConstraintKind::Center => {
            props.set(start, "50%");
            centering.set(axis, true);
        }
        ConstraintKind::Stretch => {
            props.set(start, px(leading, config));
            props.set(end, px(trailing, config));
            let _ = props.remove(size);
            centering.set(axis, false);
        }
        ConstraintKind::Scale => {
            let extent = parent.size(axis);
            if extent > 0.0 {
                props.set(start, percent(leading / extent, config));
                props.set(size, percent(bounds.size(axis) / extent, config));
                centering.set(axis, false);
            }
        }
    }
}

/// A length in CSS pixels; zero is written unitless.
#[must_use]
pub fn px(value: f64, config: &HeuristicConfig) -> String {
    let value = config.round(value);
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}px")
    }
}

fn percent(fraction: f64, config: &HeuristicConfig) -> String {
    format!("{}%", config.round(fraction * 100.0))
}
