//! The source node shape handed over by the upstream extraction step.
//!
//! Field names follow the design tool's JSON conventions (`camelCase`,
//! `SCREAMING_SNAKE_CASE` keywords) so a document export deserializes
//! directly. Every field is optional on the wire; validation happens when
//! the arena is built, not here.

use serde::{Deserialize, Serialize};

/// A bounding box as it arrives on the wire. Missing fields stay `None` so
/// the tree builder can report them instead of silently zeroing them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceRect {
    /// Absolute x of the top-left corner.
    pub x: Option<f64>,
    /// Absolute y of the top-left corner.
    pub y: Option<f64>,
    /// Width.
    pub width: Option<f64>,
    /// Height.
    pub height: Option<f64>,
}

/// A paint entry from a node's `fills` list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePaint {
    /// Paint type tag (`SOLID`, `GRADIENT_LINEAR`, `IMAGE`, ...).
    #[serde(rename = "type", default)]
    pub paint_type: String,
    /// Whether the paint is switched on.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Paint opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

const fn default_visible() -> bool {
    true
}

const fn default_opacity() -> f64 {
    1.0
}

impl SourcePaint {
    /// A fully opaque, visible solid paint.
    #[must_use]
    pub fn solid() -> Self {
        Self {
            paint_type: "SOLID".to_string(),
            visible: true,
            opacity: 1.0,
        }
    }
}

/// Declared auto-layout mode of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    /// No auto-layout; children are placed freely.
    #[default]
    None,
    /// Children flow left to right.
    Horizontal,
    /// Children flow top to bottom.
    Vertical,
}

/// Declared distribution of children along the auto-layout flow axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimaryAxisAlign {
    /// Packed at the start.
    #[default]
    Min,
    /// Packed in the middle.
    Center,
    /// Packed at the end.
    Max,
    /// First and last child at the edges, free space between.
    SpaceBetween,
}

/// Declared alignment of children across the auto-layout flow axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterAxisAlign {
    /// Aligned to the leading edge.
    #[default]
    Min,
    /// Centered.
    Center,
    /// Aligned to the trailing edge.
    Max,
    /// Aligned on text baselines.
    Baseline,
}

/// How a node responds to its parent resizing along one axis.
///
/// The design tool uses different names per axis (`LEFT`/`TOP`,
/// `RIGHT`/`BOTTOM`, `LEFT_RIGHT`/`TOP_BOTTOM`); both spellings map onto
/// the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum ConstraintKind {
    /// Pinned to the leading edge (`LEFT` / `TOP`).
    #[default]
    #[serde(rename = "LEFT", alias = "TOP", alias = "MIN")]
    Start,
    /// Pinned to the trailing edge (`RIGHT` / `BOTTOM`).
    #[serde(rename = "RIGHT", alias = "BOTTOM", alias = "MAX")]
    End,
    /// Kept centered.
    #[serde(rename = "CENTER")]
    Center,
    /// Pinned to both edges (`LEFT_RIGHT` / `TOP_BOTTOM`).
    #[serde(rename = "LEFT_RIGHT", alias = "TOP_BOTTOM", alias = "STRETCH")]
    Stretch,
    /// Position and size scale with the parent.
    #[serde(rename = "SCALE")]
    Scale,
}

/// Resize constraints for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Constraints {
    /// Constraint along the x axis.
    pub horizontal: ConstraintKind,
    /// Constraint along the y axis.
    pub vertical: ConstraintKind,
}

/// One node of the source tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceNode {
    /// Unique node id.
    pub id: String,
    /// Free-text layer name.
    pub name: String,
    /// Type tag (`FRAME`, `GROUP`, `TEXT`, `RECTANGLE`, ...).
    #[serde(rename = "type")]
    pub node_type: String,
    /// Absolute bounding box.
    pub absolute_bounding_box: Option<SourceRect>,
    /// Ordered children (first is bottom-most in paint order).
    pub children: Vec<SourceNode>,
    /// Fill paints.
    pub fills: Vec<SourcePaint>,
    /// Layer opacity; defaults to 1 when absent.
    pub opacity: Option<f64>,
    /// Declared auto-layout mode.
    pub layout_mode: Option<LayoutMode>,
    /// Declared spacing between auto-layout children.
    pub item_spacing: Option<f64>,
    /// Declared top padding.
    pub padding_top: Option<f64>,
    /// Declared right padding.
    pub padding_right: Option<f64>,
    /// Declared bottom padding.
    pub padding_bottom: Option<f64>,
    /// Declared left padding.
    pub padding_left: Option<f64>,
    /// Declared flow-axis distribution.
    pub primary_axis_align_items: Option<PrimaryAxisAlign>,
    /// Declared cross-axis alignment.
    pub counter_axis_align_items: Option<CounterAxisAlign>,
    /// Resize constraints relative to the parent.
    pub constraints: Option<Constraints>,
}

impl SourceNode {
    /// A bare node with only an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// A `FRAME` node with a complete bounding box. The name defaults to
    /// the id.
    #[must_use]
    pub fn frame(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            node_type: "FRAME".to_string(),
            absolute_bounding_box: Some(SourceRect {
                x: Some(x),
                y: Some(y),
                width: Some(width),
                height: Some(height),
            }),
            ..Self::default()
        }
    }

    /// Set the layer name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the type tag.
    #[must_use]
    pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = node_type.into();
        self
    }

    /// Append one child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children in order.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Add a visible solid fill.
    #[must_use]
    pub fn with_solid_fill(mut self) -> Self {
        self.fills.push(SourcePaint::solid());
        self
    }

    /// Declare auto-layout with the given mode and item spacing.
    #[must_use]
    pub fn with_auto_layout(mut self, mode: LayoutMode, item_spacing: f64) -> Self {
        self.layout_mode = Some(mode);
        self.item_spacing = Some(item_spacing);
        self
    }

    /// Declare auto-layout padding (CSS order).
    #[must_use]
    pub fn with_padding(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.padding_top = Some(top);
        self.padding_right = Some(right);
        self.padding_bottom = Some(bottom);
        self.padding_left = Some(left);
        self
    }

    /// Declare auto-layout alignment.
    #[must_use]
    pub fn with_alignment(mut self, primary: PrimaryAxisAlign, counter: CounterAxisAlign) -> Self {
        self.primary_axis_align_items = Some(primary);
        self.counter_axis_align_items = Some(counter);
        self
    }

    /// Set resize constraints.
    #[must_use]
    pub fn with_constraints(
        mut self,
        horizontal: ConstraintKind,
        vertical: ConstraintKind,
    ) -> Self {
        self.constraints = Some(Constraints {
            horizontal,
            vertical,
        });
        self
    }

    /// Parse a JSON design export of any nesting depth.
    ///
    /// The parser's recursion limit is lifted and the stack grows on demand,
    /// so deep exports reach the tree builder's depth guard instead of
    /// failing here.
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed JSON or a mismatched shape.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let mut json = serde_json::Deserializer::from_str(text);
        json.disable_recursion_limit();
        let node = Self::deserialize(serde_stacker::Deserializer::new(&mut json))?;
        json.end()?;
        Ok(node)
    }

    /// Drop a source tree level by level; the derived drop recurses once per
    /// nesting level.
    pub fn dismantle(self) {
        let mut pending = vec![self];
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }

    /// Number of nodes below this one, at all depths.
    #[must_use]
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Self> = self.children.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}
