//! Design node tree for the Contour layout inference engine.
//!
//! # Scope
//!
//! This crate provides:
//! - **Geometry** - bounding boxes, axes, edge sizes and tolerance helpers
//! - **Source shape** - the serde-deserializable node tree handed over by the
//!   upstream extraction step
//! - **Design tree** - an arena of nodes addressed by [`NodeId`], built from
//!   the source shape with per-node validation
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, so regrouping a node is a matter of rewriting two child
//! lists and one parent pointer. Every walk over the tree uses an explicit
//! work stack; depth is bounded only by the configured build limit.

pub mod geometry;
pub mod source;
pub mod tree;

pub use geometry::{Axis, EdgeSizes, Rect, round_to, within};
pub use source::{
    ConstraintKind, Constraints, CounterAxisAlign, LayoutMode, PrimaryAxisAlign, SourceNode,
    SourcePaint, SourceRect,
};
pub use tree::{AutoLayout, DesignNode, DesignTree, Fill, NodeId, TreeError};
