//! Layout inference for absolutely positioned design trees.
//!
//! # Scope
//!
//! Design tools export every node with an absolute bounding box. This crate
//! recovers the layout intent behind those boxes:
//! - **Containment** - siblings that sit visually inside a filled sibling
//!   are regrouped under it
//! - **Arrangement** - a sibling set is classified as vertical, horizontal
//!   or complex
//! - **Spacing** - gap and padding are estimated with outlier filtering
//! - **Alignment** - `align-items` by majority vote, `justify-content` by
//!   gap symmetry
//! - **Grid** - regular card matrices are recognized as grids
//! - **Strategy** - each node gets flexbox, grid, absolute or static
//! - **Emission** - each decision becomes an ordered list of CSS layout
//!   declarations
//!
//! # Pipeline
//!
//! [`infer_layout`] builds a [`contour_tree::DesignTree`], resolves
//! containment bottom-up, then decides every node in one top-down pass.
//! Every threshold lives in [`HeuristicConfig`].

pub mod alignment;
pub mod arrangement;
pub mod config;
pub mod containment;
pub mod emit;
pub mod gap;
pub mod grid;
pub mod padding;
pub mod pipeline;
pub mod strategy;

pub use alignment::{AlignItems, Alignment, JustifyContent, classify_alignment};
pub use arrangement::{Arrangement, detect_arrangement};
pub use config::{ConfigError, HeuristicConfig};
pub use containment::{is_decorative, resolve_containment};
pub use emit::{LayoutProperties, ParentContext, emit_properties};
pub use gap::estimate_gap;
pub use grid::{GridTemplate, detect_grid};
pub use padding::estimate_padding;
pub use pipeline::{LayoutPlan, LayoutReport, PlannedNode, infer_layout, plan_layout};
pub use strategy::{FlowDirection, LayoutDecision, LayoutStrategy, Placement, select_layout};
