//! Arena-backed design node tree.
//!
//! All nodes live in one contiguous vector and refer to each other through
//! [`NodeId`] indices. This keeps regrouping cheap (a move rewrites two
//! child lists and a parent pointer) and lets the no-cycle invariant be
//! checked at the single place that moves nodes: [`DesignTree::move_node`].

use std::collections::HashSet;
use std::ops::Index;

use contour_common::{DiagnosticKind, Diagnostics};
use thiserror::Error;

use crate::geometry::{EdgeSizes, Rect};
use crate::source::{
    Constraints, CounterAxisAlign, LayoutMode, PrimaryAxisAlign, SourceNode, SourceRect,
};

/// A type-safe index into the design tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A fill paint reduced to what layout inference needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    /// Paint type tag.
    pub kind: String,
    /// Whether the paint is switched on.
    pub visible: bool,
    /// Paint opacity.
    pub opacity: f64,
}

impl Fill {
    /// A fill paints something only when it is switched on and not fully
    /// transparent.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible && self.opacity > 0.0
    }
}

/// Auto-layout settings declared on a frame by the designer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoLayout {
    /// Flow direction; never [`LayoutMode::None`].
    pub mode: LayoutMode,
    /// Spacing between consecutive children.
    pub item_spacing: f64,
    /// Inner padding.
    pub padding: EdgeSizes,
    /// Distribution along the flow axis.
    pub primary_align: PrimaryAxisAlign,
    /// Alignment across the flow axis.
    pub counter_align: CounterAxisAlign,
}

impl AutoLayout {
    fn from_source(source: &SourceNode) -> Option<Self> {
        let mode = source.layout_mode.unwrap_or_default();
        if mode == LayoutMode::None {
            return None;
        }
        Some(Self {
            mode,
            item_spacing: source.item_spacing.unwrap_or(0.0),
            padding: EdgeSizes::new(
                source.padding_top.unwrap_or(0.0),
                source.padding_right.unwrap_or(0.0),
                source.padding_bottom.unwrap_or(0.0),
                source.padding_left.unwrap_or(0.0),
            ),
            primary_align: source.primary_axis_align_items.unwrap_or_default(),
            counter_align: source.counter_axis_align_items.unwrap_or_default(),
        })
    }
}

/// One node of the design tree.
#[derive(Debug, Clone)]
pub struct DesignNode {
    /// Unique id from the source tree.
    pub id: String,
    /// Free-text layer name; only consulted by decorative-name heuristics.
    pub name: String,
    /// Type tag from the source tree.
    pub node_type: String,
    /// Validated bounding box. `None` means the source box was missing or
    /// malformed and the node is treated as a zero-size leaf.
    pub bounds: Option<Rect>,
    /// Fill paints.
    pub fills: Vec<Fill>,
    /// Layer opacity.
    pub opacity: f64,
    /// Declared auto-layout, if any.
    pub auto_layout: Option<AutoLayout>,
    /// Declared resize constraints, if any.
    pub constraints: Option<Constraints>,
    /// Parent node, `None` for the root.
    pub parent: Option<NodeId>,
    /// Ordered children.
    pub children: Vec<NodeId>,
}

impl DesignNode {
    /// The bounding box, or [`Rect::ZERO`] for a malformed node.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.bounds.unwrap_or(Rect::ZERO)
    }

    /// Whether the node has at least one visible fill, i.e. it paints a
    /// background that could visually contain other nodes.
    #[must_use]
    pub fn has_visible_fill(&self) -> bool {
        self.fills.iter().any(Fill::is_visible)
    }

    fn from_source(source: &SourceNode, bounds: Option<Rect>) -> Self {
        Self {
            id: source.id.clone(),
            name: source.name.clone(),
            node_type: source.node_type.clone(),
            bounds,
            fills: source
                .fills
                .iter()
                .map(|paint| Fill {
                    kind: paint.paint_type.clone(),
                    visible: paint.visible,
                    opacity: paint.opacity,
                })
                .collect(),
            opacity: source.opacity.unwrap_or(1.0),
            auto_layout: AutoLayout::from_source(source),
            constraints: source.constraints,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Errors from structural edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id does not index a node of this tree.
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
    /// The root has no parent to be moved away from.
    #[error("the root node cannot be moved")]
    RootMove,
    /// The target parent is the node itself or one of its descendants.
    #[error("moving {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Node being moved.
        child: NodeId,
        /// Rejected target parent.
        parent: NodeId,
    },
}

/// Arena-based design tree with O(1) node access.
#[derive(Debug, Clone)]
pub struct DesignTree {
    /// All nodes, indexed by `NodeId`. The root is at index 0.
    nodes: Vec<DesignNode>,
}

impl DesignTree {
    /// Build an arena from a source tree.
    ///
    /// Nodes are allocated in pre-order, so arena order equals source
    /// order. Problems are isolated per node and reported as diagnostics:
    ///
    /// - a missing or malformed bounding box turns the node into a
    ///   zero-size leaf (its descendants are not converted);
    /// - a node at `max_depth` keeps its place but loses its children;
    /// - a repeated id is kept but reported.
    #[must_use]
    pub fn from_source(source: &SourceNode, max_depth: usize) -> (Self, Diagnostics) {
        let mut tree = Self { nodes: Vec::new() };
        let mut diagnostics = Diagnostics::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<(&SourceNode, Option<NodeId>, usize)> = vec![(source, None, 0)];

        while let Some((src, parent, depth)) = stack.pop() {
            if !seen.insert(src.id.as_str()) {
                diagnostics.record(src.id.as_str(), DiagnosticKind::DuplicateId);
            }

            let bounds = match validate_bounds(src.absolute_bounding_box.as_ref()) {
                Ok(rect) => Some(rect),
                Err(kind) => {
                    diagnostics.record(src.id.as_str(), kind);
                    None
                }
            };

            let id = tree.alloc(DesignNode::from_source(src, bounds));
            if let Some(parent) = parent {
                tree.append_child(parent, id);
            }

            if src.children.is_empty() {
                continue;
            }
            if bounds.is_none() || depth >= max_depth {
                if bounds.is_some() {
                    diagnostics.record(
                        src.id.as_str(),
                        DiagnosticKind::DepthExceeded { limit: max_depth },
                    );
                }
                diagnostics.record(
                    src.id.as_str(),
                    DiagnosticKind::DroppedChildren {
                        count: src.descendant_count(),
                    },
                );
                continue;
            }

            // Reversed so children pop, and are allocated, in source order.
            for child in src.children.iter().rev() {
                stack.push((child, Some(id), depth + 1));
            }
        }

        (tree, diagnostics)
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&DesignNode> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every node in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DesignNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Find the first node with the given source id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.id == id).map(NodeId)
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Bounding boxes of the children that have one, in child order.
    #[must_use]
    pub fn child_bounds(&self, id: NodeId) -> Vec<Rect> {
        self.children(id)
            .iter()
            .filter_map(|&child| self[child].bounds)
            .collect()
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Number of edges between the node and the root.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Node ids in pre-order (parent before children, children in order).
    #[must_use]
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        if self.is_empty() {
            return order;
        }
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    /// Node ids in post-order (children before their parent).
    #[must_use]
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        if self.is_empty() {
            return order;
        }
        let mut stack = vec![(self.root(), false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
            } else {
                stack.push((id, true));
                stack.extend(self.children(id).iter().rev().map(|&c| (c, false)));
            }
        }
        order
    }

    /// Move `child` to the end of `new_parent`'s children.
    ///
    /// # Errors
    ///
    /// Fails without touching the tree if either id is unknown, `child` is
    /// the root, or `new_parent` is `child` itself or lies below it.
    pub fn move_node(&mut self, child: NodeId, new_parent: NodeId) -> Result<(), TreeError> {
        if self.get(child).is_none() {
            return Err(TreeError::UnknownNode(child));
        }
        if self.get(new_parent).is_none() {
            return Err(TreeError::UnknownNode(new_parent));
        }
        let Some(old_parent) = self.parent(child) else {
            return Err(TreeError::RootMove);
        };
        if new_parent == child || self.is_descendant_of(new_parent, child) {
            return Err(TreeError::Cycle {
                child,
                parent: new_parent,
            });
        }

        self.nodes[old_parent.0].children.retain(|&c| c != child);
        self.append_child(new_parent, child);
        Ok(())
    }

    /// Allocate a new, detached node and return its ID.
    fn alloc(&mut self, node: DesignNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Appends `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }
}

impl Index<NodeId> for DesignTree {
    type Output = DesignNode;

    fn index(&self, id: NodeId) -> &DesignNode {
        &self.nodes[id.0]
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DesignTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Turn a wire bounding box into a usable [`Rect`].
fn validate_bounds(source: Option<&SourceRect>) -> Result<Rect, DiagnosticKind> {
    let Some(raw) = source else {
        return Err(DiagnosticKind::MissingBounds);
    };
    let missing: Vec<&str> = [
        ("x", raw.x),
        ("y", raw.y),
        ("width", raw.width),
        ("height", raw.height),
    ]
    .iter()
    .filter(|(_, value)| value.is_none())
    .map(|(field, _)| *field)
    .collect();
    if !missing.is_empty() {
        return Err(DiagnosticKind::InvalidBounds {
            reason: format!("missing {}", missing.join(", ")),
        });
    }

    let rect = Rect::new(
        raw.x.unwrap_or_default(),
        raw.y.unwrap_or_default(),
        raw.width.unwrap_or_default(),
        raw.height.unwrap_or_default(),
    );
    rect.defect().map_or(Ok(rect), |reason| {
        Err(DiagnosticKind::InvalidBounds {
            reason: reason.to_string(),
        })
    })
}
