//! The conversion pipeline: build, regroup, decide.

use std::collections::HashMap;

use contour_common::Diagnostics;
use contour_tree::{DesignTree, NodeId, SourceNode};
use serde::Serialize;

use crate::config::HeuristicConfig;
use crate::containment::resolve_containment;
use crate::emit::{LayoutProperties, ParentContext, emit_properties};
use crate::strategy::{LayoutDecision, Placement, select_layout};

/// One node's decision, tagged with where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedNode {
    /// Arena handle in the resolved tree.
    #[serde(skip)]
    pub node: NodeId,
    /// Source id.
    pub id: String,
    /// The decision.
    pub decision: LayoutDecision,
}

/// Decisions for every node of a resolved tree, in pre-order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct LayoutPlan {
    entries: Vec<PlannedNode>,
    #[serde(skip)]
    by_node: HashMap<NodeId, usize>,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
}

impl LayoutPlan {
    fn push(&mut self, node: NodeId, id: String, decision: LayoutDecision) {
        let index = self.entries.len();
        let _ = self.by_node.insert(node, index);
        // Duplicate ids resolve to the first node in pre-order.
        let _ = self.by_id.entry(id.clone()).or_insert(index);
        self.entries.push(PlannedNode { node, id, decision });
    }

    /// Record that `node` has an absolutely placed child.
    fn mark_containing_block(&mut self, node: NodeId) {
        if let Some(&index) = self.by_node.get(&node) {
            self.entries[index].decision.positions_children = true;
        }
    }

    /// The decision for an arena node.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&LayoutDecision> {
        self.by_node.get(&node).map(|&i| &self.entries[i].decision)
    }

    /// The decision for a source id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&LayoutDecision> {
        self.by_id.get(id).map(|&i| &self.entries[i].decision)
    }

    /// The arena node planned under source id `id`.
    #[must_use]
    pub fn node_by_id(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).map(|&i| self.entries[i].node)
    }

    /// All entries in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &PlannedNode> {
        self.entries.iter()
    }

    /// Number of planned nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a LayoutPlan {
    type Item = &'a PlannedNode;
    type IntoIter = std::slice::Iter<'a, PlannedNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Decide every node of `tree` in a single top-down pass.
///
/// Pre-order guarantees a parent's decision exists before any child asks
/// for it. A parent is marked as a containing block once one of its
/// children is placed absolutely.
#[must_use]
pub fn plan_layout(tree: &DesignTree, config: &HeuristicConfig) -> LayoutPlan {
    let mut plan = LayoutPlan::default();
    for id in tree.pre_order() {
        let parent = tree
            .parent(id)
            .and_then(|parent| plan.get(parent).map(|decision| (parent, decision)));
        let decision = select_layout(tree, id, parent, config);
        if let Some(parent) = tree
            .parent(id)
            .filter(|_| decision.placement == Placement::Absolute)
        {
            plan.mark_containing_block(parent);
        }
        plan.push(id, tree[id].id.clone(), decision);
    }
    plan
}

/// Everything one conversion produced.
#[derive(Debug, Clone)]
pub struct LayoutReport {
    /// The tree after containment resolution.
    pub tree: DesignTree,
    /// One decision per node.
    pub plan: LayoutPlan,
    /// Problems found in the input.
    pub diagnostics: Diagnostics,
    /// The configuration the report was produced with.
    pub config: HeuristicConfig,
}

impl LayoutReport {
    /// Emit the layout properties of an arena node.
    #[must_use]
    pub fn properties(&self, node: NodeId) -> Option<LayoutProperties> {
        let decision = self.plan.get(node)?;
        let bounds = self.tree.get(node)?.bounds;
        let parent = self.tree.parent(node).and_then(|parent| {
            Some(ParentContext {
                decision: self.plan.get(parent)?,
                bounds: self.tree[parent].bounds,
            })
        });
        Some(emit_properties(decision, bounds.as_ref(), parent, &self.config))
    }

    /// Emit the layout properties of the node with source id `id`.
    #[must_use]
    pub fn properties_by_id(&self, id: &str) -> Option<LayoutProperties> {
        self.properties(self.plan.node_by_id(id)?)
    }

    /// The decision for the node with source id `id`.
    #[must_use]
    pub fn decision_by_id(&self, id: &str) -> Option<&LayoutDecision> {
        self.plan.get_by_id(id)
    }
}

/// Infer layout for a whole design tree.
///
/// Builds the arena (recording diagnostics for malformed nodes), regroups
/// visually nested siblings, then decides each node top-down. `config` is
/// expected to have passed [`HeuristicConfig::validate`].
#[must_use]
pub fn infer_layout(source: &SourceNode, config: &HeuristicConfig) -> LayoutReport {
    let (built, diagnostics) = DesignTree::from_source(source, config.max_depth);
    let tree = resolve_containment(&built, config);
    let plan = plan_layout(&tree, config);
    log::debug!(
        "inferred layout for {} nodes ({} diagnostics)",
        plan.len(),
        diagnostics.len()
    );
    LayoutReport {
        tree,
        plan,
        diagnostics,
        config: config.clone(),
    }
}
