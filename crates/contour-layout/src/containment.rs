//! Containment regrouping.
//!
//! Design exports often flatten visual nesting: a card background and the
//! text drawn on top of it end up as siblings. This pass moves every node
//! that visually sits inside a sibling container under that container, so
//! later passes see the hierarchy a human would.
//!
//! # Algorithm
//!
//! Levels are resolved children-first (post-order). Within one level, each
//! child is tested against every other sibling in order and moved under the
//! first one that contains it:
//!
//! ```text
//! decorative child:   contained (30px margin)                      -> move
//! ordinary child:     contained (10px margin)
//!                     and candidate paints a visible fill
//!                     and child < 95% of candidate on both axes   -> move
//! ```
//!
//! A sibling that received children has its own level re-examined, so the
//! result is a fixpoint: resolving an already resolved tree changes nothing.

use contour_tree::{DesignNode, DesignTree, NodeId, Rect};

use crate::config::HeuristicConfig;

/// Whether a box with this geometry and layer name is decorative: a thin
/// bar, or a small node named like an indicator.
#[must_use]
pub fn is_decorative_box(rect: &Rect, name: &str, config: &HeuristicConfig) -> bool {
    let thin_bar = rect.height < config.decorative_max_bar_height
        && rect.width > config.decorative_min_bar_width;
    let indicator = rect.height < config.indicator_max_height
        && name
            .to_lowercase()
            .contains(&config.indicator_name.to_lowercase());
    thin_bar || indicator
}

/// Whether `node` is decorative. Nodes without bounds never are.
#[must_use]
pub fn is_decorative(node: &DesignNode, config: &HeuristicConfig) -> bool {
    node.bounds
        .is_some_and(|rect| is_decorative_box(&rect, &node.name, config))
}

/// Whether `child` should be regrouped under its sibling `candidate`.
#[must_use]
pub fn should_regroup(
    child: &DesignNode,
    candidate: &DesignNode,
    config: &HeuristicConfig,
) -> bool {
    let (Some(inner), Some(outer)) = (child.bounds, candidate.bounds) else {
        return false;
    };

    if is_decorative_box(&inner, &child.name, config) {
        return inner.is_within(&outer, config.decorative_containment_tolerance);
    }

    inner.is_within(&outer, config.containment_tolerance)
        && candidate.has_visible_fill()
        && inner.width < outer.width * config.containment_size_ratio
        && inner.height < outer.height * config.containment_size_ratio
}

/// Produce a copy of `tree` with visually nested siblings regrouped under
/// their containers. The input is left untouched.
#[must_use]
pub fn resolve_containment(tree: &DesignTree, config: &HeuristicConfig) -> DesignTree {
    let mut resolved = tree.clone();

    // Popped back to front, so levels are visited in post-order. Receivers
    // pushed during the walk are re-examined before moving on.
    let mut work = tree.post_order();
    work.reverse();

    while let Some(parent) = work.pop() {
        let receivers = regroup_level(&mut resolved, parent, config);
        work.extend(receivers.into_iter().rev());
    }

    resolved
}

/// Regroup the children of `parent` once. Returns the siblings that
/// received new children, in the order they first received one.
fn regroup_level(tree: &mut DesignTree, parent: NodeId, config: &HeuristicConfig) -> Vec<NodeId> {
    let children = tree.children(parent).to_vec();
    if children.len() < 2 {
        return Vec::new();
    }

    // target[i] = index of the sibling child i moves under.
    let mut target: Vec<Option<usize>> = vec![None; children.len()];
    for (i, &child) in children.iter().enumerate() {
        let child_node = &tree[child];
        if child_node.bounds.is_none() {
            continue;
        }
        let chosen = children.iter().enumerate().position(|(j, &candidate)| {
            i != j
                && should_regroup(child_node, &tree[candidate], config)
                && !leads_to(&target, j, i)
        });
        target[i] = chosen;
    }

    let mut receivers = Vec::new();
    for (i, slot) in target.iter().enumerate() {
        let Some(j) = *slot else { continue };
        let (child, container) = (children[i], children[j]);
        if let Err(err) = tree.move_node(child, container) {
            log::warn!("skipping regroup of {}: {err}", tree[child].id);
            continue;
        }
        log::trace!("regrouped {} under {}", tree[child].id, tree[container].id);
        if !receivers.contains(&container) {
            receivers.push(container);
        }
    }
    receivers
}

/// Whether following move targets from sibling `from` reaches sibling `to`.
/// Targets always form a forest, so the walk terminates.
fn leads_to(target: &[Option<usize>], from: usize, to: usize) -> bool {
    let mut current = Some(from);
    while let Some(k) = current {
        if k == to {
            return true;
        }
        current = target[k];
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leads_to_follows_chains() {
        let target = [Some(1), Some(2), None, None];
        assert!(leads_to(&target, 0, 2));
        assert!(leads_to(&target, 1, 1));
        assert!(!leads_to(&target, 2, 0));
        assert!(!leads_to(&target, 3, 0));
    }
}
