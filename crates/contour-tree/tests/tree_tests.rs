//! Tests for building the design tree and moving nodes within it.

use contour_common::DiagnosticKind;
use contour_tree::{
    ConstraintKind, CounterAxisAlign, DesignTree, LayoutMode, NodeId, PrimaryAxisAlign, Rect,
    SourceNode, SourceRect, TreeError,
};

const MAX_DEPTH: usize = 64;

fn ids(tree: &DesignTree, order: &[NodeId]) -> Vec<String> {
    order.iter().map(|&id| tree[id].id.clone()).collect()
}

fn sample() -> SourceNode {
    SourceNode::frame("root", 0.0, 0.0, 400.0, 400.0).with_children([
        SourceNode::frame("a", 0.0, 0.0, 100.0, 100.0).with_children([
            SourceNode::frame("a1", 0.0, 0.0, 10.0, 10.0),
            SourceNode::frame("a2", 20.0, 0.0, 10.0, 10.0),
        ]),
        SourceNode::frame("b", 200.0, 0.0, 100.0, 100.0),
    ])
}

// ========== from_source ==========

#[test]
fn test_arena_order_matches_source_pre_order() {
    let (tree, diagnostics) = DesignTree::from_source(&sample(), MAX_DEPTH);

    assert!(diagnostics.is_empty());
    assert_eq!(tree.len(), 5);
    assert_eq!(tree[tree.root()].id, "root");
    assert_eq!(
        ids(&tree, &tree.pre_order()),
        ["root", "a", "a1", "a2", "b"]
    );
    assert_eq!(
        ids(&tree, &tree.post_order()),
        ["a1", "a2", "a", "b", "root"]
    );
}

#[test]
fn test_parent_links() {
    let (tree, _) = DesignTree::from_source(&sample(), MAX_DEPTH);
    let a = tree.find("a").unwrap();
    let a2 = tree.find("a2").unwrap();

    assert_eq!(tree.parent(a2), Some(a));
    assert_eq!(tree.parent(tree.root()), None);
    assert_eq!(tree.depth(a2), 2);
    assert!(tree.is_descendant_of(a2, tree.root()));
    assert!(!tree.is_descendant_of(a, a2));
}

#[test]
fn test_missing_bounds_becomes_zero_size_leaf() {
    let source = SourceNode::frame("root", 0.0, 0.0, 100.0, 100.0).with_children([
        SourceNode::new("broken").with_child(SourceNode::frame("lost", 0.0, 0.0, 5.0, 5.0)),
        SourceNode::frame("fine", 0.0, 0.0, 10.0, 10.0),
    ]);

    let (tree, diagnostics) = DesignTree::from_source(&source, MAX_DEPTH);
    let broken = tree.find("broken").unwrap();

    assert_eq!(tree[broken].bounds, None);
    assert_eq!(tree[broken].rect(), Rect::ZERO);
    assert!(tree.children(broken).is_empty());
    assert!(tree.find("lost").is_none());
    // The sibling after the broken node is still converted.
    assert!(tree.find("fine").is_some());

    let kinds: Vec<_> = diagnostics.for_node("broken").map(|d| d.kind.clone()).collect();
    assert_eq!(
        kinds,
        [
            DiagnosticKind::MissingBounds,
            DiagnosticKind::DroppedChildren { count: 1 }
        ]
    );
}

#[test]
fn test_partial_and_negative_bounds_are_rejected() {
    let mut partial = SourceNode::new("partial");
    partial.absolute_bounding_box = Some(SourceRect {
        x: Some(0.0),
        y: Some(0.0),
        width: None,
        height: None,
    });
    let negative = SourceNode::frame("negative", 0.0, 0.0, -4.0, 10.0);
    let source = SourceNode::frame("root", 0.0, 0.0, 100.0, 100.0)
        .with_children([partial, negative]);

    let (tree, diagnostics) = DesignTree::from_source(&source, MAX_DEPTH);

    assert_eq!(tree.len(), 3);
    assert_eq!(
        diagnostics.for_node("partial").next().map(|d| d.kind.clone()),
        Some(DiagnosticKind::InvalidBounds {
            reason: "missing width, height".to_string()
        })
    );
    assert_eq!(
        diagnostics.for_node("negative").next().map(|d| d.kind.clone()),
        Some(DiagnosticKind::InvalidBounds {
            reason: "negative width".to_string()
        })
    );
}

#[test]
fn test_depth_limit_truncates_deep_chains() {
    // A chain 10 levels deep.
    let mut source = SourceNode::frame("n9", 0.0, 0.0, 10.0, 10.0);
    for level in (0..9).rev() {
        source = SourceNode::frame(format!("n{level}"), 0.0, 0.0, 10.0, 10.0).with_child(source);
    }

    let (tree, diagnostics) = DesignTree::from_source(&source, 3);

    assert_eq!(tree.len(), 4);
    let n3 = tree.find("n3").unwrap();
    assert!(tree.children(n3).is_empty());
    assert_eq!(
        diagnostics.for_node("n3").map(|d| d.kind.clone()).collect::<Vec<_>>(),
        [
            DiagnosticKind::DepthExceeded { limit: 3 },
            DiagnosticKind::DroppedChildren { count: 6 }
        ]
    );
}

#[test]
fn test_very_deep_tree_builds_without_recursion() {
    let mut source = SourceNode::frame("leaf", 0.0, 0.0, 1.0, 1.0);
    for level in 0..20_000 {
        source = SourceNode::frame(format!("n{level}"), 0.0, 0.0, 1.0, 1.0).with_child(source);
    }

    let (tree, diagnostics) = DesignTree::from_source(&source, 100_000);

    assert!(diagnostics.is_empty());
    assert_eq!(tree.len(), 20_001);
    assert_eq!(tree.post_order().len(), 20_001);
    source.dismantle();
}

/// `levels` nested frames around one leaf, as a design export would nest them.
fn json_chain(levels: usize) -> String {
    let bounds = r#""absoluteBoundingBox":{"x":0,"y":0,"width":10,"height":10}"#;
    let open: String = (0..levels)
        .map(|level| format!(r#"{{"id":"n{level}",{bounds},"children":["#))
        .collect();
    format!(r#"{open}{{"id":"leaf",{bounds}}}{}"#, "]}".repeat(levels))
}

#[test]
fn test_deeply_nested_json_parses() {
    let source = SourceNode::from_json(&json_chain(80)).unwrap();

    assert_eq!(source.descendant_count(), 80);
    let (tree, diagnostics) = DesignTree::from_source(&source, 256);
    assert!(diagnostics.is_empty());
    assert_eq!(tree.len(), 81);
    source.dismantle();
}

#[test]
fn test_json_deeper_than_depth_guard_is_truncated() {
    let source = SourceNode::from_json(&json_chain(300)).unwrap();

    let (tree, diagnostics) = DesignTree::from_source(&source, 256);

    assert_eq!(tree.len(), 257);
    let last = tree.find("n256").unwrap();
    assert!(tree.children(last).is_empty());
    assert_eq!(
        diagnostics.for_node("n256").map(|d| d.kind.clone()).collect::<Vec<_>>(),
        [
            DiagnosticKind::DepthExceeded { limit: 256 },
            DiagnosticKind::DroppedChildren { count: 44 }
        ]
    );
    source.dismantle();
}

#[test]
fn test_malformed_json_is_an_error() {
    assert!(SourceNode::from_json(r#"{"id":"root","children":["#).is_err());
    assert!(SourceNode::from_json(r#"{"id":"root"} trailing"#).is_err());
}

#[test]
fn test_duplicate_ids_are_reported() {
    let source = SourceNode::frame("root", 0.0, 0.0, 100.0, 100.0).with_children([
        SourceNode::frame("dup", 0.0, 0.0, 10.0, 10.0),
        SourceNode::frame("dup", 20.0, 0.0, 10.0, 10.0),
    ]);

    let (tree, diagnostics) = DesignTree::from_source(&source, MAX_DEPTH);

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.find("dup"), Some(NodeId(1)));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.iter().next().map(|d| d.kind.clone()),
        Some(DiagnosticKind::DuplicateId)
    );
}

#[test]
fn test_auto_layout_and_fills_are_carried_over() {
    let source = SourceNode::frame("root", 0.0, 0.0, 100.0, 100.0)
        .with_solid_fill()
        .with_auto_layout(LayoutMode::Vertical, 12.0)
        .with_padding(8.0, 16.0, 8.0, 16.0)
        .with_alignment(PrimaryAxisAlign::SpaceBetween, CounterAxisAlign::Center)
        .with_constraints(ConstraintKind::Stretch, ConstraintKind::End);

    let (tree, _) = DesignTree::from_source(&source, MAX_DEPTH);
    let root = &tree[tree.root()];

    assert!(root.has_visible_fill());
    assert_eq!(root.opacity, 1.0);
    let auto = root.auto_layout.unwrap();
    assert_eq!(auto.mode, LayoutMode::Vertical);
    assert_eq!(auto.item_spacing, 12.0);
    assert_eq!(auto.padding.left, 16.0);
    assert_eq!(auto.primary_align, PrimaryAxisAlign::SpaceBetween);
    assert_eq!(root.constraints.unwrap().vertical, ConstraintKind::End);
}

#[test]
fn test_layout_mode_none_is_not_auto_layout() {
    let source =
        SourceNode::frame("root", 0.0, 0.0, 100.0, 100.0).with_auto_layout(LayoutMode::None, 10.0);
    let (tree, _) = DesignTree::from_source(&source, MAX_DEPTH);
    assert!(tree[tree.root()].auto_layout.is_none());
}

#[test]
fn test_hidden_or_transparent_fills_do_not_count() {
    let json = r#"{
        "id": "root",
        "type": "FRAME",
        "absoluteBoundingBox": { "x": 0, "y": 0, "width": 10, "height": 10 },
        "fills": [
            { "type": "SOLID", "visible": false },
            { "type": "SOLID", "opacity": 0 }
        ]
    }"#;
    let source: SourceNode = serde_json::from_str(json).unwrap();
    let (tree, _) = DesignTree::from_source(&source, MAX_DEPTH);

    assert_eq!(tree[tree.root()].fills.len(), 2);
    assert!(!tree[tree.root()].has_visible_fill());
}

#[test]
fn test_deserializes_design_tool_json() {
    let json = r#"{
        "id": "1:1",
        "name": "Card",
        "type": "FRAME",
        "absoluteBoundingBox": { "x": 10, "y": 20, "width": 300, "height": 200 },
        "layoutMode": "HORIZONTAL",
        "itemSpacing": 8,
        "primaryAxisAlignItems": "SPACE_BETWEEN",
        "counterAxisAlignItems": "CENTER",
        "constraints": { "horizontal": "LEFT_RIGHT", "vertical": "BOTTOM" },
        "children": [
            { "id": "1:2", "name": "Title", "type": "TEXT",
              "absoluteBoundingBox": { "x": 20, "y": 30, "width": 100, "height": 20 } }
        ]
    }"#;
    let source: SourceNode = serde_json::from_str(json).unwrap();

    assert_eq!(source.layout_mode, Some(LayoutMode::Horizontal));
    assert_eq!(
        source.constraints.unwrap().horizontal,
        ConstraintKind::Stretch
    );
    assert_eq!(source.constraints.unwrap().vertical, ConstraintKind::End);

    let (tree, diagnostics) = DesignTree::from_source(&source, MAX_DEPTH);
    assert!(diagnostics.is_empty());
    assert_eq!(
        tree.child_bounds(tree.root()),
        [Rect::new(20.0, 30.0, 100.0, 20.0)]
    );
}

// ========== move_node ==========

#[test]
fn test_move_node_appends_to_new_parent() {
    let (mut tree, _) = DesignTree::from_source(&sample(), MAX_DEPTH);
    let a = tree.find("a").unwrap();
    let a1 = tree.find("a1").unwrap();
    let a2 = tree.find("a2").unwrap();
    let b = tree.find("b").unwrap();

    tree.move_node(a1, b).unwrap();

    assert_eq!(tree.children(a), &[a2]);
    assert_eq!(tree.children(b), &[a1]);
    assert_eq!(tree.parent(a1), Some(b));
}

#[test]
fn test_move_node_rejects_cycles() {
    let (mut tree, _) = DesignTree::from_source(&sample(), MAX_DEPTH);
    let a = tree.find("a").unwrap();
    let a1 = tree.find("a1").unwrap();

    assert_eq!(
        tree.move_node(a, a1),
        Err(TreeError::Cycle { child: a, parent: a1 })
    );
    assert_eq!(
        tree.move_node(a, a),
        Err(TreeError::Cycle { child: a, parent: a })
    );
    assert_eq!(tree.move_node(tree.root(), a), Err(TreeError::RootMove));
    assert_eq!(
        tree.move_node(a, NodeId(99)),
        Err(TreeError::UnknownNode(NodeId(99)))
    );
    // Nothing moved.
    assert_eq!(tree.parent(a), Some(tree.root()));
}
