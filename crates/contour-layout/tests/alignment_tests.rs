//! Tests for cross-axis and main-axis alignment.

use contour_layout::alignment::{classify_cross_axis, classify_main_axis};
use contour_layout::{AlignItems, HeuristicConfig, JustifyContent, classify_alignment};
use contour_tree::{Axis, Rect};

/// A 300x400 parent.
const PARENT: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 300.0,
    height: 400.0,
};

/// 100x50 boxes stacked 60px apart whose centers sit `offsets` px right of
/// the parent's center.
fn offset_column(offsets: &[f64]) -> Vec<Rect> {
    offsets
        .iter()
        .enumerate()
        .map(|(i, dx)| Rect::new(100.0 + dx, 60.0 * i as f64, 100.0, 50.0))
        .collect()
}

fn cross(children: &[Rect]) -> Option<AlignItems> {
    classify_cross_axis(Axis::Vertical, &PARENT, children, &HeuristicConfig::default())
}

fn main_axis(main: Axis, children: &[Rect]) -> Option<JustifyContent> {
    classify_main_axis(main, &PARENT, children, &HeuristicConfig::default())
}

// ========== align-items ==========

#[test]
fn test_all_centered_children_center() {
    assert_eq!(cross(&offset_column(&[0.0, 0.0, 0.0])), Some(AlignItems::Center));
}

#[test]
fn test_two_of_three_centered_meets_majority() {
    assert_eq!(cross(&offset_column(&[0.0, 0.0, 40.0])), Some(AlignItems::Center));
}

#[test]
fn test_small_tolerance_around_center() {
    assert_eq!(cross(&offset_column(&[2.0, -2.0])), Some(AlignItems::Center));
    // 3px off center is no longer centered, and touches no edge either.
    assert_eq!(cross(&offset_column(&[3.0, 3.0])), Some(AlignItems::Start));
}

#[test]
fn test_left_aligned_children_start() {
    let children = vec![
        Rect::new(0.0, 0.0, 100.0, 50.0),
        Rect::new(4.0, 60.0, 200.0, 50.0),
        Rect::new(0.0, 120.0, 50.0, 50.0),
    ];
    assert_eq!(cross(&children), Some(AlignItems::Start));
}

#[test]
fn test_right_aligned_children_end() {
    let children = vec![
        Rect::new(200.0, 0.0, 100.0, 50.0),
        Rect::new(150.0, 60.0, 148.0, 50.0),
    ];
    assert_eq!(cross(&children), Some(AlignItems::End));
}

#[test]
fn test_plurality_wins_below_majority() {
    // One start, one end, one unaligned: no majority, tie goes to start.
    let children = vec![
        Rect::new(0.0, 0.0, 100.0, 50.0),
        Rect::new(200.0, 60.0, 100.0, 50.0),
        Rect::new(30.0, 120.0, 100.0, 50.0),
    ];
    assert_eq!(cross(&children), Some(AlignItems::Start));

    // One end, two unaligned.
    let children = vec![
        Rect::new(200.0, 0.0, 100.0, 50.0),
        Rect::new(30.0, 60.0, 100.0, 50.0),
        Rect::new(40.0, 120.0, 100.0, 50.0),
    ];
    assert_eq!(cross(&children), Some(AlignItems::End));
}

#[test]
fn test_center_wins_exact_ties() {
    let children = vec![Rect::new(0.0, 0.0, 100.0, 50.0), Rect::new(100.0, 60.0, 100.0, 50.0)];
    assert_eq!(cross(&children), Some(AlignItems::Center));
}

#[test]
fn test_full_width_unaligned_children_stretch() {
    // Each child is parent-wide but shifted 6px, so no edge or center matches.
    let children = vec![Rect::new(6.0, 0.0, 300.0, 50.0), Rect::new(-6.0, 60.0, 300.0, 50.0)];
    assert_eq!(cross(&children), Some(AlignItems::Stretch));
}

#[test]
fn test_unaligned_children_fall_back_to_start() {
    let children = vec![Rect::new(30.0, 0.0, 100.0, 50.0), Rect::new(40.0, 60.0, 120.0, 50.0)];
    assert_eq!(cross(&children), Some(AlignItems::Start));
}

#[test]
fn test_no_children_no_alignment() {
    let alignment = classify_alignment(Axis::Vertical, &PARENT, &[], &HeuristicConfig::default());
    assert_eq!(alignment.align_items, None);
    assert_eq!(alignment.justify_content, None);
}

// ========== justify-content, vertical ==========

#[test]
fn test_vertical_content_filling_parent_starts() {
    let children = vec![Rect::new(0.0, 20.0, 100.0, 200.0), Rect::new(0.0, 230.0, 100.0, 150.0)];
    assert_eq!(main_axis(Axis::Vertical, &children), Some(JustifyContent::Start));
}

#[test]
fn test_vertical_symmetric_gaps_center() {
    let children = vec![Rect::new(0.0, 150.0, 100.0, 40.0), Rect::new(0.0, 210.0, 100.0, 40.0)];
    assert_eq!(main_axis(Axis::Vertical, &children), Some(JustifyContent::Center));
}

#[test]
fn test_vertical_content_near_bottom_ends() {
    let children = vec![Rect::new(0.0, 280.0, 100.0, 50.0), Rect::new(0.0, 340.0, 100.0, 50.0)];
    assert_eq!(main_axis(Axis::Vertical, &children), Some(JustifyContent::End));
}

#[test]
fn test_vertical_content_clearly_closer_to_top_starts() {
    let children = vec![Rect::new(0.0, 50.0, 100.0, 40.0), Rect::new(0.0, 110.0, 100.0, 40.0)];
    assert_eq!(main_axis(Axis::Vertical, &children), Some(JustifyContent::Start));
}

// ========== justify-content, horizontal ==========

#[test]
fn test_horizontal_even_spread_is_space_between() {
    let children = vec![
        Rect::new(30.0, 0.0, 60.0, 40.0),
        Rect::new(120.0, 0.0, 60.0, 40.0),
        Rect::new(210.0, 0.0, 60.0, 40.0),
    ];
    assert_eq!(main_axis(Axis::Horizontal, &children), Some(JustifyContent::SpaceBetween));
}

#[test]
fn test_horizontal_symmetric_gaps_center() {
    let children = vec![Rect::new(90.0, 0.0, 50.0, 40.0), Rect::new(160.0, 0.0, 50.0, 40.0)];
    assert_eq!(main_axis(Axis::Horizontal, &children), Some(JustifyContent::Center));
}

#[test]
fn test_horizontal_flush_left_starts() {
    let children = vec![Rect::new(0.0, 0.0, 50.0, 40.0), Rect::new(60.0, 0.0, 50.0, 40.0)];
    assert_eq!(main_axis(Axis::Horizontal, &children), Some(JustifyContent::Start));
}

#[test]
fn test_horizontal_flush_right_ends() {
    let children = vec![Rect::new(190.0, 0.0, 50.0, 40.0), Rect::new(250.0, 0.0, 50.0, 40.0)];
    assert_eq!(main_axis(Axis::Horizontal, &children), Some(JustifyContent::End));
}

#[test]
fn test_keywords() {
    assert_eq!(AlignItems::Start.to_string(), "flex-start");
    assert_eq!(JustifyContent::SpaceBetween.as_ref(), "space-between");
    assert_eq!(serde_json::to_string(&AlignItems::End).unwrap(), "\"flex-end\"");
}
