//! Representative spacing between consecutive siblings.
//!
//! Designers space items by eye, so measured gaps jitter by a pixel or two
//! and the odd section break is far larger than the rest. The estimate is a
//! mean over the gaps that survive a median-based outlier filter.

use contour_tree::{Axis, Rect};

use crate::arrangement::sorted_along;
use crate::config::HeuristicConfig;

/// Gaps between consecutive boxes along `axis`, after sorting by leading
/// edge. Overlapping neighbours yield negative gaps.
#[must_use]
pub fn measure_gaps(boxes: &[Rect], axis: Axis) -> Vec<f64> {
    sorted_along(boxes, axis)
        .windows(2)
        .map(|pair| pair[1].start(axis) - pair[0].end(axis))
        .collect()
}

/// One representative gap for siblings flowing along `axis`.
#[must_use]
pub fn estimate_gap(boxes: &[Rect], axis: Axis, config: &HeuristicConfig) -> f64 {
    representative_gap(&measure_gaps(boxes, axis), config)
}

/// Collapse gap samples into one value.
///
/// 1. Negative samples (overlaps) are discarded; none left gives 0.
/// 2. A single sample is rounded and returned as is.
/// 3. Otherwise samples above `outlier_factor × median` are dropped, unless
///    that would keep fewer than `min_retained_fraction` of them.
/// 4. The mean of the kept samples is rounded and clamped: a result above
///    `max_gap` is implausible and replaced by `fallback_gap`.
#[must_use]
pub fn representative_gap(samples: &[f64], config: &HeuristicConfig) -> f64 {
    let mut gaps: Vec<f64> = samples.iter().copied().filter(|g| *g >= 0.0).collect();
    match gaps.as_slice() {
        [] => return 0.0,
        [only] => return config.round(*only),
        _ => {}
    }

    gaps.sort_by(f64::total_cmp);
    let cutoff = median_of_sorted(&gaps) * config.outlier_factor;
    let filtered: Vec<f64> = gaps.iter().copied().filter(|g| *g <= cutoff).collect();
    let retained = if (filtered.len() as f64) < gaps.len() as f64 * config.min_retained_fraction {
        &gaps
    } else {
        &filtered
    };

    let mean = retained.iter().sum::<f64>() / retained.len() as f64;
    let gap = config.round(mean);
    if gap < 0.0 {
        0.0
    } else if gap > config.max_gap {
        config.fallback_gap
    } else {
        gap
    }
}

/// Median of a sorted, non-empty slice.
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
