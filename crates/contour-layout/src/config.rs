//! Heuristic thresholds.
//!
//! Every tolerance, ratio and cap used by the inference passes lives here so
//! callers can substitute values and tests can probe boundaries directly.
//! The struct deserializes with `#[serde(default)]`, so a configuration file
//! only needs the fields it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable thresholds for layout inference. Lengths are design-space pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Overlap allowed between consecutive siblings that still count as
    /// stacked along an axis.
    pub overlap_tolerance: f64,
    /// Containment margin for ordinary children.
    pub containment_tolerance: f64,
    /// Containment margin for decorative children.
    pub decorative_containment_tolerance: f64,
    /// A non-decorative child must be smaller than this fraction of its
    /// container on both axes to be regrouped.
    pub containment_size_ratio: f64,
    /// Thin bars are shorter than this...
    pub decorative_max_bar_height: f64,
    /// ...and wider than this.
    pub decorative_min_bar_width: f64,
    /// Indicator-named nodes are decorative below this height.
    pub indicator_max_height: f64,
    /// Case-insensitive name fragment marking an indicator.
    pub indicator_name: String,
    /// Gaps larger than this multiple of the median gap are outliers.
    pub outlier_factor: f64,
    /// Minimum fraction of gap samples outlier filtering must keep;
    /// otherwise the unfiltered samples are used.
    pub min_retained_fraction: f64,
    /// Largest plausible gap.
    pub max_gap: f64,
    /// Gap used when the estimate exceeds `max_gap`.
    pub fallback_gap: f64,
    /// Distance between centers that still counts as centered.
    pub center_tolerance: f64,
    /// Distance between edges that still counts as aligned.
    pub edge_tolerance: f64,
    /// Share of children a cross-axis category needs in larger groups.
    pub majority_threshold: f64,
    /// Share of children a cross-axis category needs in small groups.
    pub small_group_threshold: f64,
    /// Group size from which `majority_threshold` applies.
    pub majority_min_group: usize,
    /// Cross size difference that still counts as stretched.
    pub stretch_tolerance: f64,
    /// Content spanning more than this fraction of the parent's main size
    /// is packed at the start.
    pub content_fill_ratio: f64,
    /// Edge gaps whose difference is below this fraction of their sum are
    /// symmetric (vertical flow).
    pub symmetry_ratio: f64,
    /// Edge gap below which vertical content counts as pinned to that edge.
    pub vertical_edge_threshold: f64,
    /// Edge gap threshold for horizontal flow (pinning and symmetry).
    pub horizontal_edge_threshold: f64,
    /// One edge gap below this fraction of the other means content leans
    /// toward that edge.
    pub edge_gap_ratio: f64,
    /// Distance from the uniform gap that still counts as evenly spread.
    pub space_between_tolerance: f64,
    /// Horizontal center distance under which an absolute child is centered.
    pub near_center_tolerance: f64,
    /// Edge distance for grouping siblings into grid rows and columns.
    pub grid_alignment_tolerance: f64,
    /// Maximum tree depth; deeper subtrees are cut off.
    pub max_depth: usize,
    /// Decimal places kept in emitted lengths.
    pub decimal_places: i32,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            overlap_tolerance: 5.0,
            containment_tolerance: 10.0,
            decorative_containment_tolerance: 30.0,
            containment_size_ratio: 0.95,
            decorative_max_bar_height: 10.0,
            decorative_min_bar_width: 20.0,
            indicator_max_height: 30.0,
            indicator_name: "indicator".to_string(),
            outlier_factor: 2.5,
            min_retained_fraction: 0.5,
            max_gap: 200.0,
            fallback_gap: 24.0,
            center_tolerance: 2.0,
            edge_tolerance: 5.0,
            majority_threshold: 0.6,
            small_group_threshold: 0.5,
            majority_min_group: 3,
            stretch_tolerance: 10.0,
            content_fill_ratio: 0.8,
            symmetry_ratio: 0.15,
            vertical_edge_threshold: 40.0,
            horizontal_edge_threshold: 20.0,
            edge_gap_ratio: 0.7,
            space_between_tolerance: 10.0,
            near_center_tolerance: 10.0,
            grid_alignment_tolerance: 5.0,
            max_depth: 256,
            decimal_places: 2,
        }
    }
}

/// A configuration value outside its meaningful range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A length must be finite and non-negative.
    #[error("`{field}` must be a finite, non-negative number (got {value})")]
    InvalidLength {
        /// Offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A ratio must lie in `(0, 1]`.
    #[error("`{field}` must lie in (0, 1] (got {value})")]
    InvalidRatio {
        /// Offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The outlier factor must be at least 1 or it would discard the median.
    #[error("`outlier_factor` must be at least 1 (got {0})")]
    InvalidOutlierFactor(f64),
    /// Trees need at least one level below the root.
    #[error("`max_depth` must be at least 1")]
    ZeroDepth,
    /// Rounding precision outside what `f64` can represent meaningfully.
    #[error("`decimal_places` must lie in 0..=6 (got {0})")]
    InvalidPrecision(i32),
}

impl HeuristicConfig {
    /// Check every threshold for a usable value.
    ///
    /// # Errors
    ///
    /// Returns the first field found outside its range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("overlap_tolerance", self.overlap_tolerance),
            ("containment_tolerance", self.containment_tolerance),
            (
                "decorative_containment_tolerance",
                self.decorative_containment_tolerance,
            ),
            ("decorative_max_bar_height", self.decorative_max_bar_height),
            ("decorative_min_bar_width", self.decorative_min_bar_width),
            ("indicator_max_height", self.indicator_max_height),
            ("max_gap", self.max_gap),
            ("fallback_gap", self.fallback_gap),
            ("center_tolerance", self.center_tolerance),
            ("edge_tolerance", self.edge_tolerance),
            ("stretch_tolerance", self.stretch_tolerance),
            ("vertical_edge_threshold", self.vertical_edge_threshold),
            ("horizontal_edge_threshold", self.horizontal_edge_threshold),
            ("space_between_tolerance", self.space_between_tolerance),
            ("near_center_tolerance", self.near_center_tolerance),
            ("grid_alignment_tolerance", self.grid_alignment_tolerance),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidLength { field, value });
            }
        }

        let ratios = [
            ("containment_size_ratio", self.containment_size_ratio),
            ("min_retained_fraction", self.min_retained_fraction),
            ("majority_threshold", self.majority_threshold),
            ("small_group_threshold", self.small_group_threshold),
            ("content_fill_ratio", self.content_fill_ratio),
            ("symmetry_ratio", self.symmetry_ratio),
            ("edge_gap_ratio", self.edge_gap_ratio),
        ];
        for (field, value) in ratios {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidRatio { field, value });
            }
        }

        if !(self.outlier_factor >= 1.0 && self.outlier_factor.is_finite()) {
            return Err(ConfigError::InvalidOutlierFactor(self.outlier_factor));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if !(0..=6).contains(&self.decimal_places) {
            return Err(ConfigError::InvalidPrecision(self.decimal_places));
        }
        Ok(())
    }

    /// Round a length to the configured precision.
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        contour_tree::round_to(value, self.decimal_places)
    }

    /// Cross-axis majority share required for a group of `total` children.
    #[must_use]
    pub fn majority_for(&self, total: usize) -> f64 {
        if total >= self.majority_min_group {
            self.majority_threshold
        } else {
            self.small_group_threshold
        }
    }
}
