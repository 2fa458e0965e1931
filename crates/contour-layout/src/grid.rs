//! Two-dimensional grid recognition.
//!
//! [§ 7.2 Explicit Track Sizing](https://www.w3.org/TR/css-grid-1/#track-sizing)
//!
//! Card galleries and icon matrices are neither a single row nor a single
//! column, so the one-dimensional arrangement pass calls them complex. They
//! are still regular: equal-length rows whose cells line up in columns.
//! Such a set is rendered as a grid with explicit column tracks.

use contour_tree::{Axis, Rect, within};
use serde::Serialize;

use crate::config::HeuristicConfig;
use crate::gap::{measure_gaps, representative_gap};

/// Track sizes and gutters of a detected grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridTemplate {
    /// Width of each column track (widest cell of the column).
    pub columns: Vec<f64>,
    /// Number of rows.
    pub rows: usize,
    /// Horizontal gutter between columns.
    pub column_gap: f64,
    /// Vertical gutter between rows.
    pub row_gap: f64,
}

impl GridTemplate {
    /// Whether every column has the same width.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        self.columns.windows(2).all(|pair| pair[0] == pair[1])
    }
}

/// Recognize a regular matrix of at least two rows and two columns.
///
/// Rows are formed from boxes whose top edges agree within
/// `grid_alignment_tolerance`. Every row must hold the same number of
/// cells, cells must not overlap within a row, rows must not overlap each
/// other, and the n-th cell of every row must start where the n-th cell of
/// the first row starts.
#[must_use]
pub fn detect_grid(children: &[Rect], config: &HeuristicConfig) -> Option<GridTemplate> {
    if children.len() < 4 {
        return None;
    }
    let tolerance = config.grid_alignment_tolerance;

    let mut sorted = children.to_vec();
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let mut rows: Vec<Vec<Rect>> = Vec::new();
    for rect in sorted {
        let same_row = rows
            .last()
            .is_some_and(|row| within(rect.y, row[0].y, tolerance));
        if !same_row {
            rows.push(Vec::new());
        }
        if let Some(row) = rows.last_mut() {
            row.push(rect);
        }
    }

    let columns = rows[0].len();
    if rows.len() < 2 || columns < 2 || rows.iter().any(|row| row.len() != columns) {
        return None;
    }
    for row in &mut rows {
        row.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    let aligned = rows[1..].iter().all(|row| {
        row.iter()
            .zip(&rows[0])
            .all(|(cell, first)| within(cell.x, first.x, tolerance))
    });
    let separated = rows.iter().all(|row| {
        row.windows(2)
            .all(|pair| pair[1].x >= pair[0].right() - config.overlap_tolerance)
    });
    let bands: Vec<Rect> = rows.iter().filter_map(|row| Rect::enclosing(row)).collect();
    let stacked = bands
        .windows(2)
        .all(|pair| pair[1].y >= pair[0].bottom() - config.overlap_tolerance);
    if !(aligned && separated && stacked) {
        return None;
    }

    let widths = (0..columns)
        .map(|c| config.round(rows.iter().map(|row| row[c].width).fold(0.0, f64::max)))
        .collect();
    let column_samples: Vec<f64> = rows
        .iter()
        .flat_map(|row| measure_gaps(row, Axis::Horizontal))
        .collect();

    Some(GridTemplate {
        columns: widths,
        rows: rows.len(),
        column_gap: representative_gap(&column_samples, config),
        row_gap: representative_gap(&measure_gaps(&bands, Axis::Vertical), config),
    })
}
