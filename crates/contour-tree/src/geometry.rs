//! Bounding-box geometry in design-space coordinates.
//!
//! All boxes are axis-aligned and absolute: `x`/`y` locate the top-left
//! corner in the coordinate space of the whole document, not of the parent.

use serde::Serialize;

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The x axis (left to right).
    Horizontal,
    /// The y axis (top to bottom).
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// A rectangle positioned in design space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f64,
    /// Vertical position of the top-left corner.
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// The zero-size box at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a rectangle from its origin and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal center.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Leading edge along `axis` (left or top).
    #[must_use]
    pub const fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Trailing edge along `axis` (right or bottom).
    #[must_use]
    pub fn end(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.right(),
            Axis::Vertical => self.bottom(),
        }
    }

    /// Extent along `axis` (width or height).
    #[must_use]
    pub const fn size(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Center along `axis`.
    #[must_use]
    pub fn center(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.center_x(),
            Axis::Vertical => self.center_y(),
        }
    }

    /// Describe why this box cannot be used for geometry, if it can't.
    ///
    /// A usable box has finite coordinates and a non-negative size.
    #[must_use]
    pub fn defect(&self) -> Option<&'static str> {
        if ![self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
        {
            Some("non-finite coordinate")
        } else if self.width < 0.0 {
            Some("negative width")
        } else if self.height < 0.0 {
            Some("negative height")
        } else {
            None
        }
    }

    /// Whether `self` lies within `outer`, with every edge allowed to
    /// overshoot by up to `tolerance`.
    #[must_use]
    pub fn is_within(&self, outer: &Self, tolerance: f64) -> bool {
        self.x >= outer.x - tolerance
            && self.right() <= outer.right() + tolerance
            && self.y >= outer.y - tolerance
            && self.bottom() <= outer.bottom() + tolerance
    }

    /// Whether the two boxes share interior area.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Smallest box enclosing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Smallest box enclosing every rectangle, or `None` for an empty input.
    #[must_use]
    pub fn enclosing<'a>(rects: impl IntoIterator<Item = &'a Self>) -> Option<Self> {
        rects
            .into_iter()
            .fold(None, |acc: Option<Self>, r| {
                Some(acc.map_or(*r, |a| a.union(r)))
            })
    }

    /// Offset of this box's origin from `parent`'s origin.
    #[must_use]
    pub fn offset_from(&self, parent: &Self) -> (f64, f64) {
        (self.x - parent.x, self.y - parent.y)
    }
}

/// Edge sizes for padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f64,
    /// Right edge size.
    pub right: f64,
    /// Bottom edge size.
    pub bottom: f64,
    /// Left edge size.
    pub left: f64,
}

impl EdgeSizes {
    /// Create edge sizes in CSS order (top, right, bottom, left).
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same size on every side.
    #[must_use]
    pub const fn uniform(size: f64) -> Self {
        Self::new(size, size, size, size)
    }

    /// Whether every side is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

/// Whether `a` and `b` differ by at most `tolerance`.
#[must_use]
pub fn within(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Round `value` to `places` decimal places, halves away from zero.
///
/// Binary floating point cannot hold most decimal halves exactly (`12.345`
/// is stored as `12.3449999…`), so the scaled value is nudged by a relative
/// epsilon before rounding.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10_f64.powi(places);
    let scaled = value * factor;
    let nudged = scaled + scaled.signum() * scaled.abs().max(1.0) * 1e-12;
    let rounded = nudged.round() / factor;
    // Avoid handing out -0.0.
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_decimal_halves() {
        assert_eq!(round_to(12.345, 2), 12.35);
        assert_eq!(round_to(22.345 - 10.0, 2), 12.35);
        assert_eq!(round_to(1.005, 2), 1.01);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(40.0, 2), 40.0);
    }

    #[test]
    fn test_round_to_never_negative_zero() {
        let rounded = round_to(-0.001, 2);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());
    }

    #[test]
    fn test_is_within_tolerance() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(Rect::new(-10.0, 5.0, 50.0, 50.0).is_within(&outer, 10.0));
        assert!(!Rect::new(-10.5, 5.0, 50.0, 50.0).is_within(&outer, 10.0));
        assert!(Rect::new(60.0, 60.0, 50.0, 50.0).is_within(&outer, 10.0));
    }

    #[test]
    fn test_enclosing() {
        let rects = [
            Rect::new(10.0, 20.0, 30.0, 40.0),
            Rect::new(50.0, 0.0, 10.0, 10.0),
        ];
        assert_eq!(
            Rect::enclosing(&rects),
            Some(Rect::new(10.0, 0.0, 50.0, 60.0))
        );
        assert_eq!(Rect::enclosing(&[]), None);
    }

    #[test]
    fn test_defect() {
        assert_eq!(Rect::new(0.0, 0.0, 1.0, 1.0).defect(), None);
        assert_eq!(
            Rect::new(0.0, 0.0, -1.0, 1.0).defect(),
            Some("negative width")
        );
        assert_eq!(
            Rect::new(f64::NAN, 0.0, 1.0, 1.0).defect(),
            Some("non-finite coordinate")
        );
    }
}
