#![forbid(unsafe_code)]

//! Geometric value types: dimensions, literal rects, and logical coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A length that is either a bare pixel number, a computed percentage, or an
/// author-supplied unit string passed through untouched.
///
/// Bare numbers deserialize as [`Dimension::Px`]; every string deserializes
/// as [`Dimension::Raw`]. [`Dimension::Percent`] is produced by geometry
/// resolution and serializes as a `"N%"` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DimensionRepr", into = "DimensionRepr")]
pub enum Dimension {
    Px(f64),
    Percent(f64),
    Raw(String),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Number(f64),
    Text(String),
}

impl From<DimensionRepr> for Dimension {
    fn from(repr: DimensionRepr) -> Self {
        match repr {
            DimensionRepr::Number(n) => Self::Px(n),
            DimensionRepr::Text(s) => Self::Raw(s),
        }
    }
}

impl From<Dimension> for DimensionRepr {
    fn from(dim: Dimension) -> Self {
        match dim {
            Dimension::Px(n) => Self::Number(n),
            other => Self::Text(other.to_string()),
        }
    }
}

impl Dimension {
    /// Zero pixels.
    pub const ZERO: Self = Self::Px(0.0);

    /// Whether this is a bare numeric pixel value.
    #[must_use]
    pub const fn is_bare_number(&self) -> bool {
        matches!(self, Self::Px(_))
    }

    /// The pixel value, if this is a bare number.
    #[must_use]
    pub const fn as_px(&self) -> Option<f64> {
        match self {
            Self::Px(n) => Some(*n),
            _ => None,
        }
    }

    /// Half of the reference box.
    #[must_use]
    pub const fn half() -> Self {
        Self::Percent(50.0)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(n) => write!(f, "{n}px"),
            Self::Percent(p) => write!(f, "{p}%"),
            Self::Raw(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Dimension {
    fn from(n: f64) -> Self {
        Self::Px(n)
    }
}

impl From<&str> for Dimension {
    fn from(s: &str) -> Self {
        Self::Raw(s.to_string())
    }
}

impl From<String> for Dimension {
    fn from(s: String) -> Self {
        Self::Raw(s)
    }
}

/// Literal geometry. Any side may be absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
}

impl Rect {
    /// A fully specified pixel rect.
    #[must_use]
    pub fn px(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left: Some(Dimension::Px(left)),
            top: Some(Dimension::Px(top)),
            width: Some(Dimension::Px(width)),
            height: Some(Dimension::Px(height)),
        }
    }

    /// Whether both width and height are present.
    #[must_use]
    pub const fn has_size(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }
}

/// The virtual design canvas of a free-mode section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both extents are finite and positive.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A locator's geometry in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl LogicalRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Axis-aligned intersection area; zero when the rects only touch.
    #[must_use]
    pub fn intersection_area(&self, other: &Self) -> f64 {
        let overlap_w = self.right().min(other.right()) - self.x.max(other.x);
        let overlap_h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        overlap_w.max(0.0) * overlap_h.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_display() {
        assert_eq!(Dimension::Px(12.0).to_string(), "12px");
        assert_eq!(Dimension::Percent(12.5).to_string(), "12.5%");
        assert_eq!(Dimension::Raw("calc(100% - 2rem)".into()).to_string(), "calc(100% - 2rem)");
    }

    #[test]
    fn dimension_serde_numbers_and_strings() {
        let n: Dimension = serde_json::from_str("40").unwrap();
        assert_eq!(n, Dimension::Px(40.0));
        let s: Dimension = serde_json::from_str(r#""3rem""#).unwrap();
        assert_eq!(s, Dimension::Raw("3rem".into()));
        assert_eq!(
            serde_json::to_string(&Dimension::Percent(20.0)).unwrap(),
            r#""20%""#
        );
    }

    #[test]
    fn bare_number_detection() {
        assert!(Dimension::Px(1.0).is_bare_number());
        assert!(!Dimension::Percent(1.0).is_bare_number());
        assert!(!Dimension::from("10px").is_bare_number());
    }

    #[test]
    fn intersection_area_cases() {
        let a = LogicalRect::new(0.0, 0.0, 100.0, 100.0);
        let b = LogicalRect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection_area(&b), 2500.0);
        assert_eq!(b.intersection_area(&a), 2500.0);

        let touching = LogicalRect::new(100.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersection_area(&touching), 0.0);

        let apart = LogicalRect::new(500.0, 500.0, 10.0, 10.0);
        assert_eq!(a.intersection_area(&apart), 0.0);
    }

    #[test]
    fn rect_has_size() {
        assert!(Rect::px(0.0, 0.0, 10.0, 10.0).has_size());
        let partial = Rect {
            width: Some(Dimension::Px(10.0)),
            ..Rect::default()
        };
        assert!(!partial.has_size());
    }

    #[test]
    fn logical_size_usable() {
        assert!(LogicalSize::new(800.0, 600.0).is_usable());
        assert!(!LogicalSize::new(0.0, 600.0).is_usable());
        assert!(!LogicalSize::new(f64::NAN, 600.0).is_usable());
    }
}
