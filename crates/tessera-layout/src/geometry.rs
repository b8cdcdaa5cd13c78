#![forbid(unsafe_code)]

//! Logical-to-percentage geometry and offset translation.
//!
//! A locator positioned inside a section with a [`LogicalSize`] and carrying
//! a [`LogicalRect`] is snapped and mapped to percentages of the canvas.
//! Otherwise its literal [`Rect`] is used as-is, which may be partial.
//!
//! # Invariants
//!
//! 1. `left = x / W * 100%`, `top = y / H * 100%`, `width = w / W * 100%`,
//!    `height = h / H * 100%`, after snapping.
//! 2. Numeric offsets become percentages of the logical extent on their own
//!    axis when a logical size exists, else pixels. String offsets pass
//!    through unchanged.
//! 3. The offset translation is appended after any caller transform.
//!
//! # Failure Modes
//!
//! - A logical size that is not finite and positive is treated as absent so
//!   no division by zero can leak `inf`/`NaN` percentages downstream.

use crate::{Dimension, LogicalRect, LogicalSize, Rect, SnapConfig};

/// A rect after geometry resolution and constraint application.
///
/// `right`/`bottom` are only ever set by pinning constraints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedRect {
    pub left: Option<Dimension>,
    pub top: Option<Dimension>,
    pub right: Option<Dimension>,
    pub bottom: Option<Dimension>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
}

impl From<&Rect> for ResolvedRect {
    fn from(rect: &Rect) -> Self {
        Self {
            left: rect.left.clone(),
            top: rect.top.clone(),
            right: None,
            bottom: None,
            width: rect.width.clone(),
            height: rect.height.clone(),
        }
    }
}

/// Where a resolved rect came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometrySource {
    /// Mapped from a logical rect onto the section canvas.
    Logical,
    /// Copied from a literal rect.
    Literal,
    /// Nothing to position with.
    Unpositioned,
}

/// Map a logical rect onto percentages of the canvas.
#[must_use]
pub fn logical_to_percent(rect: LogicalRect, size: LogicalSize) -> ResolvedRect {
    ResolvedRect {
        left: Some(Dimension::Percent(rect.x / size.width * 100.0)),
        top: Some(Dimension::Percent(rect.y / size.height * 100.0)),
        right: None,
        bottom: None,
        width: Some(Dimension::Percent(rect.w / size.width * 100.0)),
        height: Some(Dimension::Percent(rect.h / size.height * 100.0)),
    }
}

/// Resolve a locator's positioning rect.
#[must_use]
pub fn resolve_rect(
    rect: Option<&Rect>,
    logical_rect: Option<LogicalRect>,
    logical_size: Option<LogicalSize>,
    snap: Option<&SnapConfig>,
) -> (ResolvedRect, GeometrySource) {
    let usable_size = logical_size.filter(LogicalSize::is_usable);
    if let (Some(size), Some(lrect)) = (usable_size, logical_rect) {
        let snapped = snap.map_or(lrect, |cfg| cfg.snap_rect(lrect));
        tracing::trace!(
            x = snapped.x,
            y = snapped.y,
            w = snapped.w,
            h = snapped.h,
            "logical rect snapped"
        );
        return (logical_to_percent(snapped, size), GeometrySource::Logical);
    }
    match rect {
        Some(rect) => (ResolvedRect::from(rect), GeometrySource::Literal),
        None => (ResolvedRect::default(), GeometrySource::Unpositioned),
    }
}

/// Convert one offset for its axis. `extent` is the logical extent on that
/// axis, if the section has a logical size.
#[must_use]
pub fn resolve_offset(offset: &Dimension, extent: Option<f64>) -> Dimension {
    match (offset, extent) {
        (Dimension::Px(n), Some(extent)) if extent.is_finite() && extent > 0.0 => {
            Dimension::Percent(n / extent * 100.0)
        }
        _ => offset.clone(),
    }
}

/// Build the offset translation. `None` when neither axis has an offset.
#[must_use]
pub fn offset_translation(
    offset_x: Option<&Dimension>,
    offset_y: Option<&Dimension>,
    logical_size: Option<LogicalSize>,
) -> Option<String> {
    if offset_x.is_none() && offset_y.is_none() {
        return None;
    }
    let x = offset_x.map_or(Dimension::ZERO, |o| {
        resolve_offset(o, logical_size.map(|s| s.width))
    });
    let y = offset_y.map_or(Dimension::ZERO, |o| {
        resolve_offset(o, logical_size.map(|s| s.height))
    });
    Some(format!("translate({x}, {y})"))
}

/// Concatenate the caller transform with the offset translation.
#[must_use]
pub fn compose_transform(caller: Option<&str>, translation: Option<&str>) -> Option<String> {
    match (caller.map(str::trim).filter(|s| !s.is_empty()), translation) {
        (Some(caller), Some(translation)) => Some(format!("{caller} {translation}")),
        (Some(caller), None) => Some(caller.to_string()),
        (None, Some(translation)) => Some(translation.to_string()),
        (None, None) => None,
    }
}
