#![forbid(unsafe_code)]

//! Fixed positioning overrides for absolutely positioned locators.
//!
//! Constraints are a closed set: centering, pinning, aspect-ratio derivation
//! and axis locks. They run after geometry resolution, in this order:
//! aspect ratio, centering, left/top pinning, right/bottom pinning.
//!
//! # Invariants
//!
//! 1. Aspect-ratio derivation only fires when exactly one of width/height is
//!    a bare pixel number. Percentage rects (from logical geometry) are never
//!    derived.
//! 2. Centering sets `left`/`top` to `50%` and adds no transform.
//! 3. Axis locks discard the offset on that axis whatever its source.

use serde::{Deserialize, Serialize};

use crate::{Dimension, ResolvedRect};

/// Positioning overrides for one locator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocatorConstraints {
    pub center_x: bool,
    pub center_y: bool,
    pub pin_left: bool,
    pub pin_right: bool,
    pub pin_top: bool,
    pub pin_bottom: bool,
    /// Width divided by height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_aspect_ratio: Option<f64>,
    pub lock_x: bool,
    pub lock_y: bool,
}

impl LocatorConstraints {
    /// Whether any constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the rect-shaping constraints.
    #[must_use]
    pub fn apply(&self, mut rect: ResolvedRect) -> ResolvedRect {
        if let Some(ratio) = self.keep_aspect_ratio {
            derive_aspect(&mut rect, ratio);
        }
        if self.center_x {
            rect.left = Some(Dimension::half());
        }
        if self.center_y {
            rect.top = Some(Dimension::half());
        }
        if self.pin_left {
            rect.left = Some(rect.left.take().unwrap_or(Dimension::ZERO));
        }
        if self.pin_top {
            rect.top = Some(rect.top.take().unwrap_or(Dimension::ZERO));
        }
        if self.pin_right {
            rect.right = Some(Dimension::ZERO);
        }
        if self.pin_bottom {
            rect.bottom = Some(Dimension::ZERO);
        }
        rect
    }

    /// Drop offsets on locked axes.
    #[must_use]
    pub fn filter_offsets<'a>(
        &self,
        offset_x: Option<&'a Dimension>,
        offset_y: Option<&'a Dimension>,
    ) -> (Option<&'a Dimension>, Option<&'a Dimension>) {
        (
            offset_x.filter(|_| !self.lock_x),
            offset_y.filter(|_| !self.lock_y),
        )
    }
}

fn derive_aspect(rect: &mut ResolvedRect, ratio: f64) {
    if !(ratio.is_finite() && ratio > 0.0) {
        return;
    }
    let width = rect.width.as_ref().and_then(Dimension::as_px);
    let height = rect.height.as_ref().and_then(Dimension::as_px);
    match (width, height) {
        (Some(w), None) => rect.height = Some(Dimension::Px(w / ratio)),
        (None, Some(h)) => rect.width = Some(Dimension::Px(h * ratio)),
        _ => {}
    }
}
