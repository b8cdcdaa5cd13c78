#![forbid(unsafe_code)]

//! Grid quantization of logical coordinates.
//!
//! # Invariants
//!
//! 1. Strict mode always returns the nearest grid multiple.
//! 2. Soft mode returns the nearest grid multiple only when it is within
//!    `threshold` of the input; otherwise the input is returned unchanged.
//! 3. Snapping the x axis also snaps `w`; snapping the y axis also snaps `h`.
//!
//! # Failure Modes
//!
//! - A grid that is not finite and positive disables snapping entirely.

use serde::{Deserialize, Serialize};

use crate::LogicalRect;

/// How aggressively values are pulled onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapMode {
    #[default]
    Strict,
    Soft,
}

/// Which axes are quantized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapAxes {
    X,
    Y,
    #[default]
    Both,
}

impl SnapAxes {
    #[must_use]
    pub const fn snaps_x(self) -> bool {
        matches!(self, Self::X | Self::Both)
    }

    #[must_use]
    pub const fn snaps_y(self) -> bool {
        matches!(self, Self::Y | Self::Both)
    }
}

/// Grid quantization policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub grid: f64,
    pub mode: SnapMode,
    pub axes: SnapAxes,
    pub threshold: f64,
}

impl SnapConfig {
    /// Strict snapping on both axes.
    #[must_use]
    pub const fn grid(grid: f64) -> Self {
        Self {
            grid,
            mode: SnapMode::Strict,
            axes: SnapAxes::Both,
            threshold: 0.0,
        }
    }

    /// Soft snapping on both axes with a tolerance.
    #[must_use]
    pub const fn soft(grid: f64, threshold: f64) -> Self {
        Self {
            grid,
            mode: SnapMode::Soft,
            axes: SnapAxes::Both,
            threshold,
        }
    }

    #[must_use]
    pub const fn with_axes(mut self, axes: SnapAxes) -> Self {
        self.axes = axes;
        self
    }

    /// Quantize a single value under this policy.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        snap(value, self.grid, self.mode, self.threshold)
    }

    /// Quantize a logical rect, coupling `w` to x and `h` to y.
    #[must_use]
    pub fn snap_rect(&self, rect: LogicalRect) -> LogicalRect {
        let mut out = rect;
        if self.axes.snaps_x() {
            out.x = self.apply(rect.x);
            out.w = self.apply(rect.w);
        }
        if self.axes.snaps_y() {
            out.y = self.apply(rect.y);
            out.h = self.apply(rect.h);
        }
        out
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self::grid(0.0)
    }
}

/// Section snap setting: a bare grid size or a full config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapSpec {
    Grid(f64),
    Config(SnapConfig),
}

impl SnapSpec {
    /// Expand the numeric shorthand: `n` ≡ `{grid: n, strict, both, 0}`.
    #[must_use]
    pub const fn config(&self) -> SnapConfig {
        match *self {
            Self::Grid(grid) => SnapConfig::grid(grid),
            Self::Config(config) => config,
        }
    }
}

impl From<f64> for SnapSpec {
    fn from(grid: f64) -> Self {
        Self::Grid(grid)
    }
}

impl From<SnapConfig> for SnapSpec {
    fn from(config: SnapConfig) -> Self {
        Self::Config(config)
    }
}

/// Quantize `value` to a multiple of `grid`.
#[must_use]
pub fn snap(value: f64, grid: f64, mode: SnapMode, threshold: f64) -> f64 {
    if !(grid.is_finite() && grid > 0.0) {
        return value;
    }
    let rounded = (value / grid).round() * grid;
    match mode {
        SnapMode::Strict => rounded,
        SnapMode::Soft if (rounded - value).abs() <= threshold => rounded,
        SnapMode::Soft => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_rounds_to_nearest() {
        assert_eq!(snap(17.0, 10.0, SnapMode::Strict, 0.0), 20.0);
        assert_eq!(snap(14.0, 10.0, SnapMode::Strict, 0.0), 10.0);
        assert_eq!(snap(-6.0, 4.0, SnapMode::Strict, 0.0), -8.0);
    }

    #[test]
    fn soft_respects_threshold() {
        assert_eq!(snap(17.0, 10.0, SnapMode::Soft, 2.0), 17.0);
        assert_eq!(snap(18.0, 10.0, SnapMode::Soft, 2.0), 20.0);
        assert_eq!(snap(22.0, 10.0, SnapMode::Soft, 2.0), 20.0);
    }

    #[test]
    fn zero_grid_is_identity() {
        assert_eq!(snap(17.3, 0.0, SnapMode::Strict, 0.0), 17.3);
        assert_eq!(snap(17.3, f64::NAN, SnapMode::Strict, 0.0), 17.3);
    }

    #[test]
    fn axis_coupling() {
        let rect = LogicalRect::new(13.0, 13.0, 27.0, 27.0);
        let x_only = SnapConfig::grid(10.0).with_axes(SnapAxes::X).snap_rect(rect);
        assert_eq!(x_only, LogicalRect::new(10.0, 13.0, 30.0, 27.0));

        let y_only = SnapConfig::grid(10.0).with_axes(SnapAxes::Y).snap_rect(rect);
        assert_eq!(y_only, LogicalRect::new(13.0, 10.0, 27.0, 30.0));

        let both = SnapConfig::grid(10.0).snap_rect(rect);
        assert_eq!(both, LogicalRect::new(10.0, 10.0, 30.0, 30.0));
    }

    #[test]
    fn numeric_shorthand_expands() {
        let spec: SnapSpec = serde_json::from_str("8").unwrap();
        assert_eq!(spec.config(), SnapConfig::grid(8.0));

        let spec: SnapSpec =
            serde_json::from_str(r#"{"grid": 5, "mode": "soft", "axes": "x", "threshold": 1}"#)
                .unwrap();
        assert_eq!(
            spec.config(),
            SnapConfig::soft(5.0, 1.0).with_axes(SnapAxes::X)
        );
    }
}
