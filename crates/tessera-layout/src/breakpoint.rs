#![forbid(unsafe_code)]

//! Viewport tiers and width classification.
//!
//! [`Breakpoint`] names a discrete viewport tier. [`Breakpoints`] holds the
//! minimum width of each tier above `Base` and classifies a viewport width
//! into a tier by descending-threshold match (first match wins).
//!
//! # Invariants
//!
//! 1. `Base` has no threshold; every width classifies to some tier.
//! 2. Breakpoint ordinals are `Base=0 .. Xl=4` and order the tiers by width.
//! 3. With strictly ascending thresholds, `classify` is monotone in width.
//!
//! # Failure Modes
//!
//! - Non-finite widths (`NaN`) never satisfy a threshold and classify as `Base`.
//! - Non-ascending thresholds are accepted by `classify` (descending match
//!   still picks the first satisfied tier); `Breakpoints::validate` reports them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named viewport-width tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Always-present fallback tier.
    #[default]
    Base = 0,
    Sm = 1,
    Md = 2,
    Lg = 3,
    Xl = 4,
}

impl Breakpoint {
    /// All tiers, smallest first.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Base,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
    ];

    /// Lowercase label used in configuration keys.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown tier label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBreakpoint(pub String);

impl fmt::Display for UnknownBreakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown breakpoint: {:?}", self.0)
    }
}

impl std::error::Error for UnknownBreakpoint {}

impl FromStr for Breakpoint {
    type Err = UnknownBreakpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Breakpoint::ALL
            .into_iter()
            .find(|bp| bp.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownBreakpoint(s.to_string()))
    }
}

/// Minimum viewport width (in CSS pixels) of each tier above `Base`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub sm: f64,
    pub md: f64,
    pub lg: f64,
    pub xl: f64,
}

impl Breakpoints {
    /// 640 / 768 / 1024 / 1280.
    pub const DEFAULT: Self = Self {
        sm: 640.0,
        md: 768.0,
        lg: 1024.0,
        xl: 1280.0,
    };

    /// Create a custom threshold table.
    #[must_use]
    pub const fn new(sm: f64, md: f64, lg: f64, xl: f64) -> Self {
        Self { sm, md, lg, xl }
    }

    /// Minimum width for a tier. `Base` starts at 0.
    #[must_use]
    pub const fn threshold(&self, bp: Breakpoint) -> f64 {
        match bp {
            Breakpoint::Base => 0.0,
            Breakpoint::Sm => self.sm,
            Breakpoint::Md => self.md,
            Breakpoint::Lg => self.lg,
            Breakpoint::Xl => self.xl,
        }
    }

    /// Classify a viewport width into a tier.
    #[must_use]
    pub fn classify(&self, width: f64) -> Breakpoint {
        [
            Breakpoint::Xl,
            Breakpoint::Lg,
            Breakpoint::Md,
            Breakpoint::Sm,
        ]
        .into_iter()
        .find(|&bp| width >= self.threshold(bp))
        .unwrap_or(Breakpoint::Base)
    }

    /// Report threshold problems. Empty means the table is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let ordered = [self.sm, self.md, self.lg, self.xl];
        if ordered.iter().any(|t| !t.is_finite() || *t < 0.0) {
            errors.push(format!(
                "breakpoint thresholds must be finite and >= 0, got {ordered:?}"
            ));
        }
        if ordered.windows(2).any(|w| w[0] >= w[1]) {
            errors.push(format!(
                "breakpoint thresholds must be strictly ascending, got {ordered:?}"
            ));
        }
        errors
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}
