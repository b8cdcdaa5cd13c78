#![forbid(unsafe_code)]

//! Viewport-width conditional overrides.
//!
//! A [`LayoutRule`] carries a width condition and optional overrides for
//! `hidden`, `offsetX`, `offsetY` and `zIndex`. Rules are evaluated in
//! declaration order; every matching rule overwrites the fields it sets, so
//! the last applicable match wins per field, independently.
//!
//! # Condition grammar
//!
//! | Form    | Matches             |
//! |---------|---------------------|
//! | `<N`    | `width < N`         |
//! | `>N`    | `width > N`         |
//! | `N-M`   | `N <= width <= M`   |
//!
//! Anything else never matches. Malformed conditions are not errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Dimension;

/// A parsed width condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleCondition {
    Below(f64),
    Above(f64),
    Between(f64, f64),
}

impl RuleCondition {
    /// Parse one of the three condition forms.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        if let Some(rest) = s.strip_prefix('<') {
            return parse_number(rest).map(Self::Below);
        }
        if let Some(rest) = s.strip_prefix('>') {
            return parse_number(rest).map(Self::Above);
        }
        let (lo, hi) = s.split_once('-')?;
        Some(Self::Between(parse_number(lo)?, parse_number(hi)?))
    }

    /// Whether a viewport width satisfies this condition.
    #[must_use]
    pub fn matches(&self, width: f64) -> bool {
        match *self {
            Self::Below(n) => width < n,
            Self::Above(n) => width > n,
            Self::Between(lo, hi) => lo <= width && width <= hi,
        }
    }
}

impl fmt::Display for RuleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Below(n) => write!(f, "<{n}"),
            Self::Above(n) => write!(f, ">{n}"),
            Self::Between(lo, hi) => write!(f, "{lo}-{hi}"),
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s.starts_with(['+', '-']) {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Whether a condition string matches a viewport width.
#[must_use]
pub fn matches_width(condition: &str, width: f64) -> bool {
    RuleCondition::parse(condition).is_some_and(|c| c.matches(width))
}

/// A conditional override keyed on viewport width.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRule {
    /// Width condition, e.g. `"<600"`, `">1200"`, `"600-1024"`.
    pub when: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl LayoutRule {
    #[must_use]
    pub fn when(condition: impl Into<String>) -> Self {
        Self {
            when: condition.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    #[must_use]
    pub fn offset_x(mut self, offset: impl Into<Dimension>) -> Self {
        self.offset_x = Some(offset.into());
        self
    }

    #[must_use]
    pub fn offset_y(mut self, offset: impl Into<Dimension>) -> Self {
        self.offset_y = Some(offset.into());
        self
    }

    #[must_use]
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Whether this rule applies at a viewport width.
    #[must_use]
    pub fn applies(&self, width: f64) -> bool {
        matches_width(&self.when, width)
    }
}

/// Field values after rule evaluation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleOverrides {
    pub hidden: bool,
    pub offset_x: Option<Dimension>,
    pub offset_y: Option<Dimension>,
    pub z_index: Option<i32>,
}

/// Evaluate rules in declaration order on top of `base`.
#[must_use]
pub fn apply_rules(rules: &[LayoutRule], width: f64, base: RuleOverrides) -> RuleOverrides {
    rules
        .iter()
        .filter(|rule| rule.applies(width))
        .fold(base, |mut acc, rule| {
            if let Some(hidden) = rule.hidden {
                acc.hidden = hidden;
            }
            if let Some(ref x) = rule.offset_x {
                acc.offset_x = Some(x.clone());
            }
            if let Some(ref y) = rule.offset_y {
                acc.offset_y = Some(y.clone());
            }
            if let Some(z) = rule.z_index {
                acc.z_index = Some(z);
            }
            acc
        })
}
