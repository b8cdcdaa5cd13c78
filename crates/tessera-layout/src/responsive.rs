#![forbid(unsafe_code)]

//! Responsive values: apply different values based on breakpoint.
//!
//! [`Responsive<T>`] is either a plain value that applies at every tier, or a
//! partial map from [`Breakpoint`] tiers to values. A tier without its own
//! entry falls back to the `base` entry directly; there is no inheritance
//! through intermediate tiers.
//!
//! # Usage
//!
//! ```
//! use tessera_layout::{Breakpoint, Responsive};
//!
//! let gap = Responsive::new(8.0).at(Breakpoint::Md, 16.0);
//! assert_eq!(gap.resolve(Breakpoint::Sm), Some(&8.0));
//! assert_eq!(gap.resolve(Breakpoint::Md), Some(&16.0));
//! assert_eq!(gap.resolve(Breakpoint::Lg), Some(&8.0));
//! ```
//!
//! # Invariants
//!
//! 1. A `Static` value resolves to itself at every tier.
//! 2. A tiered value resolves to `value[tier]`, else `value.base`.
//! 3. `resolve()` never yields `None` when a base value exists.
//!
//! # Serialization
//!
//! A responsive value deserializes from either a plain `T` or an object whose
//! only keys are `base`, `sm`, `md`, `lg`, `xl`.

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::Breakpoint;

/// Per-tier slots of a tiered responsive value.
///
/// Deserializing rejects unknown keys and an object with no tier entries, so
/// `{}` is left for the plain value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tiers<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sm: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lg: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xl: Option<T>,
}

impl<T> Tiers<T> {
    /// A map with no entries.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            base: None,
            sm: None,
            md: None,
            lg: None,
            xl: None,
        }
    }

    fn slot(&self, bp: Breakpoint) -> &Option<T> {
        match bp {
            Breakpoint::Base => &self.base,
            Breakpoint::Sm => &self.sm,
            Breakpoint::Md => &self.md,
            Breakpoint::Lg => &self.lg,
            Breakpoint::Xl => &self.xl,
        }
    }

    fn slot_mut(&mut self, bp: Breakpoint) -> &mut Option<T> {
        match bp {
            Breakpoint::Base => &mut self.base,
            Breakpoint::Sm => &mut self.sm,
            Breakpoint::Md => &mut self.md,
            Breakpoint::Lg => &mut self.lg,
            Breakpoint::Xl => &mut self.xl,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Tiers<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Repr<U> {
            base: Option<U>,
            sm: Option<U>,
            md: Option<U>,
            lg: Option<U>,
            xl: Option<U>,
        }

        let Repr {
            base,
            sm,
            md,
            lg,
            xl,
        } = Repr::deserialize(deserializer)?;
        let tiers = Self {
            base,
            sm,
            md,
            lg,
            xl,
        };
        if Breakpoint::ALL.iter().all(|bp| tiers.slot(*bp).is_none()) {
            return Err(de::Error::custom("breakpoint map has no tiers"));
        }
        Ok(tiers)
    }
}

impl<T> Default for Tiers<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// A breakpoint-aware value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Responsive<T> {
    /// Keyed by tier; missing tiers fall back to `base`.
    Tiered(Tiers<T>),
    /// Not tier-keyed; applies unchanged at every tier.
    Static(T),
}

impl<T> Responsive<T> {
    /// A value that is the same at every tier.
    #[must_use]
    pub const fn fixed(value: T) -> Self {
        Self::Static(value)
    }

    /// A tiered value with a base entry.
    #[must_use]
    pub fn new(base: T) -> Self {
        let mut tiers = Tiers::empty();
        tiers.base = Some(base);
        Self::Tiered(tiers)
    }

    /// A tiered value with no entries (not even `base`).
    #[must_use]
    pub const fn tiered() -> Self {
        Self::Tiered(Tiers::empty())
    }

    /// Set the value for a specific tier (builder pattern).
    ///
    /// A static value is first converted to a tiered value whose base is
    /// the old static value.
    #[must_use]
    pub fn at(mut self, bp: Breakpoint, value: T) -> Self {
        self.set(bp, value);
        self
    }

    /// Set the value for a specific tier (mutating).
    pub fn set(&mut self, bp: Breakpoint, value: T) {
        let mut tiers = match std::mem::replace(self, Self::tiered()) {
            Self::Static(base) => {
                let mut tiers = Tiers::empty();
                tiers.base = Some(base);
                tiers
            }
            Self::Tiered(tiers) => tiers,
        };
        *tiers.slot_mut(bp) = Some(value);
        *self = Self::Tiered(tiers);
    }

    /// Whether this value is keyed by tier.
    #[must_use]
    pub const fn is_tiered(&self) -> bool {
        matches!(self, Self::Tiered(_))
    }

    /// Whether a tier has its own entry. Static values count as explicit
    /// everywhere.
    #[must_use]
    pub fn has_explicit(&self, bp: Breakpoint) -> bool {
        match self {
            Self::Static(_) => true,
            Self::Tiered(tiers) => tiers.slot(bp).is_some(),
        }
    }

    /// Resolve the value for a tier: `value[bp]`, else `value.base`.
    #[must_use]
    pub fn resolve(&self, bp: Breakpoint) -> Option<&T> {
        match self {
            Self::Static(value) => Some(value),
            Self::Tiered(tiers) => tiers.slot(bp).as_ref().or(tiers.base.as_ref()),
        }
    }

    /// Map every present value to a new type.
    #[must_use]
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Responsive<U> {
        match self {
            Self::Static(value) => Responsive::Static(f(value)),
            Self::Tiered(tiers) => Responsive::Tiered(Tiers {
                base: tiers.base.as_ref().map(&f),
                sm: tiers.sm.as_ref().map(&f),
                md: tiers.md.as_ref().map(&f),
                lg: tiers.lg.as_ref().map(&f),
                xl: tiers.xl.as_ref().map(&f),
            }),
        }
    }
}

impl<T: Clone> Responsive<T> {
    /// Resolve and clone.
    #[must_use]
    pub fn resolve_cloned(&self, bp: Breakpoint) -> Option<T> {
        self.resolve(bp).cloned()
    }

    /// Resolve, cloning, or fall back to `default` when nothing applies.
    #[must_use]
    pub fn resolve_or(&self, bp: Breakpoint, default: T) -> T {
        self.resolve_cloned(bp).unwrap_or(default)
    }
}

impl<T> From<T> for Responsive<T> {
    fn from(value: T) -> Self {
        Self::Static(value)
    }
}

/// Resolve an optional responsive field, flattening absence at both levels.
#[must_use]
pub fn resolve_opt<T: Clone>(value: Option<&Responsive<T>>, bp: Breakpoint) -> Option<T> {
    value.and_then(|v| v.resolve_cloned(bp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_value_unchanged_at_every_tier() {
        let r = Responsive::fixed(42);
        for bp in Breakpoint::ALL {
            assert_eq!(r.resolve(bp), Some(&42));
        }
        assert!(!r.is_tiered());
    }

    #[test]
    fn missing_tier_falls_back_to_base() {
        let r = Responsive::new(1).at(Breakpoint::Md, 2);
        assert_eq!(r.resolve(Breakpoint::Base), Some(&1));
        assert_eq!(r.resolve(Breakpoint::Sm), Some(&1));
        assert_eq!(r.resolve(Breakpoint::Md), Some(&2));
        // No inheritance from Md: Lg goes straight to base.
        assert_eq!(r.resolve(Breakpoint::Lg), Some(&1));
        assert_eq!(r.resolve(Breakpoint::Xl), Some(&1));
    }

    #[test]
    fn tiered_without_base_yields_none_for_missing_tier() {
        let r = Responsive::tiered().at(Breakpoint::Lg, "wide");
        assert_eq!(r.resolve(Breakpoint::Lg), Some(&"wide"));
        assert_eq!(r.resolve(Breakpoint::Sm), None);
    }

    #[test]
    fn at_on_static_keeps_static_as_base() {
        let r = Responsive::fixed(5).at(Breakpoint::Xl, 9);
        assert!(r.is_tiered());
        assert_eq!(r.resolve(Breakpoint::Md), Some(&5));
        assert_eq!(r.resolve(Breakpoint::Xl), Some(&9));
    }

    #[test]
    fn has_explicit() {
        let r = Responsive::new(0).at(Breakpoint::Lg, 3);
        assert!(r.has_explicit(Breakpoint::Base));
        assert!(!r.has_explicit(Breakpoint::Md));
        assert!(r.has_explicit(Breakpoint::Lg));
        assert!(Responsive::fixed(0).has_explicit(Breakpoint::Sm));
    }

    #[test]
    fn map_values() {
        let r = Responsive::new(10).at(Breakpoint::Lg, 20);
        let doubled = r.map(|v| v * 2);
        assert_eq!(doubled.resolve(Breakpoint::Base), Some(&20));
        assert_eq!(doubled.resolve(Breakpoint::Lg), Some(&40));
    }

    #[test]
    fn resolve_or_default() {
        let r: Responsive<i32> = Responsive::tiered();
        assert_eq!(r.resolve_or(Breakpoint::Md, 7), 7);
        assert_eq!(resolve_opt::<i32>(None, Breakpoint::Md), None);
    }

    #[test]
    fn deserialize_plain_and_tiered() {
        let plain: Responsive<f64> = serde_json::from_str("12").unwrap();
        assert_eq!(plain, Responsive::fixed(12.0));

        let tiered: Responsive<f64> = serde_json::from_str(r#"{"base": 1, "md": 2}"#).unwrap();
        assert_eq!(tiered, Responsive::new(1.0).at(Breakpoint::Md, 2.0));
    }

    #[test]
    fn deserialize_struct_value_is_not_mistaken_for_tiers() {
        #[derive(Debug, Clone, PartialEq, Deserialize)]
        struct Pair {
            a: i32,
        }
        let r: Responsive<Pair> = serde_json::from_str(r#"{"a": 3}"#).unwrap();
        assert_eq!(r.resolve(Breakpoint::Xl), Some(&Pair { a: 3 }));

        let r: Responsive<Pair> = serde_json::from_str(r#"{"sm": {"a": 1}}"#).unwrap();
        assert_eq!(r.resolve(Breakpoint::Sm), Some(&Pair { a: 1 }));
        assert_eq!(r.resolve(Breakpoint::Base), None);
    }

    #[test]
    fn empty_object_is_a_plain_value() {
        #[derive(Debug, Clone, PartialEq, Default, Deserialize)]
        struct Sides {
            #[serde(default)]
            width: Option<f64>,
        }
        let r: Responsive<Sides> = serde_json::from_str("{}").unwrap();
        assert_eq!(r, Responsive::fixed(Sides::default()));
        assert!(serde_json::from_str::<Tiers<f64>>("{}").is_err());
    }
}
