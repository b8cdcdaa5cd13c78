#![forbid(unsafe_code)]

//! Sibling stacking order.
//!
//! Each locator's effective z-index is its own breakpoint-resolved value, or
//! `1 + position` when it has none. Effective values must be unique within a
//! section; a duplicate aborts the section.
//!
//! # Invariants
//!
//! 1. Duplicate detection covers every locator, hidden ones included.
//! 2. The returned order is ascending by effective z-index; ties cannot occur
//!    because ties are rejected.
//! 3. The reported duplicate is the first collision in input order.

use std::fmt;

use rustc_hash::FxHashMap;

/// A locator's slot in the render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZOrderEntry {
    /// Position in the input list.
    pub index: usize,
    pub z_index: i32,
}

/// Two locators resolved to the same effective z-index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateZIndex {
    pub z_index: i32,
    /// Input position of the earlier locator.
    pub first: usize,
    /// Input position of the later locator.
    pub second: usize,
}

impl fmt::Display for DuplicateZIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "z-index {} is used by locators at positions {} and {}",
            self.z_index, self.first, self.second
        )
    }
}

impl std::error::Error for DuplicateZIndex {}

/// Effective z-index of every locator.
#[must_use]
pub fn effective_z_indices(explicit: &[Option<i32>]) -> Vec<i32> {
    explicit
        .iter()
        .enumerate()
        .map(|(i, z)| z.unwrap_or_else(|| default_z_index(i)))
        .collect()
}

/// The z-index assigned to an unlabelled locator at `position`.
#[must_use]
pub fn default_z_index(position: usize) -> i32 {
    i32::try_from(position).map_or(i32::MAX, |p| p.saturating_add(1))
}

/// Check uniqueness and return the render order.
pub fn resolve_order(explicit: &[Option<i32>]) -> Result<Vec<ZOrderEntry>, DuplicateZIndex> {
    let effective = effective_z_indices(explicit);
    let mut seen: FxHashMap<i32, usize> = FxHashMap::default();
    seen.reserve(effective.len());
    for (index, &z_index) in effective.iter().enumerate() {
        if let Some(&first) = seen.get(&z_index) {
            return Err(DuplicateZIndex {
                z_index,
                first,
                second: index,
            });
        }
        seen.insert(z_index, index);
    }

    let mut order: Vec<ZOrderEntry> = effective
        .into_iter()
        .enumerate()
        .map(|(index, z_index)| ZOrderEntry { index, z_index })
        .collect();
    order.sort_by_key(|entry| entry.z_index);
    Ok(order)
}
