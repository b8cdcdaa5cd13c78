#![forbid(unsafe_code)]

//! Layout resolution core for Tessera.
//!
//! # Role in Tessera
//! `tessera-layout` is the pure part of the engine. Given a section's
//! breakpoint-resolved configuration it validates it, orders its locators,
//! and turns logical or literal geometry into positioned styles. Nothing in
//! this crate holds state between passes; the `tessera` facade drives it and
//! `tessera-paging` consumes its ordered output.
//!
//! # Primary responsibilities
//! - **Breakpoints**: width → tier classification and [`Responsive`] values.
//! - **Snap**: strict or tolerance-based grid quantization.
//! - **Constraints**: centering, pinning, aspect ratio, axis locks.
//! - **Rules**: width-conditioned overrides.
//! - **Geometry**: logical rect → percentages, offsets → translation.
//! - **Validation**: the five-rule issue taxonomy, including overlap.
//! - **Z-order**: default stacking and duplicate detection.

pub mod breakpoint;
pub mod constraints;
pub mod geometry;
pub mod placement;
pub mod responsive;
pub mod rules;
pub mod snap;
pub mod style;
pub mod units;
pub mod validation;
pub mod zorder;

pub use breakpoint::{Breakpoint, Breakpoints, UnknownBreakpoint};
pub use constraints::LocatorConstraints;
pub use geometry::{
    GeometrySource, ResolvedRect, compose_transform, logical_to_percent, offset_translation,
    resolve_offset, resolve_rect,
};
pub use placement::{Placement, PlacementInput, place};
pub use responsive::{Responsive, Tiers, resolve_opt};
pub use rules::{LayoutRule, RuleCondition, RuleOverrides, apply_rules, matches_width};
pub use snap::{SnapAxes, SnapConfig, SnapMode, SnapSpec, snap};
pub use style::{AlignSelf, FlowStyle, Position, ResolvedStyle, StyleLayer, merge_layers};
pub use units::{Dimension, LogicalRect, LogicalSize, Rect};
pub use validation::{
    IssueKind, LayoutIssue, LocatorDescriptor, SectionMode, Severity, ValidationReport,
    validate_section,
};
pub use zorder::{
    DuplicateZIndex, ZOrderEntry, default_z_index, effective_z_indices, resolve_order,
};
