#![forbid(unsafe_code)]

//! Section configuration validation.
//!
//! [`validate_section`] inspects a section's mode, logical size and ordered
//! locator descriptors at the current breakpoint, and produces typed
//! [`LayoutIssue`]s. Rules run in a fixed order:
//!
//! 1. `MissingLogicalSize` (error, once per section): free mode without a
//!    logical size.
//! 2. `InvalidRect` (warning, per locator): free mode, literal rect (no
//!    logical rect) missing width or height.
//! 3. `OffsetWithoutLogicalSize` (warning, per locator): a numeric offset with
//!    no logical size to scale it against.
//! 4. `ModeConflict` (warning, per locator): row/column mode with explicit
//!    geometry.
//! 5. `Overlap` (warning, per pair): free mode with logical size, among
//!    visible locators with logical rects, pairs `i < j` in input order whose
//!    intersection area is positive.
//!
//! # Invariants
//!
//! 1. Hidden locators (breakpoint-level `hidden`) are skipped by rules 2–5.
//! 2. Only `MissingLogicalSize` is fatal.
//! 3. Issue order is rule order, then locator order, then pair order.
//!
//! # Failure Modes
//!
//! None. Validation is total; findings are data, not errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Dimension, LogicalRect, LogicalSize, Rect};

/// Layout discipline of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionMode {
    /// Independently, absolutely positioned children.
    Free,
    /// Horizontal flow.
    Row,
    /// Vertical flow.
    #[default]
    Column,
}

impl SectionMode {
    #[must_use]
    pub const fn is_flow(self) -> bool {
        matches!(self, Self::Row | Self::Column)
    }
}

/// A locator's validation-relevant fields, resolved at the current breakpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocatorDescriptor {
    pub id: String,
    pub rect: Option<Rect>,
    pub logical_rect: Option<LogicalRect>,
    pub offset_x: Option<Dimension>,
    pub offset_y: Option<Dimension>,
    pub hidden: bool,
    pub z_index: Option<i32>,
}

impl LocatorDescriptor {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_logical_rect(mut self, rect: LogicalRect) -> Self {
        self.logical_rect = Some(rect);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    fn has_numeric_offset(&self) -> bool {
        [&self.offset_x, &self.offset_y]
            .into_iter()
            .flatten()
            .any(Dimension::is_bare_number)
    }
}

/// The fixed issue taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    MissingLogicalSize,
    InvalidRect,
    OffsetWithoutLogicalSize,
    ModeConflict,
    Overlap,
}

impl IssueKind {
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::MissingLogicalSize => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingLogicalSize => "MissingLogicalSize",
            Self::InvalidRect => "InvalidRect",
            Self::OffsetWithoutLogicalSize => "OffsetWithoutLogicalSize",
            Self::ModeConflict => "ModeConflict",
            Self::Overlap => "Overlap",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutIssue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub section_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locator_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_locator_id: Option<String>,
    /// Intersection area in logical units², for `Overlap` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    pub message: String,
}

impl LayoutIssue {
    fn section(kind: IssueKind, section_id: &str, message: String) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            section_id: section_id.to_string(),
            locator_id: None,
            other_locator_id: None,
            area: None,
            message,
        }
    }

    fn locator(kind: IssueKind, section_id: &str, locator_id: &str, message: String) -> Self {
        Self {
            locator_id: Some(locator_id.to_string()),
            ..Self::section(kind, section_id, message)
        }
    }

    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for LayoutIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// All findings for one section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub issues: Vec<LayoutIssue>,
}

impl ValidationReport {
    /// The first fatal issue, if any.
    #[must_use]
    pub fn fatal(&self) -> Option<&LayoutIssue> {
        self.issues.iter().find(|issue| issue.is_fatal())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues of one kind.
    pub fn of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &LayoutIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    /// Overlap issues, in pair order.
    pub fn overlaps(&self) -> impl Iterator<Item = &LayoutIssue> {
        self.of_kind(IssueKind::Overlap)
    }
}

/// Run all validation rules for one section.
#[must_use]
pub fn validate_section(
    section_id: &str,
    mode: SectionMode,
    logical_size: Option<LogicalSize>,
    locators: &[LocatorDescriptor],
) -> ValidationReport {
    let mut issues = Vec::new();
    let visible: Vec<&LocatorDescriptor> = locators.iter().filter(|l| !l.hidden).collect();

    if mode == SectionMode::Free && logical_size.is_none() {
        issues.push(LayoutIssue::section(
            IssueKind::MissingLogicalSize,
            section_id,
            format!("section {section_id:?} is in free mode but has no logicalSize"),
        ));
    }

    if mode == SectionMode::Free {
        for loc in &visible {
            let missing_size = loc.logical_rect.is_none()
                && loc.rect.as_ref().is_some_and(|r| !r.has_size());
            if missing_size {
                issues.push(LayoutIssue::locator(
                    IssueKind::InvalidRect,
                    section_id,
                    &loc.id,
                    format!("locator {:?} has a rect without width or height", loc.id),
                ));
            }
        }
    }

    if logical_size.is_none() {
        for loc in visible.iter().filter(|l| l.has_numeric_offset()) {
            issues.push(LayoutIssue::locator(
                IssueKind::OffsetWithoutLogicalSize,
                section_id,
                &loc.id,
                format!(
                    "locator {:?} has a numeric offset but section {section_id:?} has no logicalSize",
                    loc.id
                ),
            ));
        }
    }

    if mode.is_flow() {
        for loc in &visible {
            if loc.rect.is_some() || loc.logical_rect.is_some() {
                issues.push(LayoutIssue::locator(
                    IssueKind::ModeConflict,
                    section_id,
                    &loc.id,
                    format!(
                        "locator {:?} sets geometry inside a {mode:?} section; it is ignored",
                        loc.id
                    ),
                ));
            }
        }
    }

    if mode == SectionMode::Free && logical_size.is_some() {
        issues.extend(detect_overlaps(section_id, &visible));
    }

    ValidationReport { issues }
}

fn detect_overlaps(section_id: &str, visible: &[&LocatorDescriptor]) -> Vec<LayoutIssue> {
    let placed: Vec<(&str, LogicalRect)> = visible
        .iter()
        .filter_map(|l| l.logical_rect.map(|r| (l.id.as_str(), r)))
        .collect();

    let mut issues = Vec::new();
    for (i, (a_id, a)) in placed.iter().enumerate() {
        for (b_id, b) in &placed[i + 1..] {
            let area = a.intersection_area(b);
            if area > 0.0 {
                issues.push(LayoutIssue {
                    other_locator_id: Some((*b_id).to_string()),
                    area: Some(area),
                    ..LayoutIssue::locator(
                        IssueKind::Overlap,
                        section_id,
                        a_id,
                        format!("locators {a_id:?} and {b_id:?} overlap by {area}"),
                    )
                });
            }
        }
    }
    issues
}
