#![forbid(unsafe_code)]

//! Declarative layout configuration.
//!
//! A [`Container`] holds [`Section`]s, which hold [`Locator`]s. Field names
//! serialize in camelCase so the same documents work from JSON and TOML.
//! Any field typed [`Responsive`] accepts either a plain value or a map keyed
//! by `base|sm|md|lg|xl`.
//!
//! Loading follows one pattern for every type: parse, then [`validate`],
//! returning [`ConfigError::Invalid`] with every problem found.
//!
//! [`validate`]: LoadConfig::validate

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tessera_layout::{
    AlignSelf, Breakpoint, Breakpoints, Dimension, LayoutRule, LocatorConstraints, LogicalRect,
    LogicalSize, Rect, Responsive, RuleCondition, SectionMode, SnapConfig, SnapSpec, StyleLayer,
    resolve_opt,
};
use tessera_paging::{DEFAULT_SWIPE_THRESHOLD_PX, PagingConfig};

use crate::ConfigError;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse-then-validate loading shared by every top-level config type.
pub trait LoadConfig: DeserializeOwned {
    /// Problems that make the configuration unusable. Empty means valid.
    fn validate(&self) -> Vec<String>;

    /// Load from a TOML string.
    fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let value: Self = toml::from_str(s)?;
        ConfigError::check(value.validate())?;
        Ok(value)
    }

    /// Load from a TOML file on disk.
    fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let value: Self = serde_json::from_str(s)?;
        ConfigError::check(value.validate())?;
        Ok(value)
    }

    /// Load from a JSON file on disk.
    fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// What a container pass does when a section fails fatally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Return the first fatal error.
    #[default]
    FailFast,
    /// Keep the error in that section's slot and resolve the rest.
    IsolateSection,
}

/// Engine-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub breakpoints: Breakpoints,
    /// Default swipe distance for sections that do not set their own.
    pub swipe_threshold_px: f64,
    pub failure_policy: FailurePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::DEFAULT,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

impl LoadConfig for EngineConfig {
    fn validate(&self) -> Vec<String> {
        let mut errors = self.breakpoints.validate();
        if !(self.swipe_threshold_px.is_finite() && self.swipe_threshold_px >= 0.0) {
            errors.push(format!(
                "swipe_threshold_px must be finite and >= 0, got {}",
                self.swipe_threshold_px
            ));
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// Outermost layout region.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Container {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<Responsive<Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Responsive<Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub centered: bool,
    pub sections: Vec<Section>,
}

impl Container {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Container box at `bp`.
    #[must_use]
    pub fn frame(&self, bp: Breakpoint) -> ContainerFrame {
        ContainerFrame {
            id: self.id.clone(),
            max_width: resolve_opt(self.max_width.as_ref(), bp),
            padding: resolve_opt(self.padding.as_ref(), bp),
            background: self.background.clone(),
            centered: self.centered,
        }
    }
}

impl LoadConfig for Container {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = FxHashSet::default();
        for section in &self.sections {
            if !seen.insert(section.id.as_str()) {
                errors.push(format!("duplicate section id {:?}", section.id));
            }
            errors.extend(section.validate());
        }
        errors
    }
}

/// Breakpoint-resolved container box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerFrame {
    pub id: String,
    pub max_width: Option<Dimension>,
    pub padding: Option<Dimension>,
    pub background: Option<String>,
    pub centered: bool,
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// A region that lays out locators in free, row or column mode and may page
/// them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub mode: SectionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<Responsive<Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Responsive<Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Responsive<Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<Responsive<Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<Responsive<Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<Responsive<Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<Responsive<Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_size: Option<LogicalSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap: Option<SnapSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<LayoutRule>,
    #[serde(flatten)]
    pub paging: PagingConfig,
    /// Host-controlled page. Fixes external ownership when the section is
    /// first seen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<usize>,
    pub locators: Vec<Locator>,
}

impl Section {
    #[must_use]
    pub fn new(id: impl Into<String>, mode: SectionMode) -> Self {
        Self {
            id: id.into(),
            mode,
            ..Self::default()
        }
    }

    /// A free-mode section over a logical canvas.
    #[must_use]
    pub fn free(id: impl Into<String>, logical_size: LogicalSize) -> Self {
        Self {
            logical_size: Some(logical_size),
            ..Self::new(id, SectionMode::Free)
        }
    }

    #[must_use]
    pub fn locator(mut self, locator: Locator) -> Self {
        self.locators.push(locator);
        self
    }

    #[must_use]
    pub fn rule(mut self, rule: LayoutRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn snap(mut self, snap: impl Into<SnapSpec>) -> Self {
        self.snap = Some(snap.into());
        self
    }

    #[must_use]
    pub fn paging(mut self, paging: PagingConfig) -> Self {
        self.paging = paging;
        self
    }

    #[must_use]
    pub fn controlled_page(mut self, page: usize) -> Self {
        self.current_page = Some(page);
        self
    }

    /// The logical canvas, if it can be used for geometry.
    #[must_use]
    pub fn usable_logical_size(&self) -> Option<LogicalSize> {
        self.logical_size.filter(LogicalSize::is_usable)
    }

    #[must_use]
    pub fn snap_config(&self) -> Option<SnapConfig> {
        self.snap.map(|spec| spec.config())
    }

    /// Section box at `bp`.
    #[must_use]
    pub fn frame(&self, bp: Breakpoint) -> SectionFrame {
        SectionFrame {
            gap: resolve_opt(self.gap.as_ref(), bp),
            width: resolve_opt(self.width.as_ref(), bp),
            height: resolve_opt(self.height.as_ref(), bp),
            min_width: resolve_opt(self.min_width.as_ref(), bp),
            max_width: resolve_opt(self.max_width.as_ref(), bp),
            min_height: resolve_opt(self.min_height.as_ref(), bp),
            max_height: resolve_opt(self.max_height.as_ref(), bp),
        }
    }

    /// Problems with this section and its locators.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.id.is_empty() {
            errors.push("section id must not be empty".to_string());
        }
        if let Some(size) = self.logical_size
            && !size.is_usable()
        {
            errors.push(format!(
                "section {:?}: logicalSize must be finite and > 0, got {}x{}",
                self.id, size.width, size.height
            ));
        }
        if let Some(snap) = self.snap {
            let grid = snap.config().grid;
            if !(grid.is_finite() && grid >= 0.0) {
                errors.push(format!("section {:?}: snap grid must be >= 0, got {grid}", self.id));
            }
        }
        errors.extend(
            self.paging
                .validate()
                .into_iter()
                .map(|e| format!("section {:?}: {e}", self.id)),
        );
        errors.extend(unparsable_rules(&self.id, &self.rules));

        let mut seen = FxHashSet::default();
        for locator in &self.locators {
            if locator.id.is_empty() {
                errors.push(format!("section {:?}: locator id must not be empty", self.id));
            } else if !seen.insert(locator.id.as_str()) {
                errors.push(format!(
                    "section {:?}: duplicate locator id {:?}",
                    self.id, locator.id
                ));
            }
            errors.extend(unparsable_rules(
                &format!("{}/{}", self.id, locator.id),
                &locator.rules,
            ));
        }
        errors
    }
}

fn unparsable_rules(owner: &str, rules: &[LayoutRule]) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| RuleCondition::parse(&rule.when).is_none())
        .map(|rule| format!("{owner:?}: rule condition {:?} never matches", rule.when))
        .collect()
}

/// Breakpoint-resolved section box.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionFrame {
    pub gap: Option<Dimension>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub min_width: Option<Dimension>,
    pub max_width: Option<Dimension>,
    pub min_height: Option<Dimension>,
    pub max_height: Option<Dimension>,
}

// ---------------------------------------------------------------------------
// Locator
// ---------------------------------------------------------------------------

/// A positioned child of a section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Locator {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<Responsive<Rect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_rect: Option<Responsive<LogicalRect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<Responsive<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<Responsive<Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<Responsive<Dimension>>,
    pub constraints: LocatorConstraints,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<LayoutRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<Responsive<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_self: Option<AlignSelf>,
    /// Caller style overrides, merged after computed geometry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleLayer>,
}

impl Locator {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn logical(mut self, rect: impl Into<Responsive<LogicalRect>>) -> Self {
        self.logical_rect = Some(rect.into());
        self
    }

    #[must_use]
    pub fn rect(mut self, rect: impl Into<Responsive<Rect>>) -> Self {
        self.rect = Some(rect.into());
        self
    }

    #[must_use]
    pub fn z(mut self, z_index: impl Into<Responsive<i32>>) -> Self {
        self.z_index = Some(z_index.into());
        self
    }

    #[must_use]
    pub fn offset(mut self, x: Option<Dimension>, y: Option<Dimension>) -> Self {
        self.offset_x = x.map(Responsive::fixed);
        self.offset_y = y.map(Responsive::fixed);
        self
    }

    #[must_use]
    pub fn hidden(mut self, hidden: impl Into<Responsive<bool>>) -> Self {
        self.hidden = Some(hidden.into());
        self
    }

    #[must_use]
    pub fn constraints(mut self, constraints: LocatorConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    #[must_use]
    pub fn rule(mut self, rule: LayoutRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn style(mut self, style: StyleLayer) -> Self {
        self.style = Some(style);
        self
    }
}
