#![forbid(unsafe_code)]

//! Ordered style-layer merging.
//!
//! A locator's final style is built from layers applied in a fixed order:
//! flow fields, absolute fields, caller overrides, computed transform. Each
//! layer fully overwrites any field it sets; unset fields fall through.

use serde::{Deserialize, Serialize};

use crate::{Dimension, ResolvedRect};

/// Positioning scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Relative,
    Absolute,
}

/// Cross-axis self alignment for flow layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignSelf {
    #[default]
    Auto,
    FlexStart,
    FlexEnd,
    Center,
    Stretch,
    Baseline,
}

/// One layer of style fields. `None` means "not set by this layer".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_self: Option<AlignSelf>,
}

impl StyleLayer {
    /// Flow-layout fields.
    #[must_use]
    pub fn flow(order: Option<i32>, flex: Option<String>, align_self: Option<AlignSelf>) -> Self {
        Self {
            order,
            flex,
            align_self,
            ..Self::default()
        }
    }

    /// Absolute-positioning fields from a resolved rect.
    #[must_use]
    pub fn absolute(rect: ResolvedRect) -> Self {
        Self {
            position: Some(Position::Absolute),
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
            width: rect.width,
            height: rect.height,
            ..Self::default()
        }
    }

    /// A layer that only sets the stacking order.
    #[must_use]
    pub fn z_index(z_index: i32) -> Self {
        Self {
            z_index: Some(z_index),
            ..Self::default()
        }
    }

    /// A layer that only sets the transform.
    #[must_use]
    pub fn transform(transform: Option<String>) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }

    /// Overwrite every field set in `upper`.
    pub fn overlay(&mut self, upper: &StyleLayer) {
        if upper.position.is_some() {
            self.position.clone_from(&upper.position);
        }
        if upper.left.is_some() {
            self.left.clone_from(&upper.left);
        }
        if upper.top.is_some() {
            self.top.clone_from(&upper.top);
        }
        if upper.right.is_some() {
            self.right.clone_from(&upper.right);
        }
        if upper.bottom.is_some() {
            self.bottom.clone_from(&upper.bottom);
        }
        if upper.width.is_some() {
            self.width.clone_from(&upper.width);
        }
        if upper.height.is_some() {
            self.height.clone_from(&upper.height);
        }
        if upper.z_index.is_some() {
            self.z_index.clone_from(&upper.z_index);
        }
        if upper.transform.is_some() {
            self.transform.clone_from(&upper.transform);
        }
        if upper.order.is_some() {
            self.order.clone_from(&upper.order);
        }
        if upper.flex.is_some() {
            self.flex.clone_from(&upper.flex);
        }
        if upper.align_self.is_some() {
            self.align_self.clone_from(&upper.align_self);
        }
    }

    /// Split into the positioned and flow views handed to the render sink.
    #[must_use]
    pub fn split(self) -> (ResolvedStyle, FlowStyle) {
        (
            ResolvedStyle {
                position: self.position,
                left: self.left,
                top: self.top,
                right: self.right,
                bottom: self.bottom,
                width: self.width,
                height: self.height,
                z_index: self.z_index,
                transform: self.transform,
            },
            FlowStyle {
                order: self.order,
                flex: self.flex,
                align_self: self.align_self,
            },
        )
    }
}

/// Merge layers in order; later layers win per field.
#[must_use]
pub fn merge_layers<'a>(layers: impl IntoIterator<Item = &'a StyleLayer>) -> StyleLayer {
    layers
        .into_iter()
        .fold(StyleLayer::default(), |mut acc, layer| {
            acc.overlay(layer);
            acc
        })
}

/// Positioned style of a rendered locator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub position: Option<Position>,
    pub left: Option<Dimension>,
    pub top: Option<Dimension>,
    pub right: Option<Dimension>,
    pub bottom: Option<Dimension>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub z_index: Option<i32>,
    pub transform: Option<String>,
}

/// Flow-layout style of a rendered locator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStyle {
    pub order: Option<i32>,
    pub flex: Option<String>,
    pub align_self: Option<AlignSelf>,
}
