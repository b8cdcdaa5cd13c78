#![forbid(unsafe_code)]

//! Per-locator placement: rules, geometry, constraints and style layers.
//!
//! [`place`] is the composition point for one locator once validation and
//! z-order have succeeded for its section:
//!
//! 1. Rules are applied on top of the breakpoint-resolved `hidden`, offsets
//!    and effective z-index.
//! 2. In free mode, the rect is resolved (logical or literal) and shaped by
//!    the locator's constraints. Flow modes ignore geometry.
//! 3. Offsets on unlocked axes become a translation appended after the
//!    caller transform.
//! 4. Layers merge in order: flow, positioned, caller overrides, transform.

use crate::{
    AlignSelf, Dimension, FlowStyle, GeometrySource, LayoutRule, LocatorConstraints, LogicalRect,
    LogicalSize, Rect, ResolvedStyle, RuleOverrides, SectionMode, SnapConfig, StyleLayer,
    apply_rules, compose_transform, merge_layers, offset_translation, resolve_rect,
};

/// Everything needed to place one locator.
#[derive(Debug, Clone, Copy)]
pub struct PlacementInput<'a> {
    pub mode: SectionMode,
    pub logical_size: Option<LogicalSize>,
    pub snap: Option<&'a SnapConfig>,
    pub viewport_width: f64,
    pub rect: Option<&'a Rect>,
    pub logical_rect: Option<LogicalRect>,
    pub offset_x: Option<&'a Dimension>,
    pub offset_y: Option<&'a Dimension>,
    pub hidden: bool,
    pub z_index: i32,
    pub constraints: &'a LocatorConstraints,
    pub rules: &'a [LayoutRule],
    pub order: Option<i32>,
    pub flex: Option<&'a str>,
    pub align_self: Option<AlignSelf>,
    pub caller: Option<&'a StyleLayer>,
}

/// The outcome of placing one locator.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Hidden at this breakpoint or by a matching rule.
    pub hidden: bool,
    pub source: GeometrySource,
    pub style: ResolvedStyle,
    pub flow: FlowStyle,
}

impl Placement {
    /// The z-index written to the style.
    #[must_use]
    pub fn z_index(&self) -> Option<i32> {
        self.style.z_index
    }
}

/// Place one locator.
#[must_use]
pub fn place(input: &PlacementInput<'_>) -> Placement {
    let overrides = apply_rules(
        input.rules,
        input.viewport_width,
        RuleOverrides {
            hidden: input.hidden,
            offset_x: input.offset_x.cloned(),
            offset_y: input.offset_y.cloned(),
            z_index: Some(input.z_index),
        },
    );

    let flow = StyleLayer::flow(
        input.order,
        input.flex.map(str::to_string),
        input.align_self,
    );

    let (mut positioned, source) = if input.mode == SectionMode::Free {
        let (rect, source) = resolve_rect(
            input.rect,
            input.logical_rect,
            input.logical_size,
            input.snap,
        );
        (StyleLayer::absolute(input.constraints.apply(rect)), source)
    } else {
        (StyleLayer::default(), GeometrySource::Unpositioned)
    };
    positioned.z_index = overrides.z_index;

    let (offset_x, offset_y) = input
        .constraints
        .filter_offsets(overrides.offset_x.as_ref(), overrides.offset_y.as_ref());
    let translation = offset_translation(offset_x, offset_y, input.logical_size);
    let caller_transform = input.caller.and_then(|c| c.transform.as_deref());
    let transform = StyleLayer::transform(compose_transform(
        caller_transform,
        translation.as_deref(),
    ));

    let caller = input.caller.cloned().unwrap_or_default();
    let (style, flow) = merge_layers([&flow, &positioned, &caller, &transform]).split();

    Placement {
        hidden: overrides.hidden,
        source,
        style,
        flow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    const NO_CONSTRAINTS: LocatorConstraints = LocatorConstraints {
        center_x: false,
        center_y: false,
        pin_left: false,
        pin_right: false,
        pin_top: false,
        pin_bottom: false,
        keep_aspect_ratio: None,
        lock_x: false,
        lock_y: false,
    };

    fn free_input<'a>(
        rules: &'a [LayoutRule],
        constraints: &'a LocatorConstraints,
    ) -> PlacementInput<'a> {
        PlacementInput {
            mode: SectionMode::Free,
            logical_size: Some(LogicalSize::new(800.0, 600.0)),
            snap: None,
            viewport_width: 1000.0,
            rect: None,
            logical_rect: Some(LogicalRect::new(100.0, 120.0, 380.0, 200.0)),
            offset_x: None,
            offset_y: None,
            hidden: false,
            z_index: 3,
            constraints,
            rules,
            order: None,
            flex: None,
            align_self: None,
            caller: None,
        }
    }

    #[test]
    fn free_locator_gets_absolute_percent_geometry() {
        let placement = place(&free_input(&[], &NO_CONSTRAINTS));
        assert!(!placement.hidden);
        assert_eq!(placement.source, GeometrySource::Logical);
        assert_eq!(placement.style.position, Some(Position::Absolute));
        assert_eq!(placement.style.left, Some(Dimension::Percent(12.5)));
        assert_eq!(placement.style.z_index, Some(3));
        assert_eq!(placement.style.transform, None);
    }

    #[test]
    fn rule_overrides_hidden_offset_and_z() {
        let rules = [LayoutRule::when("<1200").hidden(true).offset_x(80.0).z_index(9)];
        let placement = place(&free_input(&rules, &NO_CONSTRAINTS));
        assert!(placement.hidden);
        assert_eq!(placement.z_index(), Some(9));
        assert_eq!(placement.style.transform.as_deref(), Some("translate(10%, 0px)"));
    }

    #[test]
    fn lock_discards_rule_offset() {
        let rules = [LayoutRule::when(">0").offset_x(80.0)];
        let constraints = LocatorConstraints {
            lock_x: true,
            ..NO_CONSTRAINTS
        };
        let placement = place(&free_input(&rules, &constraints));
        assert_eq!(placement.style.transform, None);
    }

    #[test]
    fn flow_mode_ignores_geometry() {
        let mut input = free_input(&[], &NO_CONSTRAINTS);
        input.mode = SectionMode::Row;
        input.order = Some(2);
        input.flex = Some("1 1 0");
        let placement = place(&input);
        assert_eq!(placement.source, GeometrySource::Unpositioned);
        assert_eq!(placement.style.position, None);
        assert_eq!(placement.style.left, None);
        assert_eq!(placement.flow.order, Some(2));
        assert_eq!(placement.flow.flex.as_deref(), Some("1 1 0"));
    }

    #[test]
    fn caller_layer_then_transform() {
        let caller = StyleLayer {
            width: Some(Dimension::Raw("auto".into())),
            transform: Some("rotate(2deg)".into()),
            ..StyleLayer::default()
        };
        let offset = Dimension::Px(8.0);
        let mut input = free_input(&[], &NO_CONSTRAINTS);
        input.caller = Some(&caller);
        input.offset_y = Some(&offset);
        let placement = place(&input);
        assert_eq!(placement.style.width, Some(Dimension::Raw("auto".into())));
        let transform = placement.style.transform.unwrap_or_default();
        assert!(
            transform.starts_with("rotate(2deg) translate(0px, 1.333"),
            "transform was {transform}"
        );
    }

    #[test]
    fn centering_constraint_applies_in_free_mode() {
        let constraints = LocatorConstraints {
            center_x: true,
            ..NO_CONSTRAINTS
        };
        let placement = place(&free_input(&[], &constraints));
        assert_eq!(placement.style.left, Some(Dimension::Percent(50.0)));
    }
}
