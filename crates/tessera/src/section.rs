#![forbid(unsafe_code)]

//! One section pass.
//!
//! [`resolve_section`] turns a [`Section`] into a [`ResolvedSection`] at a
//! given breakpoint and viewport width:
//!
//! 1. Section rules decide whether the section renders at all.
//! 2. Every locator is breakpoint-resolved into a [`LocatorDescriptor`].
//! 3. Validation runs; the issue batch and each overlap are reported.
//! 4. Z-order is resolved.
//! 5. Locators are placed in z-order; hidden ones are skipped.
//! 6. Paging picks which placed locators render and how.
//! 7. `locator_rendered` fires for each child that reaches the sink.
//!
//! # Failure Modes
//!
//! - A free section without a usable logical size, or two locators with the
//!   same effective z-index, abort the pass before any geometry is produced.
//!   The error is reported to the observer and returned.

use serde::Serialize;
use tessera_layout::{
    Breakpoint, FlowStyle, LocatorDescriptor, PlacementInput, ResolvedStyle, RuleOverrides,
    SectionMode, apply_rules, place, resolve_opt, resolve_order, validate_section,
};
use tessera_paging::{PagePresence, PagedView, PagingControls, PagingMachine};

use crate::{LayoutError, LayoutObserver, Locator, Section, SectionFrame};

/// Where a pass runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionContext {
    pub breakpoint: Breakpoint,
    pub viewport_width: f64,
}

/// A locator that reached the render sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedLocator {
    pub id: String,
    /// Effective z-index used for ordering.
    pub z_index: i32,
    pub style: ResolvedStyle,
    pub flow: FlowStyle,
    /// Off-page children stay mounted but are hidden and non-interactive.
    pub presence: PagePresence,
    pub page: usize,
}

impl RenderedLocator {
    /// On screen and interactive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.presence == PagePresence::Active
    }
}

/// Paging outcome of a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PagingSnapshot {
    pub page: usize,
    pub total_pages: usize,
    pub track: bool,
    pub controls: PagingControls,
}

/// Render-ready section.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSection {
    pub id: String,
    pub mode: SectionMode,
    /// Hidden by a section rule; no children were resolved.
    pub hidden: bool,
    pub frame: SectionFrame,
    pub children: Vec<RenderedLocator>,
    pub issues: Vec<tessera_layout::LayoutIssue>,
    pub paging: Option<PagingSnapshot>,
}

impl ResolvedSection {
    fn hidden(section: &Section, frame: SectionFrame) -> Self {
        Self {
            id: section.id.clone(),
            mode: section.mode,
            hidden: true,
            frame,
            children: Vec::new(),
            issues: Vec::new(),
            paging: None,
        }
    }

    #[must_use]
    pub fn child(&self, id: &str) -> Option<&RenderedLocator> {
        self.children.iter().find(|c| c.id == id)
    }

    /// Children currently on screen.
    pub fn active_children(&self) -> impl Iterator<Item = &RenderedLocator> {
        self.children.iter().filter(|c| c.is_active())
    }
}

/// Breakpoint-resolve one locator.
#[must_use]
pub fn describe_locator(locator: &Locator, bp: Breakpoint) -> LocatorDescriptor {
    LocatorDescriptor {
        id: locator.id.clone(),
        rect: resolve_opt(locator.rect.as_ref(), bp),
        logical_rect: resolve_opt(locator.logical_rect.as_ref(), bp),
        offset_x: resolve_opt(locator.offset_x.as_ref(), bp),
        offset_y: resolve_opt(locator.offset_y.as_ref(), bp),
        hidden: resolve_opt(locator.hidden.as_ref(), bp).unwrap_or(false),
        z_index: resolve_opt(locator.z_index.as_ref(), bp),
    }
}

/// Resolve one section.
///
/// `paging` is the section's persistent machine when the section pages.
pub fn resolve_section(
    section: &Section,
    ctx: SectionContext,
    paging: Option<&mut PagingMachine>,
    observer: &mut dyn LayoutObserver,
) -> Result<ResolvedSection, LayoutError> {
    let _span = tracing::debug_span!(
        "section.resolve",
        id = %section.id,
        breakpoint = %ctx.breakpoint
    )
    .entered();

    let frame = section.frame(ctx.breakpoint);
    let section_rules = apply_rules(&section.rules, ctx.viewport_width, RuleOverrides::default());
    if section_rules.hidden {
        tracing::debug!(width = ctx.viewport_width, "section hidden by rule");
        observer.section_rendered(&section.id);
        return Ok(ResolvedSection::hidden(section, frame));
    }

    let descriptors: Vec<LocatorDescriptor> = section
        .locators
        .iter()
        .map(|l| describe_locator(l, ctx.breakpoint))
        .collect();
    let logical_size = section.usable_logical_size();

    let report = validate_section(&section.id, section.mode, logical_size, &descriptors);
    if !report.is_empty() {
        observer.layout_validation(&section.id, &report.issues);
        for overlap in report.overlaps() {
            observer.locator_collision(overlap);
        }
    }
    if report.fatal().is_some() {
        return Err(abort(
            observer,
            LayoutError::MissingLogicalSize {
                section_id: section.id.clone(),
            },
        ));
    }

    let explicit: Vec<Option<i32>> = descriptors.iter().map(|d| d.z_index).collect();
    let order = match resolve_order(&explicit) {
        Ok(order) => order,
        Err(dup) => {
            return Err(abort(
                observer,
                LayoutError::DuplicateZIndex {
                    section_id: section.id.clone(),
                    z_index: dup.z_index,
                    first: descriptors[dup.first].id.clone(),
                    second: descriptors[dup.second].id.clone(),
                },
            ));
        }
    };

    let snap = section.snap_config();
    let mut children = Vec::with_capacity(order.len());
    for entry in &order {
        let locator = &section.locators[entry.index];
        let desc = &descriptors[entry.index];
        let placement = place(&PlacementInput {
            mode: section.mode,
            logical_size,
            snap: snap.as_ref(),
            viewport_width: ctx.viewport_width,
            rect: desc.rect.as_ref(),
            logical_rect: desc.logical_rect,
            offset_x: desc.offset_x.as_ref(),
            offset_y: desc.offset_y.as_ref(),
            hidden: desc.hidden,
            z_index: entry.z_index,
            constraints: &locator.constraints,
            rules: &locator.rules,
            order: locator.order,
            flex: locator.flex.as_deref(),
            align_self: locator.align_self,
            caller: locator.style.as_ref(),
        });
        if placement.hidden {
            continue;
        }
        tracing::trace!(
            locator = %locator.id,
            z_index = entry.z_index,
            source = ?placement.source,
            "placed"
        );
        children.push(RenderedLocator {
            id: locator.id.clone(),
            z_index: entry.z_index,
            style: placement.style,
            flow: placement.flow,
            presence: PagePresence::Active,
            page: 0,
        });
    }

    let paging = match paging {
        Some(machine) if section.paging.is_enabled() => {
            machine.set_child_count(children.len());
            let view = machine.view();
            children = apply_view(children, &view);
            Some(PagingSnapshot {
                page: view.page,
                total_pages: view.total_pages,
                track: view.track,
                controls: view.controls,
            })
        }
        _ => None,
    };

    for child in &children {
        let z_index = child.style.z_index.unwrap_or(child.z_index);
        observer.locator_rendered(&section.id, &child.id, z_index);
    }
    observer.section_rendered(&section.id);
    Ok(ResolvedSection {
        id: section.id.clone(),
        mode: section.mode,
        hidden: false,
        frame,
        children,
        issues: report.issues,
        paging,
    })
}

fn apply_view(children: Vec<RenderedLocator>, view: &PagedView) -> Vec<RenderedLocator> {
    let mut slots = view.slots.iter().peekable();
    children
        .into_iter()
        .enumerate()
        .filter_map(|(i, mut child)| {
            let slot = slots.next_if(|s| s.child == i)?;
            child.presence = slot.presence;
            child.page = slot.page;
            Some(child)
        })
        .collect()
}

fn abort(observer: &mut dyn LayoutObserver, error: LayoutError) -> LayoutError {
    tracing::warn!(section = error.section_id(), %error, "section aborted");
    observer.fatal_error(&error);
    error
}
