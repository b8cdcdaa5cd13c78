#![forbid(unsafe_code)]

//! The stateful layout engine.
//!
//! [`LayoutEngine`] is what a host talks to. It holds the current viewport
//! width and breakpoint, the paging machine of every paged section (keyed by
//! section id, so page state survives between passes), and the observer
//! that receives notifications.
//!
//! # Invariants
//!
//! 1. A section's paging ownership is fixed the first time the engine sees
//!    it. A later `currentPage` on an internally owned section is ignored.
//! 2. Machines for sections missing from a container pass are dropped, which
//!    also cancels their autoplay.
//! 3. Every navigation, including one that does not move, is reported as a
//!    page change.

use rustc_hash::{FxHashMap, FxHashSet};
use tessera_layout::Breakpoint;
use tessera_paging::{PageChange, PagingMachine};
use web_time::Instant;

use crate::section::{ResolvedSection, SectionContext, resolve_section};
use crate::{
    Container, ContainerFrame, EngineConfig, FailurePolicy, LayoutError, LayoutObserver,
    NoopObserver, Section,
};

/// Result slot of one section in a container pass.
pub type SectionOutcome = Result<ResolvedSection, LayoutError>;

/// A resolved container.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContainer {
    pub frame: ContainerFrame,
    pub breakpoint: Breakpoint,
    /// One slot per configured section, in configuration order.
    pub sections: Vec<SectionOutcome>,
}

impl ResolvedContainer {
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&SectionOutcome> {
        self.sections.iter().find(|outcome| match outcome {
            Ok(section) => section.id == id,
            Err(err) => err.section_id() == id,
        })
    }

    /// Sections that failed, when isolated.
    pub fn errors(&self) -> impl Iterator<Item = &LayoutError> {
        self.sections.iter().filter_map(|s| s.as_ref().err())
    }
}

/// Viewport-aware resolver with persistent paging state.
#[derive(Debug)]
pub struct LayoutEngine<O = NoopObserver> {
    config: EngineConfig,
    viewport_width: f64,
    breakpoint: Breakpoint,
    observer: O,
    paging: FxHashMap<String, PagingMachine>,
}

impl LayoutEngine<NoopObserver> {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_observer(config, NoopObserver)
    }
}

impl Default for LayoutEngine<NoopObserver> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<O: LayoutObserver> LayoutEngine<O> {
    /// Engine at viewport width 0 (the base tier).
    #[must_use]
    pub fn with_observer(config: EngineConfig, observer: O) -> Self {
        Self {
            config,
            viewport_width: 0.0,
            breakpoint: Breakpoint::Base,
            observer,
            paging: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    #[must_use]
    pub const fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    #[must_use]
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Report a new viewport width. Returns whether the tier changed.
    pub fn set_viewport_width(&mut self, width: f64) -> bool {
        self.viewport_width = width;
        let next = self.config.breakpoints.classify(width);
        if next == self.breakpoint {
            return false;
        }
        tracing::debug!(width, from = %self.breakpoint, to = %next, "breakpoint changed");
        self.breakpoint = next;
        true
    }

    fn context(&self) -> SectionContext {
        SectionContext {
            breakpoint: self.breakpoint,
            viewport_width: self.viewport_width,
        }
    }

    // -- resolution ---------------------------------------------------------

    /// Resolve every section of `container`.
    ///
    /// Under [`FailurePolicy::FailFast`] the first fatal section error is
    /// returned; under [`FailurePolicy::IsolateSection`] it stays in that
    /// section's slot.
    pub fn resolve(&mut self, container: &Container) -> Result<ResolvedContainer, LayoutError> {
        let _span = tracing::debug_span!(
            "container.resolve",
            id = %container.id,
            breakpoint = %self.breakpoint
        )
        .entered();
        self.observer.render_start(&container.id, self.breakpoint);

        let live: FxHashSet<&str> = container.sections.iter().map(|s| s.id.as_str()).collect();
        self.paging.retain(|id, _| live.contains(id.as_str()));

        let mut sections = Vec::with_capacity(container.sections.len());
        for section in &container.sections {
            let outcome = self.resolve_section(section);
            if let Err(err) = &outcome
                && self.config.failure_policy == FailurePolicy::FailFast
            {
                let err = err.clone();
                self.observer.render_end(&container.id);
                return Err(err);
            }
            sections.push(outcome);
        }

        self.observer.render_end(&container.id);
        Ok(ResolvedContainer {
            frame: container.frame(self.breakpoint),
            breakpoint: self.breakpoint,
            sections,
        })
    }

    /// Resolve a single section at the current viewport.
    pub fn resolve_section(&mut self, section: &Section) -> SectionOutcome {
        let ctx = self.context();
        let machine = if section.paging.is_enabled() {
            Some(machine_for(
                &mut self.paging,
                section,
                self.config.swipe_threshold_px,
            ))
        } else {
            self.paging.remove(&section.id);
            None
        };
        resolve_section(section, ctx, machine, &mut self.observer)
    }

    // -- paging -------------------------------------------------------------

    #[must_use]
    pub fn paging(&self, section_id: &str) -> Option<&PagingMachine> {
        self.paging.get(section_id)
    }

    pub fn paging_mut(&mut self, section_id: &str) -> Option<&mut PagingMachine> {
        self.paging.get_mut(section_id)
    }

    /// Forget a section's paging state.
    pub fn forget_section(&mut self, section_id: &str) -> bool {
        self.paging.remove(section_id).is_some()
    }

    fn notify(&mut self, section_id: &str, change: Option<PageChange>) -> Option<PageChange> {
        if let Some(change) = change {
            tracing::debug!(
                section = section_id,
                from = change.from,
                to = change.to,
                "page change notified"
            );
            self.observer.page_change(section_id, change);
        }
        change
    }

    /// Navigate a paged section. `None` if the section has no paging state.
    pub fn go_to_page(&mut self, section_id: &str, page: i64) -> Option<PageChange> {
        let change = self.paging.get_mut(section_id).map(|m| m.go_to_page(page));
        self.notify(section_id, change)
    }

    pub fn next_page(&mut self, section_id: &str) -> Option<PageChange> {
        let change = self.paging.get_mut(section_id).map(PagingMachine::next);
        self.notify(section_id, change)
    }

    pub fn prev_page(&mut self, section_id: &str) -> Option<PageChange> {
        let change = self.paging.get_mut(section_id).map(PagingMachine::prev);
        self.notify(section_id, change)
    }

    pub fn pointer_down(&mut self, section_id: &str, x: f64) {
        if let Some(machine) = self.paging.get_mut(section_id) {
            machine.pointer_down(x);
        }
    }

    pub fn pointer_move(&mut self, section_id: &str, x: f64) {
        if let Some(machine) = self.paging.get_mut(section_id) {
            machine.pointer_move(x);
        }
    }

    /// Release the pointer; a completed swipe navigates once.
    pub fn pointer_up(&mut self, section_id: &str) -> Option<PageChange> {
        let change = self.paging.get_mut(section_id).and_then(PagingMachine::pointer_up);
        self.notify(section_id, change)
    }

    pub fn pointer_leave(&mut self, section_id: &str) -> Option<PageChange> {
        let change = self
            .paging
            .get_mut(section_id)
            .and_then(PagingMachine::pointer_leave);
        self.notify(section_id, change)
    }

    /// Drive every autoplay timer to `now`. Changes are reported in section
    /// id order.
    pub fn tick(&mut self, now: Instant) -> Vec<(String, PageChange)> {
        let mut ids: Vec<String> = self.paging.keys().cloned().collect();
        ids.sort_unstable();
        let mut fired = Vec::new();
        for id in ids {
            let change = self.paging.get_mut(&id).and_then(|m| m.tick(now));
            if let Some(change) = change {
                self.observer.page_change(&id, change);
                fired.push((id, change));
            }
        }
        fired
    }
}

/// The section's machine, created on first sight with its ownership fixed.
fn machine_for<'a>(
    store: &'a mut FxHashMap<String, PagingMachine>,
    section: &Section,
    default_swipe_threshold: f64,
) -> &'a mut PagingMachine {
    let machine = store.entry(section.id.clone()).or_insert_with(|| {
        tracing::debug!(
            section = %section.id,
            controlled = section.current_page.is_some(),
            "paging machine created"
        );
        // Seeded with the declared child count; each pass narrows it to the
        // rendered count.
        PagingMachine::new(
            section.paging.clone(),
            section.locators.len(),
            section.current_page,
        )
            .with_default_swipe_threshold(default_swipe_threshold)
    });
    machine.reconfigure(section.paging.clone());
    if let Some(page) = section.current_page {
        machine.sync_external_page(page);
    }
    machine
}
