#![forbid(unsafe_code)]

//! Per-section paging state machine.
//!
//! [`PagingMachine`] owns everything a paged section keeps between passes:
//! the page index (when internally owned), the drag gesture and the autoplay
//! timer. Navigation always goes through [`PagingMachine::go_to_page`], which
//! normalizes the target and reports a [`PageChange`].
//!
//! # Ownership
//!
//! Ownership is chosen at construction and never changes:
//!
//! - [`PagingOwnership::Internal`]: the machine assigns the page itself.
//! - [`PagingOwnership::External`]: the host owns the page. Navigation only
//!   reports; the host feeds the accepted value back with
//!   [`PagingMachine::sync_external_page`].
//!
//! # Invariants
//!
//! 1. `total_pages() >= 1`.
//! 2. `current_page() <= total_pages() - 1`.
//! 3. An externally owned page is never written by navigation, drag or
//!    autoplay.
//! 4. At most one autoplay deadline is pending.
//!
//! # Failure Modes
//!
//! - Drag and autoplay calls on a section that is not a sliding track are
//!   ignored rather than rejected.

use web_time::Instant;

use crate::autoplay::{AutoplayKey, AutoplayTimer};
use crate::drag::{DragPhase, DragTracker, SwipeDirection};
use crate::view::PagedView;
use crate::{DEFAULT_SWIPE_THRESHOLD_PX, PagingConfig};

/// Who owns the page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingOwnership {
    /// Host-controlled page, read-only to the machine.
    External(usize),
    /// Machine-controlled page.
    Internal(usize),
}

impl PagingOwnership {
    #[must_use]
    pub const fn page(&self) -> usize {
        match *self {
            Self::External(page) | Self::Internal(page) => page,
        }
    }

    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

/// A navigation outcome, reported whether or not the page was assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub from: usize,
    pub to: usize,
}

impl PageChange {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Read-only snapshot of the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagingState {
    pub page_index: usize,
    pub total_pages: usize,
    pub drag_phase: DragPhase,
    pub drag_delta: f64,
}

/// Children per page; `page_size == 0` puts everything on one page.
#[must_use]
pub fn effective_page_size(page_size: usize, child_count: usize) -> usize {
    if page_size > 0 { page_size } else { child_count }
}

/// `max(1, ceil(child_count / effective_page_size))`.
#[must_use]
pub fn total_pages(page_size: usize, child_count: usize) -> usize {
    let size = effective_page_size(page_size, child_count);
    if size == 0 {
        return 1;
    }
    child_count.div_ceil(size).max(1)
}

/// Normalize a navigation target against `[0, last]`.
#[must_use]
pub fn normalize_page(target: i64, last: usize, loop_pages: bool) -> usize {
    let last_i = i64::try_from(last).unwrap_or(i64::MAX);
    if target < 0 {
        if loop_pages { last } else { 0 }
    } else if target > last_i {
        if loop_pages { 0 } else { last }
    } else {
        usize::try_from(target).unwrap_or(last)
    }
}

// ---------------------------------------------------------------------------
// Machine
// ---------------------------------------------------------------------------

/// Paging, drag and autoplay state for one section.
#[derive(Debug, Clone)]
pub struct PagingMachine {
    config: PagingConfig,
    ownership: PagingOwnership,
    child_count: usize,
    default_swipe_threshold: f64,
    drag: DragTracker,
    autoplay: AutoplayTimer,
}

impl PagingMachine {
    /// Create a machine for `child_count` children.
    ///
    /// `controlled` selects external ownership; otherwise the page starts at
    /// `config.default_page`.
    #[must_use]
    pub fn new(config: PagingConfig, child_count: usize, controlled: Option<usize>) -> Self {
        let ownership = match controlled {
            Some(page) => PagingOwnership::External(page),
            None => PagingOwnership::Internal(config.default_page),
        };
        let mut machine = Self {
            config,
            ownership,
            child_count,
            default_swipe_threshold: DEFAULT_SWIPE_THRESHOLD_PX,
            drag: DragTracker::new(),
            autoplay: AutoplayTimer::new(),
        };
        machine.clamp_internal();
        machine.reconcile_autoplay();
        machine
    }

    /// Threshold used when the section does not set its own.
    #[must_use]
    pub fn with_default_swipe_threshold(mut self, threshold: f64) -> Self {
        self.default_swipe_threshold = threshold;
        self
    }

    #[must_use]
    pub fn config(&self) -> &PagingConfig {
        &self.config
    }

    #[must_use]
    pub const fn ownership(&self) -> PagingOwnership {
        self.ownership
    }

    #[must_use]
    pub const fn child_count(&self) -> usize {
        self.child_count
    }

    #[must_use]
    pub fn effective_page_size(&self) -> usize {
        effective_page_size(self.config.page_size, self.child_count)
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.config.page_size, self.child_count)
    }

    #[must_use]
    pub fn last_page(&self) -> usize {
        self.total_pages() - 1
    }

    /// The page in effect, clamped to the current page count.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.ownership.page().min(self.last_page())
    }

    #[must_use]
    pub fn swipe_threshold(&self) -> f64 {
        self.config.swipe_threshold_or(self.default_swipe_threshold)
    }

    #[must_use]
    pub fn state(&self) -> PagingState {
        PagingState {
            page_index: self.current_page(),
            total_pages: self.total_pages(),
            drag_phase: self.drag.phase(),
            drag_delta: self.drag.delta(),
        }
    }

    /// Replace the section's paging props. Ownership is kept.
    pub fn reconfigure(&mut self, config: PagingConfig) {
        if self.config == config {
            return;
        }
        self.config = config;
        if !self.config.is_sliding_track() {
            self.drag.reset();
        }
        self.clamp_internal();
        self.reconcile_autoplay();
    }

    /// Update the number of paged children.
    pub fn set_child_count(&mut self, child_count: usize) {
        if self.child_count == child_count {
            return;
        }
        self.child_count = child_count;
        self.clamp_internal();
        self.reconcile_autoplay();
    }

    /// Accept the host's page value. Returns `false` for internal ownership.
    pub fn sync_external_page(&mut self, page: usize) -> bool {
        match &mut self.ownership {
            PagingOwnership::External(current) => {
                *current = page;
                true
            }
            PagingOwnership::Internal(_) => false,
        }
    }

    // -- navigation ---------------------------------------------------------

    /// Navigate to `target`, wrapping when looping and clamping otherwise.
    pub fn go_to_page(&mut self, target: i64) -> PageChange {
        let from = self.current_page();
        let to = normalize_page(target, self.last_page(), self.config.loop_pages);
        if let PagingOwnership::Internal(page) = &mut self.ownership {
            *page = to;
        }
        tracing::debug!(
            from,
            to,
            external = self.ownership.is_external(),
            "page change"
        );
        PageChange { from, to }
    }

    pub fn next(&mut self) -> PageChange {
        let target = page_as_i64(self.current_page()).saturating_add(1);
        self.go_to_page(target)
    }

    pub fn prev(&mut self) -> PageChange {
        let target = page_as_i64(self.current_page()) - 1;
        self.go_to_page(target)
    }

    // -- drag ---------------------------------------------------------------

    pub fn pointer_down(&mut self, x: f64) {
        if self.config.is_sliding_track() {
            self.drag.pointer_down(x);
        }
    }

    pub fn pointer_move(&mut self, x: f64) {
        self.drag.pointer_move(x);
    }

    /// Release the pointer; a swipe past the threshold navigates once.
    pub fn pointer_up(&mut self) -> Option<PageChange> {
        let direction = self.drag.pointer_up(self.swipe_threshold())?;
        Some(self.swipe(direction))
    }

    pub fn pointer_leave(&mut self) -> Option<PageChange> {
        let direction = self.drag.pointer_leave(self.swipe_threshold())?;
        Some(self.swipe(direction))
    }

    fn swipe(&mut self, direction: SwipeDirection) -> PageChange {
        match direction {
            SwipeDirection::Next => self.next(),
            SwipeDirection::Prev => self.prev(),
        }
    }

    /// Horizontal track offset in percent of the surface width.
    #[must_use]
    pub fn track_offset_percent(&self, surface_width: f64) -> f64 {
        let base = -(self.current_page() as f64) * 100.0;
        if self.drag.is_active() && surface_width > 0.0 {
            base + self.drag.delta() / surface_width * 100.0
        } else {
            base
        }
    }

    // -- autoplay -----------------------------------------------------------

    /// The inputs the autoplay timer is keyed on.
    #[must_use]
    pub fn autoplay_key(&self) -> AutoplayKey {
        AutoplayKey {
            enabled: self.config.auto_play && self.config.is_enabled(),
            interval: self.config.autoplay_interval(),
            total_pages: self.total_pages(),
            mode: self.config.paging_mode,
            animation: self.config.animation,
        }
    }

    #[must_use]
    pub fn autoplay_armed(&self) -> bool {
        self.autoplay.is_armed()
    }

    #[must_use]
    pub fn autoplay_generation(&self) -> u64 {
        self.autoplay.generation()
    }

    /// Advance the autoplay timer; fires at most one page change.
    pub fn tick(&mut self, now: Instant) -> Option<PageChange> {
        self.reconcile_autoplay();
        if self.autoplay.poll(now) {
            Some(self.next())
        } else {
            None
        }
    }

    /// Stop autoplay until the key next changes.
    pub fn stop_autoplay(&mut self) {
        self.autoplay.cancel();
    }

    fn reconcile_autoplay(&mut self) {
        let key = self.autoplay_key();
        self.autoplay.reconcile(key);
    }

    fn clamp_internal(&mut self) {
        let last = self.last_page();
        if let PagingOwnership::Internal(page) = &mut self.ownership
            && *page > last
        {
            *page = last;
        }
    }

    /// Slot assignment and controls for the current page.
    #[must_use]
    pub fn view(&self) -> PagedView {
        PagedView::build(
            &self.config,
            self.child_count,
            self.current_page(),
        )
    }
}

fn page_as_i64(page: usize) -> i64 {
    i64::try_from(page).unwrap_or(i64::MAX)
}
