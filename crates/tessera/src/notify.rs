#![forbid(unsafe_code)]

//! Outbound notifications.
//!
//! The engine reports progress through a [`LayoutObserver`]. Every method
//! has a no-op default, so hosts implement only what they listen to.
//! [`RecordingObserver`] keeps everything it sees, in order.

use tessera_layout::{Breakpoint, LayoutIssue};
use tessera_paging::PageChange;

use crate::LayoutError;

/// Receives resolution and paging events.
pub trait LayoutObserver {
    fn render_start(&mut self, _container_id: &str, _breakpoint: Breakpoint) {}

    fn render_end(&mut self, _container_id: &str) {}

    fn section_rendered(&mut self, _section_id: &str) {}

    fn locator_rendered(&mut self, _section_id: &str, _locator_id: &str, _z_index: i32) {}

    /// The full non-empty issue batch of one section pass.
    fn layout_validation(&mut self, _section_id: &str, _issues: &[LayoutIssue]) {}

    /// One overlapping pair.
    fn locator_collision(&mut self, _issue: &LayoutIssue) {}

    fn fatal_error(&mut self, _error: &LayoutError) {}

    fn page_change(&mut self, _section_id: &str, _change: PageChange) {}
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LayoutObserver for NoopObserver {}

impl<T: LayoutObserver + ?Sized> LayoutObserver for &mut T {
    fn render_start(&mut self, container_id: &str, breakpoint: Breakpoint) {
        (**self).render_start(container_id, breakpoint);
    }

    fn render_end(&mut self, container_id: &str) {
        (**self).render_end(container_id);
    }

    fn section_rendered(&mut self, section_id: &str) {
        (**self).section_rendered(section_id);
    }

    fn locator_rendered(&mut self, section_id: &str, locator_id: &str, z_index: i32) {
        (**self).locator_rendered(section_id, locator_id, z_index);
    }

    fn layout_validation(&mut self, section_id: &str, issues: &[LayoutIssue]) {
        (**self).layout_validation(section_id, issues);
    }

    fn locator_collision(&mut self, issue: &LayoutIssue) {
        (**self).locator_collision(issue);
    }

    fn fatal_error(&mut self, error: &LayoutError) {
        (**self).fatal_error(error);
    }

    fn page_change(&mut self, section_id: &str, change: PageChange) {
        (**self).page_change(section_id, change);
    }
}

/// A recorded observer call.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    RenderStart {
        container_id: String,
        breakpoint: Breakpoint,
    },
    RenderEnd {
        container_id: String,
    },
    SectionRendered {
        section_id: String,
    },
    LocatorRendered {
        section_id: String,
        locator_id: String,
        z_index: i32,
    },
    LayoutValidation {
        section_id: String,
        issues: Vec<LayoutIssue>,
    },
    LocatorCollision(LayoutIssue),
    FatalError(LayoutError),
    PageChange {
        section_id: String,
        change: PageChange,
    },
}

/// Captures every notification for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub notifications: Vec<Notification>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    /// Ids of locators rendered, in render order.
    #[must_use]
    pub fn rendered_locators(&self) -> Vec<&str> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::LocatorRendered { locator_id, .. } => Some(locator_id.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn fatal_errors(&self) -> Vec<&LayoutError> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::FatalError(err) => Some(err),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn collisions(&self) -> Vec<&LayoutIssue> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::LocatorCollision(issue) => Some(issue),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn page_changes(&self) -> Vec<PageChange> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::PageChange { change, .. } => Some(*change),
                _ => None,
            })
            .collect()
    }
}

impl LayoutObserver for RecordingObserver {
    fn render_start(&mut self, container_id: &str, breakpoint: Breakpoint) {
        self.notifications.push(Notification::RenderStart {
            container_id: container_id.to_string(),
            breakpoint,
        });
    }

    fn render_end(&mut self, container_id: &str) {
        self.notifications.push(Notification::RenderEnd {
            container_id: container_id.to_string(),
        });
    }

    fn section_rendered(&mut self, section_id: &str) {
        self.notifications.push(Notification::SectionRendered {
            section_id: section_id.to_string(),
        });
    }

    fn locator_rendered(&mut self, section_id: &str, locator_id: &str, z_index: i32) {
        self.notifications.push(Notification::LocatorRendered {
            section_id: section_id.to_string(),
            locator_id: locator_id.to_string(),
            z_index,
        });
    }

    fn layout_validation(&mut self, section_id: &str, issues: &[LayoutIssue]) {
        self.notifications.push(Notification::LayoutValidation {
            section_id: section_id.to_string(),
            issues: issues.to_vec(),
        });
    }

    fn locator_collision(&mut self, issue: &LayoutIssue) {
        self.notifications
            .push(Notification::LocatorCollision(issue.clone()));
    }

    fn fatal_error(&mut self, error: &LayoutError) {
        self.notifications.push(Notification::FatalError(error.clone()));
    }

    fn page_change(&mut self, section_id: &str, change: PageChange) {
        self.notifications.push(Notification::PageChange {
            section_id: section_id.to_string(),
            change,
        });
    }
}
