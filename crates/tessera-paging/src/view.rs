#![forbid(unsafe_code)]

//! Which children render for the current page, and how.

use serde::Serialize;

use crate::{PagingConfig, effective_page_size, total_pages};

/// How a child takes part in the current render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PagePresence {
    /// On the current page, visible and interactive.
    Active,
    /// On another page of a sliding track; rendered off-screen.
    Track,
    /// Rendered but hidden and non-interactive.
    Inactive,
}

/// One rendered child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlot {
    /// Index into the section's ordered children.
    pub child: usize,
    pub page: usize,
    pub presence: PagePresence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    pub page: usize,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrows {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// Navigation affordances, present only when there is somewhere to go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagingControls {
    pub dots: Option<Vec<Dot>>,
    pub arrows: Option<Arrows>,
}

impl PagingControls {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dots.is_none() && self.arrows.is_none()
    }
}

/// Render plan for a paged section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedView {
    pub page: usize,
    pub total_pages: usize,
    /// Children sit on a horizontally translated track.
    pub track: bool,
    pub slots: Vec<PageSlot>,
    pub controls: PagingControls,
}

impl PagedView {
    /// Plan the render of `child_count` children at `page`.
    #[must_use]
    pub fn build(config: &PagingConfig, child_count: usize, page: usize) -> Self {
        if !config.is_enabled() {
            return Self {
                page: 0,
                total_pages: 1,
                track: false,
                slots: (0..child_count)
                    .map(|child| PageSlot {
                        child,
                        page: 0,
                        presence: PagePresence::Active,
                    })
                    .collect(),
                controls: PagingControls::default(),
            };
        }

        let size = effective_page_size(config.page_size, child_count).max(1);
        let total = total_pages(config.page_size, child_count);
        let page = page.min(total - 1);
        let track = config.is_sliding_track();

        let slots = (0..child_count)
            .filter_map(|child| {
                let child_page = child / size;
                let presence = if child_page == page {
                    PagePresence::Active
                } else if track {
                    PagePresence::Track
                } else if config.lazy {
                    return None;
                } else {
                    PagePresence::Inactive
                };
                Some(PageSlot {
                    child,
                    page: child_page,
                    presence,
                })
            })
            .collect();

        Self {
            page,
            total_pages: total,
            track,
            slots,
            controls: controls(config, page, total),
        }
    }

    /// Slots that are visible on screen right now.
    pub fn active(&self) -> impl Iterator<Item = &PageSlot> {
        self.slots
            .iter()
            .filter(|slot| slot.presence == PagePresence::Active)
    }
}

fn controls(config: &PagingConfig, page: usize, total: usize) -> PagingControls {
    if total <= 1 {
        return PagingControls::default();
    }
    let dots = config.show_dots.then(|| {
        (0..total)
            .map(|p| Dot {
                page: p,
                active: p == page,
            })
            .collect()
    });
    let arrows = config.show_arrows.then(|| Arrows {
        prev_enabled: config.loop_pages || page > 0,
        next_enabled: config.loop_pages || page + 1 < total,
    });
    PagingControls { dots, arrows }
}
