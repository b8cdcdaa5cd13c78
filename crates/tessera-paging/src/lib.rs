#![forbid(unsafe_code)]

//! Paging state machine for Tessera sections.
//!
//! # Role in Tessera
//! A section with a paging mode splits its ordered children into pages.
//! This crate holds the state that survives between resolution passes: the
//! page index and who owns it, the swipe gesture on sliding tracks, and the
//! autoplay timer. It knows nothing about geometry; the `tessera` facade
//! feeds it child counts and applies the resulting [`PagedView`].
//!
//! Time is always injected (`web_time::Instant`), so every transition is
//! deterministic under test.

pub mod autoplay;
pub mod config;
pub mod drag;
pub mod machine;
pub mod view;

pub use autoplay::{AutoplayKey, AutoplayTimer};
pub use config::{
    Animation, DEFAULT_AUTOPLAY_INTERVAL_MS, DEFAULT_SWIPE_THRESHOLD_PX, PagingConfig, PagingMode,
};
pub use drag::{DragPhase, DragTracker, SwipeDirection};
pub use machine::{
    PageChange, PagingMachine, PagingOwnership, PagingState, effective_page_size, normalize_page,
    total_pages,
};
pub use view::{Arrows, Dot, PagePresence, PageSlot, PagedView, PagingControls};
