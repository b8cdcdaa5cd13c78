#![forbid(unsafe_code)]

//! Paging configuration.

use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Default autoplay interval.
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 3000;

/// Default horizontal distance a drag must exceed to turn the page.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f64 = 50.0;

/// How a section pages its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagingMode {
    /// Every child renders; no pages.
    #[default]
    None,
    /// Discrete pages.
    Pages,
    /// Swipeable track.
    Slider,
}

/// Transition between pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    #[default]
    None,
    Slide,
    Fade,
    Scale,
}

/// Paging props of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PagingConfig {
    pub paging_mode: PagingMode,
    /// Children per page; `0` puts every child on one page.
    pub page_size: usize,
    pub default_page: usize,
    pub show_dots: bool,
    pub show_arrows: bool,
    pub auto_play: bool,
    /// Milliseconds between autoplay advances.
    pub auto_play_interval: u64,
    #[serde(rename = "loop")]
    pub loop_pages: bool,
    pub lazy: bool,
    pub animation: Animation,
    /// Per-section override of the engine-wide swipe threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe_threshold: Option<f64>,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            paging_mode: PagingMode::None,
            page_size: 0,
            default_page: 0,
            show_dots: false,
            show_arrows: false,
            auto_play: false,
            auto_play_interval: DEFAULT_AUTOPLAY_INTERVAL_MS,
            loop_pages: false,
            lazy: false,
            animation: Animation::None,
            swipe_threshold: None,
        }
    }
}

impl PagingConfig {
    /// Discrete pages of `page_size` children.
    #[must_use]
    pub fn pages(page_size: usize) -> Self {
        Self {
            paging_mode: PagingMode::Pages,
            page_size,
            ..Self::default()
        }
    }

    /// A sliding track of `page_size` children per page.
    #[must_use]
    pub fn slider(page_size: usize) -> Self {
        Self {
            paging_mode: PagingMode::Slider,
            page_size,
            animation: Animation::Slide,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn looping(mut self, loop_pages: bool) -> Self {
        self.loop_pages = loop_pages;
        self
    }

    #[must_use]
    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    #[must_use]
    pub fn animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn autoplay(mut self, interval_ms: u64) -> Self {
        self.auto_play = true;
        self.auto_play_interval = interval_ms;
        self
    }

    #[must_use]
    pub fn controls(mut self, dots: bool, arrows: bool) -> Self {
        self.show_dots = dots;
        self.show_arrows = arrows;
        self
    }

    #[must_use]
    pub fn default_page(mut self, page: usize) -> Self {
        self.default_page = page;
        self
    }

    /// Whether any paging applies.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self.paging_mode, PagingMode::None)
    }

    /// Whether children sit on a sliding track (drag and autoplay capable).
    #[must_use]
    pub const fn is_sliding_track(&self) -> bool {
        matches!(self.paging_mode, PagingMode::Slider) && matches!(self.animation, Animation::Slide)
    }

    /// The swipe threshold, falling back to `default` when unset.
    #[must_use]
    pub fn swipe_threshold_or(&self, default: f64) -> f64 {
        self.swipe_threshold.unwrap_or(default)
    }

    #[must_use]
    pub const fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.auto_play_interval)
    }

    /// Report configuration problems. Empty means usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.auto_play && self.auto_play_interval == 0 {
            errors.push("autoPlayInterval must be > 0 when autoPlay is set".to_string());
        }
        if let Some(threshold) = self.swipe_threshold
            && !(threshold.is_finite() && threshold >= 0.0)
        {
            errors.push(format!(
                "swipeThreshold must be finite and >= 0, got {threshold}"
            ));
        }
        errors
    }
}
