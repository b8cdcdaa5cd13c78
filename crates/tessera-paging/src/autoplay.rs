#![forbid(unsafe_code)]

//! Single-instance autoplay timer.
//!
//! The timer is keyed by the inputs that affect it (enabled flag, interval,
//! page count, mode, animation). Reconciling with a different key cancels
//! the armed deadline and re-arms it; reconciling with the same key is a
//! no-op. There is never more than one pending deadline, so timers cannot
//! stack.
//!
//! Time is injected. A freshly (re)armed timer takes its start instant from
//! the next [`AutoplayTimer::poll`] call.
//!
//! # Invariants
//!
//! 1. At most one deadline is pending.
//! 2. An inactive key leaves the timer disarmed.
//! 3. `poll` fires at most once per call and reschedules from `now`.

use web_time::{Duration, Instant};

use crate::{Animation, PagingMode};

/// The inputs an armed timer depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayKey {
    pub enabled: bool,
    pub interval: Duration,
    pub total_pages: usize,
    pub mode: PagingMode,
    pub animation: Animation,
}

impl AutoplayKey {
    /// Autoplay runs only for sliding tracks with more than one page.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled
            && self.total_pages > 1
            && self.mode == PagingMode::Slider
            && self.animation == Animation::Slide
            && !self.interval.is_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Disarmed,
    /// Armed, waiting for the first `poll` to fix the start instant.
    Pending,
    Armed { deadline: Instant },
}

/// A cancel-then-restart interval timer.
#[derive(Debug, Clone)]
pub struct AutoplayTimer {
    key: Option<AutoplayKey>,
    state: TimerState,
    generation: u64,
}

impl Default for AutoplayTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoplayTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            key: None,
            state: TimerState::Disarmed,
            generation: 0,
        }
    }

    /// Bring the timer in line with `key`. Returns `true` if it was restarted
    /// or torn down.
    pub fn reconcile(&mut self, key: AutoplayKey) -> bool {
        if self.key == Some(key) {
            return false;
        }
        self.key = Some(key);
        self.generation = self.generation.wrapping_add(1);
        self.state = if key.is_active() {
            TimerState::Pending
        } else {
            TimerState::Disarmed
        };
        tracing::debug!(
            generation = self.generation,
            active = key.is_active(),
            interval_ms = key.interval.as_millis() as u64,
            total_pages = key.total_pages,
            "autoplay timer re-armed"
        );
        true
    }

    /// Cancel without changing the key.
    pub fn cancel(&mut self) {
        self.state = TimerState::Disarmed;
        self.key = None;
    }

    /// Whether a deadline is pending or armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.state != TimerState::Disarmed
    }

    /// Number of times the timer has been (re)started or torn down.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The next deadline, once the start instant is known.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            TimerState::Armed { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Advance to `now`; returns `true` when the interval elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(interval) = self.key.map(|k| k.interval) else {
            return false;
        };
        match self.state {
            TimerState::Disarmed => false,
            TimerState::Pending => {
                self.state = schedule(now, interval);
                false
            }
            TimerState::Armed { deadline } if now >= deadline => {
                self.state = schedule(now, interval);
                true
            }
            TimerState::Armed { .. } => false,
        }
    }
}

/// A deadline past the representable range never fires.
fn schedule(now: Instant, interval: Duration) -> TimerState {
    now.checked_add(interval)
        .map_or(TimerState::Disarmed, |deadline| TimerState::Armed { deadline })
}
