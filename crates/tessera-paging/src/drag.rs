#![forbid(unsafe_code)]

//! Horizontal swipe tracking for sliding tracks.
//!
//! [`DragTracker`] follows one pointer: down captures the origin, move
//! updates the signed delta, and up or leave ends the gesture. Ending a
//! gesture reports a [`SwipeDirection`] when the delta exceeded the swipe
//! threshold, and always returns the tracker to idle with a zero delta.
//!
//! # Invariants
//!
//! 1. `delta() == 0.0` whenever the phase is [`DragPhase::Idle`].
//! 2. Pointer leave behaves exactly like pointer up.
//! 3. A release reports at most one direction.

/// Whether a pointer is currently held on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Active,
}

/// Page direction implied by a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Dragged left: advance to the next page.
    Next,
    /// Dragged right: go back to the previous page.
    Prev,
}

/// Single-pointer drag state.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    phase: DragPhase,
    origin: f64,
    delta: f64,
}

impl DragTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
            origin: 0.0,
            delta: 0.0,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.phase, DragPhase::Active)
    }

    /// Signed horizontal distance from the origin.
    #[must_use]
    pub const fn delta(&self) -> f64 {
        self.delta
    }

    /// Begin a gesture at `x`. A second down restarts from the new origin.
    pub fn pointer_down(&mut self, x: f64) {
        self.phase = DragPhase::Active;
        self.origin = x;
        self.delta = 0.0;
    }

    /// Update the delta; ignored while idle.
    pub fn pointer_move(&mut self, x: f64) {
        if self.is_active() && x.is_finite() {
            self.delta = x - self.origin;
        }
    }

    /// End the gesture and report the swipe, if any.
    pub fn pointer_up(&mut self, threshold: f64) -> Option<SwipeDirection> {
        if !self.is_active() {
            return None;
        }
        let delta = self.delta;
        self.phase = DragPhase::Idle;
        self.delta = 0.0;
        if delta.abs() > threshold {
            Some(if delta < 0.0 {
                SwipeDirection::Next
            } else {
                SwipeDirection::Prev
            })
        } else {
            None
        }
    }

    /// Pointer left the surface mid-gesture.
    pub fn pointer_leave(&mut self, threshold: f64) -> Option<SwipeDirection> {
        self.pointer_up(threshold)
    }

    /// Drop the gesture without reporting anything.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
