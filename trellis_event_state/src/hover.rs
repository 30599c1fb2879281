// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover intent: delayed open/close for hover-triggered overlays.
//!
//! Hover cards and tooltips should not flicker when the pointer brushes past
//! a trigger, or when it crosses the gap between trigger and content. This
//! module tracks a single overlay's hover intent with two timers:
//!
//! - an **open delay**, started when the pointer enters and cancelled if it
//!   leaves before the delay elapses;
//! - a **close delay**, started when the pointer leaves an open overlay and
//!   cancelled if it re-enters (the trigger or the content) in time.
//!
//! ## Usage
//!
//! ```
//! use trellis_event_state::hover::{HoverDelays, HoverIntent, HoverTransition};
//!
//! let mut intent = HoverIntent::with_delays(HoverDelays { open_delay: 700, close_delay: 300 });
//!
//! // Pointer enters the trigger; nothing happens until the open delay elapses.
//! assert_eq!(intent.on_enter(1_000), None);
//! assert_eq!(intent.next_deadline(), Some(1_700));
//! assert_eq!(intent.tick(1_500), None);
//! assert_eq!(intent.tick(1_700), Some(HoverTransition::Open));
//!
//! // Pointer leaves, then comes back before the close delay elapses.
//! assert_eq!(intent.on_leave(2_000), None);
//! assert_eq!(intent.on_enter(2_200), None);
//! assert_eq!(intent.tick(2_400), None);
//! assert!(intent.is_open());
//! ```
//!
//! ## Transition rules
//!
//! | Phase | enter | leave | deadline reached |
//! |---|---|---|---|
//! | `Closed` | → `Opening` (or `Open` if `open_delay == 0`) | – | – |
//! | `Opening` | keeps its deadline | → `Closed` | → `Open`, emits [`HoverTransition::Open`] |
//! | `Open` | – | → `Closing` (or `Closed` if `close_delay == 0`) | – |
//! | `Closing` | → `Open` (timer cancelled) | keeps its deadline | → `Closed`, emits [`HoverTransition::Close`] |
//!
//! Timestamps are milliseconds on any monotonic clock the host chooses.

/// Open/close delays in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HoverDelays {
    /// Time the pointer must rest before the overlay opens.
    pub open_delay: u64,
    /// Time the pointer may be away before the overlay closes.
    pub close_delay: u64,
}

impl HoverDelays {
    /// Hover card defaults: 700ms to open, 300ms to close.
    pub const HOVER_CARD: Self = Self {
        open_delay: 700,
        close_delay: 300,
    };

    /// Tooltip defaults: 700ms to open, closes immediately.
    pub const TOOLTIP: Self = Self {
        open_delay: 700,
        close_delay: 0,
    };
}

impl Default for HoverDelays {
    fn default() -> Self {
        Self::HOVER_CARD
    }
}

/// Where a [`HoverIntent`] is in its open/close cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverPhase {
    /// Not shown, no timer pending.
    Closed,
    /// Not shown yet; opens at `deadline`.
    Opening {
        /// Timestamp at which the overlay opens.
        deadline: u64,
    },
    /// Shown, no timer pending.
    Open,
    /// Still shown; closes at `deadline`.
    Closing {
        /// Timestamp at which the overlay closes.
        deadline: u64,
    },
}

/// A visible change produced by a [`HoverIntent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverTransition {
    /// The overlay should become visible.
    Open,
    /// The overlay should be hidden.
    Close,
}

/// Hover intent state machine for one overlay.
#[derive(Clone, Debug)]
pub struct HoverIntent {
    phase: HoverPhase,
    /// Configured delays.
    pub delays: HoverDelays,
}

impl HoverIntent {
    /// Create a closed intent with [`HoverDelays::default`].
    pub fn new() -> Self {
        Self::with_delays(HoverDelays::default())
    }

    /// Create a closed intent with custom delays.
    pub fn with_delays(delays: HoverDelays) -> Self {
        Self {
            phase: HoverPhase::Closed,
            delays,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    /// Returns `true` while the overlay is visible (`Open` or `Closing`).
    pub fn is_open(&self) -> bool {
        matches!(self.phase, HoverPhase::Open | HoverPhase::Closing { .. })
    }

    /// The pointer entered the trigger or the content.
    ///
    /// Returns [`HoverTransition::Open`] only when the open delay is zero and
    /// the overlay was closed.
    pub fn on_enter(&mut self, now: u64) -> Option<HoverTransition> {
        match self.phase {
            HoverPhase::Closed => {
                if self.delays.open_delay == 0 {
                    self.phase = HoverPhase::Open;
                    return Some(HoverTransition::Open);
                }
                self.phase = HoverPhase::Opening {
                    deadline: now.saturating_add(self.delays.open_delay),
                };
                None
            }
            // Re-entry cancels the pending close; the overlay never hid.
            HoverPhase::Closing { .. } => {
                self.phase = HoverPhase::Open;
                None
            }
            HoverPhase::Opening { .. } | HoverPhase::Open => None,
        }
    }

    /// The pointer left the trigger or the content.
    ///
    /// Returns [`HoverTransition::Close`] only when the close delay is zero and
    /// the overlay was open.
    pub fn on_leave(&mut self, now: u64) -> Option<HoverTransition> {
        match self.phase {
            HoverPhase::Opening { .. } => {
                self.phase = HoverPhase::Closed;
                None
            }
            HoverPhase::Open => {
                if self.delays.close_delay == 0 {
                    self.phase = HoverPhase::Closed;
                    return Some(HoverTransition::Close);
                }
                self.phase = HoverPhase::Closing {
                    deadline: now.saturating_add(self.delays.close_delay),
                };
                None
            }
            HoverPhase::Closed | HoverPhase::Closing { .. } => None,
        }
    }

    /// Advance time, firing the pending timer if its deadline has passed.
    pub fn tick(&mut self, now: u64) -> Option<HoverTransition> {
        match self.phase {
            HoverPhase::Opening { deadline } if now >= deadline => {
                self.phase = HoverPhase::Open;
                tracing::trace!(now, "hover intent opened");
                Some(HoverTransition::Open)
            }
            HoverPhase::Closing { deadline } if now >= deadline => {
                self.phase = HoverPhase::Closed;
                tracing::trace!(now, "hover intent closed");
                Some(HoverTransition::Close)
            }
            _ => None,
        }
    }

    /// Timestamp of the pending timer, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        match self.phase {
            HoverPhase::Opening { deadline } | HoverPhase::Closing { deadline } => Some(deadline),
            HoverPhase::Closed | HoverPhase::Open => None,
        }
    }

    /// Show immediately, cancelling any timer (focus, programmatic open).
    pub fn force_open(&mut self) {
        self.phase = HoverPhase::Open;
    }

    /// Hide immediately, cancelling any timer (dismissal, programmatic close).
    pub fn force_close(&mut self) {
        self.phase = HoverPhase::Closed;
    }
}

impl Default for HoverIntent {
    fn default() -> Self {
        Self::new()
    }
}
