//! Press-and-hold auto-repeat timing.
//!
//! Holding a stepper button repeats its step: once immediately on press,
//! again after an initial delay, then at a fast rate for as long as the
//! button stays held. [`RepeatTimer`] owns that schedule.
//!
//! The engine has no event loop, so the timer is poll-driven: the embedder
//! calls [`poll`](RepeatTimer::poll) with the current time (each frame, or
//! from its own timer source) and performs the number of steps returned.
//! Deadlines advance by exact intervals rather than from the poll time, so
//! a late poll catches up instead of drifting.

use std::time::{Duration, Instant};

use keel_core::logging::targets;

/// Delay between the immediate press step and the first repeat.
pub const FIRST_DELAY: Duration = Duration::from_millis(500);

/// Interval between repeats once repeating has begun.
pub const HELD_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy)]
enum RepeatState {
    Idle,
    Active {
        /// When the next repeat step is due.
        deadline: Instant,
    },
}

/// Auto-repeat schedule for press-and-hold stepping.
#[derive(Debug, Clone)]
pub struct RepeatTimer {
    state: RepeatState,
    first_delay: Duration,
    held_delay: Duration,
}

impl Default for RepeatTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl RepeatTimer {
    /// Create a timer with the standard delays.
    pub fn new() -> Self {
        Self {
            state: RepeatState::Idle,
            first_delay: FIRST_DELAY,
            held_delay: HELD_DELAY,
        }
    }

    /// Create a timer with custom delays.
    pub fn with_delays(first_delay: Duration, held_delay: Duration) -> Self {
        Self {
            state: RepeatState::Idle,
            first_delay,
            held_delay,
        }
    }

    /// Whether a press is currently being held.
    pub fn is_active(&self) -> bool {
        matches!(self.state, RepeatState::Active { .. })
    }

    /// Start the hold at `now`.
    ///
    /// Returns `true` if a step is due immediately (always, unless a hold
    /// was already in progress). The first repeat is scheduled for
    /// `now + first_delay`.
    pub fn press(&mut self, now: Instant) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = RepeatState::Active {
            deadline: now + self.first_delay,
        };
        tracing::trace!(target: targets::REPEAT, "repeat armed");
        true
    }

    /// Count the repeat steps due by `now`.
    ///
    /// Each step advances the deadline by the held interval (after the
    /// first repeat fires, the schedule runs at the fast rate), so polling
    /// late yields the steps that would have fired in between.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let RepeatState::Active { mut deadline } = self.state else {
            return 0;
        };

        let mut due = 0u32;
        while deadline <= now {
            due += 1;
            deadline += self.held_delay;
        }

        if due > 0 {
            tracing::trace!(target: targets::REPEAT, due, "repeat steps due");
        }
        self.state = RepeatState::Active { deadline };
        due
    }

    /// End the hold. Pending deadlines are discarded.
    pub fn release(&mut self) {
        if self.is_active() {
            self.state = RepeatState::Idle;
            tracing::trace!(target: targets::REPEAT, "repeat released");
        }
    }
}
