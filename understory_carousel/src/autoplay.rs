// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoplay scheduler: a self-renewing, cancellable single-shot timer.
//!
//! The scheduler does not own a clock. The host polls it with its current time;
//! a resumed scheduler arms on the next poll and fires `interval` later. Each
//! firing schedules the next one from the firing time, so a slow frame delays
//! the following step instead of bunching steps together.
//!
//! ```
//! use understory_carousel::autoplay::Autoplay;
//!
//! let mut autoplay = Autoplay::new(1000);
//! autoplay.resume();
//! assert!(!autoplay.poll(0)); // arms: due at 1000
//! assert!(!autoplay.poll(999));
//! assert!(autoplay.poll(1000)); // fires, next due at 2000
//!
//! autoplay.pause();
//! autoplay.pause(); // harmless
//! assert!(!autoplay.poll(5000));
//! ```

/// Scheduling state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AutoplayState {
    /// No firing pending.
    Paused,
    /// Resumed; the deadline is set on the next poll.
    Armed,
    /// A firing is due at the given time.
    Scheduled(u64),
}

/// Periodic "advance to the next panel" timer.
#[derive(Copy, Clone, Debug)]
pub struct Autoplay {
    interval: u64,
    state: AutoplayState,
}

impl Autoplay {
    /// Creates a paused scheduler with the given interval in milliseconds.
    #[must_use]
    pub const fn new(interval: u64) -> Self {
        Self {
            interval,
            state: AutoplayState::Paused,
        }
    }

    /// The configured interval.
    #[must_use]
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// The current scheduling state.
    #[must_use]
    pub fn state(&self) -> AutoplayState {
        self.state
    }

    /// Returns `true` unless paused.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != AutoplayState::Paused
    }

    /// Starts or resumes scheduling.
    ///
    /// A pending deadline is kept, so repeated resumes do not postpone it.
    pub fn resume(&mut self) {
        if self.state == AutoplayState::Paused {
            self.state = AutoplayState::Armed;
        }
    }

    /// Cancels any pending firing. Idempotent.
    pub fn pause(&mut self) {
        self.state = AutoplayState::Paused;
    }

    /// Advances the scheduler to `now`; returns `true` when a step is due.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.state {
            AutoplayState::Paused => false,
            AutoplayState::Armed => {
                self.state = AutoplayState::Scheduled(now.saturating_add(self.interval));
                false
            }
            AutoplayState::Scheduled(deadline) if now >= deadline => {
                self.state = AutoplayState::Scheduled(now.saturating_add(self.interval));
                true
            }
            AutoplayState::Scheduled(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_paused() {
        let mut autoplay = Autoplay::new(3500);
        assert!(!autoplay.is_active());
        assert!(!autoplay.poll(10_000));
        assert_eq!(autoplay.state(), AutoplayState::Paused);
    }

    #[test]
    fn reschedules_from_firing_time() {
        let mut autoplay = Autoplay::new(100);
        autoplay.resume();
        autoplay.poll(0);
        // Late tick: fires once and schedules relative to the tick.
        assert!(autoplay.poll(250));
        assert_eq!(autoplay.state(), AutoplayState::Scheduled(350));
        assert!(!autoplay.poll(300));
        assert!(autoplay.poll(350));
    }

    #[test]
    fn resume_keeps_pending_deadline() {
        let mut autoplay = Autoplay::new(100);
        autoplay.resume();
        autoplay.poll(0);
        autoplay.resume();
        assert_eq!(autoplay.state(), AutoplayState::Scheduled(100));
    }

    #[test]
    fn pause_then_resume_restarts_interval() {
        let mut autoplay = Autoplay::new(100);
        autoplay.resume();
        autoplay.poll(0);
        autoplay.pause();
        assert!(!autoplay.poll(100));
        autoplay.resume();
        assert!(!autoplay.poll(150));
        assert!(!autoplay.poll(249));
        assert!(autoplay.poll(250));
    }
}
