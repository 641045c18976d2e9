// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer-driven switching.
//!
//! [`Autoplay`] requests a switch at a fixed interval, walking forward until
//! the last card refuses, then backward until the first card refuses, and so
//! on. A refused request only flips the direction; the next attempt waits
//! for the following interval. Requests that land while a switch is still
//! running are refused too and flip the direction the same way.

use crate::switcher::StackSwitcher;
use crate::time::{Duration, HostTime, Timebase};
use crate::trace::Tracer;
use crate::transition::Direction;

/// Interval between autoplay attempts in the sample host.
pub const DEFAULT_INTERVAL_MS: u64 = 1_000;

/// Alternating forward/backward switch driver.
#[derive(Clone, Debug)]
pub struct Autoplay {
    interval: Duration,
    direction: Direction,
    next_at: Option<HostTime>,
}

impl Autoplay {
    /// Creates a driver that attempts a switch every `interval`, starting
    /// forward.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            direction: Direction::Forward,
            next_at: None,
        }
    }

    /// A driver with the default one-second interval.
    #[must_use]
    pub fn with_default_interval(timebase: Timebase) -> Self {
        Self::new(Duration::from_millis(DEFAULT_INTERVAL_MS, timebase))
    }

    /// Direction of the next attempt.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Host time of the next attempt, once the first poll has anchored the
    /// schedule.
    #[inline]
    #[must_use]
    pub fn next_at(&self) -> Option<HostTime> {
        self.next_at
    }

    /// Attempts a switch if one is due at `now`.
    ///
    /// The first poll only schedules the first attempt one interval later.
    /// Returns `None` when nothing was due, otherwise whether the switcher
    /// accepted the request.
    pub fn poll(&mut self, now: HostTime, switcher: &mut StackSwitcher) -> Option<bool> {
        self.poll_traced(now, switcher, &mut Tracer::none())
    }

    /// Like [`poll`](Self::poll), reporting switch requests to `tracer`.
    pub fn poll_traced(
        &mut self,
        now: HostTime,
        switcher: &mut StackSwitcher,
        tracer: &mut Tracer<'_>,
    ) -> Option<bool> {
        let due = *self.next_at.get_or_insert(now + self.interval);
        if now < due {
            return None;
        }
        self.next_at = Some(now + self.interval);

        let accepted = match self.direction {
            Direction::Forward => switcher.switch_forward_traced(tracer),
            Direction::Backward => switcher.switch_back_traced(tracer),
        };
        if !accepted {
            self.direction = match self.direction {
                Direction::Forward => Direction::Backward,
                Direction::Backward => Direction::Forward,
            };
        }
        Some(accepted)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::config::StackConfig;

    fn switcher_with(count: usize) -> StackSwitcher {
        let mut switcher = StackSwitcher::new(StackConfig::sample());
        for _ in 0..count {
            let _ = switcher.add_card();
        }
        switcher
    }

    #[test]
    fn first_attempt_waits_one_interval() {
        let mut switcher = switcher_with(3);
        let mut autoplay = Autoplay::with_default_interval(Timebase::MILLIS);
        assert_eq!(autoplay.poll(HostTime(0), &mut switcher), None);
        assert_eq!(autoplay.next_at(), Some(HostTime(1_000)));
        assert_eq!(autoplay.poll(HostTime(999), &mut switcher), None);
        assert_eq!(autoplay.poll(HostTime(1_000), &mut switcher), Some(true));
        assert_eq!(autoplay.next_at(), Some(HostTime(2_000)));
    }

    #[test]
    fn walks_forward_then_back() {
        let mut switcher = switcher_with(3);
        let mut autoplay = Autoplay::new(Duration(1_000));
        let _ = autoplay.poll(HostTime(0), &mut switcher);

        let mut fronts = Vec::new();
        let mut outcomes = Vec::new();
        // Tick every 100 ms so each 500 ms switch completes between attempts.
        for t in (100..=8_000).step_by(100) {
            let now = HostTime(t);
            let _ = switcher.tick(now);
            if let Some(accepted) = autoplay.poll(now, &mut switcher) {
                outcomes.push(accepted);
                fronts.push(switcher.front_index());
            }
        }
        // Attempts at 1s..8s: forward, forward, refused, back, back, refused,
        // forward, forward.
        assert_eq!(
            outcomes,
            [true, true, false, true, true, false, true, true]
        );
        assert_eq!(fronts, [0, 1, 2, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn refusal_while_animating_flips_direction() {
        let mut switcher = switcher_with(3);
        let mut autoplay = Autoplay::new(Duration(100));
        let _ = autoplay.poll(HostTime(0), &mut switcher);
        assert_eq!(autoplay.poll(HostTime(100), &mut switcher), Some(true));
        let _ = switcher.tick(HostTime(100));
        assert_eq!(autoplay.poll(HostTime(200), &mut switcher), Some(false));
        assert_eq!(autoplay.direction(), Direction::Backward);
    }

    #[test]
    fn empty_switcher_keeps_flipping() {
        let mut switcher = switcher_with(0);
        let mut autoplay = Autoplay::new(Duration(10));
        let _ = autoplay.poll(HostTime(0), &mut switcher);
        assert_eq!(autoplay.poll(HostTime(10), &mut switcher), Some(false));
        assert_eq!(autoplay.poll(HostTime(20), &mut switcher), Some(false));
        assert_eq!(autoplay.direction(), Direction::Forward);
    }
}
