// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Front-index and progress state machine.
//!
//! [`SwitchState`] owns the front index, the progress ratio, and at most one
//! active [`Transition`]. It is driven entirely by the host's frame clock:
//!
//! ```text
//!                 request_forward()                    tick() reaches end
//!   Idle ─────────────────────────────► AnimatingForward ───────────────► Idle
//!    │  progress 0 → 1                                    front += 1, progress = 0
//!    │
//!    │            request_back()                       tick() reaches end
//!    └────────────────────────────────► AnimatingBackward ──────────────► Idle
//!       front -= 1 now, progress 1 → 0                    progress = 0
//! ```
//!
//! [`set_front_index`](SwitchState::set_front_index) jumps directly from any
//! state to `Idle` without running the completion effects of an active
//! transition.

use crate::easing::Easing;
use crate::time::{Duration, HostTime};

/// Progress above which the incoming front card paints on top.
pub const PAINT_PIVOT_PROGRESS: f64 = 0.5;

/// Which way a switch moves through the collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward higher indices: the front card recedes to the back.
    Forward,
    /// Toward lower indices: the backmost card returns to the front.
    Backward,
}

/// Coarse state of a [`SwitchState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionState {
    /// No transition active; progress is 0.
    Idle,
    /// A forward switch is running.
    AnimatingForward,
    /// A backward switch is running.
    AnimatingBackward,
}

/// Why a switch request was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwitchRejection {
    /// Another transition is still running.
    TransitionActive,
    /// The front card is already the last (forward) or first (backward).
    AtBoundary,
}

/// A running switch animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Direction of the switch.
    pub direction: Direction,
    /// Host time of the first frame, set by the first tick after the request.
    pub started_at: Option<HostTime>,
}

/// Result of advancing the clock by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Nothing is animating.
    Idle,
    /// Progress moved; the transition is still running.
    Progressed {
        /// New progress ratio.
        progress: f64,
    },
    /// The transition reached its end and the state is now idle.
    Completed {
        /// Direction of the finished transition.
        direction: Direction,
        /// Front index after completion.
        front_index: usize,
    },
}

/// Front index, progress ratio, and transition lifecycle.
#[derive(Clone, Debug)]
pub struct SwitchState {
    front_index: usize,
    progress: f64,
    active: Option<Transition>,
    duration: Duration,
    easing: Easing,
}

impl SwitchState {
    /// Creates an idle state with front index 0.
    #[must_use]
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            front_index: 0,
            progress: 0.0,
            active: None,
            duration,
            easing,
        }
    }

    /// Current front index.
    #[inline]
    #[must_use]
    pub fn front_index(&self) -> usize {
        self.front_index
    }

    /// Current progress ratio in `0.0..=1.0`.
    #[inline]
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// The active transition, if any.
    #[inline]
    #[must_use]
    pub fn active(&self) -> Option<&Transition> {
        self.active.as_ref()
    }

    /// Whether a transition is running.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Coarse state.
    #[must_use]
    pub fn state(&self) -> TransitionState {
        match self.active.map(|t| t.direction) {
            None => TransitionState::Idle,
            Some(Direction::Forward) => TransitionState::AnimatingForward,
            Some(Direction::Backward) => TransitionState::AnimatingBackward,
        }
    }

    /// Index stack orders are measured from when choosing paint order.
    ///
    /// Past the halfway point the incoming card (`front + 1`) is treated as
    /// the front so it paints over the outgoing one.
    #[inline]
    #[must_use]
    pub fn paint_pivot(&self) -> usize {
        if self.progress > PAINT_PIVOT_PROGRESS {
            self.front_index + 1
        } else {
            self.front_index
        }
    }

    /// Sets the animation length for future transitions.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Sets the easing for future frames.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Starts a forward switch in a collection of `count` cards.
    ///
    /// # Errors
    ///
    /// Refused while another transition runs, or when the front card is the
    /// last one (including an empty collection).
    pub fn request_forward(&mut self, count: usize) -> Result<(), SwitchRejection> {
        if self.active.is_some() {
            return Err(SwitchRejection::TransitionActive);
        }
        if self.front_index + 1 >= count {
            return Err(SwitchRejection::AtBoundary);
        }
        self.progress = 0.0;
        self.active = Some(Transition {
            direction: Direction::Forward,
            started_at: None,
        });
        Ok(())
    }

    /// Starts a backward switch.
    ///
    /// The front index is decremented immediately and progress jumps to 1,
    /// so the new front is in effect while the old one is still drawn on top.
    ///
    /// # Errors
    ///
    /// Refused while another transition runs, or when the front card is
    /// already the first.
    pub fn request_back(&mut self) -> Result<(), SwitchRejection> {
        if self.active.is_some() {
            return Err(SwitchRejection::TransitionActive);
        }
        if self.front_index == 0 {
            return Err(SwitchRejection::AtBoundary);
        }
        self.front_index -= 1;
        self.progress = 1.0;
        self.active = Some(Transition {
            direction: Direction::Backward,
            started_at: None,
        });
        Ok(())
    }

    /// Jumps to `index` (clamped into the collection), cancelling any active
    /// transition without applying its completion effects.
    ///
    /// Returns the direction of the cancelled transition, if there was one.
    pub fn set_front_index(&mut self, index: usize, count: usize) -> Option<Direction> {
        let cancelled = self.active.take().map(|t| t.direction);
        self.front_index = index.min(count.saturating_sub(1));
        self.progress = 0.0;
        cancelled
    }

    /// Advances the active transition to host time `now`.
    pub fn tick(&mut self, now: HostTime) -> TickOutcome {
        let Some(transition) = self.active.as_mut() else {
            return TickOutcome::Idle;
        };
        let started_at = *transition.started_at.get_or_insert(now);
        let direction = transition.direction;

        let fraction = now
            .saturating_duration_since(started_at)
            .fraction_of(self.duration);
        if fraction >= 1.0 {
            self.active = None;
            self.progress = 0.0;
            if direction == Direction::Forward {
                self.front_index += 1;
            }
            return TickOutcome::Completed {
                direction,
                front_index: self.front_index,
            };
        }

        let eased = self.easing.evaluate(fraction);
        self.progress = match direction {
            Direction::Forward => eased,
            Direction::Backward => 1.0 - eased,
        };
        TickOutcome::Progressed {
            progress: self.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> SwitchState {
        SwitchState::new(Duration(500), Easing::Linear)
    }

    #[test]
    fn forward_runs_zero_to_one_then_advances() {
        let mut s = linear();
        assert_eq!(s.request_forward(3), Ok(()));
        assert_eq!(s.state(), TransitionState::AnimatingForward);

        // First tick starts the clock.
        assert_eq!(
            s.tick(HostTime(1_000)),
            TickOutcome::Progressed { progress: 0.0 }
        );
        assert_eq!(
            s.tick(HostTime(1_125)),
            TickOutcome::Progressed { progress: 0.25 }
        );
        assert_eq!(s.front_index(), 0, "front unchanged mid-transition");
        assert_eq!(
            s.tick(HostTime(1_500)),
            TickOutcome::Completed {
                direction: Direction::Forward,
                front_index: 1
            }
        );
        assert_eq!(s.front_index(), 1);
        assert_eq!(s.progress(), 0.0);
        assert_eq!(s.state(), TransitionState::Idle);
        assert_eq!(s.tick(HostTime(2_000)), TickOutcome::Idle);
    }

    #[test]
    fn back_decrements_immediately_and_runs_one_to_zero() {
        let mut s = linear();
        let _ = s.set_front_index(2, 3);
        assert_eq!(s.request_back(), Ok(()));
        assert_eq!(s.front_index(), 1);
        assert_eq!(s.progress(), 1.0);

        assert_eq!(s.tick(HostTime(0)), TickOutcome::Progressed { progress: 1.0 });
        assert_eq!(
            s.tick(HostTime(125)),
            TickOutcome::Progressed { progress: 0.75 }
        );
        assert_eq!(
            s.tick(HostTime(600)),
            TickOutcome::Completed {
                direction: Direction::Backward,
                front_index: 1
            }
        );
        assert_eq!(s.front_index(), 1, "no index change at completion");
        assert_eq!(s.progress(), 0.0);
    }

    #[test]
    fn boundaries_are_rejected() {
        let mut s = linear();
        assert_eq!(s.request_back(), Err(SwitchRejection::AtBoundary));
        let _ = s.set_front_index(2, 3);
        assert_eq!(s.request_forward(3), Err(SwitchRejection::AtBoundary));
        assert_eq!(s.front_index(), 2);
        assert_eq!(s.request_forward(0), Err(SwitchRejection::AtBoundary));
    }

    #[test]
    fn active_transition_rejects_new_requests() {
        let mut s = linear();
        let _ = s.set_front_index(1, 3);
        assert_eq!(s.request_forward(3), Ok(()));
        let _ = s.tick(HostTime(0));
        let _ = s.tick(HostTime(100));
        let progress = s.progress();

        assert_eq!(s.request_forward(3), Err(SwitchRejection::TransitionActive));
        assert_eq!(s.request_back(), Err(SwitchRejection::TransitionActive));
        assert_eq!(s.progress(), progress);
        assert_eq!(s.front_index(), 1);
    }

    #[test]
    fn set_front_index_cancels_without_completion() {
        let mut s = linear();
        assert_eq!(s.request_forward(3), Ok(()));
        let _ = s.tick(HostTime(0));
        let _ = s.tick(HostTime(400));

        assert_eq!(s.set_front_index(0, 3), Some(Direction::Forward));
        assert_eq!(s.front_index(), 0, "forward increment suppressed");
        assert_eq!(s.progress(), 0.0);
        assert!(!s.is_animating());
        assert_eq!(s.tick(HostTime(1_000)), TickOutcome::Idle);
    }

    #[test]
    fn set_front_index_clamps() {
        let mut s = linear();
        assert_eq!(s.set_front_index(9, 3), None);
        assert_eq!(s.front_index(), 2);
        let _ = s.set_front_index(4, 0);
        assert_eq!(s.front_index(), 0);
    }

    #[test]
    fn forward_then_back_round_trips() {
        let mut s = linear();
        let _ = s.set_front_index(1, 4);
        assert_eq!(s.request_forward(4), Ok(()));
        let _ = s.tick(HostTime(0));
        let _ = s.tick(HostTime(500));
        assert_eq!(s.front_index(), 2);

        assert_eq!(s.request_back(), Ok(()));
        let _ = s.tick(HostTime(1_000));
        let _ = s.tick(HostTime(1_500));
        assert_eq!(s.front_index(), 1);
        assert_eq!(s.progress(), 0.0);
    }

    #[test]
    fn paint_pivot_flips_past_halfway() {
        let mut s = linear();
        assert_eq!(s.request_forward(3), Ok(()));
        let _ = s.tick(HostTime(0));
        let _ = s.tick(HostTime(250));
        assert_eq!(s.paint_pivot(), 0, "exactly halfway keeps the old front");
        let _ = s.tick(HostTime(300));
        assert_eq!(s.paint_pivot(), 1);
    }

    #[test]
    fn eased_progress_stays_in_range() {
        let mut s = SwitchState::new(Duration(500), Easing::AccelerateDecelerate);
        assert_eq!(s.request_forward(2), Ok(()));
        let _ = s.tick(HostTime(0));
        for t in (0..500).step_by(16) {
            if let TickOutcome::Progressed { progress } = s.tick(HostTime(t)) {
                assert!((0.0..=1.0).contains(&progress));
            }
        }
    }
}
