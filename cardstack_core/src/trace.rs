// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the switcher.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! switcher calls as cards come and go, layouts run, and switches move through
//! their lifecycle. All method bodies default to no-ops, so implementing only
//! the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! A switch produces this sequence of events:
//!
//! ```text
//! switch_requested ─┬─► switch_rejected
//!                   └─► (first tick) switch_started ─► progress* ─┬─► switch_completed
//!                                                                 └─► switch_cancelled
//! ```

use kurbo::Size;

use crate::card::CardId;
use crate::time::HostTime;
use crate::transition::{Direction, SwitchRejection};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the host asks for a switch.
#[derive(Clone, Copy, Debug)]
pub struct SwitchRequestedEvent {
    /// Requested direction.
    pub direction: Direction,
    /// Front index at the time of the request.
    pub front_index: usize,
    /// Number of cards in the collection.
    pub card_count: usize,
}

/// Emitted when a switch request is refused.
#[derive(Clone, Copy, Debug)]
pub struct SwitchRejectedEvent {
    /// Requested direction.
    pub direction: Direction,
    /// Front index, unchanged by the refused request.
    pub front_index: usize,
    /// Why the request was refused.
    pub reason: SwitchRejection,
}

/// Emitted on the first tick of an accepted switch, when its clock starts.
#[derive(Clone, Copy, Debug)]
pub struct SwitchStartedEvent {
    /// Switch direction.
    pub direction: Direction,
    /// Front index (already decremented for a backward switch).
    pub front_index: usize,
    /// Host time the animation is anchored to.
    pub now: HostTime,
}

/// Emitted for every tick that moves progress without finishing.
#[derive(Clone, Copy, Debug)]
pub struct ProgressEvent {
    /// Switch direction.
    pub direction: Direction,
    /// Eased progress ratio.
    pub progress: f64,
    /// Host time of the tick.
    pub now: HostTime,
}

/// Emitted when a switch reaches its end.
#[derive(Clone, Copy, Debug)]
pub struct SwitchCompletedEvent {
    /// Switch direction.
    pub direction: Direction,
    /// Front index after completion.
    pub front_index: usize,
    /// Host time of the final tick.
    pub now: HostTime,
}

/// Emitted when a running switch is abandoned without completing.
#[derive(Clone, Copy, Debug)]
pub struct SwitchCancelledEvent {
    /// Direction of the abandoned switch.
    pub direction: Direction,
    /// Front index after cancellation.
    pub front_index: usize,
}

/// Emitted after a layout pass.
#[derive(Clone, Copy, Debug)]
pub struct LayoutEvent {
    /// Size the switcher was laid out in.
    pub available: Size,
    /// Number of cards positioned.
    pub card_count: usize,
    /// Common card width.
    pub card_width: f64,
    /// Horizontal step between stacked cards.
    pub stack_offset: f64,
    /// Cards whose frame changed.
    pub frames_changed: usize,
}

/// Emitted when a card enters or leaves the collection.
#[derive(Clone, Copy, Debug)]
pub struct CardEvent {
    /// The card.
    pub card: CardId,
    /// Its collection index (before removal, for removals).
    pub index: usize,
    /// Collection size after the change.
    pub card_count: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a [`StackSwitcher`](crate::switcher::StackSwitcher).
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the host requests a switch.
    fn on_switch_requested(&mut self, e: &SwitchRequestedEvent) {
        _ = e;
    }

    /// Called when a switch request is refused.
    fn on_switch_rejected(&mut self, e: &SwitchRejectedEvent) {
        _ = e;
    }

    /// Called when an accepted switch starts its clock.
    fn on_switch_started(&mut self, e: &SwitchStartedEvent) {
        _ = e;
    }

    /// Called when progress moves.
    fn on_progress(&mut self, e: &ProgressEvent) {
        _ = e;
    }

    /// Called when a switch completes.
    fn on_switch_completed(&mut self, e: &SwitchCompletedEvent) {
        _ = e;
    }

    /// Called when a switch is cancelled.
    fn on_switch_cancelled(&mut self, e: &SwitchCancelledEvent) {
        _ = e;
    }

    /// Called after a layout pass.
    fn on_layout(&mut self, e: &LayoutEvent) {
        _ = e;
    }

    /// Called when a card is added.
    fn on_card_added(&mut self, e: &CardEvent) {
        _ = e;
    }

    /// Called when a card is removed.
    fn on_card_removed(&mut self, e: &CardEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Generates a `Tracer` method forwarding one event type to its sink method.
macro_rules! dispatch {
    ($(#[$meta:meta])* $name:ident => $sink_method:ident($event:ty)) => {
        $(#[$meta])*
        #[inline]
        pub fn $name(&mut self, e: &$event) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$sink_method(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    dispatch!(
        /// Emits a [`SwitchRequestedEvent`].
        switch_requested => on_switch_requested(SwitchRequestedEvent)
    );
    dispatch!(
        /// Emits a [`SwitchRejectedEvent`].
        switch_rejected => on_switch_rejected(SwitchRejectedEvent)
    );
    dispatch!(
        /// Emits a [`SwitchStartedEvent`].
        switch_started => on_switch_started(SwitchStartedEvent)
    );
    dispatch!(
        /// Emits a [`ProgressEvent`].
        progress => on_progress(ProgressEvent)
    );
    dispatch!(
        /// Emits a [`SwitchCompletedEvent`].
        switch_completed => on_switch_completed(SwitchCompletedEvent)
    );
    dispatch!(
        /// Emits a [`SwitchCancelledEvent`].
        switch_cancelled => on_switch_cancelled(SwitchCancelledEvent)
    );
    dispatch!(
        /// Emits a [`LayoutEvent`].
        layout => on_layout(LayoutEvent)
    );
    dispatch!(
        /// Emits a [`CardEvent`] for an added card.
        card_added => on_card_added(CardEvent)
    );
    dispatch!(
        /// Emits a [`CardEvent`] for a removed card.
        card_removed => on_card_removed(CardEvent)
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_requested() -> SwitchRequestedEvent {
        SwitchRequestedEvent {
            direction: Direction::Forward,
            front_index: 2,
            card_count: 5,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_switch_requested(&sample_requested());
        sink.on_switch_rejected(&SwitchRejectedEvent {
            direction: Direction::Backward,
            front_index: 0,
            reason: SwitchRejection::AtBoundary,
        });
        sink.on_layout(&LayoutEvent {
            available: Size::new(400.0, 300.0),
            card_count: 0,
            card_width: 320.0,
            stack_offset: 0.0,
            frames_changed: 0,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.switch_requested(&sample_requested());
        tracer.progress(&ProgressEvent {
            direction: Direction::Forward,
            progress: 0.5,
            now: HostTime(16),
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            requested: Vec<usize>,
            completed: Vec<usize>,
        }
        impl TraceSink for RecordingSink {
            fn on_switch_requested(&mut self, e: &SwitchRequestedEvent) {
                self.requested.push(e.front_index);
            }
            fn on_switch_completed(&mut self, e: &SwitchCompletedEvent) {
                self.completed.push(e.front_index);
            }
        }

        let mut sink = RecordingSink {
            requested: Vec::new(),
            completed: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.switch_requested(&sample_requested());
        tracer.switch_completed(&SwitchCompletedEvent {
            direction: Direction::Forward,
            front_index: 3,
            now: HostTime(500),
        });
        // Unhandled events fall through to the default no-op.
        tracer.card_added(&CardEvent {
            card: CardId::from_raw(0, 0),
            index: 0,
            card_count: 1,
        });
        drop(tracer);
        assert_eq!(sink.requested, &[2]);
        assert_eq!(sink.completed, &[3]);
    }
}
