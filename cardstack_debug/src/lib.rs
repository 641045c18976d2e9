// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for cardstack
//! diagnostics.
//!
//! This crate provides [`TraceSink`](cardstack_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from recorded
//!   bytes.
//! - [`Fanout`]: forwards every event to two sinks.

pub mod chrome;
pub mod pretty;
pub mod recorder;

use cardstack_core::trace::{
    CardEvent, LayoutEvent, ProgressEvent, SwitchCancelledEvent, SwitchCompletedEvent,
    SwitchRejectedEvent, SwitchRequestedEvent, SwitchStartedEvent, TraceSink,
};

/// A [`TraceSink`] that forwards every event to two inner sinks, first `A`
/// then `B`.
#[derive(Debug, Default)]
pub struct Fanout<A, B> {
    /// First receiver.
    pub first: A,
    /// Second receiver.
    pub second: B,
}

impl<A, B> Fanout<A, B> {
    /// Combines two sinks.
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

macro_rules! fan_out {
    ($($method:ident($event:ty)),* $(,)?) => {
        $(
            fn $method(&mut self, e: &$event) {
                self.first.$method(e);
                self.second.$method(e);
            }
        )*
    };
}

impl<A: TraceSink, B: TraceSink> TraceSink for Fanout<A, B> {
    fan_out!(
        on_switch_requested(SwitchRequestedEvent),
        on_switch_rejected(SwitchRejectedEvent),
        on_switch_started(SwitchStartedEvent),
        on_progress(ProgressEvent),
        on_switch_completed(SwitchCompletedEvent),
        on_switch_cancelled(SwitchCancelledEvent),
        on_layout(LayoutEvent),
        on_card_added(CardEvent),
        on_card_removed(CardEvent),
    );
}

#[cfg(test)]
mod tests {
    use cardstack_core::time::{HostTime, Timebase};
    use cardstack_core::transition::Direction;

    use super::*;
    use crate::pretty::PrettyPrintSink;
    use crate::recorder::{RecorderSink, decode};

    #[test]
    fn fanout_reaches_both_sinks() {
        let mut sink = Fanout::new(
            RecorderSink::new(),
            PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MILLIS),
        );
        sink.on_switch_completed(&SwitchCompletedEvent {
            direction: Direction::Forward,
            front_index: 2,
            now: HostTime(40),
        });
        assert_eq!(decode(sink.first.as_bytes()).count(), 1);
        let text = String::from_utf8(sink.second.into_writer()).unwrap();
        assert!(text.starts_with("[switch:done]"), "got: {text}");
    }
}
