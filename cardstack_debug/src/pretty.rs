// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to milliseconds using a [`Timebase`].

use std::io::Write;

use cardstack_core::time::{HostTime, Timebase};
use cardstack_core::trace::{
    CardEvent, LayoutEvent, ProgressEvent, SwitchCancelledEvent, SwitchCompletedEvent,
    SwitchRejectedEvent, SwitchRequestedEvent, SwitchStartedEvent, TraceSink,
};
use cardstack_core::transition::{Direction, SwitchRejection};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
    progress: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self::new(Box::new(std::io::stderr()), timebase)
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self::with_writer(writer, timebase)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    ///
    /// Per-frame progress lines are printed; see
    /// [`without_progress`](Self::without_progress).
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self {
            writer,
            timebase,
            progress: true,
        }
    }

    /// Suppresses the per-frame `[progress]` lines.
    #[must_use]
    pub fn without_progress(mut self) -> Self {
        self.progress = false;
        self
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn host_ms(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1_000_000.0
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "forward",
        Direction::Backward => "back",
    }
}

fn rejection_name(reason: SwitchRejection) -> &'static str {
    match reason {
        SwitchRejection::TransitionActive => "busy",
        SwitchRejection::AtBoundary => "boundary",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_switch_requested(&mut self, e: &SwitchRequestedEvent) {
        let _ = writeln!(
            self.writer,
            "[switch:request] {} front={} cards={}",
            direction_name(e.direction),
            e.front_index,
            e.card_count,
        );
    }

    fn on_switch_rejected(&mut self, e: &SwitchRejectedEvent) {
        let _ = writeln!(
            self.writer,
            "[switch:reject] {} front={} reason={}",
            direction_name(e.direction),
            e.front_index,
            rejection_name(e.reason),
        );
    }

    fn on_switch_started(&mut self, e: &SwitchStartedEvent) {
        let _ = writeln!(
            self.writer,
            "[switch:start] {} front={} at {:.1}ms",
            direction_name(e.direction),
            e.front_index,
            self.host_ms(e.now),
        );
    }

    fn on_progress(&mut self, e: &ProgressEvent) {
        if !self.progress {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[progress] {} p={:.3} at {:.1}ms",
            direction_name(e.direction),
            e.progress,
            self.host_ms(e.now),
        );
    }

    fn on_switch_completed(&mut self, e: &SwitchCompletedEvent) {
        let _ = writeln!(
            self.writer,
            "[switch:done] {} front={} at {:.1}ms",
            direction_name(e.direction),
            e.front_index,
            self.host_ms(e.now),
        );
    }

    fn on_switch_cancelled(&mut self, e: &SwitchCancelledEvent) {
        let _ = writeln!(
            self.writer,
            "[switch:cancel] {} front={}",
            direction_name(e.direction),
            e.front_index,
        );
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        let _ = writeln!(
            self.writer,
            "[layout] {:.0}x{:.0} cards={} width={:.1} offset={:.1} moved={}",
            e.available.width,
            e.available.height,
            e.card_count,
            e.card_width,
            e.stack_offset,
            e.frames_changed,
        );
    }

    fn on_card_added(&mut self, e: &CardEvent) {
        let _ = writeln!(
            self.writer,
            "[card:add] {:?} index={} cards={}",
            e.card, e.index, e.card_count,
        );
    }

    fn on_card_removed(&mut self, e: &CardEvent) {
        let _ = writeln!(
            self.writer,
            "[card:remove] {:?} index={} cards={}",
            e.card, e.index, e.card_count,
        );
    }
}
