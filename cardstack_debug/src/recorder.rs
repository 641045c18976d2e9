// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Card handles are stored as their raw slot and generation, since handles
//! cannot be rebuilt outside the switcher that issued them.

use cardstack_core::time::HostTime;
use cardstack_core::trace::{
    CardEvent, LayoutEvent, ProgressEvent, SwitchCancelledEvent, SwitchCompletedEvent,
    SwitchRejectedEvent, SwitchRequestedEvent, SwitchStartedEvent, TraceSink,
};
use cardstack_core::transition::{Direction, SwitchRejection};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SWITCH_REQUESTED: u8 = 1;
const TAG_SWITCH_REJECTED: u8 = 2;
const TAG_SWITCH_STARTED: u8 = 3;
const TAG_PROGRESS: u8 = 4;
const TAG_SWITCH_COMPLETED: u8 = 5;
const TAG_SWITCH_CANCELLED: u8 = 6;
const TAG_LAYOUT: u8 = 7;
const TAG_CARD_ADDED: u8 = 8;
const TAG_CARD_REMOVED: u8 = 9;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_usize(&mut self, v: usize) {
        self.write_u64(v as u64);
    }

    fn write_direction(&mut self, d: Direction) {
        self.write_u8(match d {
            Direction::Forward => 0,
            Direction::Backward => 1,
        });
    }

    fn write_rejection(&mut self, r: SwitchRejection) {
        self.write_u8(match r {
            SwitchRejection::TransitionActive => 0,
            SwitchRejection::AtBoundary => 1,
        });
    }

    fn write_card(&mut self, tag: u8, e: &CardEvent) {
        self.write_u8(tag);
        self.write_u32(e.card.slot());
        self.write_u32(e.card.generation());
        self.write_usize(e.index);
        self.write_usize(e.card_count);
    }
}

impl TraceSink for RecorderSink {
    fn on_switch_requested(&mut self, e: &SwitchRequestedEvent) {
        self.write_u8(TAG_SWITCH_REQUESTED);
        self.write_direction(e.direction);
        self.write_usize(e.front_index);
        self.write_usize(e.card_count);
    }

    fn on_switch_rejected(&mut self, e: &SwitchRejectedEvent) {
        self.write_u8(TAG_SWITCH_REJECTED);
        self.write_direction(e.direction);
        self.write_usize(e.front_index);
        self.write_rejection(e.reason);
    }

    fn on_switch_started(&mut self, e: &SwitchStartedEvent) {
        self.write_u8(TAG_SWITCH_STARTED);
        self.write_direction(e.direction);
        self.write_usize(e.front_index);
        self.write_u64(e.now.ticks());
    }

    fn on_progress(&mut self, e: &ProgressEvent) {
        self.write_u8(TAG_PROGRESS);
        self.write_direction(e.direction);
        self.write_f64(e.progress);
        self.write_u64(e.now.ticks());
    }

    fn on_switch_completed(&mut self, e: &SwitchCompletedEvent) {
        self.write_u8(TAG_SWITCH_COMPLETED);
        self.write_direction(e.direction);
        self.write_usize(e.front_index);
        self.write_u64(e.now.ticks());
    }

    fn on_switch_cancelled(&mut self, e: &SwitchCancelledEvent) {
        self.write_u8(TAG_SWITCH_CANCELLED);
        self.write_direction(e.direction);
        self.write_usize(e.front_index);
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        self.write_u8(TAG_LAYOUT);
        self.write_f64(e.available.width);
        self.write_f64(e.available.height);
        self.write_usize(e.card_count);
        self.write_f64(e.card_width);
        self.write_f64(e.stack_offset);
        self.write_usize(e.frames_changed);
    }

    fn on_card_added(&mut self, e: &CardEvent) {
        self.write_card(TAG_CARD_ADDED, e);
    }

    fn on_card_removed(&mut self, e: &CardEvent) {
        self.write_card(TAG_CARD_REMOVED, e);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A card membership change as recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordedCard {
    /// Raw slot of the card handle.
    pub slot: u32,
    /// Generation of the card handle.
    pub generation: u32,
    /// Collection index of the card.
    pub index: usize,
    /// Collection size after the change.
    pub card_count: usize,
}

/// A layout pass as recorded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordedLayout {
    /// Available width.
    pub width: f64,
    /// Available height.
    pub height: f64,
    /// Number of cards positioned.
    pub card_count: usize,
    /// Common card width.
    pub card_width: f64,
    /// Horizontal step between stacked cards.
    pub stack_offset: f64,
    /// Cards whose frame changed.
    pub frames_changed: usize,
}

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`SwitchRequestedEvent`].
    SwitchRequested(SwitchRequestedEvent),
    /// A [`SwitchRejectedEvent`].
    SwitchRejected(SwitchRejectedEvent),
    /// A [`SwitchStartedEvent`].
    SwitchStarted(SwitchStartedEvent),
    /// A [`ProgressEvent`].
    Progress(ProgressEvent),
    /// A [`SwitchCompletedEvent`].
    SwitchCompleted(SwitchCompletedEvent),
    /// A [`SwitchCancelledEvent`].
    SwitchCancelled(SwitchCancelledEvent),
    /// A [`LayoutEvent`].
    Layout(RecordedLayout),
    /// A card was added.
    CardAdded(RecordedCard),
    /// A card was removed.
    CardRemoved(RecordedCard),
}

impl RecordedEvent {
    /// Host time carried by the event, if it has one.
    #[must_use]
    pub fn time(&self) -> Option<HostTime> {
        match self {
            Self::SwitchStarted(e) => Some(e.now),
            Self::Progress(e) => Some(e.now),
            Self::SwitchCompleted(e) => Some(e.now),
            _ => None,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_usize(&mut self) -> Option<usize> {
        usize::try_from(self.read_u64()?).ok()
    }

    fn read_time(&mut self) -> Option<HostTime> {
        self.read_u64().map(HostTime)
    }

    fn read_direction(&mut self) -> Option<Direction> {
        Some(match self.read_u8()? {
            0 => Direction::Forward,
            _ => Direction::Backward,
        })
    }

    fn read_rejection(&mut self) -> Option<SwitchRejection> {
        Some(match self.read_u8()? {
            0 => SwitchRejection::TransitionActive,
            _ => SwitchRejection::AtBoundary,
        })
    }

    fn read_card(&mut self) -> Option<RecordedCard> {
        Some(RecordedCard {
            slot: self.read_u32()?,
            generation: self.read_u32()?,
            index: self.read_usize()?,
            card_count: self.read_usize()?,
        })
    }

    fn decode_switch_requested(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SwitchRequested(SwitchRequestedEvent {
            direction: self.read_direction()?,
            front_index: self.read_usize()?,
            card_count: self.read_usize()?,
        }))
    }

    fn decode_switch_rejected(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SwitchRejected(SwitchRejectedEvent {
            direction: self.read_direction()?,
            front_index: self.read_usize()?,
            reason: self.read_rejection()?,
        }))
    }

    fn decode_switch_started(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SwitchStarted(SwitchStartedEvent {
            direction: self.read_direction()?,
            front_index: self.read_usize()?,
            now: self.read_time()?,
        }))
    }

    fn decode_progress(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Progress(ProgressEvent {
            direction: self.read_direction()?,
            progress: self.read_f64()?,
            now: self.read_time()?,
        }))
    }

    fn decode_switch_completed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SwitchCompleted(SwitchCompletedEvent {
            direction: self.read_direction()?,
            front_index: self.read_usize()?,
            now: self.read_time()?,
        }))
    }

    fn decode_switch_cancelled(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SwitchCancelled(SwitchCancelledEvent {
            direction: self.read_direction()?,
            front_index: self.read_usize()?,
        }))
    }

    fn decode_layout(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Layout(RecordedLayout {
            width: self.read_f64()?,
            height: self.read_f64()?,
            card_count: self.read_usize()?,
            card_width: self.read_f64()?,
            stack_offset: self.read_f64()?,
            frames_changed: self.read_usize()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_SWITCH_REQUESTED => self.decode_switch_requested(),
            TAG_SWITCH_REJECTED => self.decode_switch_rejected(),
            TAG_SWITCH_STARTED => self.decode_switch_started(),
            TAG_PROGRESS => self.decode_progress(),
            TAG_SWITCH_COMPLETED => self.decode_switch_completed(),
            TAG_SWITCH_CANCELLED => self.decode_switch_cancelled(),
            TAG_LAYOUT => self.decode_layout(),
            TAG_CARD_ADDED => self.read_card().map(RecordedEvent::CardAdded),
            TAG_CARD_REMOVED => self.read_card().map(RecordedEvent::CardRemoved),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use cardstack_core::card::CardId;
    use cardstack_core::config::StackConfig;
    use cardstack_core::easing::Easing;
    use cardstack_core::switcher::StackSwitcher;
    use cardstack_core::trace::Tracer;
    use kurbo::Size;

    use super::*;

    #[test]
    fn records_a_switcher_session() {
        let mut rec = RecorderSink::new();
        let mut switcher = StackSwitcher::new(StackConfig::sample().with_easing(Easing::Linear));
        {
            let mut tracer = Tracer::new(&mut rec);
            let first = switcher.add_card_traced(&mut tracer);
            let _ = switcher.add_card_traced(&mut tracer);
            let _ = switcher.measure(Size::new(400.0, 300.0), &mut |_: CardId, _: f64| 100.0);
            switcher.layout_traced(&mut tracer);
            assert!(!switcher.switch_back_traced(&mut tracer));
            assert!(switcher.switch_forward_traced(&mut tracer));
            let _ = switcher.tick_traced(HostTime(10), &mut tracer);
            let _ = switcher.tick_traced(HostTime(260), &mut tracer);
            let _ = switcher.tick_traced(HostTime(510), &mut tracer);
            switcher.remove_card_traced(first, &mut tracer);
        }

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 11, "{events:?}");
        assert!(matches!(events[0], RecordedEvent::CardAdded(c) if c.index == 0));
        assert!(matches!(events[1], RecordedEvent::CardAdded(c) if c.card_count == 2));
        match &events[2] {
            RecordedEvent::Layout(l) => {
                assert_eq!(l.width, 400.0);
                assert_eq!(l.card_count, 2);
                assert_eq!(l.card_width, 320.0);
                assert_eq!(l.frames_changed, 2);
            }
            other => panic!("expected Layout, got {other:?}"),
        }
        assert!(matches!(events[3], RecordedEvent::SwitchRequested(_)));
        match &events[4] {
            RecordedEvent::SwitchRejected(e) => {
                assert_eq!(e.direction, Direction::Backward);
                assert_eq!(e.reason, SwitchRejection::AtBoundary);
            }
            other => panic!("expected SwitchRejected, got {other:?}"),
        }
        assert!(matches!(events[5], RecordedEvent::SwitchRequested(_)));
        assert!(matches!(events[6], RecordedEvent::SwitchStarted(_)));
        assert_eq!(events[6].time(), Some(HostTime(10)));
        assert!(matches!(events[7], RecordedEvent::Progress(_)));
        match &events[8] {
            RecordedEvent::Progress(e) => {
                assert_eq!(e.progress, 0.5);
                assert_eq!(e.now, HostTime(260));
            }
            other => panic!("expected Progress, got {other:?}"),
        }
        match &events[9] {
            RecordedEvent::SwitchCompleted(e) => assert_eq!(e.front_index, 1),
            other => panic!("expected SwitchCompleted, got {other:?}"),
        }
        match &events[10] {
            RecordedEvent::CardRemoved(c) => {
                assert_eq!(c.index, 0);
                assert_eq!(c.card_count, 1);
            }
            other => panic!("expected CardRemoved, got {other:?}"),
        }
        assert!(events[10].time().is_none());
    }

    #[test]
    fn cancellation_is_recorded() {
        let mut rec = RecorderSink::new();
        rec.on_switch_cancelled(&SwitchCancelledEvent {
            direction: Direction::Backward,
            front_index: 3,
        });
        let events: Vec<_> = decode(rec.as_bytes()).collect();
        match &events[..] {
            [RecordedEvent::SwitchCancelled(e)] => {
                assert_eq!(e.direction, Direction::Backward);
                assert_eq!(e.front_index, 3);
            }
            other => panic!("expected one SwitchCancelled, got {other:?}"),
        }
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_switch_started(&SwitchStartedEvent {
            direction: Direction::Forward,
            front_index: 0,
            now: HostTime(5),
        });
        let bytes = rec.into_bytes();
        assert_eq!(decode(&bytes[..bytes.len() - 1]).count(), 0);
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }
}
