// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Each switch becomes a duration slice from its first tick to completion or
//! cancellation, progress becomes a counter track, and everything else is an
//! instant event. Events that carry no host time are stamped with the time of
//! the most recent timed event.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use cardstack_core::time::Timebase;
use cardstack_core::transition::Direction;

use crate::recorder::{RecordedCard, RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut last_us = 0.0;
    let mut switch_open = false;

    for recorded in decode(bytes) {
        if let Some(t) = recorded.time() {
            last_us = ticks_to_us(t.ticks(), timebase);
        }
        match recorded {
            RecordedEvent::SwitchRequested(e) => {
                events.push(instant(
                    "SwitchRequested",
                    last_us,
                    json!({
                        "direction": direction_name(e.direction),
                        "front_index": e.front_index,
                        "card_count": e.card_count,
                    }),
                ));
            }
            RecordedEvent::SwitchRejected(e) => {
                events.push(instant(
                    "SwitchRejected",
                    last_us,
                    json!({
                        "direction": direction_name(e.direction),
                        "front_index": e.front_index,
                        "reason": format!("{:?}", e.reason),
                    }),
                ));
            }
            RecordedEvent::SwitchStarted(e) => {
                switch_open = true;
                events.push(json!({
                    "ph": "B",
                    "name": switch_name(e.direction),
                    "cat": "Switch",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "front_index": e.front_index,
                    }
                }));
            }
            RecordedEvent::Progress(e) => {
                events.push(json!({
                    "ph": "C",
                    "name": "progress",
                    "cat": "Switch",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "progress": e.progress,
                    }
                }));
            }
            RecordedEvent::SwitchCompleted(e) => {
                switch_open = false;
                events.push(json!({
                    "ph": "E",
                    "name": switch_name(e.direction),
                    "cat": "Switch",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "front_index": e.front_index,
                    }
                }));
                // Progress snaps back to 0 on completion.
                events.push(json!({
                    "ph": "C",
                    "name": "progress",
                    "cat": "Switch",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "progress": 0.0,
                    }
                }));
            }
            RecordedEvent::SwitchCancelled(e) => {
                if switch_open {
                    switch_open = false;
                    events.push(json!({
                        "ph": "E",
                        "name": switch_name(e.direction),
                        "cat": "Switch",
                        "ts": last_us,
                        "pid": 0,
                        "tid": 0,
                        "args": {
                            "front_index": e.front_index,
                            "cancelled": true,
                        }
                    }));
                } else {
                    events.push(instant(
                        "SwitchCancelled",
                        last_us,
                        json!({
                            "direction": direction_name(e.direction),
                            "front_index": e.front_index,
                        }),
                    ));
                }
            }
            RecordedEvent::Layout(l) => {
                events.push(instant(
                    "Layout",
                    last_us,
                    json!({
                        "width": l.width,
                        "height": l.height,
                        "card_count": l.card_count,
                        "card_width": l.card_width,
                        "stack_offset": l.stack_offset,
                        "frames_changed": l.frames_changed,
                    }),
                ));
            }
            RecordedEvent::CardAdded(c) => {
                events.push(instant("CardAdded", last_us, card_args(&c)));
            }
            RecordedEvent::CardRemoved(c) => {
                events.push(instant("CardRemoved", last_us, card_args(&c)));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn instant(name: &str, ts: f64, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": "Switcher",
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "s": "t",
        "args": args,
    })
}

fn card_args(c: &RecordedCard) -> Value {
    json!({
        "slot": c.slot,
        "generation": c.generation,
        "index": c.index,
        "card_count": c.card_count,
    })
}

fn switch_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "Switch forward",
        Direction::Backward => "Switch back",
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "forward",
        Direction::Backward => "back",
    }
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use cardstack_core::time::HostTime;
    use cardstack_core::trace::{
        ProgressEvent, SwitchCancelledEvent, SwitchCompletedEvent, SwitchRequestedEvent,
        SwitchStartedEvent, TraceSink,
    };

    fn export_to_values(rec: &RecorderSink, timebase: Timebase) -> Vec<Value> {
        let mut out = Vec::new();
        export(rec.as_bytes(), timebase, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        serde_json::from_str(&json_str).unwrap()
    }

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_switch_requested(&SwitchRequestedEvent {
            direction: Direction::Forward,
            front_index: 0,
            card_count: 3,
        });
        rec.on_switch_started(&SwitchStartedEvent {
            direction: Direction::Forward,
            front_index: 0,
            now: HostTime(1_000),
        });
        rec.on_progress(&ProgressEvent {
            direction: Direction::Forward,
            progress: 0.5,
            now: HostTime(1_250),
        });
        rec.on_switch_completed(&SwitchCompletedEvent {
            direction: Direction::Forward,
            front_index: 1,
            now: HostTime(1_500),
        });

        let parsed = export_to_values(&rec, Timebase::MILLIS);
        assert_eq!(parsed.len(), 5);

        // Requested before any timed event sits at zero.
        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "SwitchRequested");
        assert_eq!(parsed[0]["ts"], 0.0);

        assert_eq!(parsed[1]["ph"], "B");
        assert_eq!(parsed[1]["name"], "Switch forward");
        assert_eq!(parsed[1]["ts"], 1_000_000.0);

        assert_eq!(parsed[2]["ph"], "C");
        assert_eq!(parsed[2]["args"]["progress"], 0.5);

        assert_eq!(parsed[3]["ph"], "E");
        assert_eq!(parsed[3]["args"]["front_index"], 1);
        assert_eq!(parsed[4]["args"]["progress"], 0.0);
    }

    #[test]
    fn cancellation_closes_open_switch() {
        let mut rec = RecorderSink::new();
        rec.on_switch_started(&SwitchStartedEvent {
            direction: Direction::Backward,
            front_index: 1,
            now: HostTime(10),
        });
        rec.on_switch_cancelled(&SwitchCancelledEvent {
            direction: Direction::Backward,
            front_index: 0,
        });
        rec.on_switch_cancelled(&SwitchCancelledEvent {
            direction: Direction::Forward,
            front_index: 0,
        });

        let parsed = export_to_values(&rec, Timebase::NANOS);
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[1]["ph"], "E");
        assert_eq!(parsed[1]["ts"], 0.01);
        assert_eq!(parsed[1]["args"]["cancelled"], true);
        // A second cancel with nothing open is an instant.
        assert_eq!(parsed[2]["ph"], "i");
        assert_eq!(parsed[2]["name"], "SwitchCancelled");
    }

    #[test]
    fn export_empty_recording() {
        let parsed = export_to_values(&RecorderSink::new(), Timebase::NANOS);
        assert!(parsed.is_empty());
    }
}
