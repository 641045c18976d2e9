// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated autoplay host for a stack switcher.
//!
//! Drives five cards on a synthetic 60 Hz clock. An [`Autoplay`] driver
//! requests a switch every second, walking forward to the last card and back
//! again. Events go to both a
//! [`PrettyPrintSink`](cardstack_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](cardstack_debug::recorder::RecorderSink); the recording
//! is exported as a Chrome trace JSON file at the end.

use std::fs::File;
use std::io::BufWriter;

use cardstack_core::autoplay::Autoplay;
use cardstack_core::backend::Presenter;
use cardstack_core::card::CardId;
use cardstack_core::config::StackConfig;
use cardstack_core::switcher::{FrameChanges, StackSwitcher};
use cardstack_core::time::{HostTime, Timebase};
use cardstack_core::trace::Tracer;
use cardstack_debug::Fanout;
use cardstack_debug::pretty::PrettyPrintSink;
use cardstack_debug::recorder::RecorderSink;
use kurbo::Size;

const CARD_COUNT: usize = 5;
const FRAME_COUNT: u64 = 60 * 12;
/// 16.6ms refresh interval in nanoseconds (≈60 Hz).
const REFRESH_INTERVAL_NS: u64 = 16_666_667;
const VIEWPORT: Size = Size::new(360.0, 640.0);

/// Prints the paint order whenever it changes and counts transform updates.
#[derive(Debug, Default)]
struct ConsolePresenter {
    transform_updates: usize,
}

impl Presenter for ConsolePresenter {
    fn apply(&mut self, switcher: &StackSwitcher, changes: &FrameChanges) {
        self.transform_updates += changes.transforms.len();
        if changes.order_changed {
            let order = switcher.paint_order();
            let front = switcher.front_index();
            let opacity: Vec<String> = order
                .iter()
                .map(|&i| format!("{:.2}", switcher.transform_for(i).opacity))
                .collect();
            println!(
                "  paint order {order:?} front={front} opacity=[{}]",
                opacity.join(", ")
            );
        }
    }
}

/// Card heights vary so the vertical placement is visible in the frames.
fn natural_height(card: CardId, width: f64) -> f64 {
    width * (1.0 + 0.1 * f64::from(card.slot() % 3))
}

fn main() {
    let timebase = Timebase::NANOS;

    // -- sinks -------------------------------------------------------------
    let mut sink = Fanout::new(
        PrettyPrintSink::new(Box::new(std::io::stdout()), timebase).without_progress(),
        RecorderSink::new(),
    );

    // -- switcher ----------------------------------------------------------
    let mut switcher = StackSwitcher::with_timebase(StackConfig::sample(), timebase);
    let mut autoplay = Autoplay::with_default_interval(timebase);
    let mut presenter = ConsolePresenter::default();
    let mut changes = FrameChanges::default();
    let mut measurer = natural_height;
    let mut removed = None;

    {
        let mut tracer = Tracer::new(&mut sink);
        for _ in 0..CARD_COUNT {
            let _ = switcher.add_card_traced(&mut tracer);
        }
    }

    // -- simulated loop ----------------------------------------------------
    let mut now_ticks: u64 = 1_000_000_000; // start at 1s

    for frame_index in 0..FRAME_COUNT {
        let now = HostTime(now_ticks);
        let mut tracer = Tracer::new(&mut sink);

        // Host edits between frames: drop a card, then bring one back.
        if frame_index == 60 * 7
            && let Some(id) = switcher.card_at(1)
        {
            switcher.remove_card_traced(id, &mut tracer);
            removed = Some(id);
        }
        if frame_index == 60 * 9 && removed.take().is_some() {
            let _ = switcher.add_card_traced(&mut tracer);
        }

        if switcher.is_layout_requested() {
            let _ = switcher.measure(VIEWPORT, &mut measurer);
            switcher.layout_traced(&mut tracer);
        }
        let _ = autoplay.poll_traced(now, &mut switcher, &mut tracer);
        let _ = switcher.tick_traced(now, &mut tracer);
        drop(tracer);

        switcher.evaluate_into(&mut changes);
        if !changes.is_empty() {
            presenter.apply(&switcher, &changes);
        }

        now_ticks += REFRESH_INTERVAL_NS;
    }

    // -- export Chrome trace -----------------------------------------------
    let path = "switcher_trace.json";
    let file = File::create(path).expect("failed to create switcher_trace.json");
    let mut writer = BufWriter::new(file);
    cardstack_debug::chrome::export(sink.second.as_bytes(), timebase, &mut writer)
        .expect("failed to write Chrome trace");

    println!(
        "Wrote {path} ({FRAME_COUNT} frames, {} transform updates)",
        presenter.transform_updates
    );
}
