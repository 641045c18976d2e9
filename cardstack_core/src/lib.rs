// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacking order, layout, and transition engine for card switchers.
//!
//! `cardstack_core` keeps an ordered collection of rectangular cards with one
//! *front* card, fans the rest out in a receding stack behind it, and animates
//! switching between front cards with a combined slide, scale, and fade. It is
//! `no_std` compatible (with `alloc`) and never touches host views: the host
//! measures cards, ticks the clock, and applies the per-card transforms.
//!
//! # Architecture
//!
//! ```text
//!   Host frame callback
//!       │
//!       ▼
//!   HostTime ──► StackSwitcher::tick() ──► progress ratio
//!                                               │
//!                 ┌─────────────────────────────┘
//!                 ▼
//!   StackSwitcher::evaluate() ──► FrameChanges ──► Presenter::apply()
//!                                                       │
//!                           paint_order() + transforms ◄┘
//! ```
//!
//! **[`order`]**: the stack order of a card relative to the front card,
//! wrapping around the collection.
//!
//! **[`layout`]**: card width, vertical placement, and the per-rank stack
//! offset, plus the [`CardMeasurer`](layout::CardMeasurer) contract.
//!
//! **[`transform`]**: per-card translation, scale, and opacity as a pure
//! function of stack order and progress.
//!
//! **[`transition`]**: the front-index and progress state machine.
//!
//! **[`draw_order`]**: back-to-front paint order, with the incoming card
//! promoted past the halfway point of a switch.
//!
//! **[`switcher`]**: [`StackSwitcher`](switcher::StackSwitcher), the
//! instance-scoped host API, and frame evaluation.
//!
//! **[`card`]**: struct-of-arrays card storage with generational handles.
//!
//! **[`dirty`]**: dirty-tracking channels via `understory_dirty`.
//!
//! **[`autoplay`]**: timer-driven alternating switching.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! switch lifecycle instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Example
//!
//! ```
//! use cardstack_core::card::CardId;
//! use cardstack_core::config::StackConfig;
//! use cardstack_core::switcher::StackSwitcher;
//! use cardstack_core::time::HostTime;
//! use kurbo::Size;
//!
//! let mut switcher = StackSwitcher::new(StackConfig::DEFAULT);
//! for _ in 0..3 {
//!     switcher.add_card();
//! }
//! switcher.measure(Size::new(400.0, 300.0), &mut |_: CardId, _: f64| 120.0);
//! switcher.layout();
//!
//! assert!(switcher.switch_forward());
//! switcher.tick(HostTime(0));
//! switcher.tick(HostTime(500));
//! assert_eq!(switcher.front_index(), 1);
//! assert_eq!(switcher.paint_order(), [0, 2, 1]);
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod autoplay;
pub mod backend;
pub mod card;
pub mod config;
pub mod dirty;
pub mod draw_order;
pub mod easing;
pub mod layout;
pub mod order;
pub mod switcher;
pub mod time;
pub mod trace;
pub mod transform;
pub mod transition;
