// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Cards are keyed by their slot index in the
//! [`CardStore`](crate::card::CardStore). Each channel is an independent
//! category of change, marked locally (no dependency edges between cards):
//!
//! - [`LAYOUT`]: the card's frame moved or resized during a layout pass.
//! - [`PAINT`]: the card's cached transform must be recomputed. Marked for
//!   every card on each progress update, layout pass, front change, and
//!   paint-only parameter change.
//! - [`ORDER`]: the collection changed (card added or removed), so paint
//!   order must be refreshed.
//!
//! [`StackSwitcher::evaluate`](crate::switcher::StackSwitcher::evaluate)
//! drains all channels and surfaces the results as
//! [`FrameChanges`](crate::switcher::FrameChanges).

use understory_dirty::Channel;

/// Card frame changed.
pub const LAYOUT: Channel = Channel::new(0);

/// Card transform or opacity needs recomputing.
pub const PAINT: Channel = Channel::new(1);

/// Collection membership changed.
pub const ORDER: Channel = Channel::new(2);
