// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card collection data model.
//!
//! A *card* is an opaque rectangular element owned by the host. The switcher
//! tracks, per card:
//!
//! - An identity ([`CardId`]): a generational handle that goes stale when
//!   the card is removed.
//! - Its *index*: position in insertion order, which defines stack
//!   wraparound.
//! - Draw info: the natural height reported by the host, the laid-out
//!   frame, and the transform cache filled by evaluation. Draw info is
//!   created when the card is added and discarded when it is removed.

mod id;
mod iter;
mod store;

pub use id::CardId;
pub use iter::Cards;
pub use store::CardStore;
