// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card identity.

use core::fmt;

/// A handle to a card in a [`CardStore`](super::CardStore).
///
/// Carries a slot index and a generation counter; removing a card bumps the
/// slot's generation, so handles to removed cards are detected even after
/// the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl CardId {
    pub(crate) const fn from_raw(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn slot(self) -> u32 {
        self.slot
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({}@gen{})", self.slot, self.generation)
    }
}
