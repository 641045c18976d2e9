// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays card storage with insertion-ordered membership.

use alloc::vec::Vec;

use kurbo::Rect;
use understory_dirty::{CycleHandling, DirtyTracker};

use super::id::CardId;
use super::iter::Cards;
use crate::dirty;
use crate::transform::CardTransform;

/// Storage for every card in a switcher.
///
/// Each card occupies a slot in parallel arrays holding its draw info: its
/// natural height, laid-out frame, and cached transform. Removed cards'
/// slots are recycled through a free list; generation counters make stale
/// [`CardId`]s detectable. The collection order (which defines stack
/// wraparound) is kept separately in `sequence`, so a card's *index* is its
/// position there and shifts down when an earlier card is removed.
#[derive(Debug)]
pub struct CardStore {
    // -- Draw info (per slot) --
    pub(crate) natural_height: Vec<f64>,
    pub(crate) frame: Vec<Rect>,
    pub(crate) transform: Vec<CardTransform>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Membership, in insertion order --
    pub(crate) sequence: Vec<u32>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<CardId>,
    pub(crate) pending_removed: Vec<CardId>,
}

impl Default for CardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CardStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            natural_height: Vec::new(),
            frame: Vec::new(),
            transform: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            sequence: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    /// Appends a new card to the end of the collection.
    ///
    /// The card starts unmeasured (zero height, empty frame) with an identity
    /// transform.
    pub fn add(&mut self) -> CardId {
        let slot = if let Some(slot) = self.free_list.pop() {
            self.natural_height[slot as usize] = 0.0;
            self.frame[slot as usize] = Rect::ZERO;
            self.transform[slot as usize] = CardTransform::IDENTITY;
            slot
        } else {
            let slot = self.len;
            self.len += 1;
            self.natural_height.push(0.0);
            self.frame.push(Rect::ZERO);
            self.transform.push(CardTransform::IDENTITY);
            self.generation.push(0);
            slot
        };

        self.sequence.push(slot);
        let id = CardId::from_raw(slot, self.generation[slot as usize]);
        self.pending_added.push(id);
        self.dirty.mark(slot, dirty::ORDER);
        self.dirty.mark(slot, dirty::PAINT);
        id
    }

    /// Removes a card from the collection and returns the index it had.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove(&mut self, id: CardId) -> usize {
        self.validate(id);
        let index = self.position(id.slot);
        let _ = self.sequence.remove(index);

        self.dirty.remove_key(id.slot);
        self.generation[id.slot as usize] += 1;
        self.free_list.push(id.slot);
        self.pending_removed.push(id);

        // Surviving cards now sit at different indices; the slot key of the
        // removed card is gone, so mark a survivor to carry the ORDER bit.
        if let Some(&first) = self.sequence.first() {
            self.dirty.mark(first, dirty::ORDER);
        }
        index
    }

    /// Returns whether the handle refers to a card still in the collection.
    #[must_use]
    pub fn is_alive(&self, id: CardId) -> bool {
        id.slot < self.len && self.generation[id.slot as usize] == id.generation
    }

    /// Number of cards in the collection.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Whether the collection is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns the card at collection `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<CardId> {
        self.sequence
            .get(index)
            .map(|&slot| CardId::from_raw(slot, self.generation[slot as usize]))
    }

    /// Returns the collection index of a live card.
    #[must_use]
    pub fn index_of(&self, id: CardId) -> Option<usize> {
        if !self.is_alive(id) {
            return None;
        }
        self.sequence.iter().position(|&slot| slot == id.slot)
    }

    /// Iterates cards in collection order.
    #[must_use]
    pub fn iter(&self) -> Cards<'_> {
        Cards::new(self)
    }

    /// Returns the natural height last reported for a card.
    #[must_use]
    pub fn natural_height(&self, id: CardId) -> f64 {
        self.validate(id);
        self.natural_height[id.slot as usize]
    }

    /// Returns a card's laid-out frame in switcher coordinates.
    ///
    /// Only valid after a layout pass.
    #[must_use]
    pub fn frame(&self, id: CardId) -> Rect {
        self.validate(id);
        self.frame[id.slot as usize]
    }

    /// Returns a card's cached transform.
    ///
    /// Only valid after [`evaluate`](crate::switcher::StackSwitcher::evaluate).
    #[must_use]
    pub fn cached_transform(&self, id: CardId) -> CardTransform {
        self.validate(id);
        self.transform[id.slot as usize]
    }

    // -- Crate-internal mutation (auto-marks dirty) --

    /// Records a measured height; returns whether it changed.
    pub(crate) fn set_natural_height(&mut self, slot: u32, height: f64) -> bool {
        if self.natural_height[slot as usize] == height {
            return false;
        }
        self.natural_height[slot as usize] = height;
        true
    }

    /// Stores a laid-out frame; marks LAYOUT and returns `true` if it changed.
    pub(crate) fn set_frame(&mut self, slot: u32, frame: Rect) -> bool {
        if self.frame[slot as usize] == frame {
            return false;
        }
        self.frame[slot as usize] = frame;
        self.dirty.mark(slot, dirty::LAYOUT);
        true
    }

    /// Stores a recomputed transform.
    pub(crate) fn set_transform(&mut self, slot: u32, transform: CardTransform) {
        self.transform[slot as usize] = transform;
    }

    /// Slots of live cards in collection order.
    pub(crate) fn slots(&self) -> &[u32] {
        &self.sequence
    }

    /// Marks every live card on `channel`.
    pub(crate) fn mark_all(&mut self, channel: understory_dirty::Channel) {
        for &slot in &self.sequence {
            self.dirty.mark(slot, channel);
        }
    }

    /// Collection index of a live slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is not in the collection.
    pub(crate) fn position(&self, slot: u32) -> usize {
        match self.sequence.iter().position(|&s| s == slot) {
            Some(index) => index,
            None => panic!("slot {slot} is not in the collection"),
        }
    }

    /// Panics if the handle is stale.
    fn validate(&self, id: CardId) {
        assert!(
            self.is_alive(id),
            "stale CardId: {id:?} (current gen: {})",
            if id.slot < self.len {
                self.generation[id.slot as usize]
            } else {
                u32::MAX
            }
        );
    }
}
