// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame evaluation and change tracking.
//!
//! Evaluation drains each dirty channel:
//!
//! 1. **LAYOUT**: collect cards whose frame moved during layout (no
//!    recomputation; presenters read frames from the store).
//! 2. **PAINT**: recompute each dirty card's transform from its stack order
//!    and the current progress, storing it in the transform cache.
//! 3. **ORDER**: drain and note that membership changed. Paint order is
//!    also reported as changed when the paint pivot moved.

use alloc::vec::Vec;

use super::StackSwitcher;
use crate::card::CardId;
use crate::dirty;
use crate::order::stack_order;
use crate::transform::card_transform;

/// The set of changes produced by a single [`StackSwitcher::evaluate`] call.
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Cards whose laid-out frame changed.
    pub frames: Vec<CardId>,
    /// Cards whose cached transform was recomputed.
    pub transforms: Vec<CardId>,
    /// Cards added since the last evaluate.
    pub added: Vec<CardId>,
    /// Cards removed since the last evaluate.
    pub removed: Vec<CardId>,
    /// Whether the back-to-front paint order may differ from the last
    /// evaluate.
    pub order_changed: bool,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.transforms.clear();
        self.added.clear();
        self.removed.clear();
        self.order_changed = false;
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
            && self.transforms.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.order_changed
    }
}

impl StackSwitcher {
    /// Drains pending changes, refreshing the transform cache for every card
    /// whose paint state is stale.
    pub fn evaluate(&mut self) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut FrameChanges) {
        changes.clear();

        let dirty_frames: Vec<u32> = self
            .cards
            .dirty
            .drain(dirty::LAYOUT)
            .deterministic()
            .run()
            .collect();
        changes
            .frames
            .extend(dirty_frames.into_iter().map(|slot| self.slot_id(slot)));

        let dirty_paint: Vec<u32> = self
            .cards
            .dirty
            .drain(dirty::PAINT)
            .deterministic()
            .run()
            .collect();
        let count = self.cards.len();
        let front = self.state.front_index();
        let progress = self.state.progress();
        let metrics = self.metrics();
        for slot in dirty_paint {
            let index = self.cards.position(slot);
            let order = stack_order(count, index, front);
            self.cards
                .set_transform(slot, card_transform(order, progress, &metrics));
            changes.transforms.push(self.slot_id(slot));
        }

        let membership: Vec<u32> = self
            .cards
            .dirty
            .drain(dirty::ORDER)
            .deterministic()
            .run()
            .collect();
        let pivot = if count > 0 {
            Some(self.state.paint_pivot() % count)
        } else {
            None
        };
        changes.order_changed = !membership.is_empty() || pivot != self.painted_pivot;
        self.painted_pivot = pivot;

        core::mem::swap(&mut self.cards.pending_added, &mut changes.added);
        core::mem::swap(&mut self.cards.pending_removed, &mut changes.removed);
    }

    fn slot_id(&self, slot: u32) -> CardId {
        CardId::from_raw(slot, self.cards.generation[slot as usize])
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::*;
    use crate::config::StackConfig;
    use crate::easing::Easing;
    use crate::time::HostTime;
    use crate::transform::CardTransform;

    fn switcher_with(count: usize) -> (StackSwitcher, Vec<CardId>) {
        let mut switcher = StackSwitcher::new(StackConfig::sample().with_easing(Easing::Linear));
        let ids = (0..count).map(|_| switcher.add_card()).collect();
        let _ = switcher.measure(Size::new(500.0, 400.0), &mut |_: CardId, _: f64| 100.0);
        switcher.layout();
        (switcher, ids)
    }

    #[test]
    fn first_evaluate_reports_everything() {
        let (mut switcher, ids) = switcher_with(3);
        let changes = switcher.evaluate();
        assert_eq!(changes.added, ids);
        assert_eq!(changes.frames, ids);
        assert_eq!(changes.transforms, ids);
        assert!(changes.order_changed);
        assert!(changes.removed.is_empty());
    }

    #[test]
    fn second_evaluate_is_empty() {
        let (mut switcher, _) = switcher_with(3);
        let _ = switcher.evaluate();
        let changes = switcher.evaluate();
        assert!(changes.is_empty(), "{changes:?}");
    }

    #[test]
    fn relayout_without_changes_reports_no_frames() {
        let (mut switcher, _) = switcher_with(3);
        let _ = switcher.evaluate();
        switcher.layout();
        assert!(switcher.evaluate().frames.is_empty());
    }

    #[test]
    fn cached_transforms_match_queries() {
        let (mut switcher, ids) = switcher_with(4);
        switcher.set_front_index(2);
        assert!(switcher.switch_forward());
        let _ = switcher.tick(HostTime(0));
        let _ = switcher.tick(HostTime(400));
        let _ = switcher.evaluate();
        for (index, &id) in ids.iter().enumerate() {
            assert_eq!(
                switcher.cards().cached_transform(id),
                switcher.transform_for(index)
            );
        }
    }

    #[test]
    fn ticks_mark_every_card_for_paint() {
        let (mut switcher, ids) = switcher_with(3);
        let _ = switcher.evaluate();
        assert!(switcher.switch_forward());
        let _ = switcher.evaluate();
        let _ = switcher.tick(HostTime(0));
        let _ = switcher.tick(HostTime(100));
        let changes = switcher.evaluate();
        assert_eq!(changes.transforms, ids);
        assert!(!changes.order_changed);
        assert!(changes.frames.is_empty());
    }

    #[test]
    fn pivot_flip_reports_order_change() {
        let (mut switcher, _) = switcher_with(3);
        let _ = switcher.evaluate();
        assert!(switcher.switch_forward());
        let _ = switcher.tick(HostTime(0));
        let _ = switcher.tick(HostTime(300));
        assert!(switcher.evaluate().order_changed);
        let _ = switcher.tick(HostTime(400));
        assert!(!switcher.evaluate().order_changed);
    }

    #[test]
    fn removal_is_reported_once() {
        let (mut switcher, ids) = switcher_with(3);
        let _ = switcher.evaluate();
        switcher.remove_card(ids[0]);
        let changes = switcher.evaluate();
        assert_eq!(changes.removed, [ids[0]]);
        assert!(changes.order_changed);
        assert_eq!(changes.transforms, [ids[1], ids[2]]);
        assert!(switcher.evaluate().removed.is_empty());
    }

    #[test]
    fn removed_card_is_not_reported_after_slot_reuse() {
        let (mut switcher, ids) = switcher_with(2);
        let _ = switcher.evaluate();
        switcher.remove_card(ids[1]);
        let replacement = switcher.add_card();
        let changes = switcher.evaluate();
        assert_eq!(changes.removed, [ids[1]]);
        assert_eq!(changes.added, [replacement]);
        assert!(changes.transforms.contains(&replacement));
        assert!(!changes.transforms.contains(&ids[1]));
        assert_eq!(
            switcher.cards().cached_transform(ids[0]),
            CardTransform::IDENTITY
        );
    }

    #[test]
    fn evaluate_into_reuses_buffer() {
        let (mut switcher, ids) = switcher_with(2);
        let mut changes = FrameChanges::default();
        switcher.evaluate_into(&mut changes);
        assert_eq!(changes.added.len(), 2);
        switcher.set_stack_alpha(0.5);
        switcher.evaluate_into(&mut changes);
        assert!(changes.added.is_empty());
        assert_eq!(changes.transforms, ids);
    }
}
