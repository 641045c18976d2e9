// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Back-to-front paint order.
//!
//! Cards overlap, so the host must paint the backmost card first and the
//! front card last. The *pivot* is the index orders are measured from: the
//! front index while the outgoing card is still sliding out, and the incoming
//! card once a switch passes the halfway point, so the incoming card covers
//! the outgoing one while it recedes.

use alloc::vec::Vec;

use crate::order::stack_order;

/// Returns the index of the card to paint at `paint_slot` (0 = painted
/// first, i.e. backmost) among `child_count` cards measured from `pivot`.
///
/// The card returned for slot `i` has stack order `child_count - 1 - i`
/// relative to the pivot, so the pivot card is painted last.
#[inline]
#[must_use]
pub const fn draw_order(child_count: usize, paint_slot: usize, pivot: usize) -> usize {
    if child_count == 0 {
        return 0;
    }
    child_count - stack_order(child_count, paint_slot, pivot) - 1
}

/// Returns every card index in back-to-front paint order.
#[must_use]
pub fn paint_order(child_count: usize, pivot: usize) -> Vec<usize> {
    (0..child_count)
        .map(|slot| draw_order(child_count, slot, pivot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivot_paints_last() {
        for count in 1..7 {
            for pivot in 0..=count {
                let order = paint_order(count, pivot);
                assert_eq!(order.last(), Some(&(pivot % count)));
            }
        }
    }

    #[test]
    fn paint_order_is_a_permutation() {
        for count in 1..7 {
            for pivot in 0..count {
                let mut order = paint_order(count, pivot);
                order.sort_unstable();
                assert_eq!(order, (0..count).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn slots_run_from_back_to_front() {
        for count in 1..7 {
            for pivot in 0..count {
                for slot in 0..count {
                    let card = draw_order(count, slot, pivot);
                    assert_eq!(stack_order(count, card, pivot), count - 1 - slot);
                }
            }
        }
    }

    #[test]
    fn three_cards() {
        assert_eq!(paint_order(3, 0), [2, 1, 0]);
        assert_eq!(paint_order(3, 1), [0, 2, 1]);
        // Pivot past the end wraps to the first card.
        assert_eq!(paint_order(3, 3), [2, 1, 0]);
    }

    #[test]
    fn empty_collection() {
        assert!(paint_order(0, 0).is_empty());
        assert_eq!(draw_order(0, 0, 0), 0);
    }
}
