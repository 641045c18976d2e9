// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack order arithmetic.
//!
//! A card's *stack order* is its rank behind the front card: 0 is the front,
//! 1 sits directly behind it, and so on. Orders wrap around the collection in
//! insertion order, so the card before the front one is always the backmost.

/// Returns the stack order of the card at `index` when `front` is the front
/// card of a collection holding `count` cards.
///
/// The result is always in `0..count` (or 0 when `count <= 1`), and
/// `stack_order(count, front, front)` is 0.
#[inline]
#[must_use]
pub const fn stack_order(count: usize, index: usize, front: usize) -> usize {
    if count <= 1 {
        return 0;
    }
    let index = index % count;
    let front = front % count;
    (index + count - front) % count
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn front_card_is_order_zero() {
        for count in 1..8 {
            for front in 0..count {
                assert_eq!(stack_order(count, front, front), 0);
            }
        }
    }

    #[test]
    fn orders_form_a_permutation() {
        for count in 1..9 {
            for front in 0..count {
                let mut seen: Vec<usize> = (0..count)
                    .map(|index| stack_order(count, index, front))
                    .collect();
                seen.sort_unstable();
                let expected: Vec<usize> = (0..count).collect();
                assert_eq!(seen, expected, "count={count} front={front}");
            }
        }
    }

    #[test]
    fn cards_before_front_wrap_to_the_back() {
        // Five cards, front at 2: card 1 is backmost, card 3 directly behind.
        assert_eq!(stack_order(5, 1, 2), 4);
        assert_eq!(stack_order(5, 0, 2), 3);
        assert_eq!(stack_order(5, 3, 2), 1);
        assert_eq!(stack_order(5, 4, 2), 2);
    }

    #[test]
    fn degenerate_counts_are_zero() {
        assert_eq!(stack_order(0, 0, 0), 0);
        assert_eq!(stack_order(0, 3, 1), 0);
        assert_eq!(stack_order(1, 0, 0), 0);
    }

    #[test]
    fn front_past_the_end_wraps() {
        // The paint pivot can be `front + 1`; it must still resolve.
        assert_eq!(stack_order(3, 0, 3), 0);
        assert_eq!(stack_order(3, 2, 3), 2);
    }
}
