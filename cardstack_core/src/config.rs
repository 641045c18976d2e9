// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Switcher configuration.

use crate::easing::Easing;

/// Layout, paint, and timing parameters for a
/// [`StackSwitcher`](crate::switcher::StackSwitcher).
///
/// Ratios are conventionally in `0.0..=1.0`. The switcher copies the config
/// at construction; its setters mutate the live copy and mark the affected
/// cards dirty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackConfig {
    /// Where a card sits vertically within its slack: 0 pins it to the top,
    /// 1 to the bottom.
    pub vertical_position_ratio: f64,
    /// Horizontal padding on each side, as a fraction of the available width.
    pub horizontal_padding_ratio: f64,
    /// Fraction of the side padding that the stacked cards fan out into.
    pub stack_placement_area_portion: f64,
    /// Scale of the backmost stacked card.
    pub stack_smallest_size_ratio: f64,
    /// Opacity of stacked (non-front) cards.
    pub stack_alpha: f64,
    /// Length of a switch animation in milliseconds.
    pub switch_duration_ms: u64,
    /// Fraction of the progress range spent sliding the outgoing card aside
    /// before it recedes into the stack.
    pub slide_time_portion: f64,
    /// Distance the outgoing card slides, as a fraction of the card width.
    pub slide_amount_portion: f64,
    /// Curve mapping elapsed time to the progress ratio.
    pub easing: Easing,
}

impl StackConfig {
    /// Baseline parameters.
    pub const DEFAULT: Self = Self {
        vertical_position_ratio: 0.4,
        horizontal_padding_ratio: 0.1,
        stack_placement_area_portion: 0.66,
        stack_smallest_size_ratio: 0.75,
        stack_alpha: 1.0,
        switch_duration_ms: 500,
        slide_time_portion: 0.5,
        slide_amount_portion: 0.75,
        easing: Easing::AccelerateDecelerate,
    };

    /// Parameters used by the sample autoplay host: translucent stack.
    #[must_use]
    pub const fn sample() -> Self {
        Self {
            stack_alpha: 0.8,
            ..Self::DEFAULT
        }
    }

    /// Returns a copy with a different easing curve.
    #[must_use]
    pub const fn with_easing(self, easing: Easing) -> Self {
        Self { easing, ..self }
    }
}

impl Default for StackConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
