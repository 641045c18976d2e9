// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card sizing and placement.
//!
//! Every card is laid out at the same width, centered horizontally in the
//! available area, with its natural height placed at a configurable vertical
//! position. Stacked cards are then fanned out to the right by a fixed
//! per-rank [`stack_offset`](LayoutPlan::stack_offset) at paint time; layout
//! itself never moves cards during a switch.

use kurbo::{Point, Rect, Size};

use crate::card::CardId;
use crate::config::StackConfig;

/// Host-side measurement of a card's natural height.
///
/// The switcher measures every card at exactly the planned card width with an
/// unconstrained height; implementations return the height the card wants at
/// that width.
pub trait CardMeasurer {
    /// Returns the natural height of `card` when laid out at `width`.
    fn natural_height(&mut self, card: CardId, width: f64) -> f64;
}

impl<F: FnMut(CardId, f64) -> f64> CardMeasurer for F {
    fn natural_height(&mut self, card: CardId, width: f64) -> f64 {
        self(card, width)
    }
}

/// Geometry shared by all cards for one measurement pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutPlan {
    /// Size of the area the switcher was measured into.
    pub available: Size,
    /// Width every card is measured and laid out at.
    pub card_width: f64,
    /// Left edge of every card, centering it horizontally.
    pub card_left: f64,
    /// Horizontal stagger between consecutive stack ranks.
    pub stack_offset: f64,
}

impl LayoutPlan {
    /// Plans the shared geometry for `count` cards in `available`.
    #[must_use]
    pub fn new(available: Size, count: usize, config: &StackConfig) -> Self {
        let card_width = card_width(available.width, config.horizontal_padding_ratio);
        let card_left = (available.width - card_width) / 2.0;
        Self {
            available,
            card_width,
            card_left,
            stack_offset: stack_offset(card_left, config.stack_placement_area_portion, count),
        }
    }

    /// Returns the frame of a card with the given natural height.
    #[must_use]
    pub fn frame_for(&self, natural_height: f64, vertical_position_ratio: f64) -> Rect {
        let top = card_top(self.available.height, natural_height, vertical_position_ratio);
        Rect::from_origin_size(
            Point::new(self.card_left, top),
            Size::new(self.card_width, natural_height),
        )
    }

    /// Recomputes the stack offset after a paint-only parameter change.
    pub fn restack(&mut self, stack_placement_area_portion: f64, count: usize) {
        self.stack_offset = stack_offset(self.card_left, stack_placement_area_portion, count);
    }
}

/// Width of every card: the available width less padding on both sides.
#[inline]
#[must_use]
pub fn card_width(available_width: f64, horizontal_padding_ratio: f64) -> f64 {
    available_width * (1.0 - 2.0 * horizontal_padding_ratio)
}

/// Top edge of a card of `card_height` placed at `vertical_position_ratio`
/// within `available_height`.
#[inline]
#[must_use]
pub fn card_top(available_height: f64, card_height: f64, vertical_position_ratio: f64) -> f64 {
    (available_height - card_height) * vertical_position_ratio
}

/// Per-rank stagger: `side_space × portion / (count − 1)`, or 0 for fewer
/// than two cards.
#[inline]
#[must_use]
pub fn stack_offset(side_space: f64, stack_placement_area_portion: f64, count: usize) -> f64 {
    if count > 1 {
        side_space * stack_placement_area_portion / (count - 1) as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn card_width_removes_both_paddings() {
        assert!((card_width(500.0, 0.1) - 400.0).abs() < EPS);
        assert!((card_width(500.0, 0.0) - 500.0).abs() < EPS);
    }

    #[test]
    fn stack_offset_spreads_side_space() {
        // 50 units of side space, 66 % of it shared by three ranks.
        assert!((stack_offset(50.0, 0.66, 3) - 16.5).abs() < EPS);
        assert_eq!(stack_offset(50.0, 0.66, 1), 0.0);
        assert_eq!(stack_offset(50.0, 0.66, 0), 0.0);
    }

    #[test]
    fn plan_centers_cards() {
        let plan = LayoutPlan::new(Size::new(500.0, 800.0), 3, &StackConfig::DEFAULT);
        assert!((plan.card_width - 400.0).abs() < EPS);
        assert!((plan.card_left - 50.0).abs() < EPS);
        assert!((plan.stack_offset - 16.5).abs() < EPS);
    }

    #[test]
    fn frame_uses_vertical_ratio() {
        let plan = LayoutPlan::new(Size::new(500.0, 800.0), 3, &StackConfig::DEFAULT);
        let frame = plan.frame_for(300.0, 0.4);
        assert!((frame.x0 - 50.0).abs() < EPS);
        assert!((frame.y0 - 200.0).abs() < EPS);
        assert!((frame.width() - 400.0).abs() < EPS);
        assert!((frame.height() - 300.0).abs() < EPS);
    }

    #[test]
    fn restack_only_touches_offset() {
        let mut plan = LayoutPlan::new(Size::new(500.0, 800.0), 3, &StackConfig::DEFAULT);
        let before = plan;
        plan.restack(1.0, 3);
        assert!((plan.stack_offset - 25.0).abs() < EPS);
        assert_eq!(plan.card_width, before.card_width);
        assert_eq!(plan.card_left, before.card_left);
    }

    #[test]
    fn closures_are_measurers() {
        let mut measurer = |_card: CardId, width: f64| width / 2.0;
        let id = CardId::from_raw(0, 0);
        assert_eq!(measurer.natural_height(id, 300.0), 150.0);
    }
}
