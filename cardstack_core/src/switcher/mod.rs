// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stack switcher: one instance per stacked view.
//!
//! [`StackSwitcher`] ties together the card collection, the layout plan, and
//! the transition state machine. The host drives it in three phases:
//!
//! 1. **Measure and lay out** when the available size, the collection, or a
//!    layout parameter changes: [`measure`](StackSwitcher::measure) asks the
//!    host for each card's natural height at the planned width, then
//!    [`layout`](StackSwitcher::layout) positions every card and fixes the
//!    stack offset.
//! 2. **Tick** once per frame while a switch runs:
//!    [`tick`](StackSwitcher::tick) advances the progress ratio.
//! 3. **Paint**, either by querying [`paint_order`](StackSwitcher::paint_order)
//!    and [`transform_for`](StackSwitcher::transform_for) directly, or by
//!    calling [`evaluate`](StackSwitcher::evaluate) and handing the resulting
//!    [`FrameChanges`] to a [`Presenter`](crate::backend::Presenter).
//!
//! All state is instance-scoped; independent switchers never interact.

mod evaluate;

pub use evaluate::FrameChanges;

use alloc::vec::Vec;

use kurbo::{Affine, Size};

use crate::card::{CardId, CardStore, Cards};
use crate::config::StackConfig;
use crate::dirty;
use crate::draw_order;
use crate::easing::Easing;
use crate::layout::{CardMeasurer, LayoutPlan};
use crate::order::stack_order;
use crate::time::{Duration, HostTime, Timebase};
use crate::trace::{
    CardEvent, LayoutEvent, ProgressEvent, SwitchCancelledEvent, SwitchCompletedEvent,
    SwitchRejectedEvent, SwitchRequestedEvent, SwitchStartedEvent, Tracer,
};
use crate::transform::{CardTransform, StackMetrics, card_transform, scale_anchor};
use crate::transition::{Direction, SwitchState, TickOutcome, TransitionState};

/// A stack of cards with one front card and animated switching between them.
#[derive(Debug)]
pub struct StackSwitcher {
    config: StackConfig,
    timebase: Timebase,
    cards: CardStore,
    plan: LayoutPlan,
    state: SwitchState,
    layout_requested: bool,
    painted_pivot: Option<usize>,
}

impl Default for StackSwitcher {
    fn default() -> Self {
        Self::new(StackConfig::DEFAULT)
    }
}

impl StackSwitcher {
    /// Creates an empty switcher whose host clock ticks in milliseconds.
    #[must_use]
    pub fn new(config: StackConfig) -> Self {
        Self::with_timebase(config, Timebase::MILLIS)
    }

    /// Creates an empty switcher for a host clock with the given timebase.
    #[must_use]
    pub fn with_timebase(config: StackConfig, timebase: Timebase) -> Self {
        Self {
            config,
            timebase,
            cards: CardStore::new(),
            plan: LayoutPlan::default(),
            state: SwitchState::new(
                Duration::from_millis(config.switch_duration_ms, timebase),
                config.easing,
            ),
            layout_requested: true,
            painted_pivot: None,
        }
    }

    /// The live configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Timebase of the host times passed to [`tick`](Self::tick).
    #[inline]
    #[must_use]
    pub fn timebase(&self) -> Timebase {
        self.timebase
    }

    /// The card collection and its per-card draw info.
    #[inline]
    #[must_use]
    pub fn cards(&self) -> &CardStore {
        &self.cards
    }

    /// Geometry from the last measure and layout pass.
    #[inline]
    #[must_use]
    pub fn layout_plan(&self) -> &LayoutPlan {
        &self.plan
    }

    // -- Collection --

    /// Appends a card to the end of the collection.
    pub fn add_card(&mut self) -> CardId {
        self.add_card_traced(&mut Tracer::none())
    }

    /// Like [`add_card`](Self::add_card), reporting to `tracer`.
    pub fn add_card_traced(&mut self, tracer: &mut Tracer<'_>) -> CardId {
        let id = self.cards.add();
        self.layout_requested = true;
        self.cards.mark_all(dirty::PAINT);
        tracer.card_added(&CardEvent {
            card: id,
            index: self.cards.len() - 1,
            card_count: self.cards.len(),
        });
        id
    }

    /// Removes a card, discarding its draw info.
    ///
    /// Any running switch is cancelled without completing. The front index
    /// keeps pointing at the same card when an earlier card is removed, and
    /// is clamped into the shrunken collection otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_card(&mut self, id: CardId) {
        self.remove_card_traced(id, &mut Tracer::none());
    }

    /// Like [`remove_card`](Self::remove_card), reporting to `tracer`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_card_traced(&mut self, id: CardId, tracer: &mut Tracer<'_>) {
        let index = self.cards.remove(id);
        let count = self.cards.len();
        let front = self.state.front_index();
        let front = if index < front { front - 1 } else { front };
        let cancelled = self.state.set_front_index(front, count);

        self.layout_requested = true;
        self.cards.mark_all(dirty::PAINT);
        tracer.card_removed(&CardEvent {
            card: id,
            index,
            card_count: count,
        });
        if let Some(direction) = cancelled {
            tracer.switch_cancelled(&SwitchCancelledEvent {
                direction,
                front_index: self.state.front_index(),
            });
        }
    }

    /// Number of cards.
    #[inline]
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// The card at collection `index`, if any.
    #[must_use]
    pub fn card_at(&self, index: usize) -> Option<CardId> {
        self.cards.get(index)
    }

    /// Collection index of a live card.
    #[must_use]
    pub fn index_of(&self, id: CardId) -> Option<usize> {
        self.cards.index_of(id)
    }

    /// Iterates cards in collection order.
    #[must_use]
    pub fn iter(&self) -> Cards<'_> {
        self.cards.iter()
    }

    // -- Measure and layout --

    /// Whether a layout parameter or the collection changed since the last
    /// [`layout`](Self::layout).
    #[inline]
    #[must_use]
    pub fn is_layout_requested(&self) -> bool {
        self.layout_requested
    }

    /// Plans card geometry for `available` and measures every card's natural
    /// height at the planned card width.
    ///
    /// Returns the size the switcher occupies, which is all of `available`.
    /// Must be called before [`layout`](Self::layout).
    pub fn measure(&mut self, available: Size, measurer: &mut impl CardMeasurer) -> Size {
        self.plan = LayoutPlan::new(available, self.cards.len(), &self.config);
        let ids: Vec<CardId> = self.cards.iter().collect();
        for id in ids {
            let height = measurer.natural_height(id, self.plan.card_width);
            let _ = self.cards.set_natural_height(id.slot, height);
        }
        available
    }

    /// Positions every card from the measured heights and recomputes the
    /// stack offset.
    pub fn layout(&mut self) {
        self.layout_traced(&mut Tracer::none());
    }

    /// Like [`layout`](Self::layout), reporting to `tracer`.
    pub fn layout_traced(&mut self, tracer: &mut Tracer<'_>) {
        let count = self.cards.len();
        let previous = self.plan;
        self.plan.restack(self.config.stack_placement_area_portion, count);

        let mut frames_changed = 0;
        for index in 0..count {
            let slot = self.cards.slots()[index];
            let height = self.cards.natural_height[slot as usize];
            let frame = self
                .plan
                .frame_for(height, self.config.vertical_position_ratio);
            if self.cards.set_frame(slot, frame) {
                frames_changed += 1;
            }
        }
        if frames_changed > 0 || self.plan != previous {
            self.cards.mark_all(dirty::PAINT);
        }
        self.layout_requested = false;

        tracer.layout(&LayoutEvent {
            available: self.plan.available,
            card_count: count,
            card_width: self.plan.card_width,
            stack_offset: self.plan.stack_offset,
            frames_changed,
        });
    }

    // -- Switching --

    /// Starts a forward switch: the front card slides out and recedes to the
    /// back of the stack.
    ///
    /// Returns `false`, changing nothing, while another switch runs or when
    /// the front card is the last one.
    pub fn switch_forward(&mut self) -> bool {
        self.switch_forward_traced(&mut Tracer::none())
    }

    /// Like [`switch_forward`](Self::switch_forward), reporting to `tracer`.
    pub fn switch_forward_traced(&mut self, tracer: &mut Tracer<'_>) -> bool {
        self.request_switch(Direction::Forward, tracer)
    }

    /// Starts a backward switch: the previous card returns from the back of
    /// the stack to the front.
    ///
    /// The front index is decremented immediately. Returns `false`, changing
    /// nothing, while another switch runs or when the front card is the
    /// first one.
    pub fn switch_back(&mut self) -> bool {
        self.switch_back_traced(&mut Tracer::none())
    }

    /// Like [`switch_back`](Self::switch_back), reporting to `tracer`.
    pub fn switch_back_traced(&mut self, tracer: &mut Tracer<'_>) -> bool {
        self.request_switch(Direction::Backward, tracer)
    }

    fn request_switch(&mut self, direction: Direction, tracer: &mut Tracer<'_>) -> bool {
        let front_index = self.state.front_index();
        tracer.switch_requested(&SwitchRequestedEvent {
            direction,
            front_index,
            card_count: self.cards.len(),
        });
        let result = match direction {
            Direction::Forward => self.state.request_forward(self.cards.len()),
            Direction::Backward => self.state.request_back(),
        };
        match result {
            Ok(()) => {
                self.cards.mark_all(dirty::PAINT);
                true
            }
            Err(reason) => {
                tracer.switch_rejected(&SwitchRejectedEvent {
                    direction,
                    front_index,
                    reason,
                });
                false
            }
        }
    }

    /// Index of the front card.
    #[inline]
    #[must_use]
    pub fn front_index(&self) -> usize {
        self.state.front_index()
    }

    /// Jumps directly to `index`, clamped into the collection.
    ///
    /// A running switch is cancelled without its completion effects.
    pub fn set_front_index(&mut self, index: usize) {
        self.set_front_index_traced(index, &mut Tracer::none());
    }

    /// Like [`set_front_index`](Self::set_front_index), reporting to `tracer`.
    pub fn set_front_index_traced(&mut self, index: usize, tracer: &mut Tracer<'_>) {
        let cancelled = self.state.set_front_index(index, self.cards.len());
        self.cards.mark_all(dirty::PAINT);
        if let Some(direction) = cancelled {
            tracer.switch_cancelled(&SwitchCancelledEvent {
                direction,
                front_index: self.state.front_index(),
            });
        }
    }

    /// Progress ratio of the running switch, 0 when idle.
    #[inline]
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.state.progress()
    }

    /// Whether a switch is running.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    /// Coarse transition state.
    #[inline]
    #[must_use]
    pub fn transition_state(&self) -> TransitionState {
        self.state.state()
    }

    /// Advances a running switch to host time `now`.
    ///
    /// The first tick after a request anchors the animation clock. Returns
    /// `true` when progress or the front index changed and the host should
    /// repaint.
    pub fn tick(&mut self, now: HostTime) -> bool {
        self.tick_traced(now, &mut Tracer::none())
    }

    /// Like [`tick`](Self::tick), reporting to `tracer`.
    pub fn tick_traced(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> bool {
        let Some(&transition) = self.state.active() else {
            return false;
        };
        let direction = transition.direction;
        if transition.started_at.is_none() {
            tracer.switch_started(&SwitchStartedEvent {
                direction,
                front_index: self.state.front_index(),
                now,
            });
        }

        match self.state.tick(now) {
            TickOutcome::Idle => return false,
            TickOutcome::Progressed { progress } => {
                tracer.progress(&ProgressEvent {
                    direction,
                    progress,
                    now,
                });
            }
            TickOutcome::Completed {
                direction,
                front_index,
            } => {
                tracer.switch_completed(&SwitchCompletedEvent {
                    direction,
                    front_index,
                    now,
                });
            }
        }
        self.cards.mark_all(dirty::PAINT);
        true
    }

    // -- Configuration --

    /// Sets where cards sit vertically within their slack. Requests layout.
    pub fn set_vertical_position_ratio(&mut self, ratio: f64) {
        if self.config.vertical_position_ratio != ratio {
            self.config.vertical_position_ratio = ratio;
            self.layout_requested = true;
        }
    }

    /// Sets the side padding as a fraction of the available width. Requests
    /// measurement and layout.
    pub fn set_horizontal_padding_ratio(&mut self, ratio: f64) {
        if self.config.horizontal_padding_ratio != ratio {
            self.config.horizontal_padding_ratio = ratio;
            self.layout_requested = true;
        }
    }

    /// Sets the fraction of the side padding that stacked cards fan out into.
    /// Takes effect at the next paint.
    pub fn set_stack_placement_area_portion(&mut self, portion: f64) {
        self.config.stack_placement_area_portion = portion;
        self.plan.restack(portion, self.cards.len());
        self.cards.mark_all(dirty::PAINT);
    }

    /// Sets the scale of the backmost card. Takes effect at the next paint.
    pub fn set_stack_smallest_size_ratio(&mut self, ratio: f64) {
        self.config.stack_smallest_size_ratio = ratio;
        self.cards.mark_all(dirty::PAINT);
    }

    /// Sets the opacity of stacked cards. Takes effect at the next paint.
    pub fn set_stack_alpha(&mut self, alpha: f64) {
        self.config.stack_alpha = alpha;
        self.cards.mark_all(dirty::PAINT);
    }

    /// Sets the easing used from the next tick on.
    pub fn set_easing(&mut self, easing: Easing) {
        self.config.easing = easing;
        self.state.set_easing(easing);
    }

    /// Sets the length of future switches.
    pub fn set_switch_duration_ms(&mut self, millis: u64) {
        self.config.switch_duration_ms = millis;
        let duration = Duration::from_millis(millis, self.timebase);
        self.state.set_duration(duration);
    }

    // -- Paint queries --

    /// Index stack orders are measured from for paint ordering.
    #[inline]
    #[must_use]
    pub fn paint_pivot(&self) -> usize {
        self.state.paint_pivot()
    }

    /// Returns the index of the card to paint at `paint_slot` among
    /// `child_count` cards (slot 0 is painted first, backmost).
    #[must_use]
    pub fn draw_order(&self, child_count: usize, paint_slot: usize) -> usize {
        draw_order::draw_order(child_count, paint_slot, self.paint_pivot())
    }

    /// Every card index in back-to-front paint order.
    #[must_use]
    pub fn paint_order(&self) -> Vec<usize> {
        draw_order::paint_order(self.cards.len(), self.paint_pivot())
    }

    /// Everything besides order and progress that shapes card transforms.
    #[must_use]
    pub fn metrics(&self) -> StackMetrics {
        StackMetrics {
            count: self.cards.len(),
            card_width: self.plan.card_width,
            stack_offset: self.plan.stack_offset,
            stack_alpha: self.config.stack_alpha,
            stack_smallest_size_ratio: self.config.stack_smallest_size_ratio,
            slide_time_portion: self.config.slide_time_portion,
            slide_amount_portion: self.config.slide_amount_portion,
        }
    }

    /// Stack order of the card at `card_index` relative to the front card.
    #[must_use]
    pub fn stack_order_of(&self, card_index: usize) -> usize {
        stack_order(self.cards.len(), card_index, self.state.front_index())
    }

    /// Computes the transform of the card at `card_index` for the current
    /// front index and progress.
    ///
    /// # Panics
    ///
    /// Panics if `card_index` is out of range.
    #[must_use]
    pub fn transform_for(&self, card_index: usize) -> CardTransform {
        let count = self.cards.len();
        assert!(
            card_index < count,
            "card index {card_index} out of range for {count} cards"
        );
        card_transform(
            self.stack_order_of(card_index),
            self.state.progress(),
            &self.metrics(),
        )
    }

    /// The transform of the card at `card_index` as an affine map from card
    /// space into switcher space, including its laid-out position.
    ///
    /// Scaling is anchored at the card's right edge, halfway down.
    ///
    /// # Panics
    ///
    /// Panics if `card_index` is out of range.
    #[must_use]
    pub fn affine_for(&self, card_index: usize) -> Affine {
        let transform = self.transform_for(card_index);
        let slot = self.cards.slots()[card_index];
        let frame = self.cards.frame[slot as usize];
        Affine::translate(frame.origin().to_vec2())
            * transform.to_affine(scale_anchor(frame.width(), frame.height()))
    }
}
