// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-card transforms as a function of switch progress.
//!
//! A switch has two phases split at the slide time portion (0.5 by default):
//!
//! 1. **Slide**: the front card slides left by a fraction of its width while
//!    the stack behind it stays put.
//! 2. **Recede**: the outgoing card fades to the stack alpha, shrinks to the
//!    smallest stack scale, and travels to the back of the stack; every other
//!    card advances one rank toward the front, and the card at rank 1 fades
//!    up to full opacity.
//!
//! [`card_transform`] is pure: the result depends only on the card's stack
//! order, the progress ratio, and [`StackMetrics`].

use kurbo::{Affine, Point, Vec2};

/// Translation, scale, and opacity for one card.
///
/// Applied as translate-then-scale, with scaling about the card's anchor
/// (see [`to_affine`](Self::to_affine)).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardTransform {
    /// Horizontal translation, before scaling.
    pub translate_x: f64,
    /// Vertical translation, before scaling. Always 0 for switcher output.
    pub translate_y: f64,
    /// Horizontal scale about the anchor.
    pub scale_x: f64,
    /// Vertical scale about the anchor.
    pub scale_y: f64,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
}

impl CardTransform {
    /// No translation, unit scale, fully opaque.
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        opacity: 1.0,
    };

    const fn uniform(translate_x: f64, scale: f64, opacity: f64) -> Self {
        Self {
            translate_x,
            translate_y: 0.0,
            scale_x: scale,
            scale_y: scale,
            opacity,
        }
    }

    /// Returns the card-local affine: translate, then scale about `anchor`.
    #[must_use]
    pub fn to_affine(&self, anchor: Point) -> Affine {
        let pivot = anchor.to_vec2();
        Affine::translate(pivot)
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
            * Affine::translate(-pivot)
            * Affine::translate(Vec2::new(self.translate_x, self.translate_y))
    }

    /// Is every component [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.translate_x.is_finite()
            && self.translate_y.is_finite()
            && self.scale_x.is_finite()
            && self.scale_y.is_finite()
            && self.opacity.is_finite()
    }
}

impl Default for CardTransform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The anchor cards scale about: their right edge, vertically centered.
///
/// Anchoring on the right edge keeps a shrinking card's trailing edge where
/// the stack offset put it.
#[inline]
#[must_use]
pub fn scale_anchor(card_width: f64, card_height: f64) -> Point {
    Point::new(card_width, card_height / 2.0)
}

/// Everything besides order and progress that shapes a card's transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackMetrics {
    /// Number of cards in the collection.
    pub count: usize,
    /// Laid-out card width.
    pub card_width: f64,
    /// Horizontal stagger between consecutive ranks.
    pub stack_offset: f64,
    /// Opacity of stacked cards.
    pub stack_alpha: f64,
    /// Scale of the backmost card.
    pub stack_smallest_size_ratio: f64,
    /// Progress at which the slide phase ends.
    pub slide_time_portion: f64,
    /// Slide distance as a fraction of the card width.
    pub slide_amount_portion: f64,
}

impl StackMetrics {
    /// Distance the front card slides left during the slide phase.
    #[inline]
    #[must_use]
    pub fn slide_distance(&self) -> f64 {
        self.card_width * self.slide_amount_portion
    }

    /// Scale for a (possibly fractional) stack position.
    fn scale_at(&self, position: f64) -> f64 {
        if self.count > 1 {
            let ratio = position / (self.count - 1) as f64;
            lerp(1.0, self.stack_smallest_size_ratio, ratio)
        } else {
            1.0
        }
    }

    /// Progress through the slide phase for an overall progress `p`.
    fn slide_progress(&self, p: f64) -> f64 {
        if self.slide_time_portion > 0.0 {
            p / self.slide_time_portion
        } else {
            1.0
        }
    }

    /// Progress through the recede phase for an overall progress `p`.
    fn recede_progress(&self, p: f64) -> f64 {
        if self.slide_time_portion < 1.0 {
            (p - self.slide_time_portion) / (1.0 - self.slide_time_portion)
        } else {
            1.0
        }
    }
}

/// Linear interpolation: `from` at 0, `to` at 1.
#[inline]
#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

/// Computes the transform for the card at stack `order` (0 = front) at
/// progress ratio `progress`.
///
/// During a backward switch the caller passes the already-decremented front
/// index when deriving `order`, with progress running from 1 down to 0; the
/// same formulas then play the forward switch in reverse.
#[must_use]
pub fn card_transform(order: usize, progress: f64, metrics: &StackMetrics) -> CardTransform {
    if order == 0 {
        front_transform(progress, metrics)
    } else if progress < metrics.slide_time_portion {
        stacked_transform(order as f64, metrics.stack_alpha, metrics)
    } else {
        let s = metrics.recede_progress(progress);
        let position = order as f64 - s;
        let opacity = if order > 1 {
            metrics.stack_alpha
        } else {
            // Rank 1 is the incoming front card.
            lerp(metrics.stack_alpha, 1.0, s)
        };
        stacked_transform(position, opacity, metrics)
    }
}

fn stacked_transform(position: f64, opacity: f64, metrics: &StackMetrics) -> CardTransform {
    CardTransform::uniform(
        position * metrics.stack_offset,
        metrics.scale_at(position),
        opacity,
    )
}

fn front_transform(progress: f64, metrics: &StackMetrics) -> CardTransform {
    if progress <= 0.0 {
        return CardTransform::IDENTITY;
    }
    if progress <= metrics.slide_time_portion {
        let slide = metrics.slide_progress(progress);
        return CardTransform::uniform(-slide * metrics.slide_distance(), 1.0, 1.0);
    }
    let s = metrics.recede_progress(progress);
    let back_of_stack = metrics.count.saturating_sub(1) as f64 * metrics.stack_offset;
    CardTransform::uniform(
        lerp(-metrics.slide_distance(), back_of_stack, s),
        lerp(1.0, metrics.stack_smallest_size_ratio, s),
        lerp(1.0, metrics.stack_alpha, s),
    )
}
