// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves mapping elapsed animation time to the progress ratio.

use core::f64::consts::PI;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Maps the linear elapsed fraction of a switch to its progress ratio.
///
/// Every curve maps 0 to 0 and 1 to 1; input outside `0.0..=1.0` is clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// Progress equals elapsed fraction.
    Linear,
    /// Quadratic ease-in (slow start).
    EaseIn,
    /// Quadratic ease-out (slow end).
    EaseOut,
    /// Cosine ease-in-out: `cos((t + 1)π) / 2 + 0.5`.
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    /// Evaluates the curve at `t`.
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::AccelerateDecelerate => {
                // Pin the endpoints so completion is detected exactly.
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    (PI * (t + 1.0)).cos() / 2.0 + 0.5
                }
            }
        }
    }
}
