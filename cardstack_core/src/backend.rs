// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for applying switcher output.
//!
//! The switcher never touches host views. A host integration provides:
//!
//! - **Frame clock**: a per-frame callback that passes the current
//!   [`HostTime`](crate::time::HostTime) to
//!   [`StackSwitcher::tick`](crate::switcher::StackSwitcher::tick).
//! - **Measurement**: a [`CardMeasurer`](crate::layout::CardMeasurer) that
//!   reports each card's natural height at a given width.
//! - **Presenter**: implements the [`Presenter`] trait to apply frame
//!   changes to host views (native views, DOM elements, scene nodes).

use crate::switcher::{FrameChanges, StackSwitcher};

/// Applies evaluated frame changes to host views.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(now: HostTime) {
///     if switcher.is_layout_requested() {
///         switcher.measure(viewport, &mut measurer);
///         switcher.layout();
///     }
///     switcher.tick(now);
///
///     // Evaluate: drain dirty channels, refresh the transform cache
///     let changes = switcher.evaluate();
///
///     // Present: move, scale, fade, and restack host views
///     presenter.apply(&switcher, &changes);
/// }
/// ```
pub trait Presenter {
    /// Applies the given [`FrameChanges`] to the host views, reading current
    /// frames, transforms, and paint order from `switcher` as needed.
    fn apply(&mut self, switcher: &StackSwitcher, changes: &FrameChanges);
}
