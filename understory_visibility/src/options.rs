// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::geometry::{Axes, Offset, VisibilityMode};

/// Default throttle window for scroll/resize rechecks, in milliseconds.
pub const DEFAULT_THROTTLE_INTERVAL: u64 = 150;

/// Configuration for a [`VisibilitySensor`](crate::VisibilitySensor).
///
/// ```
/// use understory_visibility::{Offset, VisibilityOptions};
///
/// // Lazy-load: report visible once, 200px before the node scrolls in.
/// let opts = VisibilityOptions::default()
///     .with_once(true)
///     .with_partial(true)
///     .with_offset(Offset::uniform(200.0));
/// assert_eq!(opts.throttle_interval, 150);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityOptions {
    /// Stop observing after the first visible measurement.
    pub once: bool,
    /// Throttle window for scroll/resize rechecks, in milliseconds.
    pub throttle_interval: u64,
    /// Margins applied to the viewport before comparing.
    pub offset: Offset,
    /// How much of the node has to be inside.
    pub mode: VisibilityMode,
    /// Which axes are compared.
    pub axes: Axes,
    /// Recheck on scroll events.
    pub scroll_check: bool,
    /// Recheck on resize events.
    pub resize_check: bool,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            once: false,
            throttle_interval: DEFAULT_THROTTLE_INTERVAL,
            offset: Offset::ZERO,
            mode: VisibilityMode::Full,
            axes: Axes::Both,
            scroll_check: true,
            resize_check: true,
        }
    }
}

impl VisibilityOptions {
    /// Sets [`once`](Self::once).
    #[must_use]
    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Sets [`throttle_interval`](Self::throttle_interval).
    #[must_use]
    pub fn with_throttle_interval(mut self, ms: u64) -> Self {
        self.throttle_interval = ms;
        self
    }

    /// Sets [`offset`](Self::offset).
    #[must_use]
    pub fn with_offset(mut self, offset: impl Into<Offset>) -> Self {
        self.offset = offset.into();
        self
    }

    /// Sets [`mode`](Self::mode).
    #[must_use]
    pub fn with_mode(mut self, mode: VisibilityMode) -> Self {
        self.mode = mode;
        self
    }

    /// Switches between [`VisibilityMode::Partial`] and [`VisibilityMode::Full`].
    #[must_use]
    pub fn with_partial(self, partial: bool) -> Self {
        self.with_mode(if partial {
            VisibilityMode::Partial
        } else {
            VisibilityMode::Full
        })
    }

    /// Sets [`axes`](Self::axes).
    #[must_use]
    pub fn with_axes(mut self, axes: Axes) -> Self {
        self.axes = axes;
        self
    }

    /// Sets [`scroll_check`](Self::scroll_check).
    #[must_use]
    pub fn with_scroll_check(mut self, enabled: bool) -> Self {
        self.scroll_check = enabled;
        self
    }

    /// Sets [`resize_check`](Self::resize_check).
    #[must_use]
    pub fn with_resize_check(mut self, enabled: bool) -> Self {
        self.resize_check = enabled;
        self
    }
}
