// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node visibility sensor.
//!
//! ## Usage
//!
//! 1) Create a [`VisibilitySensor`] and call [`VisibilitySensor::mount`] once the
//!    node is in the layout. Mounting schedules an initial check.
//! 2) Forward viewport scroll/resize events with
//!    [`VisibilitySensor::on_viewport_event`]. They are throttled; a throttled
//!    event reports the deadline at which the host should call
//!    [`VisibilitySensor::poll`].
//! 3) On the next tick, call [`VisibilitySensor::check`] to run the pending
//!    check against the current layout, then re-render children with
//!    [`VisibilitySensor::render`].
//! 4) Once [`VisibilitySensor::wants_events`] turns `false` (after
//!    [`VisibilityOptions::once`] was satisfied), the host may detach its
//!    listeners.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Rect, Size, Vec2};
//! use understory_visibility::{StaticLayout, ViewportEvent, VisibilityOptions, VisibilitySensor};
//!
//! let mut layout = StaticLayout::new(Size::new(800.0, 600.0));
//! layout.set_rect("card", Rect::new(0.0, 900.0, 200.0, 1_000.0));
//!
//! let mut sensor = VisibilitySensor::new(VisibilityOptions::default().with_once(true));
//! sensor.mount();
//! sensor.check(&layout, &"card");
//! assert!(!sensor.is_visible());
//!
//! // User scrolls the card into view.
//! layout.scroll_by(Vec2::new(0.0, 500.0));
//! sensor.on_viewport_event(ViewportEvent::Scroll, 1_000);
//! let measurement = sensor.check(&layout, &"card").unwrap();
//! assert!(measurement.visible && measurement.stopped);
//!
//! let label = sensor.render(|visible| if visible { "shown" } else { "placeholder" });
//! assert_eq!(label, "shown");
//! assert!(!sensor.wants_events());
//! ```

use kurbo::{Rect, Size};
use understory_timing::{Throttle, ThrottleOutcome};

use crate::geometry::is_visible;
use crate::layout::LayoutQuery;
use crate::options::VisibilityOptions;

/// A viewport event that can change node visibility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ViewportEvent {
    /// The viewport (or a scroll container) scrolled.
    Scroll,
    /// The viewport was resized.
    Resize,
}

/// Lifecycle of a [`VisibilitySensor`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SensorState {
    /// Not attached to a node; events and checks are ignored.
    #[default]
    Unmounted,
    /// Attached and listening for viewport events.
    Observing,
    /// Attached, but done listening because `once` was satisfied.
    Stopped,
}

/// What happened to a viewport event passed to [`VisibilitySensor::on_viewport_event`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventOutcome {
    /// The sensor is not observing, or this event kind is disabled.
    Ignored,
    /// A check was scheduled for the next tick.
    CheckScheduled,
    /// Throttled: a trailing check was newly scheduled for `at`.
    Deferred {
        /// When the host should call [`VisibilitySensor::poll`].
        at: u64,
    },
    /// Throttled: a trailing check was already pending for `at`.
    AlreadyDeferred {
        /// Deadline of the pending trailing check.
        at: u64,
    },
}

/// Result of a check run by [`VisibilitySensor::check`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Measurement {
    /// Whether the node is visible now.
    pub visible: bool,
    /// Whether the stored flag flipped (children need a re-render).
    pub changed: bool,
    /// Whether this check satisfied `once` and stopped observation.
    pub stopped: bool,
}

/// Tracks whether one node is in the viewport.
///
/// The sensor owns no timers and no listeners. Work triggered by events is
/// split in two stages: a throttle decides when a recheck is due, and the
/// recheck itself is deferred to the host's next tick (a zero-delay timer) so
/// that it measures layout after the event has been fully applied.
#[derive(Clone, Debug)]
pub struct VisibilitySensor {
    options: VisibilityOptions,
    throttle: Throttle,
    state: SensorState,
    visible: bool,
    pending_check: bool,
    revision: u64,
    checks_run: u64,
}

impl Default for VisibilitySensor {
    fn default() -> Self {
        Self::new(VisibilityOptions::default())
    }
}

impl VisibilitySensor {
    /// Creates an unmounted, not-visible sensor.
    #[must_use]
    pub fn new(options: VisibilityOptions) -> Self {
        Self {
            throttle: Throttle::new(options.throttle_interval),
            options,
            state: SensorState::Unmounted,
            visible: false,
            pending_check: false,
            revision: 0,
            checks_run: 0,
        }
    }

    /// Returns the sensor's options.
    #[must_use]
    pub fn options(&self) -> &VisibilityOptions {
        &self.options
    }

    /// Replaces the options.
    ///
    /// A changed throttle interval applies from the next window on. While
    /// observing, a check is scheduled so the flag reflects the new
    /// predicate on the next tick.
    pub fn update_options(&mut self, options: VisibilityOptions) {
        self.throttle.set_interval(options.throttle_interval);
        self.options = options;
        self.request_check();
    }

    /// Attaches the sensor and schedules the initial check.
    ///
    /// Mounting an unmounted sensor starts from "not visible", as a fresh
    /// node would. Mounting a mounted sensor is a no-op.
    pub fn mount(&mut self) {
        if self.state != SensorState::Unmounted {
            return;
        }
        self.state = SensorState::Observing;
        self.throttle.reset();
        self.set_visible(false);
        self.pending_check = true;
    }

    /// Detaches the sensor.
    ///
    /// Pending checks and trailing throttle calls are dropped; a check that
    /// was scheduled before unmounting never runs.
    pub fn unmount(&mut self) {
        self.state = SensorState::Unmounted;
        self.pending_check = false;
        self.throttle.reset();
    }

    /// Feeds a viewport event received at `now`.
    pub fn on_viewport_event(&mut self, event: ViewportEvent, now: u64) -> EventOutcome {
        if !self.wants_events() || !self.accepts(event) {
            return EventOutcome::Ignored;
        }
        match self.throttle.request(now) {
            ThrottleOutcome::Fire => {
                self.pending_check = true;
                EventOutcome::CheckScheduled
            }
            ThrottleOutcome::Scheduled { at } => EventOutcome::Deferred { at },
            ThrottleOutcome::AlreadyScheduled { at } => EventOutcome::AlreadyDeferred { at },
        }
    }

    /// Runs a due trailing throttle call, scheduling a check.
    ///
    /// Returns `true` if a check was scheduled.
    pub fn poll(&mut self, now: u64) -> bool {
        if !self.wants_events() || !self.throttle.poll(now) {
            return false;
        }
        self.pending_check = true;
        true
    }

    /// Schedules a check outside of the event flow, e.g. after the node's
    /// content changed size.
    pub fn request_check(&mut self) {
        if self.wants_events() {
            self.pending_check = true;
        }
    }

    /// Runs the pending check against `layout`.
    ///
    /// Returns `None` if no check was pending or the sensor is not observing.
    pub fn check<N, L>(&mut self, layout: &L, node: &N) -> Option<Measurement>
    where
        N: ?Sized,
        L: LayoutQuery<N> + ?Sized,
    {
        if !self.has_pending_check() {
            return None;
        }
        self.check_rect(layout.bounding_rect(node), layout.viewport_size())
    }

    /// Runs the pending check with geometry the caller already measured.
    ///
    /// `rect` is `None` for a node that is not in the layout; it measures as
    /// not visible.
    pub fn check_rect(&mut self, rect: Option<Rect>, viewport: Size) -> Option<Measurement> {
        if !self.has_pending_check() {
            return None;
        }
        self.pending_check = false;
        self.checks_run += 1;

        let visible = rect.is_some_and(|rect| is_visible(rect, viewport, &self.options));
        let stopped = visible && self.options.once;
        if stopped {
            self.state = SensorState::Stopped;
            self.throttle.reset();
        }
        let changed = self.set_visible(visible);
        Some(Measurement {
            visible,
            changed,
            stopped,
        })
    }

    /// Renders children with the current visibility flag.
    pub fn render<R>(&self, children: impl FnOnce(bool) -> R) -> R {
        children(self.visible)
    }

    /// Returns the last measured visibility.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> SensorState {
        self.state
    }

    /// Returns `true` while attached, whether or not still listening.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.state != SensorState::Unmounted
    }

    /// Returns `true` while the sensor listens for viewport events.
    #[must_use]
    pub fn wants_events(&self) -> bool {
        self.state == SensorState::Observing
    }

    /// Returns `true` if a check should run on the next tick.
    #[must_use]
    pub fn has_pending_check(&self) -> bool {
        self.pending_check && self.wants_events()
    }

    /// Returns the deadline of the pending trailing throttle call.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        if self.wants_events() {
            self.throttle.next_deadline()
        } else {
            None
        }
    }

    /// Returns a counter that increases every time the visibility flag flips.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns a snapshot of the sensor's internal state.
    #[must_use]
    pub fn debug_info(&self) -> VisibilitySensorDebugInfo {
        VisibilitySensorDebugInfo {
            state: self.state,
            visible: self.visible,
            pending_check: self.has_pending_check(),
            next_deadline: self.next_deadline(),
            revision: self.revision,
            checks_run: self.checks_run,
            options: self.options.clone(),
        }
    }

    fn accepts(&self, event: ViewportEvent) -> bool {
        match event {
            ViewportEvent::Scroll => self.options.scroll_check,
            ViewportEvent::Resize => self.options.resize_check,
        }
    }

    fn set_visible(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        self.revision += 1;
        true
    }
}

/// Snapshot of a [`VisibilitySensor`], for inspectors and logs.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilitySensorDebugInfo {
    /// Lifecycle state.
    pub state: SensorState,
    /// Last measured visibility.
    pub visible: bool,
    /// Whether a check is scheduled for the next tick.
    pub pending_check: bool,
    /// Deadline of the pending trailing throttle call.
    pub next_deadline: Option<u64>,
    /// Visibility flag revision.
    pub revision: u64,
    /// Number of checks run since creation.
    pub checks_run: u64,
    /// Current options.
    pub options: VisibilityOptions,
}
