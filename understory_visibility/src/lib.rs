// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_visibility --heading-base-level=0

//! Understory Visibility: headless "is this node in the viewport?" sensing.
//!
//! This crate answers whether a laid-out node is inside the visible viewport
//! and keeps that answer current as the viewport scrolls and resizes. It
//! focuses on:
//! - A rect-vs-viewport predicate ([`is_visible`]) with full, partial, and
//!   edge modes, per-edge pixel [`Offset`]s, and single-axis checks.
//! - A per-node state machine ([`VisibilitySensor`]) that throttles
//!   scroll/resize rechecks, defers each recheck to the next tick, and can
//!   stop observing once the node was first seen ([`VisibilityOptions::once`]).
//! - A keyed collection ([`VisibilityTracker`]) that shares one set of
//!   viewport listeners between many sensors.
//!
//! It does **not** own a DOM, a window, or an event loop. Callers are
//! expected to:
//! - Implement [`LayoutQuery`] over their layout engine or platform API.
//! - Forward scroll/resize events as [`ViewportEvent`]s with a timestamp.
//! - Arm a timer for `next_deadline()` and call `poll()` when it fires.
//! - Run pending checks on the next tick and re-render affected children.
//!
//! ## Predicate example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_visibility::{VisibilityOptions, is_visible};
//!
//! let viewport = Size::new(800.0, 600.0);
//! let straddling = Rect::new(0.0, 550.0, 100.0, 650.0);
//!
//! assert!(!is_visible(straddling, viewport, &VisibilityOptions::default()));
//! assert!(is_visible(
//!     straddling,
//!     viewport,
//!     &VisibilityOptions::default().with_partial(true),
//! ));
//! ```
//!
//! ## Host loop sketch
//!
//! ```rust
//! use kurbo::{Rect, Size, Vec2};
//! use understory_visibility::{StaticLayout, ViewportEvent, VisibilityOptions, VisibilityTracker};
//!
//! let mut layout = StaticLayout::new(Size::new(800.0, 600.0));
//! layout.set_rect("hero", Rect::new(0.0, 0.0, 800.0, 400.0));
//! layout.set_rect("footer", Rect::new(0.0, 1_500.0, 800.0, 1_600.0));
//!
//! let mut tracker = VisibilityTracker::new();
//! tracker.register("hero", VisibilityOptions::default()).unwrap();
//! tracker
//!     .register("footer", VisibilityOptions::default().with_once(true))
//!     .unwrap();
//!
//! // Tick after mount.
//! tracker.run_pending_checks(&layout);
//!
//! // Scroll events arrive; the first fires, the rest wait for the trailing call.
//! for now in [0_u64, 16, 32, 48] {
//!     layout.scroll_by(Vec2::new(0.0, 250.0));
//!     tracker.on_viewport_event(ViewportEvent::Scroll, now);
//!     tracker.run_pending_checks(&layout);
//! }
//! if let Some(deadline) = tracker.next_deadline() {
//!     tracker.poll(deadline);
//! }
//! let changes = tracker.run_pending_checks(&layout);
//! assert!(changes.iter().any(|c| c.key == "footer" && c.visible));
//! assert_eq!(tracker.is_visible(&"hero"), Some(false));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod geometry;
mod layout;
mod options;
mod sensor;
mod tracker;

pub use geometry::{Axes, Edge, Offset, VisibilityMode, is_visible, offset_viewport, resolve_viewport_size};
pub use layout::{LayoutQuery, StaticLayout};
pub use options::{DEFAULT_THROTTLE_INTERVAL, VisibilityOptions};
pub use sensor::{
    EventOutcome, Measurement, SensorState, ViewportEvent, VisibilitySensor,
    VisibilitySensorDebugInfo,
};
pub use tracker::{
    CheckLog, CheckRecord, CheckTrace, RegisterError, VisibilityChange, VisibilityTracker,
};
