// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timing primitives for UI runtimes.
//!
//! UI code frequently needs to rate-limit work triggered by high-frequency
//! events (scroll, resize, pointer move) and to defer work to a later tick.
//! This crate models both without owning a clock or an event loop:
//!
//! - [`Throttle`]: leading + trailing throttle. The first request in a window
//!   fires immediately; further requests collapse into a single trailing call
//!   at the end of the window.
//! - [`TimerQueue`]: an ordered queue of deferred payloads keyed by deadline.
//!   A zero-delay timer is simply a timer scheduled at "now", which becomes due
//!   on the next poll.
//!
//! Time is expressed as caller-supplied `u64` timestamps, conventionally in
//! milliseconds. Hosts are expected to:
//! - Pass the current timestamp to every call that needs it.
//! - Arm a single platform timer for [`TimerQueue::next_deadline`] /
//!   [`Throttle::next_deadline`] and poll when it elapses.
//!
//! ## Throttle example
//!
//! ```rust
//! use understory_timing::{Throttle, ThrottleOutcome};
//!
//! let mut throttle = Throttle::new(100);
//!
//! // The first request fires right away.
//! assert_eq!(throttle.request(0), ThrottleOutcome::Fire);
//!
//! // Requests inside the window collapse into one trailing call.
//! assert_eq!(throttle.request(30), ThrottleOutcome::Scheduled { at: 100 });
//! assert_eq!(throttle.request(60), ThrottleOutcome::AlreadyScheduled { at: 100 });
//!
//! assert!(!throttle.poll(99));
//! assert!(throttle.poll(100));
//! ```
//!
//! ## Timer queue example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule(50, "later");
//! timers.schedule(10, "sooner");
//!
//! assert_eq!(timers.next_deadline(), Some(10));
//! assert_eq!(timers.pop_due(20).map(|t| t.payload), Some("sooner"));
//! assert!(timers.pop_due(20).is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod queue;
mod throttle;

pub use queue::{Timer, TimerId, TimerQueue};
pub use throttle::{Throttle, ThrottleOutcome};
