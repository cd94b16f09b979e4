// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Many sensors behind one set of viewport listeners.
//!
//! A page usually has many nodes that care about visibility but only one
//! scroll listener and one resize listener. [`VisibilityTracker`] fans those
//! events out to a [`VisibilitySensor`] per key, keeps their trailing throttle
//! deadlines in a single [`TimerQueue`], and runs all pending checks in one
//! pass against the host's [`LayoutQuery`].
//!
//! ```
//! use kurbo::{Rect, Size, Vec2};
//! use understory_visibility::{StaticLayout, ViewportEvent, VisibilityOptions, VisibilityTracker};
//!
//! let mut layout = StaticLayout::new(Size::new(800.0, 600.0));
//! layout.set_rect(1_u32, Rect::new(0.0, 100.0, 200.0, 200.0));
//! layout.set_rect(2_u32, Rect::new(0.0, 700.0, 200.0, 800.0));
//!
//! let mut tracker = VisibilityTracker::new();
//! tracker.register(1, VisibilityOptions::default()).unwrap();
//! tracker.register(2, VisibilityOptions::default()).unwrap();
//!
//! let changes = tracker.run_pending_checks(&layout);
//! assert_eq!(changes.len(), 1);
//! assert_eq!(tracker.visible_keys().collect::<Vec<_>>(), [&1]);
//!
//! layout.scroll_by(Vec2::new(0.0, 300.0));
//! tracker.on_viewport_event(ViewportEvent::Scroll, 0);
//! tracker.run_pending_checks(&layout);
//! assert_eq!(tracker.visible_keys().collect::<Vec<_>>(), [&2]);
//! ```

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Rect;
use understory_timing::TimerQueue;

use crate::layout::LayoutQuery;
use crate::options::VisibilityOptions;
use crate::sensor::{EventOutcome, ViewportEvent, VisibilitySensor};

/// Error returned when registering a key that is already tracked.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterError<K> {
    /// The duplicate key.
    pub key: K,
}

impl<K: fmt::Debug> fmt::Debug for RegisterError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegisterError {{ key: {:?} }}", self.key)
    }
}

impl<K: fmt::Debug> fmt::Display for RegisterError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key {:?} is already tracked", self.key)
    }
}

impl<K: fmt::Debug> core::error::Error for RegisterError<K> {}

/// A visibility flip reported by [`VisibilityTracker::run_pending_checks`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VisibilityChange<K> {
    /// The node whose flag flipped.
    pub key: K,
    /// The new flag.
    pub visible: bool,
}

/// A callback sink for check tracing.
///
/// See [`VisibilityTracker::run_pending_checks_with_trace`]. `()` is a no-op sink.
pub trait CheckTrace<K> {
    /// Called for every check that ran, with the rect the layout reported.
    fn measured(&mut self, key: &K, rect: Option<Rect>, visible: bool) {
        let _ = (key, rect, visible);
    }

    /// Called when a check satisfied `once` and the sensor stopped observing.
    fn stopped(&mut self, key: &K) {
        let _ = key;
    }
}

impl<K> CheckTrace<K> for () {}

/// One recorded check.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckRecord<K> {
    /// The checked node.
    pub key: K,
    /// The rect the layout reported.
    pub rect: Option<Rect>,
    /// The measured visibility.
    pub visible: bool,
    /// Whether this check stopped observation.
    pub stopped: bool,
}

/// A [`CheckTrace`] that records every check in order.
#[derive(Clone, Debug, Default)]
pub struct CheckLog<K> {
    records: Vec<CheckRecord<K>>,
}

impl<K> CheckLog<K> {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Returns the recorded checks.
    #[must_use]
    pub fn records(&self) -> &[CheckRecord<K>] {
        &self.records
    }

    /// Clears all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<K: Clone + PartialEq> CheckTrace<K> for CheckLog<K> {
    fn measured(&mut self, key: &K, rect: Option<Rect>, visible: bool) {
        self.records.push(CheckRecord {
            key: key.clone(),
            rect,
            visible,
            stopped: false,
        });
    }

    fn stopped(&mut self, key: &K) {
        if let Some(last) = self.records.last_mut().filter(|r| r.key == *key) {
            last.stopped = true;
        }
    }
}

/// Keyed collection of [`VisibilitySensor`]s sharing viewport events.
///
/// Iteration and reporting follow registration order.
#[derive(Clone, Debug)]
pub struct VisibilityTracker<K>
where
    K: Clone + Eq + Hash,
{
    entries: Vec<(K, VisibilitySensor)>,
    index: HashMap<K, usize>,
    timers: TimerQueue<K>,
}

impl<K> Default for VisibilityTracker<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> VisibilityTracker<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            timers: TimerQueue::new(),
        }
    }

    /// Starts tracking `key`; its sensor is mounted with an initial check pending.
    pub fn register(&mut self, key: K, options: VisibilityOptions) -> Result<(), RegisterError<K>> {
        if self.index.contains_key(&key) {
            return Err(RegisterError { key });
        }
        let mut sensor = VisibilitySensor::new(options);
        sensor.mount();
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, sensor));
        Ok(())
    }

    /// Stops tracking `key`. Returns `false` if it was not tracked.
    pub fn unregister(&mut self, key: &K) -> bool {
        let Some(idx) = self.index.remove(key) else {
            return false;
        };
        self.entries.remove(idx);
        for (k, _) in &self.entries[idx..] {
            if let Some(i) = self.index.get_mut(k) {
                *i -= 1;
            }
        }
        self.timers.retain(|k| k != key);
        true
    }

    /// Fans a viewport event out to every sensor.
    pub fn on_viewport_event(&mut self, event: ViewportEvent, now: u64) {
        for (key, sensor) in self.entries.iter_mut().map(|(k, s)| (&*k, s)) {
            if let EventOutcome::Deferred { at } = sensor.on_viewport_event(event, now) {
                self.timers.schedule(at, key.clone());
            }
        }
    }

    /// Fires the trailing throttle calls that are due at `now`.
    pub fn poll(&mut self, now: u64) {
        while let Some(timer) = self.timers.pop_due(now) {
            if let Some(&idx) = self.index.get(&timer.payload) {
                self.entries[idx].1.poll(now);
            }
        }
    }

    /// Schedules a check for `key` outside of the event flow.
    pub fn request_check(&mut self, key: &K) {
        if let Some(sensor) = self.sensor_mut(key) {
            sensor.request_check();
        }
    }

    /// Schedules a check for every observing sensor.
    pub fn request_all_checks(&mut self) {
        for (_, sensor) in &mut self.entries {
            sensor.request_check();
        }
    }

    /// Returns `true` if any sensor has a check waiting for the next tick.
    #[must_use]
    pub fn has_pending_checks(&self) -> bool {
        self.entries.iter().any(|(_, s)| s.has_pending_check())
    }

    /// Runs every pending check against `layout`, returning the flags that flipped.
    pub fn run_pending_checks<L>(&mut self, layout: &L) -> Vec<VisibilityChange<K>>
    where
        L: LayoutQuery<K> + ?Sized,
    {
        self.run_pending_checks_with_trace(layout, &mut ())
    }

    /// Like [`run_pending_checks`](Self::run_pending_checks), reporting each
    /// check to `trace`.
    pub fn run_pending_checks_with_trace<L, T>(
        &mut self,
        layout: &L,
        trace: &mut T,
    ) -> Vec<VisibilityChange<K>>
    where
        L: LayoutQuery<K> + ?Sized,
        T: CheckTrace<K> + ?Sized,
    {
        let viewport = layout.viewport_size();
        let mut changes = Vec::new();
        for (key, sensor) in self.entries.iter_mut().map(|(k, s)| (&*k, s)) {
            if !sensor.has_pending_check() {
                continue;
            }
            let rect = layout.bounding_rect(key);
            let Some(m) = sensor.check_rect(rect, viewport) else {
                continue;
            };
            trace.measured(key, rect, m.visible);
            if m.stopped {
                trace.stopped(key);
                self.timers.retain(|k| k != key);
            }
            if m.changed {
                changes.push(VisibilityChange {
                    key: key.clone(),
                    visible: m.visible,
                });
            }
        }
        changes
    }

    /// Returns the stored flag for `key`.
    #[must_use]
    pub fn is_visible(&self, key: &K) -> Option<bool> {
        self.sensor(key).map(VisibilitySensor::is_visible)
    }

    /// Returns the sensor for `key`.
    #[must_use]
    pub fn sensor(&self, key: &K) -> Option<&VisibilitySensor> {
        let idx = *self.index.get(key)?;
        Some(&self.entries[idx].1)
    }

    /// Replaces the options of `key`'s sensor and schedules a recheck.
    ///
    /// Returns `false` if `key` is not tracked.
    pub fn update_options(&mut self, key: &K, options: VisibilityOptions) -> bool {
        let Some(sensor) = self.sensor_mut(key) else {
            return false;
        };
        sensor.update_options(options);
        true
    }

    fn sensor_mut(&mut self, key: &K) -> Option<&mut VisibilitySensor> {
        let idx = *self.index.get(key)?;
        Some(&mut self.entries[idx].1)
    }

    /// Iterates over keys whose stored flag is `true`.
    pub fn visible_keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries
            .iter()
            .filter(|(_, s)| s.is_visible())
            .map(|(k, _)| k)
    }

    /// Iterates over all tracked keys and their sensors.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &VisibilitySensor)> + '_ {
        self.entries.iter().map(|(k, s)| (k, s))
    }

    /// Returns `true` while any sensor still listens for viewport events.
    ///
    /// Once this is `false` the host can detach its scroll/resize listeners.
    #[must_use]
    pub fn wants_events(&self) -> bool {
        self.entries.iter().any(|(_, s)| s.wants_events())
    }

    /// Returns the earliest trailing throttle deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Returns the number of tracked keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
