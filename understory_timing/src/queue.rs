// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// Identifier for a scheduled timer.
///
/// Ids are unique within one [`TimerQueue`] and increase monotonically, so
/// they also encode scheduling order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A timer popped from a [`TimerQueue`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timer<T> {
    /// The timer's id.
    pub id: TimerId,
    /// The deadline the timer was scheduled for.
    pub deadline: u64,
    /// The caller's payload.
    pub payload: T,
}

/// Deadline-ordered queue of deferred payloads.
///
/// Timers with equal deadlines pop in the order they were scheduled.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    // Sorted by (deadline, id) descending so the earliest timer is last.
    timers: Vec<Timer<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedules `payload` to become due at `deadline`.
    pub fn schedule(&mut self, deadline: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let idx = self
            .timers
            .partition_point(|t| (t.deadline, t.id) > (deadline, id));
        self.timers.insert(
            idx,
            Timer {
                id,
                deadline,
                payload,
            },
        );
        id
    }

    /// Cancels a timer, returning its payload if it was still queued.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let idx = self.timers.iter().position(|t| t.id == id)?;
        Some(self.timers.remove(idx).payload)
    }

    /// Keeps only the timers whose payload matches `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.timers.retain(|t| keep(&t.payload));
    }

    /// Pops the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Timer<T>> {
        match self.timers.last() {
            Some(t) if t.deadline <= now => self.timers.pop(),
            _ => None,
        }
    }

    /// Returns the earliest deadline in the queue.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.last().map(|t| t.deadline)
    }

    /// Returns the number of queued timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns `true` if no timers are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Drops every queued timer.
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}
