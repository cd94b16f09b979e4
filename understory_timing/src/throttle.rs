// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Result of a [`Throttle::request`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ThrottleOutcome {
    /// The window was open; the caller should run the work now.
    Fire,
    /// A trailing call was newly scheduled for `at`.
    Scheduled {
        /// Timestamp at which [`Throttle::poll`] will fire the trailing call.
        at: u64,
    },
    /// A trailing call was already pending for `at`; nothing new was scheduled.
    AlreadyScheduled {
        /// Timestamp of the pending trailing call.
        at: u64,
    },
}

impl ThrottleOutcome {
    /// Returns `true` if the caller should run the work now.
    #[must_use]
    pub fn fired(self) -> bool {
        matches!(self, Self::Fire)
    }

    /// Returns the trailing deadline, if the request was deferred.
    #[must_use]
    pub fn deadline(self) -> Option<u64> {
        match self {
            Self::Fire => None,
            Self::Scheduled { at } | Self::AlreadyScheduled { at } => Some(at),
        }
    }
}

/// Leading + trailing throttle over caller-supplied timestamps.
///
/// At most one call fires per `interval`. The first request after a quiet
/// period fires immediately; requests that arrive while the window is closed
/// are coalesced into one trailing call at `last_fire + interval`, which the
/// host delivers by calling [`Throttle::poll`].
///
/// An interval of `0` disables throttling: every request fires.
#[derive(Clone, Debug, Default)]
pub struct Throttle {
    interval: u64,
    last_fire: Option<u64>,
    trailing: Option<u64>,
}

impl Throttle {
    /// Creates a throttle with the given interval.
    #[must_use]
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            last_fire: None,
            trailing: None,
        }
    }

    /// Returns the throttle interval.
    #[must_use]
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Sets the throttle interval.
    ///
    /// A pending trailing call keeps its deadline; the new interval applies to
    /// the next window.
    pub fn set_interval(&mut self, interval: u64) {
        self.interval = interval;
    }

    /// Requests a call at `now`.
    pub fn request(&mut self, now: u64) -> ThrottleOutcome {
        if self.window_open(now) {
            self.fire(now);
            return ThrottleOutcome::Fire;
        }
        let at = self.window_end();
        if self.trailing.is_some() {
            ThrottleOutcome::AlreadyScheduled { at }
        } else {
            self.trailing = Some(at);
            ThrottleOutcome::Scheduled { at }
        }
    }

    /// Fires the pending trailing call if it is due.
    ///
    /// Returns `true` if the caller should run the work now.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.trailing {
            Some(at) if now >= at => {
                self.fire(now);
                true
            }
            _ => false,
        }
    }

    /// Returns the deadline of the pending trailing call, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.trailing
    }

    /// Returns `true` while a trailing call is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.trailing.is_some()
    }

    /// Drops the pending trailing call, keeping the current window.
    pub fn cancel(&mut self) {
        self.trailing = None;
    }

    /// Forgets all history; the next request fires immediately.
    pub fn reset(&mut self) {
        self.last_fire = None;
        self.trailing = None;
    }

    fn fire(&mut self, now: u64) {
        self.last_fire = Some(now);
        self.trailing = None;
    }

    fn window_open(&self, now: u64) -> bool {
        match self.last_fire {
            None => true,
            // A clock that went backwards reopens the window.
            Some(last) => now < last || now - last >= self.interval,
        }
    }

    fn window_end(&self) -> u64 {
        self.last_fire
            .map_or(0, |last| last.saturating_add(self.interval))
    }
}
