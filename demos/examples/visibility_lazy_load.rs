// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy loading basics.
//!
//! Simulate a scrolling feed whose cards load once they come within 200px of
//! the viewport, using `understory_visibility` for the checks and an
//! `understory_timing` queue standing in for the host's timer.
//!
//! Run:
//! - `cargo run -p understory_demos --example visibility_lazy_load`

use kurbo::{Size, Vec2};
use understory_demos::card_column;
use understory_timing::TimerQueue;
use understory_visibility::{
    CheckLog, Offset, ViewportEvent, VisibilityOptions, VisibilityTracker,
};

/// Work the host loop schedules.
#[derive(Debug)]
enum Task {
    /// A scroll event from the platform, scrolling by the given delta.
    Scroll(f64),
    /// Wake-up for the tracker's trailing throttle deadline.
    Wake,
}

fn main() {
    let mut layout = card_column(Size::new(360.0, 640.0), 12, 200.0, 20.0);

    let options = VisibilityOptions::default()
        .with_once(true)
        .with_partial(true)
        .with_offset(Offset::symmetric(200.0, 0.0));
    let mut tracker = VisibilityTracker::new();
    for card in 0..12_u32 {
        tracker
            .register(card, options.clone())
            .expect("card ids are unique");
    }

    // Initial tick after mount.
    for change in tracker.run_pending_checks(&layout) {
        println!("t=0ms: card {} loaded", change.key);
    }

    // A fling: 40 scroll events, 8ms apart, each 30px.
    let mut queue = TimerQueue::new();
    for i in 0..40_u64 {
        queue.schedule(i * 8, Task::Scroll(30.0));
    }

    let mut log = CheckLog::new();
    let mut armed_wake: Option<u64> = None;
    while let Some(deadline) = queue.next_deadline() {
        let Some(timer) = queue.pop_due(deadline) else {
            break;
        };
        let now = timer.deadline;
        match timer.payload {
            Task::Scroll(dy) => {
                layout.scroll_by(Vec2::new(0.0, dy));
                tracker.on_viewport_event(ViewportEvent::Scroll, now);
            }
            Task::Wake => tracker.poll(now),
        }
        if let Some(wake) = tracker.next_deadline()
            && armed_wake != Some(wake)
        {
            queue.schedule(wake, Task::Wake);
            armed_wake = Some(wake);
        }
        for change in tracker.run_pending_checks_with_trace(&layout, &mut log) {
            println!("t={now}ms: card {} loaded", change.key);
        }
        if !tracker.wants_events() {
            println!("t={now}ms: every card loaded, detaching listeners");
            break;
        }
    }

    println!(
        "{} checks ran, {} of {} cards loaded",
        log.records().len(),
        tracker.visible_keys().count(),
        tracker.len()
    );
}
