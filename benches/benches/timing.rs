// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use understory_timing::{Throttle, TimerQueue};

fn bench_throttle(c: &mut Criterion) {
    c.bench_function("throttle_10k_events", |b| {
        b.iter(|| {
            let mut throttle = Throttle::new(150);
            let mut fired = 0_u32;
            for now in (0..160_000_u64).step_by(16) {
                if throttle.request(black_box(now)).fired() || throttle.poll(now) {
                    fired += 1;
                }
            }
            fired
        });
    });
}

fn bench_queue(c: &mut Criterion) {
    c.bench_function("timer_queue_schedule_pop_1k", |b| {
        b.iter(|| {
            let mut queue = TimerQueue::new();
            for i in 0..1_000_u64 {
                // Scatter deadlines so inserts land throughout the queue.
                queue.schedule(black_box((i * 7_919) % 1_000), i);
            }
            let mut sum = 0_u64;
            while let Some(timer) = queue.pop_due(u64::MAX) {
                sum = sum.wrapping_add(timer.payload);
            }
            sum
        });
    });
}

criterion_group!(benches, bench_throttle, bench_queue);
criterion_main!(benches);
