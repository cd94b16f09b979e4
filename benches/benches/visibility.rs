// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size, Vec2};
use understory_visibility::{
    Offset, StaticLayout, ViewportEvent, VisibilityOptions, VisibilityTracker, is_visible,
};

const VIEWPORT: Size = Size::new(1280.0, 800.0);

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f64(&mut self, upper: f64) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 11) as f64 / (1_u64 << 53) as f64) * upper
    }
}

fn random_rects(n: usize, seed: u64) -> Vec<Rect> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| {
            let x = rng.next_f64(3_000.0) - 1_000.0;
            let y = rng.next_f64(6_000.0) - 2_000.0;
            let w = rng.next_f64(400.0) + 1.0;
            let h = rng.next_f64(400.0) + 1.0;
            Rect::new(x, y, x + w, y + h)
        })
        .collect()
}

fn bench_predicate(c: &mut Criterion) {
    let rects = random_rects(10_000, 0xC0FFEE);
    let full = VisibilityOptions::default();
    let partial = VisibilityOptions::default()
        .with_partial(true)
        .with_offset(Offset::uniform(200.0));

    let mut group = c.benchmark_group("is_visible");
    group.bench_function("full_10k", |b| {
        b.iter(|| {
            rects
                .iter()
                .filter(|r| is_visible(black_box(**r), VIEWPORT, &full))
                .count()
        });
    });
    group.bench_function("partial_offset_10k", |b| {
        b.iter(|| {
            rects
                .iter()
                .filter(|r| is_visible(black_box(**r), VIEWPORT, &partial))
                .count()
        });
    });
    group.finish();
}

fn build_tracker(n: u32) -> (VisibilityTracker<u32>, StaticLayout<u32>) {
    let rects = random_rects(n as usize, 42);
    let mut layout = StaticLayout::new(VIEWPORT);
    let mut tracker = VisibilityTracker::new();
    for (id, rect) in (0..n).zip(rects) {
        layout.set_rect(id, rect);
        tracker
            .register(id, VisibilityOptions::default().with_partial(true))
            .expect("ids are unique");
    }
    (tracker, layout)
}

fn bench_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker");
    for n in [100_u32, 1_000, 10_000] {
        group.bench_function(format!("scroll_check_{n}"), |b| {
            b.iter_batched(
                || build_tracker(n),
                |(mut tracker, mut layout)| {
                    tracker.run_pending_checks(&layout);
                    layout.scroll_by(Vec2::new(0.0, 400.0));
                    tracker.on_viewport_event(ViewportEvent::Scroll, 0);
                    black_box(tracker.run_pending_checks(&layout).len())
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_predicate, bench_tracker);
criterion_main!(benches);
