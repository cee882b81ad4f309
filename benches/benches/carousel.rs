// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use understory_carousel::gesture::{DragContext, GestureClassifier, swipe_angle};
use understory_carousel::{
    Carousel, CarouselOptions, Channel, EventSource, LayoutSurface, Mutation, PointerSample,
    Step, Subscription, TweenDriver,
};

/// Surface that only keeps the latest track offset, like a host writing one
/// transform per frame.
#[derive(Debug, Default)]
struct Track {
    slides: usize,
    offset: f64,
}

impl LayoutSurface for Track {
    fn list_width(&self) -> f64 {
        960.0
    }

    fn slide_count(&self) -> usize {
        self.slides
    }

    fn apply(&mut self, mutation: Mutation) {
        if let Mutation::TrackOffset(offset) = mutation {
            self.offset = offset;
        }
    }
}

#[derive(Debug, Default)]
struct Listeners(u64);

impl EventSource for Listeners {
    fn subscribe(&mut self, channel: Channel) -> Subscription {
        self.0 += 1;
        Subscription { channel, id: self.0 }
    }

    fn unsubscribe(&mut self, _: Subscription) {}
}

fn carousel(slides: usize) -> Carousel<Track, TweenDriver, Listeners> {
    let mut carousel = Carousel::new(
        CarouselOptions::default().with_slides_to_show(3).with_slides_to_scroll(1),
        Track {
            slides,
            offset: 0.0,
        },
        TweenDriver::default(),
        Listeners::default(),
    )
    .unwrap();
    carousel.initialize();
    carousel
}

/// A wobbly leftward drag, one sample per pixel-ish frame.
fn drag_samples(len: usize) -> Vec<PointerSample> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            PointerSample::mouse(800.0 - t * 0.75, 200.0 + (t * 0.1).sin() * 12.0)
        })
        .collect()
}

fn bench_gesture_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/gesture");
    let ctx = DragContext {
        committed_offset: -960.0,
        at_start: false,
        at_end: false,
        pageable: true,
        animating: false,
        min_swipe: 192.0,
        edge_friction: 0.35,
    };

    for len in [64usize, 512, 4_096] {
        let samples = drag_samples(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("drag", len), &samples, |b, samples| {
            b.iter(|| {
                let mut gesture = GestureClassifier::default();
                gesture.start(PointerSample::mouse(800.0, 200.0), &ctx);
                let mut last = 0.0;
                for sample in samples {
                    if let Some(offset) = gesture.update(*sample, &ctx) {
                        last = offset;
                    }
                }
                black_box(last);
                black_box(gesture.end())
            });
        });
    }

    group.bench_function("swipe_angle", |b| {
        let start = Point::new(400.0, 300.0);
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..360 {
                let theta = f64::from(i).to_radians();
                let current = Point::new(400.0 + theta.cos() * 90.0, 300.0 + theta.sin() * 90.0);
                sum += swipe_angle(black_box(start), current);
            }
            sum
        });
    });

    group.finish();
}

fn bench_carousel_paging(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/paging");

    // Each page: accept the move, then drive the tween to completion at 60 Hz.
    for slides in [12usize, 120, 1_200] {
        group.throughput(Throughput::Elements(slides as u64));
        group.bench_with_input(
            BenchmarkId::new("step_through", slides),
            &slides,
            |b, &slides| {
                b.iter_batched(
                    || carousel(slides),
                    |mut carousel| {
                        let mut now = 0_u64;
                        while carousel.navigate(Step::Next) < slides - 3 {
                            while carousel.is_animating() {
                                carousel.tick(now);
                                now += 16;
                            }
                        }
                        black_box(carousel.surface().offset)
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.bench_function("swipe_commit", |b| {
        let samples = drag_samples(320);
        b.iter_batched(
            || carousel(12),
            |mut carousel| {
                carousel.pointer_start(PointerSample::mouse(800.0, 200.0));
                for sample in &samples {
                    carousel.pointer_move(*sample);
                }
                carousel.pointer_end();
                black_box(carousel.current_slide())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_gesture_classifier, bench_carousel_paging);
criterion_main!(benches);
