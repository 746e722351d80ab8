// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use std::time::Duration;
use understory_carousel::probe::SupportedProperties;
use understory_carousel::{Carousel, CarouselOptions, Effect, NativeTransition};

const STEPS: u64 = 256;

fn options(effect: Effect) -> CarouselOptions {
    CarouselOptions::default().with_effect(effect).with_auto(false)
}

fn bench_native_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/native_cycle");
    group.measurement_time(Duration::from_secs(3));
    group.throughput(Throughput::Elements(STEPS));

    // Every step is request + completion event + draining the commands.
    for effect in [Effect::Fade, Effect::Slide] {
        group.bench_with_input(BenchmarkId::from_parameter(effect), &effect, |b, &effect| {
            b.iter_batched(
                || {
                    Carousel::with_native(
                        8,
                        options(effect),
                        Some(NativeTransition::new("transitionend")),
                    )
                },
                |mut carousel| {
                    for _ in 0..STEPS {
                        carousel.request_next();
                        carousel.notify_transition_end("transitionend");
                        black_box(carousel.drain_commands().count());
                    }
                    black_box(carousel);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_interpolated_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/interpolated_frames");
    group.measurement_time(Duration::from_secs(3));

    // 60Hz frames over one 800ms transition, repeated.
    for panels in [2_usize, 16, 128] {
        group.throughput(Throughput::Elements(STEPS));
        group.bench_with_input(BenchmarkId::new("slide", panels), &panels, |b, &panels| {
            b.iter_batched(
                || Carousel::new(panels, options(Effect::Slide), &SupportedProperties(&[])),
                |mut carousel| {
                    let mut now = 0;
                    for _ in 0..STEPS {
                        if !carousel.is_transitioning() {
                            carousel.request_next();
                        }
                        carousel.advance(now);
                        now += 16;
                        black_box(carousel.drain_commands().count());
                    }
                    black_box(carousel);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_native_cycle, bench_interpolated_frames);
criterion_main!(benches);
