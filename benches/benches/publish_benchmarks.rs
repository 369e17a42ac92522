use std::{hint::black_box, sync::Arc};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use topical::{topic_map, Disposable, ObserverFn, Publisher, RawMessage, SubscriberFn};

topic_map! {
    #[derive(Debug, Clone)]
    enum Tick: TickTopic {
        Price => u64,
        Volume => u64,
        Status => String,
    }
}

fn bench_publish_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish_fan_out");
    for subscribers in [0usize, 1, 10, 100] {
        let publisher: Publisher<Tick> = Publisher::new();
        let _handles: Vec<Disposable> = (0..subscribers)
            .map(|_| {
                publisher.subscribe(SubscriberFn::arc([TickTopic::Price], |tick: &Tick| {
                    black_box(tick);
                }))
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &subscribers,
            |b, _| b.iter(|| publisher.publish(black_box(Tick::Price(42)))),
        );
    }
    group.finish();
}

/// Половина подписчиков не интересуется топиком: стоимость фильтрации
/// против обычных наблюдателей.
fn bench_filtered_vs_plain(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_vs_plain");

    let filtered: Publisher<Tick> = Publisher::new();
    let _filtered: Vec<Disposable> = (0..50)
        .map(|n| {
            let topic = if n % 2 == 0 {
                TickTopic::Price
            } else {
                TickTopic::Volume
            };
            filtered.subscribe(SubscriberFn::arc([topic], |tick: &Tick| {
                black_box(tick);
            }))
        })
        .collect();
    group.bench_function("filtered_50", |b| {
        b.iter(|| filtered.publish(black_box(Tick::Price(1))))
    });

    let plain: Publisher<Tick> = Publisher::new();
    let _plain: Vec<Disposable> = (0..50)
        .map(|_| {
            plain.observe(ObserverFn::arc(|tick: &Tick| {
                black_box(tick);
            }))
        })
        .collect();
    group.bench_function("plain_50", |b| {
        b.iter(|| plain.publish(black_box(Tick::Price(1))))
    });

    group.finish();
}

fn bench_subscribe_dispose(c: &mut Criterion) {
    let publisher: Publisher<Tick> = Publisher::new();
    let subscriber = SubscriberFn::arc([TickTopic::Status], |tick: &Tick| {
        black_box(tick);
    });
    c.bench_function("subscribe_dispose", |b| {
        b.iter(|| {
            let handle = publisher.subscribe(Arc::clone(&subscriber));
            handle.dispose();
        })
    });
}

fn bench_publish_raw(c: &mut Criterion) {
    let publisher: Publisher<Tick> = Publisher::new();
    let _handle = publisher.subscribe(SubscriberFn::arc([TickTopic::Status], |tick: &Tick| {
        black_box(tick);
    }));
    c.bench_function("publish_raw", |b| {
        b.iter(|| {
            publisher
                .publish_raw(black_box(RawMessage::new("Status", "open")))
                .unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_publish_fan_out,
    bench_filtered_vs_plain,
    bench_subscribe_dispose,
    bench_publish_raw
);
criterion_main!(benches);
