// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use rill_stream::Source;
use std::hint::black_box;
use tokio::runtime::Runtime;

const MESSAGES: u64 = 100;

pub fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");

    // Subscriber counts to test scalability
    let subscriber_counts = [1usize, 8, 64];

    for &subs in &subscriber_counts {
        group.throughput(Throughput::Elements(MESSAGES * subs as u64));
        let id = BenchmarkId::from_parameter(format!("u64_subs_{subs}"));
        group.bench_with_input(id, &subs, |bencher, &subs| {
            bencher.iter(|| {
                let rt = Runtime::new().unwrap();
                rt.block_on(async {
                    let source = Source::<u64>::new();

                    let mut handles = Vec::with_capacity(subs);
                    for _ in 0..subs {
                        let mut subscription = source.listen().unwrap();
                        handles.push(tokio::spawn(async move {
                            for _ in 0..MESSAGES {
                                black_box(subscription.recv().await);
                            }
                        }));
                    }

                    for n in 0..MESSAGES {
                        source.push(n).unwrap();
                    }

                    for h in handles {
                        let _ = h.await;
                    }
                });
            });
        });
    }

    // Payload cloning cost: every subscriber receives its own copy
    let payload_sizes = [256usize, 4096usize];
    for &size in &payload_sizes {
        let subs = 8usize;
        group.throughput(Throughput::Bytes((size * subs) as u64 * MESSAGES));
        let id = BenchmarkId::from_parameter(format!("vec_p{size}_subs_{subs}"));
        group.bench_with_input(id, &size, |bencher, &size| {
            bencher.iter(|| {
                let rt = Runtime::new().unwrap();
                rt.block_on(async {
                    let source = Source::<Vec<u8>>::new();

                    let mut handles = Vec::with_capacity(subs);
                    for _ in 0..subs {
                        let mut subscription = source.listen().unwrap();
                        handles.push(tokio::spawn(async move {
                            for _ in 0..MESSAGES {
                                black_box(subscription.recv().await);
                            }
                        }));
                    }

                    for _ in 0..MESSAGES {
                        source.push(vec![0u8; size]).unwrap();
                    }

                    for h in handles {
                        let _ = h.await;
                    }
                });
            });
        });
    }

    group.finish();
}
