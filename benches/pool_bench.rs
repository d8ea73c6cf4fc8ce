use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use taskpool::{SharedQueueThreadPool, ThreadPool};

/// Sums a run of integers so each task has some real work to do.
fn busy_sum(n: u64) -> u64 {
    (0..n).fold(0u64, |acc, x| acc.wrapping_add(x * x))
}

fn submit_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_and_join");
    let max_threads = num_cpus::get() as u32;

    let mut rng = thread_rng();
    let sizes: Vec<u64> = (0..256).map(|_| rng.gen_range(100..10_000)).collect();

    let mut threads = 1;
    while threads <= max_threads {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &n| {
            let pool = SharedQueueThreadPool::new(n).unwrap();
            b.iter(|| {
                let handles: Vec<_> = sizes
                    .iter()
                    .map(|&size| pool.submit(move || busy_sum(size)).unwrap())
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().unwrap())
                    .fold(0u64, u64::wrapping_add)
            });
        });
        threads *= 2;
    }

    group.finish();
}

fn spawn_overhead_bench(c: &mut Criterion) {
    c.bench_function("spawn_empty_jobs", |b| {
        b.iter_batched(
            || SharedQueueThreadPool::new(4).unwrap(),
            |pool| {
                for _ in 0..1000 {
                    pool.spawn(|| ()).unwrap();
                }
                // Dropping the pool drains the queue.
                drop(pool);
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, submit_bench, spawn_overhead_bench);
criterion_main!(benches);
