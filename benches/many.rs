use std::sync::{Arc, Barrier};
use std::thread::{spawn, JoinHandle};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gated_rwlock::RwLock;

fn thread_reader(iter_count: u64, lock: &RwLock<i64>) {
    for _ in 0..black_box(iter_count) {
        let locked = lock.read();
        black_box(*locked);
    }
}

fn thread_writer(thread_idx: u64, iter_count: u64, lock: &RwLock<i64>) {
    for _ in 0..black_box(iter_count) {
        let mut locked = lock.write();

        if thread_idx % 2 == 0 {
            *locked += 1
        } else {
            *locked -= 1
        }
    }
}

fn run_multithreaded(iter_count: u64, readers: u64, writers: u64) {
    let lock = Arc::new(RwLock::new(0i64));
    let start_barrier = Arc::new(Barrier::new((readers + writers) as usize));

    let threads: Vec<JoinHandle<()>> = (0..readers + writers)
        .map(|idx| {
            let lock = lock.clone();
            let start_barrier = start_barrier.clone();
            spawn(move || {
                start_barrier.wait();
                if idx < readers {
                    thread_reader(iter_count, &lock)
                } else {
                    thread_writer(idx, iter_count, &lock)
                }
            })
        })
        .collect();

    for thread in threads {
        thread.join().expect("worker panicked");
    }
}

fn bench_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended");
    group.sample_size(10);

    for &(readers, writers) in &[(0, 2), (4, 2), (15, 1)] {
        group.bench_function(format!("{}r_{}w", readers, writers), |b| {
            b.iter(|| run_multithreaded(10_000, readers, writers));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_many);
criterion_main!(benches);
