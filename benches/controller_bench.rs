//! Performance benchmarks for the lock controller.
//!
//! Measures a full `enter_code` call (validation, classification, transition,
//! history bookkeeping and report construction) for the common outcomes.
//!
//! # Run Benchmarks
//!
//! ```sh
//! cargo bench --bench controller_bench
//! ```

use codelock_controller::{LockController, transition};
use codelock_core::{Classification, LockState};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const PRIMARY: &str = "12345678";
const SUPER: &str = "87654321";

fn bench_transition_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("transition_table");
    group.throughput(Throughput::Elements(1));

    group.bench_function("locked_wrong", |b| {
        b.iter(|| black_box(transition(black_box(LockState::Locked), Classification::Wrong, 1)));
    });
    group.bench_function("error_super", |b| {
        b.iter(|| black_box(transition(black_box(LockState::Error), Classification::Super, 3)));
    });

    group.finish();
}

fn bench_enter_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("enter_code");
    group.throughput(Throughput::Elements(1));

    group.bench_function("unlock_relock", |b| {
        let mut lock = LockController::new(PRIMARY, SUPER, LockState::Locked).unwrap();
        b.iter(|| black_box(lock.enter_code(black_box(PRIMARY))));
    });

    group.bench_function("error_absorbing", |b| {
        let mut lock = LockController::new(PRIMARY, SUPER, LockState::Error).unwrap();
        b.iter(|| black_box(lock.enter_code(black_box("00000000"))));
    });

    group.bench_function("malformed", |b| {
        let mut lock = LockController::new(PRIMARY, SUPER, LockState::Locked).unwrap();
        b.iter(|| black_box(lock.enter_code(black_box("1234"))));
    });

    group.bench_function("lockout_recovery_cycle", |b| {
        let mut lock = LockController::new(PRIMARY, SUPER, LockState::Locked).unwrap();
        b.iter(|| {
            for code in ["00000000", "11111111", "22222222", SUPER] {
                black_box(lock.enter_code(black_box(code)).ok());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_transition_table, bench_enter_code);
criterion_main!(benches);
