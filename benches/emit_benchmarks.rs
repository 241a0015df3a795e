//! Signal Registry Benchmarks
//!
//! Measures emit throughput against the number of registered receivers and
//! the cost of the full-scan queries (`signals`, `disconnect`) against the
//! number of known signals.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use smokesignal::{callback, Args, CallbackRef, SignalRegistry};

fn counting_callback(calls: &Arc<AtomicUsize>) -> CallbackRef<Args> {
    let calls = Arc::clone(calls);
    callback(move |_args: &Args| {
        calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    })
}

/// Emit cost as receivers per signal grow
fn bench_emit_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit_fanout");
    let args = Args::new().arg(1).kwarg("source", "bench");

    for receivers in [1usize, 10, 100, 1000] {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry: SignalRegistry = SignalRegistry::new();
        for _ in 0..receivers {
            registry.on("tick", counting_callback(&calls));
        }

        group.throughput(Throughput::Elements(receivers as u64));
        group.bench_with_input(BenchmarkId::new("receivers", receivers), &receivers, |b, _| {
            b.iter(|| registry.emit(black_box("tick"), &args).unwrap())
        });
    }
    group.finish();
}

/// Emit cost once every receiver has used up its calls
fn bench_emit_exhausted(c: &mut Criterion) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry: SignalRegistry = SignalRegistry::new();
    for _ in 0..100 {
        registry.once("tick", counting_callback(&calls));
    }
    let args = Args::new();
    registry.emit("tick", &args).unwrap();

    c.bench_function("emit_exhausted_100", |b| {
        b.iter(|| registry.emit(black_box("tick"), &args).unwrap())
    });
}

/// `signals` scans every known signal
fn bench_signals_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("signals_scan");

    for known in [10usize, 100, 1000, 10000] {
        let calls = Arc::new(AtomicUsize::new(0));
        let target = counting_callback(&calls);
        let mut registry: SignalRegistry = SignalRegistry::new();
        for i in 0..known {
            registry.on(format!("signal-{}", i), counting_callback(&calls));
        }
        registry.on("signal-0", Arc::clone(&target));

        group.bench_with_input(BenchmarkId::new("known_signals", known), &known, |b, _| {
            b.iter(|| black_box(registry.signals(&target)))
        });
    }
    group.finish();
}

/// Register then disconnect one callback across a spread of signals
fn bench_register_disconnect(c: &mut Criterion) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry: SignalRegistry = SignalRegistry::new();
    for i in 0..1000 {
        registry.on(format!("background-{}", i), counting_callback(&calls));
    }
    let signals: Vec<String> = (0..10).map(|i| format!("foreground-{}", i)).collect();
    let target = counting_callback(&calls);

    c.bench_function("register_disconnect_10_of_1010", |b| {
        b.iter(|| {
            registry.on(&signals, Arc::clone(&target));
            black_box(registry.disconnect(&target))
        })
    });
}

criterion_group!(
    benches,
    bench_emit_fanout,
    bench_emit_exhausted,
    bench_signals_scan,
    bench_register_disconnect
);
criterion_main!(benches);
