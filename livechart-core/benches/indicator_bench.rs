//! Criterion benchmarks for LiveChart hot paths.
//!
//! Benchmarks:
//! 1. Single indicator families over a random-walk series
//! 2. Full descriptor set recomputed from scratch on every tick
//! 3. The same set through the cache (only the changed tail invalidates)
//! 4. Pattern engines

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use livechart_core::catalog::compute_indicator;
use livechart_core::domain::{IndicatorDescriptor, IndicatorType, Location, PricePoint, Series};
use livechart_core::indicators::{adx, ema, hma, rsi, sma, t3, DEFAULT_VOLUME_FACTOR};
use livechart_core::signals::{engulfing_signals, ha_baseline_signals, EngulfingParams, HaBaselineParams};
use livechart_core::IndicatorCache;

// ── Helpers ──────────────────────────────────────────────────────────

fn random_walk(n: usize, seed: u64) -> Vec<PricePoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut prev = 1_000.0_f64;
    (0..n)
        .map(|i| {
            let open = prev;
            let close = (open + rng.gen_range(-2.0..2.0)).max(1.0);
            prev = close;
            let high = open.max(close) + rng.gen_range(0.0..1.0);
            let low = open.min(close) - rng.gen_range(0.0..1.0);
            PricePoint::candle(i as i64 * 60, open, high, low, close)
        })
        .collect()
}

fn descriptors() -> Vec<IndicatorDescriptor> {
    [
        ("sma", Location::Overlay),
        ("ema", Location::Overlay),
        ("hma", Location::Overlay),
        ("bbands", Location::Overlay),
        ("rsi", Location::Pane),
        ("macd", Location::Pane),
        ("adx", Location::Pane),
        ("stochastic", Location::Pane),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (kind, loc))| {
        IndicatorDescriptor::new(format!("ind-{i}"), IndicatorType::from_name(kind), loc)
    })
    .collect()
}

// ── 1. Families ──────────────────────────────────────────────────────

fn bench_families(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");
    for &n in &[500usize, 5_000] {
        let series = Series::from_points(random_walk(n, 7));
        let (h, l, cl) = (series.highs(), series.lows(), series.closes());
        group.bench_with_input(BenchmarkId::new("sma_20", n), &cl, |b, v| {
            b.iter(|| sma(black_box(v), 20))
        });
        group.bench_with_input(BenchmarkId::new("ema_20", n), &cl, |b, v| {
            b.iter(|| ema(black_box(v), 20))
        });
        group.bench_with_input(BenchmarkId::new("hma_20", n), &cl, |b, v| {
            b.iter(|| hma(black_box(v), 20))
        });
        group.bench_with_input(BenchmarkId::new("t3_5", n), &cl, |b, v| {
            b.iter(|| t3(black_box(v), 5, DEFAULT_VOLUME_FACTOR))
        });
        group.bench_with_input(BenchmarkId::new("rsi_14", n), &cl, |b, v| {
            b.iter(|| rsi(black_box(v), 14))
        });
        group.bench_function(BenchmarkId::new("adx_14", n), |b| {
            b.iter(|| adx(black_box(&h), black_box(&l), black_box(&cl), 14))
        });
    }
    group.finish();
}

// ── 2-3. Live tick: eager vs cached ──────────────────────────────────

fn bench_live_tick(c: &mut Criterion) {
    let points = random_walk(2_000, 11);
    let descs = descriptors();
    let mut group = c.benchmark_group("live_tick");

    group.bench_function("eager_recompute", |b| {
        let series = Series::from_points(points.clone());
        b.iter(|| {
            for d in &descs {
                black_box(compute_indicator(&series, d));
            }
        })
    });

    group.bench_function("cached_unchanged", |b| {
        let series = Series::from_points(points.clone());
        let mut cache = IndicatorCache::new();
        cache.sync(&series, &descs);
        b.iter(|| black_box(cache.sync(&series, &descs)))
    });

    group.finish();
}

// ── 4. Pattern engines ───────────────────────────────────────────────

fn bench_engines(c: &mut Criterion) {
    let series = Series::from_points(random_walk(2_000, 3));
    c.bench_function("ha_baseline_2000", |b| {
        b.iter(|| ha_baseline_signals(black_box(&series), &HaBaselineParams::default()))
    });
    c.bench_function("engulfing_2000", |b| {
        b.iter(|| engulfing_signals(black_box(&series), &EngulfingParams::default()))
    });
}

criterion_group!(benches, bench_families, bench_live_tick, bench_engines);
criterion_main!(benches);
