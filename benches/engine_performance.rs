//! Performance benchmarks for engine calls

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use waitlist_engine::config::AppConfig;
use waitlist_engine::types::{
    HistoricalSample, RestaurantWaitStatus, TableCategory, WaitStatusSnapshot, WaitlistEntry,
};
use waitlist_engine::utils::FixedClock;
use waitlist_engine::{RestaurantSnapshot, WaitlistEngine};

fn create_bench_engine() -> WaitlistEngine {
    let now = Utc.with_ymd_and_hms(2026, 3, 14, 19, 0, 0).unwrap();
    WaitlistEngine::from_config(&AppConfig::default())
        .unwrap()
        .with_clock(Arc::new(FixedClock(now)))
}

/// A busy Saturday: 8 categories, 60 parties waiting, a week of history
fn create_bench_snapshot() -> RestaurantSnapshot {
    let categories: Vec<TableCategory> = (0..8)
        .map(|i| TableCategory::new(format!("Section {}", i), 2 + i, 3 + i % 3, 40 + 10 * i))
        .collect();

    let queue = (0..60)
        .map(|i| WaitlistEntry::waiting(1 + i % 8))
        .collect();

    let history_samples = (0..7u8)
        .flat_map(|day| {
            (11..23u8).map(move |hour| HistoricalSample {
                day_of_week: day,
                hour,
                average_wait_minutes: 10.0 + f64::from(hour),
                average_party_size: 3.0,
                total_customers: 80,
            })
        })
        .collect();

    let start = Utc.with_ymd_and_hms(2026, 3, 7, 11, 0, 0).unwrap();
    let seated_history = (0..2000i64)
        .map(|i| {
            let category = &categories[(i % 8) as usize];
            WaitlistEntry::seated(2, category.id, start + Duration::minutes(i * 7))
        })
        .collect();

    RestaurantSnapshot {
        status: WaitStatusSnapshot::new(RestaurantWaitStatus::Long),
        categories,
        queue,
        history_samples,
        seated_history,
    }
}

fn bench_estimates(c: &mut Criterion) {
    let engine = create_bench_engine();
    let snapshot = create_bench_snapshot();

    c.bench_function("estimate_busy_floor", |b| {
        b.iter(|| engine.estimate(black_box(&snapshot), black_box(4)).unwrap());
    });

    c.bench_function("quote_busy_floor", |b| {
        b.iter(|| {
            engine
                .quote(black_box(&snapshot), black_box(5), Some("Section 4"))
                .unwrap()
        });
    });
}

fn bench_matching(c: &mut Criterion) {
    let engine = create_bench_engine();
    let snapshot = create_bench_snapshot();

    c.bench_function("find_table_busy_floor", |b| {
        b.iter(|| engine.find_table(black_box(&snapshot), black_box(6), None));
    });

    c.bench_function("category_wait_board", |b| {
        b.iter(|| engine.category_waits(black_box(&snapshot)));
    });
}

fn bench_turnover(c: &mut Criterion) {
    let engine = create_bench_engine();
    let snapshot = create_bench_snapshot();

    c.bench_function("turnover_analysis_2000_seatings", |b| {
        b.iter(|| engine.analyze(black_box(&snapshot)));
    });
}

criterion_group!(benches, bench_estimates, bench_matching, bench_turnover);
criterion_main!(benches);
