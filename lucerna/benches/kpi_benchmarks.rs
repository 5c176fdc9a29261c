use std::hint::black_box;

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lucerna::{KpiSummary, SessionDraft, SessionStore, WeekdayTotals};

fn populated_store(session_count: usize) -> SessionStore {
    let mut store = SessionStore::new();
    let base = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

    for i in 0..session_count {
        let date = base + Days::new((i % 28) as u64);
        let draft = SessionDraft {
            subject: format!("subject {}", i % 7),
            start: "09:00".to_string(),
            end: "10:30".to_string(),
            pause_count: (i % 4) as i64,
            focused_min: (i % 90) as i64,
        };
        store.add(date, &draft).unwrap();
    }

    store
}

fn benchmark_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_flatten");

    for session_count in [100, 1_000, 10_000] {
        let store = populated_store(session_count);
        group.bench_with_input(
            BenchmarkId::new("flatten", session_count),
            &store,
            |b, store| b.iter(|| black_box(store.flatten())),
        );
    }

    group.finish();
}

fn benchmark_kpi_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("kpi_compute");

    for session_count in [100, 1_000, 10_000] {
        let records = populated_store(session_count).flatten();
        group.bench_with_input(
            BenchmarkId::new("summary", session_count),
            &records,
            |b, records| b.iter(|| KpiSummary::compute(black_box(records))),
        );
    }

    group.finish();
}

fn benchmark_weekday_totals(c: &mut Criterion) {
    let mut group = c.benchmark_group("weekday_totals");

    for session_count in [100, 1_000, 10_000] {
        let records = populated_store(session_count).flatten();
        group.bench_with_input(
            BenchmarkId::new("collect", session_count),
            &records,
            |b, records| b.iter(|| WeekdayTotals::collect(black_box(records))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_flatten,
    benchmark_kpi_compute,
    benchmark_weekday_totals
);
criterion_main!(benches);
