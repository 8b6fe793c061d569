//! Performance benchmarks for the PTO engine.
//!
//! This benchmark suite covers the hot paths behind a balance screen:
//! - Current balance after several years of weekly accrual
//! - A one-year daily forecast for a single category
//! - One-year forecasts for a full preset set (UPT, Flex, standard)
//! - Forecast horizon scaling
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use pto_engine::calculation::{Ledger, PresetParams, current_balance, forecast, preset};
use pto_engine::config::PresetConfig;
use pto_engine::models::{
    AccrualFrequency, CategoryConfig, LedgerEntry, PtoCategory, WorkShift,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn at(day: NaiveDate, hour: u32) -> NaiveDateTime {
    day.and_time(NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time"))
}

/// Creates a capped weekly category with an annual grant.
fn create_flex_category() -> PtoCategory {
    PtoCategory::new(
        "flex",
        CategoryConfig {
            accrual_rate: Decimal::new(185, 2),
            accrual_frequency: Some(AccrualFrequency::Weekly),
            start_date: Some(date(2020, 3, 2)),
            starting_balance: Decimal::new(10, 0),
            max_balance: Some(Decimal::new(48, 0)),
            yearly_accrual_cap: Some(Decimal::new(38, 0)),
            annual_grant_amount: Some(Decimal::new(10, 0)),
            skip_grant_week: true,
            ..CategoryConfig::new("Flex PTO")
        },
    )
}

/// Creates a ledger with one usage entry per month.
fn create_usage_ledger(category_id: &str, from: NaiveDate, months: u32) -> Ledger {
    let entries = (0..months).filter_map(|i| {
        from.checked_add_months(chrono::Months::new(i)).map(|day| {
            LedgerEntry::manual(format!("log_{:03}", i), category_id, day, Decimal::new(-4, 0))
        })
    });
    Ledger::from_entries(category_id, entries).expect("entries belong to category")
}

/// Creates four 10 hour shifts a week.
fn create_shifts(from: NaiveDate, weeks: u64) -> Vec<WorkShift> {
    (0..weeks * 7)
        .filter(|offset| offset % 7 < 4)
        .filter_map(|offset| from.checked_add_days(Days::new(offset)))
        .map(|day| WorkShift {
            id: format!("shift_{}", day),
            start_time: at(day, 7),
            end_time: at(day, 17),
            breaks: vec![],
        })
        .collect()
}

/// Benchmark: current balance after six years of history.
fn bench_current_balance(c: &mut Criterion) {
    let category = create_flex_category();
    let ledger = create_usage_ledger("flex", date(2020, 3, 15), 72);
    let today = date(2026, 3, 1);

    c.bench_function("current_balance_6_years", |b| {
        b.iter(|| black_box(current_balance(&category, &ledger, black_box(today))))
    });
}

/// Benchmark: one-year daily forecast for a single category.
fn bench_forecast_single(c: &mut Criterion) {
    let category = create_flex_category();
    let ledger = create_usage_ledger("flex", date(2024, 1, 15), 36);
    let today = date(2025, 1, 1);
    let target = date(2025, 12, 31);

    c.bench_function("forecast_365_days", |b| {
        b.iter(|| black_box(forecast(&category, &ledger, today, black_box(target))))
    });
}

/// Benchmark: one-year forecasts for every preset category.
fn bench_forecast_presets(c: &mut Criterion) {
    let start = date(2024, 1, 1);
    let params = PresetParams::new(3, Decimal::new(10, 0), 4, start);
    let configs = preset(&params, &PresetConfig::default()).expect("default presets");
    let shifts = create_shifts(start, 104);

    let inputs: Vec<(PtoCategory, Ledger)> = configs
        .into_iter()
        .enumerate()
        .map(|(i, config)| {
            let category = PtoCategory::new(format!("cat_{}", i), config);
            let logs = create_usage_ledger(&category.id, start, 24);
            let ledger = Ledger::merge(&category, logs.entries(), &shifts)
                .expect("entries belong to category");
            (category, ledger)
        })
        .collect();

    let today = date(2025, 1, 1);
    let target = date(2025, 12, 31);

    let mut group = c.benchmark_group("preset_forecast");
    group.throughput(Throughput::Elements(inputs.len() as u64));
    group.bench_function("three_categories_365_days", |b| {
        b.iter(|| {
            let series: Vec<_> = inputs
                .iter()
                .map(|(category, ledger)| forecast(category, ledger, today, target))
                .collect();
            black_box(series)
        })
    });
    group.finish();
}

/// Benchmark: forecast cost as the horizon grows.
fn bench_forecast_scaling(c: &mut Criterion) {
    let category = create_flex_category();
    let ledger = create_usage_ledger("flex", date(2024, 1, 15), 60);
    let today = date(2025, 1, 1);

    let mut group = c.benchmark_group("forecast_scaling");

    for days in [30u64, 365, 1825].iter() {
        let target = today + Days::new(*days);
        group.throughput(Throughput::Elements(*days));
        group.bench_with_input(BenchmarkId::new("days", days), &target, |b, target| {
            b.iter(|| black_box(forecast(&category, &ledger, today, *target)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_current_balance,
    bench_forecast_single,
    bench_forecast_presets,
    bench_forecast_scaling
);
criterion_main!(benches);
