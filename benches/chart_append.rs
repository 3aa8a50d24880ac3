//! Benchmarks for the live chart hot path
//!
//! Run with: cargo bench

use chrono::{DateTime, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use storm_monitor::transport::EVENT_SERIAL_DATA;
use storm_monitor::{ChartState, SensorKind, SensorReading};

fn full_reading(i: u64) -> SensorReading {
    let x = i as f64;
    SensorReading::new()
        .with(SensorKind::Voltage, 16.8 - (x * 0.001).sin())
        .with(SensorKind::Current, 10.0 + (x * 0.01).cos())
        .with(SensorKind::Weight, 600.0 + (x * 0.02).sin() * 100.0)
        .with(SensorKind::Pwm, (i % 100) as f64)
}

/// Timestamps 33 ms apart, like a 30 Hz stream
fn at(i: u64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_700_000_000_000 + i as i64 * 33).unwrap_or_default()
}

fn filled_chart(size: usize) -> ChartState {
    let mut chart = ChartState::new(Some(size));
    for i in 0..size as u64 {
        chart.push(&full_reading(i), at(i));
    }
    chart
}

fn bench_chart_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart_push");

    for size in [1000, 10_000, 36_000].iter() {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("at_capacity", size), size, |b, &size| {
            let mut chart = filled_chart(size);
            let mut i = size as u64;
            b.iter(|| {
                chart.push(black_box(&full_reading(i)), at(i));
                i = i.wrapping_add(1);
            });
        });
    }

    group.finish();
}

fn bench_plot_points_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("plot_points_conversion");

    for size in [1000, 10_000, 36_000].iter() {
        let chart = filled_chart(*size);
        let origin = chart.origin().unwrap_or_default();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("as_plot_points", size), &chart, |b, chart| {
            b.iter(|| {
                for series in chart.all_series() {
                    black_box(series.as_plot_points(origin));
                }
            });
        });
    }

    group.finish();
}

fn bench_payload_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_decoding");

    let numeric = json!({ "voltage": 16.42, "current": 12.5, "weight": 812.0, "pwm": 55.0 });
    let text = json!({
        "state": "1",
        "voltage": "16.42",
        "current": "12.50",
        "weight": "812.00",
        "pwm": "55.00"
    });

    group.bench_function("numbers", |b| {
        b.iter(|| black_box(SensorReading::decode(EVENT_SERIAL_DATA, black_box(&numeric))))
    });
    group.bench_function("strings", |b| {
        b.iter(|| black_box(SensorReading::decode(EVENT_SERIAL_DATA, black_box(&text))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_chart_push,
    bench_plot_points_conversion,
    bench_payload_decoding,
);
criterion_main!(benches);
