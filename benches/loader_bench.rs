//! Benchmarks for the sleep CSV loader
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sleep_dashboard::sleep::{average_sleep_time, parse_sleep_csv, SleepRecord};

fn create_test_csv(rows: usize) -> String {
    let mut csv = String::from(
        "date,total_sleep,sleep_score,start_time,end_time,resting_heart_rate,avg_hrv,sleep_quality\n",
    );

    for i in 0..rows {
        let hours = 5.0 + (i % 40) as f64 / 10.0;
        csv.push_str(&format!(
            "2024-{:02}-{:02},{:.2},{},,,{},{},GOOD\n",
            i % 12 + 1,
            i % 28 + 1,
            hours,
            60 + i % 30,
            50 + i % 10,
            40 + i % 20
        ));
    }

    csv
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [30, 365, 3650] {
        let csv = create_test_csv(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("parse_{}", size), |b| {
            b.iter(|| parse_sleep_csv(black_box(&csv)).unwrap())
        });
    }

    group.finish();
}

fn bench_average(c: &mut Criterion) {
    let records: Vec<SleepRecord> = (0..3650)
        .map(|i| SleepRecord::new(format!("day-{}", i), 6.0 + (i % 30) as f64 / 10.0))
        .collect();

    c.bench_function("average_3650", |b| {
        b.iter(|| average_sleep_time(black_box(&records)))
    });
}

criterion_group!(benches, bench_parse, bench_average);
criterion_main!(benches);
