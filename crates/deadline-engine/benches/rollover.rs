use std::hint::black_box;

use chrono::Weekday;
use criterion::{criterion_group, criterion_main, Criterion};
use deadline_engine::{calculate_deadline, format, Calendar};

fn shop() -> Calendar {
    let mut calendar = Calendar::with_default_hours("09:00", "15:00").unwrap();
    calendar
        .set_weekday_hours(Weekday::Fri, "10:00", "17:00")
        .unwrap();
    calendar.set_weekdays_closed(&[Weekday::Sun, Weekday::Wed]);
    let holidays: Vec<String> = (1..=28).map(|d| format!("2010-02-{d:02}")).collect();
    calendar.set_dates_closed(&holidays).unwrap();
    calendar
}

fn bench_rollover(c: &mut Criterion) {
    let calendar = shop();
    let start = format::parse_datetime("2010-01-04 9:00").unwrap();

    c.bench_function("same_day", |b| {
        b.iter(|| calculate_deadline(&calendar, black_box(3600), black_box(start)))
    });

    c.bench_function("six_months", |b| {
        b.iter(|| calculate_deadline(&calendar, black_box(600 * 3600), black_box(start)))
    });

    let mut closed = calendar.clone();
    closed.set_weekdays_closed(&[
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ]);
    c.bench_function("processing_limit", |b| {
        b.iter(|| calculate_deadline(&closed, black_box(3600), black_box(start)))
    });
}

criterion_group!(benches, bench_rollover);
criterion_main!(benches);
