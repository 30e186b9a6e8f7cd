use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use slo_engine::{Commitment, Planner, PlannerState, Task};
use std::hint::black_box;

fn timetable() -> PlannerState {
    let days = ["Mon", "Tue", "Wed", "Thu", "Fri"];
    let slots = [("08:00", "09:30"), ("10:00", "12:00"), ("13:00", "14:30"), ("15:00", "17:00")];
    let classes = days
        .iter()
        .flat_map(|day| slots.iter().map(move |(s, e)| (day, s, e)))
        .enumerate()
        .map(|(i, (day, s, e))| Commitment::new(format!("c{i}"), format!("class {i}"), *day, *s, *e))
        .collect();

    let now = Utc.with_ymd_and_hms(2026, 3, 16, 7, 0, 0).unwrap();
    let tasks = (0..40)
        .map(|i| {
            Task::new(
                format!("t{i}"),
                format!("task {i}"),
                1.0 + (i % 6) as f64,
                now + Duration::hours(6 + i * 3),
                now - Duration::hours(i),
            )
        })
        .collect();

    PlannerState::new(classes, tasks)
}

fn bench_planning(c: &mut Criterion) {
    let state = timetable();
    let planner = Planner::default();
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 7, 0, 0).unwrap();

    c.bench_function("free_slots_20_classes", |b| {
        b.iter(|| planner.compute_free_slots(black_box(&state.classes), black_box(now)))
    });

    c.bench_function("auto_plan_40_tasks", |b| {
        b.iter(|| planner.auto_plan(black_box(&state), black_box(now)))
    });
}

criterion_group!(benches, bench_planning);
criterion_main!(benches);
