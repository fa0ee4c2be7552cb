//! Benchmarks for the progress engine

use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use quitstat::{
    achievements::{AchievementStats, evaluate_achievements},
    elapsed::ElapsedDuration,
    metrics::DerivedMetrics,
    milestones::{find_next_milestone, milestone_progress},
    snapshot::ProgressSnapshot,
    timezone::TimezoneConfig,
    types::{HabitProfile, QuitTimestamp, UsageCounters},
};
use std::hint::black_box;

fn profile_quit_days_ago(days: i64) -> (HabitProfile, chrono::DateTime<Utc>) {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let quit = QuitTimestamp::new(now - Duration::days(days));
    (HabitProfile::new(Some(quit), 20.0, 20.0, 10.0), now)
}

fn benchmark_elapsed(c: &mut Criterion) {
    let mut group = c.benchmark_group("elapsed");

    for days in [0, 45, 400, 3_650] {
        let (profile, now) = profile_quit_days_ago(days);
        let quit = *profile.quit_timestamp().unwrap();
        group.bench_with_input(BenchmarkId::new("between", days), &days, |b, _| {
            b.iter(|| ElapsedDuration::between(black_box(&quit), black_box(now)));
        });
    }

    let (profile, now) = profile_quit_days_ago(400);
    let quit = *profile.quit_timestamp().unwrap();
    let tz = chrono_tz::Europe::Berlin;
    group.bench_function("between_in_named_zone", |b| {
        b.iter(|| ElapsedDuration::between_in(black_box(&quit), black_box(now), &tz));
    });

    group.finish();
}

fn benchmark_metrics(c: &mut Criterion) {
    let (profile, now) = profile_quit_days_ago(400);
    let elapsed = ElapsedDuration::between(profile.quit_timestamp().unwrap(), now);

    c.bench_function("derived_metrics", |b| {
        b.iter(|| DerivedMetrics::compute(black_box(&profile), black_box(&elapsed)));
    });
}

fn benchmark_milestones_and_achievements(c: &mut Criterion) {
    let mut group = c.benchmark_group("milestones");

    group.bench_function("find_next_milestone", |b| {
        b.iter(|| find_next_milestone(black_box(100_000.0)));
    });

    group.bench_function("milestone_progress", |b| {
        b.iter(|| milestone_progress(black_box(100_000.0)).count());
    });

    let stats = AchievementStats {
        minutes_quit: 100_000.0,
        money_saved: 250.0,
        cigarettes_avoided: 1_400.0,
        milestones_reached: 6,
        breathing_exercises: Some(12),
        coping_strategies_used: Some(3),
        consecutive_days: Some(40),
    };
    group.bench_function("evaluate_achievements", |b| {
        b.iter(|| evaluate_achievements(black_box(&stats)));
    });

    group.finish();
}

fn benchmark_snapshot(c: &mut Criterion) {
    let (profile, now) = profile_quit_days_ago(400);
    let counters = UsageCounters::default();
    let timezone = TimezoneConfig::utc();

    c.bench_function("progress_snapshot", |b| {
        b.iter(|| {
            ProgressSnapshot::compute(
                black_box(&profile),
                black_box(&counters),
                black_box(now),
                &timezone,
            )
        });
    });
}

criterion_group!(
    benches,
    benchmark_elapsed,
    benchmark_metrics,
    benchmark_milestones_and_achievements,
    benchmark_snapshot
);
criterion_main!(benches);
