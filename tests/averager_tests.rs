use chrono::Duration;
use rtaskledger::core::averager::{
    DailyTotals, compute_all, daily_average, monthly_windows, period_average, weekly_windows,
};
use rtaskledger::errors::AppError;
use rtaskledger::models::period::{Cohort, Period};
use rtaskledger::models::task::TaskGroup;

mod common;
use common::{add_entry, add_task, date, memory_pool};

fn totals(days: &[(&str, i64)]) -> DailyTotals {
    days.iter()
        .map(|(d, m)| (date(d), Duration::minutes(*m)))
        .collect()
}

fn every_day(from: &str, to: &str, minutes: i64) -> DailyTotals {
    let (mut d, end) = (date(from), date(to));
    let mut out = DailyTotals::new();
    while d <= end {
        out.insert(d, Duration::minutes(minutes));
        d += Duration::days(1);
    }
    out
}

#[test]
fn test_short_history_scales_the_daily_average() {
    let t = totals(&[
        ("2024-10-01", 30),
        ("2024-10-02", 40),
        ("2024-10-03", 50),
        ("2024-10-04", 60),
        ("2024-10-05", 70),
    ]);

    assert_eq!(daily_average(&t), Some(Duration::minutes(50)));
    assert_eq!(weekly_windows(&t).unwrap(), None);
    assert_eq!(
        period_average(&t, Cohort::Primary, Period::Weekly).unwrap(),
        Duration::minutes(350)
    );
    assert_eq!(
        period_average(&t, Cohort::Primary, Period::Monthly).unwrap(),
        Duration::minutes(1500)
    );
}

#[test]
fn test_one_complete_week_equals_its_sum() {
    // Fri 09-27 falls before the first Saturday and is left out.
    let t = totals(&[
        ("2024-09-27", 600),
        ("2024-09-28", 60),
        ("2024-10-02", 120),
        ("2024-10-04", 180),
    ]);

    let weeks = weekly_windows(&t).unwrap().unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].start, date("2024-09-28"));
    assert_eq!(weeks[0].end, date("2024-10-04"));
    assert_eq!(weeks[0].label, "1403/7 7 - 13");

    assert_eq!(
        period_average(&t, Cohort::Primary, Period::Weekly).unwrap(),
        Duration::hours(6)
    );
}

#[test]
fn test_two_complete_weeks_are_averaged() {
    let t = totals(&[
        ("2024-09-27", 300),
        ("2024-09-28", 60),
        ("2024-10-03", 60),
        ("2024-10-05", 240),
        ("2024-10-11", 120),
        ("2024-10-12", 180),
    ]);

    let weeks = weekly_windows(&t).unwrap().unwrap();
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0].total, Duration::hours(2));
    assert_eq!(weeks[1].total, Duration::hours(6));

    assert_eq!(
        period_average(&t, Cohort::Alternative, Period::Weekly).unwrap(),
        Duration::hours(4)
    );
}

#[test]
fn test_single_jalali_month_uses_the_fallback() {
    // Mehr 1403: 2024-09-22 .. 2024-10-21, 30 days
    let t = every_day("2024-09-22", "2024-10-21", 60);
    assert_eq!(t.len(), 30);

    assert_eq!(monthly_windows(&t).unwrap(), None);
    assert_eq!(
        period_average(&t, Cohort::Primary, Period::Monthly).unwrap(),
        Duration::hours(30)
    );
}

#[test]
fn test_complete_jalali_months_are_averaged() {
    let t = totals(&[
        // Shahrivar 20: after the 15th, so counting starts at Mehr
        ("2024-09-10", 6000),
        // Mehr 1 and Mehr 20
        ("2024-09-22", 120),
        ("2024-10-11", 240),
        // Aban 5
        ("2024-10-26", 180),
        // Azar 3: only marks the end of the history
        ("2024-11-23", 600),
    ]);

    let months = monthly_windows(&t).unwrap().unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].label, "1403/07");
    assert_eq!(months[0].start, date("2024-09-22"));
    assert_eq!(months[0].end, date("2024-10-21"));
    assert_eq!(months[0].total, Duration::hours(6));
    assert_eq!(months[1].label, "1403/08");
    assert_eq!(months[1].total, Duration::hours(3));

    assert_eq!(
        period_average(&t, Cohort::Primary, Period::Monthly).unwrap(),
        Duration::minutes(270)
    );
}

#[test]
fn test_empty_history_is_an_error() {
    let t = DailyTotals::new();
    let err = period_average(&t, Cohort::Primary, Period::Daily).unwrap_err();
    assert!(matches!(err, AppError::NoHistory { .. }));
}

#[test]
fn test_compute_all_per_cohort() {
    let mut pool = memory_pool();
    let write = add_task(&mut pool, "Write", 2, TaskGroup::Productive);
    let read = add_task(&mut pool, "Read", 3, TaskGroup::Productive);
    let walk = add_task(&mut pool, "Walk", 5, TaskGroup::Alternative);
    let stats = add_task(&mut pool, "Stats", 8, TaskGroup::Analytical);

    add_entry(&mut pool, write, "2024-10-01", 60);
    add_entry(&mut pool, read, "2024-10-01", 30);
    add_entry(&mut pool, write, "2024-10-02", 30);
    add_entry(&mut pool, walk, "2024-10-01", 20);
    add_entry(&mut pool, stats, "2024-10-01", 999);

    let all = compute_all(&pool).unwrap();
    assert_eq!(all.len(), 6);

    let get = |c: Cohort, p: Period| {
        all.iter()
            .find(|a| a.cohort == c && a.period == p)
            .map(|a| a.average)
            .unwrap()
    };
    // (90 + 30) / 2 dates
    assert_eq!(get(Cohort::Primary, Period::Daily), Duration::minutes(60));
    assert_eq!(get(Cohort::Primary, Period::Weekly), Duration::minutes(420));
    assert_eq!(get(Cohort::Alternative, Period::Daily), Duration::minutes(20));
    assert_eq!(get(Cohort::Alternative, Period::Monthly), Duration::minutes(600));
}

#[test]
fn test_compute_all_without_history_fails() {
    let pool = memory_pool();
    let err = compute_all(&pool).unwrap_err();
    assert!(matches!(err, AppError::NoHistory { .. }));
}
