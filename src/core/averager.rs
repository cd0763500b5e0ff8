//! Calendar-aligned average durations per cohort.
//!
//! Weeks run Saturday → Friday. Months follow the Jalali calendar. Both
//! only count complete periods inside the observed history; when the
//! history is too short to hold one, the daily average is scaled by
//! [`Period::fallback_days`] instead.

use crate::db::pool::DbPool;
use crate::db::queries::daily_totals;
use crate::errors::{AppError, AppResult};
use crate::models::period::{Cohort, Period};
use crate::utils::date::{WEEK_END, WEEK_START, last_weekday, next_weekday};
use crate::utils::duration;
use crate::utils::formatting::{format_month, format_week};
use crate::utils::jalali::JalaliDate;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Summed durations per calendar date.
pub type DailyTotals = BTreeMap<NaiveDate, Duration>;

/// One complete week or month and what was recorded in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total: Duration,
    pub label: String,
}

fn jalali(date: NaiveDate) -> AppResult<JalaliDate> {
    JalaliDate::from_gregorian(date)
        .ok_or_else(|| AppError::InvalidDate(format!("{date} is outside the Jalali calendar range")))
}

fn gregorian(date: JalaliDate) -> AppResult<NaiveDate> {
    date.to_gregorian()
        .ok_or_else(|| AppError::InvalidDate(format!("{date} is outside the Jalali calendar range")))
}

fn sum_between(totals: &DailyTotals, start: NaiveDate, end: NaiveDate) -> Duration {
    totals
        .range(start..=end)
        .fold(Duration::zero(), |acc, (_, d)| acc + *d)
}

fn bounds(totals: &DailyTotals) -> Option<(NaiveDate, NaiveDate)> {
    let first = *totals.keys().next()?;
    let last = *totals.keys().next_back()?;
    Some((first, last))
}

/// Sum of all durations over the number of dates that have any.
pub fn daily_average(totals: &DailyTotals) -> Option<Duration> {
    if totals.is_empty() {
        return None;
    }
    let sum = totals.values().fold(Duration::zero(), |acc, d| acc + *d);
    Some(duration::average(sum, totals.len()))
}

/// Complete Saturday → Friday weeks between the first observed date and
/// the last Friday on or before the last observed date. `None` when that
/// span is shorter than 7 days.
pub fn weekly_windows(totals: &DailyTotals) -> AppResult<Option<Vec<Window>>> {
    let Some((first, last_seen)) = bounds(totals) else {
        return Ok(None);
    };

    let last = last_weekday(WEEK_END, last_seen);
    if last < first || (last - first).num_days() < 7 {
        return Ok(None);
    }

    let mut windows = Vec::new();
    let mut start = next_weekday(WEEK_START, first);
    while start <= last {
        let end = start + Duration::days(6);
        windows.push(Window {
            start,
            end,
            total: sum_between(totals, start, end),
            label: format_week(jalali(start)?, jalali(end)?),
        });
        start += Duration::days(7);
    }
    Ok(Some(windows))
}

/// Complete Jalali months between the normalized first month and the
/// month before the last observed date.
///
/// The first date snaps to the 1st of its month, or to the 1st of the
/// next month when it falls after the 15th. `None` unless the first
/// month is strictly before the last one.
pub fn monthly_windows(totals: &DailyTotals) -> AppResult<Option<Vec<Window>>> {
    let Some((first_seen, last_seen)) = bounds(totals) else {
        return Ok(None);
    };

    let jf = jalali(first_seen)?;
    let first = if jf.day > 15 {
        jf.next_month_start()
    } else {
        jf.first_of_month()
    };
    let last = jalali(last_seen)?
        .previous_month_end()
        .ok_or_else(|| AppError::InvalidDate(format!("no month before {last_seen}")))?;

    if (first.year, first.month) >= (last.year, last.month) {
        return Ok(None);
    }

    let mut windows = Vec::new();
    let mut month = first;
    while month <= last {
        let month_end = month
            .last_of_month()
            .ok_or_else(|| AppError::InvalidDate(format!("invalid Jalali month {month}")))?;
        let (start, end) = (gregorian(month)?, gregorian(month_end)?);
        windows.push(Window {
            start,
            end,
            total: sum_between(totals, start, end),
            label: format_month(month),
        });
        month = month.next_month_start();
    }
    Ok(Some(windows))
}

fn windows_average(windows: &[Window]) -> Duration {
    let sum = windows.iter().fold(Duration::zero(), |acc, w| acc + w.total);
    duration::average(sum, windows.len())
}

/// Average duration of one period for one cohort's history.
/// An empty history is an error: there is nothing to average.
pub fn period_average(totals: &DailyTotals, cohort: Cohort, period: Period) -> AppResult<Duration> {
    let daily = daily_average(totals).ok_or_else(|| AppError::NoHistory {
        cohort: cohort.to_string(),
        period: period.to_string(),
    })?;

    let windows = match period {
        Period::Daily => return Ok(daily),
        Period::Weekly => weekly_windows(totals)?,
        Period::Monthly => monthly_windows(totals)?,
    };

    match windows {
        Some(w) if !w.is_empty() => Ok(windows_average(&w)),
        _ => Ok(daily * period.fallback_days()),
    }
}

/// One computed summary value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CohortAverage {
    pub cohort: Cohort,
    pub period: Period,
    pub average: Duration,
}

/// All six (cohort × period) averages from the stored history.
pub fn compute_all(pool: &DbPool) -> AppResult<Vec<CohortAverage>> {
    let mut out = Vec::new();
    for cohort in Cohort::ALL {
        let totals = daily_totals(&pool.conn, cohort.group())?;
        for period in Period::ALL {
            out.push(CohortAverage {
                cohort,
                period,
                average: period_average(&totals, cohort, period)?,
            });
        }
    }
    Ok(out)
}
