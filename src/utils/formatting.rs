//! Formatting utilities used for CLI and report outputs.

use crate::utils::jalali::JalaliDate;
use chrono::NaiveDate;

/// Jalali `YYYY/MM/DD` rendering of a stored (Gregorian) date.
/// Falls back to ISO format outside the supported calendar range.
pub fn format_date(date: NaiveDate) -> String {
    match JalaliDate::from_gregorian(date) {
        Some(j) => j.to_string(),
        None => date.format("%Y-%m-%d").to_string(),
    }
}

/// Label for a week window, collapsing the parts shared by both ends:
/// `1403/1 4 - 10`, `1403 1/25 - 2/3` or `1402/12/27 - 1403/01/03`.
pub fn format_week(start: JalaliDate, end: JalaliDate) -> String {
    let (start, end) = (start.min(end), start.max(end));

    if start.year == end.year && start.month == end.month {
        format!("{}/{} {} - {}", start.year, start.month, start.day, end.day)
    } else if start.year == end.year {
        format!(
            "{} {}/{} - {}/{}",
            start.year, start.month, start.day, end.month, end.day
        )
    } else {
        format!("{} - {}", start, end)
    }
}

pub fn format_month(date: JalaliDate) -> String {
    format!("{:04}/{:02}", date.year, date.month)
}
