use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Persian week: Saturday → Friday.
pub const WEEK_START: Weekday = Weekday::Sat;
pub const WEEK_END: Weekday = Weekday::Fri;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn yesterday() -> NaiveDate {
    today() - Duration::days(1)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Most recent `weekday` on or before `from`.
pub fn last_weekday(weekday: Weekday, from: NaiveDate) -> NaiveDate {
    let back = (from.weekday().num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
    from - Duration::days(back as i64)
}

/// First `weekday` on or after `from`.
pub fn next_weekday(weekday: Weekday, from: NaiveDate) -> NaiveDate {
    let ahead = (weekday.num_days_from_monday() + 7 - from.weekday().num_days_from_monday()) % 7;
    from + Duration::days(ahead as i64)
}
