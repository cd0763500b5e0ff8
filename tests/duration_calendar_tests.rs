use chrono::{Duration, Weekday};
use rtaskledger::utils::date::{last_weekday, next_weekday};
use rtaskledger::utils::formatting::{format_date, format_month, format_week};
use rtaskledger::utils::jalali::{JalaliDate, days_in_month, is_leap_year};
use rtaskledger::utils::{format_duration, parse_duration};

mod common;
use common::date;

#[test]
fn test_parse_and_format_hours_minutes() {
    let d = parse_duration("02:15").unwrap();
    assert_eq!(d, Duration::minutes(135));
    assert_eq!(format_duration(d, true), "02:15:00");
    assert_eq!(format_duration(d, false), "02:15");
}

#[test]
fn test_parse_with_seconds_and_whitespace() {
    assert_eq!(parse_duration(" 1:05:30 "), Some(Duration::seconds(3930)));
    assert_eq!(parse_duration("0:00"), Some(Duration::zero()));
}

#[test]
fn test_parse_rejects_malformed_text() {
    assert_eq!(parse_duration(""), None);
    assert_eq!(parse_duration("   "), None);
    assert_eq!(parse_duration("abc"), None);
    assert_eq!(parse_duration("12"), None);
    assert_eq!(parse_duration("1:2:3:4"), None);
    assert_eq!(parse_duration("-1:00"), None);
    assert_eq!(parse_duration("1:x5"), None);
}

#[test]
fn test_parse_rejects_out_of_range_values() {
    // representable as i64 seconds, too large for a duration
    assert_eq!(parse_duration("99999999999999:00"), None);
    // overflows the hours-to-seconds multiplication
    assert_eq!(parse_duration("9223372036854775807:00"), None);
    // does not fit in i64 at all
    assert_eq!(parse_duration("99999999999999999999:00"), None);
    assert_eq!(parse_duration("1:99999999999999999"), None);
}

#[test]
fn test_parse_persian_and_arabic_digits() {
    assert_eq!(parse_duration("۰۲:۱۵"), Some(Duration::minutes(135)));
    assert_eq!(parse_duration("٠١:٣٠:٠٥"), Some(Duration::seconds(5405)));
    // other non-ASCII digits are still rejected
    assert_eq!(parse_duration("१:३०"), None);
}

#[test]
fn test_format_does_not_wrap_hours() {
    assert_eq!(format_duration(Duration::hours(45), true), "45:00:00");
    assert_eq!(format_duration(Duration::milliseconds(90_999), true), "00:01:30");
}

#[test]
fn test_jalali_new_year_boundaries() {
    assert_eq!(
        JalaliDate::from_gregorian(date("2024-03-20")),
        JalaliDate::new(1403, 1, 1)
    );
    assert_eq!(
        JalaliDate::from_gregorian(date("2025-03-20")),
        JalaliDate::new(1403, 12, 30)
    );
    assert_eq!(
        JalaliDate::from_gregorian(date("2025-03-21")),
        JalaliDate::new(1404, 1, 1)
    );
    assert_eq!(
        JalaliDate::from_gregorian(date("2024-09-22")),
        JalaliDate::new(1403, 7, 1)
    );
}

#[test]
fn test_jalali_back_to_gregorian() {
    let mehr_1 = JalaliDate::new(1403, 7, 1).unwrap();
    assert_eq!(mehr_1.to_gregorian(), Some(date("2024-09-22")));

    let esfand_30 = JalaliDate::new(1403, 12, 30).unwrap();
    assert_eq!(esfand_30.to_gregorian(), Some(date("2025-03-20")));
}

#[test]
fn test_jalali_month_lengths() {
    assert_eq!(is_leap_year(1403), Some(true));
    assert_eq!(is_leap_year(1404), Some(false));
    assert_eq!(days_in_month(1403, 6), Some(31));
    assert_eq!(days_in_month(1403, 7), Some(30));
    assert_eq!(days_in_month(1403, 12), Some(30));
    assert_eq!(days_in_month(1404, 12), Some(29));
    assert_eq!(JalaliDate::new(1404, 12, 30), None);
}

#[test]
fn test_jalali_month_navigation() {
    let d = JalaliDate::new(1403, 12, 10).unwrap();
    assert_eq!(d.next_month_start(), JalaliDate::new(1404, 1, 1).unwrap());
    assert_eq!(d.last_of_month(), JalaliDate::new(1403, 12, 30));

    let d = JalaliDate::new(1404, 1, 5).unwrap();
    assert_eq!(d.previous_month_end(), JalaliDate::new(1403, 12, 30));
}

#[test]
fn test_persian_week_helpers() {
    // 2024-10-01 is a Tuesday
    let tue = date("2024-10-01");
    assert_eq!(last_weekday(Weekday::Fri, tue), date("2024-09-27"));
    assert_eq!(next_weekday(Weekday::Sat, tue), date("2024-10-05"));

    let fri = date("2024-10-04");
    assert_eq!(last_weekday(Weekday::Fri, fri), fri);
}

#[test]
fn test_jalali_labels() {
    assert_eq!(format_date(date("2024-03-20")), "1403/01/01");

    let start = JalaliDate::new(1403, 7, 7).unwrap();
    let end = JalaliDate::new(1403, 7, 13).unwrap();
    assert_eq!(format_week(start, end), "1403/7 7 - 13");

    let start = JalaliDate::new(1403, 7, 28).unwrap();
    let end = JalaliDate::new(1403, 8, 4).unwrap();
    assert_eq!(format_week(start, end), "1403 7/28 - 8/4");

    assert_eq!(format_month(start), "1403/07");
}
