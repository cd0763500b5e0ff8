//! Duration codec: parses and formats the `H:M[:S]` text used in the sheet.

use chrono::Duration;
use regex::Regex;
use std::sync::LazyLock;

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9]+)\s*:\s*([0-9]+)\s*(?::\s*([0-9]+)\s*)?$").unwrap());

/// Map Persian (`۰`-`۹`) and Arabic-Indic (`٠`-`٩`) digits to ASCII.
fn ascii_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
            other => other,
        })
        .collect()
}

/// Parse `"H:M"` or `"H:M:S"` into a duration.
/// Returns `None` for blank or non-duration-shaped text, and for values
/// too large to represent.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = ascii_digits(s);
    let caps = DURATION_RE.captures(&s)?;

    let hours: i64 = caps.get(1)?.as_str().parse().ok()?;
    let minutes: i64 = caps.get(2)?.as_str().parse().ok()?;
    let seconds: i64 = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    let total = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;
    Duration::try_seconds(total)
}

/// Format a duration as `HH:MM:SS` (or `HH:MM` without seconds).
/// Hours are not wrapped at 24; sub-second parts are truncated.
pub fn format_duration(d: Duration, include_seconds: bool) -> String {
    let total = d.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if include_seconds {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", hours, minutes)
    }
}

/// Average of `total` over `count` items, at millisecond precision.
pub fn average(total: Duration, count: usize) -> Duration {
    if count == 0 {
        return Duration::zero();
    }
    Duration::milliseconds(total.num_milliseconds() / count as i64)
}
