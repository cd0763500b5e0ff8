//! Jalali (Solar Hijri) calendar support.
//!
//! Dates are stored as Gregorian `NaiveDate`s; this module is only used
//! where month boundaries or display labels must follow the Jalali
//! calendar. The conversion uses the 2820-year break table, valid for
//! Jalali years -61 ..= 3177.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;

const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Result of the break-table walk for one Jalali year.
struct YearInfo {
    /// 0 when the year is leap, otherwise years since the last leap year.
    leap: i32,
    /// Gregorian year in which the Jalali year starts.
    gy: i32,
    /// Day of March on which Farvardin 1 falls.
    march: u32,
}

fn year_info(jy: i32) -> Option<YearInfo> {
    let last = BREAKS[BREAKS.len() - 1];
    if jy < BREAKS[0] || jy >= last {
        return None;
    }

    let gy = jy + 621;
    let mut leap_j = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;

    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + (jump % 33) / 4;
        jp = jm;
    }

    let mut n = jy - jp;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Some(YearInfo {
        leap,
        gy,
        march: u32::try_from(march).ok()?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl JalaliDate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month)? {
            return None;
        }
        Some(Self { year, month, day })
    }

    pub fn from_gregorian(date: NaiveDate) -> Option<Self> {
        let mut jy = date.year() - 621;
        let info = year_info(jy)?;
        let farvardin_1 = NaiveDate::from_ymd_opt(info.gy, 3, info.march)?;

        let mut k = (date - farvardin_1).num_days() as i32;
        if k >= 0 {
            if k <= 185 {
                return Some(Self {
                    year: jy,
                    month: 1 + (k / 31) as u32,
                    day: (k % 31) as u32 + 1,
                });
            }
            k -= 186;
        } else {
            jy -= 1;
            k += 179;
            if info.leap == 1 {
                k += 1;
            }
        }

        Some(Self {
            year: jy,
            month: 7 + (k / 30) as u32,
            day: (k % 30) as u32 + 1,
        })
    }

    pub fn to_gregorian(self) -> Option<NaiveDate> {
        let info = year_info(self.year)?;
        let farvardin_1 = NaiveDate::from_ymd_opt(info.gy, 3, info.march)?;
        let m = self.month as i64;
        let offset = (m - 1) * 31 - (m / 7) * (m - 7) + self.day as i64 - 1;
        farvardin_1.checked_add_signed(Duration::days(offset))
    }

    pub fn first_of_month(self) -> Self {
        Self { day: 1, ..self }
    }

    pub fn last_of_month(self) -> Option<Self> {
        Some(Self {
            day: days_in_month(self.year, self.month)?,
            ..self
        })
    }

    /// First day of the following month.
    pub fn next_month_start(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
                day: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
                day: 1,
            }
        }
    }

    /// Last day of the preceding month.
    pub fn previous_month_end(self) -> Option<Self> {
        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        Some(Self {
            year,
            month,
            day: days_in_month(year, month)?,
        })
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

pub fn is_leap_year(year: i32) -> Option<bool> {
    year_info(year).map(|info| info.leap == 0)
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1..=6 => Some(31),
        7..=11 => Some(30),
        12 => Some(if is_leap_year(year)? { 30 } else { 29 }),
        _ => None,
    }
}
