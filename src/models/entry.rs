use crate::utils::formatting::format_date;
use crate::utils::format_duration;
use chrono::{Duration, NaiveDate};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: i64,
    pub task_id: i64,
    pub task_name: String,           // joined from tasks.name
    pub task_row: u32,               // joined from tasks.sheet_row
    pub duration: Option<Duration>,  // ⇔ entries.duration_secs (NULL allowed)
    pub date: NaiveDate,             // ⇔ entries.date (TEXT "YYYY-MM-DD")
    pub progress: Option<f64>,       // ⇔ entries.progress (REAL, set once)
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let duration = self
            .duration
            .map(|d| format_duration(d, true))
            .unwrap_or_else(|| "--:--:--".to_string());

        write!(
            f,
            "{}:{}:{} {}",
            format_date(self.date),
            self.task_row,
            self.task_name,
            duration
        )?;

        if let Some(p) = self.progress {
            write!(f, " {}%", p)?;
        }
        Ok(())
    }
}

/// A duration read from the sheet for one task on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub task_id: i64,
    pub date: NaiveDate,
    pub duration: Duration,
}
