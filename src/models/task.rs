use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

/// The three fixed row groups of the sheet, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TaskGroup {
    Productive,
    Alternative,
    Analytical,
}

impl TaskGroup {
    /// Scan order of the groups below the header row.
    pub const ORDERED: [TaskGroup; 3] = [
        TaskGroup::Productive,
        TaskGroup::Alternative,
        TaskGroup::Analytical,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TaskGroup::Productive => "productive",
            TaskGroup::Alternative => "alternative",
            TaskGroup::Analytical => "analytical",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> AppResult<Self> {
        match s {
            "productive" => Ok(TaskGroup::Productive),
            "alternative" => Ok(TaskGroup::Alternative),
            "analytical" => Ok(TaskGroup::Analytical),
            other => Err(AppError::InvalidGroup(other.to_string())),
        }
    }
}

impl fmt::Display for TaskGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: i64,
    pub name: String,             // ⇔ tasks.name (UNIQUE)
    pub row: u32,                 // ⇔ tasks.sheet_row (1-based)
    pub archived: bool,           // ⇔ tasks.archived
    pub group: TaskGroup,         // ⇔ tasks.task_group
    pub genre: Option<String>,    // ⇔ tasks.genre (NULL when not derived)
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.name)?;
        if self.archived {
            f.write_str(" [archived]")?;
        }
        Ok(())
    }
}

/// A task seen for the first time, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub name: String,
    pub row: u32,
    pub group: TaskGroup,
    pub genre: Option<String>,
}

/// Genre prefix of a `"genre: label"` sheet label.
pub fn genre_of(label: &str) -> Option<String> {
    label
        .split_once(": ")
        .map(|(genre, _)| genre.to_string())
        .filter(|g| !g.is_empty())
}
