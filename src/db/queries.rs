use crate::errors::{AppError, AppResult};
use crate::models::entry::{Entry, EntryDraft};
use crate::models::task::{NewTask, Task, TaskGroup};
use crate::utils::duration;
use chrono::{Duration, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::BTreeMap;

fn date_from_sql(date_str: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })
}

fn date_to_sql(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ------------------------------------------------
// Tasks
// ------------------------------------------------

pub fn map_task_row(row: &Row) -> Result<Task> {
    let group_str: String = row.get("task_group")?;
    let group = TaskGroup::from_db_str(&group_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Task {
        id: row.get("id")?,
        name: row.get("name")?,
        row: row.get("sheet_row")?,
        archived: row.get::<_, i32>("archived")? == 1,
        group,
        genre: row.get("genre")?,
    })
}

/// Every task, archived or not, in sheet order.
pub fn load_tasks(conn: &Connection) -> AppResult<Vec<Task>> {
    let mut stmt = conn.prepare("SELECT * FROM tasks ORDER BY sheet_row ASC, id ASC")?;
    let rows = stmt.query_map([], map_task_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Non-archived tasks in sheet order.
pub fn load_active_tasks(conn: &Connection) -> AppResult<Vec<Task>> {
    let mut stmt =
        conn.prepare("SELECT * FROM tasks WHERE archived = 0 ORDER BY sheet_row ASC, id ASC")?;
    let rows = stmt.query_map([], map_task_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_task_by_name(conn: &Connection, name: &str) -> AppResult<Option<Task>> {
    let task = conn
        .query_row("SELECT * FROM tasks WHERE name = ?1", [name], map_task_row)
        .optional()?;
    Ok(task)
}

/// Bulk update of existing tasks plus bulk insert of new ones, as one
/// transaction: either every change lands or none does.
pub fn apply_task_changes(
    conn: &mut Connection,
    updates: &[Task],
    creates: &[NewTask],
) -> AppResult<()> {
    let tx = conn.transaction()?;
    {
        let mut update = tx.prepare_cached(
            "UPDATE tasks
             SET sheet_row = ?1, archived = ?2, task_group = ?3, genre = ?4
             WHERE id = ?5",
        )?;
        for t in updates {
            update.execute(params![
                t.row,
                if t.archived { 1 } else { 0 },
                t.group.to_db_str(),
                t.genre,
                t.id,
            ])?;
        }

        let mut insert = tx.prepare_cached(
            "INSERT INTO tasks (name, sheet_row, archived, task_group, genre)
             VALUES (?1, ?2, 0, ?3, ?4)",
        )?;
        for t in creates {
            insert.execute(params![t.name, t.row, t.group.to_db_str(), t.genre])?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// Summed durations and entry count of one task, over all time or up to
/// `max_date` inclusive.
pub fn task_totals(
    conn: &Connection,
    task_id: i64,
    max_date: Option<NaiveDate>,
) -> AppResult<(Duration, usize)> {
    let (sum, count): (Option<i64>, i64) = match max_date {
        Some(d) => conn.query_row(
            "SELECT SUM(duration_secs), COUNT(*) FROM entries
             WHERE task_id = ?1 AND date <= ?2",
            params![task_id, date_to_sql(&d)],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?,
        None => conn.query_row(
            "SELECT SUM(duration_secs), COUNT(*) FROM entries WHERE task_id = ?1",
            [task_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?,
    };

    let total = sum.and_then(Duration::try_seconds).unwrap_or_else(Duration::zero);
    Ok((total, count.max(0) as usize))
}

/// All-time average duration of one task: summed durations over the
/// number of its entries. Zero when nothing has a duration yet.
pub fn task_average(conn: &Connection, task_id: i64) -> AppResult<Duration> {
    let (total, count) = task_totals(conn, task_id, None)?;
    if total <= Duration::zero() {
        return Ok(Duration::zero());
    }
    Ok(duration::average(total, count))
}

// ------------------------------------------------
// Entries
// ------------------------------------------------

const ENTRY_SELECT: &str = "SELECT e.id, e.task_id, t.name, t.sheet_row,
                                   e.duration_secs, e.date, e.progress
                            FROM entries e
                            JOIN tasks t ON t.id = e.task_id";

pub fn map_entry_row(row: &Row) -> Result<Entry> {
    let secs: Option<i64> = row.get(4)?;
    Ok(Entry {
        id: row.get(0)?,
        task_id: row.get(1)?,
        task_name: row.get(2)?,
        task_row: row.get(3)?,
        duration: secs.map(Duration::seconds),
        date: date_from_sql(row.get(5)?)?,
        progress: row.get(6)?,
    })
}

pub fn load_entries_by_date(conn: &Connection, date: &NaiveDate) -> AppResult<Vec<Entry>> {
    let sql = format!("{ENTRY_SELECT} WHERE e.date = ?1 ORDER BY t.sheet_row ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([date_to_sql(date)], map_entry_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_entry(conn: &Connection, task_id: i64, date: &NaiveDate) -> AppResult<Option<Entry>> {
    let sql = format!("{ENTRY_SELECT} WHERE e.task_id = ?1 AND e.date = ?2");
    let entry = conn
        .query_row(&sql, params![task_id, date_to_sql(date)], map_entry_row)
        .optional()?;
    Ok(entry)
}

/// Entries with a duration but no progress yet, oldest first.
pub fn load_pending_progress(conn: &Connection) -> AppResult<Vec<Entry>> {
    let sql = format!(
        "{ENTRY_SELECT} WHERE e.progress IS NULL AND e.duration_secs IS NOT NULL
         ORDER BY e.date ASC, e.id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_entry_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Store progress for an entry that has none. Returns false when the
/// entry already had a value (it is never overwritten).
pub fn set_progress(conn: &Connection, entry_id: i64, progress: f64) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE entries SET progress = ?1 WHERE id = ?2 AND progress IS NULL",
        params![progress, entry_id],
    )?;
    Ok(changed == 1)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpsertStats {
    pub created: usize,
    pub updated: usize,
}

/// Create or correct one entry per draft, in one transaction. A
/// correction only touches the duration; progress stays as it was.
pub fn upsert_entries(conn: &mut Connection, drafts: &[EntryDraft]) -> AppResult<UpsertStats> {
    let mut stats = UpsertStats::default();
    let tx = conn.transaction()?;
    {
        let mut find = tx.prepare_cached("SELECT id FROM entries WHERE task_id = ?1 AND date = ?2")?;
        let mut insert = tx.prepare_cached(
            "INSERT INTO entries (task_id, duration_secs, date) VALUES (?1, ?2, ?3)
             ON CONFLICT(task_id, date) DO NOTHING",
        )?;
        let mut update = tx.prepare_cached("UPDATE entries SET duration_secs = ?1 WHERE id = ?2")?;

        for d in drafts {
            let date = date_to_sql(&d.date);
            let secs = d.duration.num_seconds();
            let existing: Option<i64> = find
                .query_row(params![d.task_id, date], |row| row.get(0))
                .optional()?;

            match existing {
                Some(id) => {
                    update.execute(params![secs, id])?;
                    stats.updated += 1;
                }
                None => {
                    stats.created += insert.execute(params![d.task_id, secs, date])?;
                }
            }
        }
    }
    tx.commit()?;
    Ok(stats)
}

/// Per-date duration totals of every entry whose task is in `group`,
/// skipping entries without a duration.
pub fn daily_totals(conn: &Connection, group: TaskGroup) -> AppResult<BTreeMap<NaiveDate, Duration>> {
    let mut stmt = conn.prepare(
        "SELECT e.date, SUM(e.duration_secs)
         FROM entries e
         JOIN tasks t ON t.id = e.task_id
         WHERE t.task_group = ?1 AND e.duration_secs IS NOT NULL
         GROUP BY e.date
         ORDER BY e.date ASC",
    )?;
    let rows = stmt.query_map([group.to_db_str()], |row| {
        let date = date_from_sql(row.get(0)?)?;
        let secs: i64 = row.get(1)?;
        Ok((date, Duration::seconds(secs)))
    })?;

    let mut out = BTreeMap::new();
    for r in rows {
        let (date, total) = r?;
        out.insert(date, total);
    }
    Ok(out)
}
