#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Duration, NaiveDate};
use rtaskledger::db::initialize::init_db;
use rtaskledger::db::pool::DbPool;
use rtaskledger::db::queries::{apply_task_changes, find_task_by_name, upsert_entries};
use rtaskledger::models::entry::EntryDraft;
use rtaskledger::models::task::{NewTask, TaskGroup};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, with HOME pointed at a scratch directory so the
/// user's real configuration is never read.
pub fn rti() -> Command {
    let mut home: PathBuf = env::temp_dir();
    home.push("rtaskledger_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("rtaskledger");
    cmd.env("HOME", home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtaskledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Write `rows` as a CSV worksheet in the temp dir and return its path.
pub fn temp_sheet(name: &str, rows: &[&[&str]]) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sheet.csv", name));
    let content: String = rows
        .iter()
        .map(|r| format!("{}\n", r.join(",")))
        .collect();
    fs::write(&path, content).expect("write sheet");
    path.to_string_lossy().to_string()
}

/// Private in-memory database with the schema applied.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::new(":memory:").expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn labels(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| s.to_string()).collect()
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// Insert a task directly and return its id.
pub fn add_task(pool: &mut DbPool, name: &str, row: u32, group: TaskGroup) -> i64 {
    apply_task_changes(
        &mut pool.conn,
        &[],
        &[NewTask {
            name: name.to_string(),
            row,
            group,
            genre: None,
        }],
    )
    .expect("insert task");
    find_task_by_name(&pool.conn, name)
        .expect("query task")
        .expect("task exists")
        .id
}

/// Record `minutes` for a task on a date.
pub fn add_entry(pool: &mut DbPool, task_id: i64, on: &str, minutes: i64) {
    add_entry_secs(pool, task_id, on, minutes * 60);
}

/// Record `seconds` for a task on a date.
pub fn add_entry_secs(pool: &mut DbPool, task_id: i64, on: &str, seconds: i64) {
    upsert_entries(
        &mut pool.conn,
        &[EntryDraft {
            task_id,
            date: date(on),
            duration: Duration::seconds(seconds),
        }],
    )
    .expect("upsert entry");
}

/// A worksheet with two productive tasks, two alternative tasks and an
/// eight-row analytical block (rows 8-15).
pub const SAMPLE_SHEET: &[&[&str]] = &[
    &["Task", "Average", "", "Today", "", "Previous"],
    &["work: Write", "", "", "01:30", "", ""],
    &["work: Read", "00:45:00", "", "", "", ""],
    &["", "", "", "", "", ""],
    &["Walk", "", "", "00:30", "", ""],
    &["Chess", "", "", "0:00", "", ""],
    &["", "", "", "", "", ""],
    &["Primary daily", "", "", "", "", ""],
    &["Primary weekly", "", "", "", "", ""],
    &["Primary monthly", "", "", "", "", ""],
    &["Notes", "", "", "", "", ""],
    &["Notes", "", "", "", "", ""],
    &["Alternative daily", "", "", "", "", ""],
    &["Alternative weekly", "", "", "", "", ""],
    &["Alternative monthly", "", "", "", "", ""],
];
