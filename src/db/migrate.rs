use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Task registry: one row per distinct sheet label.
fn create_tasks_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            sheet_row   INTEGER NOT NULL,
            archived    INTEGER NOT NULL DEFAULT 0,
            task_group  TEXT NOT NULL
                        CHECK(task_group IN ('productive','alternative','analytical')),
            genre       TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_group ON tasks(task_group);
        "#,
    )?;
    Ok(())
}

/// Daily entries: one row per (task, date).
fn create_entries_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            task_id        INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
            duration_secs  INTEGER,
            date           TEXT NOT NULL,
            progress       REAL,
            UNIQUE(task_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date);
        "#,
    )?;
    Ok(())
}

fn migrate_initial_schema(conn: &Connection) -> Result<()> {
    let version = "20240321_0001_tasks_entries";

    let fresh = !table_exists(conn, "tasks")? || !table_exists(conn, "entries")?;
    create_tasks_table(conn)?;
    create_entries_table(conn)?;

    if !migration_applied(conn, version)? {
        mark_applied(conn, version, "Created tasks and entries tables")?;
        if fresh {
            success(format!("Migration applied: {} → tasks/entries", version));
        }
    }
    Ok(())
}

fn migrate_add_pending_progress_index(conn: &Connection) -> Result<()> {
    let version = "20240402_0002_pending_progress_index";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_entries_pending_progress
         ON entries(progress) WHERE progress IS NULL;",
    )?;
    mark_applied(conn, version, "Added partial index for entries awaiting progress")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    migrate_initial_schema(conn)?;
    migrate_add_pending_progress_index(conn)?;
    Ok(())
}
