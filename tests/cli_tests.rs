use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{SAMPLE_SHEET, rti, setup_test_db, temp_sheet};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(fs::metadata(&db_path).is_ok());
}

#[test]
fn test_sync_from_csv_sheet() {
    let db_path = setup_test_db("cli_sync");
    let sheet = temp_sheet("cli_sync", SAMPLE_SHEET);

    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "--csv", &sheet, "sync"])
        .assert()
        .success()
        .stdout(contains("Successful!"))
        .stdout(contains("01:30:00"));

    let content = fs::read_to_string(&sheet).unwrap();
    assert!(content.contains("Primary weekly,10:30:00"));
    assert!(content.contains("work: Write,01:30:00,,,,01:30"));

    rti()
        .args(["--db", &db_path, "tasks"])
        .assert()
        .success()
        .stdout(contains("work: Write").and(contains("Chess")));

    rti()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("reconcile").and(contains("averages")));
}

#[test]
fn test_sync_for_yesterday_accepts_loose_bools() {
    let db_path = setup_test_db("cli_sync_yesterday");
    let sheet = temp_sheet("cli_sync_yesterday", SAMPLE_SHEET);

    rti()
        .args(["--db", &db_path, "--csv", &sheet, "sync", "--today", "F"])
        .assert()
        .success()
        .stdout(contains("Successful!"));
}

#[test]
fn test_sync_rejects_bad_bool() {
    let db_path = setup_test_db("cli_bad_bool");

    rti()
        .args(["--db", &db_path, "sync", "-t", "maybe"])
        .assert()
        .failure()
        .stderr(contains("is not of type bool"));
}

#[test]
fn test_sync_with_missing_sheet_fails() {
    let db_path = setup_test_db("cli_missing_sheet");

    rti()
        .args(["--db", &db_path, "--csv", "/nonexistent/sheet.csv", "sync"])
        .assert()
        .failure()
        .stderr(contains("CSV sheet not found"));
}

#[test]
fn test_sync_with_short_layout_fails() {
    let db_path = setup_test_db("cli_short_layout");
    let sheet = temp_sheet(
        "cli_short_layout",
        &[&["Task", ""], &["Write", ""], &["", ""], &["Walk", ""], &["", ""], &["Stat", ""]],
    );

    rti()
        .args(["--db", &db_path, "--csv", &sheet, "sync"])
        .assert()
        .failure()
        .stderr(contains("Sheet layout error"));
}

#[test]
fn test_report_on_empty_database() {
    let db_path = setup_test_db("cli_report_empty");

    rti()
        .args(["--db", &db_path, "report"])
        .assert()
        .success()
        .stdout(contains("No recorded durations yet"));
}

#[test]
fn test_entries_rejects_bad_date() {
    let db_path = setup_test_db("cli_entries_bad_date");

    rti()
        .args(["--db", &db_path, "entries", "--date", "2024-13-40"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_db_check_passes_after_sync() {
    let db_path = setup_test_db("cli_db_check");
    let sheet = temp_sheet("cli_db_check", SAMPLE_SHEET);

    rti()
        .args(["--db", &db_path, "--csv", &sheet, "sync"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}
