use rtaskledger::core::reconcile::{plan, reconcile};
use rtaskledger::core::segmenter::segment;
use rtaskledger::db::queries::{find_task_by_name, load_active_tasks, load_tasks};
use rtaskledger::models::task::{Task, TaskGroup};

mod common;
use common::{labels, memory_pool};

const SHEET: &[&str] = &[
    "Task",
    "work: Write",
    "study: Read",
    "",
    "Walk",
    "",
    "Summary",
    "Summary 2",
];

#[test]
fn test_first_run_creates_tasks_with_group_and_genre() {
    let mut pool = memory_pool();
    let cells = labels(SHEET);
    let groups = segment(&cells).unwrap();

    let report = reconcile(&mut pool, &cells, &groups).unwrap();
    assert_eq!(report.created, 3);
    assert!(report.changed);

    let write = find_task_by_name(&pool.conn, "work: Write").unwrap().unwrap();
    assert_eq!(write.row, 2);
    assert_eq!(write.group, TaskGroup::Productive);
    assert_eq!(write.genre.as_deref(), Some("work"));

    let walk = find_task_by_name(&pool.conn, "Walk").unwrap().unwrap();
    assert_eq!(walk.row, 5);
    assert_eq!(walk.group, TaskGroup::Alternative);
    assert_eq!(walk.genre, None);

    // analytical rows never become tasks
    assert!(find_task_by_name(&pool.conn, "Summary").unwrap().is_none());
}

#[test]
fn test_second_run_is_a_noop() {
    let mut pool = memory_pool();
    let cells = labels(SHEET);
    let groups = segment(&cells).unwrap();

    reconcile(&mut pool, &cells, &groups).unwrap();
    let before = load_tasks(&pool.conn).unwrap();

    let report = reconcile(&mut pool, &cells, &groups).unwrap();
    assert_eq!(report.created, 0);
    assert_eq!(report.archived, 0);
    assert!(!report.changed);
    assert_eq!(load_tasks(&pool.conn).unwrap(), before);
}

#[test]
fn test_missing_label_is_archived_then_restored() {
    let mut pool = memory_pool();
    let full = labels(SHEET);
    reconcile(&mut pool, &full, &segment(&full).unwrap()).unwrap();

    let without_read = labels(&["Task", "work: Write", "", "Walk", "", "Summary"]);
    let report = reconcile(&mut pool, &without_read, &segment(&without_read).unwrap()).unwrap();
    assert_eq!(report.archived, 1);

    let read = find_task_by_name(&pool.conn, "study: Read").unwrap().unwrap();
    assert!(read.archived);
    let walk = find_task_by_name(&pool.conn, "Walk").unwrap().unwrap();
    assert_eq!(walk.row, 4);
    assert_eq!(load_active_tasks(&pool.conn).unwrap().len(), 2);

    let report = reconcile(&mut pool, &full, &segment(&full).unwrap()).unwrap();
    assert_eq!(report.restored, 1);
    assert_eq!(report.created, 0);

    let read = find_task_by_name(&pool.conn, "study: Read").unwrap().unwrap();
    assert!(!read.archived);
    assert_eq!(read.row, 3);
}

#[test]
fn test_task_moving_between_groups() {
    let mut pool = memory_pool();
    let full = labels(SHEET);
    reconcile(&mut pool, &full, &segment(&full).unwrap()).unwrap();

    let moved = labels(&["Task", "work: Write", "", "study: Read", "Walk", "", "Summary"]);
    reconcile(&mut pool, &moved, &segment(&moved).unwrap()).unwrap();

    let read = find_task_by_name(&pool.conn, "study: Read").unwrap().unwrap();
    assert_eq!(read.group, TaskGroup::Alternative);
    assert_eq!(read.row, 4);
}

#[test]
fn test_genre_filled_only_when_empty() {
    let cells = labels(SHEET);
    let groups = segment(&cells).unwrap();
    let existing = vec![
        Task {
            id: 1,
            name: "work: Write".into(),
            row: 9,
            archived: false,
            group: TaskGroup::Productive,
            genre: None,
        },
        Task {
            id: 2,
            name: "study: Read".into(),
            row: 3,
            archived: false,
            group: TaskGroup::Productive,
            genre: Some("legacy".into()),
        },
    ];

    let p = plan(&cells, &groups, existing);
    assert_eq!(p.updates[0].genre.as_deref(), Some("work"));
    assert_eq!(p.updates[0].row, 2);
    assert_eq!(p.updates[1].genre.as_deref(), Some("legacy"));
    assert_eq!(p.creates.len(), 1);
    assert_eq!(p.creates[0].name, "Walk");
}

#[test]
fn test_repeated_new_label_keeps_last_row() {
    let cells = labels(&["Task", "Walk", "Read", "Walk", "", "Chess", "", "Summary"]);
    let groups = segment(&cells).unwrap();

    let p = plan(&cells, &groups, Vec::new());
    assert_eq!(p.creates.len(), 3);
    let walk = p.creates.iter().find(|t| t.name == "Walk").unwrap();
    assert_eq!(walk.row, 4);
}
