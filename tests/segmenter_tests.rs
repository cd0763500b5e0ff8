use rtaskledger::core::segmenter::{RowRange, segment};
use rtaskledger::errors::AppError;
use rtaskledger::models::task::TaskGroup;

mod common;
use common::labels;

#[test]
fn test_three_groups_from_blank_separators() {
    let groups = segment(&labels(&["Task", "A", "B", "", "C", "", "D"])).unwrap();

    assert_eq!(groups.productive, RowRange { first: 2, last: 3 });
    assert_eq!(groups.alternative, RowRange { first: 5, last: 5 });
    assert_eq!(groups.analytical, RowRange { first: 7, last: 7 });
}

#[test]
fn test_group_of_row() {
    let groups = segment(&labels(&["Task", "A", "B", "", "C", "", "D"])).unwrap();

    assert_eq!(groups.group_of(2), Some(TaskGroup::Productive));
    assert_eq!(groups.group_of(5), Some(TaskGroup::Alternative));
    assert_eq!(groups.group_of(7), Some(TaskGroup::Analytical));
    assert_eq!(groups.group_of(4), None);
    assert_eq!(groups.group_of(1), None);
}

#[test]
fn test_fewer_than_three_groups_is_layout_error() {
    let err = segment(&labels(&["Task", "A", "B", "", "C"])).unwrap_err();
    assert!(matches!(err, AppError::SheetLayout(_)));

    let err = segment(&labels(&["Task"])).unwrap_err();
    assert!(matches!(err, AppError::SheetLayout(_)));
}

#[test]
fn test_runs_past_the_third_are_ignored() {
    let groups = segment(&labels(&["Task", "A", "", "B", "", "C", "", "D", "E"])).unwrap();

    assert_eq!(groups.analytical, RowRange { first: 6, last: 6 });
}

#[test]
fn test_double_blank_makes_an_empty_group() {
    let groups = segment(&labels(&["Task", "A", "", "", "C", "D"])).unwrap();

    assert_eq!(groups.productive, RowRange { first: 2, last: 2 });
    assert!(groups.alternative.is_empty());
    assert_eq!(groups.analytical, RowRange { first: 5, last: 6 });
    assert_eq!(groups.analytical.len(), 2);
}
