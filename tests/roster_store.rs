//! Integration tests for the roster store and its backing file

use std::fs;
use std::path::PathBuf;
use student_roster::models::StudentRecord;
use student_roster::roster::backing_file::{append, load_all, rewrite_all};
use student_roster::roster::{
    classify_attendance, classify_grade, compute_average, prepare_row, validate,
    AttendanceStatus, LetterGrade, MalformedRowPolicy, RosterStore, StoreError, StoreOptions,
    ValidationFailure, HEADER,
};
use tempfile::TempDir;

fn roster_file(dir: &TempDir) -> PathBuf {
    dir.path().join("students.csv")
}

#[test]
fn grade_boundaries() {
    assert_eq!(classify_grade(90.0), LetterGrade::A);
    assert_eq!(classify_grade(89.99), LetterGrade::B);
    assert_eq!(classify_grade(100.0), LetterGrade::A);
}

#[test]
fn attendance_boundaries() {
    assert_eq!(classify_attendance(90), AttendanceStatus::Excellent);
    assert_eq!(classify_attendance(89), AttendanceStatus::Good);
    assert_eq!(classify_attendance(365), AttendanceStatus::Excellent);
}

#[test]
fn average_of_two_subjects() {
    let record = StudentRecord::new("Alice", "S1", 0)
        .with_grade("Math", 80.0)
        .with_grade("Science", 90.0);
    let avg = compute_average(&record.grades).unwrap();
    assert!((avg - 85.0).abs() < f64::EPSILON);
}

#[test]
fn validate_accepts_and_rejects() {
    let alice = StudentRecord::new("Alice", "S1", 40).with_grade("Math", 75.5);
    assert!(validate(&alice).is_ok());

    let nameless = StudentRecord::new("", "S1", 40).with_grade("Math", 75.5);
    assert!(validate(&nameless)
        .unwrap_err()
        .contains(&ValidationFailure::MissingName));

    let no_grades = StudentRecord::new("Alice", "S1", 40);
    assert!(validate(&no_grades)
        .unwrap_err()
        .contains(&ValidationFailure::NoGrades));
}

#[test]
fn append_then_load_returns_same_fields() {
    let dir = TempDir::new().unwrap();
    let path = roster_file(&dir);
    let record = StudentRecord::new("Alice", "S1", 40)
        .with_grade("Math", 75.5)
        .with_grade("Science", 90.0);
    let row = prepare_row(&record).unwrap();

    append(&path, &row).unwrap();
    let rows = load_all(&path, MalformedRowPolicy::Fail).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].fields(),
        [
            "Alice",
            "S1",
            "Math, Science",
            "75.5, 90.0",
            "40",
            "Poor",
            "82.75",
            "B"
        ]
    );
}

#[test]
fn rewrite_empty_leaves_only_header() {
    let dir = TempDir::new().unwrap();
    let path = roster_file(&dir);
    let row = prepare_row(&StudentRecord::new("Alice", "S1", 40).with_grade("Math", 75.5)).unwrap();
    append(&path, &row).unwrap();

    rewrite_all(&path, &[]).unwrap();

    assert!(load_all(&path, MalformedRowPolicy::Fail).unwrap().is_empty());
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec![HEADER.join(",")]);
}

#[test]
fn loading_twice_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = roster_file(&dir);
    let mut store = RosterStore::open(&path, StoreOptions::default()).unwrap();
    store
        .submit_new_student(&StudentRecord::new("Alice", "S1", 91).with_grade("Math", 93.0))
        .unwrap();
    store
        .submit_new_student(&StudentRecord::new("Bob", "S2", 61).with_grade("Math", 61.0))
        .unwrap();

    let first = load_all(&path, MalformedRowPolicy::Fail).unwrap();
    let second = load_all(&path, MalformedRowPolicy::Fail).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, store.rows());
}

#[test]
fn filter_matches_name_or_id_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let mut store = RosterStore::open(roster_file(&dir), StoreOptions::default()).unwrap();
    store
        .submit_new_student(&StudentRecord::new("Alice", "X1", 50).with_grade("Math", 70.0))
        .unwrap();
    store
        .submit_new_student(&StudentRecord::new("Bob", "ALI99", 50).with_grade("Math", 70.0))
        .unwrap();
    store
        .submit_new_student(&StudentRecord::new("Carol", "C3", 50).with_grade("Math", 70.0))
        .unwrap();

    let visible: Vec<(usize, &str)> = store
        .list_visible("ali")
        .into_iter()
        .map(|(i, row)| (i, row.name.as_str()))
        .collect();
    assert_eq!(visible, vec![(0, "Alice"), (1, "Bob")]);

    assert_eq!(store.list_visible("  ").len(), 3);
    assert!(store.list_visible("zed").is_empty());
}

#[test]
fn reads_files_written_without_quoting_of_simple_fields() {
    let dir = TempDir::new().unwrap();
    let path = roster_file(&dir);
    fs::write(
        &path,
        "Name,ID,Subjects,Grades,Attendance,Attendance Status,Average,Final Grade\r\n\
         Dana,D4,\"Math, Art\",\"88.5, 91.0\",77,Good,89.75,B\r\n",
    )
    .unwrap();

    let store = RosterStore::open(&path, StoreOptions::default()).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.rows()[0].subjects, "Math, Art");

    let candidate = store.candidate_from_row(0).unwrap();
    assert_eq!(candidate.grades.get("Art"), Some(91.0));
    assert_eq!(candidate.attendance, 77);
}

#[test]
fn malformed_file_fails_load_by_default() {
    let dir = TempDir::new().unwrap();
    let path = roster_file(&dir);
    fs::write(
        &path,
        "Name,ID,Subjects,Grades,Attendance,Attendance Status,Average,Final Grade\n\
         Eve,E5,Math,70.0,seventy,Fair,70.00,C\n",
    )
    .unwrap();

    let err = RosterStore::open(&path, StoreOptions::default()).unwrap_err();
    assert!(matches!(err, StoreError::MalformedRow { line: 2, .. }));

    let skipping = StoreOptions {
        malformed_rows: MalformedRowPolicy::Skip,
        ..StoreOptions::default()
    };
    let store = RosterStore::open(&path, skipping).unwrap();
    assert!(store.is_empty());
}

#[test]
fn mixed_operations_keep_memory_and_file_in_sync() {
    let dir = TempDir::new().unwrap();
    let path = roster_file(&dir);
    let mut store = RosterStore::open(&path, StoreOptions::default()).unwrap();

    for (name, id) in [("Alice", "S1"), ("Bob", "S2"), ("Carol", "S3")] {
        store
            .submit_new_student(&StudentRecord::new(name, id, 70).with_grade("Math", 80.0))
            .unwrap();
    }
    store.delete_student(1).unwrap();
    store
        .submit_modified_student(
            1,
            &StudentRecord::new("Caroline", "S3", 100).with_grade("Math", 99.0),
        )
        .unwrap();
    store
        .submit_new_student(&StudentRecord::new("Dan", "S4", 10).with_grade("Math", 10.0))
        .unwrap();

    let names: Vec<&str> = store.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Caroline", "Dan"]);

    let mut reloaded = RosterStore::open(&path, StoreOptions::default()).unwrap();
    assert_eq!(reloaded.rows(), store.rows());
    reloaded.reload().unwrap();
    assert_eq!(reloaded.rows(), store.rows());
}
