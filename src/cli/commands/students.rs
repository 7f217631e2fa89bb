//! Student command handlers: list, add, modify, delete
//!
//! Each handler opens the roster, performs one store operation and renders
//! the outcome. Row numbers on the command line are one-based.

use super::confirm;
use crate::table;
use logger::{debug, verbose};
use student_roster::config::Config;
use student_roster::models::{Grades, StudentRecord};
use student_roster::roster::{RosterRow, RosterStore, StoreError};

/// Fields supplied for a `modify`; `None`/empty means "keep the stored value"
pub struct StudentEdit {
    /// New name
    pub name: Option<String>,
    /// New ID
    pub id: Option<String>,
    /// Replacement grades; empty keeps the stored grades
    pub grades: Vec<(String, f64)>,
    /// New attendance
    pub attendance: Option<u32>,
}

impl StudentEdit {
    /// Apply this edit on top of the stored record
    fn apply(self, mut record: StudentRecord) -> StudentRecord {
        if let Some(name) = self.name {
            record.name = name.trim().to_string();
        }
        if let Some(id) = self.id {
            record.id = id.trim().to_string();
        }
        if !self.grades.is_empty() {
            record.grades = self.grades.into_iter().collect::<Grades>();
        }
        if let Some(attendance) = self.attendance {
            record.attendance = attendance;
        }
        record
    }
}

fn open_store(config: &Config) -> Result<RosterStore, String> {
    let options = config.store_options()?;
    let path = config.roster_path();
    debug!("Opening roster {} with {options:?}", path.display());
    RosterStore::open(&path, options)
        .map_err(|e| format!("✗ Failed to load roster {}: {e}", path.display()))
}

/// Convert a one-based row number to a roster index
fn row_index(row: usize, store: &RosterStore) -> Result<usize, String> {
    row.checked_sub(1)
        .filter(|index| *index < store.len())
        .ok_or_else(|| {
            format!(
                "✗ No student at row {row} (roster has {} rows)",
                store.len()
            )
        })
}

fn describe(err: &StoreError) -> String {
    match err {
        StoreError::Validation(validation) => {
            let reasons: Vec<String> = validation
                .failures
                .iter()
                .map(|f| format!("  - {f}"))
                .collect();
            format!("✗ Student not saved:\n{}", reasons.join("\n"))
        }
        other => format!("✗ {other}"),
    }
}

fn print_row(row: &RosterRow) {
    verbose!(
        "  {} ({}): {} [{}], attendance {} ({}), average {}, grade {}",
        row.name,
        row.id,
        row.subjects,
        row.grades,
        row.attendance,
        row.attendance_status,
        row.average,
        row.final_grade
    );
}

/// Print the (optionally filtered) roster
pub fn list(config: &Config, filter: Option<&str>) -> Result<(), String> {
    let store = open_store(config)?;
    let visible = store.list_visible(filter.unwrap_or(""));

    if store.is_empty() {
        println!("No students in {}", store.path().display());
        return Ok(());
    }

    print!("{}", table::render(&visible));
    println!("\n{} of {} students shown", visible.len(), store.len());
    Ok(())
}

/// Add one student
pub fn add(config: &Config, candidate: &StudentRecord) -> Result<(), String> {
    let mut store = open_store(config)?;
    let row = store
        .submit_new_student(candidate)
        .map_err(|e| describe(&e))?;

    println!("✓ Student added successfully!");
    print_row(row);
    Ok(())
}

/// Replace the student at one-based `row` with the stored record plus `edit`
pub fn modify(config: &Config, row: usize, edit: StudentEdit) -> Result<(), String> {
    let mut store = open_store(config)?;
    let index = row_index(row, &store)?;

    let current = store
        .candidate_from_row(index)
        .map_err(|e| describe(&e))?;
    let candidate = edit.apply(current);

    let updated = store
        .submit_modified_student(index, &candidate)
        .map_err(|e| describe(&e))?;

    println!("✓ Student modified successfully!");
    print_row(updated);
    Ok(())
}

/// Delete the student at one-based `row`, asking first unless `assume_yes`
pub fn delete(config: &Config, row: usize, assume_yes: bool) -> Result<(), String> {
    let mut store = open_store(config)?;
    let index = row_index(row, &store)?;
    let id = store.get(index).map_err(|e| describe(&e))?.id.clone();

    if !assume_yes && !confirm(&format!("Are you sure you want to delete student {id}?")) {
        println!("✗ Delete cancelled");
        return Ok(());
    }

    store.delete_student(index).map_err(|e| describe(&e))?;
    println!("✓ Student deleted successfully!");
    Ok(())
}
