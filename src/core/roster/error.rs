//! Error types for roster validation and persistence

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// One reason a candidate student record was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// Name was empty after trimming
    #[error("Name is required")]
    MissingName,
    /// ID was empty after trimming
    #[error("ID is required")]
    MissingId,
    /// No subject with a non-blank name was entered
    #[error("At least one subject is required")]
    NoGrades,
    /// Subject name contains a comma, which the stored subject list cannot hold
    #[error("Subject '{subject}' cannot contain a comma")]
    SubjectHasComma {
        /// Offending subject name
        subject: String,
    },
    /// A score fell outside 0..=100
    #[error("Grade for '{subject}' must be between 0 and 100")]
    ScoreOutOfRange {
        /// Subject carrying the bad score
        subject: String,
    },
    /// Attendance exceeded the number of days in a year
    #[error("Attendance must be between 0 and 365")]
    AttendanceOutOfRange,
}

/// All reasons a candidate was rejected, in check order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_failures(.failures))]
pub struct ValidationError {
    /// Every failed check; never empty
    pub failures: Vec<ValidationFailure>,
}

impl ValidationError {
    /// True if `failure` is among the reported failures
    #[must_use]
    pub fn contains(&self, failure: &ValidationFailure) -> bool {
        self.failures.contains(failure)
    }
}

fn join_failures(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure computing a derived metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// Average requested over zero grades
    #[error("Cannot average an empty set of grades")]
    DivisionUndefined,
}

/// Errors returned by roster store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Candidate failed validation; nothing was written
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Derived metric could not be computed
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    /// Another row already uses this ID (only when uniqueness is enforced)
    #[error("A student with ID '{0}' already exists")]
    DuplicateId(String),

    /// Row index does not exist in the roster
    #[error("Row {index} is out of range (roster has {len} rows)")]
    RowOutOfRange {
        /// Requested zero-based index
        index: usize,
        /// Number of rows in the roster
        len: usize,
    },

    /// A loaded row could not be parsed back into an editable record
    #[error("Row {index} cannot be edited: {reason}")]
    UnreadableRow {
        /// Zero-based roster index
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A stored row could not be interpreted
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow {
        /// One-based line number in the backing file
        line: u64,
        /// What was wrong with it
        reason: String,
    },

    /// Backing file could not be opened, read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Backing file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// CSV encoding or decoding failed
    #[error("CSV error on {}: {source}", .path.display())]
    Csv {
        /// Backing file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: csv::Error,
    },
}

/// Result alias for roster store operations
pub type Result<T> = std::result::Result<T, StoreError>;
