//! Candidate record validation

use super::error::{ValidationError, ValidationFailure};
use crate::core::models::StudentRecord;

/// Highest score a subject can carry
pub const MAX_SCORE: f64 = 100.0;

/// Highest attendance count accepted (days in a year)
pub const MAX_ATTENDANCE: u32 = 365;

/// Check that a candidate may be persisted.
///
/// Every failed check is reported, in order: missing name, missing ID,
/// no grades, then per subject a comma in its name or an out-of-range score,
/// then attendance.
///
/// # Errors
/// Returns a [`ValidationError`] listing each failure. Nothing is mutated.
pub fn validate(candidate: &StudentRecord) -> Result<(), ValidationError> {
    let mut failures = Vec::new();

    if candidate.name.trim().is_empty() {
        failures.push(ValidationFailure::MissingName);
    }
    if candidate.id.trim().is_empty() {
        failures.push(ValidationFailure::MissingId);
    }
    if candidate.grades.is_empty() {
        failures.push(ValidationFailure::NoGrades);
    }

    for (subject, score) in candidate.grades.iter() {
        if subject.contains(',') {
            failures.push(ValidationFailure::SubjectHasComma {
                subject: subject.to_string(),
            });
        }
        if !(0.0..=MAX_SCORE).contains(&score) {
            failures.push(ValidationFailure::ScoreOutOfRange {
                subject: subject.to_string(),
            });
        }
    }

    if candidate.attendance > MAX_ATTENDANCE {
        failures.push(ValidationFailure::AttendanceOutOfRange);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { failures })
    }
}
