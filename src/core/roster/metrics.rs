//! Derived metrics: average grade, letter grade and attendance status
//!
//! These are always computed from a record's current grades and attendance
//! at save time. Loaded rows carry the persisted text as-is.

use super::error::MetricsError;
use crate::core::models::{Grades, StudentRecord};
use std::fmt;

/// Final letter grade for an average score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LetterGrade {
    /// Average of 90 or more
    A,
    /// Average of 80 or more
    B,
    /// Average of 70 or more
    C,
    /// Average of 60 or more
    D,
    /// Anything lower
    F,
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        write!(f, "{letter}")
    }
}

/// Attendance classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    /// 90 days or more
    Excellent,
    /// 75 days or more
    Good,
    /// 60 days or more
    Fair,
    /// Fewer than 60 days
    Poor,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        };
        write!(f, "{label}")
    }
}

/// Arithmetic mean of all scores
///
/// # Errors
/// Returns [`MetricsError::DivisionUndefined`] when `grades` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn compute_average(grades: &Grades) -> Result<f64, MetricsError> {
    if grades.is_empty() {
        return Err(MetricsError::DivisionUndefined);
    }
    let total: f64 = grades.scores().sum();
    Ok(total / grades.len() as f64)
}

/// Classify an average, highest threshold first, each inclusive at its lower bound
#[must_use]
pub fn classify_grade(average: f64) -> LetterGrade {
    if average >= 90.0 {
        LetterGrade::A
    } else if average >= 80.0 {
        LetterGrade::B
    } else if average >= 70.0 {
        LetterGrade::C
    } else if average >= 60.0 {
        LetterGrade::D
    } else {
        LetterGrade::F
    }
}

/// Classify a count of days attended
#[must_use]
pub const fn classify_attendance(attendance: u32) -> AttendanceStatus {
    match attendance {
        90.. => AttendanceStatus::Excellent,
        75..=89 => AttendanceStatus::Good,
        60..=74 => AttendanceStatus::Fair,
        _ => AttendanceStatus::Poor,
    }
}

/// Snapshot of every derived metric for one record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    /// Mean score
    pub average: f64,
    /// Letter grade for `average`
    pub letter_grade: LetterGrade,
    /// Attendance classification
    pub attendance_status: AttendanceStatus,
}

impl DerivedMetrics {
    /// Compute all metrics for a record
    ///
    /// # Errors
    /// Returns [`MetricsError::DivisionUndefined`] if the record has no grades;
    /// callers are expected to validate first.
    pub fn compute(record: &StudentRecord) -> Result<Self, MetricsError> {
        let average = compute_average(&record.grades)?;
        Ok(Self {
            average,
            letter_grade: classify_grade(average),
            attendance_status: classify_attendance(record.attendance),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_grade_thresholds() {
        assert_eq!(classify_grade(100.0), LetterGrade::A);
        assert_eq!(classify_grade(90.0), LetterGrade::A);
        assert_eq!(classify_grade(89.99), LetterGrade::B);
        assert_eq!(classify_grade(80.0), LetterGrade::B);
        assert_eq!(classify_grade(79.99), LetterGrade::C);
        assert_eq!(classify_grade(70.0), LetterGrade::C);
        assert_eq!(classify_grade(60.0), LetterGrade::D);
        assert_eq!(classify_grade(59.99), LetterGrade::F);
        assert_eq!(classify_grade(0.0), LetterGrade::F);
    }

    #[test]
    fn test_every_average_from_90_is_an_a() {
        let mut avg = 90.0;
        while avg <= 100.0 {
            assert_eq!(classify_grade(avg), LetterGrade::A, "avg = {avg}");
            avg += 0.25;
        }
    }

    #[test]
    fn test_classify_attendance_thresholds() {
        assert_eq!(classify_attendance(365), AttendanceStatus::Excellent);
        assert_eq!(classify_attendance(90), AttendanceStatus::Excellent);
        assert_eq!(classify_attendance(89), AttendanceStatus::Good);
        assert_eq!(classify_attendance(75), AttendanceStatus::Good);
        assert_eq!(classify_attendance(74), AttendanceStatus::Fair);
        assert_eq!(classify_attendance(60), AttendanceStatus::Fair);
        assert_eq!(classify_attendance(59), AttendanceStatus::Poor);
        assert_eq!(classify_attendance(0), AttendanceStatus::Poor);

        for att in 90..=365 {
            assert_eq!(classify_attendance(att), AttendanceStatus::Excellent);
        }
    }

    #[test]
    fn test_compute_average() {
        let grades: Grades = [("Math", 80.0), ("Science", 90.0)].into_iter().collect();
        let avg = compute_average(&grades).unwrap();
        assert!((avg - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compute_average_empty_is_undefined() {
        assert_eq!(
            compute_average(&Grades::new()),
            Err(MetricsError::DivisionUndefined)
        );
    }

    #[test]
    fn test_derived_metrics_for_record() {
        let record = StudentRecord::new("Alice", "S1", 80)
            .with_grade("Math", 72.0)
            .with_grade("Art", 68.0);
        let metrics = DerivedMetrics::compute(&record).unwrap();

        assert!((metrics.average - 70.0).abs() < f64::EPSILON);
        assert_eq!(metrics.letter_grade, LetterGrade::C);
        assert_eq!(metrics.attendance_status, AttendanceStatus::Good);
    }
}
