//! Persisted row: the eight positional text fields of one roster line

use super::metrics::DerivedMetrics;
use crate::core::models::{Grades, StudentRecord};

/// Column headers of the backing file, in order
pub const HEADER: [&str; FIELD_COUNT] = [
    "Name",
    "ID",
    "Subjects",
    "Grades",
    "Attendance",
    "Attendance Status",
    "Average",
    "Final Grade",
];

/// Number of fields in every row
pub const FIELD_COUNT: usize = 8;

/// Separator used inside the Subjects and Grades fields
pub const LIST_SEPARATOR: &str = ", ";

/// Format a score in its natural decimal form: `80.0`, `75.5`, `66.67`
#[must_use]
pub fn format_score(score: f64) -> String {
    if score.is_finite() && score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        format!("{score}")
    }
}

/// One roster line as display text.
///
/// Derived fields hold whatever was computed when the row was saved; they
/// are never recomputed from the grade text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    /// Student name
    pub name: String,
    /// Student identifier
    pub id: String,
    /// Subject names joined with `", "`
    pub subjects: String,
    /// Scores joined with `", "`, aligned with `subjects`
    pub grades: String,
    /// Days attended
    pub attendance: String,
    /// Attendance classification label
    pub attendance_status: String,
    /// Average formatted with two decimals
    pub average: String,
    /// Letter grade
    pub final_grade: String,
}

impl RosterRow {
    /// Build the row for a validated record and its freshly computed metrics
    #[must_use]
    pub fn from_record(record: &StudentRecord, metrics: &DerivedMetrics) -> Self {
        Self {
            name: record.name.trim().to_string(),
            id: record.id.trim().to_string(),
            subjects: record
                .grades
                .subjects()
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
            grades: record
                .grades
                .scores()
                .map(format_score)
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
            attendance: record.attendance.to_string(),
            attendance_status: metrics.attendance_status.to_string(),
            average: format!("{:.2}", metrics.average),
            final_grade: metrics.letter_grade.to_string(),
        }
    }

    /// Build a row from raw fields read from the backing file
    ///
    /// # Errors
    /// Returns a description of the problem if the field count is not
    /// [`FIELD_COUNT`] or the attendance is not a non-negative integer.
    pub fn from_fields<'a, I>(fields: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        let [name, id, subjects, grades, attendance, attendance_status, average, final_grade] =
            fields[..]
        else {
            return Err(format!(
                "expected {FIELD_COUNT} fields, found {}",
                fields.len()
            ));
        };

        if attendance.trim().parse::<u32>().is_err() {
            return Err(format!("attendance '{attendance}' is not a whole number"));
        }

        Ok(Self {
            name: name.to_string(),
            id: id.to_string(),
            subjects: subjects.to_string(),
            grades: grades.to_string(),
            attendance: attendance.to_string(),
            attendance_status: attendance_status.to_string(),
            average: average.to_string(),
            final_grade: final_grade.to_string(),
        })
    }

    /// Fields in file order
    #[must_use]
    pub fn fields(&self) -> [&str; FIELD_COUNT] {
        [
            &self.name,
            &self.id,
            &self.subjects,
            &self.grades,
            &self.attendance,
            &self.attendance_status,
            &self.average,
            &self.final_grade,
        ]
    }

    /// Case-insensitive substring match on name or ID.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.id.to_lowercase().contains(needle)
    }

    /// Parse the row back into an editable record.
    ///
    /// Subjects and grades are split on `", "` and paired positionally.
    ///
    /// # Errors
    /// Returns a description of the problem if the two lists differ in
    /// length, or a grade or the attendance cannot be parsed.
    pub fn to_record(&self) -> Result<StudentRecord, String> {
        let attendance = self
            .attendance
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("attendance '{}' is not a whole number", self.attendance))?;

        let mut grades = Grades::new();
        if !self.subjects.trim().is_empty() {
            let subjects: Vec<&str> = self.subjects.split(LIST_SEPARATOR).collect();
            let scores: Vec<&str> = self.grades.split(LIST_SEPARATOR).collect();
            if subjects.len() != scores.len() {
                return Err(format!(
                    "{} subjects but {} grades",
                    subjects.len(),
                    scores.len()
                ));
            }

            for (subject, grade) in subjects.into_iter().zip(scores) {
                let score = grade
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("grade '{grade}' for '{subject}' is not a number"))?;
                grades.insert(subject, score);
            }
        }

        Ok(StudentRecord {
            name: self.name.clone(),
            id: self.id.clone(),
            grades,
            attendance,
        })
    }
}
