//! Student record model

use super::grades::Grades;
use serde::{Deserialize, Serialize};

/// A student as entered by a user, before derived metrics are computed.
///
/// This is the typed candidate the presentation layer builds and hands to
/// the roster store for validation and persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Student name
    pub name: String,

    /// Student identifier (e.g., "S1024")
    pub id: String,

    /// Scores per subject, in entry order
    pub grades: Grades,

    /// Days attended
    pub attendance: u32,
}

impl StudentRecord {
    /// Create a new record with no grades
    ///
    /// # Arguments
    /// * `name` - Student name (trimmed)
    /// * `id` - Student identifier (trimmed)
    /// * `attendance` - Days attended
    #[must_use]
    pub fn new(name: &str, id: &str, attendance: u32) -> Self {
        Self {
            name: name.trim().to_string(),
            id: id.trim().to_string(),
            grades: Grades::new(),
            attendance,
        }
    }

    /// Builder-style helper that records one subject score
    #[must_use]
    pub fn with_grade(mut self, subject: &str, score: f64) -> Self {
        self.grades.insert(subject, score);
        self
    }
}
