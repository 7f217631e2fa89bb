//! Ordered subject-to-score mapping

use serde::{Deserialize, Serialize};

/// Round a score to the two decimals the roster keeps.
#[must_use]
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Per-subject scores for one student, kept in insertion order.
///
/// Subject names are trimmed and unique; inserting a subject that already
/// exists replaces its score but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grades {
    entries: Vec<(String, f64)>,
}

impl Grades {
    /// Create an empty mapping
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace the score for `subject`.
    ///
    /// Returns `false` (and stores nothing) when the trimmed subject is empty.
    pub fn insert(&mut self, subject: &str, score: f64) -> bool {
        let subject = subject.trim();
        if subject.is_empty() {
            return false;
        }

        let score = round_score(score);
        if let Some(entry) = self.entries.iter_mut().find(|(s, _)| s == subject) {
            entry.1 = score;
        } else {
            self.entries.push((subject.to_string(), score));
        }
        true
    }

    /// Score recorded for `subject`, if any
    #[must_use]
    pub fn get(&self, subject: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, _)| s == subject.trim())
            .map(|(_, score)| *score)
    }

    /// Number of subjects
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no subject has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(subject, score)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(s, score)| (s.as_str(), *score))
    }

    /// Iterate subject names in insertion order
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    /// Iterate scores in insertion order
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, score)| *score)
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for Grades {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut grades = Self::new();
        for (subject, score) in iter {
            grades.insert(subject.as_ref(), score);
        }
        grades
    }
}
