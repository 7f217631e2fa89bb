//! Data models for the student roster

pub mod grades;
pub mod student;

pub use grades::Grades;
pub use student::StudentRecord;
