//! Roster store: validation, derived metrics and CSV persistence

pub mod backing_file;
pub mod error;
pub mod metrics;
pub mod row;
pub mod store;
pub mod validate;

pub use backing_file::MalformedRowPolicy;
pub use error::{MetricsError, Result, StoreError, ValidationError, ValidationFailure};
pub use metrics::{
    classify_attendance, classify_grade, compute_average, AttendanceStatus, DerivedMetrics,
    LetterGrade,
};
pub use row::{RosterRow, HEADER};
pub use store::{prepare_row, RosterStore, StoreOptions};
pub use validate::validate;
