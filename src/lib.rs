//! Student roster library
//! Record validation, derived grade and attendance metrics, and CSV
//! persistence used by the `roster` CLI.

pub mod core;

pub use crate::core::{config, get_version, models, roster};
