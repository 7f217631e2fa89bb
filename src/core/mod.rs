//! Core roster functionality shared by the library and the CLI

pub mod config;
pub mod models;
pub mod roster;

/// Returns the current version of the `student_roster` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
