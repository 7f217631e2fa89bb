//! CLI command handlers for `roster`.
//!
//! Handlers return `Err` with a user-facing message; `main` prints it and
//! exits non-zero.

pub mod config;
pub mod students;

use std::io::{self, Write};

/// Ask a yes/no question on stdin. Anything other than `y`/`yes` is a no.
pub fn confirm(prompt: &str) -> bool {
    print!("{prompt} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    if io::stdin().read_line(&mut response).is_err() {
        return false;
    }
    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}
