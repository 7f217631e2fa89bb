//! CLI argument definitions for `roster`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use logger::Level;
use student_roster::config::ConfigOverrides;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// Parse a `SUBJECT=SCORE` pair
///
/// The subject is trimmed; the score must be a number.
pub fn parse_grade(arg: &str) -> Result<(String, f64), String> {
    let (subject, score) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected SUBJECT=SCORE, got '{arg}'"))?;
    let score = score
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("score '{}' is not a number", score.trim()))?;
    Ok((subject.trim().to_string(), score))
}

/// `config` subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `roster_file`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show the roster as a table.
    ///
    /// Rows are numbered from 1; use these numbers with `modify` and `delete`.
    List {
        /// Only show students whose name or ID contains this text (case-insensitive)
        #[arg(value_name = "FILTER")]
        filter: Option<String>,
    },
    /// Add a student.
    Add {
        /// Student name
        #[arg(long)]
        name: String,

        /// Student ID
        #[arg(long)]
        id: String,

        /// Subject grade as SUBJECT=SCORE (repeatable)
        #[arg(short, long = "grade", value_name = "SUBJECT=SCORE", value_parser = parse_grade)]
        grades: Vec<(String, f64)>,

        /// Days attended (0-365)
        #[arg(short, long, default_value_t = 0)]
        attendance: u32,
    },
    /// Modify a student. Fields that are not given keep their stored values.
    Modify {
        /// Row number as shown by `list`
        #[arg(value_name = "ROW")]
        row: usize,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New ID
        #[arg(long)]
        id: Option<String>,

        /// Replacement grades as SUBJECT=SCORE (repeatable; replaces all grades)
        #[arg(short, long = "grade", value_name = "SUBJECT=SCORE", value_parser = parse_grade)]
        grades: Vec<(String, f64)>,

        /// New attendance count
        #[arg(short, long)]
        attendance: Option<u32>,
    },
    /// Delete a student (asks for confirmation).
    Delete {
        /// Row number as shown by `list`
        #[arg(value_name = "ROW")]
        row: usize,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Parsed command line
#[derive(Parser, Debug)]
#[command(
    name = "roster",
    about = "Student roster: grades and attendance in a CSV file",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config roster file
    #[arg(long = "config-roster-file", value_name = "PATH")]
    pub config_roster_file: Option<PathBuf>,

    /// Override config roster file (short form)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub roster_file: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// The short-form `--file` takes precedence over `--config-roster-file`
    /// when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            roster_file: self
                .roster_file
                .as_ref()
                .or(self.config_roster_file.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
