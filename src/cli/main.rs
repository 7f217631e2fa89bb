//! Command-line interface entry point for `roster`

mod args;
mod commands;
mod table;

use args::{Cli, Command};
use clap::Parser;
use commands::students::StudentEdit;
use logger::{enable_debug, enable_verbose, info, init_file_logging, set_level, Level};
use student_roster::config::Config;
use student_roster::models::StudentRecord;

fn main() {
    let args = Cli::parse();

    // The stored config is what `config` subcommands edit; overrides apply to this run only
    let mut stored = Config::load();
    let defaults = Config::from_defaults();
    let mut config = stored.clone();
    config.apply_overrides(&args.to_config_overrides());

    init_logging(&args, &config);

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut stored, &defaults),
        Command::List { filter } => commands::students::list(&config, filter.as_deref()),
        Command::Add {
            name,
            id,
            grades,
            attendance,
        } => {
            let mut candidate = StudentRecord::new(&name, &id, attendance);
            candidate.grades = grades.into_iter().collect();
            commands::students::add(&config, &candidate)
        }
        Command::Modify {
            row,
            name,
            id,
            grades,
            attendance,
        } => commands::students::modify(
            &config,
            row,
            StudentEdit {
                name,
                id,
                grades,
                attendance,
            },
        ),
        Command::Delete { row, yes } => commands::students::delete(&config, row, yes),
    };

    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

/// Resolve the runtime log level, verbosity and log file from flags and config
fn init_logging(args: &Cli, config: &Config) {
    // CLI flag wins, then config logging.level, then warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let _ = std::fs::create_dir_all(parent);
        }
        match init_file_logging(log_path) {
            Ok(()) => info!("File logging initialized at: {}", log_path.display()),
            Err(e) => eprintln!(
                "✗ Failed to initialize file logging at {}: {e}",
                log_path.display()
            ),
        }
    }
}
