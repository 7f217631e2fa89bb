//! Integration tests for configuration management

use student_roster::config::{Config, ConfigOverrides};
use student_roster::roster::MalformedRowPolicy;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config location
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("nested").join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert_eq!(config.paths.roster_file, "students.csv");
    assert_eq!(config.roster.malformed_rows, "fail");
    assert!(!config.roster.enforce_unique_ids);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/roster.log"
verbose = true

[paths]
roster_file = "./class-a.csv"

[roster]
malformed_rows = "skip"
enforce_unique_ids = true
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/roster.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.roster_file, "./class-a.csv");

    let options = config.store_options().expect("Invalid store options");
    assert_eq!(options.malformed_rows, MalformedRowPolicy::Skip);
    assert!(options.enforce_unique_ids);
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.roster_file, "");
    assert!(!config.roster.enforce_unique_ids);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$ROSTER_HOME/roster.log"

[paths]
roster_file = "$ROSTER_HOME/students.csv"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("student-roster"));
    assert!(!config.logging.file.contains("$ROSTER_HOME"));
    assert!(config.paths.roster_file.ends_with("students.csv"));
    assert!(!config.paths.roster_file.contains("$ROSTER_HOME"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config
        .set("roster-file", "/data/roster.csv")
        .expect("Failed to set roster file");
    assert_eq!(config.get("roster_file").unwrap(), "/data/roster.csv");

    config
        .set("malformed_rows", "SKIP")
        .expect("Failed to set policy");
    assert_eq!(config.get("malformed_rows").unwrap(), "skip");

    config
        .set("enforce_unique_ids", "true")
        .expect("Failed to set uniqueness");
    assert_eq!(config.get("enforce-unique-ids").unwrap(), "true");

    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("malformed_rows", "ignore").is_err());
    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config
        .set("enforce_unique_ids", "true")
        .expect("Failed to set uniqueness");
    config
        .set("roster_file", "other.csv")
        .expect("Failed to set roster file");

    config
        .unset("enforce_unique_ids", &defaults)
        .expect("Failed to unset uniqueness");
    config
        .unset("roster_file", &defaults)
        .expect("Failed to unset roster file");

    assert_eq!(
        config.roster.enforce_unique_ids,
        defaults.roster.enforce_unique_ids
    );
    assert_eq!(config.paths.roster_file, defaults.paths.roster_file);
    assert!(config.unset("unknown_key", &defaults).is_err());
}

#[test]
fn test_load_from_creates_file_on_first_run() {
    let (_temp_dir, config_file) = setup_temp_config();

    let config = Config::load_from(&config_file);

    assert!(config_file.exists());
    assert_eq!(config.paths.roster_file, Config::from_defaults().paths.roster_file);
}

#[test]
fn test_save_to_and_load_from_round_trip() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config
        .set("roster_file", "/srv/grade7.csv")
        .expect("Failed to set roster file");
    config
        .set("malformed_rows", "skip")
        .expect("Failed to set policy");
    config.save_to(&config_file).expect("Failed to save config");

    let loaded = Config::load_from(&config_file);
    assert_eq!(loaded.paths.roster_file, "/srv/grade7.csv");
    assert_eq!(loaded.roster.malformed_rows, "skip");
}

#[test]
fn test_load_from_merges_missing_fields_and_saves() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().unwrap()).unwrap();
    fs::write(&config_file, "[logging]\nlevel = \"error\"\n").unwrap();

    let config = Config::load_from(&config_file);
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.paths.roster_file, "students.csv");

    let saved = fs::read_to_string(&config_file).unwrap();
    assert!(saved.contains("roster_file"));
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        roster_file: Some("./class-b.csv".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.roster_path(), PathBuf::from("./class-b.csv"));
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.paths.roster_file.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };
    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.roster_file, before);
}

#[test]
fn test_config_display_format() {
    let display_str = format!("{}", Config::from_defaults());

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[roster]"));
    assert!(display_str.contains("roster_file"));
    assert!(display_str.contains("malformed_rows"));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[paths]
roster_file = ""

[roster]
malformed_rows = "skip"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.roster.malformed_rows, "skip");
    assert_eq!(config.paths.roster_file, defaults.paths.roster_file);
}

#[test]
fn test_get_roster_home() {
    let dir = Config::get_roster_home();
    assert!(dir.to_string_lossy().contains("student-roster"));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();
    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
