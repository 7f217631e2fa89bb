//! Configuration module for the student roster

use crate::core::roster::{MalformedRowPolicy, StoreOptions};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to [`Config::get_roster_home`] in path values
const HOME_VARIABLE: &str = "$ROSTER_HOME";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Backing CSV file for the roster
    #[serde(default)]
    pub roster_file: String,
}

/// Roster behaviour configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Malformed row handling on load ("fail" or "skip")
    #[serde(default)]
    pub malformed_rows: String,
    /// Reject duplicate student IDs
    #[serde(default)]
    pub enforce_unique_ids: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Roster settings
    #[serde(default)]
    pub roster: RosterConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override roster file path
    pub roster_file: Option<String>,
}

impl Config {
    /// Get the `$ROSTER_HOME` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/student-roster`
    /// - macOS: `~/Library/Application Support/student-roster`
    /// - Windows: `%APPDATA%\student-roster`
    #[must_use]
    pub fn get_roster_home() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("student-roster")
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_roster_home`](Self::get_roster_home).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_roster_home().join(CONFIG_FILE_NAME)
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults`
    /// are filled in, so upgrading picks up new settings without touching
    /// user choices.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }
        if self.paths.roster_file.is_empty() && !defaults.paths.roster_file.is_empty() {
            self.paths
                .roster_file
                .clone_from(&defaults.paths.roster_file);
            changed = true;
        }
        if self.roster.malformed_rows.is_empty() && !defaults.roster.malformed_rows.is_empty() {
            self.roster
                .malformed_rows
                .clone_from(&defaults.roster.malformed_rows);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the config file is not modified.
    /// Only non-`None` values replace config values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     roster_file: Some("class-b.csv".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(roster_file) = &overrides.roster_file {
            self.paths.roster_file.clone_from(roster_file);
        }
    }

    fn expand_variables(value: &str) -> String {
        if value.contains(HOME_VARIABLE) {
            let home = Self::get_roster_home();
            value.replace(HOME_VARIABLE, home.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Expands `$ROSTER_HOME` in path values. Missing fields use their serde
    /// defaults (empty strings or false).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.roster_file = Self::expand_variables(&config.paths.roster_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from the user config file, or create it from defaults
    ///
    /// See [`load_from`](Self::load_from).
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load configuration from `config_file`, or create it from defaults
    ///
    /// - If the file exists: load it, fill missing fields from defaults and
    ///   save it back when anything was added
    /// - If it doesn't (first run): write the defaults there
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save_to(config_file);
                    }
                    return config;
                }
            }
        } else {
            let _ = defaults.save_to(config_file);
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration as pretty TOML to `config_file`
    ///
    /// ```toml
    /// [logging]
    /// level = "warn"
    /// file = ""
    /// verbose = false
    ///
    /// [paths]
    /// roster_file = "students.csv"
    ///
    /// [roster]
    /// malformed_rows = "fail"
    /// enforce_unique_ids = false
    /// ```
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created or the file
    /// cannot be written.
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `roster_file`,
    /// `malformed_rows`, `enforce_unique_ids` (dashes accepted in place of
    /// underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "roster_file" | "roster-file" => Some(self.paths.roster_file.clone()),
            "malformed_rows" | "malformed-rows" => Some(self.roster.malformed_rows.clone()),
            "enforce_unique_ids" | "enforce-unique-ids" => {
                Some(self.roster.enforce_unique_ids.to_string())
            }
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed (e.g., "maybe" for a boolean, "ignore" for `malformed_rows`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "roster_file" | "roster-file" => self.paths.roster_file = value.to_string(),
            "malformed_rows" | "malformed-rows" => {
                let policy = value.parse::<MalformedRowPolicy>()?;
                self.roster.malformed_rows = policy.to_string();
            }
            "enforce_unique_ids" | "enforce-unique-ids" => {
                self.roster.enforce_unique_ids = value.parse::<bool>().map_err(|_| {
                    format!("Invalid boolean value for 'enforce_unique_ids': '{value}'")
                })?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to the value in `defaults`)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "roster_file" | "roster-file" => self
                .paths
                .roster_file
                .clone_from(&defaults.paths.roster_file),
            "malformed_rows" | "malformed-rows" => self
                .roster
                .malformed_rows
                .clone_from(&defaults.roster.malformed_rows),
            "enforce_unique_ids" | "enforce-unique-ids" => {
                self.roster.enforce_unique_ids = defaults.roster.enforce_unique_ids;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load()`](Config::load) recreates it. Succeeds if the file
    /// is already absent.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Roster file path for this run
    #[must_use]
    pub fn roster_path(&self) -> PathBuf {
        PathBuf::from(&self.paths.roster_file)
    }

    /// Store options described by the `[roster]` section
    ///
    /// An empty `malformed_rows` means the default policy.
    ///
    /// # Errors
    /// Returns an error if `malformed_rows` holds an unknown policy.
    pub fn store_options(&self) -> Result<StoreOptions, String> {
        let malformed_rows = if self.roster.malformed_rows.trim().is_empty() {
            MalformedRowPolicy::default()
        } else {
            self.roster.malformed_rows.parse()?
        };
        Ok(StoreOptions {
            malformed_rows,
            enforce_unique_ids: self.roster.enforce_unique_ids,
        })
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  roster_file = \"{}\"", self.paths.roster_file)?;

        writeln!(f, "\n[roster]")?;
        writeln!(f, "  malformed_rows = \"{}\"", self.roster.malformed_rows)?;
        writeln!(
            f,
            "  enforce_unique_ids = {}",
            self.roster.enforce_unique_ids
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse_and_yield_store_options() {
        let config = Config::from_defaults();
        assert!(!config.paths.roster_file.is_empty());

        let options = config.store_options().unwrap();
        assert_eq!(options.malformed_rows, MalformedRowPolicy::Fail);
        assert!(!options.enforce_unique_ids);
    }

    #[test]
    fn test_store_options_rejects_unknown_policy() {
        let mut config = Config::from_defaults();
        config.roster.malformed_rows = "shrug".to_string();
        assert!(config.store_options().is_err());
    }

    #[test]
    fn test_expand_home_variable() {
        let expanded = Config::expand_variables("$ROSTER_HOME/students.csv");
        assert!(!expanded.contains(HOME_VARIABLE));
        assert!(expanded.ends_with("students.csv"));
    }
}
