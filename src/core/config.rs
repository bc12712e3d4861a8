//! Configuration module for `gradepoint`
//!
//! Settings live in `<config_dir>/gradepoint/config.toml` (`dconfig.toml` for
//! debug builds). Values may reference `$GRADEPOINT`, which expands to that
//! directory.

use crate::core::classify::{TierPreset, TierTable};
use crate::core::grading::GradeScale;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

const DIR_VARIABLE: &str = "$GRADEPOINT";

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

/// Grading configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Grade scale TOML file; empty means the built-in five-point scale
    #[serde(default)]
    pub scale_file: String,
    /// Tier preset name (`standard` or `quick-entry`)
    #[serde(default)]
    pub tier_preset: String,
    /// Custom tier TOML file; takes precedence over `tier_preset`
    #[serde(default)]
    pub tiers_file: String,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory searched for record files given by bare name
    #[serde(default)]
    pub records_dir: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Grading settings
    #[serde(default)]
    pub grading: GradingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
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
    /// Override grade scale file
    pub scale_file: Option<String>,
    /// Override tier preset
    pub tier_preset: Option<String>,
    /// Override tier file
    pub tiers_file: Option<String>,
    /// Override records directory
    pub records_dir: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

/// Fill `target` from `default` when it is empty; reports whether it changed
fn merge_field(target: &mut String, default: &str) -> bool {
    if target.is_empty() && !default.is_empty() {
        default.clone_into(target);
        true
    } else {
        false
    }
}

impl Config {
    /// Get the `$GRADEPOINT` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/gradepoint`
    /// - macOS: `~/Library/Application Support/gradepoint`
    /// - Windows: `%APPDATA%\gradepoint`
    #[must_use]
    pub fn get_gradepoint_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gradepoint")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` are updated,
    /// so upgrades pick up new settings without touching user values.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = merge_field(&mut self.logging.level, &defaults.logging.level);
        changed |= merge_field(&mut self.logging.file, &defaults.logging.file);
        changed |= merge_field(&mut self.grading.scale_file, &defaults.grading.scale_file);
        changed |= merge_field(&mut self.grading.tier_preset, &defaults.grading.tier_preset);
        changed |= merge_field(&mut self.grading.tiers_file, &defaults.grading.tiers_file);
        changed |= merge_field(&mut self.paths.records_dir, &defaults.paths.records_dir);
        changed |= merge_field(&mut self.paths.reports_dir, &defaults.paths.reports_dir);
        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the file on disk is untouched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(scale_file) = &overrides.scale_file {
            self.grading.scale_file = Self::expand_variables(scale_file);
        }
        if let Some(preset) = &overrides.tier_preset {
            self.grading.tier_preset.clone_from(preset);
        }
        if let Some(tiers_file) = &overrides.tiers_file {
            self.grading.tiers_file = Self::expand_variables(tiers_file);
        }

        if let Some(records_dir) = &overrides.records_dir {
            self.paths.records_dir = Self::expand_variables(records_dir);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir = Self::expand_variables(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_gradepoint_dir`](Self::get_gradepoint_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_gradepoint_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$GRADEPOINT` in a string to the config directory
    #[must_use]
    pub fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_gradepoint_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults and `$GRADEPOINT` is expanded
    /// in every path-like value.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.grading.scale_file = Self::expand_variables(&config.grading.scale_file);
        config.grading.tiers_file = Self::expand_variables(&config.grading.tiers_file);
        config.paths.records_dir = Self::expand_variables(&config.paths.records_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

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

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from defaults,
    ///   and save it back when anything was added
    /// - On first run: create the config directory and write the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the platform config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `scale_file`, `tier_preset`,
    /// `tiers_file`, `records_dir`, `reports_dir`. Dashed spellings are accepted
    /// for the multi-word keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "scale_file" | "scale-file" => Some(self.grading.scale_file.clone()),
            "tier_preset" | "tier-preset" => Some(self.grading.tier_preset.clone()),
            "tiers_file" | "tiers-file" => Some(self.grading.tiers_file.clone()),
            "records_dir" | "records-dir" => Some(self.paths.records_dir.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, `verbose` is not a boolean, or
    /// `tier_preset` names no preset.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "scale_file" | "scale-file" => self.grading.scale_file = value.to_string(),
            "tier_preset" | "tier-preset" => {
                let preset = value.parse::<TierPreset>()?;
                self.grading.tier_preset = preset.to_string();
            }
            "tiers_file" | "tiers-file" => self.grading.tiers_file = value.to_string(),
            "records_dir" | "records-dir" => self.paths.records_dir = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to its default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "scale_file" | "scale-file" => self
                .grading
                .scale_file
                .clone_from(&defaults.grading.scale_file),
            "tier_preset" | "tier-preset" => self
                .grading
                .tier_preset
                .clone_from(&defaults.grading.tier_preset),
            "tiers_file" | "tiers-file" => self
                .grading
                .tiers_file
                .clone_from(&defaults.grading.tiers_file),
            "records_dir" | "records-dir" => self
                .paths
                .records_dir
                .clone_from(&defaults.paths.records_dir),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// Succeeds without doing anything if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Grade scale selected by `grading.scale_file`, or the built-in five-point scale
    ///
    /// # Errors
    /// Returns an error if the scale file cannot be read, parsed, or validated
    pub fn grade_scale(&self) -> Result<GradeScale, Box<dyn Error>> {
        if self.grading.scale_file.is_empty() {
            return Ok(GradeScale::five_point());
        }
        GradeScale::load(&self.grading.scale_file)
            .map_err(|e| format!("Grade scale '{}': {e}", self.grading.scale_file).into())
    }

    /// Tier table from `grading.tiers_file`, else from `grading.tier_preset`
    ///
    /// # Errors
    /// Returns an error if the tier file is invalid or the preset is unknown
    pub fn tier_table(&self) -> Result<TierTable, Box<dyn Error>> {
        if !self.grading.tiers_file.is_empty() {
            return TierTable::load(&self.grading.tiers_file)
                .map_err(|e| format!("Tier table '{}': {e}", self.grading.tiers_file).into());
        }
        let preset = self.grading.tier_preset.parse::<TierPreset>()?;
        Ok(TierTable::preset(preset))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[grading]")?;
        writeln!(f, "  scale_file = \"{}\"", self.grading.scale_file)?;
        writeln!(f, "  tier_preset = \"{}\"", self.grading.tier_preset)?;
        writeln!(f, "  tiers_file = \"{}\"", self.grading.tiers_file)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  records_dir = \"{}\"", self.paths.records_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        Ok(())
    }
}
