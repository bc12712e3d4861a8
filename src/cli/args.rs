//! CLI argument definitions for `gradepoint`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use gradepoint::config::ConfigOverrides;
use gradepoint::core::classify::TierPreset;
use gradepoint::core::models::CourseResult;
use gradepoint::core::report::ReportFormat;
use gradepoint::logger::Level;

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
        std::fmt::Display::fmt(&Level::from(*self), f)
    }
}

/// CLI tier preset argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum TierPresetArg {
    /// Excellent from 4.5, Very Good, Good, Fair, Needs Improvement
    Standard,
    /// Excellent from 4.0, Good, Satisfactory, Needs Improvement
    QuickEntry,
}

impl From<TierPresetArg> for TierPreset {
    fn from(arg: TierPresetArg) -> Self {
        match arg {
            TierPresetArg::Standard => Self::Standard,
            TierPresetArg::QuickEntry => Self::QuickEntry,
        }
    }
}

/// CLI report format argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ReportFormatArg {
    /// Markdown transcript
    #[value(alias = "md")]
    Markdown,
    /// Plain-text summary
    #[value(alias = "txt")]
    Text,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Markdown => Self::Markdown,
            ReportFormatArg::Text => Self::Text,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `tier_preset`)
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

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show the active grading scale.
    ///
    /// With `--score`, resolve one raw mark to its grade symbol instead.
    Scale {
        /// Raw mark (0-100) to look up
        #[arg(long, value_name = "SCORE")]
        score: Option<f64>,
    },
    /// Compute a single semester GPA from the command line.
    Gpa {
        /// Courses as CODE:UNITS:GRADE (e.g., CSC101:3:A)
        #[arg(value_name = "COURSES", num_args = 1.., required = true)]
        courses: Vec<CourseResult>,
    },
    /// Print CGPA summary and semester history for record files.
    Summary {
        /// Paths to record TOML files (supports multiple)
        #[arg(value_name = "FILES", num_args = 1.., required = true)]
        input_files: Vec<PathBuf>,
    },
    /// Write a transcript report for a record file.
    Report {
        /// Path to record TOML file
        #[arg(value_name = "FILE")]
        input_file: PathBuf,

        /// Output file path (optional; defaults to `reports_dir`/<name>.<ext>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = ReportFormatArg::Markdown)]
        format: ReportFormatArg,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gradepoint",
    about = "Credit-weighted GPA and CGPA calculator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug", global = true)]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Grade scale TOML file to use instead of the configured one
    #[arg(long = "scale", value_name = "FILE", global = true)]
    pub scale_file: Option<PathBuf>,

    /// Tier table TOML file to use instead of the configured one
    #[arg(long = "tiers", value_name = "FILE", global = true)]
    pub tiers_file: Option<PathBuf>,

    /// Built-in tier preset to classify with
    #[arg(long, value_enum, global = true)]
    pub tier_preset: Option<TierPresetArg>,

    /// Directory searched for record files given by bare name
    #[arg(long, value_name = "DIR", global = true)]
    pub records_dir: Option<PathBuf>,

    /// Directory for report output
    #[arg(long, value_name = "DIR", global = true)]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means no override. A preset flag clears any configured tier file
    /// so the preset actually applies.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let tier_preset = self
            .tier_preset
            .map(|preset| TierPreset::from(preset).to_string());
        let tiers_file = self.tiers_file.as_deref().map(path_string).or_else(|| {
            tier_preset.as_ref().map(|_| String::new())
        });

        ConfigOverrides {
            level: self.log_level.map(|lvl| lvl.to_string()),
            file: self.log_file.as_deref().map(path_string),
            verbose: self.verbose.then_some(true),
            scale_file: self.scale_file.as_deref().map(path_string),
            tier_preset,
            tiers_file,
            records_dir: self.records_dir.as_deref().map(path_string),
            reports_dir: self.reports_dir.as_deref().map(path_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            scale_file: None,
            tiers_file: None,
            tier_preset: None,
            records_dir: None,
            reports_dir: None,
            command: Command::Config { subcommand: None },
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare_cli().to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.scale_file.is_none());
        assert!(overrides.tier_preset.is_none());
        assert!(overrides.tiers_file.is_none());
        assert!(overrides.records_dir.is_none());
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            log_level: Some(LogLevelArg::Info),
            verbose: true,
            log_file: Some(PathBuf::from("/tmp/gp.log")),
            scale_file: Some(PathBuf::from("scales/four.toml")),
            tiers_file: Some(PathBuf::from("tiers/custom.toml")),
            reports_dir: Some(PathBuf::from("/out")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level.as_deref(), Some("info"));
        assert_eq!(overrides.file.as_deref(), Some("/tmp/gp.log"));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.scale_file.as_deref(), Some("scales/four.toml"));
        assert_eq!(overrides.tiers_file.as_deref(), Some("tiers/custom.toml"));
        assert_eq!(overrides.reports_dir.as_deref(), Some("/out"));
    }

    #[test]
    fn test_tier_preset_clears_tier_file() {
        let cli = Cli {
            tier_preset: Some(TierPresetArg::QuickEntry),
            ..bare_cli()
        };
        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.tier_preset.as_deref(), Some("quick-entry"));
        assert_eq!(overrides.tiers_file.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_gpa_command() {
        let cli = Cli::try_parse_from(["gradepoint", "gpa", "CSC101:3:A", "MTH101:2:B"]).unwrap();
        match cli.command {
            Command::Gpa { courses } => {
                assert_eq!(courses.len(), 2);
                assert_eq!(courses[1].code, "MTH101");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_report_command_with_global_flags() {
        let cli = Cli::try_parse_from([
            "gradepoint",
            "report",
            "record.toml",
            "-f",
            "text",
            "--tier-preset",
            "quick-entry",
        ])
        .unwrap();
        assert_eq!(cli.tier_preset, Some(TierPresetArg::QuickEntry));
        match cli.command {
            Command::Report { format, output, .. } => {
                assert_eq!(format, ReportFormatArg::Text);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_course() {
        assert!(Cli::try_parse_from(["gradepoint", "gpa", "CSC101"]).is_err());
    }
}
