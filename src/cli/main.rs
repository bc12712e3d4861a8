//! Command-line interface entry point for `gradepoint`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use gradepoint::config::Config;
use gradepoint::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use gradepoint::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag (already folded into config) wins, then config, then warn
    let mut level = config
        .logging
        .level
        .parse::<Level>()
        .unwrap_or(gradepoint::logger::DEFAULT_LEVEL);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }
    set_level(level);

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }

    if !config.logging.file.is_empty() {
        let log_path = PathBuf::from(&config.logging.file);
        let display_path = log_path.to_string_lossy();
        if init_file_logging(&log_path) {
            info!("File logging initialized at: {display_path}");
        } else if args.log_file.is_some() {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Scale { score } => commands::scale::run(score, &config),
        Command::Gpa { courses } => commands::gpa::run(courses, &config),
        Command::Summary { input_files } => commands::summary::run(&input_files, &config),
        Command::Report {
            input_file,
            output,
            format,
        } => commands::report::run(&input_file, output.as_deref(), format.into(), &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
