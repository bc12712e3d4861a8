//! Summary command handler

use super::{grading_setup, resolve_record_path};
use gradepoint::config::Config;
use gradepoint::core::loader::load_record;
use gradepoint::core::report::{ReportContext, ReportGenerator, TextReporter};
use gradepoint::{error, info};
use std::path::PathBuf;

/// Print the CGPA summary and semester history for each record file
///
/// Every file is attempted; the command fails if any of them failed. A file
/// whose in-progress semesters hold bad data still prints its summary and
/// then counts as failed.
pub fn run(input_files: &[PathBuf], config: &Config) -> Result<(), String> {
    let (scale, tiers) = grading_setup(config)?;
    let reporter = TextReporter::new();
    let mut failures = 0usize;

    for (i, input) in input_files.iter().enumerate() {
        let path = resolve_record_path(input, config);
        if i > 0 {
            println!();
        }

        let outcome = load_record(&path, &scale).and_then(|record| {
            let ctx = ReportContext::build(&record, &scale, &tiers)?;
            let problems: Vec<String> = ctx
                .history_errors()
                .map(|(row, e)| format!("semester '{}': {e}", row.semester_id))
                .collect();
            Ok((reporter.render(&ctx)?, problems))
        });

        match outcome {
            Ok((text, problems)) => {
                info!("Summarized {}", path.display());
                print!("{text}");
                for problem in &problems {
                    error!("{}: {problem}", path.display());
                }
                if !problems.is_empty() {
                    failures += 1;
                }
            }
            Err(e) => {
                error!("{}: {e}", path.display());
                failures += 1;
            }
        }
    }

    if failures == 0 {
        Ok(())
    } else {
        Err(format!("✗ {failures} of {} record files failed", input_files.len()))
    }
}
