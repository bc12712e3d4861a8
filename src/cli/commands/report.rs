//! Report command handler
//!
//! Writes a transcript for one record file in Markdown or plain text.

use super::{grading_setup, resolve_record_path};
use gradepoint::config::Config;
use gradepoint::core::loader::load_record;
use gradepoint::core::report::{reporter_for, ReportContext, ReportFormat};
use gradepoint::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Run the report command.
///
/// # Arguments
/// * `input_file` - Path to the record TOML file
/// * `output_file` - Optional output path
/// * `format` - Report format
/// * `config` - Configuration containing the default reports directory
pub fn run(
    input_file: &Path,
    output_file: Option<&Path>,
    format: ReportFormat,
    config: &Config,
) -> Result<(), String> {
    let input = resolve_record_path(input_file, config);
    let output = output_file.map_or_else(
        || default_output_path(&input, format, &config.paths.reports_dir),
        Path::to_path_buf,
    );

    let bad_semesters = generate_report(&input, &output, format, config).map_err(|e| {
        error!("Report generation failed for {}: {e}", input.display());
        format!("✗ Failed to write report for {}: {e}", input.display())
    })?;

    println!("✓ Report generated: {}", output.display());
    if bad_semesters > 0 {
        return Err(format!(
            "✗ {bad_semesters} semester(s) in {} could not be evaluated",
            input.display()
        ));
    }
    Ok(())
}

/// Write the report and return how many semesters carried data errors
fn generate_report(
    input: &Path,
    output: &Path,
    format: ReportFormat,
    config: &Config,
) -> Result<usize, Box<dyn std::error::Error>> {
    let (scale, tiers) = grading_setup(config)?;
    let record = load_record(input, &scale)?;
    info!("Record loaded: {}", input.display());

    let ctx = ReportContext::build(&record, &scale, &tiers)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    reporter_for(format).generate(&ctx, output)?;
    info!("Wrote {format} report to {}", output.display());

    for (row, e) in ctx.history_errors() {
        error!("{}: semester '{}': {e}", input.display(), row.semester_id);
    }
    Ok(ctx.history_errors().count())
}

/// `<reports_dir>/<input stem>.<ext>`, or beside the input when no directory is configured
fn default_output_path(input: &Path, format: ReportFormat, reports_dir: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "transcript".into(), |s| s.to_string_lossy().to_string());
    let file_name = format!("{stem}.{}", format.extension());

    if reports_dir.is_empty() {
        input.with_file_name(file_name)
    } else {
        Path::new(reports_dir).join(file_name)
    }
}
