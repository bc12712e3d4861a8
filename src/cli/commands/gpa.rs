//! Quick semester GPA calculator

use super::grading_setup;
use gradepoint::config::Config;
use gradepoint::core::aggregate;
use gradepoint::core::models::CourseResult;
use gradepoint::core::report::{fmt_points, fmt_units};
use gradepoint::{info, verbose};

/// Compute and print the GPA for courses given on the command line
pub fn run(courses: Vec<CourseResult>, config: &Config) -> Result<(), String> {
    let (scale, tiers) = grading_setup(config)?;

    let totals = aggregate::aggregate(&courses, &scale).map_err(|e| format!("✗ {e}"))?;
    info!(
        "Semester GPA over {} courses ({} excluded)",
        totals.counted_courses, totals.excluded_courses
    );

    for course in &courses {
        verbose!("  {course}");
    }

    println!("GPA: {} ({})", fmt_points(totals.gpa), tiers.classify(totals.gpa));
    println!(
        "Credit units: {}   Quality points: {}",
        fmt_units(totals.total_credit_units),
        fmt_points(totals.total_quality_points)
    );
    if totals.excluded_courses > 0 {
        println!("Excluded (no units or no grade): {}", totals.excluded_courses);
    }
    Ok(())
}
