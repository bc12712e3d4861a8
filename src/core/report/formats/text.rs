//! Plain-text report generator

use crate::core::report::{fmt_points, fmt_units, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Plain-text summary generator, aligned for terminal output
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let summary = &ctx.summary;
        let mut out = String::new();

        writeln!(out, "Student: {}", ctx.student())?;
        writeln!(
            out,
            "CGPA: {} ({})",
            fmt_points(summary.cgpa),
            summary.standing.label
        )?;
        writeln!(
            out,
            "Current GPA: {} ({})",
            fmt_points(summary.current_gpa),
            summary.current_standing.label
        )?;
        writeln!(
            out,
            "Credit units: {}   Quality points: {}   Completed semesters: {}",
            fmt_units(summary.total_credit_units),
            fmt_points(summary.total_quality_points),
            summary.completed_semesters
        )?;
        writeln!(out, "Progress: {:.0}%", summary.progress_percent)?;

        if ctx.history.is_empty() {
            return Ok(out);
        }

        writeln!(out)?;
        writeln!(
            out,
            "{:<28} {:>6} {:>6} {:>6}  {:<18} {}",
            "Semester", "Units", "QP", "GPA", "Standing", "Status"
        )?;
        for row in &ctx.history {
            match (&row.totals, &row.tier) {
                (Ok(totals), Some(tier)) => writeln!(
                    out,
                    "{:<28} {:>6} {:>6} {:>6}  {:<18} {}",
                    row.label,
                    fmt_units(totals.total_credit_units),
                    fmt_points(totals.total_quality_points),
                    fmt_points(totals.gpa),
                    tier.label,
                    row.status
                )?,
                (Err(e), _) => writeln!(out, "{:<28} {} (data error: {e})", row.label, row.status)?,
                (Ok(_), None) => writeln!(out, "{:<28} {}", row.label, row.status)?,
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::TierTable;
    use crate::core::grading::GradeScale;
    use crate::core::models::{AcademicRecord, CourseResult, SemesterRecord};

    #[test]
    fn test_render_text() {
        let mut record = AcademicRecord::new("s1".to_string());
        record.add_semester(SemesterRecord::with_courses(
            "S1".to_string(),
            vec![CourseResult::new("CSC101".to_string(), 3.0, "A".to_string())],
            true,
        ));
        record.add_semester(SemesterRecord::with_courses(
            "S2".to_string(),
            vec![CourseResult::new("MTH101".to_string(), 3.0, "C".to_string())],
            false,
        ));

        let scale = GradeScale::five_point();
        let tiers = TierTable::standard();
        let ctx = ReportContext::build(&record, &scale, &tiers).unwrap();
        let output = TextReporter::new().render(&ctx).unwrap();

        assert!(output.contains("CGPA: 5.00 (Excellent)"));
        assert!(output.contains("Progress: 100%"));
        assert!(output.contains("In Progress"));
        assert!(output.contains("Completed"));
    }

    #[test]
    fn test_render_text_with_failed_semester() {
        let mut record = AcademicRecord::new("s1".to_string());
        record.add_semester(SemesterRecord::with_courses(
            "S1".to_string(),
            vec![CourseResult::new("CSC101".to_string(), 1.5, "B".to_string())],
            true,
        ));
        record.add_semester(SemesterRecord::with_courses(
            "S2".to_string(),
            vec![CourseResult::new("CSC201".to_string(), 3.0, "Z".to_string())],
            false,
        ));

        let scale = GradeScale::five_point();
        let tiers = TierTable::standard();
        let ctx = ReportContext::build(&record, &scale, &tiers).unwrap();
        let output = TextReporter::new().render(&ctx).unwrap();

        assert!(output.contains("CGPA: 4.00 (Very Good)"));
        assert!(output.contains("Quality points: 6.00"));
        assert!(output.contains("In Progress (data error:"));
    }
}
