//! Markdown report generator
//!
//! Generates transcripts in Markdown: a summary block, the semester history
//! table, and one course table per semester. These render well in GitHub,
//! GitLab, and VS Code.

use crate::core::report::{fmt_points, fmt_units, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown transcript template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/transcript.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let summary = &ctx.summary;
        let values = [
            ("student", ctx.student().to_string()),
            ("cgpa", fmt_points(summary.cgpa)),
            ("standing", summary.standing.label.clone()),
            ("current_gpa", fmt_points(summary.current_gpa)),
            ("current_standing", summary.current_standing.label.clone()),
            ("total_units", fmt_units(summary.total_credit_units)),
            ("total_quality_points", fmt_points(summary.total_quality_points)),
            ("completed_semesters", summary.completed_semesters.to_string()),
            ("progress", format!("{:.0}", summary.progress_percent)),
            ("history", Self::generate_history_table(ctx)),
            ("semesters", Self::generate_course_tables(ctx)),
        ];

        fill_template(MARKDOWN_TEMPLATE, &values)
    }

    /// Generate the semester history table
    fn generate_history_table(ctx: &ReportContext) -> String {
        let mut table = String::new();

        if ctx.history.is_empty() {
            table.push_str("_No semesters recorded._\n");
            return table;
        }

        table.push_str("| Semester | Level | Units | Quality Points | GPA | Standing | Status |\n");
        table.push_str("|---|---|---|---|---|---|---|\n");

        for row in &ctx.history {
            let level = row.level.as_deref().unwrap_or("-");
            let _ = match (&row.totals, &row.tier) {
                (Ok(totals), Some(tier)) => writeln!(
                    table,
                    "| {} | {level} | {} | {} | {} | {} | {} |",
                    row.label,
                    fmt_units(totals.total_credit_units),
                    fmt_points(totals.total_quality_points),
                    fmt_points(totals.gpa),
                    tier.label,
                    row.status
                ),
                (Err(e), _) => writeln!(
                    table,
                    "| {} | {level} | - | - | - | Data error: {e} | {} |",
                    row.label, row.status
                ),
                (Ok(_), None) => writeln!(
                    table,
                    "| {} | {level} | - | - | - | - | {} |",
                    row.label, row.status
                ),
            };
        }

        table
    }

    /// Generate one course table per semester
    fn generate_course_tables(ctx: &ReportContext) -> String {
        let mut out = String::new();

        for semester in &ctx.record.semesters {
            let _ = writeln!(out, "### {}\n", semester.label());

            if semester.courses.is_empty() {
                out.push_str("_No courses recorded._\n\n");
                continue;
            }

            out.push_str("| Code | Title | Units | Grade | Quality Points |\n");
            out.push_str("|---|---|---|---|---|\n");

            for row in semester.courses.rows() {
                let course = &row.course;
                let qp = ctx
                    .course_quality_points(course)
                    .map_or_else(|| "-".to_string(), fmt_points);
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {} | {qp} |",
                    course.code,
                    course.title.as_deref().unwrap_or("-"),
                    fmt_units(course.credit_units),
                    course.grade_symbol().unwrap_or("-"),
                );
            }
            out.push('\n');
        }

        out
    }
}

/// Replace each `{{name}}` in `template` with its value in one pass.
///
/// Inserted values are never scanned again, so record text that looks like a
/// placeholder is kept as written. Unknown placeholders are left untouched.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let found = tail.find("}}").and_then(|end| {
            let key = &tail[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (value, end))
        });
        match found {
            Some((value, end)) => {
                out.push_str(value);
                rest = &tail[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::TierTable;
    use crate::core::grading::{GradeEntry, GradeScale};
    use crate::core::models::{AcademicRecord, CourseResult, SemesterRecord};

    #[test]
    fn test_render_transcript() {
        let mut record = AcademicRecord::new("FPI/ND/CS/21/014".to_string());
        let mut semester = SemesterRecord::with_courses(
            "2021-1".to_string(),
            vec![
                CourseResult::new("CSC101".to_string(), 3.0, "A".to_string())
                    .with_title("Introduction to Computing".to_string()),
                CourseResult::new("MTH101".to_string(), 2.0, "B".to_string()),
                CourseResult::new("ENG101".to_string(), 2.0, "F".to_string()),
            ],
            true,
        );
        semester.session = Some("2021/2022".to_string());
        semester.term = Some("First Semester".to_string());
        record.add_semester(semester);

        let scale = GradeScale::five_point();
        let tiers = TierTable::standard();
        let ctx = ReportContext::build(&record, &scale, &tiers).unwrap();
        let output = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(output.contains("# Academic Transcript: FPI/ND/CS/21/014"));
        assert!(output.contains("| **CGPA** | 3.29 |"));
        assert!(output.contains("| **Standing** | Good |"));
        assert!(output.contains("### 2021/2022 First Semester"));
        assert!(output.contains("| CSC101 | Introduction to Computing | 3 | A | 15.00 |"));
        assert!(output.contains("| ENG101 | - | 2 | F | 0.00 |"));
        assert!(output.contains("| **Quality Points** | 23.00 |"));
        assert!(!output.contains("{{"));
    }

    #[test]
    fn test_render_empty_record() {
        let record = AcademicRecord::new("new".to_string());
        let scale = GradeScale::five_point();
        let tiers = TierTable::standard();
        let ctx = ReportContext::build(&record, &scale, &tiers).unwrap();
        let output = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(output.contains("_No semesters recorded._"));
        assert!(output.contains("| **CGPA** | 0.00 |"));
    }

    #[test]
    fn test_render_fractional_quality_points() {
        let mut record = AcademicRecord::new("s1".to_string());
        record.add_semester(SemesterRecord::with_courses(
            "S1".to_string(),
            vec![CourseResult::new("LAB101".to_string(), 1.5, "B+".to_string())],
            true,
        ));
        let scale = GradeScale::new(vec![
            GradeEntry::new("A", 4.0),
            GradeEntry::new("B+", 3.5),
            GradeEntry::new("F", 0.0),
        ])
        .unwrap();
        let tiers = TierTable::standard();
        let ctx = ReportContext::build(&record, &scale, &tiers).unwrap();
        let output = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(output.contains("| LAB101 | - | 1.5 | B+ | 5.25 |"));
        assert!(output.contains("| **Quality Points** | 5.25 |"));
        assert!(output.contains("| S1 | - | 1.5 | 5.25 | 3.50 | Very Good | Completed |"));
    }

    #[test]
    fn test_render_in_progress_error_row() {
        let mut record = AcademicRecord::new("s1".to_string());
        record.add_semester(SemesterRecord::with_courses(
            "S1".to_string(),
            vec![CourseResult::new("CSC101".to_string(), 3.0, "A".to_string())],
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
        let output = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(output.contains("| **CGPA** | 5.00 |"));
        assert!(output.contains("| S2 | - | - | - | - | Data error:"));
        assert!(output.contains("| CSC201 | - | 3 | Z | - |"));
    }

    #[test]
    fn test_student_placeholder_text_is_not_substituted() {
        let record = AcademicRecord::new("{{cgpa}}".to_string());
        let scale = GradeScale::five_point();
        let tiers = TierTable::standard();
        let ctx = ReportContext::build(&record, &scale, &tiers).unwrap();
        let output = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(output.contains("# Academic Transcript: {{cgpa}}"));
        assert!(output.contains("| **CGPA** | 0.00 |"));
    }

    #[test]
    fn test_fill_template_leaves_unknown_placeholders() {
        let values = [("a", "1".to_string())];
        assert_eq!(fill_template("{{a}} {{b}} {{a", &values), "1 {{b}} {{a");
    }
}
