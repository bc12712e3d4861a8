//! Report generation for academic records
//!
//! Reports are rendered from a [`ReportContext`], which derives every number
//! once so each format shows the same figures. Rounding to two decimals
//! happens only at render time.

pub mod formats;

use crate::core::classify::TierTable;
use crate::core::error::GradeError;
use crate::core::evaluator;
use crate::core::grading::GradeScale;
use crate::core::models::{AcademicRecord, CourseResult};
use crate::core::summary::{self, AcademicSummary, HistoryRow};
use std::error::Error;
use std::path::Path;

pub use formats::{MarkdownReporter, ReportFormat, TextReporter};

/// Data context for report generation
///
/// Holds the record being reported together with its derived summary and
/// semester history.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Record being reported
    pub record: &'a AcademicRecord,
    /// Scale the record was evaluated with
    pub scale: &'a GradeScale,
    /// Tier table used for standings
    pub tiers: &'a TierTable,
    /// Headline numbers
    pub summary: AcademicSummary,
    /// One row per semester, in record order
    pub history: Vec<HistoryRow>,
}

impl<'a> ReportContext<'a> {
    /// Evaluate a record and build its report context.
    ///
    /// Semesters still in progress never block the summary: if one of them
    /// fails to evaluate, its history row carries the error instead.
    ///
    /// # Errors
    /// Returns [`GradeError::UnknownGrade`] if a completed semester holds an unresolvable grade.
    pub fn build(
        record: &'a AcademicRecord,
        scale: &'a GradeScale,
        tiers: &'a TierTable,
    ) -> Result<Self, GradeError> {
        Ok(Self {
            record,
            scale,
            tiers,
            summary: summary::summarize(record, scale, tiers)?,
            history: summary::history(record, scale, tiers),
        })
    }

    /// Student identifier
    #[must_use]
    pub fn student(&self) -> &str {
        &self.record.student
    }

    /// Number of course rows across all semesters
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.record.semesters.iter().map(|s| s.courses.len()).sum()
    }

    /// History rows that failed to evaluate, with their errors
    pub fn history_errors(&self) -> impl Iterator<Item = (&HistoryRow, &GradeError)> {
        self.history
            .iter()
            .filter_map(|row| row.error().map(|e| (row, e)))
    }

    /// Quality points for one course row, `None` when the course is excluded
    #[must_use]
    pub fn course_quality_points(&self, course: &CourseResult) -> Option<f64> {
        evaluator::evaluate(course, self.scale)
            .ok()
            .flatten()
            .map(|eval| eval.quality_points)
    }
}

/// Two-decimal display form of a GPA or quality-point value
#[must_use]
pub fn fmt_points(value: f64) -> String {
    format!("{value:.2}")
}

/// Compact display form of a credit-unit value (`3` rather than `3.00`)
#[must_use]
pub fn fmt_units(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}").trim_end_matches('0').to_string()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Reporter for a format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Text => Box::new(TextReporter::new()),
    }
}
