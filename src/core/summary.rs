//! Academic summary and semester history views

use crate::core::aggregate::SemesterTotals;
use crate::core::classify::{clamp_grade_points, PerformanceTier, TierTable, GRADE_POINT_CEILING};
use crate::core::error::GradeError;
use crate::core::grading::GradeScale;
use crate::core::models::AcademicRecord;
use std::fmt;

/// Headline numbers for a student's record
#[derive(Debug, Clone, PartialEq)]
pub struct AcademicSummary {
    /// GPA of the most recently completed semester (`0.0` if none)
    pub current_gpa: f64,
    /// Cumulative GPA over completed semesters
    pub cgpa: f64,
    /// Credit units counted toward the CGPA
    pub total_credit_units: f64,
    /// Quality points counted toward the CGPA
    pub total_quality_points: f64,
    /// Number of completed semesters
    pub completed_semesters: usize,
    /// Tier of the CGPA
    pub standing: PerformanceTier,
    /// Tier of the current GPA
    pub current_standing: PerformanceTier,
    /// CGPA as a percentage of the 5.0 ceiling, capped at 100
    pub progress_percent: f64,
}

impl AcademicSummary {
    /// Whether the record has no completed semesters yet
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.completed_semesters == 0
    }
}

/// Whether a semester's results are final
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemesterStatus {
    /// Results are final and count toward the CGPA
    Completed,
    /// Results may still change
    InProgress,
}

impl fmt::Display for SemesterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::InProgress => write!(f, "In Progress"),
        }
    }
}

/// One row of the semester history table
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    /// Semester id
    pub semester_id: String,
    /// Display label (session + term)
    pub label: String,
    /// Academic level, if recorded
    pub level: Option<String>,
    /// Derived totals, or the error that kept this semester from evaluating
    pub totals: Result<SemesterTotals, GradeError>,
    /// Tier of the semester GPA, `None` when the totals failed
    pub tier: Option<PerformanceTier>,
    /// Completion status
    pub status: SemesterStatus,
}

impl HistoryRow {
    /// The data error recorded for this semester, if any
    #[must_use]
    pub fn error(&self) -> Option<&GradeError> {
        self.totals.as_ref().err()
    }
}

/// Build the headline summary for a record.
///
/// # Errors
/// Returns [`GradeError::UnknownGrade`] if a completed semester holds an unresolvable grade.
pub fn summarize(
    record: &AcademicRecord,
    scale: &GradeScale,
    tiers: &TierTable,
) -> Result<AcademicSummary, GradeError> {
    let cumulative = record.cumulative(scale)?;
    let current_gpa = record.current_gpa(scale)?.unwrap_or(0.0);

    Ok(AcademicSummary {
        current_gpa,
        cgpa: cumulative.cgpa,
        total_credit_units: cumulative.cumulative_credit_units,
        total_quality_points: cumulative.cumulative_quality_points,
        completed_semesters: cumulative.completed_semesters,
        standing: tiers.classify(cumulative.cgpa).clone(),
        current_standing: tiers.classify(current_gpa).clone(),
        progress_percent: progress_percent(cumulative.cgpa),
    })
}

/// Build one history row per semester, in record order.
///
/// A semester that fails to evaluate keeps its row, with the error in
/// [`HistoryRow::totals`], so one bad row never hides the others.
#[must_use]
pub fn history(record: &AcademicRecord, scale: &GradeScale, tiers: &TierTable) -> Vec<HistoryRow> {
    record
        .semesters
        .iter()
        .map(|semester| {
            let totals = semester.totals(scale);
            let tier = totals
                .as_ref()
                .ok()
                .map(|totals| tiers.classify(totals.gpa).clone());
            HistoryRow {
                semester_id: semester.id.clone(),
                label: semester.label(),
                level: semester.level.clone(),
                totals,
                tier,
                status: if semester.is_completed {
                    SemesterStatus::Completed
                } else {
                    SemesterStatus::InProgress
                },
            }
        })
        .collect()
}

/// A grade-point value as a percentage of the 5.0 ceiling, within `0..=100`
#[must_use]
pub fn progress_percent(value: f64) -> f64 {
    clamp_grade_points(value) / GRADE_POINT_CEILING * 100.0
}
