//! Cumulative aggregator (CGPA)
//!
//! CGPA is total quality points over total credit units across completed
//! semesters. Averaging per-semester GPAs would misweight semesters with
//! different credit loads, so semesters are combined before dividing.

use super::{weighted_average, SemesterTotals};
use crate::core::error::GradeError;
use crate::core::grading::GradeScale;
use crate::core::models::SemesterRecord;
use serde::Serialize;

/// Totals across completed semesters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CumulativeTotals {
    /// Sum of credit units over completed semesters
    pub cumulative_credit_units: f64,
    /// Sum of quality points over completed semesters
    pub cumulative_quality_points: f64,
    /// `cumulative_quality_points / cumulative_credit_units`, or `0.0`
    pub cgpa: f64,
    /// Number of completed semesters combined
    pub completed_semesters: usize,
}

/// Combine already-computed semester totals (all assumed completed).
///
/// Useful when semester totals come from storage rather than from course rows.
#[must_use]
pub fn combine<I>(semesters: I) -> CumulativeTotals
where
    I: IntoIterator<Item = SemesterTotals>,
{
    let mut totals = CumulativeTotals::default();
    for semester in semesters {
        totals.cumulative_credit_units += semester.total_credit_units;
        totals.cumulative_quality_points += semester.total_quality_points;
        totals.completed_semesters += 1;
    }
    totals.cgpa = weighted_average(totals.cumulative_quality_points, totals.cumulative_credit_units);
    totals
}

/// Cumulative totals over the completed semesters of `semesters`.
///
/// In-progress semesters are skipped before their courses are evaluated.
/// An empty or all-incomplete history yields zeroed totals.
///
/// # Errors
/// Returns [`GradeError::UnknownGrade`] if a completed semester holds an unresolvable grade.
pub fn cumulative<'a, I>(semesters: I, scale: &GradeScale) -> Result<CumulativeTotals, GradeError>
where
    I: IntoIterator<Item = &'a SemesterRecord>,
{
    let per_semester = semesters
        .into_iter()
        .filter(|semester| semester.is_completed)
        .map(|semester| semester.totals(scale))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(combine(per_semester))
}

/// GPA of the most recently completed semester (the last completed one in order).
///
/// This is reported alongside the CGPA and is not derived from it.
///
/// # Errors
/// Returns [`GradeError::UnknownGrade`] if that semester holds an unresolvable grade.
pub fn current_gpa<'a, I>(semesters: I, scale: &GradeScale) -> Result<Option<f64>, GradeError>
where
    I: IntoIterator<Item = &'a SemesterRecord>,
{
    semesters
        .into_iter()
        .filter(|semester| semester.is_completed)
        .last()
        .map(|semester| semester.totals(scale).map(|totals| totals.gpa))
        .transpose()
}
