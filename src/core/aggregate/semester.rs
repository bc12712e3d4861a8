//! Semester aggregator

use super::weighted_average;
use crate::core::error::GradeError;
use crate::core::evaluator;
use crate::core::grading::GradeScale;
use crate::core::models::CourseResult;
use serde::Serialize;

/// Totals for one semester
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SemesterTotals {
    /// Sum of credit units over counted courses
    pub total_credit_units: f64,
    /// Sum of quality points over counted courses
    pub total_quality_points: f64,
    /// `total_quality_points / total_credit_units`, or `0.0`
    pub gpa: f64,
    /// Courses that contributed
    pub counted_courses: usize,
    /// Courses skipped as not yet gradable
    pub excluded_courses: usize,
}

/// Aggregate a semester's courses into totals and a GPA.
///
/// Courses are accumulated in input order, so identical input always yields
/// bit-identical output.
///
/// # Errors
/// Returns [`GradeError::UnknownGrade`] for the first gradable course whose
/// symbol is not on the scale.
pub fn aggregate<'a, I>(courses: I, scale: &GradeScale) -> Result<SemesterTotals, GradeError>
where
    I: IntoIterator<Item = &'a CourseResult>,
{
    let mut totals = SemesterTotals::default();

    for course in courses {
        match evaluator::evaluate(course, scale)? {
            Some(eval) => {
                totals.total_credit_units += eval.credit_units;
                totals.total_quality_points += eval.quality_points;
                totals.counted_courses += 1;
            }
            None => totals.excluded_courses += 1,
        }
    }

    totals.gpa = weighted_average(totals.total_quality_points, totals.total_credit_units);
    Ok(totals)
}
