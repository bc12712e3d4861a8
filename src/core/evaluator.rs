//! Course record evaluator: quality points for a single enrollment.
//!
//! A course counts only once it has a positive credit-unit value and a grade.
//! Anything else is "not yet gradable" and is excluded before the grade is
//! looked up, so a zero-unit row with a bad symbol never raises.

use crate::core::error::GradeError;
use crate::core::grading::GradeScale;
use crate::core::models::CourseResult;

/// The contribution of one gradable course
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseEvaluation {
    /// Credit units counted
    pub credit_units: f64,
    /// Grade points for the course's grade
    pub grade_points: f64,
    /// `grade_points * credit_units`
    pub quality_points: f64,
}

/// Evaluate one course against the scale.
///
/// # Returns
/// `Ok(None)` when the course is excluded (non-positive units or no grade)
///
/// # Errors
/// Returns [`GradeError::UnknownGrade`] (tagged with the course code) when a
/// gradable course's symbol is not on the scale.
pub fn evaluate(
    course: &CourseResult,
    scale: &GradeScale,
) -> Result<Option<CourseEvaluation>, GradeError> {
    if !course.is_gradable() {
        return Ok(None);
    }
    let Some(grade) = course.grade_symbol() else {
        return Ok(None);
    };

    let grade_points = scale
        .points_for(grade)
        .map_err(|e| e.for_course(&course.code))?;

    Ok(Some(CourseEvaluation {
        credit_units: course.credit_units,
        grade_points,
        quality_points: grade_points * course.credit_units,
    }))
}

/// Quality points for one course; `0.0` when the course is excluded.
///
/// # Errors
/// Returns [`GradeError::UnknownGrade`] when a gradable course's symbol is not on the scale.
pub fn quality_points(course: &CourseResult, scale: &GradeScale) -> Result<f64, GradeError> {
    Ok(evaluate(course, scale)?.map_or(0.0, |eval| eval.quality_points))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, units: f64, grade: &str) -> CourseResult {
        CourseResult::new(code.to_string(), units, grade.to_string())
    }

    #[test]
    fn test_quality_points_multiply() {
        let scale = GradeScale::five_point();
        let qp = quality_points(&course("CSC101", 3.0, "A"), &scale).unwrap();
        assert!((qp - 15.0).abs() < f64::EPSILON);

        let eval = evaluate(&course("MTH101", 2.0, "B"), &scale)
            .unwrap()
            .unwrap();
        assert!((eval.grade_points - 4.0).abs() < f64::EPSILON);
        assert!((eval.quality_points - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failing_grade_counts_units() {
        let scale = GradeScale::five_point();
        let eval = evaluate(&course("ENG101", 2.0, "F"), &scale)
            .unwrap()
            .unwrap();
        assert!((eval.credit_units - 2.0).abs() < f64::EPSILON);
        assert!(eval.quality_points.abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_units_excluded() {
        let scale = GradeScale::five_point();
        assert_eq!(evaluate(&course("GNS101", 0.0, "A"), &scale), Ok(None));
        assert_eq!(quality_points(&course("GNS101", 0.0, "A"), &scale), Ok(0.0));
    }

    #[test]
    fn test_missing_grade_excluded() {
        let scale = GradeScale::five_point();
        let ungraded = CourseResult::ungraded("PHY101".to_string(), 3.0);
        assert_eq!(evaluate(&ungraded, &scale), Ok(None));
    }

    #[test]
    fn test_unknown_grade_fails_with_course() {
        let scale = GradeScale::five_point();
        let err = evaluate(&course("CSC201", 3.0, "Z"), &scale).unwrap_err();
        assert_eq!(
            err,
            GradeError::UnknownGrade {
                symbol: "Z".to_string(),
                course: Some("CSC201".to_string()),
            }
        );
    }

    #[test]
    fn test_unknown_grade_with_zero_units_is_excluded() {
        let scale = GradeScale::five_point();
        assert_eq!(evaluate(&course("CSC201", 0.0, "Z"), &scale), Ok(None));
    }
}
