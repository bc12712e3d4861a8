//! Course result model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The graded outcome of one course enrollment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseResult {
    /// Course code (e.g., "CSC101")
    pub code: String,

    /// Course title (e.g., "Introduction to Programming")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Credit units (weight of the course); may be fractional
    #[serde(rename = "units")]
    pub credit_units: f64,

    /// Grade symbol, absent until the course is graded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,

    /// Raw mark (0-100) the grade was, or will be, derived from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl CourseResult {
    /// Create a graded course result
    ///
    /// # Arguments
    /// * `code` - Course code
    /// * `credit_units` - Credit units
    /// * `grade` - Grade symbol
    #[must_use]
    pub const fn new(code: String, credit_units: f64, grade: String) -> Self {
        Self {
            code,
            title: None,
            credit_units,
            grade: Some(grade),
            score: None,
        }
    }

    /// Create a course that has not been graded yet
    #[must_use]
    pub const fn ungraded(code: String, credit_units: f64) -> Self {
        Self {
            code,
            title: None,
            credit_units,
            grade: None,
            score: None,
        }
    }

    /// Set the course title
    #[must_use]
    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the raw mark
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// The grade symbol, trimmed, or `None` when missing or blank
    #[must_use]
    pub fn grade_symbol(&self) -> Option<&str> {
        self.grade
            .as_deref()
            .map(str::trim)
            .filter(|grade| !grade.is_empty())
    }

    /// Whether the credit-unit value is positive and finite
    #[must_use]
    pub fn has_credit_units(&self) -> bool {
        self.credit_units.is_finite() && self.credit_units > 0.0
    }

    /// Whether the course counts toward aggregation: it needs a positive,
    /// finite credit-unit value and a non-blank grade.
    #[must_use]
    pub fn is_gradable(&self) -> bool {
        self.has_credit_units() && self.grade_symbol().is_some()
    }
}

impl fmt::Display for CourseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.code,
            self.credit_units,
            self.grade_symbol().unwrap_or("")
        )
    }
}

/// Parses the compact `CODE:UNITS[:GRADE]` form used for quick entry
/// (e.g., `CSC101:3:A`, or `CSC102:2` for an ungraded course).
impl FromStr for CourseResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':').map(str::trim);

        let code = parts
            .next()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| format!("Missing course code in '{s}'"))?;

        let units_str = parts
            .next()
            .ok_or_else(|| format!("Missing credit units in '{s}' (expected CODE:UNITS:GRADE)"))?;
        let credit_units = units_str
            .parse::<f64>()
            .map_err(|_| format!("Invalid credit units '{units_str}' in '{s}'"))?;

        let grade = parts.next().filter(|grade| !grade.is_empty());

        if parts.next().is_some() {
            return Err(format!(
                "Too many fields in '{s}' (expected CODE:UNITS:GRADE)"
            ));
        }

        Ok(match grade {
            Some(grade) => Self::new(code.to_string(), credit_units, grade.to_string()),
            None => Self::ungraded(code.to_string(), credit_units),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = CourseResult::new("CSC101".to_string(), 3.0, "A".to_string());

        assert_eq!(course.code, "CSC101");
        assert!((course.credit_units - 3.0).abs() < f64::EPSILON);
        assert_eq!(course.grade_symbol(), Some("A"));
        assert!(course.title.is_none());
        assert!(course.score.is_none());
        assert!(course.is_gradable());
    }

    #[test]
    fn test_zero_units_not_gradable() {
        let course = CourseResult::new("GNS101".to_string(), 0.0, "A".to_string());
        assert!(!course.is_gradable());

        let negative = CourseResult::new("GNS102".to_string(), -2.0, "A".to_string());
        assert!(!negative.is_gradable());

        let nan = CourseResult::new("GNS103".to_string(), f64::NAN, "A".to_string());
        assert!(!nan.is_gradable());
    }

    #[test]
    fn test_blank_grade_not_gradable() {
        let blank = CourseResult::new("MTH101".to_string(), 3.0, "   ".to_string());
        assert_eq!(blank.grade_symbol(), None);
        assert!(!blank.is_gradable());

        let missing = CourseResult::ungraded("MTH102".to_string(), 3.0);
        assert!(!missing.is_gradable());
    }

    #[test]
    fn test_builders() {
        let course = CourseResult::ungraded("PHY101".to_string(), 2.0)
            .with_title("General Physics".to_string())
            .with_score(64.0);

        assert_eq!(course.title.as_deref(), Some("General Physics"));
        assert_eq!(course.score, Some(64.0));
    }

    #[test]
    fn test_parse_compact_form() {
        let course: CourseResult = "CSC101:3:A".parse().unwrap();
        assert_eq!(course.code, "CSC101");
        assert!((course.credit_units - 3.0).abs() < f64::EPSILON);
        assert_eq!(course.grade_symbol(), Some("A"));

        let ungraded: CourseResult = "ENG101:2".parse().unwrap();
        assert!(ungraded.grade.is_none());

        let trailing: CourseResult = "ENG102:2:".parse().unwrap();
        assert!(trailing.grade.is_none());

        let fractional: CourseResult = " LAB101 : 1.5 : b ".parse().unwrap();
        assert!((fractional.credit_units - 1.5).abs() < f64::EPSILON);
        assert_eq!(fractional.grade_symbol(), Some("b"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("".parse::<CourseResult>().is_err());
        assert!("CSC101".parse::<CourseResult>().is_err());
        assert!("CSC101:three:A".parse::<CourseResult>().is_err());
        assert!("CSC101:3:A:extra".parse::<CourseResult>().is_err());
    }

    #[test]
    fn test_display_compact_form() {
        let course = CourseResult::new("CSC101".to_string(), 3.0, "A".to_string());
        assert_eq!(course.to_string(), "CSC101:3:A");
    }
}
