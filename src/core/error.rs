//! Error types for the grade-point engine.
//!
//! Scale and tier tables are validated when they are built, so aggregation only
//! ever fails for data problems in the course rows themselves.

use thiserror::Error;

/// Errors raised by the grading scale, the evaluator and the classifier.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradeError {
    /// A gradable course carries a symbol the active scale does not define.
    #[error("unknown grade '{symbol}'{}", course_suffix(.course))]
    UnknownGrade {
        /// The unresolved grade symbol as supplied
        symbol: String,
        /// Code of the course carrying the grade, when known
        course: Option<String>,
    },

    /// The grading scale breaks one of its invariants.
    #[error("invalid grading scale: {0}")]
    InvalidScale(ScaleViolation),

    /// A raw mark cannot be mapped through the scale's score ranges.
    #[error("score {0} is not covered by the grading scale")]
    ScoreOutOfRange(f64),

    /// The performance tier table breaks one of its invariants.
    #[error("invalid performance tiers: {0}")]
    InvalidTiers(TierViolation),
}

impl GradeError {
    /// Attach a course code to an `UnknownGrade` error; other variants pass through.
    #[must_use]
    pub fn for_course(self, code: &str) -> Self {
        match self {
            Self::UnknownGrade { symbol, .. } => Self::UnknownGrade {
                symbol,
                course: Some(code.to_string()),
            },
            other => other,
        }
    }
}

fn course_suffix(course: &Option<String>) -> String {
    course
        .as_ref()
        .map_or_else(String::new, |code| format!(" for course {code}"))
}

/// The specific invariant a grading scale failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleViolation {
    /// The scale has no entries
    #[error("scale has no grades")]
    Empty,
    /// An entry has an empty symbol
    #[error("grade symbol must not be blank")]
    BlankSymbol,
    /// Two entries share a symbol (compared case-insensitively)
    #[error("grade '{0}' is defined more than once")]
    DuplicateSymbol(String),
    /// Points are negative, NaN or infinite
    #[error("grade '{symbol}' has invalid points {points}")]
    InvalidPoints {
        /// Offending symbol
        symbol: String,
        /// Offending value
        points: f64,
    },
    /// Some entries carry score ranges and others do not
    #[error("grade '{0}' is missing a score range while other grades define one")]
    PartialRanges(String),
    /// `min_score` above `max_score`, or a bound outside 0..=100
    #[error("grade '{symbol}' has an invalid score range {min}..={max}")]
    InvalidRange {
        /// Offending symbol
        symbol: String,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
    /// Two score ranges share marks
    #[error("score ranges of '{0}' and '{1}' overlap")]
    OverlappingRanges(String, String),
    /// Some marks in 0..=100 map to no grade
    #[error("marks between {from} and {to} are not covered by any grade")]
    UncoveredScores {
        /// Start of the gap
        from: f64,
        /// End of the gap
        to: f64,
    },
}

/// The specific invariant a performance tier table failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TierViolation {
    /// The table has no tiers
    #[error("tier table is empty")]
    Empty,
    /// A tier has an empty label
    #[error("tier label must not be blank")]
    BlankLabel,
    /// Two tiers share a label
    #[error("tier '{0}' is defined more than once")]
    DuplicateLabel(String),
    /// A lower bound is outside the 0.0 to 5.0 grade-point range
    #[error("tier '{label}' has lower bound {min} outside 0.0..=5.0")]
    BoundOutOfRange {
        /// Offending label
        label: String,
        /// Offending bound
        min: f64,
    },
    /// Two tiers share a lower bound
    #[error("tiers '{0}' and '{1}' share the same lower bound")]
    DuplicateBound(String, String),
    /// No tier starts at 0.0, so low values would go unclassified
    #[error("no tier starts at 0.0")]
    MissingFloor,
}

impl From<ScaleViolation> for GradeError {
    fn from(violation: ScaleViolation) -> Self {
        Self::InvalidScale(violation)
    }
}

impl From<TierViolation> for GradeError {
    fn from(violation: TierViolation) -> Self {
        Self::InvalidTiers(violation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_grade_message_with_course() {
        let err = GradeError::UnknownGrade {
            symbol: "Z".to_string(),
            course: None,
        }
        .for_course("CSC101");

        assert_eq!(err.to_string(), "unknown grade 'Z' for course CSC101");
    }

    #[test]
    fn test_unknown_grade_message_without_course() {
        let err = GradeError::UnknownGrade {
            symbol: "Z".to_string(),
            course: None,
        };
        assert_eq!(err.to_string(), "unknown grade 'Z'");
    }

    #[test]
    fn test_for_course_leaves_other_variants() {
        let err = GradeError::ScoreOutOfRange(101.0).for_course("MTH101");
        assert_eq!(err, GradeError::ScoreOutOfRange(101.0));
    }

    #[test]
    fn test_violation_converts_into_grade_error() {
        let err: GradeError = ScaleViolation::DuplicateSymbol("A".to_string()).into();
        assert_eq!(
            err.to_string(),
            "invalid grading scale: grade 'A' is defined more than once"
        );
    }
}
