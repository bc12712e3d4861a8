//! Semester record model

use super::{CourseId, CourseList, CourseResult};
use crate::core::aggregate::{self, SemesterTotals};
use crate::core::error::GradeError;
use crate::core::grading::GradeScale;
use serde::{Deserialize, Serialize};

/// One semester of a student's history
///
/// Totals and GPA are never stored on the record; [`SemesterRecord::totals`]
/// derives them from `courses` on every call, so edits cannot leave them stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterRecord {
    /// Identifier unique within an academic record (e.g., "2024-1")
    pub id: String,

    /// Academic session (e.g., "2024/2025")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,

    /// Term within the session (e.g., "First Semester")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,

    /// Academic level (e.g., "ND I", "HND II")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Whether results for the semester are final
    #[serde(default, rename = "completed")]
    pub is_completed: bool,

    /// Course rows, in entry order
    #[serde(default)]
    pub courses: CourseList,
}

impl SemesterRecord {
    /// Create an empty, in-progress semester
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self {
            id,
            session: None,
            term: None,
            level: None,
            is_completed: false,
            courses: CourseList::new(),
        }
    }

    /// Build a semester from a list of courses
    #[must_use]
    pub fn with_courses(id: String, courses: Vec<CourseResult>, is_completed: bool) -> Self {
        Self {
            is_completed,
            courses: courses.into(),
            ..Self::new(id)
        }
    }

    /// Add a course row and return its id
    pub fn add_course(&mut self, course: CourseResult) -> CourseId {
        self.courses.push(course)
    }

    /// Mark the semester's results as final
    pub fn complete(&mut self) {
        self.is_completed = true;
    }

    /// Totals, quality points and GPA derived from the current courses.
    ///
    /// # Errors
    /// Returns [`GradeError::UnknownGrade`] if a gradable course carries a
    /// symbol missing from `scale`.
    pub fn totals(&self, scale: &GradeScale) -> Result<SemesterTotals, GradeError> {
        aggregate::aggregate(self.courses.iter(), scale)
    }

    /// Human-readable label: session and term when known, otherwise the id
    #[must_use]
    pub fn label(&self) -> String {
        match (&self.session, &self.term) {
            (Some(session), Some(term)) => format!("{session} {term}"),
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (None, None) => self.id.clone(),
        }
    }
}
