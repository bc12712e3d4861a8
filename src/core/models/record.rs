//! Academic record model (a student's full history)

use super::SemesterRecord;
use crate::core::aggregate::{self, CumulativeTotals};
use crate::core::classify::TierTable;
use crate::core::error::GradeError;
use crate::core::grading::GradeScale;
use crate::core::summary::{self, AcademicSummary, HistoryRow};
use serde::{Deserialize, Serialize};

/// A student's semesters, ordered by completion time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicRecord {
    /// Student identifier (matric number, name, ...)
    pub student: String,

    /// Semesters, oldest first
    #[serde(default)]
    pub semesters: Vec<SemesterRecord>,
}

impl AcademicRecord {
    /// Create a record with no semesters
    #[must_use]
    pub const fn new(student: String) -> Self {
        Self {
            student,
            semesters: Vec::new(),
        }
    }

    /// Append a semester
    ///
    /// # Returns
    /// `false` (and leaves the record unchanged) if a semester with the same id exists
    pub fn add_semester(&mut self, semester: SemesterRecord) -> bool {
        if self.get_semester(&semester.id).is_some() {
            return false;
        }
        self.semesters.push(semester);
        true
    }

    /// Look up a semester by id
    #[must_use]
    pub fn get_semester(&self, id: &str) -> Option<&SemesterRecord> {
        self.semesters.iter().find(|s| s.id == id)
    }

    /// Mutable lookup by id
    pub fn get_semester_mut(&mut self, id: &str) -> Option<&mut SemesterRecord> {
        self.semesters.iter_mut().find(|s| s.id == id)
    }

    /// Completed semesters, in order
    pub fn completed_semesters(&self) -> impl Iterator<Item = &SemesterRecord> {
        self.semesters.iter().filter(|s| s.is_completed)
    }

    /// Cumulative totals and CGPA over completed semesters.
    ///
    /// # Errors
    /// Returns [`GradeError::UnknownGrade`] if a completed semester holds an unresolvable grade.
    pub fn cumulative(&self, scale: &GradeScale) -> Result<CumulativeTotals, GradeError> {
        aggregate::cumulative(&self.semesters, scale)
    }

    /// GPA of the most recently completed semester, if any.
    ///
    /// # Errors
    /// Returns [`GradeError::UnknownGrade`] if that semester holds an unresolvable grade.
    pub fn current_gpa(&self, scale: &GradeScale) -> Result<Option<f64>, GradeError> {
        aggregate::current_gpa(&self.semesters, scale)
    }

    /// Dashboard summary: current GPA, CGPA, credit units, standing.
    ///
    /// # Errors
    /// Returns [`GradeError::UnknownGrade`] if a completed semester holds an unresolvable grade.
    pub fn summary(
        &self,
        scale: &GradeScale,
        tiers: &TierTable,
    ) -> Result<AcademicSummary, GradeError> {
        summary::summarize(self, scale, tiers)
    }

    /// One history row per semester, including semesters still in progress.
    /// Rows that fail to evaluate carry their own error.
    #[must_use]
    pub fn history(&self, scale: &GradeScale, tiers: &TierTable) -> Vec<HistoryRow> {
        summary::history(self, scale, tiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = AcademicRecord::new("FPI/ND/CS/21/001".to_string());
        assert_eq!(record.student, "FPI/ND/CS/21/001");
        assert!(record.semesters.is_empty());
    }

    #[test]
    fn test_add_duplicate_semester() {
        let mut record = AcademicRecord::new("student".to_string());
        assert!(record.add_semester(SemesterRecord::new("2024-1".to_string())));
        assert!(!record.add_semester(SemesterRecord::new("2024-1".to_string())));
        assert_eq!(record.semesters.len(), 1);
    }

    #[test]
    fn test_completed_semesters_filter() {
        let mut record = AcademicRecord::new("student".to_string());
        let mut first = SemesterRecord::new("2024-1".to_string());
        first.complete();
        record.add_semester(first);
        record.add_semester(SemesterRecord::new("2024-2".to_string()));

        let ids: Vec<&str> = record.completed_semesters().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["2024-1"]);
    }

    #[test]
    fn test_get_semester_mut() {
        let mut record = AcademicRecord::new("student".to_string());
        record.add_semester(SemesterRecord::new("2024-1".to_string()));

        if let Some(semester) = record.get_semester_mut("2024-1") {
            semester.level = Some("ND I".to_string());
        }
        assert_eq!(
            record.get_semester("2024-1").unwrap().level.as_deref(),
            Some("ND I")
        );
    }
}
