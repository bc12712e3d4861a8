//! Loader for academic record files
//!
//! Record files are TOML:
//!
//! ```toml
//! student = "FPI/ND/CS/21/014"
//!
//! [[semesters]]
//! id = "2021-1"
//! session = "2021/2022"
//! term = "First Semester"
//! level = "ND I"
//! completed = true
//!
//! [[semesters.courses]]
//! code = "CSC101"
//! title = "Introduction to Computing"
//! units = 3
//! grade = "A"
//! ```
//!
//! A course may give `score` instead of `grade`; the grade is then resolved
//! through the active scale's score ranges at load time.

use crate::core::grading::GradeScale;
use crate::core::models::AcademicRecord;
use crate::debug;
use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Load and prepare a record file
///
/// # Arguments
/// * `path` - Path to the TOML record
/// * `scale` - Scale used to resolve score-only courses
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, semester ids repeat,
/// or a score cannot be mapped to a grade.
pub fn load_record<P: AsRef<Path>>(path: P, scale: &GradeScale) -> Result<AcademicRecord, Box<dyn Error>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let record = parse_record(&content, scale)?;
    debug!(
        "Loaded record for {} from {} ({} semesters)",
        record.student,
        path.display(),
        record.semesters.len()
    );
    Ok(record)
}

/// Parse and prepare a record from TOML text
///
/// # Errors
/// Returns an error if the TOML is malformed, semester ids repeat, or a score
/// cannot be mapped to a grade.
pub fn parse_record(content: &str, scale: &GradeScale) -> Result<AcademicRecord, Box<dyn Error>> {
    let mut record: AcademicRecord = toml::from_str(content)?;

    validate_semester_ids(&record)?;
    resolve_scores(&mut record, scale)?;

    Ok(record)
}

fn validate_semester_ids(record: &AcademicRecord) -> Result<(), String> {
    let mut seen = HashSet::new();
    for semester in &record.semesters {
        if semester.id.trim().is_empty() {
            return Err("Semester id must not be blank".to_string());
        }
        if !seen.insert(semester.id.as_str()) {
            return Err(format!("Duplicate semester id '{}'", semester.id));
        }
    }
    Ok(())
}

/// Fill in grades for courses that only carry a raw score
fn resolve_scores(record: &mut AcademicRecord, scale: &GradeScale) -> Result<(), Box<dyn Error>> {
    for semester in &mut record.semesters {
        let ids: Vec<_> = semester.courses.rows().iter().map(|row| row.id).collect();
        for id in ids {
            let Some(course) = semester.courses.get_mut(id) else {
                continue;
            };
            if course.grade_symbol().is_some() {
                continue;
            }
            let Some(score) = course.score else {
                continue;
            };
            match scale.symbol_for_score(score) {
                Ok(symbol) => {
                    debug!("Resolved {} score {score} to grade {symbol}", course.code);
                    course.grade = Some(symbol.to_string());
                }
                // Rows without credit units never count, so a bad mark there is left ungraded
                Err(e) if !course.has_credit_units() => {
                    debug!("Left {} ungraded: {e}", course.code);
                }
                Err(e) => {
                    return Err(format!("{} in semester '{}': {e}", course.code, semester.id).into());
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
student = "FPI/ND/CS/21/014"

[[semesters]]
id = "2021-1"
session = "2021/2022"
term = "First Semester"
level = "ND I"
completed = true

[[semesters.courses]]
code = "CSC101"
title = "Introduction to Computing"
units = 3
grade = "A"

[[semesters.courses]]
code = "MTH101"
units = 2
score = 64

[[semesters]]
id = "2021-2"
"#;

    #[test]
    fn test_parse_record() {
        let record = parse_record(SAMPLE, &GradeScale::five_point()).unwrap();

        assert_eq!(record.student, "FPI/ND/CS/21/014");
        assert_eq!(record.semesters.len(), 2);

        let first = &record.semesters[0];
        assert!(first.is_completed);
        assert_eq!(first.term.as_deref(), Some("First Semester"));
        assert_eq!(first.courses.len(), 2);

        let csc = &first.courses.rows()[0].course;
        assert_eq!(csc.title.as_deref(), Some("Introduction to Computing"));
        assert!((csc.credit_units - 3.0).abs() < f64::EPSILON);

        let second = &record.semesters[1];
        assert!(!second.is_completed);
        assert!(second.courses.is_empty());
    }

    #[test]
    fn test_score_resolves_to_grade() {
        let record = parse_record(SAMPLE, &GradeScale::five_point()).unwrap();
        let mth = &record.semesters[0].courses.rows()[1].course;
        assert_eq!(mth.grade_symbol(), Some("B"));
        assert_eq!(mth.score, Some(64.0));
    }

    #[test]
    fn test_explicit_grade_wins_over_score() {
        let content = r#"
student = "s"
[[semesters]]
id = "1"
completed = true
[[semesters.courses]]
code = "CSC101"
units = 3
grade = "C"
score = 95
"#;
        let record = parse_record(content, &GradeScale::five_point()).unwrap();
        assert_eq!(
            record.semesters[0].courses.rows()[0].course.grade_symbol(),
            Some("C")
        );
    }

    #[test]
    fn test_out_of_range_score_fails() {
        let content = r#"
student = "s"
[[semesters]]
id = "1"
[[semesters.courses]]
code = "CSC101"
units = 3
score = 120
"#;
        let err = parse_record(content, &GradeScale::five_point()).unwrap_err();
        assert!(err.to_string().contains("CSC101"));
    }

    #[test]
    fn test_bad_score_on_zero_unit_row_is_ignored() {
        let content = r#"
student = "s"
[[semesters]]
id = "1"
completed = true
[[semesters.courses]]
code = "SIW101"
units = 0
score = 120
[[semesters.courses]]
code = "CSC101"
units = 3
score = 72
"#;
        let scale = GradeScale::five_point();
        let record = parse_record(content, &scale).unwrap();
        let rows = record.semesters[0].courses.rows();
        assert_eq!(rows[0].course.grade_symbol(), None);
        assert_eq!(rows[1].course.grade_symbol(), Some("A"));
        assert!((record.cumulative(&scale).unwrap().cgpa - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_semester_ids_rejected() {
        let content = r#"
student = "s"
[[semesters]]
id = "1"
[[semesters]]
id = "1"
"#;
        let err = parse_record(content, &GradeScale::five_point()).unwrap_err();
        assert!(err.to_string().contains("Duplicate semester id"));
    }

    #[test]
    fn test_unknown_grade_loads_but_fails_aggregation() {
        let content = r#"
student = "s"
[[semesters]]
id = "1"
completed = true
[[semesters.courses]]
code = "CSC101"
units = 3
grade = "Z"
"#;
        let scale = GradeScale::five_point();
        let record = parse_record(content, &scale).unwrap();
        assert!(record.cumulative(&scale).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(load_record("does/not/exist.toml", &GradeScale::five_point()).is_err());
    }
}
