//! Data models for `gradepoint`

pub mod course;
pub mod course_list;
pub mod record;
pub mod semester;

pub use course::CourseResult;
pub use course_list::{CourseId, CourseList, CourseRow};
pub use record::AcademicRecord;
pub use semester::SemesterRecord;
