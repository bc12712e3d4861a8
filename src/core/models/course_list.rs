//! Ordered course rows with stable identity

use super::CourseResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a row within one [`CourseList`]
///
/// Ids are handed out in insertion order and never reused, so removing or
/// editing one row never changes which id another row answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseId(u32);

impl CourseId {
    /// Raw numeric value
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A course row together with its id
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRow {
    /// Row identity
    pub id: CourseId,
    /// Row content
    pub course: CourseResult,
}

/// Ordered, indexable collection of course results
///
/// Serializes as a plain sequence of [`CourseResult`]; ids are reassigned in
/// order when a list is deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CourseResult>", into = "Vec<CourseResult>")]
pub struct CourseList {
    rows: Vec<CourseRow>,
    next_id: u32,
}

impl CourseList {
    /// Create an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 0,
        }
    }

    /// Append a course and return its id
    pub fn push(&mut self, course: CourseResult) -> CourseId {
        let id = CourseId(self.next_id);
        self.next_id += 1;
        self.rows.push(CourseRow { id, course });
        id
    }

    /// Look up a course by id
    #[must_use]
    pub fn get(&self, id: CourseId) -> Option<&CourseResult> {
        self.rows
            .iter()
            .find(|row| row.id == id)
            .map(|row| &row.course)
    }

    /// Mutable lookup by id
    pub fn get_mut(&mut self, id: CourseId) -> Option<&mut CourseResult> {
        self.rows
            .iter_mut()
            .find(|row| row.id == id)
            .map(|row| &mut row.course)
    }

    /// Replace the course stored under `id`, returning the previous value.
    ///
    /// # Returns
    /// `None` if no row has that id (the list is left unchanged)
    pub fn replace(&mut self, id: CourseId, course: CourseResult) -> Option<CourseResult> {
        self.get_mut(id)
            .map(|slot| std::mem::replace(slot, course))
    }

    /// Remove the row with `id`, keeping the order of the remaining rows.
    pub fn remove(&mut self, id: CourseId) -> Option<CourseResult> {
        let pos = self.rows.iter().position(|row| row.id == id)?;
        Some(self.rows.remove(pos).course)
    }

    /// Courses in order
    pub fn iter(&self) -> impl Iterator<Item = &CourseResult> {
        self.rows.iter().map(|row| &row.course)
    }

    /// Rows (id + course) in order
    #[must_use]
    pub fn rows(&self) -> &[CourseRow] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the list has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<CourseResult> for CourseList {
    fn from_iter<I: IntoIterator<Item = CourseResult>>(iter: I) -> Self {
        let mut list = Self::new();
        for course in iter {
            list.push(course);
        }
        list
    }
}

impl From<Vec<CourseResult>> for CourseList {
    fn from(courses: Vec<CourseResult>) -> Self {
        courses.into_iter().collect()
    }
}

impl From<CourseList> for Vec<CourseResult> {
    fn from(list: CourseList) -> Self {
        list.rows.into_iter().map(|row| row.course).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str) -> CourseResult {
        CourseResult::new(code.to_string(), 3.0, "A".to_string())
    }

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut list = CourseList::new();
        let first = list.push(course("CSC101"));
        let second = list.push(course("MTH101"));

        assert_ne!(first, second);
        assert!(first < second);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(second).unwrap().code, "MTH101");
    }

    #[test]
    fn test_ids_survive_removal() {
        let mut list = CourseList::new();
        let a = list.push(course("CSC101"));
        let b = list.push(course("MTH101"));
        let c = list.push(course("ENG101"));

        assert_eq!(list.remove(b).unwrap().code, "MTH101");
        assert!(list.get(b).is_none());
        assert_eq!(list.get(a).unwrap().code, "CSC101");
        assert_eq!(list.get(c).unwrap().code, "ENG101");

        // A removed id is never handed out again
        let d = list.push(course("PHY101"));
        assert_ne!(d, b);
        let codes: Vec<&str> = list.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["CSC101", "ENG101", "PHY101"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut list: CourseList = vec![course("CSC101"), course("MTH101")].into();
        let id = list.rows()[0].id;

        let old = list
            .replace(id, CourseResult::new("CSC111".to_string(), 2.0, "B".to_string()))
            .unwrap();
        assert_eq!(old.code, "CSC101");
        assert_eq!(list.rows()[0].course.code, "CSC111");
        assert_eq!(list.rows()[0].id, id);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut list = CourseList::new();
        let id = list.push(course("CSC101"));
        list.remove(id);

        assert!(list.remove(id).is_none());
        assert!(list.replace(id, course("X")).is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_into_vec_preserves_order() {
        let list: CourseList = vec![course("B"), course("A")].into();
        let courses: Vec<CourseResult> = list.into();
        assert_eq!(courses[0].code, "B");
        assert_eq!(courses[1].code, "A");
    }
}
