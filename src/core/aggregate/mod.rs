//! Semester and cumulative aggregation.
//!
//! Both levels sum quality points and credit units first and divide once at the
//! end. A zero credit total yields a GPA of `0.0` rather than an error.

pub mod cumulative;
pub mod semester;

pub use cumulative::{combine, cumulative, current_gpa, CumulativeTotals};
pub use semester::{aggregate, SemesterTotals};

/// `quality_points / credit_units`, or `0.0` when no units were counted
#[must_use]
pub fn weighted_average(quality_points: f64, credit_units: f64) -> f64 {
    if credit_units > 0.0 {
        quality_points / credit_units
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_average_divides() {
        assert!((weighted_average(23.0, 7.0) - 23.0 / 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weighted_average_zero_units() {
        assert!(weighted_average(0.0, 0.0).abs() < f64::EPSILON);
        assert!(weighted_average(10.0, 0.0).abs() < f64::EPSILON);
    }
}
