//! Core module: the grade-point engine and the layers that feed it.
//!
//! Data flows one way: [`grading`] → [`evaluator`] → [`aggregate`] → [`classify`].
//! [`models`], [`loader`] and [`report`] supply inputs and present outputs.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod grading;
pub mod loader;
pub mod models;
pub mod report;
pub mod summary;

pub use error::{GradeError, ScaleViolation, TierViolation};

/// Returns the current version of the `gradepoint` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
