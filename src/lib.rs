//! Shared library for `gradepoint`
//! Contains the grade-point engine plus the configuration, loading and reporting
//! layers used by the CLI.

pub mod core;
pub mod logger;

pub use crate::core::{config, get_version};
