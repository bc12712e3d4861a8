//! CLI command handlers for `gradepoint`.
//!
//! Each command is implemented in its own submodule and returns a
//! user-facing error message on failure.

pub mod config;
pub mod gpa;
pub mod report;
pub mod scale;
pub mod summary;

use gradepoint::config::Config;
use gradepoint::core::classify::TierTable;
use gradepoint::core::grading::GradeScale;
use gradepoint::debug;
use std::path::{Path, PathBuf};

/// Scale and tier table selected by the effective configuration
pub fn grading_setup(config: &Config) -> Result<(GradeScale, TierTable), String> {
    let scale = config.grade_scale().map_err(|e| format!("✗ {e}"))?;
    let tiers = config.tier_table().map_err(|e| format!("✗ {e}"))?;
    debug!(
        "Using {} grades (max {:.1} points) and {} tiers",
        scale.len(),
        scale.max_points(),
        tiers.tiers().len()
    );
    Ok((scale, tiers))
}

/// Resolve a record path: as given if it exists, else under `paths.records_dir`
pub fn resolve_record_path(path: &Path, config: &Config) -> PathBuf {
    if path.exists() || path.is_absolute() || config.paths.records_dir.is_empty() {
        return path.to_path_buf();
    }
    let candidate = Path::new(&config.paths.records_dir).join(path);
    if candidate.exists() {
        debug!("Resolved {} to {}", path.display(), candidate.display());
        candidate
    } else {
        path.to_path_buf()
    }
}
