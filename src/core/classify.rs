//! Performance classifier: maps a GPA or CGPA to a tier label.
//!
//! Tiers have inclusive lower bounds and are checked from the highest bound
//! down; the first match wins. Values are clamped into `0.0..=5.0` first, so
//! bad upstream data produces an extreme tier instead of a failure.
//!
//! Two threshold tables are in use across the product: the dashboard table
//! ([`TierTable::standard`], Excellent from 4.5) and the quick-entry table
//! ([`TierTable::quick_entry`], Excellent from 4.0). Both are provided as
//! presets; which one applies is a configuration decision.

use crate::core::error::{GradeError, TierViolation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Upper end of the grade-point range tiers are defined over
pub const GRADE_POINT_CEILING: f64 = 5.0;

/// A labelled band of grade points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTier {
    /// Display label (e.g., "Very Good")
    pub label: String,
    /// Inclusive lower bound
    pub min: f64,
}

impl PerformanceTier {
    /// Create a tier
    #[must_use]
    pub fn new(label: &str, min: f64) -> Self {
        Self {
            label: label.to_string(),
            min,
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TierFile {
    tiers: Vec<PerformanceTier>,
}

/// A validated tier table, stored highest bound first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TierFile", into = "TierFile")]
pub struct TierTable {
    tiers: Vec<PerformanceTier>,
}

impl TierTable {
    /// Build a table from tiers in any order.
    ///
    /// # Errors
    /// Returns [`GradeError::InvalidTiers`] if the table is empty, a label is
    /// blank or repeated, a bound is outside `0.0..=5.0` or repeated, or no
    /// tier starts at `0.0`.
    pub fn new(mut tiers: Vec<PerformanceTier>) -> Result<Self, GradeError> {
        if tiers.is_empty() {
            return Err(TierViolation::Empty.into());
        }

        let mut labels = HashSet::new();
        for tier in &tiers {
            let label = tier.label.trim();
            if label.is_empty() {
                return Err(TierViolation::BlankLabel.into());
            }
            if !labels.insert(label.to_lowercase()) {
                return Err(TierViolation::DuplicateLabel(label.to_string()).into());
            }
            if !(0.0..=GRADE_POINT_CEILING).contains(&tier.min) {
                return Err(TierViolation::BoundOutOfRange {
                    label: label.to_string(),
                    min: tier.min,
                }
                .into());
            }
        }

        tiers.sort_by(|a, b| b.min.total_cmp(&a.min));

        for pair in tiers.windows(2) {
            if pair[0].min.total_cmp(&pair[1].min).is_eq() {
                return Err(TierViolation::DuplicateBound(
                    pair[0].label.clone(),
                    pair[1].label.clone(),
                )
                .into());
            }
        }

        if tiers.last().is_some_and(|floor| floor.min > 0.0) {
            return Err(TierViolation::MissingFloor.into());
        }

        Ok(Self { tiers })
    }

    /// Dashboard thresholds: Excellent ≥ 4.5, Very Good ≥ 3.5, Good ≥ 2.5,
    /// Fair ≥ 2.0, otherwise Needs Improvement.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                PerformanceTier::new("Excellent", 4.5),
                PerformanceTier::new("Very Good", 3.5),
                PerformanceTier::new("Good", 2.5),
                PerformanceTier::new("Fair", 2.0),
                PerformanceTier::new("Needs Improvement", 0.0),
            ],
        }
    }

    /// Quick-entry thresholds: Excellent ≥ 4.0, Good ≥ 3.5, Satisfactory ≥ 2.5,
    /// otherwise Needs Improvement.
    #[must_use]
    pub fn quick_entry() -> Self {
        Self {
            tiers: vec![
                PerformanceTier::new("Excellent", 4.0),
                PerformanceTier::new("Good", 3.5),
                PerformanceTier::new("Satisfactory", 2.5),
                PerformanceTier::new("Needs Improvement", 0.0),
            ],
        }
    }

    /// Table for a named preset
    #[must_use]
    pub fn preset(preset: TierPreset) -> Self {
        match preset {
            TierPreset::Standard => Self::standard(),
            TierPreset::QuickEntry => Self::quick_entry(),
        }
    }

    /// Parse and validate a table from TOML (`[[tiers]] label, min`).
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or the table is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load a tier file from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Classify a grade-point value. Out-of-range values are clamped first.
    #[must_use]
    pub fn classify(&self, value: f64) -> &PerformanceTier {
        let value = clamp_grade_points(value);
        self.tiers
            .iter()
            .find(|tier| value >= tier.min)
            .unwrap_or_else(|| self.floor())
    }

    /// Tiers, highest bound first
    #[must_use]
    pub fn tiers(&self) -> &[PerformanceTier] {
        &self.tiers
    }

    fn floor(&self) -> &PerformanceTier {
        // Construction guarantees a non-empty table ending at 0.0
        &self.tiers[self.tiers.len() - 1]
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<TierFile> for TierTable {
    type Error = GradeError;

    fn try_from(file: TierFile) -> Result<Self, Self::Error> {
        Self::new(file.tiers)
    }
}

impl From<TierTable> for TierFile {
    fn from(table: TierTable) -> Self {
        Self { tiers: table.tiers }
    }
}

/// Clamp a value into `0.0..=5.0`; NaN maps to `0.0`.
#[must_use]
pub fn clamp_grade_points(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, GRADE_POINT_CEILING)
    }
}

/// Named threshold presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierPreset {
    /// Dashboard table (Excellent from 4.5)
    #[default]
    Standard,
    /// Quick-entry table (Excellent from 4.0)
    QuickEntry,
}

impl FromStr for TierPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "dashboard" | "" => Ok(Self::Standard),
            "quick-entry" | "quick_entry" | "quick" => Ok(Self::QuickEntry),
            _ => Err(format!("Unknown tier preset: {s}")),
        }
    }
}

impl fmt::Display for TierPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::QuickEntry => write!(f, "quick-entry"),
        }
    }
}
