//! Grading scale: the institution's mapping from grade symbol to grade points.
//!
//! A [`GradeScale`] can only be obtained through validation ([`GradeScale::new`],
//! TOML deserialization, or the built-in [`GradeScale::five_point`]), so every
//! aggregation can assume a well-formed scale.

use crate::core::error::{GradeError, ScaleViolation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Lowest mark a score range may start at.
pub const MIN_SCORE: f64 = 0.0;

/// Highest mark a score range may end at.
pub const MAX_SCORE: f64 = 100.0;

/// Widest allowed step between one band's `max_score` and the next band's
/// `min_score`. Marks are recorded as whole numbers, so 69 → 70 is contiguous.
const MAX_BAND_STEP: f64 = 1.0;

/// Built-in five-point scale
const FIVE_POINT_SCALE: &str = include_str!("../assets/DefaultGradeScale.toml");

/// One row of a grading scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    /// Grade symbol (e.g., "A", "B+")
    pub symbol: String,

    /// Grade points awarded per credit unit
    pub points: f64,

    /// Lowest mark (inclusive) earning this grade
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,

    /// Highest mark (inclusive) earning this grade
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
}

impl GradeEntry {
    /// Create an entry without a score range
    #[must_use]
    pub fn new(symbol: &str, points: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            points,
            min_score: None,
            max_score: None,
        }
    }

    /// Attach an inclusive score range to the entry
    #[must_use]
    pub fn with_range(mut self, min_score: f64, max_score: f64) -> Self {
        self.min_score = Some(min_score);
        self.max_score = Some(max_score);
        self
    }

    fn range(&self) -> Option<(f64, f64)> {
        match (self.min_score, self.max_score) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }
}

/// On-disk shape of a scale file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScaleFile {
    grades: Vec<GradeEntry>,
}

/// A validated grading scale
///
/// Invariants: at least one entry, symbols unique (case-insensitive) and
/// non-blank, points finite and non-negative, and score ranges either absent
/// everywhere or present everywhere, disjoint, and covering `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScaleFile", into = "ScaleFile")]
pub struct GradeScale {
    entries: Vec<GradeEntry>,
}

impl GradeScale {
    /// Build a scale from entries, checking every invariant.
    ///
    /// # Errors
    /// Returns [`GradeError::InvalidScale`] naming the first violated invariant.
    pub fn new(entries: Vec<GradeEntry>) -> Result<Self, GradeError> {
        validate_entries(&entries)?;
        Ok(Self { entries })
    }

    /// The built-in five-point scale: A=5 (70-100), B=4 (60-69), C=3 (50-59),
    /// D=2 (45-49), E=1 (40-44), F=0 (0-39).
    ///
    /// # Panics
    /// Panics if the compiled-in scale asset is invalid, which the test suite rules out.
    #[must_use]
    pub fn five_point() -> Self {
        Self::from_toml(FIVE_POINT_SCALE).expect("Failed to parse compiled-in grading scale")
    }

    /// Parse and validate a scale from TOML (`[[grades]]` tables).
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or the scale is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load a scale file from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Serialize the scale back to TOML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Grade points for a symbol. Lookup ignores surrounding whitespace and case.
    ///
    /// # Errors
    /// Returns [`GradeError::UnknownGrade`] if the symbol is not on the scale.
    pub fn points_for(&self, grade: &str) -> Result<f64, GradeError> {
        self.entry(grade)
            .map(|entry| entry.points)
            .ok_or_else(|| GradeError::UnknownGrade {
                symbol: grade.trim().to_string(),
                course: None,
            })
    }

    /// Find the entry for a symbol, if any
    #[must_use]
    pub fn entry(&self, grade: &str) -> Option<&GradeEntry> {
        let wanted = grade.trim();
        self.entries
            .iter()
            .find(|entry| entry.symbol.trim().eq_ignore_ascii_case(wanted))
    }

    /// Whether the scale defines a symbol
    #[must_use]
    pub fn contains(&self, grade: &str) -> bool {
        self.entry(grade).is_some()
    }

    /// Resolve a raw mark to the grade symbol whose band contains it.
    ///
    /// The band with the greatest `min_score` not above the mark wins, so a
    /// fractional mark between two whole-number bands (69.5) falls to the lower one.
    ///
    /// # Errors
    /// Returns [`GradeError::ScoreOutOfRange`] if the mark is outside `0..=100`,
    /// is NaN, or the scale carries no score ranges.
    pub fn symbol_for_score(&self, score: f64) -> Result<&str, GradeError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(GradeError::ScoreOutOfRange(score));
        }

        self.entries
            .iter()
            .filter_map(|entry| entry.range().map(|(min, _)| (min, entry)))
            .filter(|(min, _)| *min <= score)
            .max_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, entry)| entry.symbol.as_str())
            .ok_or(GradeError::ScoreOutOfRange(score))
    }

    /// Whether the scale maps raw marks to grades
    #[must_use]
    pub fn has_score_ranges(&self) -> bool {
        self.entries.iter().all(|entry| entry.range().is_some())
    }

    /// Entries in the order they were defined
    #[must_use]
    pub fn entries(&self) -> &[GradeEntry] {
        &self.entries
    }

    /// Highest points value on the scale
    #[must_use]
    pub fn max_points(&self) -> f64 {
        self.entries
            .iter()
            .map(|entry| entry.points)
            .fold(0.0, f64::max)
    }

    /// Number of grades on the scale
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the scale has no grades (never true once validated)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        Self::five_point()
    }
}

impl TryFrom<ScaleFile> for GradeScale {
    type Error = GradeError;

    fn try_from(file: ScaleFile) -> Result<Self, Self::Error> {
        Self::new(file.grades)
    }
}

impl From<GradeScale> for ScaleFile {
    fn from(scale: GradeScale) -> Self {
        Self {
            grades: scale.entries,
        }
    }
}

fn validate_entries(entries: &[GradeEntry]) -> Result<(), ScaleViolation> {
    if entries.is_empty() {
        return Err(ScaleViolation::Empty);
    }

    let mut seen = HashSet::new();
    for entry in entries {
        let symbol = entry.symbol.trim();
        if symbol.is_empty() {
            return Err(ScaleViolation::BlankSymbol);
        }
        if !seen.insert(symbol.to_ascii_uppercase()) {
            return Err(ScaleViolation::DuplicateSymbol(symbol.to_string()));
        }
        if !entry.points.is_finite() || entry.points < 0.0 {
            return Err(ScaleViolation::InvalidPoints {
                symbol: symbol.to_string(),
                points: entry.points,
            });
        }
    }

    let ranged = entries.iter().filter(|e| e.range().is_some()).count();
    if ranged == 0 {
        return Ok(());
    }
    if let Some(missing) = entries.iter().find(|e| e.range().is_none()) {
        return Err(ScaleViolation::PartialRanges(missing.symbol.clone()));
    }

    validate_ranges(entries)
}

fn validate_ranges(entries: &[GradeEntry]) -> Result<(), ScaleViolation> {
    let mut bands: Vec<(f64, f64, &str)> = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some((min, max)) = entry.range() else {
            continue;
        };
        let in_domain = (MIN_SCORE..=MAX_SCORE).contains(&min) && (MIN_SCORE..=MAX_SCORE).contains(&max);
        if !in_domain || min > max {
            return Err(ScaleViolation::InvalidRange {
                symbol: entry.symbol.clone(),
                min,
                max,
            });
        }
        bands.push((min, max, entry.symbol.as_str()));
    }

    bands.sort_by(|a, b| a.0.total_cmp(&b.0));

    let (first_min, _, _) = bands[0];
    if first_min > MIN_SCORE {
        return Err(ScaleViolation::UncoveredScores {
            from: MIN_SCORE,
            to: first_min,
        });
    }

    for pair in bands.windows(2) {
        let (_, prev_max, prev_symbol) = pair[0];
        let (next_min, _, next_symbol) = pair[1];
        if next_min <= prev_max {
            return Err(ScaleViolation::OverlappingRanges(
                prev_symbol.to_string(),
                next_symbol.to_string(),
            ));
        }
        if next_min - prev_max > MAX_BAND_STEP {
            return Err(ScaleViolation::UncoveredScores {
                from: prev_max,
                to: next_min,
            });
        }
    }

    let (_, last_max, _) = bands[bands.len() - 1];
    if last_max < MAX_SCORE {
        return Err(ScaleViolation::UncoveredScores {
            from: last_max,
            to: MAX_SCORE,
        });
    }

    Ok(())
}
