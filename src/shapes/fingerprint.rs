//! Shape fingerprints and the fingerprint → color table.
//!
//! A fingerprint is the shape's fret offsets relative to its lowest fret,
//! read from the lowest string upward. The A major root-position shape on
//! the top three strings, frets 14/14/12, becomes `"220"`.
//!
//! The twelve entries of the color table are every closed-voicing triad
//! shape on the four adjacent three-string groups, in all three inversions,
//! major and minor. Several voicings share a fingerprint (e.g. `"220"` is
//! both the major root position on the top strings and the minor second
//! inversion on the bottom strings); they share its color.

use crate::tuning::FretPosition;
use serde::Serialize;
use std::fmt;

/// Color for shapes that are not in the table.
pub const NEUTRAL_COLOR: &str = "#9ca3af";

const SHAPE_COLORS: [(&str, &str); 12] = [
    ("000", "#ef4444"),
    ("010", "#f97316"),
    ("100", "#f59e0b"),
    ("101", "#eab308"),
    ("110", "#84cc16"),
    ("120", "#22c55e"),
    ("200", "#14b8a6"),
    ("201", "#06b6d4"),
    ("210", "#3b82f6"),
    ("220", "#6366f1"),
    ("310", "#a855f7"),
    ("320", "#ec4899"),
];

/// Normalized relative-fret encoding of a shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(positions: impl IntoIterator<Item = FretPosition>) -> Self {
        let mut positions: Vec<FretPosition> = positions.into_iter().collect();
        positions.sort_by_key(|p| p.string);
        let base = positions.iter().map(|p| p.fret).min().unwrap_or(0);
        Fingerprint(positions.iter().map(|p| (p.fret - base).to_string()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Table color for this fingerprint, or [`NEUTRAL_COLOR`].
    pub fn color(&self) -> &'static str {
        SHAPE_COLORS
            .iter()
            .find(|(fp, _)| *fp == self.0)
            .map(|(_, color)| *color)
            .unwrap_or(NEUTRAL_COLOR)
    }

    pub fn is_known(&self) -> bool {
        SHAPE_COLORS.iter().any(|(fp, _)| *fp == self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every fingerprint with an assigned color.
pub fn known_fingerprints() -> impl Iterator<Item = &'static str> {
    SHAPE_COLORS.iter().map(|(fp, _)| *fp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_sorted_by_string_and_normalized() {
        let fp = Fingerprint::of([
            FretPosition::new(5, 12),
            FretPosition::new(3, 14),
            FretPosition::new(4, 14),
        ]);
        assert_eq!(fp.as_str(), "220");
        assert_eq!(fp.color(), "#6366f1");
    }

    #[test]
    fn test_fingerprint_ignores_absolute_position() {
        let low = Fingerprint::of([FretPosition::new(0, 3), FretPosition::new(1, 2), FretPosition::new(2, 0)]);
        let high = Fingerprint::of([FretPosition::new(0, 15), FretPosition::new(1, 14), FretPosition::new(2, 12)]);
        assert_eq!(low, high);
        assert_eq!(low.as_str(), "320");
    }

    #[test]
    fn test_unknown_fingerprint_is_gray() {
        let fp = Fingerprint::of([FretPosition::new(0, 0), FretPosition::new(1, 3), FretPosition::new(2, 0)]);
        assert_eq!(fp.as_str(), "030");
        assert!(!fp.is_known());
        assert_eq!(fp.color(), NEUTRAL_COLOR);
    }

    #[test]
    fn test_table_has_twelve_distinct_entries() {
        let mut all: Vec<&str> = known_fingerprints().collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 12);
    }
}
