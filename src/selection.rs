//! Sets of fretboard positions chosen by the player or a landing page.

use crate::pitch::PitchClass;
use crate::tuning::{FretPosition, Tuning, STRING_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Filter describing which positions a drill may ask about.
///
/// Explicit `positions` take priority. Otherwise a position is selected
/// when its string is in `strings` and its note is in `notes`; a missing
/// list means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<PitchClass>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strings: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<FretPosition>>,
}

impl Selection {
    /// Every position on the board.
    pub fn all() -> Self {
        Self::default()
    }

    /// Expand into concrete positions over frets `0..=fret_count`.
    ///
    /// ```
    /// use fretboard::{PitchClass, Selection, Tuning};
    ///
    /// let selection = Selection {
    ///     notes: Some(vec![PitchClass::A]),
    ///     strings: Some(vec![0]),
    ///     positions: None,
    /// };
    /// let cells = selection.expand(&Tuning::standard(), 15);
    /// let frets: Vec<usize> = cells.iter().map(|p| p.fret).collect();
    /// assert_eq!(frets, vec![5]);
    /// ```
    pub fn expand(&self, tuning: &Tuning, fret_count: usize) -> BTreeSet<FretPosition> {
        if let Some(positions) = &self.positions {
            return positions
                .iter()
                .copied()
                .filter(|p| p.fret <= fret_count)
                .collect();
        }

        let all_strings: Vec<usize> = (0..STRING_COUNT).collect();
        let strings = self.strings.as_deref().unwrap_or(&all_strings);
        let notes = self.notes.as_deref().unwrap_or(&PitchClass::ALL);

        strings
            .iter()
            .filter(|&&s| s < STRING_COUNT)
            .flat_map(|&string| (0..=fret_count).map(move |fret| FretPosition::new(string, fret)))
            .filter(|&pos| notes.contains(&tuning.note_at(pos)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selects_whole_board() {
        let cells = Selection::all().expand(&Tuning::standard(), 12);
        assert_eq!(cells.len(), 6 * 13);
    }

    #[test]
    fn test_notes_and_strings_combine() {
        let selection = Selection {
            notes: Some(vec![PitchClass::E, PitchClass::G]),
            strings: Some(vec![0, 5]),
            positions: None,
        };
        let cells = selection.expand(&Tuning::standard(), 12);
        let expected: BTreeSet<FretPosition> = [(0, 0), (0, 3), (0, 12), (5, 0), (5, 3), (5, 12)]
            .into_iter()
            .map(|(s, f)| FretPosition::new(s, f))
            .collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_explicit_positions_win() {
        let selection = Selection {
            notes: Some(vec![PitchClass::C]),
            strings: None,
            positions: Some(vec![FretPosition::new(2, 2), FretPosition::new(3, 20)]),
        };
        let cells = selection.expand(&Tuning::standard(), 15);
        assert_eq!(cells.into_iter().collect::<Vec<_>>(), vec![FretPosition::new(2, 2)]);
    }

    #[test]
    fn test_empty_lists_select_nothing() {
        let tuning = Tuning::standard();
        let no_notes = Selection {
            notes: Some(vec![]),
            ..Selection::default()
        };
        let no_strings = Selection {
            strings: Some(vec![]),
            ..Selection::default()
        };
        assert!(no_notes.expand(&tuning, 15).is_empty());
        assert!(no_strings.expand(&tuning, 15).is_empty());
    }
}
