//! Landing-page configuration records.
//!
//! Each record is a small YAML document:
//!
//! ```yaml
//! slug: low-e-naturals
//! title: Natural notes on the low E string
//! description: Learn the seven naturals on string six.
//! gameSettings:
//!   initialNotes: [C, D, E, F, G, A, B]
//!   initialStrings: [0]
//! ```
//!
//! `initialPositions` (a list of `"string-fret"` strings) overrides the
//! note and string filters.

use crate::error::FretError;
use crate::pitch::PitchClass;
use crate::selection::Selection;
use crate::tuning::{FretPosition, Tuning, STRING_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub game_settings: Selection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage {
    slug: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    game_settings: RawGameSettings,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawGameSettings {
    initial_notes: Option<Vec<String>>,
    initial_strings: Option<Vec<usize>>,
    initial_positions: Option<Vec<String>>,
}

impl PageConfig {
    /// Parse a page record.
    ///
    /// ```
    /// use fretboard::{PageConfig, PitchClass};
    ///
    /// let page = PageConfig::from_yaml(
    ///     "slug: sharps\ntitle: Sharps\ngameSettings:\n  initialNotes: [C#, Eb]\n",
    /// ).unwrap();
    /// assert_eq!(page.game_settings.notes, Some(vec![PitchClass::CSharp, PitchClass::DSharp]));
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, FretError> {
        let raw: RawPage =
            serde_yaml::from_str(content).map_err(|e| FretError::Config(e.to_string()))?;

        if raw.slug.trim().is_empty() {
            return Err(FretError::Config("page slug is empty".to_string()));
        }

        let settings = raw.game_settings;
        let notes = match settings.initial_notes {
            Some(names) => Some(
                names
                    .iter()
                    .map(|n| n.parse::<PitchClass>())
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        if let Some(strings) = &settings.initial_strings {
            if let Some(bad) = strings.iter().find(|&&s| s >= STRING_COUNT) {
                return Err(FretError::Config(format!("string {} is off the neck", bad)));
            }
        }

        let positions = match settings.initial_positions {
            Some(coords) => Some(
                coords
                    .iter()
                    .map(|c| c.parse::<FretPosition>())
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        Ok(PageConfig {
            slug: raw.slug,
            title: raw.title,
            description: raw.description,
            game_settings: Selection {
                notes,
                strings: settings.initial_strings,
                positions,
            },
        })
    }
}

/// Positions a page starts weighted recall with.
pub fn load_initial_selection(
    config: &PageConfig,
    tuning: &Tuning,
    fret_count: usize,
) -> BTreeSet<FretPosition> {
    config.game_settings.expand(tuning, fret_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOW_E: &str = r#"
slug: low-e-naturals
title: Natural notes on the low E string
description: Learn the seven naturals on string six.
gameSettings:
  initialNotes: [C, D, E, F, G, A, B]
  initialStrings: [0]
"#;

    #[test]
    fn test_parse_page() {
        let page = PageConfig::from_yaml(LOW_E).unwrap();
        assert_eq!(page.slug, "low-e-naturals");
        assert_eq!(page.game_settings.strings, Some(vec![0]));
        assert_eq!(page.game_settings.notes.as_ref().map(Vec::len), Some(7));
    }

    #[test]
    fn test_initial_selection() {
        let page = PageConfig::from_yaml(LOW_E).unwrap();
        let cells = load_initial_selection(&page, &Tuning::standard(), 12);
        let frets: Vec<usize> = cells.iter().map(|p| p.fret).collect();
        // E F G A B C D E on the low string.
        assert_eq!(frets, vec![0, 1, 3, 5, 7, 8, 10, 12]);
        assert!(cells.iter().all(|p| p.string == 0));
    }

    #[test]
    fn test_missing_game_settings_selects_everything() {
        let page = PageConfig::from_yaml("slug: all\ntitle: Everything\n").unwrap();
        assert_eq!(page.game_settings, Selection::all());
        assert_eq!(load_initial_selection(&page, &Tuning::standard(), 12).len(), 78);
    }

    #[test]
    fn test_positions_override() {
        let yaml = "slug: p\ntitle: P\ngameSettings:\n  initialNotes: [C]\n  initialPositions: [\"0-5\", \"5-22\"]\n";
        let page = PageConfig::from_yaml(yaml).unwrap();
        let cells = load_initial_selection(&page, &Tuning::standard(), 15);
        assert_eq!(cells.into_iter().collect::<Vec<_>>(), vec![FretPosition::new(0, 5)]);
    }

    #[test]
    fn test_rejects_bad_records() {
        assert!(matches!(
            PageConfig::from_yaml("title: no slug"),
            Err(FretError::Config(_))
        ));
        assert!(matches!(
            PageConfig::from_yaml("slug: x\ntitle: X\ngameSettings:\n  initialNotes: [H]\n"),
            Err(FretError::InvalidNote(_))
        ));
        assert!(matches!(
            PageConfig::from_yaml("slug: x\ntitle: X\ngameSettings:\n  initialPositions: [\"7-1\"]\n"),
            Err(FretError::InvalidPosition(_))
        ));
        assert!(matches!(
            PageConfig::from_yaml("slug: x\ntitle: X\ngameSettings:\n  initialStrings: [6]\n"),
            Err(FretError::Config(_))
        ));
    }
}
