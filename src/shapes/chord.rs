//! Chord specification types: root, quality, chord tones and inversions.

use crate::error::FretError;
use crate::pitch::PitchClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Triad quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    #[default]
    Major,
    Minor,
}

impl ChordQuality {
    /// Semitones from the root to the third.
    pub fn third_interval(self) -> i32 {
        match self {
            ChordQuality::Major => 4,
            ChordQuality::Minor => 3,
        }
    }
}

impl FromStr for ChordQuality {
    type Err = FretError;

    /// Parse "major"/"maj" or "minor"/"min"/"m".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "m" {
            return Ok(ChordQuality::Minor);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "major" | "maj" => Ok(ChordQuality::Major),
            "minor" | "min" => Ok(ChordQuality::Minor),
            _ => Err(FretError::InvalidChordQuality(s.to_string())),
        }
    }
}

/// Interval perfect fifth, common to both qualities.
pub const FIFTH_INTERVAL: i32 = 7;

/// Role of a note within a triad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordTone {
    Root,
    Third,
    Fifth,
}

impl ChordTone {
    /// Fretboard label: "1", "3"/"b3", "5".
    pub fn label(self, quality: ChordQuality) -> &'static str {
        match (self, quality) {
            (ChordTone::Root, _) => "1",
            (ChordTone::Third, ChordQuality::Major) => "3",
            (ChordTone::Third, ChordQuality::Minor) => "b3",
            (ChordTone::Fifth, _) => "5",
        }
    }

    pub(crate) fn bit(self) -> u8 {
        match self {
            ChordTone::Root => 0b001,
            ChordTone::Third => 0b010,
            ChordTone::Fifth => 0b100,
        }
    }
}

/// Bitmask with every chord tone present.
pub(crate) const ALL_TONES: u8 = 0b111;

/// Which chord tone sits on the shape's lowest string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Inversion {
    RootPosition,
    First,
    Second,
}

impl Inversion {
    pub fn from_bass(tone: ChordTone) -> Self {
        match tone {
            ChordTone::Root => Inversion::RootPosition,
            ChordTone::Third => Inversion::First,
            ChordTone::Fifth => Inversion::Second,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Inversion::RootPosition => "Root Pos",
            Inversion::First => "1st Inv",
            Inversion::Second => "2nd Inv",
        }
    }
}

/// A triad to highlight, with the strings it may occupy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordSpec {
    pub root: PitchClass,
    pub quality: ChordQuality,
    pub active_strings: BTreeSet<usize>,
}

impl ChordSpec {
    pub fn new(root: PitchClass, quality: ChordQuality, active_strings: impl IntoIterator<Item = usize>) -> Self {
        Self {
            root,
            quality,
            active_strings: active_strings.into_iter().collect(),
        }
    }

    pub fn third(&self) -> PitchClass {
        self.root.transpose(self.quality.third_interval())
    }

    pub fn fifth(&self) -> PitchClass {
        self.root.transpose(FIFTH_INTERVAL)
    }

    /// Root, third and fifth pitch classes.
    pub fn tones(&self) -> [PitchClass; 3] {
        [self.root, self.third(), self.fifth()]
    }

    /// The role `pitch_class` plays in this chord, if any.
    pub fn tone_of(&self, pitch_class: PitchClass) -> Option<ChordTone> {
        if pitch_class == self.root {
            Some(ChordTone::Root)
        } else if pitch_class == self.third() {
            Some(ChordTone::Third)
        } else if pitch_class == self.fifth() {
            Some(ChordTone::Fifth)
        } else {
            None
        }
    }

    /// Fretboard label for `pitch_class`, if it is a chord tone.
    pub fn label_for(&self, pitch_class: PitchClass) -> Option<&'static str> {
        self.tone_of(pitch_class).map(|tone| tone.label(self.quality))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_and_minor_tones() {
        let a_major = ChordSpec::new(PitchClass::A, ChordQuality::Major, [3, 4, 5]);
        assert_eq!(a_major.tones(), [PitchClass::A, PitchClass::CSharp, PitchClass::E]);

        let e_minor = ChordSpec::new(PitchClass::E, ChordQuality::Minor, [0, 1, 2]);
        assert_eq!(e_minor.tones(), [PitchClass::E, PitchClass::G, PitchClass::B]);
    }

    #[test]
    fn test_labels() {
        let c_minor = ChordSpec::new(PitchClass::C, ChordQuality::Minor, [0]);
        assert_eq!(c_minor.label_for(PitchClass::C), Some("1"));
        assert_eq!(c_minor.label_for(PitchClass::DSharp), Some("b3"));
        assert_eq!(c_minor.label_for(PitchClass::G), Some("5"));
        assert_eq!(c_minor.label_for(PitchClass::E), None);

        let c_major = ChordSpec::new(PitchClass::C, ChordQuality::Major, [0]);
        assert_eq!(c_major.label_for(PitchClass::E), Some("3"));
    }

    #[test]
    fn test_quality_parsing() {
        assert_eq!("major".parse(), Ok(ChordQuality::Major));
        assert_eq!(" maj ".parse(), Ok(ChordQuality::Major));
        assert_eq!("Minor".parse(), Ok(ChordQuality::Minor));
        assert_eq!("m".parse(), Ok(ChordQuality::Minor));
        // Only the bare lowercase "m" means minor.
        assert_eq!(
            "M".parse::<ChordQuality>(),
            Err(FretError::InvalidChordQuality("M".to_string()))
        );
        assert_eq!(
            "dim".parse::<ChordQuality>().unwrap_err().to_string(),
            "Unknown chord quality: dim"
        );
    }
}
