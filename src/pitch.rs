//! # Pitch Module
//!
//! Pitch classes, octave-qualified pitches and note-name spelling.
//!
//! ## Spelling
//! Pitch classes are stored as a semitone index (0 = C ... 11 = B). The
//! canonical spelling uses sharps (`C#`, `D#`, `F#`, `G#`, `A#`); with
//! [`Accidentals::Flat`] the five accidental classes are shown as `Db`,
//! `Eb`, `Gb`, `Ab` and `Bb`. Naturals are never respelled.
//!
//! ## Example
//! ```rust
//! use fretboard::{format_for_display, Accidentals, PitchClass};
//!
//! let pc: PitchClass = "Bb".parse().unwrap();
//! assert_eq!(pc, PitchClass::ASharp);
//! assert_eq!(format_for_display(pc, Accidentals::Sharp), "A#");
//! assert_eq!(format_for_display(pc, Accidentals::Flat), "Bb");
//! ```

use crate::error::FretError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the twelve equal-tempered pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// All pitch classes in semitone order starting from C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Semitone offset from C (0..=11).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Pitch class for any semitone count, wrapping modulo 12.
    pub fn from_semitone(semitone: i32) -> Self {
        Self::ALL[semitone.rem_euclid(12) as usize]
    }

    /// The pitch class `semitones` above this one.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_semitone(self.index() as i32 + semitones)
    }

    /// Sharp spelling ("C", "C#", ...).
    pub fn name(self) -> &'static str {
        SHARP_NAMES[self.index()]
    }

    /// Whether this pitch class has a natural spelling.
    pub fn is_natural(self) -> bool {
        !SHARP_NAMES[self.index()].ends_with('#')
    }
}

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = FretError;

    /// Accepts sharp or flat spellings, e.g. "C#", "Db", "a", "bb".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .ok_or_else(|| FretError::InvalidNote(s.to_string()))?;
        let base: i32 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(FretError::InvalidNote(s.to_string())),
        };
        let accidental = match chars.as_str() {
            "" => 0,
            "#" | "♯" => 1,
            "b" | "♭" => -1,
            _ => return Err(FretError::InvalidNote(s.to_string())),
        };
        let semitone = base + accidental;
        // Only the five black keys have accidental spellings here.
        if accidental != 0 && Self::from_semitone(semitone).is_natural() {
            return Err(FretError::InvalidNote(s.to_string()));
        }
        Ok(Self::from_semitone(semitone))
    }
}

impl TryFrom<String> for PitchClass {
    type Error = FretError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> Self {
        pc.name().to_string()
    }
}

/// Preferred spelling for the five accidental pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidentals {
    #[default]
    Sharp,
    Flat,
}

/// Spell a pitch class for display.
///
/// Flat preference substitutes `Db Eb Gb Ab Bb` for the accidental classes;
/// naturals are returned unchanged under either preference.
pub fn format_for_display(pitch_class: PitchClass, preference: Accidentals) -> &'static str {
    match preference {
        Accidentals::Sharp => SHARP_NAMES[pitch_class.index()],
        Accidentals::Flat => FLAT_NAMES[pitch_class.index()],
    }
}

/// A pitch class in a specific octave (scientific pitch notation, C4 = middle C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pitch {
    pub pitch_class: PitchClass,
    pub octave: i32,
}

impl Pitch {
    pub const fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Self { pitch_class, octave }
    }

    /// Absolute semitone number counted from C0.
    pub fn semitone(self) -> i32 {
        self.octave * 12 + self.pitch_class.index() as i32
    }

    /// Inverse of [`Pitch::semitone`].
    pub fn from_semitone(semitone: i32) -> Self {
        Self {
            pitch_class: PitchClass::from_semitone(semitone),
            octave: semitone.div_euclid(12),
        }
    }

    /// This pitch raised by `semitones`.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_semitone(self.semitone() + semitones)
    }

    /// MIDI note number (C4 = 60).
    pub fn midi(self) -> i32 {
        self.semitone() + 12
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sharp_and_flat_spellings() {
        assert_eq!("C".parse::<PitchClass>().unwrap(), PitchClass::C);
        assert_eq!("C#".parse::<PitchClass>().unwrap(), PitchClass::CSharp);
        assert_eq!("Db".parse::<PitchClass>().unwrap(), PitchClass::CSharp);
        assert_eq!("bb".parse::<PitchClass>().unwrap(), PitchClass::ASharp);
        assert_eq!(" g# ".parse::<PitchClass>().unwrap(), PitchClass::GSharp);
    }

    #[test]
    fn test_parse_rejects_unknown_spellings() {
        assert!("H".parse::<PitchClass>().is_err());
        assert!("".parse::<PitchClass>().is_err());
        assert!("C##".parse::<PitchClass>().is_err());
        // No enharmonic naturals: E# and Cb are not accepted.
        assert!("E#".parse::<PitchClass>().is_err());
        assert!("Cb".parse::<PitchClass>().is_err());
    }

    #[test]
    fn test_format_for_display_is_idempotent_for_sharps() {
        for pc in PitchClass::ALL {
            let first = format_for_display(pc, Accidentals::Sharp);
            let second = format_for_display(pc, Accidentals::Sharp);
            assert_eq!(first, second);
            assert_eq!(first, pc.name());
        }
    }

    #[test]
    fn test_flat_spelling_round_trips_to_same_index() {
        for pc in PitchClass::ALL {
            let flat = format_for_display(pc, Accidentals::Flat);
            let back: PitchClass = flat.parse().unwrap();
            assert_eq!(back.index(), pc.index());
        }
    }

    #[test]
    fn test_naturals_are_never_respelled() {
        for pc in PitchClass::ALL.into_iter().filter(|pc| pc.is_natural()) {
            assert_eq!(
                format_for_display(pc, Accidentals::Flat),
                format_for_display(pc, Accidentals::Sharp)
            );
        }
        assert_eq!(format_for_display(PitchClass::FSharp, Accidentals::Flat), "Gb");
    }

    #[test]
    fn test_pitch_semitone_arithmetic() {
        let e2 = Pitch::new(PitchClass::E, 2);
        assert_eq!(e2.transpose(8), Pitch::new(PitchClass::C, 3));
        assert_eq!(e2.transpose(-5), Pitch::new(PitchClass::B, 1));
        assert_eq!(Pitch::new(PitchClass::C, 4).midi(), 60);
        assert_eq!(e2.midi(), 40);
        assert_eq!(Pitch::new(PitchClass::CSharp, 3).to_string(), "C#3");
    }
}
