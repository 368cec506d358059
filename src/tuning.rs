//! # Fret Model
//!
//! Pure pitch arithmetic over the fretboard grid.
//!
//! A [`FretPosition`] is a `(string, fret)` coordinate. String 0 is the
//! lowest-pitched string (low E in standard tuning), string 5 the highest.
//! Fret 0 is the open string.
//!
//! ## Example
//! ```rust
//! use fretboard::{Pitch, PitchClass, Tuning};
//!
//! let tuning = Tuning::standard();
//! assert_eq!(tuning.note_name_at(0, 3), PitchClass::G);
//! assert_eq!(tuning.pitch_at(5, 0), Pitch::new(PitchClass::E, 4));
//! ```

use crate::error::FretError;
use crate::pitch::{Pitch, PitchClass};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of strings on the instrument.
pub const STRING_COUNT: usize = 6;

/// Smallest number of frets the board can show.
pub const MIN_FRETS: usize = 12;

/// Largest number of frets the board can show.
pub const MAX_FRETS: usize = 24;

/// A `(string, fret)` coordinate on the fretboard.
///
/// Serialized as `"string-fret"`, e.g. `"3-14"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FretPosition {
    pub string: usize,
    pub fret: usize,
}

impl FretPosition {
    pub const fn new(string: usize, fret: usize) -> Self {
        Self { string, fret }
    }
}

impl fmt::Display for FretPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.string, self.fret)
    }
}

impl FromStr for FretPosition {
    type Err = FretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FretError::InvalidPosition(s.to_string());
        let (string, fret) = s.trim().split_once('-').ok_or_else(invalid)?;
        let string: usize = string.trim().parse().map_err(|_| invalid())?;
        let fret: usize = fret.trim().parse().map_err(|_| invalid())?;
        if string >= STRING_COUNT {
            return Err(invalid());
        }
        Ok(Self { string, fret })
    }
}

impl TryFrom<String> for FretPosition {
    type Error = FretError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FretPosition> for String {
    fn from(pos: FretPosition) -> Self {
        pos.to_string()
    }
}

/// Open-string pitches, lowest string first. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuning {
    strings: [Pitch; STRING_COUNT],
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard()
    }
}

impl Tuning {
    /// Standard tuning: E2 A2 D3 G3 B3 E4.
    pub const fn standard() -> Self {
        Self {
            strings: [
                Pitch::new(PitchClass::E, 2),
                Pitch::new(PitchClass::A, 2),
                Pitch::new(PitchClass::D, 3),
                Pitch::new(PitchClass::G, 3),
                Pitch::new(PitchClass::B, 3),
                Pitch::new(PitchClass::E, 4),
            ],
        }
    }

    pub fn open_strings(&self) -> &[Pitch; STRING_COUNT] {
        &self.strings
    }

    /// Pitch class sounding at `fret` on `string`.
    ///
    /// # Panics
    /// If `string` is not in `0..STRING_COUNT`.
    pub fn note_name_at(&self, string: usize, fret: usize) -> PitchClass {
        self.strings[string].pitch_class.transpose(fret as i32)
    }

    /// Pitch (class and octave) sounding at `fret` on `string`.
    ///
    /// # Panics
    /// If `string` is not in `0..STRING_COUNT`.
    pub fn pitch_at(&self, string: usize, fret: usize) -> Pitch {
        self.strings[string].transpose(fret as i32)
    }

    /// [`Tuning::note_name_at`] for a coordinate.
    pub fn note_at(&self, pos: FretPosition) -> PitchClass {
        self.note_name_at(pos.string, pos.fret)
    }

    /// Every position on `0..=fret_count` whose note is `pitch_class`.
    pub fn positions_of(&self, pitch_class: PitchClass, fret_count: usize) -> Vec<FretPosition> {
        (0..STRING_COUNT)
            .flat_map(|string| (0..=fret_count).map(move |fret| FretPosition::new(string, fret)))
            .filter(|&pos| self.note_at(pos) == pitch_class)
            .collect()
    }
}

/// Clamp a requested board length to the supported fret range.
pub fn clamp_fret_count(frets: usize) -> usize {
    frets.clamp(MIN_FRETS, MAX_FRETS)
}
