//! Fixed catalog of triad shapes used by the triad-hunt drill.
//!
//! Two demo keys, four adjacent three-string groups, and for each group the
//! three closed-voicing inversions at their lowest position above the nut,
//! ordered up the neck.

use super::chord::{ChordQuality, ChordSpec, Inversion};
use crate::error::FretError;
use crate::pitch::PitchClass;
use crate::tuning::FretPosition;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use Inversion::{First, RootPosition, Second};
use StringGroup::{Bottom, Lower, Top, Upper};
use TriadKey::{AMajor, EMinor};

/// Keys covered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriadKey {
    AMajor,
    EMinor,
}

impl TriadKey {
    pub const ALL: [TriadKey; 2] = [TriadKey::AMajor, TriadKey::EMinor];

    pub fn root(self) -> PitchClass {
        match self {
            TriadKey::AMajor => PitchClass::A,
            TriadKey::EMinor => PitchClass::E,
        }
    }

    pub fn quality(self) -> ChordQuality {
        match self {
            TriadKey::AMajor => ChordQuality::Major,
            TriadKey::EMinor => ChordQuality::Minor,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TriadKey::AMajor => "A Major",
            TriadKey::EMinor => "E Minor",
        }
    }

    /// Chord spec for this key on the given strings.
    pub fn chord(self, group: StringGroup) -> ChordSpec {
        ChordSpec::new(self.root(), self.quality(), group.strings())
    }
}

/// Three adjacent strings a triad is played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringGroup {
    /// E A D
    Bottom,
    /// A D G
    Lower,
    /// D G B
    Upper,
    /// G B e
    Top,
}

impl StringGroup {
    pub const ALL: [StringGroup; 4] = [
        StringGroup::Bottom,
        StringGroup::Lower,
        StringGroup::Upper,
        StringGroup::Top,
    ];

    pub fn strings(self) -> [usize; 3] {
        let low = match self {
            StringGroup::Bottom => 0,
            StringGroup::Lower => 1,
            StringGroup::Upper => 2,
            StringGroup::Top => 3,
        };
        [low, low + 1, low + 2]
    }

    pub fn name(self) -> &'static str {
        match self {
            StringGroup::Bottom => "bottom",
            StringGroup::Lower => "lower",
            StringGroup::Upper => "upper",
            StringGroup::Top => "top",
        }
    }
}

impl FromStr for StringGroup {
    type Err = FretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bottom" => Ok(StringGroup::Bottom),
            "lower" => Ok(StringGroup::Lower),
            "upper" => Ok(StringGroup::Upper),
            "top" => Ok(StringGroup::Top),
            _ => Err(FretError::InvalidStringGroup(s.to_string())),
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriadShape {
    pub key: TriadKey,
    pub group: StringGroup,
    /// Position up the neck within the group, 0..=2.
    pub index: usize,
    pub inversion: Inversion,
    /// Frets on the group's strings, lowest string first.
    pub frets: [usize; 3],
}

impl TriadShape {
    pub fn positions(&self) -> [FretPosition; 3] {
        let strings = self.group.strings();
        [
            FretPosition::new(strings[0], self.frets[0]),
            FretPosition::new(strings[1], self.frets[1]),
            FretPosition::new(strings[2], self.frets[2]),
        ]
    }

    /// Index of `pos` within [`TriadShape::positions`].
    pub fn note_index(&self, pos: FretPosition) -> Option<usize> {
        self.positions().iter().position(|&p| p == pos)
    }

    /// Display name, e.g. "A Major / top / Pos-3 (Root Pos)".
    pub fn title(&self) -> String {
        format!(
            "{} / {} / Pos-{} ({})",
            self.key.name(),
            self.group.name(),
            self.index + 1,
            self.inversion.name()
        )
    }
}

const fn entry(
    key: TriadKey,
    group: StringGroup,
    index: usize,
    inversion: Inversion,
    frets: [usize; 3],
) -> TriadShape {
    TriadShape {
        key,
        group,
        index,
        inversion,
        frets,
    }
}

/// The full catalog, grouped by key then string group then position.
pub static TRIAD_SHAPES: [TriadShape; 24] = [
    entry(AMajor, Bottom, 0, RootPosition, [5, 4, 2]),
    entry(AMajor, Bottom, 1, First, [9, 7, 7]),
    entry(AMajor, Bottom, 2, Second, [12, 12, 11]),
    entry(AMajor, Lower, 0, First, [4, 2, 2]),
    entry(AMajor, Lower, 1, Second, [7, 7, 6]),
    entry(AMajor, Lower, 2, RootPosition, [12, 11, 9]),
    entry(AMajor, Upper, 0, Second, [2, 2, 2]),
    entry(AMajor, Upper, 1, RootPosition, [7, 6, 5]),
    entry(AMajor, Upper, 2, First, [11, 9, 10]),
    entry(AMajor, Top, 0, First, [6, 5, 5]),
    entry(AMajor, Top, 1, Second, [9, 10, 9]),
    entry(AMajor, Top, 2, RootPosition, [14, 14, 12]),
    entry(EMinor, Bottom, 0, First, [3, 2, 2]),
    entry(EMinor, Bottom, 1, Second, [7, 7, 5]),
    entry(EMinor, Bottom, 2, RootPosition, [12, 10, 9]),
    entry(EMinor, Lower, 0, RootPosition, [7, 5, 4]),
    entry(EMinor, Lower, 1, First, [10, 9, 9]),
    entry(EMinor, Lower, 2, Second, [14, 14, 12]),
    entry(EMinor, Upper, 0, First, [5, 4, 5]),
    entry(EMinor, Upper, 1, Second, [9, 9, 8]),
    entry(EMinor, Upper, 2, RootPosition, [14, 12, 12]),
    entry(EMinor, Top, 0, Second, [4, 5, 3]),
    entry(EMinor, Top, 1, RootPosition, [9, 8, 7]),
    entry(EMinor, Top, 2, First, [12, 12, 12]),
];

/// Look up a shape by key, string group and position index.
pub fn triad_shape(key: TriadKey, group: StringGroup, index: usize) -> Option<&'static TriadShape> {
    TRIAD_SHAPES
        .iter()
        .find(|s| s.key == key && s.group == group && s.index == index)
}

/// All shapes for one key and string group, in position order.
pub fn shapes_for(key: TriadKey, group: StringGroup) -> impl Iterator<Item = &'static TriadShape> {
    TRIAD_SHAPES
        .iter()
        .filter(move |s| s.key == key && s.group == group)
}
