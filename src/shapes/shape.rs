//! Candidate chord shapes and their ranking.

use super::chord::{ChordTone, Inversion};
use super::fingerprint::Fingerprint;
use crate::pitch::PitchClass;
use crate::tuning::FretPosition;
use serde::Serialize;
use std::cmp::Reverse;

/// One fretted note inside a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeNote {
    pub position: FretPosition,
    pub pitch_class: PitchClass,
    pub tone: ChordTone,
}

/// A set of chord-tone notes, at most one per string, sorted by string.
///
/// Shapes are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shape {
    notes: Vec<ShapeNote>,
}

impl Shape {
    /// Build a shape from its notes. Returns `None` for an empty set.
    pub fn new(mut notes: Vec<ShapeNote>) -> Option<Self> {
        if notes.is_empty() {
            return None;
        }
        notes.sort_by_key(|n| n.position.string);
        Some(Self { notes })
    }

    pub fn notes(&self) -> &[ShapeNote] {
        &self.notes
    }

    pub fn positions(&self) -> impl Iterator<Item = FretPosition> + '_ {
        self.notes.iter().map(|n| n.position)
    }

    pub fn count(&self) -> usize {
        self.notes.len()
    }

    pub fn min_fret(&self) -> usize {
        self.notes.iter().map(|n| n.position.fret).min().unwrap_or(0)
    }

    pub fn max_fret(&self) -> usize {
        self.notes.iter().map(|n| n.position.fret).max().unwrap_or(0)
    }

    /// Distance between the highest and lowest fret used.
    pub fn fret_span(&self) -> usize {
        self.max_fret() - self.min_fret()
    }

    /// The note on the lowest string.
    pub fn bass(&self) -> &ShapeNote {
        &self.notes[0]
    }

    pub fn bass_string(&self) -> usize {
        self.bass().position.string
    }

    pub fn bass_fret(&self) -> usize {
        self.bass().position.fret
    }

    pub fn inversion(&self) -> Inversion {
        Inversion::from_bass(self.bass().tone)
    }

    pub fn contains(&self, pos: FretPosition) -> bool {
        self.notes.iter().any(|n| n.position == pos)
    }

    /// Whether the two shapes press at least one common fret position.
    pub fn shares_position(&self, other: &Shape) -> bool {
        self.notes.iter().any(|n| other.contains(n.position))
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self.positions())
    }

    /// Sort key, smaller is better: more notes, smaller span, lower bass
    /// string, lower bass fret.
    pub fn rank_key(&self) -> (Reverse<usize>, usize, usize, usize) {
        (
            Reverse(self.count()),
            self.fret_span(),
            self.bass_string(),
            self.bass_fret(),
        )
    }

    /// Strictly better under the full four-key ranking.
    pub fn outranks(&self, other: &Shape) -> bool {
        self.rank_key() < other.rank_key()
    }

    /// Strictly better on note count, then span, then bass string.
    ///
    /// Unlike [`Shape::outranks`] the bass fret is not consulted, so two
    /// shapes differing only by bass fret never dominate each other.
    pub fn dominates(&self, other: &Shape) -> bool {
        let mine = (Reverse(self.count()), self.fret_span(), self.bass_string());
        let theirs = (Reverse(other.count()), other.fret_span(), other.bass_string());
        mine < theirs
    }
}
