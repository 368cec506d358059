//! Chord shape search and per-cell highlight resolution.
//!
//! For a cell `(string, fret)` the resolver looks at every active string
//! within [`WINDOW`] frets of the cell, enumerates one-note-per-string
//! combinations of chord tones by depth-first search (pruning once the
//! span exceeds [`MAX_SPAN`]), keeps combinations that contain all three
//! chord tones, and ranks them with [`Shape::rank_key`].
//!
//! The search runs twice: unconstrained (the neighborhood's global best)
//! and constrained to include the cell (the cell's own best). A cell is
//! highlighted with its own best shape unless the global best strictly
//! [dominates](Shape::dominates) it *and* overlaps it.
//!
//! Exact ties on all four ranking keys resolve to the first shape found:
//! strings are visited from lowest to highest, each string tries its
//! candidate frets in ascending order before skipping the string.

use super::chord::{ChordSpec, ChordTone, Inversion, ALL_TONES};
use super::fingerprint::Fingerprint;
use super::shape::{Shape, ShapeNote};
use crate::tuning::{FretPosition, Tuning};
use serde::Serialize;
use tracing::trace;

/// Frets searched on either side of the cell.
pub const WINDOW: usize = 6;

/// Largest fret span a shape may cover.
pub const MAX_SPAN: usize = 3;

/// What a highlighted cell displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub position: FretPosition,
    pub tone: ChordTone,
    pub label: &'static str,
    pub color: &'static str,
    pub fingerprint: Fingerprint,
    pub inversion: Inversion,
    pub shape: Shape,
}

/// Chord tones available on one string inside the window.
struct StringCandidates {
    notes: Vec<ShapeNote>,
    /// The string carries the required cell and may not be skipped.
    required: bool,
}

/// Resolves chord-shape highlights on a board of `fret_count` frets.
#[derive(Debug, Clone)]
pub struct ShapeResolver<'a> {
    tuning: &'a Tuning,
    fret_count: usize,
}

impl<'a> ShapeResolver<'a> {
    pub fn new(tuning: &'a Tuning, fret_count: usize) -> Self {
        Self { tuning, fret_count }
    }

    /// Decide whether `cell` is drawn as part of a chord shape.
    ///
    /// Returns `None` when the cell is not a chord tone, sits on an inactive
    /// string, belongs to no complete shape, or is suppressed by a dominant
    /// overlapping shape.
    pub fn resolve(&self, chord: &ChordSpec, cell: FretPosition) -> Option<Highlight> {
        if !chord.active_strings.contains(&cell.string) || cell.fret > self.fret_count {
            return None;
        }
        let tone = chord.tone_of(self.tuning.note_at(cell))?;

        let mine = self.best_shape(chord, cell.fret, Some(cell))?;
        let global = self.best_shape(chord, cell.fret, None)?;

        if global.dominates(&mine) && global.shares_position(&mine) {
            trace!(cell = %cell, "cell suppressed by dominant shape");
            return None;
        }

        let fingerprint = mine.fingerprint();
        Some(Highlight {
            position: cell,
            tone,
            label: tone.label(chord.quality),
            color: fingerprint.color(),
            fingerprint,
            inversion: mine.inversion(),
            shape: mine,
        })
    }

    /// Best complete shape within [`WINDOW`] frets of `center_fret`,
    /// optionally forced to include `required`.
    pub fn best_shape(
        &self,
        chord: &ChordSpec,
        center_fret: usize,
        required: Option<FretPosition>,
    ) -> Option<Shape> {
        if let Some(req) = required {
            if !chord.active_strings.contains(&req.string) || chord.tone_of(self.tuning.note_at(req)).is_none() {
                return None;
            }
        }

        let lists = self.gather(chord, center_fret, required);
        let mut search = Search {
            lists: &lists,
            current: Vec::with_capacity(lists.len()),
            best: None,
            visited: 0,
        };
        search.visit(0, None);
        trace!(
            center_fret,
            constrained = required.is_some(),
            visited = search.visited,
            found = search.best.is_some(),
            "shape search finished"
        );
        search.best
    }

    fn gather(&self, chord: &ChordSpec, center_fret: usize, required: Option<FretPosition>) -> Vec<StringCandidates> {
        let low = center_fret.saturating_sub(WINDOW);
        let high = (center_fret + WINDOW).min(self.fret_count);

        chord
            .active_strings
            .iter()
            .copied()
            .filter(|&string| string < self.tuning.open_strings().len())
            .map(|string| match required {
                Some(req) if req.string == string => StringCandidates {
                    notes: self.note_at(chord, req).into_iter().collect(),
                    required: true,
                },
                _ => StringCandidates {
                    notes: (low..=high)
                        .filter_map(|fret| self.note_at(chord, FretPosition::new(string, fret)))
                        .collect(),
                    required: false,
                },
            })
            .collect()
    }

    fn note_at(&self, chord: &ChordSpec, position: FretPosition) -> Option<ShapeNote> {
        let pitch_class = self.tuning.note_at(position);
        chord.tone_of(pitch_class).map(|tone| ShapeNote {
            position,
            pitch_class,
            tone,
        })
    }
}

struct Search<'s> {
    lists: &'s [StringCandidates],
    current: Vec<ShapeNote>,
    best: Option<Shape>,
    visited: usize,
}

impl Search<'_> {
    fn visit(&mut self, depth: usize, range: Option<(usize, usize)>) {
        self.visited += 1;
        let Some(list) = self.lists.get(depth) else {
            self.consider();
            return;
        };

        for &note in &list.notes {
            let fret = note.position.fret;
            let (low, high) = match range {
                Some((low, high)) => (low.min(fret), high.max(fret)),
                None => (fret, fret),
            };
            if high - low > MAX_SPAN {
                continue;
            }
            self.current.push(note);
            self.visit(depth + 1, Some((low, high)));
            self.current.pop();
        }

        if !list.required {
            self.visit(depth + 1, range);
        }
    }

    fn consider(&mut self) {
        let covered = self.current.iter().fold(0u8, |mask, n| mask | n.tone.bit());
        if covered != ALL_TONES {
            return;
        }
        let Some(shape) = Shape::new(self.current.clone()) else {
            return;
        };
        let better = match &self.best {
            Some(best) => shape.outranks(best),
            None => true,
        };
        if better {
            self.best = Some(shape);
        }
    }
}
