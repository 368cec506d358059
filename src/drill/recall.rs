//! Weighted-recall ("note hunt") drill.
//!
//! Targets are drawn from the player's curated set of positions. Each
//! position is weighted by how often the player has missed its note:
//! `10 + 25 * wrong(note)`. The position just asked about is left out of the
//! draw whenever another candidate exists, so the same cell never comes up
//! twice in a row.
//!
//! A click is correct when it sounds the target's pitch class, on any
//! string. A miss is charged to the target's pitch class straight away.

use super::audio::Effect;
use super::session::{AbortReason, GuessOutcome, NoteHistory, Phase, Progress, SessionContext};
use crate::tuning::{FretPosition, Tuning};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Weight every candidate starts with.
pub const BASE_WEIGHT: u32 = 10;

/// Extra weight per recorded miss on the candidate's note.
pub const WRONG_WEIGHT: u32 = 25;

/// Sampling weight of `pos` given the session history.
pub fn target_weight(tuning: &Tuning, history: &NoteHistory, pos: FretPosition) -> u32 {
    BASE_WEIGHT + WRONG_WEIGHT * history.wrong_count(tuning.note_at(pos))
}

/// Roulette-wheel draw over `candidates`.
///
/// `exclude` is removed from the pool when the pool has more than one
/// entry. Returns `None` only for an empty candidate list.
pub fn sample_target<R: Rng + ?Sized>(
    candidates: &[FretPosition],
    tuning: &Tuning,
    history: &NoteHistory,
    exclude: Option<FretPosition>,
    rng: &mut R,
) -> Option<FretPosition> {
    let pool: Vec<FretPosition> = if candidates.len() > 1 {
        candidates.iter().copied().filter(|&p| Some(p) != exclude).collect()
    } else {
        candidates.to_vec()
    };
    let weights = pool.iter().map(|&p| target_weight(tuning, history, p));
    let dist: WeightedIndex<u32> = WeightedIndex::new(weights).ok()?;
    pool.get(dist.sample(rng)).copied()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallState {
    pub candidates: Vec<FretPosition>,
    pub target: Option<FretPosition>,
}

impl RecallState {
    /// Start over `candidates`. An empty set aborts the session with
    /// [`AbortReason::NoNotesSelected`].
    pub(crate) fn start(
        candidates: BTreeSet<FretPosition>,
        progress: &mut Progress,
        ctx: &mut SessionContext<'_>,
    ) -> Self {
        let candidates: Vec<FretPosition> = candidates.into_iter().collect();
        if candidates.is_empty() {
            warn!("weighted recall started with no notes selected");
            progress.phase = Phase::Aborted(AbortReason::NoNotesSelected);
            return Self {
                candidates,
                target: None,
            };
        }
        let target = sample_target(&candidates, ctx.tuning, &progress.history, None, &mut *ctx.rng);
        Self { candidates, target }
    }

    pub(crate) fn guess(
        &mut self,
        progress: &mut Progress,
        pos: FretPosition,
        ctx: &mut SessionContext<'_>,
    ) -> GuessOutcome {
        let Some(target) = self.target else {
            return GuessOutcome::Ignored;
        };
        let wanted = ctx.tuning.note_at(target);

        if ctx.tuning.note_at(pos) != wanted {
            progress.history.record_wrong(wanted);
            ctx.play(Effect::Failure);
            return GuessOutcome::Wrong;
        }

        progress.history.record_correct(wanted);
        progress.score += 1;
        self.target = sample_target(
            &self.candidates,
            ctx.tuning,
            &progress.history,
            Some(target),
            &mut *ctx.rng,
        );
        if let Some(next) = self.target {
            debug!(position = %next, note = %ctx.tuning.note_at(next), "next recall target");
        }
        ctx.play(Effect::Success);
        GuessOutcome::Correct { points: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill::session::NoteStats;
    use crate::pitch::PitchClass;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_weights_grow_with_misses() {
        let tuning = Tuning::standard();
        let history: NoteHistory = [(PitchClass::C, NoteStats { correct: 0, wrong: 2 })]
            .into_iter()
            .collect();
        // A string fret 3 is C, fret 10 is G.
        assert_eq!(target_weight(&tuning, &history, FretPosition::new(1, 3)), 60);
        assert_eq!(target_weight(&tuning, &history, FretPosition::new(1, 10)), 10);
    }

    #[test]
    fn test_empty_candidates_yield_nothing() {
        let tuning = Tuning::standard();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_target(&[], &tuning, &NoteHistory::new(), None, &mut rng), None);
    }

    #[test]
    fn test_single_candidate_may_repeat() {
        let tuning = Tuning::standard();
        let mut rng = StdRng::seed_from_u64(1);
        let only = FretPosition::new(0, 3);
        let picked = sample_target(&[only], &tuning, &NoteHistory::new(), Some(only), &mut rng);
        assert_eq!(picked, Some(only));
    }
}
