//! Session bookkeeping shared by every drill mode.

use super::audio::{AudioSink, Effect};
use super::timer::Scheduler;
use crate::pitch::PitchClass;
use crate::tuning::{FretPosition, Tuning};
use rand::RngCore;
use serde::Serialize;
use std::collections::BTreeMap;

/// Collaborators a drill needs for one call.
///
/// The engine owns no clock, audio or randomness of its own; the host lends
/// them for the duration of each event.
pub struct SessionContext<'a> {
    pub tuning: &'a Tuning,
    pub audio: &'a mut dyn AudioSink,
    pub scheduler: &'a mut dyn Scheduler,
    pub rng: &'a mut dyn RngCore,
    /// Host clock in milliseconds.
    pub now_ms: u64,
}

impl SessionContext<'_> {
    /// Play the note under a clicked cell.
    pub(crate) fn play_position(&mut self, pos: FretPosition) {
        let pitch = self.tuning.pitch_at(pos.string, pos.fret);
        self.audio.play_note(&pitch.to_string(), pos.string);
    }

    pub(crate) fn play(&mut self, effect: Effect) {
        self.audio.play_effect(effect);
    }
}

/// Lifecycle of a drill session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "reason", rename_all = "camelCase")]
pub enum Phase {
    Idle,
    Active,
    Finished(FinishReason),
    Aborted(AbortReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FinishReason {
    /// The player reached the end of the drill.
    Completed,
    /// A countdown expired.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AbortReason {
    /// Another mode was activated.
    Replaced,
    /// The player left the mode.
    Stopped,
    /// Weighted recall was started with an empty selection.
    NoNotesSelected,
}

/// Per-note answer counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoteStats {
    pub correct: u32,
    pub wrong: u32,
}

/// Answer history keyed by pitch class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteHistory(BTreeMap<PitchClass, NoteStats>);

impl NoteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self, pitch_class: PitchClass) -> NoteStats {
        self.0.get(&pitch_class).copied().unwrap_or_default()
    }

    pub fn wrong_count(&self, pitch_class: PitchClass) -> u32 {
        self.stats(pitch_class).wrong
    }

    pub fn record_correct(&mut self, pitch_class: PitchClass) {
        self.0.entry(pitch_class).or_default().correct += 1;
    }

    pub fn record_wrong(&mut self, pitch_class: PitchClass) {
        self.0.entry(pitch_class).or_default().wrong += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (PitchClass, NoteStats)> + '_ {
        self.0.iter().map(|(&pc, &stats)| (pc, stats))
    }
}

impl FromIterator<(PitchClass, NoteStats)> for NoteHistory {
    fn from_iter<I: IntoIterator<Item = (PitchClass, NoteStats)>>(iter: I) -> Self {
        NoteHistory(iter.into_iter().collect())
    }
}

/// State every mode mutates: phase, score and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub phase: Phase,
    pub score: u32,
    pub history: NoteHistory,
}

impl Progress {
    pub(crate) fn active() -> Self {
        Self {
            phase: Phase::Active,
            score: 0,
            history: NoteHistory::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }
}

/// Result of a fretboard click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GuessOutcome {
    /// Explorer mode: the note was played, nothing scored.
    Played,
    /// Right answer; the drill moved on.
    Correct { points: u32 },
    /// Triad hunt: one more note of the target shape revealed.
    NoteFound,
    /// Triad hunt: the last note of the target shape was found.
    ShapeFound { points: u32 },
    /// The answer completed the session.
    Finished { points: u32 },
    Wrong,
    /// The countdown had already run out; the session finished without scoring.
    TimedOut,
    /// Click had no effect (no session, session over, or already found).
    Ignored,
}

/// Result of delivering a timer callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerOutcome {
    /// The handle does not belong to the live session. Nothing changed.
    Stale,
    /// Countdown still running; a new tick was scheduled.
    Running,
    /// Countdown expired and the session finished.
    TimedOut,
    /// Triad hunt moved to a new target shape.
    Advanced,
}
