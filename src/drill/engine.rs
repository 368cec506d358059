//! The drill engine: one session at a time, dispatched by mode.

use super::recall::RecallState;
use super::session::{AbortReason, GuessOutcome, NoteHistory, Phase, Progress, SessionContext, TimerOutcome};
use super::timed::{TimedConfig, TimedState};
use super::timer::{Scheduler, TickHandle};
use super::triad_hunt::{TriadHuntScope, TriadHuntState};
use crate::tuning::FretPosition;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// What the player asked to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeRequest {
    Explorer,
    Timed(TimedConfig),
    /// Weighted recall over the given candidate positions.
    WeightedRecall(BTreeSet<FretPosition>),
    TriadHunt(TriadHuntScope),
}

/// Mode-specific session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "state", rename_all = "camelCase")]
pub enum DrillMode {
    /// Free play: clicks only sound their note.
    Explorer,
    Timed(TimedState),
    WeightedRecall(RecallState),
    TriadHunt(TriadHuntState),
}

impl DrillMode {
    pub fn name(&self) -> &'static str {
        match self {
            DrillMode::Explorer => "explorer",
            DrillMode::Timed(_) => "timed",
            DrillMode::WeightedRecall(_) => "weighted-recall",
            DrillMode::TriadHunt(_) => "triad-hunt",
        }
    }

    fn cancel_timers(&mut self, scheduler: &mut dyn Scheduler) {
        match self {
            DrillMode::Explorer | DrillMode::WeightedRecall(_) => {}
            DrillMode::Timed(state) => state.cancel_timers(scheduler),
            DrillMode::TriadHunt(state) => state.cancel_timers(scheduler),
        }
    }

    fn owns(&self, handle: TickHandle) -> bool {
        match self {
            DrillMode::Explorer | DrillMode::WeightedRecall(_) => false,
            DrillMode::Timed(state) => state.owns(handle),
            DrillMode::TriadHunt(state) => state.owns(handle),
        }
    }
}

/// One running (or just ended) drill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrillSession {
    #[serde(flatten)]
    pub mode: DrillMode,
    pub progress: Progress,
}

impl DrillSession {
    fn start(request: ModeRequest, ctx: &mut SessionContext<'_>) -> Self {
        let mut progress = Progress::active();
        let mode = match request {
            ModeRequest::Explorer => DrillMode::Explorer,
            ModeRequest::Timed(config) => DrillMode::Timed(TimedState::start(config, ctx)),
            ModeRequest::WeightedRecall(candidates) => {
                DrillMode::WeightedRecall(RecallState::start(candidates, &mut progress, ctx))
            }
            ModeRequest::TriadHunt(scope) => DrillMode::TriadHunt(TriadHuntState::start(scope, ctx)),
        };
        Self { mode, progress }
    }

    pub fn phase(&self) -> Phase {
        self.progress.phase
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn history(&self) -> &NoteHistory {
        &self.progress.history
    }

    /// Countdown remaining for timed modes.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        match &self.mode {
            DrillMode::Timed(state) => Some(state.remaining_ms(now_ms)),
            DrillMode::TriadHunt(state) => Some(state.remaining_ms(now_ms)),
            DrillMode::Explorer | DrillMode::WeightedRecall(_) => None,
        }
    }
}

/// Owner of the single active drill session.
///
/// With no session the engine is idle. Activating a mode aborts whatever was
/// running first, cancelling its pending timers before it is dropped.
#[derive(Debug, Default)]
pub struct DrillEngine {
    session: Option<DrillSession>,
}

impl DrillEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DrillSession> {
        self.session.as_ref()
    }

    pub fn mode(&self) -> Option<&DrillMode> {
        self.session.as_ref().map(|s| &s.mode)
    }

    pub fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::Idle, |s| s.phase())
    }

    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.score())
    }

    pub fn history(&self) -> Option<&NoteHistory> {
        self.session.as_ref().map(|s| s.history())
    }

    /// Start a new session, aborting any current one.
    pub fn activate(&mut self, request: ModeRequest, ctx: &mut SessionContext<'_>) -> Phase {
        self.end_session(AbortReason::Replaced, ctx.scheduler);
        let session = DrillSession::start(request, ctx);
        info!(mode = session.mode.name(), phase = ?session.phase(), "drill session started");
        let phase = session.phase();
        self.session = Some(session);
        phase
    }

    /// Leave the current mode. An active session is aborted first.
    /// Returns the session that ended, for scoring.
    pub fn deactivate(&mut self, ctx: &mut SessionContext<'_>) -> Option<DrillSession> {
        self.end_session(AbortReason::Stopped, ctx.scheduler)
    }

    /// Clear a finished or aborted session. Does nothing while active.
    pub fn dismiss(&mut self) -> Option<DrillSession> {
        match &self.session {
            Some(session) if !session.progress.is_active() => self.session.take(),
            _ => None,
        }
    }

    /// Handle a click on the fretboard.
    pub fn guess(&mut self, pos: FretPosition, ctx: &mut SessionContext<'_>) -> GuessOutcome {
        let Some(session) = self.session.as_mut() else {
            return GuessOutcome::Ignored;
        };
        if !session.progress.is_active() {
            return GuessOutcome::Ignored;
        }

        ctx.play_position(pos);
        let progress = &mut session.progress;
        let outcome = match &mut session.mode {
            DrillMode::Explorer => GuessOutcome::Played,
            DrillMode::Timed(state) => state.guess(progress, pos, ctx),
            DrillMode::WeightedRecall(state) => state.guess(progress, pos, ctx),
            DrillMode::TriadHunt(state) => state.guess(progress, pos, ctx),
        };

        if !progress.is_active() {
            info!(mode = session.mode.name(), score = progress.score, phase = ?progress.phase, "drill session finished");
        }
        outcome
    }

    /// Deliver a scheduled callback.
    ///
    /// Handles that do not belong to the live session (cancelled, from a
    /// replaced session, or delivered after the session ended) are reported
    /// as [`TimerOutcome::Stale`] and change nothing.
    pub fn on_timer(&mut self, handle: TickHandle, ctx: &mut SessionContext<'_>) -> TimerOutcome {
        let Some(session) = self.session.as_mut() else {
            debug!(handle = handle.0, "timer delivered with no session");
            return TimerOutcome::Stale;
        };
        if !session.progress.is_active() || !session.mode.owns(handle) {
            debug!(handle = handle.0, mode = session.mode.name(), "stale timer ignored");
            return TimerOutcome::Stale;
        }

        let progress = &mut session.progress;
        let outcome = match &mut session.mode {
            DrillMode::Explorer | DrillMode::WeightedRecall(_) => TimerOutcome::Stale,
            DrillMode::Timed(state) => state.on_timer(progress, handle, ctx),
            DrillMode::TriadHunt(state) => state.on_timer(progress, handle, ctx),
        };

        if outcome == TimerOutcome::TimedOut {
            info!(mode = session.mode.name(), score = progress.score, "drill session timed out");
        }
        outcome
    }

    fn end_session(&mut self, reason: AbortReason, scheduler: &mut dyn Scheduler) -> Option<DrillSession> {
        let mut session = self.session.take()?;
        session.mode.cancel_timers(scheduler);
        if session.progress.is_active() {
            session.progress.phase = Phase::Aborted(reason);
            info!(mode = session.mode.name(), score = session.score(), reason = ?reason, "drill session aborted");
        }
        Some(session)
    }
}
