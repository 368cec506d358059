//! Triad-hunt drill.
//!
//! A target shape is drawn from the triad catalog and the player clicks its
//! three notes in any order. Completing a shape scores a point and, after a
//! short pause, a new shape is drawn. The whole session runs against a
//! single 60 second countdown.

use super::audio::Effect;
use super::session::{FinishReason, GuessOutcome, Phase, Progress, SessionContext, TimerOutcome};
use super::timer::{Scheduler, TickHandle};
use super::TICK_INTERVAL_MS;
use crate::shapes::{StringGroup, TriadKey, TriadShape, TRIAD_SHAPES};
use crate::tuning::FretPosition;
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Length of a triad-hunt session.
pub const TRIAD_HUNT_MS: u64 = 60_000;

/// Pause between completing a shape and showing the next one.
pub const ADVANCE_DELAY_MS: u64 = 1_000;

/// Which part of the catalog targets are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "camelCase")]
pub enum TriadHuntScope {
    /// Only the shapes of the selected key and string group.
    Selected { key: TriadKey, group: StringGroup },
    /// Every shape in the catalog.
    Full,
}

impl TriadHuntScope {
    pub fn pool(&self) -> Vec<&'static TriadShape> {
        match *self {
            TriadHuntScope::Selected { key, group } => TRIAD_SHAPES
                .iter()
                .filter(|s| s.key == key && s.group == group)
                .collect(),
            TriadHuntScope::Full => TRIAD_SHAPES.iter().collect(),
        }
    }
}

fn pick_target(
    scope: TriadHuntScope,
    previous: Option<&'static TriadShape>,
    rng: &mut dyn RngCore,
) -> &'static TriadShape {
    let mut pool = scope.pool();
    if pool.len() > 1 {
        if let Some(prev) = previous {
            pool.retain(|s| !std::ptr::eq(*s, prev));
        }
    }
    pool.choose(rng).copied().unwrap_or(&TRIAD_SHAPES[0])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriadHuntState {
    pub scope: TriadHuntScope,
    pub target: &'static TriadShape,
    /// Which of the target's notes have been clicked, lowest string first.
    pub found: [bool; 3],
    started_ms: u64,
    #[serde(skip)]
    countdown: Option<TickHandle>,
    #[serde(skip)]
    advance: Option<TickHandle>,
}

impl TriadHuntState {
    pub(crate) fn start(scope: TriadHuntScope, ctx: &mut SessionContext<'_>) -> Self {
        let target = pick_target(scope, None, &mut *ctx.rng);
        debug!(shape = %target.title(), "triad hunt target");
        Self {
            scope,
            target,
            found: [false; 3],
            started_ms: ctx.now_ms,
            countdown: Some(ctx.scheduler.schedule(TICK_INTERVAL_MS)),
            advance: None,
        }
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        TRIAD_HUNT_MS.saturating_sub(now_ms.saturating_sub(self.started_ms))
    }

    /// Positions of the target already revealed.
    pub fn revealed(&self) -> Vec<FretPosition> {
        self.target
            .positions()
            .iter()
            .zip(self.found)
            .filter(|(_, found)| *found)
            .map(|(&pos, _)| pos)
            .collect()
    }

    pub(crate) fn guess(
        &mut self,
        progress: &mut Progress,
        pos: FretPosition,
        ctx: &mut SessionContext<'_>,
    ) -> GuessOutcome {
        if self.remaining_ms(ctx.now_ms) == 0 {
            self.cancel_timers(ctx.scheduler);
            progress.phase = Phase::Finished(FinishReason::TimedOut);
            return GuessOutcome::TimedOut;
        }

        if self.advance.is_some() {
            return GuessOutcome::Ignored;
        }

        let Some(index) = self.target.note_index(pos) else {
            ctx.play(Effect::Failure);
            return GuessOutcome::Wrong;
        };
        if self.found[index] {
            return GuessOutcome::Ignored;
        }

        self.found[index] = true;
        if self.found.iter().all(|&f| f) {
            progress.score += 1;
            self.advance = Some(ctx.scheduler.schedule(ADVANCE_DELAY_MS));
            ctx.play(Effect::Coin);
            return GuessOutcome::ShapeFound { points: 1 };
        }

        ctx.play(Effect::Success);
        GuessOutcome::NoteFound
    }

    pub(crate) fn on_timer(
        &mut self,
        progress: &mut Progress,
        handle: TickHandle,
        ctx: &mut SessionContext<'_>,
    ) -> TimerOutcome {
        if self.countdown == Some(handle) {
            self.countdown = None;
            if self.remaining_ms(ctx.now_ms) == 0 {
                self.cancel_timers(ctx.scheduler);
                progress.phase = Phase::Finished(FinishReason::TimedOut);
                return TimerOutcome::TimedOut;
            }
            self.countdown = Some(ctx.scheduler.schedule(TICK_INTERVAL_MS));
            return TimerOutcome::Running;
        }

        if self.advance == Some(handle) {
            self.advance = None;
            self.target = pick_target(self.scope, Some(self.target), &mut *ctx.rng);
            self.found = [false; 3];
            debug!(shape = %self.target.title(), "triad hunt target");
            return TimerOutcome::Advanced;
        }

        TimerOutcome::Stale
    }

    pub(crate) fn cancel_timers(&mut self, scheduler: &mut dyn Scheduler) {
        for handle in [self.countdown.take(), self.advance.take()].into_iter().flatten() {
            scheduler.cancel(handle);
        }
    }

    pub(crate) fn owns(&self, handle: TickHandle) -> bool {
        self.countdown == Some(handle) || self.advance == Some(handle)
    }
}
