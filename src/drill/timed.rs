//! Timed "string walker" drill.
//!
//! One pitch class is drawn at the start. The player must find it on string
//! 0, then string 1, and so on up to the configured string limit, each step
//! against a fresh countdown. Faster answers earn more points:
//! `100 + max(0, floor((100 - elapsed%) * 5))`.

use super::audio::Effect;
use super::session::{FinishReason, GuessOutcome, Phase, Progress, SessionContext, TimerOutcome};
use super::timer::{Scheduler, TickHandle};
use super::TICK_INTERVAL_MS;
use crate::pitch::PitchClass;
use crate::tuning::{FretPosition, STRING_COUNT};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Countdown and length of a timed drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedConfig {
    /// Seconds per string, 1..=10.
    pub seconds: u8,
    /// Number of strings to walk, 1..=6.
    pub string_limit: usize,
}

impl Default for TimedConfig {
    fn default() -> Self {
        Self {
            seconds: 5,
            string_limit: STRING_COUNT,
        }
    }
}

impl TimedConfig {
    /// Build a config, clamping both values into range.
    pub fn new(seconds: u8, string_limit: usize) -> Self {
        Self {
            seconds: seconds.clamp(1, 10),
            string_limit: string_limit.clamp(1, STRING_COUNT),
        }
    }

    pub fn limit_ms(&self) -> u64 {
        u64::from(self.seconds) * 1_000
    }
}

/// Points for answering after `elapsed_ms` of a `limit_ms` countdown.
pub fn step_points(elapsed_ms: u64, limit_ms: u64) -> u32 {
    let elapsed_percent = elapsed_ms as f64 / limit_ms.max(1) as f64 * 100.0;
    let bonus = ((100.0 - elapsed_percent) * 5.0).floor().max(0.0);
    100 + bonus as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedState {
    pub config: TimedConfig,
    /// The note being walked across the strings.
    pub note: PitchClass,
    /// String the note must be found on next.
    pub string: usize,
    step_started_ms: u64,
    #[serde(skip)]
    tick: Option<TickHandle>,
}

impl TimedState {
    pub(crate) fn start(config: TimedConfig, ctx: &mut SessionContext<'_>) -> Self {
        // Deserialized configs skip `TimedConfig::new`.
        let config = TimedConfig::new(config.seconds, config.string_limit);
        let note = PitchClass::ALL[ctx.rng.gen_range(0..PitchClass::ALL.len())];
        debug!(note = %note, seconds = config.seconds, strings = config.string_limit, "timed drill target");
        Self {
            config,
            note,
            string: 0,
            step_started_ms: ctx.now_ms,
            tick: Some(ctx.scheduler.schedule(TICK_INTERVAL_MS)),
        }
    }

    /// Milliseconds left on the current string's countdown.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.config
            .limit_ms()
            .saturating_sub(now_ms.saturating_sub(self.step_started_ms))
    }

    pub(crate) fn guess(
        &mut self,
        progress: &mut Progress,
        pos: FretPosition,
        ctx: &mut SessionContext<'_>,
    ) -> GuessOutcome {
        // The tick that would have ended the step may not have arrived yet.
        if self.remaining_ms(ctx.now_ms) == 0 {
            self.cancel_timers(ctx.scheduler);
            progress.phase = Phase::Finished(FinishReason::TimedOut);
            ctx.play(Effect::Failure);
            return GuessOutcome::TimedOut;
        }

        if pos.string != self.string || ctx.tuning.note_at(pos) != self.note {
            progress.history.record_wrong(self.note);
            ctx.play(Effect::Failure);
            return GuessOutcome::Wrong;
        }

        let elapsed = ctx.now_ms.saturating_sub(self.step_started_ms);
        let points = step_points(elapsed, self.config.limit_ms());
        progress.score += points;
        progress.history.record_correct(self.note);
        self.string += 1;

        if self.string >= self.config.string_limit {
            self.cancel_timers(ctx.scheduler);
            progress.phase = Phase::Finished(FinishReason::Completed);
            ctx.play(Effect::WinFanfare);
            return GuessOutcome::Finished { points };
        }

        self.cancel_timers(ctx.scheduler);
        self.step_started_ms = ctx.now_ms;
        self.tick = Some(ctx.scheduler.schedule(TICK_INTERVAL_MS));
        ctx.play(Effect::Coin);
        GuessOutcome::Correct { points }
    }

    pub(crate) fn on_timer(
        &mut self,
        progress: &mut Progress,
        handle: TickHandle,
        ctx: &mut SessionContext<'_>,
    ) -> TimerOutcome {
        if self.tick != Some(handle) {
            return TimerOutcome::Stale;
        }
        self.tick = None;

        if ctx.now_ms.saturating_sub(self.step_started_ms) >= self.config.limit_ms() {
            progress.phase = Phase::Finished(FinishReason::TimedOut);
            ctx.play(Effect::Failure);
            return TimerOutcome::TimedOut;
        }

        self.tick = Some(ctx.scheduler.schedule(TICK_INTERVAL_MS));
        TimerOutcome::Running
    }

    pub(crate) fn cancel_timers(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.tick.take() {
            scheduler.cancel(handle);
        }
    }

    pub(crate) fn owns(&self, handle: TickHandle) -> bool {
        self.tick == Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_points() {
        assert_eq!(step_points(0, 5_000), 600);
        assert_eq!(step_points(2_500, 5_000), 350);
        assert_eq!(step_points(4_999, 5_000), 100);
        assert_eq!(step_points(5_000, 5_000), 100);
        assert_eq!(step_points(9_000, 5_000), 100);
    }

    #[test]
    fn test_config_is_clamped() {
        assert_eq!(TimedConfig::new(0, 0), TimedConfig { seconds: 1, string_limit: 1 });
        assert_eq!(TimedConfig::new(30, 9), TimedConfig { seconds: 10, string_limit: 6 });
        assert_eq!(TimedConfig::new(3, 4).limit_ms(), 3_000);
    }
}
