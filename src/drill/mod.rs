//! Practice drills
//!
//! A [`DrillEngine`] owns at most one [`DrillSession`]. Each session runs in
//! one of four modes:
//!
//! - **Explorer**: clicks just sound their note.
//! - **Timed**: walk one random note across the strings against a countdown.
//! - **Weighted recall**: find the note of a target drawn from the player's
//!   selection, biased toward notes they keep missing.
//! - **Triad hunt**: find the three notes of a catalog triad shape within a
//!   60 second session.
//!
//! ## Host collaborators
//!
//! The engine never sleeps, reads a clock or makes sound itself. Each event
//! is delivered with a [`SessionContext`] lending it the tuning, an
//! [`AudioSink`], a [`Scheduler`] and a random source, plus the current time.
//! Scheduled callbacks come back through [`DrillEngine::on_timer`]; handles
//! that belong to a finished or replaced session are ignored.
//!
//! ```
//! use fretboard::drill::{AudioLog, DrillEngine, ManualScheduler, ModeRequest, Phase, SessionContext};
//! use fretboard::{FretPosition, Tuning};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let tuning = Tuning::standard();
//! let mut audio = AudioLog::new();
//! let mut scheduler = ManualScheduler::new();
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut engine = DrillEngine::new();
//!
//! let mut ctx = SessionContext {
//!     tuning: &tuning,
//!     audio: &mut audio,
//!     scheduler: &mut scheduler,
//!     rng: &mut rng,
//!     now_ms: 0,
//! };
//! engine.activate(ModeRequest::Explorer, &mut ctx);
//! engine.guess(FretPosition::new(0, 5), &mut ctx);
//! assert_eq!(engine.phase(), Phase::Active);
//! assert_eq!(audio.notes, vec![("A2".to_string(), 0)]);
//! ```

mod audio;
mod engine;
mod recall;
mod session;
mod timed;
mod timer;
mod triad_hunt;


pub use audio::{AudioLog, AudioSink, Effect};
pub use engine::{DrillEngine, DrillMode, DrillSession, ModeRequest};
pub use recall::{sample_target, target_weight, RecallState, BASE_WEIGHT, WRONG_WEIGHT};
pub use session::{
    AbortReason, FinishReason, GuessOutcome, NoteHistory, NoteStats, Phase, Progress,
    SessionContext, TimerOutcome,
};
pub use timed::{step_points, TimedConfig, TimedState};
pub use timer::{ManualScheduler, Scheduler, TickHandle};
pub use triad_hunt::{TriadHuntScope, TriadHuntState, ADVANCE_DELAY_MS, TRIAD_HUNT_MS};

/// Interval of the countdown ticks in timed modes.
pub const TICK_INTERVAL_MS: u64 = 100;
