//! Audio requests issued by the drills.
//!
//! Playback is fire-and-forget: the engine never waits for a sound, and
//! damping a note still ringing on the same string is the sink's job.

use serde::Serialize;
use std::fmt;

/// Named feedback sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effect {
    Success,
    Failure,
    WinFanfare,
    Coin,
}

impl Effect {
    pub fn name(self) -> &'static str {
        match self {
            Effect::Success => "success",
            Effect::Failure => "failure",
            Effect::WinFanfare => "win-fanfare",
            Effect::Coin => "coin",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receiver for playback requests.
pub trait AudioSink {
    /// Play `pitch` (e.g. "C#3") on string `string`.
    fn play_note(&mut self, pitch: &str, string: usize);

    fn play_effect(&mut self, effect: Effect);
}

/// Sink that records every request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioLog {
    pub notes: Vec<(String, usize)>,
    pub effects: Vec<Effect>,
}

impl AudioLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_effect(&self) -> Option<Effect> {
        self.effects.last().copied()
    }

    pub fn clear(&mut self) {
        self.notes.clear();
        self.effects.clear();
    }
}

impl AudioSink for AudioLog {
    fn play_note(&mut self, pitch: &str, string: usize) {
        self.notes.push((pitch.to_string(), string));
    }

    fn play_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}
