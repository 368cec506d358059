//! Persisted player settings.
//!
//! Settings live in a string key-value store (browser local storage in the
//! web build), one JSON-encoded value per key. A value that is missing or
//! fails to decode is replaced by its default.

use crate::error::FretError;
use crate::pitch::{Accidentals, PitchClass};
use crate::selection::Selection;
use crate::tuning::{clamp_fret_count, FretPosition};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Fret count used until the player picks one.
pub const DEFAULT_FRET_COUNT: usize = 15;

const PRO_MODE: &str = "proMode";
const FRET_COUNT: &str = "fretCount";
const EXPERIENCE: &str = "xp";
const ACCIDENTALS: &str = "accidentals";
const RECALL_NOTES: &str = "recallNotes";
const RECALL_STRINGS: &str = "recallStrings";
const RECALL_POSITIONS: &str = "recallPositions";

/// String-keyed persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore(BTreeMap<String, String>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.0.insert(key.to_string(), value);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub pro_mode: bool,
    pub fret_count: usize,
    pub experience: u64,
    pub accidentals: Accidentals,
    /// Positions weighted recall draws from.
    pub recall: Selection,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pro_mode: false,
            fret_count: DEFAULT_FRET_COUNT,
            experience: 0,
            accidentals: Accidentals::Sharp,
            recall: Selection::all(),
        }
    }
}

impl Settings {
    /// Read every setting from `store`, falling back to defaults.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Settings::default();
        Self {
            pro_mode: read(store, PRO_MODE).unwrap_or(defaults.pro_mode),
            fret_count: read(store, FRET_COUNT)
                .map(clamp_fret_count)
                .unwrap_or(defaults.fret_count),
            experience: read(store, EXPERIENCE).unwrap_or(defaults.experience),
            accidentals: read(store, ACCIDENTALS).unwrap_or(defaults.accidentals),
            recall: Selection {
                notes: read::<Option<Vec<PitchClass>>>(store, RECALL_NOTES).flatten(),
                strings: read::<Option<Vec<usize>>>(store, RECALL_STRINGS).flatten(),
                positions: read::<Option<Vec<FretPosition>>>(store, RECALL_POSITIONS).flatten(),
            },
        }
    }

    /// Write every setting to `store`.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), FretError> {
        write(store, PRO_MODE, &self.pro_mode)?;
        write(store, FRET_COUNT, &self.fret_count)?;
        write(store, EXPERIENCE, &self.experience)?;
        write(store, ACCIDENTALS, &self.accidentals)?;
        write(store, RECALL_NOTES, &self.recall.notes)?;
        write(store, RECALL_STRINGS, &self.recall.strings)?;
        write(store, RECALL_POSITIONS, &self.recall.positions)?;
        Ok(())
    }

    /// Set the visible fret count, clamped to 12..=24. Returns the stored value.
    pub fn set_fret_count(&mut self, frets: usize) -> usize {
        self.fret_count = clamp_fret_count(frets);
        self.fret_count
    }

    /// Add a finished session's score to the experience total.
    pub fn add_experience(&mut self, points: u32) -> u64 {
        self.experience = self.experience.saturating_add(u64::from(points));
        self.experience
    }
}

fn read<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "ignoring unreadable setting");
            None
        }
    }
}

fn write<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<(), FretError> {
    let json = serde_json::to_string(value).map_err(|e| FretError::Storage {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set(key, json);
    Ok(())
}
