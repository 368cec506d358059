pub mod drill;
pub mod error;
pub mod page;
pub mod pitch;
pub mod selection;
pub mod settings;
pub mod shapes;
pub mod tuning;

pub use error::*;
pub use page::{load_initial_selection, PageConfig};
pub use pitch::{format_for_display, Accidentals, Pitch, PitchClass};
pub use selection::Selection;
pub use settings::{KeyValueStore, MemoryStore, Settings, DEFAULT_FRET_COUNT};
pub use tuning::{clamp_fret_count, FretPosition, Tuning, MAX_FRETS, MIN_FRETS, STRING_COUNT};

use shapes::{ChordSpec, Highlight, ShapeResolver};

/// Resolve a cell's chord highlight on a standard-tuned board.
/// This is the main entry point for chord display.
pub fn resolve_cell(chord: &ChordSpec, cell: FretPosition, fret_count: usize) -> Option<Highlight> {
    let tuning = Tuning::standard();
    ShapeResolver::new(&tuning, clamp_fret_count(fret_count)).resolve(chord, cell)
}

/// Name of the note at a cell, spelled with the given accidental preference.
pub fn display_name_at(
    string: usize,
    fret: usize,
    accidentals: Accidentals,
) -> &'static str {
    format_for_display(Tuning::standard().note_name_at(string, fret), accidentals)
}
