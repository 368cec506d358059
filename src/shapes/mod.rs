//! # Shapes Module
//!
//! Chord-tone highlighting for the fretboard.
//!
//! ## Purpose
//! Given a chord (root + quality), the strings the player has enabled, and a
//! fret cell, decide whether that cell is drawn as part of the best nearby
//! triad shape, and with which label and color.
//!
//! ## Sub-modules
//! - `chord` - ChordSpec, ChordQuality, ChordTone, Inversion
//! - `shape` - Shape (candidate note set) and its ranking
//! - `resolver` - Depth-first shape search and zone-dominance rule
//! - `fingerprint` - Relative-fret fingerprints and the color table
//! - `triads` - Static triad catalog for the triad-hunt drill
//!
//! ## Example
//! ```rust
//! use fretboard::shapes::{ChordQuality, ChordSpec, ShapeResolver};
//! use fretboard::{FretPosition, PitchClass, Tuning};
//!
//! let tuning = Tuning::standard();
//! let resolver = ShapeResolver::new(&tuning, 15);
//! let chord = ChordSpec::new(PitchClass::A, ChordQuality::Major, [3, 4, 5]);
//!
//! let hl = resolver.resolve(&chord, FretPosition::new(3, 14)).unwrap();
//! assert_eq!(hl.label, "1");
//! assert_eq!(hl.inversion.name(), "Root Pos");
//! assert_eq!(hl.fingerprint.as_str(), "220");
//! ```

mod chord;
mod fingerprint;
mod resolver;
mod shape;
mod triads;

#[cfg(test)]
mod tests;

pub use chord::{ChordQuality, ChordSpec, ChordTone, Inversion, FIFTH_INTERVAL};
pub use fingerprint::{known_fingerprints, Fingerprint, NEUTRAL_COLOR};
pub use resolver::{Highlight, ShapeResolver, MAX_SPAN, WINDOW};
pub use shape::{Shape, ShapeNote};
pub use triads::{shapes_for, triad_shape, StringGroup, TriadKey, TriadShape, TRIAD_SHAPES};
