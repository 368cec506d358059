//! # Error Types
//!
//! Errors raised while reading notes, positions, page records and persisted
//! settings.
//!
//! Musical negatives are not errors: a cell with no chord shape is `None`,
//! and an empty weighted-recall selection is a session phase
//! ([`AbortReason::NoNotesSelected`](crate::drill::AbortReason)).
//!
//! ## Usage
//! ```rust
//! use fretboard::{FretError, PitchClass};
//!
//! match "H".parse::<PitchClass>() {
//!     Ok(pc) => println!("parsed {}", pc),
//!     Err(FretError::InvalidNote(name)) => eprintln!("unknown note {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FretError {
    /// A note spelling that is not one of the twelve pitch classes.
    ///
    /// # Example
    /// ```
    /// # use fretboard::FretError;
    /// let err = FretError::InvalidNote("H".to_string());
    /// assert_eq!(err.to_string(), "Invalid note name: H");
    /// ```
    #[error("Invalid note name: {0}")]
    InvalidNote(String),

    /// A `"string-fret"` coordinate that does not parse or is off the neck.
    ///
    /// # Example
    /// ```
    /// # use fretboard::FretError;
    /// let err = FretError::InvalidPosition("9-3".to_string());
    /// assert_eq!(err.to_string(), "Invalid fret position: 9-3");
    /// ```
    #[error("Invalid fret position: {0}")]
    InvalidPosition(String),

    /// A triad quality other than major or minor.
    #[error("Unknown chord quality: {0}")]
    InvalidChordQuality(String),

    /// A string group name other than bottom, lower, upper or top.
    #[error("Unknown string group: {0}")]
    InvalidStringGroup(String),

    /// Page configuration that could not be read.
    #[error("Invalid page configuration: {0}")]
    Config(String),

    /// A setting that could not be encoded for the key-value store.
    #[error("Storage error for '{key}': {message}")]
    Storage { key: String, message: String },
}
