//! Stored record schemas
//!
//! This module defines the records the engine reads from its collaborators:
//! mood event records (one per check-in, one family each) and journal entries
//! that may carry a sentiment map. Records are immutable; deletion is a
//! nullable marker.

mod journal_entry;
mod mood_event;

pub use journal_entry::*;
pub use mood_event::*;

/// Record-level validation failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unknown {family} counter: {name}")]
    UnknownCounter { family: String, name: String },

    #[error("Counter {name} value {value} outside {min}..={max}")]
    CounterOutOfRange {
        name: String,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("Unknown {polarity} phrase: {phrase}")]
    UnknownPhrase { polarity: String, phrase: String },
}
