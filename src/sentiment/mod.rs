//! Journal sentiment tally
//!
//! Scans journal-like collections for per-entry sentiment maps, records which
//! users mentioned each vocabulary phrase, and turns that participation into
//! population-level percentages.
//!
//! Pipeline: journal sources → per-source participation → union → tally

pub mod tally;
pub mod vocabulary;

pub use tally::{PhraseParticipation, SentimentTallyEngine};
pub use vocabulary::{NEGATIVE_PHRASES, POSITIVE_PHRASES, VOCABULARY_SIZE};
