//! Wellbeing Signals - aggregation and scoring engine for workplace mood data
//!
//! The engine turns per-user mood check-ins and journal sentiment tags into
//! organization-level scores through a deterministic pipeline: cohort
//! resolution → family aggregation → normalization → band classification →
//! cross-family combination, with journal sentiment tallied on an independent
//! path.
//!
//! ## Operations
//!
//! - **Personal / professional mood**: per-family totals, percentages and band
//! - **Overall score**: count-additive combination of both families, plus a
//!   signed percentage and label
//! - **Sentiment tally**: per-phrase participation and composite percentages
//!
//! Storage, cohort lookup and journal collections are collaborators behind the
//! traits in [`store`]; the engine only reads from them.

pub mod aggregator;
pub mod classifier;
pub mod cohort;
pub mod combiner;
pub mod config;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod family;
pub mod normalizer;
pub mod schema;
pub mod sentiment;
pub mod store;
pub mod types;

pub use config::EngineConfig;
pub use encoder::{ReportEncoder, ReportEnvelope};
pub use engine::WellbeingEngine;
pub use error::{EngineError, StoreError};
pub use family::SignalFamily;
pub use store::{Dataset, EventStore, InMemoryStore, JournalSource, UserDirectory};
pub use types::{
    AggregateTotals, Band, CompanyId, FamilyMoodReport, OverallLabel, OverallScore, Polarity,
    Score, SentimentTally, TimeWindow, UserId, WellbeingReport,
};

/// Engine version embedded in all encoded reports
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for encoded reports
pub const PRODUCER_NAME: &str = "wellbeing-signals";
