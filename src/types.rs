//! Core types for the wellbeing signal engine
//!
//! This module defines the data structures that flow through each stage of
//! scoring: identifiers and windows on the way in, aggregate totals in the
//! middle, and scores, reports and tallies on the way out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use uuid::Uuid;

use crate::error::EngineError;
use crate::family::SignalFamily;

/// Organizational scope a cohort is resolved from (a company)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub Uuid);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User type used to filter cohort membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Member,
    Admin,
}

/// Half-open time window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window, rejecting `end <= start`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EngineError> {
        if end <= start {
            return Err(EngineError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window from `start` until now
    pub fn since(start: DateTime<Utc>) -> Result<Self, EngineError> {
        Self::new(start, Utc::now())
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        *timestamp >= self.start && *timestamp < self.end
    }
}

/// Positive/negative totals for one family over a cohort and window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub total_all: u64,
    pub total_positive: u64,
    pub total_negative: u64,
}

impl AggregateTotals {
    /// Totals for a query that matched no rows
    pub const ZERO: AggregateTotals = AggregateTotals {
        total_all: 0,
        total_positive: 0,
        total_negative: 0,
    };

    pub fn new(total_positive: u64, total_negative: u64) -> Self {
        Self {
            total_all: total_positive.saturating_add(total_negative),
            total_positive,
            total_negative,
        }
    }

    /// Whether any counter contributed a nonzero magnitude
    pub fn has_data(&self) -> bool {
        self.total_all > 0
    }
}

impl Add for AggregateTotals {
    type Output = AggregateTotals;

    fn add(self, rhs: AggregateTotals) -> AggregateTotals {
        AggregateTotals::new(
            self.total_positive.saturating_add(rhs.total_positive),
            self.total_negative.saturating_add(rhs.total_negative),
        )
    }
}

impl Sum for AggregateTotals {
    fn sum<I: Iterator<Item = AggregateTotals>>(iter: I) -> Self {
        iter.fold(AggregateTotals::ZERO, Add::add)
    }
}

/// Polarity of a counter, phrase, or score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
        }
    }
}

/// Qualitative score bucket
///
/// `Neutral` is only produced when there is no data at all; every score
/// backed by at least one counter lands in one of the five graded bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Neutral,
    VeryPoor,
    Poor,
    Average,
    Good,
    VeryGood,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Neutral => "neutral",
            Band::VeryPoor => "very_poor",
            Band::Poor => "poor",
            Band::Average => "average",
            Band::Good => "good",
            Band::VeryGood => "very_good",
        }
    }
}

/// Normalized and classified score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Positive share of all counted magnitude (0-100, two decimals)
    pub percentage_positive: f64,
    /// Negative share of all counted magnitude (0-100, two decimals)
    pub percentage_negative: f64,
    pub dominant_polarity: Polarity,
    pub band: Band,
    /// Percentage of the dominant polarity
    pub magnitude: f64,
    /// Key used by report assemblers to select narrative text
    pub narrative_key: String,
}

/// Summed magnitude of one named counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterTotal {
    pub name: String,
    pub polarity: Polarity,
    pub total: u64,
}

/// Result of a single-family mood aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMoodReport {
    pub family: SignalFamily,
    pub cohort_size: usize,
    pub events_counted: usize,
    pub totals: AggregateTotals,
    /// Every counter of the family, in family order
    pub counters: Vec<CounterTotal>,
    pub score: Score,
}

/// Text label for the signed overall percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallLabel {
    Positive,
    Negative,
    Neutral,
}

impl OverallLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallLabel::Positive => "Positive",
            OverallLabel::Negative => "Negative",
            OverallLabel::Neutral => "Neutral",
        }
    }
}

/// Cross-family wellbeing indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    /// Families that had data and were combined
    pub sources: Vec<SignalFamily>,
    pub totals: AggregateTotals,
    pub percentage_positive: f64,
    pub percentage_negative: f64,
    /// `percentage_positive - percentage_negative`, in `[-100, 100]`
    pub signed_overall_percentage: f64,
    pub label: OverallLabel,
    pub score: Score,
}

/// Participation figures for one vocabulary phrase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseScore {
    pub phrase: String,
    /// Distinct users who mentioned the phrase in the window
    pub participants: usize,
    /// Summed absolute count across entries
    pub mentions: u64,
    /// `participants / cohort_size * 100`
    pub percentage: f64,
}

/// Population-level journal sentiment result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentTally {
    pub cohort_size: usize,
    pub entries_scanned: usize,
    pub positive: Vec<PhraseScore>,
    pub negative: Vec<PhraseScore>,
    pub average_positive_percentage: f64,
    pub average_negative_percentage: f64,
}

/// All four operations for one scope and window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellbeingReport {
    pub personal: FamilyMoodReport,
    pub professional: FamilyMoodReport,
    pub overall: OverallScore,
    pub sentiment: SentimentTally,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_rejects_empty_and_inverted() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert!(TimeWindow::new(t, t).is_err());
        assert!(TimeWindow::new(t, t - chrono::Duration::days(1)).is_err());
        assert!(TimeWindow::new(t, t + chrono::Duration::seconds(1)).is_ok());
    }

    #[test]
    fn test_window_is_half_open() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap();
        let window = TimeWindow::new(start, end).unwrap();

        assert!(window.contains(&start));
        assert!(!window.contains(&end));
        assert!(!window.contains(&(start - chrono::Duration::seconds(1))));
    }

    #[test]
    fn test_totals_add_keeps_total_all_consistent() {
        let sum: AggregateTotals = vec![AggregateTotals::new(10, 10), AggregateTotals::new(90, 10)]
            .into_iter()
            .sum();

        assert_eq!(sum, AggregateTotals::new(100, 20));
        assert_eq!(sum.total_all, 120);
        assert!(!AggregateTotals::ZERO.has_data());
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let big = AggregateTotals::new(u64::MAX, 1);
        assert_eq!(big.total_all, u64::MAX);
        assert_eq!((big + big).total_positive, u64::MAX);
    }
}
