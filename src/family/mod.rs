//! Signal families
//!
//! A family is a fixed, closed set of named mood counters, each belonging to
//! exactly one polarity. Two families exist: personal mood and professional
//! mood, each with ten positive and ten negative counters.

mod personal;
mod professional;

use serde::{Deserialize, Serialize};

use crate::types::Polarity;

/// A named counter and the polarity it contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodCounter {
    pub name: &'static str,
    pub polarity: Polarity,
}

impl MoodCounter {
    pub(crate) const fn positive(name: &'static str) -> Self {
        Self {
            name,
            polarity: Polarity::Positive,
        }
    }

    pub(crate) const fn negative(name: &'static str) -> Self {
        Self {
            name,
            polarity: Polarity::Negative,
        }
    }
}

/// Mood dimension an event record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalFamily {
    Personal,
    Professional,
}

impl SignalFamily {
    /// Every family, in reporting order
    pub const ALL: [SignalFamily; 2] = [SignalFamily::Personal, SignalFamily::Professional];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalFamily::Personal => "personal",
            SignalFamily::Professional => "professional",
        }
    }

    /// All counters of the family, positive first
    pub fn counters(&self) -> &'static [MoodCounter] {
        match self {
            SignalFamily::Personal => &personal::COUNTERS,
            SignalFamily::Professional => &professional::COUNTERS,
        }
    }

    /// Look up a counter by name
    pub fn counter(&self, name: &str) -> Option<&'static MoodCounter> {
        self.counters().iter().find(|c| c.name == name)
    }

    pub fn polarity_of(&self, name: &str) -> Option<Polarity> {
        self.counter(name).map(|c| c.polarity)
    }
}
