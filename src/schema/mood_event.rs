//! Mood event records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::ValidationError;
use crate::family::SignalFamily;
use crate::types::UserId;

/// Smallest counter value observed in stored events
pub const MIN_COUNTER_VALUE: i32 = -5;

/// Largest counter value observed in stored events
pub const MAX_COUNTER_VALUE: i32 = 5;

/// One mood check-in for one user and one family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEvent {
    pub id: Uuid,
    pub user_id: UserId,
    pub family: SignalFamily,
    pub recorded_at: DateTime<Utc>,
    /// Counter name to value; missing counters count as zero
    #[serde(default)]
    pub counters: BTreeMap<String, i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl MoodEvent {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Value of a counter, zero when absent
    pub fn value(&self, counter: &str) -> i32 {
        self.counters.get(counter).copied().unwrap_or(0)
    }

    /// Check that every counter belongs to the event's family and is in range
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in &self.counters {
            if self.family.counter(name).is_none() {
                return Err(ValidationError::UnknownCounter {
                    family: self.family.as_str().to_string(),
                    name: name.clone(),
                });
            }
            if !(MIN_COUNTER_VALUE..=MAX_COUNTER_VALUE).contains(value) {
                return Err(ValidationError::CounterOutOfRange {
                    name: name.clone(),
                    value: *value,
                    min: MIN_COUNTER_VALUE,
                    max: MAX_COUNTER_VALUE,
                });
            }
        }
        Ok(())
    }
}
