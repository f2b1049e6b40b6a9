//! Journal entries and their sentiment maps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::ValidationError;
use crate::sentiment::vocabulary;
use crate::types::{Polarity, UserId};

/// Kind of journal-like content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalKind {
    Reflection,
    Note,
    Goal,
    Gratitude,
    Affirmation,
    Conversation,
}

impl JournalKind {
    pub const ALL: [JournalKind; 6] = [
        JournalKind::Reflection,
        JournalKind::Note,
        JournalKind::Goal,
        JournalKind::Gratitude,
        JournalKind::Affirmation,
        JournalKind::Conversation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JournalKind::Reflection => "reflection",
            JournalKind::Note => "note",
            JournalKind::Goal => "goal",
            JournalKind::Gratitude => "gratitude",
            JournalKind::Affirmation => "affirmation",
            JournalKind::Conversation => "conversation",
        }
    }
}

/// Phrase counts tagged on a journal entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentMap {
    #[serde(default)]
    pub positive: BTreeMap<String, i64>,
    #[serde(default)]
    pub negative: BTreeMap<String, i64>,
}

impl SentimentMap {
    /// Nonzero `(polarity, phrase, magnitude)` triples
    ///
    /// Polarity comes from the map the phrase sits in, never from the sign
    /// of the count.
    pub fn mentions(&self) -> impl Iterator<Item = (Polarity, &str, u64)> + '_ {
        let positive = self
            .positive
            .iter()
            .map(|(phrase, count)| (Polarity::Positive, phrase, count));
        let negative = self
            .negative
            .iter()
            .map(|(phrase, count)| (Polarity::Negative, phrase, count));

        positive
            .chain(negative)
            .filter(|(_, _, count)| **count != 0)
            .map(|(polarity, phrase, count)| (polarity, phrase.as_str(), count.unsigned_abs()))
    }
}

/// One journal-like entry owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: UserId,
    pub kind: JournalKind,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiments: Option<SentimentMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl JournalEntry {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check that every tagged phrase belongs to its vocabulary
    pub fn validate(&self) -> Result<(), ValidationError> {
        let Some(sentiments) = &self.sentiments else {
            return Ok(());
        };

        let tagged = sentiments
            .positive
            .keys()
            .map(|p| (Polarity::Positive, p))
            .chain(sentiments.negative.keys().map(|p| (Polarity::Negative, p)));

        for (polarity, phrase) in tagged {
            if vocabulary::phrase_index(polarity, phrase).is_none() {
                return Err(ValidationError::UnknownPhrase {
                    polarity: polarity.as_str().to_string(),
                    phrase: phrase.clone(),
                });
            }
        }
        Ok(())
    }
}
