//! In-memory collaborators backed by a JSON dataset
//!
//! Used by the CLI and by tests. Filtering mirrors what a database-backed
//! implementation does in its queries: deleted records, records outside the
//! window and records of non-members are never returned.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::{EventStore, JournalSource, UserDirectory};
use crate::error::{EngineError, StoreError};
use crate::family::SignalFamily;
use crate::schema::{JournalEntry, JournalKind, MoodEvent, ValidationError};
use crate::types::{CompanyId, TimeWindow, UserId, UserRole};

/// A user and the organization they belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub company_id: CompanyId,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Everything the in-memory collaborators serve
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub companies: Vec<CompanyId>,
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub mood_events: Vec<MoodEvent>,
    #[serde(default)]
    pub journal_entries: Vec<JournalEntry>,
}

/// A record that failed validation
#[derive(Debug, Clone)]
pub struct DatasetIssue {
    pub collection: &'static str,
    pub index: usize,
    pub id: Uuid,
    pub error: ValidationError,
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        debug!(
            companies = dataset.companies.len(),
            users = dataset.users.len(),
            mood_events = dataset.mood_events.len(),
            journal_entries = dataset.journal_entries.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validate every mood event and journal entry
    pub fn validate(&self) -> Vec<DatasetIssue> {
        let events = self.mood_events.iter().enumerate().filter_map(|(index, e)| {
            e.validate().err().map(|error| DatasetIssue {
                collection: "mood_events",
                index,
                id: e.id,
                error,
            })
        });
        let entries = self.journal_entries.iter().enumerate().filter_map(|(index, e)| {
            e.validate().err().map(|error| DatasetIssue {
                collection: "journal_entries",
                index,
                id: e.id,
                error,
            })
        });
        events.chain(entries).collect()
    }

    pub fn total_records(&self) -> usize {
        self.mood_events.len() + self.journal_entries.len()
    }
}

/// Event store and user directory over a [`Dataset`]
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    dataset: Arc<Dataset>,
}

impl InMemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// One journal source per journal kind
    pub fn journal_sources(&self) -> Vec<Arc<dyn JournalSource>> {
        JournalKind::ALL
            .iter()
            .map(|kind| {
                Arc::new(InMemoryJournalSource {
                    kind: *kind,
                    dataset: Arc::clone(&self.dataset),
                }) as Arc<dyn JournalSource>
            })
            .collect()
    }
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn mood_events(
        &self,
        family: SignalFamily,
        members: &[UserId],
        window: &TimeWindow,
    ) -> Result<Vec<MoodEvent>, StoreError> {
        let members: HashSet<&UserId> = members.iter().collect();
        Ok(self
            .dataset
            .mood_events
            .iter()
            .filter(|e| {
                e.family == family
                    && !e.is_deleted()
                    && window.contains(&e.recorded_at)
                    && members.contains(&e.user_id)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn cohort_members(
        &self,
        scope: CompanyId,
        roles: &[UserRole],
    ) -> Result<Option<Vec<UserId>>, StoreError> {
        if !self.dataset.companies.contains(&scope) {
            return Ok(None);
        }
        Ok(Some(
            self.dataset
                .users
                .iter()
                .filter(|u| u.company_id == scope && u.deleted_at.is_none())
                .filter(|u| roles.contains(&u.role))
                .map(|u| u.id)
                .collect(),
        ))
    }
}

/// Journal entries of a single kind from a [`Dataset`]
#[derive(Debug, Clone)]
pub struct InMemoryJournalSource {
    kind: JournalKind,
    dataset: Arc<Dataset>,
}

#[async_trait]
impl JournalSource for InMemoryJournalSource {
    fn kind(&self) -> JournalKind {
        self.kind
    }

    async fn entries_in_window(
        &self,
        members: &[UserId],
        window: &TimeWindow,
    ) -> Result<Vec<JournalEntry>, StoreError> {
        let members: HashSet<&UserId> = members.iter().collect();
        Ok(self
            .dataset
            .journal_entries
            .iter()
            .filter(|e| {
                e.kind == self.kind
                    && !e.is_deleted()
                    && window.contains(&e.created_at)
                    && members.contains(&e.user_id)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const DATASET: &str = r#"{
        "companies": ["7f1e6a52-3c1d-4b8e-9f11-2a9a1d0c0001"],
        "users": [
            { "id": "00000000-0000-0000-0000-00000000000a", "company_id": "7f1e6a52-3c1d-4b8e-9f11-2a9a1d0c0001", "role": "member" },
            { "id": "00000000-0000-0000-0000-00000000000b", "company_id": "7f1e6a52-3c1d-4b8e-9f11-2a9a1d0c0001", "role": "admin" },
            { "id": "00000000-0000-0000-0000-00000000000c", "company_id": "7f1e6a52-3c1d-4b8e-9f11-2a9a1d0c0001", "role": "member", "deleted_at": "2024-01-01T00:00:00Z" }
        ],
        "mood_events": [
            { "id": "10000000-0000-0000-0000-000000000001", "user_id": "00000000-0000-0000-0000-00000000000a", "family": "personal", "recorded_at": "2024-01-15T09:00:00Z", "counters": { "calm": 3 } },
            { "id": "10000000-0000-0000-0000-000000000002", "user_id": "00000000-0000-0000-0000-00000000000a", "family": "personal", "recorded_at": "2024-01-15T10:00:00Z", "counters": { "calm": 1 }, "deleted_at": "2024-01-16T00:00:00Z" }
        ],
        "journal_entries": [
            { "id": "20000000-0000-0000-0000-000000000001", "user_id": "00000000-0000-0000-0000-00000000000a", "kind": "note", "created_at": "2024-01-15T09:00:00Z", "sentiments": { "positive": { "I trust my colleagues": 1 } } },
            { "id": "20000000-0000-0000-0000-000000000002", "user_id": "00000000-0000-0000-0000-00000000000a", "kind": "goal", "created_at": "2024-01-15T09:00:00Z", "sentiments": { "negative": { "not a real phrase": 1 } } }
        ]
    }"#;

    fn company() -> CompanyId {
        CompanyId(Uuid::parse_str("7f1e6a52-3c1d-4b8e-9f11-2a9a1d0c0001").unwrap())
    }

    fn window() -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_directory_filters_roles_and_deleted_users() {
        let store = InMemoryStore::new(Dataset::from_json(DATASET).unwrap());

        let members = store
            .cohort_members(company(), &[UserRole::Member])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(members.len(), 1);

        let unknown = store
            .cohort_members(CompanyId(Uuid::new_v4()), &[UserRole::Member])
            .await
            .unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_event_store_skips_deleted_events() {
        let store = InMemoryStore::new(Dataset::from_json(DATASET).unwrap());
        let members = store
            .cohort_members(company(), &[UserRole::Member])
            .await
            .unwrap()
            .unwrap();

        let events = store
            .mood_events(SignalFamily::Personal, &members, &window())
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn test_one_journal_source_per_kind() {
        let store = InMemoryStore::new(Dataset::from_json(DATASET).unwrap());
        let sources = store.journal_sources();
        assert_eq!(sources.len(), JournalKind::ALL.len());

        let members = store
            .cohort_members(company(), &[UserRole::Member])
            .await
            .unwrap()
            .unwrap();
        let note_source = sources
            .iter()
            .find(|s| s.kind() == JournalKind::Note)
            .unwrap();
        let notes = note_source
            .entries_in_window(&members, &window())
            .await
            .unwrap();
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_validate_reports_unknown_phrase() {
        let dataset = Dataset::from_json(DATASET).unwrap();
        let issues = dataset.validate();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].collection, "journal_entries");
        assert_eq!(issues[0].index, 1);
    }
}
