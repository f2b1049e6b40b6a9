//! Collaborator interfaces
//!
//! The engine reads from three kinds of collaborator and never writes to any
//! of them:
//!
//! - [`EventStore`]: mood event records filtered by family, cohort and window
//! - [`UserDirectory`]: cohort membership for an organizational scope
//! - [`JournalSource`]: one adapter per journal-like collection
//!
//! New journal collections are added by implementing [`JournalSource`] and
//! registering the adapter with the engine.

mod memory;

pub use memory::{Dataset, DatasetIssue, InMemoryJournalSource, InMemoryStore, UserRecord};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::family::SignalFamily;
use crate::schema::{JournalEntry, JournalKind, MoodEvent};
use crate::types::{CompanyId, TimeWindow, UserId, UserRole};

/// Read access to stored mood events
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Live (not deleted) events of `family` owned by `members` with a
    /// timestamp inside `window`
    async fn mood_events(
        &self,
        family: SignalFamily,
        members: &[UserId],
        window: &TimeWindow,
    ) -> Result<Vec<MoodEvent>, StoreError>;
}

/// Cohort membership lookup
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Current members of `scope` whose role is in `roles`.
    ///
    /// Returns `Ok(None)` when the scope itself is unknown.
    async fn cohort_members(
        &self,
        scope: CompanyId,
        roles: &[UserRole],
    ) -> Result<Option<Vec<UserId>>, StoreError>;
}

/// One journal-like collection
#[async_trait]
pub trait JournalSource: Send + Sync {
    fn kind(&self) -> JournalKind;

    /// Live entries of `members` created inside `window`
    async fn entries_in_window(
        &self,
        members: &[UserId],
        window: &TimeWindow,
    ) -> Result<Vec<JournalEntry>, StoreError>;
}
