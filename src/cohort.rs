//! Cohort resolution
//!
//! A cohort is resolved fresh for every request from the user directory and
//! is never cached by the engine.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::EngineError;
use crate::store::UserDirectory;
use crate::types::{CompanyId, TimeWindow, UserId, UserRole};

/// Members of an organizational scope at query time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cohort {
    scope: CompanyId,
    members: BTreeSet<UserId>,
}

impl Cohort {
    pub fn new(scope: CompanyId, members: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            scope,
            members: members.into_iter().collect(),
        }
    }

    pub fn scope(&self) -> CompanyId {
        self.scope
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }

    /// Member ids in ascending order
    pub fn member_ids(&self) -> Vec<UserId> {
        self.members.iter().copied().collect()
    }
}

/// Resolve the live cohort of `scope`, restricted to `roles`
pub async fn resolve_cohort(
    directory: &dyn UserDirectory,
    scope: CompanyId,
    roles: &[UserRole],
) -> Result<Cohort, EngineError> {
    let members = directory
        .cohort_members(scope, roles)
        .await?
        .ok_or(EngineError::UnknownScope(scope))?;

    let cohort = Cohort::new(scope, members);
    debug!(scope = %scope, size = cohort.len(), "resolved cohort");
    Ok(cohort)
}

/// Build the request window; `end` defaults to now
pub fn resolve_window(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Result<TimeWindow, EngineError> {
    match end {
        Some(end) => TimeWindow::new(start, end),
        None => TimeWindow::since(start),
    }
}
