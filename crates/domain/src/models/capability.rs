//! Cross-cutting capabilities of persisted records.
//!
//! A record opts into soft deletion by implementing [`Deletable`] and into
//! automatic creation/modification stamps by implementing [`Audited`]. The
//! persistence context inspects these capabilities when it saves and queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Soft-delete state of a record.
///
/// Once `is_deleted` is set the persistence layer never clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "snake_case")]
pub struct DeletionInfo {
    pub is_deleted: bool,
    pub deleted_on: Option<DateTime<Utc>>,
}

impl DeletionInfo {
    /// Turns the record into a tombstone deleted at `at`.
    pub fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_on = Some(at);
    }
}

/// Creation and modification stamps of a record.
///
/// `created_on` is `None` until the record is first saved; it is the only
/// value that means "not yet set".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "snake_case")]
pub struct AuditInfo {
    pub created_on: Option<DateTime<Utc>>,
    pub modified_on: Option<DateTime<Utc>>,
}

impl AuditInfo {
    /// Audit info for a record whose creation time is already known, for
    /// example when importing historical data.
    pub fn created_at(at: DateTime<Utc>) -> Self {
        Self {
            created_on: Some(at),
            modified_on: None,
        }
    }

    pub fn is_created(&self) -> bool {
        self.created_on.is_some()
    }
}

/// Records that participate in soft-delete semantics.
pub trait Deletable {
    fn deletion(&self) -> &DeletionInfo;

    fn deletion_mut(&mut self) -> &mut DeletionInfo;

    fn is_deleted(&self) -> bool {
        self.deletion().is_deleted
    }
}

/// Records that receive creation and modification timestamps.
pub trait Audited {
    fn audit_info(&self) -> &AuditInfo;

    fn audit_info_mut(&mut self) -> &mut AuditInfo;
}
