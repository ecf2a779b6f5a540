//! User presence entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{AuditInfo, NewPresence, PresenceStatus};
use sqlx::FromRow;
use uuid::Uuid;

use super::{audit_values, Entity, SqlValue};

/// Database enum for presence statuses, stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum PresenceStatusDb {
    Present,
    Absent,
    Late,
    Excused,
}

impl From<PresenceStatusDb> for PresenceStatus {
    fn from(db_status: PresenceStatusDb) -> Self {
        match db_status {
            PresenceStatusDb::Present => PresenceStatus::Present,
            PresenceStatusDb::Absent => PresenceStatus::Absent,
            PresenceStatusDb::Late => PresenceStatus::Late,
            PresenceStatusDb::Excused => PresenceStatus::Excused,
        }
    }
}

impl From<PresenceStatus> for PresenceStatusDb {
    fn from(status: PresenceStatus) -> Self {
        match status {
            PresenceStatus::Present => PresenceStatusDb::Present,
            PresenceStatus::Absent => PresenceStatusDb::Absent,
            PresenceStatus::Late => PresenceStatusDb::Late,
            PresenceStatus::Excused => PresenceStatusDb::Excused,
        }
    }
}

impl From<PresenceStatusDb> for SqlValue {
    fn from(db_status: PresenceStatusDb) -> Self {
        SqlValue::Text(PresenceStatus::from(db_status).as_str().to_string())
    }
}

/// Database row mapping for the users_presences table.
///
/// Presences are corrected in place and removed physically, so they carry
/// audit info but no soft-delete state.
#[derive(Debug, Clone, FromRow)]
pub struct UserPresence {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject_id: Uuid,
    pub status: PresenceStatusDb,
    pub occurred_on: DateTime<Utc>,
    #[sqlx(flatten)]
    pub audit: AuditInfo,
}

impl UserPresence {
    pub fn new(input: NewPresence) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            subject_id: input.subject_id,
            status: input.status.into(),
            occurred_on: input.occurred_on,
            audit: AuditInfo::default(),
        }
    }
}

impl Entity for UserPresence {
    const TABLE: &'static str = "users_presences";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "user_id",
        "subject_id",
        "status",
        "occurred_on",
        "created_on",
        "modified_on",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        let mut values = vec![
            self.id.into(),
            self.user_id.into(),
            self.subject_id.into(),
            self.status.into(),
            self.occurred_on.into(),
        ];
        values.extend(audit_values(&self.audit));
        values
    }
}

impl_capabilities!(UserPresence: audited);
