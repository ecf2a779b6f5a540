//! User subject entity (database row mapping).

use domain::models::{AuditInfo, DeletionInfo};
use sqlx::FromRow;
use uuid::Uuid;

use super::{audit_values, deletion_values, Entity, SqlValue};

/// Database row mapping for the users_subjects table.
///
/// Enrolls a student in, or assigns a teacher to, a subject.
#[derive(Debug, Clone, FromRow)]
pub struct UserSubject {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject_id: Uuid,
    #[sqlx(flatten)]
    pub audit: AuditInfo,
    #[sqlx(flatten)]
    pub deletion: DeletionInfo,
}

impl UserSubject {
    pub fn new(user_id: Uuid, subject_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            subject_id,
            audit: AuditInfo::default(),
            deletion: DeletionInfo::default(),
        }
    }
}

impl Entity for UserSubject {
    const TABLE: &'static str = "users_subjects";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "user_id",
        "subject_id",
        "created_on",
        "modified_on",
        "is_deleted",
        "deleted_on",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        let mut values = vec![
            self.id.into(),
            self.user_id.into(),
            self.subject_id.into(),
        ];
        values.extend(audit_values(&self.audit));
        values.extend(deletion_values(&self.deletion));
        values
    }
}

impl_capabilities!(UserSubject: deletable, audited);
