//! Subject entity (database row mapping).

use domain::models::{AuditInfo, DeletionInfo, NewSubject};
use sqlx::FromRow;
use uuid::Uuid;

use super::{audit_values, deletion_values, Entity, SqlValue};

/// Database row mapping for the subjects table.
#[derive(Debug, Clone, FromRow)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    #[sqlx(flatten)]
    pub audit: AuditInfo,
    #[sqlx(flatten)]
    pub deletion: DeletionInfo,
}

impl Subject {
    pub fn new(input: NewSubject) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            audit: AuditInfo::default(),
            deletion: DeletionInfo::default(),
        }
    }
}

impl Entity for Subject {
    const TABLE: &'static str = "subjects";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "created_on",
        "modified_on",
        "is_deleted",
        "deleted_on",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        let mut values = vec![self.id.into(), self.name.clone().into()];
        values.extend(audit_values(&self.audit));
        values.extend(deletion_values(&self.deletion));
        values
    }
}

impl_capabilities!(Subject: deletable, audited);
