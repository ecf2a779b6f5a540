//! School entity (database row mapping).

use domain::models::{AuditInfo, DeletionInfo, NewSchool};
use sqlx::FromRow;
use uuid::Uuid;

use super::{audit_values, deletion_values, Entity, SqlValue};

/// Database row mapping for the schools table.
#[derive(Debug, Clone, FromRow)]
pub struct School {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    #[sqlx(flatten)]
    pub audit: AuditInfo,
    #[sqlx(flatten)]
    pub deletion: DeletionInfo,
}

impl School {
    pub fn new(input: NewSchool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            address: input.address,
            audit: AuditInfo::default(),
            deletion: DeletionInfo::default(),
        }
    }
}

impl Entity for School {
    const TABLE: &'static str = "schools";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "address",
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
            self.name.clone().into(),
            self.address.clone().into(),
        ];
        values.extend(audit_values(&self.audit));
        values.extend(deletion_values(&self.deletion));
        values
    }
}

impl_capabilities!(School: deletable, audited);
