//! Class entity (database row mapping).

use domain::models::{AuditInfo, DeletionInfo, NewClass};
use sqlx::FromRow;
use uuid::Uuid;

use super::{audit_values, deletion_values, Entity, SqlValue};

/// Database row mapping for the classes table.
#[derive(Debug, Clone, FromRow)]
pub struct Class {
    pub id: Uuid,
    pub school_id: Uuid,
    /// Display name such as `10A`.
    pub name: String,
    pub year: i32,
    #[sqlx(flatten)]
    pub audit: AuditInfo,
    #[sqlx(flatten)]
    pub deletion: DeletionInfo,
}

impl Class {
    pub fn new(input: NewClass) -> Self {
        Self {
            id: Uuid::new_v4(),
            school_id: input.school_id,
            name: input.name,
            year: input.year,
            audit: AuditInfo::default(),
            deletion: DeletionInfo::default(),
        }
    }
}

impl Entity for Class {
    const TABLE: &'static str = "classes";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "school_id",
        "name",
        "year",
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
            self.school_id.into(),
            self.name.clone().into(),
            self.year.into(),
        ];
        values.extend(audit_values(&self.audit));
        values.extend(deletion_values(&self.deletion));
        values
    }
}

impl_capabilities!(Class: deletable, audited);
