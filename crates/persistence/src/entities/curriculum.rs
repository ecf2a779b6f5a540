//! Curriculum entity (database row mapping).

use domain::models::{AuditInfo, DeletionInfo, NewCurriculum};
use sqlx::FromRow;
use uuid::Uuid;

use super::{audit_values, deletion_values, Entity, SqlValue};

/// Database row mapping for the curriculums table.
///
/// A curriculum is the plan of subjects one class follows in one school year.
#[derive(Debug, Clone, FromRow)]
pub struct Curriculum {
    pub id: Uuid,
    pub class_id: Uuid,
    pub school_year: String,
    #[sqlx(flatten)]
    pub audit: AuditInfo,
    #[sqlx(flatten)]
    pub deletion: DeletionInfo,
}

impl Curriculum {
    pub fn new(input: NewCurriculum) -> Self {
        Self {
            id: Uuid::new_v4(),
            class_id: input.class_id,
            school_year: input.school_year,
            audit: AuditInfo::default(),
            deletion: DeletionInfo::default(),
        }
    }
}

impl Entity for Curriculum {
    const TABLE: &'static str = "curriculums";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "class_id",
        "school_year",
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
            self.class_id.into(),
            self.school_year.clone().into(),
        ];
        values.extend(audit_values(&self.audit));
        values.extend(deletion_values(&self.deletion));
        values
    }
}

impl_capabilities!(Curriculum: deletable, audited);
