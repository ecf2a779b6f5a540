//! User grade entity (database row mapping).

use domain::models::{AuditInfo, DeletionInfo, NewGrade};
use sqlx::FromRow;
use uuid::Uuid;

use super::{audit_values, deletion_values, Entity, SqlValue};

/// Database row mapping for the users_grades table.
#[derive(Debug, Clone, FromRow)]
pub struct UserGrade {
    pub id: Uuid,
    /// The graded student.
    pub user_id: Uuid,
    pub subject_id: Uuid,
    pub teacher_id: Option<Uuid>,
    pub value: f64,
    #[sqlx(flatten)]
    pub audit: AuditInfo,
    #[sqlx(flatten)]
    pub deletion: DeletionInfo,
}

impl UserGrade {
    pub fn new(input: NewGrade) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            subject_id: input.subject_id,
            teacher_id: input.teacher_id,
            value: input.value,
            audit: AuditInfo::default(),
            deletion: DeletionInfo::default(),
        }
    }
}

impl Entity for UserGrade {
    const TABLE: &'static str = "users_grades";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "user_id",
        "subject_id",
        "teacher_id",
        "value",
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
            self.teacher_id.into(),
            self.value.into(),
        ];
        values.extend(audit_values(&self.audit));
        values.extend(deletion_values(&self.deletion));
        values
    }
}

impl_capabilities!(UserGrade: deletable, audited);
