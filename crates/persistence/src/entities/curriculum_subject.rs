//! Curriculum subject entity (database row mapping).

use sqlx::FromRow;
use uuid::Uuid;

use super::{Entity, SqlValue};

/// Database row mapping for the curriculums_subjects table.
///
/// Plain link rows: removing one deletes it physically.
#[derive(Debug, Clone, FromRow)]
pub struct CurriculumSubject {
    pub id: Uuid,
    pub curriculum_id: Uuid,
    pub subject_id: Uuid,
    pub teacher_id: Option<Uuid>,
}

impl CurriculumSubject {
    pub fn new(curriculum_id: Uuid, subject_id: Uuid, teacher_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            curriculum_id,
            subject_id,
            teacher_id,
        }
    }
}

impl Entity for CurriculumSubject {
    const TABLE: &'static str = "curriculums_subjects";
    const COLUMNS: &'static [&'static str] = &["id", "curriculum_id", "subject_id", "teacher_id"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.curriculum_id.into(),
            self.subject_id.into(),
            self.teacher_id.into(),
        ]
    }
}

impl_capabilities!(CurriculumSubject);
