//! Grades given to students.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Input for grading a student in a subject.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewGrade {
    pub user_id: Uuid,
    pub subject_id: Uuid,
    pub teacher_id: Option<Uuid>,

    #[validate(custom(function = "shared::validation::validate_grade_value"))]
    pub value: f64,
}
