//! Schools, classes and their curriculums.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Input for registering a school.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewSchool {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Name must be between 1 and 200 characters"
    ))]
    pub name: String,

    #[validate(length(max = 300, message = "Address must be at most 300 characters"))]
    pub address: Option<String>,
}

/// Input for opening a class in a school.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewClass {
    pub school_id: Uuid,

    #[validate(length(
        min = 1,
        max = 10,
        message = "Class name must be between 1 and 10 characters"
    ))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_class_year"))]
    pub year: i32,
}

/// Input for attaching a curriculum to a class for one school year.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewCurriculum {
    pub class_id: Uuid,

    #[validate(custom(function = "shared::validation::validate_school_year"))]
    pub school_year: String,
}
