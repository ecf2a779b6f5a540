//! The GradeCenter model.

use super::conventions::{apply_index_conventions, apply_soft_delete_filters};
use super::{Model, ModelBuilder};
use crate::entities::{
    ApplicationRole, ApplicationUser, Class, Curriculum, CurriculumSubject, School, Subject,
    UserGrade, UserPresence, UserRelation, UserRole, UserSubject,
};
use crate::error::ModelError;

/// Builds the model with every GradeCenter entity type.
///
/// Deterministic: calling it twice yields equal models.
pub fn configure_grade_center_model() -> Result<Model, ModelError> {
    let mut builder = ModelBuilder::new();

    configure_identity(&mut builder);
    configure_school_structure(&mut builder);
    configure_student_records(&mut builder);

    apply_index_conventions(&mut builder);
    apply_soft_delete_filters(&mut builder);

    builder.build()
}

fn configure_identity(builder: &mut ModelBuilder) {
    builder
        .entity::<ApplicationUser>()
        .has_unique_index(&["normalized_user_name"])
        .has_unique_index(&["normalized_email"])
        .has_index(&["school_id"])
        .has_index(&["class_id"]);

    builder
        .entity::<ApplicationRole>()
        .has_unique_index(&["normalized_name"]);

    builder
        .entity::<UserRole>()
        .has_unique_index(&["user_id", "role_id"])
        .has_index(&["role_id"]);
}

fn configure_school_structure(builder: &mut ModelBuilder) {
    builder.entity::<School>();

    builder.entity::<Class>().has_index(&["school_id"]);

    builder.entity::<Curriculum>().has_index(&["class_id"]);

    builder.entity::<Subject>();

    builder
        .entity::<CurriculumSubject>()
        .has_unique_index(&["curriculum_id", "subject_id"])
        .has_index(&["subject_id"]);
}

fn configure_student_records(builder: &mut ModelBuilder) {
    builder
        .entity::<UserRelation>()
        .has_index(&["user_id"])
        .has_index(&["related_user_id"]);

    builder
        .entity::<UserGrade>()
        .has_index(&["user_id", "subject_id"]);

    builder
        .entity::<UserSubject>()
        .has_index(&["user_id"])
        .has_index(&["subject_id"]);

    builder
        .entity::<UserPresence>()
        .has_index(&["user_id", "occurred_on"]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_registers_every_entity_type() {
        let model = configure_grade_center_model().unwrap();
        assert_eq!(model.len(), 12);
        assert!(model.descriptor::<School>().is_some());
        assert!(model.descriptor::<UserRole>().is_some());
        assert!(model.descriptor::<UserPresence>().is_some());
    }

    #[test]
    fn test_every_deletable_type_is_filtered() {
        let model = configure_grade_center_model().unwrap();
        for descriptor in model.entity_types() {
            assert_eq!(
                descriptor.capabilities().deletable,
                descriptor.query_filter().is_some(),
                "{}",
                descriptor.type_name()
            );
        }
        assert_eq!(
            model
                .entity_types()
                .filter(|d| d.query_filter().is_some())
                .count(),
            9
        );
    }

    #[test]
    fn test_configuration_is_deterministic() {
        let first = configure_grade_center_model().unwrap();
        let second = configure_grade_center_model().unwrap();
        assert_eq!(first.index_statements(), second.index_statements());

        let tables = |m: &Model| m.entity_types().map(|d| d.table()).collect::<Vec<_>>();
        assert_eq!(tables(&first), tables(&second));
    }

    #[test]
    fn test_identity_unique_indexes() {
        let model = configure_grade_center_model().unwrap();
        let statements = model.index_statements();
        assert!(statements.contains(
            &"CREATE UNIQUE INDEX IF NOT EXISTS ux_users_normalized_email ON users (normalized_email)"
                .to_string()
        ));
        assert!(statements.contains(
            &"CREATE INDEX IF NOT EXISTS ix_users_is_deleted ON users (is_deleted)".to_string()
        ));
    }
}
