//! Model registration.

use std::any::TypeId;

use super::{EntityDescriptor, IndexDefinition, Model, QueryFilter};
use crate::entities::{
    Entity, CREATED_ON_COLUMN, DELETED_ON_COLUMN, IS_DELETED_COLUMN, MODIFIED_ON_COLUMN,
};
use crate::error::ModelError;

/// Collects entity descriptors before the model is frozen.
///
/// Registration is idempotent: registering a type or an index a second time
/// leaves the model unchanged.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    descriptors: Vec<EntityDescriptor>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` (if needed) and returns a builder for its configuration.
    pub fn entity<T: Entity>(&mut self) -> EntityTypeBuilder<'_> {
        let type_id = TypeId::of::<T>();
        let position = match self.descriptors.iter().position(|d| d.type_id == type_id) {
            Some(position) => position,
            None => {
                self.descriptors.push(EntityDescriptor::of::<T>());
                self.descriptors.len() - 1
            }
        };
        EntityTypeBuilder {
            descriptor: &mut self.descriptors[position],
        }
    }

    pub fn descriptors(&self) -> &[EntityDescriptor] {
        &self.descriptors
    }

    pub fn descriptors_mut(&mut self) -> impl Iterator<Item = &mut EntityDescriptor> {
        self.descriptors.iter_mut()
    }

    /// Validates the registrations and freezes them into a [`Model`].
    pub fn build(self) -> Result<Model, ModelError> {
        for (position, descriptor) in self.descriptors.iter().enumerate() {
            if let Some(other) = self.descriptors[..position]
                .iter()
                .find(|d| d.table == descriptor.table)
            {
                return Err(ModelError::DuplicateTable {
                    table: descriptor.table,
                    first: other.type_name,
                    second: descriptor.type_name,
                });
            }

            validate_capability_columns(descriptor)?;

            for index in &descriptor.indexes {
                if let Some(column) = index
                    .columns
                    .iter()
                    .copied()
                    .find(|c| !descriptor.has_column(c))
                {
                    return Err(ModelError::UnknownIndexColumn {
                        table: descriptor.table,
                        index: index.name.clone(),
                        column,
                    });
                }
            }
        }

        Ok(Model::new(self.descriptors))
    }
}

fn validate_capability_columns(descriptor: &EntityDescriptor) -> Result<(), ModelError> {
    let mut required = Vec::new();
    if descriptor.capabilities.deletable || descriptor.query_filter.is_some() {
        required.extend([IS_DELETED_COLUMN, DELETED_ON_COLUMN]);
    }
    if descriptor.capabilities.audited {
        required.extend([CREATED_ON_COLUMN, MODIFIED_ON_COLUMN]);
    }

    match required.into_iter().find(|c| !descriptor.has_column(c)) {
        Some(column) => Err(ModelError::MissingCapabilityColumn {
            entity: descriptor.type_name,
            table: descriptor.table,
            column,
        }),
        None => Ok(()),
    }
}

/// Fluent configuration of one registered entity type.
pub struct EntityTypeBuilder<'a> {
    descriptor: &'a mut EntityDescriptor,
}

impl EntityTypeBuilder<'_> {
    pub fn has_index(self, columns: &[&'static str]) -> Self {
        let index = IndexDefinition::new(self.descriptor.table, columns, false);
        self.with_index(index)
    }

    pub fn has_unique_index(self, columns: &[&'static str]) -> Self {
        let index = IndexDefinition::new(self.descriptor.table, columns, true);
        self.with_index(index)
    }

    pub fn has_query_filter(self, filter: QueryFilter) -> Self {
        self.descriptor.query_filter = Some(filter);
        self
    }

    fn with_index(self, index: IndexDefinition) -> Self {
        match self
            .descriptor
            .indexes
            .iter_mut()
            .find(|existing| existing.name == index.name)
        {
            Some(existing) => *existing = index,
            None => self.descriptor.indexes.push(index),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{impl_capabilities, SqlValue, Subject, UserRole};
    use sqlx::FromRow;
    use uuid::Uuid;

    /// Claims the soft-delete capability without the columns to back it.
    #[derive(Debug, Clone, FromRow)]
    struct BrokenNote {
        id: Uuid,
        #[sqlx(flatten)]
        deletion: domain::models::DeletionInfo,
    }

    impl Entity for BrokenNote {
        const TABLE: &'static str = "broken_notes";
        const COLUMNS: &'static [&'static str] = &["id"];

        fn id(&self) -> Uuid {
            self.id
        }

        fn values(&self) -> Vec<SqlValue> {
            vec![self.id.into()]
        }
    }

    impl_capabilities!(BrokenNote: deletable);

    /// Second mapping of the subjects table.
    #[derive(Debug, Clone, FromRow)]
    struct SubjectAlias {
        id: Uuid,
    }

    impl Entity for SubjectAlias {
        const TABLE: &'static str = "subjects";
        const COLUMNS: &'static [&'static str] = &["id"];

        fn id(&self) -> Uuid {
            self.id
        }

        fn values(&self) -> Vec<SqlValue> {
            vec![self.id.into()]
        }
    }

    impl_capabilities!(SubjectAlias);

    #[test]
    fn test_registering_twice_keeps_one_descriptor() {
        let mut builder = ModelBuilder::new();
        builder.entity::<Subject>().has_index(&["name"]);
        builder.entity::<Subject>().has_index(&["name"]);
        builder.entity::<UserRole>();

        let model = builder.build().unwrap();
        assert_eq!(model.len(), 2);
        assert_eq!(model.descriptor::<Subject>().unwrap().indexes().len(), 1);
    }

    #[test]
    fn test_unknown_index_column_is_fatal() {
        let mut builder = ModelBuilder::new();
        builder.entity::<Subject>().has_index(&["title"]);

        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownIndexColumn {
                table: "subjects",
                index: "ix_subjects_title".to_string(),
                column: "title",
            }
        );
    }

    #[test]
    fn test_duplicate_table_is_fatal() {
        let mut builder = ModelBuilder::new();
        builder.entity::<Subject>();
        builder.entity::<SubjectAlias>();

        let err = builder.build().unwrap_err();
        assert!(matches!(err, ModelError::DuplicateTable { table: "subjects", .. }));
    }

    #[test]
    fn test_capability_without_columns_is_fatal() {
        let mut builder = ModelBuilder::new();
        builder.entity::<BrokenNote>();

        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingCapabilityColumn {
                entity: "BrokenNote",
                table: "broken_notes",
                column: "is_deleted",
            }
        );
    }

    #[test]
    fn test_query_filter_requires_soft_delete_columns() {
        let mut builder = ModelBuilder::new();
        builder
            .entity::<UserRole>()
            .has_query_filter(QueryFilter::not_deleted());

        assert!(matches!(
            builder.build(),
            Err(ModelError::MissingCapabilityColumn { table: "user_roles", .. })
        ));
    }
}
