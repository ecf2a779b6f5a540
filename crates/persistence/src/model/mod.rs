//! The entity model: one descriptor per entity type, built once at startup.
//!
//! Descriptors are registered from an explicit list of entity types (see
//! [`configuration`]); conventions then walk the descriptors and attach query
//! filters and indexes based on each type's capabilities.

pub mod builder;
pub mod configuration;
pub mod conventions;

use std::any::TypeId;

use crate::entities::{Entity, IS_DELETED_COLUMN};

pub use builder::{EntityTypeBuilder, ModelBuilder};
pub use configuration::configure_grade_center_model;

/// Capabilities of an entity type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub deletable: bool,
    pub audited: bool,
}

impl Capabilities {
    pub fn of<T: Entity>() -> Self {
        Self {
            deletable: T::DELETABLE,
            audited: T::AUDITED,
        }
    }
}

/// A predicate appended to every query of an entity type unless the caller
/// ignores query filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilter {
    predicate: String,
}

impl QueryFilter {
    /// Restricts queries to rows that have not been soft deleted.
    pub fn not_deleted() -> Self {
        Self {
            predicate: format!("{} = 0", IS_DELETED_COLUMN),
        }
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }
}

/// An index declared on an entity's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDefinition {
    pub name: String,
    pub columns: Vec<&'static str>,
    pub unique: bool,
}

impl IndexDefinition {
    pub fn new(table: &str, columns: &[&'static str], unique: bool) -> Self {
        let prefix = if unique { "ux" } else { "ix" };
        Self {
            name: format!("{}_{}_{}", prefix, table, columns.join("_")),
            columns: columns.to_vec(),
            unique,
        }
    }

    /// `CREATE INDEX` statement for this index on `table`.
    pub fn create_statement(&self, table: &str) -> String {
        format!(
            "CREATE {}INDEX IF NOT EXISTS {} ON {} ({})",
            if self.unique { "UNIQUE " } else { "" },
            self.name,
            table,
            self.columns.join(", ")
        )
    }
}

/// Everything the context needs to know about one entity type.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) table: &'static str,
    pub(crate) columns: &'static [&'static str],
    pub(crate) capabilities: Capabilities,
    pub(crate) indexes: Vec<IndexDefinition>,
    pub(crate) query_filter: Option<QueryFilter>,
}

impl EntityDescriptor {
    pub(crate) fn of<T: Entity>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: short_type_name::<T>(),
            table: T::TABLE,
            columns: T::COLUMNS,
            capabilities: Capabilities::of::<T>(),
            indexes: Vec::new(),
            query_filter: None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn indexes(&self) -> &[IndexDefinition] {
        &self.indexes
    }

    pub fn query_filter(&self) -> Option<&QueryFilter> {
        self.query_filter.as_ref()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| *c == column)
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// The built, immutable model shared by every context.
#[derive(Debug, Clone)]
pub struct Model {
    descriptors: Vec<EntityDescriptor>,
}

impl Model {
    pub(crate) fn new(descriptors: Vec<EntityDescriptor>) -> Self {
        Self { descriptors }
    }

    pub fn builder() -> ModelBuilder {
        ModelBuilder::new()
    }

    /// Descriptor of `T`, if `T` was registered.
    pub fn descriptor<T: Entity>(&self) -> Option<&EntityDescriptor> {
        let type_id = TypeId::of::<T>();
        self.descriptors.iter().find(|d| d.type_id == type_id)
    }

    /// All registered entity types in registration order.
    pub fn entity_types(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// `CREATE INDEX IF NOT EXISTS` statements for every declared index.
    pub fn index_statements(&self) -> Vec<String> {
        self.descriptors
            .iter()
            .flat_map(|d| d.indexes.iter().map(|i| i.create_statement(d.table)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{School, UserRole};

    #[test]
    fn test_not_deleted_predicate() {
        assert_eq!(QueryFilter::not_deleted().predicate(), "is_deleted = 0");
    }

    #[test]
    fn test_index_definition_names() {
        let index = IndexDefinition::new("users", &["normalized_email"], true);
        assert_eq!(index.name, "ux_users_normalized_email");
        assert_eq!(
            index.create_statement("users"),
            "CREATE UNIQUE INDEX IF NOT EXISTS ux_users_normalized_email ON users (normalized_email)"
        );

        let index = IndexDefinition::new("user_roles", &["user_id", "role_id"], false);
        assert_eq!(
            index.create_statement("user_roles"),
            "CREATE INDEX IF NOT EXISTS ix_user_roles_user_id_role_id ON user_roles (user_id, role_id)"
        );
    }

    #[test]
    fn test_descriptor_of_reads_entity_metadata() {
        let descriptor = EntityDescriptor::of::<School>();
        assert_eq!(descriptor.type_name(), "School");
        assert_eq!(descriptor.table(), "schools");
        assert!(descriptor.capabilities().deletable);
        assert!(descriptor.has_column("is_deleted"));
        assert!(descriptor.query_filter().is_none());

        let descriptor = EntityDescriptor::of::<UserRole>();
        assert_eq!(descriptor.capabilities(), Capabilities::default());
    }
}
