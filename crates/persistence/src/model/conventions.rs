//! Model-wide conventions applied after every entity type is registered.
//!
//! Both conventions are driven only by each descriptor's capabilities, so a
//! new deletable entity picks them up by being registered.

use super::{IndexDefinition, ModelBuilder, QueryFilter};
use crate::entities::IS_DELETED_COLUMN;

/// Restricts every query of a deletable entity type to rows that are not
/// soft deleted.
pub fn apply_soft_delete_filters(builder: &mut ModelBuilder) {
    for descriptor in builder
        .descriptors_mut()
        .filter(|d| d.capabilities.deletable)
    {
        descriptor.query_filter = Some(QueryFilter::not_deleted());
    }
}

/// Indexes the soft-delete flag of every deletable entity type.
pub fn apply_index_conventions(builder: &mut ModelBuilder) {
    for descriptor in builder
        .descriptors_mut()
        .filter(|d| d.capabilities.deletable)
    {
        let index = IndexDefinition::new(descriptor.table, &[IS_DELETED_COLUMN], false);
        if !descriptor.indexes.iter().any(|i| i.name == index.name) {
            descriptor.indexes.push(index);
        }
    }
}
