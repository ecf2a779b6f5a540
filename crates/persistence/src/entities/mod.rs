//! Database entity definitions.
//!
//! Entities are direct mappings to database rows. Each one describes its table
//! and columns through [`Entity`] and declares which cross-cutting
//! capabilities (soft delete, audit info) it has through
//! [`EntityCapabilities`], usually via `impl_capabilities!`.

use chrono::{DateTime, Utc};
use domain::models::{AuditInfo, Audited, Deletable, DeletionInfo};
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Primary key column shared by every table.
pub const ID_COLUMN: &str = "id";
/// Soft-delete flag column.
pub const IS_DELETED_COLUMN: &str = "is_deleted";
/// Soft-delete timestamp column.
pub const DELETED_ON_COLUMN: &str = "deleted_on";
/// Creation timestamp column; never rewritten after insert.
pub const CREATED_ON_COLUMN: &str = "created_on";
/// Modification timestamp column.
pub const MODIFIED_ON_COLUMN: &str = "modified_on";

/// A value bound to a statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(i64::from(value))
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<Uuid> for SqlValue {
    fn from(value: Uuid) -> Self {
        SqlValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

/// Binds a [`SqlValue`] to any SQLx query builder.
macro_rules! bind_value {
    ($query:expr, $value:expr) => {{
        let query = $query;
        match $value {
            $crate::entities::SqlValue::Null => query.bind(Option::<String>::None),
            $crate::entities::SqlValue::Bool(v) => query.bind(v),
            $crate::entities::SqlValue::Int(v) => query.bind(v),
            $crate::entities::SqlValue::Real(v) => query.bind(v),
            $crate::entities::SqlValue::Text(v) => query.bind(v),
            $crate::entities::SqlValue::Uuid(v) => query.bind(v),
            $crate::entities::SqlValue::Timestamp(v) => query.bind(v),
        }
    }};
}
pub(crate) use bind_value;

/// Soft-delete and audit capabilities of an entity type.
///
/// The associated constants describe the type for model building; the
/// accessors expose the capability on an instance for the save interceptor.
pub trait EntityCapabilities {
    const DELETABLE: bool = false;
    const AUDITED: bool = false;

    fn as_deletable_mut(&mut self) -> Option<&mut dyn Deletable> {
        None
    }

    fn as_audited_mut(&mut self) -> Option<&mut dyn Audited> {
        None
    }
}

/// A persisted row type.
pub trait Entity:
    for<'r> FromRow<'r, SqliteRow>
    + EntityCapabilities
    + Clone
    + fmt::Debug
    + Send
    + Sync
    + Unpin
    + 'static
{
    /// Table the entity is stored in.
    const TABLE: &'static str;

    /// All columns, starting with `id`.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Uuid;

    /// Column values in [`Entity::COLUMNS`] order.
    fn values(&self) -> Vec<SqlValue>;
}

/// Implements [`EntityCapabilities`] (and the domain capability traits) for an
/// entity whose soft-delete state lives in a `deletion` field and whose audit
/// info lives in an `audit` field.
macro_rules! impl_capabilities {
    (@deletable $entity:ident) => {
        impl ::domain::models::Deletable for $entity {
            fn deletion(&self) -> &::domain::models::DeletionInfo {
                &self.deletion
            }

            fn deletion_mut(&mut self) -> &mut ::domain::models::DeletionInfo {
                &mut self.deletion
            }
        }
    };
    (@audited $entity:ident) => {
        impl ::domain::models::Audited for $entity {
            fn audit_info(&self) -> &::domain::models::AuditInfo {
                &self.audit
            }

            fn audit_info_mut(&mut self) -> &mut ::domain::models::AuditInfo {
                &mut self.audit
            }
        }
    };
    ($entity:ident) => {
        impl $crate::entities::EntityCapabilities for $entity {}
    };
    ($entity:ident: deletable, audited) => {
        impl_capabilities!(@deletable $entity);
        impl_capabilities!(@audited $entity);

        impl $crate::entities::EntityCapabilities for $entity {
            const DELETABLE: bool = true;
            const AUDITED: bool = true;

            fn as_deletable_mut(&mut self) -> Option<&mut dyn ::domain::models::Deletable> {
                Some(self)
            }

            fn as_audited_mut(&mut self) -> Option<&mut dyn ::domain::models::Audited> {
                Some(self)
            }
        }
    };
    ($entity:ident: deletable) => {
        impl_capabilities!(@deletable $entity);

        impl $crate::entities::EntityCapabilities for $entity {
            const DELETABLE: bool = true;

            fn as_deletable_mut(&mut self) -> Option<&mut dyn ::domain::models::Deletable> {
                Some(self)
            }
        }
    };
    ($entity:ident: audited) => {
        impl_capabilities!(@audited $entity);

        impl $crate::entities::EntityCapabilities for $entity {
            const AUDITED: bool = true;

            fn as_audited_mut(&mut self) -> Option<&mut dyn ::domain::models::Audited> {
                Some(self)
            }
        }
    };
}
pub(crate) use impl_capabilities;

/// Values of the `created_on`, `modified_on` columns.
pub(crate) fn audit_values(audit: &AuditInfo) -> [SqlValue; 2] {
    [audit.created_on.into(), audit.modified_on.into()]
}

/// Values of the `is_deleted`, `deleted_on` columns.
pub(crate) fn deletion_values(deletion: &DeletionInfo) -> [SqlValue; 2] {
    [deletion.is_deleted.into(), deletion.deleted_on.into()]
}

pub mod class;
pub mod curriculum;
pub mod curriculum_subject;
pub mod school;
pub mod subject;
pub mod user;
pub mod user_grade;
pub mod user_presence;
pub mod user_relation;
pub mod user_subject;

pub use class::Class;
pub use curriculum::Curriculum;
pub use curriculum_subject::CurriculumSubject;
pub use school::School;
pub use subject::Subject;
pub use user::{ApplicationRole, ApplicationUser, UserRole};
pub use user_grade::UserGrade;
pub use user_presence::{PresenceStatusDb, UserPresence};
pub use user_relation::{RelationKindDb, UserRelation};
pub use user_subject::UserSubject;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_option_maps_to_null() {
        assert_eq!(SqlValue::from(None::<Uuid>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(3_i32)), SqlValue::Int(3));
    }

    #[test]
    fn test_capability_values_follow_column_order() {
        let at = Utc.with_ymd_and_hms(2024, 9, 15, 8, 0, 0).unwrap();
        let audit = AuditInfo::created_at(at);
        assert_eq!(
            audit_values(&audit),
            [SqlValue::Timestamp(at), SqlValue::Null]
        );

        let mut deletion = DeletionInfo::default();
        deletion.mark_deleted(at);
        assert_eq!(
            deletion_values(&deletion),
            [SqlValue::Bool(true), SqlValue::Timestamp(at)]
        );
    }

    #[test]
    fn test_capability_constants() {
        assert!(School::DELETABLE && School::AUDITED);
        assert!(!UserPresence::DELETABLE && UserPresence::AUDITED);
        assert!(!CurriculumSubject::DELETABLE && !CurriculumSubject::AUDITED);
        assert!(!UserRole::DELETABLE && !UserRole::AUDITED);
    }

    #[test]
    fn test_columns_and_values_line_up() {
        let school = School::new(domain::models::NewSchool {
            name: "First English Language School".to_string(),
            address: None,
        });
        assert_eq!(School::COLUMNS.len(), school.values().len());
        assert_eq!(School::COLUMNS[0], ID_COLUMN);
    }
}
