//! Persistence error types.

use thiserror::Error;
use uuid::Uuid;

/// Fatal model configuration errors, surfaced while building the model at
/// startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Table {table} is mapped by both {first} and {second}")]
    DuplicateTable {
        table: &'static str,
        first: &'static str,
        second: &'static str,
    },

    #[error("Index {index} on {table} references unknown column {column}")]
    UnknownIndexColumn {
        table: &'static str,
        index: String,
        column: &'static str,
    },

    #[error("{entity} declares a capability but its table {table} has no {column} column")]
    MissingCapabilityColumn {
        entity: &'static str,
        table: &'static str,
        column: &'static str,
    },
}

/// Errors returned by the persistence context.
///
/// Database failures are passed through unchanged; the save interceptor
/// itself never fails.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Entity type for table {0} is not part of the model")]
    UnregisteredEntity(&'static str),

    #[error("Unknown column {column} on {table}")]
    UnknownColumn { table: &'static str, column: String },

    #[error("Row {id} in {table} was changed or removed outside this unit of work")]
    ConcurrencyConflict { table: &'static str, id: Uuid },

    #[error("Save was cancelled before the changes were written")]
    Cancelled,
}

/// Errors raised while opening and preparing the database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid model configuration: {0}")]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_messages() {
        let err = ModelError::UnknownIndexColumn {
            table: "subjects",
            index: "ix_subjects_title".to_string(),
            column: "title",
        };
        assert_eq!(
            err.to_string(),
            "Index ix_subjects_title on subjects references unknown column title"
        );
    }

    #[test]
    fn test_database_error_wraps_model_error() {
        let err: DatabaseError = ModelError::DuplicateTable {
            table: "users",
            first: "ApplicationUser",
            second: "Teacher",
        }
        .into();
        assert!(err.to_string().starts_with("Invalid model configuration"));
    }
}
