//! Flushes a rewritten change set to the store.

use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;

use super::sql;
use super::tracker::{EntryState, TrackedEntry};
use crate::entities::{bind_value, SqlValue};
use crate::error::ContextError;

/// Writes every pending entry inside one transaction and returns the number
/// of rows affected.
///
/// An update or delete that touches no row aborts the whole save with
/// [`ContextError::ConcurrencyConflict`]; the transaction is rolled back when
/// it is dropped.
///
/// `token` is checked before the transaction opens and raced against each
/// statement. Once every statement has run the commit is awaited to the end,
/// so a save that reports [`ContextError::Cancelled`] never committed.
pub(crate) async fn flush(
    pool: &SqlitePool,
    entries: &[TrackedEntry],
    token: Option<&CancellationToken>,
) -> Result<usize, ContextError> {
    if token.is_some_and(|t| t.is_cancelled()) {
        return Err(ContextError::Cancelled);
    }

    let mut tx = pool.begin().await?;
    let mut affected = 0usize;

    for entry in entries {
        let entity = entry.entity();
        let table = entity.table_name();
        let columns = entity.column_names();

        let (statement, values) = match entry.state() {
            EntryState::Added => (
                sql::insert_statement(table, columns),
                entity.column_values(),
            ),
            EntryState::Modified => (
                sql::update_statement(table, columns),
                sql::update_values(columns, entity.column_values()),
            ),
            EntryState::Deleted => (
                sql::delete_statement(table),
                vec![SqlValue::Uuid(entity.entity_id())],
            ),
            EntryState::Unchanged => continue,
        };

        let mut query = sqlx::query(&statement);
        for value in values {
            query = bind_value!(query, value);
        }
        let execute = query.execute(&mut *tx);
        let result = match token {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(ContextError::Cancelled),
                    result = execute => result?,
                }
            }
            None => execute.await?,
        };
        let rows = result.rows_affected();

        if rows == 0 && entry.state() != EntryState::Added {
            return Err(ContextError::ConcurrencyConflict {
                table,
                id: entity.entity_id(),
            });
        }
        affected += rows as usize;
    }

    tx.commit().await?;
    Ok(affected)
}
