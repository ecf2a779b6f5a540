//! Typed access to one entity type within a context.

use std::marker::PhantomData;

use uuid::Uuid;

use super::sql;
use super::tracker::EntryState;
use super::GradeCenterContext;
use crate::entities::{bind_value, Entity, SqlValue, ID_COLUMN};
use crate::error::ContextError;
use crate::metrics::QueryTimer;
use crate::model::EntityDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterMode {
    Apply,
    Ignore,
}

/// The set of `T` entities reachable through a context.
///
/// Reads hit the store and, unless [`EntitySet::ignore_query_filters`] was
/// called, exclude soft-deleted rows. Writes are only tracked; nothing is
/// written until the context is saved.
pub struct EntitySet<'c, T: Entity> {
    context: &'c mut GradeCenterContext,
    filters: FilterMode,
    _entity: PhantomData<T>,
}

impl<'c, T: Entity> EntitySet<'c, T> {
    pub(crate) fn new(context: &'c mut GradeCenterContext) -> Self {
        Self {
            context,
            filters: FilterMode::Apply,
            _entity: PhantomData,
        }
    }

    /// Skips the model's query filters for reads through this set, so
    /// soft-deleted rows are returned too.
    pub fn ignore_query_filters(mut self) -> Self {
        self.filters = FilterMode::Ignore;
        self
    }

    /// Tracks `entity` for insertion.
    pub fn add(&mut self, entity: T) {
        self.context.tracker.track(Box::new(entity), EntryState::Added);
    }

    /// Tracks `entity` for update.
    pub fn update(&mut self, entity: T) {
        self.context
            .tracker
            .track(Box::new(entity), EntryState::Modified);
    }

    /// Tracks `entity` for deletion. Deletable entities are tombstoned on
    /// save instead of being removed.
    pub fn remove(&mut self, entity: T) {
        self.context
            .tracker
            .track(Box::new(entity), EntryState::Deleted);
    }

    /// Tracks `entity` without a pending change.
    pub fn attach(&mut self, entity: T) {
        self.context
            .tracker
            .track(Box::new(entity), EntryState::Unchanged);
    }

    fn descriptor(&self) -> Result<&EntityDescriptor, ContextError> {
        self.context
            .model
            .descriptor::<T>()
            .ok_or(ContextError::UnregisteredEntity(T::TABLE))
    }

    fn conditions(&self, extra: Option<String>) -> Result<Vec<String>, ContextError> {
        let descriptor = self.descriptor()?;
        let mut conditions: Vec<String> = extra.into_iter().collect();
        if self.filters == FilterMode::Apply {
            if let Some(filter) = descriptor.query_filter() {
                conditions.push(filter.predicate().to_string());
            }
        }
        Ok(conditions)
    }

    async fn fetch(
        &self,
        operation: &'static str,
        condition: Option<String>,
        value: Option<SqlValue>,
    ) -> Result<Vec<T>, ContextError> {
        let conditions = self.conditions(condition)?;
        let statement = sql::select_statement(T::TABLE, T::COLUMNS, &conditions);

        let mut query = sqlx::query_as::<_, T>(&statement);
        if let Some(value) = value {
            query = bind_value!(query, value);
        }

        let timer = QueryTimer::new(operation, T::TABLE);
        let rows = query.fetch_all(&self.context.pool).await;
        timer.record();

        Ok(rows?)
    }

    /// Finds the entity with the given id.
    pub async fn find(&self, id: Uuid) -> Result<Option<T>, ContextError> {
        let rows = self
            .fetch(
                "find",
                Some(format!("{} = ?1", ID_COLUMN)),
                Some(SqlValue::Uuid(id)),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// All entities, in insertion order.
    pub async fn list(&self) -> Result<Vec<T>, ContextError> {
        self.fetch("list", None, None).await
    }

    /// Entities whose `column` equals `value`.
    ///
    /// `column` must be one of the entity's columns.
    pub async fn list_where(
        &self,
        column: &str,
        value: impl Into<SqlValue>,
    ) -> Result<Vec<T>, ContextError> {
        if !T::COLUMNS.iter().any(|c| *c == column) {
            return Err(ContextError::UnknownColumn {
                table: T::TABLE,
                column: column.to_string(),
            });
        }

        let value = value.into();
        let condition = match value {
            SqlValue::Null => format!("{} IS NULL", column),
            _ => format!("{} = ?1", column),
        };
        let value = match value {
            SqlValue::Null => None,
            other => Some(other),
        };
        self.fetch("list_where", Some(condition), value).await
    }

    pub async fn count(&self) -> Result<i64, ContextError> {
        let conditions = self.conditions(None)?;
        let statement = sql::count_statement(T::TABLE, &conditions);

        let timer = QueryTimer::new("count", T::TABLE);
        let count = sqlx::query_scalar::<_, i64>(&statement)
            .fetch_one(&self.context.pool)
            .await;
        timer.record();

        Ok(count?)
    }
}
