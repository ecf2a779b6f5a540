//! Database connection pool management and startup.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use shared::clock::{Clock, SystemClock};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::context::GradeCenterContext;
use crate::error::DatabaseError;
use crate::model::{configure_grade_center_model, Model};

/// Creates a SQLite connection pool with the given configuration.
///
/// An in-memory database lives only as long as its connection, so for
/// in-memory URLs the pool keeps exactly one connection open forever.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
    };

    pool_options
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_with(options)
        .await
}

/// Long-lived handle owning the pool, the built model and the clock.
///
/// Hands out one [`GradeCenterContext`] per unit of work.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    model: Arc<Model>,
    clock: Arc<dyn Clock>,
}

impl Database {
    /// Connects and builds the model. Model configuration errors are fatal.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let model = configure_grade_center_model()?;
        let pool = create_pool(config).await?;
        Ok(Self::new(pool, model))
    }

    pub fn new(pool: SqlitePool, model: Model) -> Self {
        Self {
            pool,
            model: Arc::new(model),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used to stamp saves.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Runs the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./src/migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Creates every index declared by the model. Returns how many
    /// statements ran.
    pub async fn ensure_indexes(&self) -> Result<usize, DatabaseError> {
        let statements = self.model.index_statements();
        for statement in &statements {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(statements.len())
    }

    /// Migrates the schema and creates the model's indexes.
    pub async fn initialize(&self) -> Result<(), DatabaseError> {
        self.migrate().await?;
        let indexes = self.ensure_indexes().await?;
        info!(
            entity_types = self.model.len(),
            indexes = indexes,
            "Database initialized"
        );
        Ok(())
    }

    /// A fresh unit of work.
    pub fn context(&self) -> GradeCenterContext {
        GradeCenterContext::new(
            self.pool.clone(),
            Arc::clone(&self.model),
            Arc::clone(&self.clock),
        )
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn model(&self) -> &Model {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_database_initializes() {
        tokio_test::block_on(async {
            let database = Database::connect(&DatabaseConfig::in_memory())
                .await
                .unwrap();
            database.initialize().await.unwrap();

            let mut context = database.context();
            assert_eq!(context.subjects().count().await.unwrap(), 0);
            assert_eq!(database.model().len(), 12);
        });
    }

    #[test]
    fn test_in_memory_pool_keeps_a_single_connection() {
        tokio_test::block_on(async {
            let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
            sqlx::query("CREATE TABLE scratch (id INTEGER)")
                .execute(&pool)
                .await
                .unwrap();

            // Same connection, so the table is still there.
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scratch")
                .fetch_one(&pool)
                .await
                .unwrap();
            assert_eq!(count, 0);
            assert!(pool.size() <= 1);
        });
    }
}
