use anyhow::Result;
use tracing::info;

use persistence::config::Config;
use persistence::logging::init_logging;
use persistence::metrics::record_pool_metrics;
use persistence::Database;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_logging(&config.logging)?;

    info!("Starting GradeCenter database v{}", env!("CARGO_PKG_VERSION"));

    let database = Database::connect(&config.database).await?;

    if config.database.run_migrations {
        info!("Running database migrations...");
        database.initialize().await?;
        info!("Migrations completed");
    } else {
        let indexes = database.ensure_indexes().await?;
        info!(indexes = indexes, "Indexes ensured");
    }

    for descriptor in database.model().entity_types() {
        let capabilities = descriptor.capabilities();
        info!(
            entity = descriptor.type_name(),
            table = descriptor.table(),
            deletable = capabilities.deletable,
            audited = capabilities.audited,
            filtered = descriptor.query_filter().is_some(),
            "Entity registered"
        );
    }

    let mut context = database.context();
    let subjects = context.subjects().count().await?;
    let users = context.users().count().await?;
    info!(subjects = subjects, users = users, "Database ready");

    record_pool_metrics(database.pool());
    database.pool().close().await;

    Ok(())
}
