use anyhow::Result;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Schema migrations embedded at compile time from `apps/api/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Applies any pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Applying database migrations...");
    MIGRATOR.run(pool).await?;
    info!("Database schema is up to date");
    Ok(())
}
