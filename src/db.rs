use std::time::Duration;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{error, info};

use crate::config::{self, AppConfig};

/// Opens the shared pool. Connections are made on first use.
pub fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let opts = config.connect_options()?;
    info!(target_db = %config::describe(&opts), "configuring database pool");

    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy_with(opts))
}

/// Checks connectivity and applies embedded migrations.
///
/// Outside development any failure aborts startup; in development it is
/// logged and the server comes up anyway.
pub async fn migrate(db: &PgPool, config: &AppConfig) -> anyhow::Result<()> {
    info!("starting database migration");

    let result = async {
        sqlx::query("SELECT 1")
            .execute(db)
            .await
            .context("database connection test")?;
        info!("database connection test succeeded");

        sqlx::migrate!("./migrations")
            .run(db)
            .await
            .context("run migrations")?;
        Ok::<_, anyhow::Error>(())
    }
    .await;

    match result {
        Ok(()) => {
            info!("database migration completed");
            Ok(())
        }
        Err(e) if config.is_development() => {
            error!(error = %format!("{e:#}"), "database migration failed; continuing in development");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
