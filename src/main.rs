use std::sync::Arc;

mod app;
mod config;
mod db;
mod products;
mod state;

use crate::{config::AppConfig, products::PgProductStore, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "mobileshop=debug,axum=info,tower_http=info,sqlx=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Arc::new(AppConfig::from_env()?);
    let db = db::connect(&config)?;
    db::migrate(&db, &config).await?;

    let store = Arc::new(PgProductStore::new(db.clone()));
    let app = app::build_app(AppState::from_parts(store, config.clone()));

    let served = app::serve(app, &config).await;

    db.close().await;
    tracing::info!("database pool closed");
    served
}
