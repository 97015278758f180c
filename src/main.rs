use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod domain;
mod lookup;
mod metrics;
mod server;
mod service;
mod store;

use config::Config;
use lookup::{HttpAccountClient, HttpCatalogClient};
use metrics::Metrics;
use service::OrderService;
use store::PgOrderStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_service=debug")),
        )
        .init();

    let cfg = Config::load()?;
    tracing::info!(addr = %cfg.server.bind_addr(), "starting order service");

    // === 1. Database pool + migrations ===
    let pool = PgPoolOptions::new()
        .max_connections(cfg.postgres.max_connections)
        .acquire_timeout(cfg.postgres.connect_timeout())
        .connect(&cfg.postgres.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    // === 2. Collaborator clients ===
    let accounts = Arc::new(HttpAccountClient::new(
        &cfg.collaborators.account_base_url,
        cfg.collaborators.request_timeout(),
    )?);
    let catalog = Arc::new(HttpCatalogClient::new(
        &cfg.collaborators.catalog_base_url,
        cfg.collaborators.request_timeout(),
    )?);
    tracing::info!(
        account_base_url = %cfg.collaborators.account_base_url,
        catalog_base_url = %cfg.collaborators.catalog_base_url,
        "collaborator clients ready"
    );

    // === 3. Store + orchestration service ===
    let order_store = Arc::new(PgOrderStore::new(pool, cfg.postgres.op_timeout()));
    let order_service = OrderService::new(accounts, catalog, order_store);

    // === 4. Metrics + HTTP server (runs until SIGINT/SIGTERM) ===
    let metrics = Arc::new(Metrics::new()?);
    server::run(cfg.server, order_service, metrics).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
