use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod envelope;
mod error;
mod models;
mod password;
mod repositories;
mod routes;
mod settings;
mod state;
mod validation;

use common::database::{DatabaseConfig, health_check, init_client};
use tokio::net::TcpListener;

use crate::{repositories::MongoUserStore, settings::ServerConfig, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting users service");

    // Initialize the MongoDB client
    let db_config = DatabaseConfig::from_env()?;
    let client = init_client(&db_config).await?;
    let database = client.database(&db_config.database);

    // Check database connectivity
    if health_check(&database).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let user_store = MongoUserStore::new(&database);
    user_store.ensure_indexes().await?;

    info!("Users service initialized successfully");

    let app_state = AppState {
        user_store: Arc::new(user_store),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let server_config = ServerConfig::load()?;
    let address = server_config.address();
    let listener = TcpListener::bind(&address).await?;
    info!("Users service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Closing database connections");
    client.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
