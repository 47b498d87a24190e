//! Database module for handling MongoDB connections and operations
//!
//! This module provides client configuration, connection pooling, health
//! checks and index bootstrap for the MongoDB document store.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let client = init_client(&config).await?;
//!     let is_healthy = health_check(&client.database(&config.database)).await?;
//!     println!("Database health check: {}", is_healthy);
//!     Ok(())
//! }
//! ```

use crate::error::{DatabaseError, DatabaseResult};
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{ClientOptions, IndexOptions},
};
use std::{env, time::Duration};
use tracing::{error, info};

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub uri: String,
    /// Name of the database holding the service collections
    pub database: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Connection and server selection timeout in seconds
    pub connect_timeout: u64,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `MONGODB_URI`: MongoDB connection string (default: "mongodb://localhost:27017")
    /// - `MONGODB_DATABASE`: Database name (default: "users_service")
    /// - `MONGODB_MAX_POOL_SIZE`: Maximum number of connections (default: 10)
    /// - `MONGODB_CONNECT_TIMEOUT`: Connection timeout in seconds (default: 10)
    pub fn from_env() -> DatabaseResult<Self> {
        let uri = env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let database = env::var("MONGODB_DATABASE").unwrap_or_else(|_| "users_service".to_string());
        if database.trim().is_empty() {
            return Err(DatabaseError::Configuration(
                "MONGODB_DATABASE must not be empty".to_string(),
            ));
        }

        let max_pool_size = env::var("MONGODB_MAX_POOL_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let connect_timeout = env::var("MONGODB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            uri,
            database,
            max_pool_size,
            connect_timeout,
        })
    }
}

/// Initialize a pooled MongoDB client
///
/// The driver connects lazily, so callers should follow up with
/// [`health_check`] before serving traffic.
///
/// # Arguments
///
/// * `config` - Database configuration
///
/// # Returns
///
/// * `DatabaseResult<Client>` - MongoDB client or error
pub async fn init_client(config: &DatabaseConfig) -> DatabaseResult<Client> {
    info!("Initializing MongoDB client");

    let mut options = ClientOptions::parse(&config.uri)
        .await
        .map_err(|e| DatabaseError::Configuration(format!("Invalid MongoDB URI: {}", e)))?;

    let timeout = Duration::from_secs(config.connect_timeout);
    options.max_pool_size = Some(config.max_pool_size);
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);
    options.app_name = Some("users-service".to_string());

    let client = Client::with_options(options).map_err(DatabaseError::Connection)?;

    info!("MongoDB client initialized successfully");
    Ok(client)
}

/// Check database connectivity
///
/// # Arguments
///
/// * `database` - Handle to the service database
///
/// # Returns
///
/// * `DatabaseResult<bool>` - True if the server answered a ping, false otherwise
pub async fn health_check(database: &Database) -> DatabaseResult<bool> {
    match database.run_command(doc! { "ping": 1 }).await {
        Ok(_) => {
            info!("Database health check successful");
            Ok(true)
        }
        Err(e) => {
            error!("Database health check failed: {}", e);
            Ok(false)
        }
    }
}

/// Create a unique ascending index for each of `fields` on `collection`
///
/// Index creation is idempotent, so this is safe to run on every startup.
pub async fn ensure_unique_indexes<T>(
    collection: &Collection<T>,
    fields: &[&str],
) -> DatabaseResult<()>
where
    T: Send + Sync,
{
    let indexes = fields.iter().map(|field| {
        let mut keys = Document::new();
        keys.insert(*field, 1);
        IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build()
    });

    collection
        .create_indexes(indexes)
        .await
        .map_err(DatabaseError::from_query)?;

    info!(
        "Ensured unique indexes on {}: {}",
        collection.name(),
        fields.join(", ")
    );
    Ok(())
}
