//! socialwatch - Account record store for a social-media monitoring application
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Service Layer                            │
//! │  - Profile ingestion                                        │
//! │  - Monitoring job mutations (stats, validity)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Data Layer                              │
//! │  - SQLite (sqlx)                                            │
//! │  - Validation rules and attribute labels                    │
//! │  - Lazy relation queries                                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `service`: Business logic layer
//! - `data`: Database, models and relations
//! - `config`: Configuration management
//! - `error`: Error types
//! - `metrics`: Prometheus instruments

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod service;

use std::sync::Arc;

/// Application state shared by callers
///
/// Cheap to clone; holds the pool and the services built on it.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// Database connection pool
    pub db: Arc<data::Database>,

    /// Account lifecycle operations
    pub accounts: Arc<service::AccountService>,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Steps
    /// 1. Connect to SQLite database (runs migrations)
    /// 2. Build services
    ///
    /// # Errors
    /// Returns error if any initialization step fails
    pub async fn new(config: config::AppConfig) -> Result<Self, error::AppError> {
        tracing::info!("Initializing application state...");

        let db = data::Database::connect_with_pool_size(
            &config.database.path,
            config.database.max_connections,
        )
        .await?;
        let db = Arc::new(db);
        tracing::info!("Database connected");

        let accounts = service::AccountService::new(db.clone(), &config.monitoring);

        tracing::info!("Application state initialized successfully");

        Ok(Self {
            config: Arc::new(config),
            db,
            accounts: Arc::new(accounts),
        })
    }
}
