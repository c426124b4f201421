//! Common test utilities for integration tests

use socialwatch::data::{Account, AccountDraft, NewMedia};
use socialwatch::{AppState, config};
use tempfile::TempDir;

/// Test store instance
pub struct TestStore {
    pub state: AppState,
    pub _temp_dir: TempDir,
}

impl TestStore {
    /// Create a new store backed by a temporary SQLite file
    pub async fn new() -> Self {
        // Create temporary directory for test database
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        // Create test configuration
        let config = config::AppConfig {
            database: config::DatabaseConfig {
                path: db_path,
                max_connections: 2,
            },
            monitoring: config::MonitoringConfig {
                stats_update_delay_seconds: 600,
            },
            logging: config::LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        };

        let state = AppState::new(config).await.unwrap();

        Self {
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Insert an account with default attributes
    pub async fn create_account(&self, username: &str) -> Account {
        self.state
            .db
            .insert_account(&AccountDraft::new(username))
            .await
            .unwrap()
    }

    pub fn media(shortcode: &str) -> NewMedia {
        NewMedia {
            shortcode: shortcode.to_string(),
            is_video: false,
            caption: Some(format!("caption for {shortcode}")),
            taken_at: None,
        }
    }
}
