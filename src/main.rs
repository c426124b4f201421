//! socialwatch binary entry point

use socialwatch::{AppState, config, data::Account};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point
///
/// # Setup
/// 1. Load configuration from file and environment
/// 2. Initialize tracing/logging
/// 3. Initialize metrics
/// 4. Initialize AppState (connects and migrates the database)
/// 5. Report a short summary of the store
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration
    let config = config::AppConfig::load()?;

    // 2. Initialize tracing/logging
    let default_filter = format!("socialwatch={}", config.logging.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    tracing::info!(
        database = %config.database.path.display(),
        "Starting socialwatch..."
    );

    // 3. Initialize metrics
    socialwatch::metrics::init_metrics();

    // 4. Initialize application state
    let state = AppState::new(config).await?;

    // 5. Summary
    let accounts = state.db.count_accounts().await?;
    let monitored = Account::monitored().count(state.db.pool()).await?;
    let used_tags = state.accounts.used_tags().await?;

    tracing::info!(
        accounts,
        monitored,
        used_tags = used_tags.len(),
        "Account store ready"
    );
    for tag in &used_tags {
        tracing::debug!(slug = %tag.slug, name = %tag.name, "Tag in use");
    }

    Ok(())
}
