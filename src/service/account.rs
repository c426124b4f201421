//! Account service
//!
//! Handles account lifecycle: ingestion of discovered profiles, form
//! edits, and the mutations made by periodic monitoring jobs.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::MonitoringConfig;
use crate::data::{
    Account, AccountDraft, AccountField, AccountForm, AccountStats, Database, NewAccountStats,
    Tag,
};
use crate::error::{AppError, ConstraintKind};
use crate::metrics;

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Whether `error` only says the username is already stored
fn username_taken(error: &AppError) -> bool {
    match error {
        AppError::Validation(errors) => errors.fields() == [AccountField::Username],
        AppError::ConstraintViolation {
            kind: ConstraintKind::Unique,
            ..
        } => true,
        _ => false,
    }
}

/// Account service
pub struct AccountService {
    db: Arc<Database>,
    stats_update_delay: chrono::Duration,
}

impl AccountService {
    /// Create new account service
    pub fn new(db: Arc<Database>, monitoring: &MonitoringConfig) -> Self {
        Self {
            db,
            stats_update_delay: monitoring.stats_update_delay(),
        }
    }

    /// Get an account by ID
    pub async fn get_account(&self, id: i64) -> Result<Account, AppError> {
        self.db.get_account(id).await?.ok_or(AppError::NotFound)
    }

    /// Record a newly discovered profile
    ///
    /// Returns the existing account unchanged when the username is known.
    ///
    /// # Arguments
    /// * `username` - Profile username (no `@`)
    /// * `default_tags` - Tags to apply to accounts discovered from this one
    pub async fn register_discovered(
        &self,
        username: &str,
        default_tags: Option<&str>,
    ) -> Result<Account, AppError> {
        let username = username.trim().trim_start_matches('@');

        if let Some(existing) = self.db.get_account_by_username(username).await? {
            tracing::debug!(account_id = existing.id, username, "Account already known");
            return Ok(existing);
        }

        let mut draft = AccountDraft::new(username);
        draft.accounts_default_tags = normalize_optional_text(default_tags);

        match self.db.insert_account(&draft).await {
            Ok(account) => Ok(account),
            // Lost a race with a concurrent ingestion of the same profile.
            Err(error) if username_taken(&error) && !username.is_empty() => {
                match self.db.get_account_by_username(username).await? {
                    Some(existing) => Ok(existing),
                    None => Err(error),
                }
            }
            Err(error) => {
                metrics::observe_error(&error);
                Err(error)
            }
        }
    }

    /// Create an account from submitted attributes
    ///
    /// Type errors and rule errors are reported together.
    pub async fn create_from_form(&self, form: &AccountForm) -> Result<Account, AppError> {
        let (draft, errors) = form.parse();
        self.db
            .insert_account_reporting(&draft, errors)
            .await
            .inspect_err(metrics::observe_error)
    }

    /// Apply submitted attributes to an existing account
    pub async fn update_from_form(
        &self,
        id: i64,
        form: &AccountForm,
    ) -> Result<Account, AppError> {
        let mut draft = self.get_account(id).await?.to_draft();
        let errors = form.apply(&mut draft);
        self.db
            .update_account_reporting(id, &draft, errors)
            .await
            .inspect_err(metrics::observe_error)
    }

    /// Mark an account invalid
    ///
    /// # Arguments
    /// * `invalidation_type_id` - Why the account became invalid, if known
    pub async fn invalidate(
        &self,
        id: i64,
        invalidation_type_id: Option<i64>,
    ) -> Result<Account, AppError> {
        if !self
            .db
            .record_account_invalidation(id, invalidation_type_id)
            .await?
        {
            return Err(AppError::NotFound);
        }

        let account = self.get_account(id).await?;
        tracing::info!(
            account_id = id,
            invalidation_count = account.invalidation_count,
            "Account invalidated"
        );
        Ok(account)
    }

    /// Mark an account valid again
    pub async fn revalidate(&self, id: i64) -> Result<Account, AppError> {
        if !self.db.clear_account_invalidation(id).await? {
            return Err(AppError::NotFound);
        }
        self.get_account(id).await
    }

    /// Push the next stats refresh one configured delay into the future
    pub async fn schedule_stats_update(&self, id: i64) -> Result<Account, AppError> {
        let next = self.next_stats_update()?;
        if !self.db.set_account_update_stats_after(id, Some(next)).await? {
            return Err(AppError::NotFound);
        }
        self.get_account(id).await
    }

    /// Store a stats snapshot and schedule the next refresh
    ///
    /// Both writes happen together or not at all.
    pub async fn record_stats(
        &self,
        id: i64,
        stats: &NewAccountStats,
    ) -> Result<AccountStats, AppError> {
        let next = self.next_stats_update()?;
        let stats = self
            .db
            .record_account_stats(id, stats, next)
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::debug!(
            account_id = id,
            followed_by = stats.followed_by,
            "Account stats recorded"
        );
        Ok(stats)
    }

    fn next_stats_update(&self) -> Result<DateTime<Utc>, AppError> {
        Utc::now()
            .checked_add_signed(self.stats_update_delay)
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "next stats update is out of range: now + {}",
                    self.stats_update_delay
                ))
            })
    }

    /// Tags attached to at least one account, by slug
    pub async fn used_tags(&self) -> Result<Vec<Tag>, AppError> {
        Account::used_tags().all(self.db.pool()).await
    }
}
