//! SQLite database operations
//!
//! All database access goes through this module.
//! Account writes validate first and stamp their own timestamps; relation
//! reads are built as [`super::RecordQuery`] values on `Account`.

use chrono::{DateTime, Utc};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, SqliteConnection};
use std::path::Path;
use std::time::{Duration, Instant};

use super::fields::AccountField;
use super::models::*;
use super::validation::{self, ValidationErrors};
use crate::error::AppError;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a writer waits for the write lock before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection pool wrapper.
pub struct Database {
    pool: Pool<Sqlite>,
}

fn reject(errors: ValidationErrors) -> AppError {
    tracing::debug!(fields = ?errors.fields(), "Account validation failed");
    crate::metrics::observe_validation_failure(&errors);
    AppError::Validation(errors)
}

fn observe(operation: &str, table: &str, started: Instant) {
    crate::metrics::observe_db_query(operation, table, started.elapsed());
}

// =============================================================================
// Write transactions
// =============================================================================

/// Transaction opened with `BEGIN IMMEDIATE`
///
/// Holds the write lock from the first statement, so store checks and the
/// write that follows see the same rows and a concurrent writer waits on
/// the busy timeout instead of failing its lock upgrade.
/// Dropped before `finish` (cancelled future), the connection is detached
/// and closed, which rolls the transaction back.
struct WriteTransaction {
    conn: Option<PoolConnection<Sqlite>>,
}

impl WriteTransaction {
    async fn begin(pool: &Pool<Sqlite>) -> Result<Self, AppError> {
        let mut tx = Self {
            conn: Some(pool.acquire().await?),
        };
        sqlx::query("BEGIN IMMEDIATE").execute(tx.conn()?).await?;
        Ok(tx)
    }

    fn conn(&mut self) -> Result<&mut SqliteConnection, AppError> {
        self.conn
            .as_deref_mut()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("write transaction already finished")))
    }

    /// Commit on `Ok`, roll back on `Err`, then hand `result` back
    async fn finish<T>(mut self, result: Result<T, AppError>) -> Result<T, AppError> {
        let statement = if result.is_ok() { "COMMIT" } else { "ROLLBACK" };
        let ended = match self.conn.as_deref_mut() {
            Some(conn) => sqlx::query(statement).execute(conn).await.map(|_| ()),
            None => Ok(()),
        };

        match ended {
            Ok(()) => {
                // Back to the pool with no transaction open
                self.conn.take();
                result
            }
            Err(error) => {
                tracing::warn!(%error, statement, "Ending write transaction failed");
                result.and(Err(error.into()))
            }
        }
    }
}

impl Drop for WriteTransaction {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            drop(conn.detach());
        }
    }
}

// =============================================================================
// Store-backed validation rules
// =============================================================================

/// Run the rules that need the store, after the field rules
///
/// `account_id` is the row being updated, excluded from uniqueness.
async fn validate_against_store(
    conn: &mut SqliteConnection,
    draft: &AccountDraft,
    account_id: Option<i64>,
    errors: &mut ValidationErrors,
) -> Result<(), AppError> {
    username_unique(conn, draft, account_id, errors).await?;
    reference_exists(conn, AccountField::ProxyId, "proxy", draft.proxy_id, errors).await?;
    reference_exists(conn, AccountField::ProxyTagId, "tag", draft.proxy_tag_id, errors).await?;
    Ok(())
}

async fn username_unique(
    conn: &mut SqliteConnection,
    draft: &AccountDraft,
    account_id: Option<i64>,
    errors: &mut ValidationErrors,
) -> Result<(), AppError> {
    let field = AccountField::Username;
    if errors.has(field) || draft.username.is_empty() {
        return Ok(());
    }

    let taken = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM account WHERE username = ? COLLATE NOCASE AND (? IS NULL OR id != ?)",
    )
    .bind(&draft.username)
    .bind(account_id)
    .bind(account_id)
    .fetch_one(&mut *conn)
    .await?;

    if taken > 0 {
        errors.add(
            field,
            format!(
                "{} \"{}\" has already been taken.",
                field.label(),
                draft.username
            ),
        );
    }
    Ok(())
}

/// `table` is one of the fixed collaborator tables, never caller input
async fn reference_exists(
    conn: &mut SqliteConnection,
    field: AccountField,
    table: &'static str,
    id: Option<i64>,
    errors: &mut ValidationErrors,
) -> Result<(), AppError> {
    let Some(id) = id else {
        return Ok(());
    };
    if errors.has(field) {
        return Ok(());
    }

    let found = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM {table} WHERE id = ?"
    ))
    .bind(id)
    .fetch_one(&mut *conn)
    .await?;

    if found == 0 {
        errors.add(field, format!("{} is invalid.", field.label()));
    }
    Ok(())
}

// =============================================================================
// Account rows
// =============================================================================

async fn fetch_account(conn: &mut SqliteConnection, id: i64) -> Result<Option<Account>, AppError> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM account WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(account)
}

async fn insert_account_row(
    conn: &mut SqliteConnection,
    draft: &AccountDraft,
) -> Result<Account, AppError> {
    let started = Instant::now();
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO account (
            uid, name, username, profile_pic_url, full_name, biography,
            external_url, instagram_id, updated_at, created_at, monitoring,
            proxy_id, proxy_tag_id, disabled, accounts_monitoring_level,
            accounts_default_tags, is_valid, invalidation_type_id,
            invalidation_count, update_stats_after
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uid::new().0)
    .bind(&draft.name)
    .bind(&draft.username)
    .bind(&draft.profile_pic_url)
    .bind(&draft.full_name)
    .bind(&draft.biography)
    .bind(&draft.external_url)
    .bind(&draft.instagram_id)
    .bind(now)
    .bind(now)
    .bind(draft.monitoring)
    .bind(draft.proxy_id)
    .bind(draft.proxy_tag_id)
    .bind(draft.disabled)
    .bind(draft.accounts_monitoring_level)
    .bind(&draft.accounts_default_tags)
    .bind(draft.is_valid)
    .bind(draft.invalidation_type_id)
    .bind(draft.invalidation_count)
    .bind(draft.update_stats_after)
    .execute(&mut *conn)
    .await?;
    observe("insert", "account", started);

    fetch_account(conn, result.last_insert_rowid())
        .await?
        .ok_or(AppError::NotFound)
}

async fn update_account_row(
    conn: &mut SqliteConnection,
    id: i64,
    draft: &AccountDraft,
) -> Result<Account, AppError> {
    let started = Instant::now();

    let result = sqlx::query(
        r#"
        UPDATE account SET
            name = ?, username = ?, profile_pic_url = ?, full_name = ?,
            biography = ?, external_url = ?, instagram_id = ?, updated_at = ?,
            monitoring = ?, proxy_id = ?, proxy_tag_id = ?, disabled = ?,
            accounts_monitoring_level = ?, accounts_default_tags = ?,
            is_valid = ?, invalidation_type_id = ?, invalidation_count = ?,
            update_stats_after = ?
        WHERE id = ?
        "#,
    )
    .bind(&draft.name)
    .bind(&draft.username)
    .bind(&draft.profile_pic_url)
    .bind(&draft.full_name)
    .bind(&draft.biography)
    .bind(&draft.external_url)
    .bind(&draft.instagram_id)
    .bind(Utc::now())
    .bind(draft.monitoring)
    .bind(draft.proxy_id)
    .bind(draft.proxy_tag_id)
    .bind(draft.disabled)
    .bind(draft.accounts_monitoring_level)
    .bind(&draft.accounts_default_tags)
    .bind(draft.is_valid)
    .bind(draft.invalidation_type_id)
    .bind(draft.invalidation_count)
    .bind(draft.update_stats_after)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    observe("update", "account", started);

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    fetch_account(conn, id).await?.ok_or(AppError::NotFound)
}

/// Store rules then insert, on a connection holding the write lock
async fn insert_validated(
    conn: &mut SqliteConnection,
    draft: &AccountDraft,
    mut errors: ValidationErrors,
) -> Result<Account, AppError> {
    validate_against_store(conn, draft, None, &mut errors).await?;
    if !errors.is_empty() {
        return Err(reject(errors));
    }
    insert_account_row(conn, draft).await
}

async fn update_validated(
    conn: &mut SqliteConnection,
    id: i64,
    draft: &AccountDraft,
    mut errors: ValidationErrors,
) -> Result<Account, AppError> {
    if fetch_account(conn, id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    validate_against_store(conn, draft, Some(id), &mut errors).await?;
    if !errors.is_empty() {
        return Err(reject(errors));
    }
    update_account_row(conn, id, draft).await
}

async fn insert_stats_row(
    conn: &mut SqliteConnection,
    account_id: i64,
    stats: &NewAccountStats,
) -> Result<AccountStats, AppError> {
    let started = Instant::now();
    let stats = sqlx::query_as::<_, AccountStats>(
        r#"
        INSERT INTO account_stats (account_id, followed_by, follows, media, er, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(stats.followed_by)
    .bind(stats.follows)
    .bind(stats.media)
    .bind(stats.er)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;
    observe("insert", "account_stats", started);

    Ok(stats)
}

async fn schedule_stats_row(
    conn: &mut SqliteConnection,
    account_id: i64,
    update_stats_after: Option<DateTime<Utc>>,
) -> Result<bool, AppError> {
    let started = Instant::now();
    let result = sqlx::query(
        "UPDATE account SET update_stats_after = ?, updated_at = ? WHERE id = ?",
    )
    .bind(update_stats_after)
    .bind(Utc::now())
    .bind(account_id)
    .execute(&mut *conn)
    .await?;
    observe("update", "account", started);

    Ok(result.rows_affected() == 1)
}

/// Schedule first, so a missing account writes nothing
async fn record_stats_rows(
    conn: &mut SqliteConnection,
    account_id: i64,
    stats: &NewAccountStats,
    update_stats_after: DateTime<Utc>,
) -> Result<Option<AccountStats>, AppError> {
    if !schedule_stats_row(conn, account_id, Some(update_stats_after)).await? {
        return Ok(None);
    }
    insert_stats_row(conn, account_id, stats).await.map(Some)
}

impl Database {
    // =========================================================================
    // Connection
    // =========================================================================

    /// Connect to SQLite database
    ///
    /// Creates the database file if it doesn't exist.
    /// Runs pending migrations automatically.
    ///
    /// # Arguments
    /// * `path` - Path to SQLite database file
    ///
    /// # Errors
    /// Returns error if connection or migration fails
    pub async fn connect(path: &Path) -> Result<Self, AppError> {
        Self::connect_with_pool_size(path, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Connect with an explicit pool size
    pub async fn connect_with_pool_size(
        path: &Path,
        max_connections: u32,
    ) -> Result<Self, AppError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Database(sqlx::Error::Io(e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                AppError::Internal(anyhow::anyhow!("Migration failed: {}", e))
            })?;

        tracing::info!(path = %path.display(), "Database connected and migrated successfully");

        Ok(Self { pool })
    }

    /// Pool to execute relation queries against
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    // =========================================================================
    // Account
    // =========================================================================

    pub async fn get_account(&self, id: i64) -> Result<Option<Account>, AppError> {
        let mut conn = self.pool.acquire().await?;
        fetch_account(&mut conn, id).await
    }

    pub async fn get_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM account WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    pub async fn get_account_by_uid(&self, uid: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM account WHERE uid = ?")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    pub async fn count_accounts(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM account")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Run every validation rule without writing
    ///
    /// # Arguments
    /// * `account_id` - Row being updated, if any
    pub async fn validate_account(
        &self,
        draft: &AccountDraft,
        account_id: Option<i64>,
    ) -> Result<ValidationErrors, AppError> {
        let mut errors = ValidationErrors::default();
        validation::validate_fields(draft, &mut errors);

        let mut conn = self.pool.acquire().await?;
        validate_against_store(&mut conn, draft, account_id, &mut errors).await?;
        Ok(errors)
    }

    /// Validate and insert a new account
    ///
    /// Generates the `uid` and stamps `created_at`/`updated_at`.
    ///
    /// # Errors
    /// `AppError::Validation` with every failing field; nothing is written.
    pub async fn insert_account(&self, draft: &AccountDraft) -> Result<Account, AppError> {
        self.insert_account_reporting(draft, ValidationErrors::default())
            .await
    }

    /// Like [`Database::insert_account`], reporting `errors` found earlier
    /// (type rules) together with the rest.
    pub(crate) async fn insert_account_reporting(
        &self,
        draft: &AccountDraft,
        mut errors: ValidationErrors,
    ) -> Result<Account, AppError> {
        validation::validate_fields(draft, &mut errors);

        let mut tx = WriteTransaction::begin(&self.pool).await?;
        let result = insert_validated(tx.conn()?, draft, errors).await;
        let account = tx.finish(result).await?;

        tracing::info!(
            account_id = account.id,
            username = %account.username,
            "Account created"
        );
        Ok(account)
    }

    /// Insert without evaluating validation rules
    ///
    /// Store constraints still apply and surface as
    /// `AppError::ConstraintViolation`.
    pub async fn insert_account_unchecked(&self, draft: &AccountDraft) -> Result<Account, AppError> {
        let mut conn = self.pool.acquire().await?;
        let account = insert_account_row(&mut conn, draft).await?;

        tracing::info!(
            account_id = account.id,
            username = %account.username,
            "Account created without validation"
        );
        Ok(account)
    }

    /// Validate and update an account
    ///
    /// Keeps `uid` and `created_at`, stamps `updated_at`.
    ///
    /// # Errors
    /// `AppError::NotFound` if no row has `id`, `AppError::Validation` on
    /// rule failures.
    pub async fn update_account(
        &self,
        id: i64,
        draft: &AccountDraft,
    ) -> Result<Account, AppError> {
        self.update_account_reporting(id, draft, ValidationErrors::default())
            .await
    }

    pub(crate) async fn update_account_reporting(
        &self,
        id: i64,
        draft: &AccountDraft,
        mut errors: ValidationErrors,
    ) -> Result<Account, AppError> {
        validation::validate_fields(draft, &mut errors);

        let mut tx = WriteTransaction::begin(&self.pool).await?;
        let result = update_validated(tx.conn()?, id, draft, errors).await;
        let account = tx.finish(result).await?;

        tracing::info!(
            account_id = account.id,
            username = %account.username,
            "Account updated"
        );
        Ok(account)
    }

    /// Mark an account invalid and count the invalidation.
    ///
    /// # Returns
    /// `true` if updated, `false` if no matching account row exists.
    pub async fn record_account_invalidation(
        &self,
        id: i64,
        invalidation_type_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let started = Instant::now();
        let result = sqlx::query(
            r#"
            UPDATE account
            SET is_valid = 0, invalidation_type_id = ?,
                invalidation_count = invalidation_count + 1, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(invalidation_type_id)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        observe("update", "account", started);

        Ok(result.rows_affected() == 1)
    }

    /// Mark an account valid again, clearing the invalidation state.
    ///
    /// # Returns
    /// `true` if updated, `false` if no matching account row exists.
    pub async fn clear_account_invalidation(&self, id: i64) -> Result<bool, AppError> {
        let started = Instant::now();
        let result = sqlx::query(
            r#"
            UPDATE account
            SET is_valid = 1, invalidation_type_id = NULL,
                invalidation_count = 0, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        observe("update", "account", started);

        Ok(result.rows_affected() == 1)
    }

    /// Set the moment before which stats are not refreshed.
    ///
    /// # Returns
    /// `true` if updated, `false` if no matching account row exists.
    pub async fn set_account_update_stats_after(
        &self,
        id: i64,
        update_stats_after: Option<DateTime<Utc>>,
    ) -> Result<bool, AppError> {
        let mut conn = self.pool.acquire().await?;
        schedule_stats_row(&mut conn, id, update_stats_after).await
    }

    // =========================================================================
    // Proxy
    // =========================================================================

    pub async fn insert_proxy(&self, proxy: &NewProxy) -> Result<Proxy, AppError> {
        let now = Utc::now();
        let proxy = sqlx::query_as::<_, Proxy>(
            r#"
            INSERT INTO proxy (ip, port, username, password, active, created_at, updated_at)
            VALUES (?, ?, ?, ?, 1, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&proxy.ip)
        .bind(proxy.port)
        .bind(&proxy.username)
        .bind(&proxy.password)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(proxy)
    }

    /// Delete a proxy; accounts using it fall back to no proxy.
    ///
    /// # Returns
    /// `true` if a row was deleted
    pub async fn delete_proxy(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM proxy WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    // =========================================================================
    // Tags
    // =========================================================================

    pub async fn insert_tag(&self, name: &str, slug: &str) -> Result<Tag, AppError> {
        let now = Utc::now();
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tag (name, slug, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(tag)
    }

    /// Delete a tag and its account associations.
    ///
    /// # Returns
    /// `true` if a row was deleted
    pub async fn delete_tag(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tag WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Attach a tag to an account.
    ///
    /// # Returns
    /// `true` if attached, `false` if the pair already existed.
    pub async fn attach_tag(
        &self,
        account_id: i64,
        tag_id: i64,
        user_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO account_tag (account_id, tag_id, user_id, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(account_id)
        .bind(tag_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    // =========================================================================
    // Account collaborators
    // =========================================================================

    pub async fn insert_invalidation_type(
        &self,
        name: &str,
    ) -> Result<AccountInvalidationType, AppError> {
        let invalidation_type = sqlx::query_as::<_, AccountInvalidationType>(
            "INSERT INTO account_invalidation_type (name) VALUES (?) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(invalidation_type)
    }

    pub async fn insert_account_note(
        &self,
        account_id: i64,
        user_id: Option<i64>,
        note: &str,
    ) -> Result<AccountNote, AppError> {
        let now = Utc::now();
        let note = sqlx::query_as::<_, AccountNote>(
            r#"
            INSERT INTO account_note (account_id, user_id, note, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(user_id)
        .bind(note)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(note)
    }

    pub async fn insert_account_stats(
        &self,
        account_id: i64,
        stats: &NewAccountStats,
    ) -> Result<AccountStats, AppError> {
        let mut conn = self.pool.acquire().await?;
        insert_stats_row(&mut conn, account_id, stats).await
    }

    /// Store a stats snapshot and set the next refresh in one transaction
    ///
    /// # Returns
    /// `None` if no account has `account_id`; nothing is written then.
    pub async fn record_account_stats(
        &self,
        account_id: i64,
        stats: &NewAccountStats,
        update_stats_after: DateTime<Utc>,
    ) -> Result<Option<AccountStats>, AppError> {
        let mut tx = WriteTransaction::begin(&self.pool).await?;
        let result = record_stats_rows(tx.conn()?, account_id, stats, update_stats_after).await;
        tx.finish(result).await
    }

    // =========================================================================
    // Media
    // =========================================================================

    pub async fn insert_media(&self, account_id: i64, media: &NewMedia) -> Result<Media, AppError> {
        let now = Utc::now();
        let media = sqlx::query_as::<_, Media>(
            r#"
            INSERT INTO media (
                account_id, shortcode, is_video, caption, taken_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(&media.shortcode)
        .bind(media.is_video)
        .bind(&media.caption)
        .bind(media.taken_at)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(media)
    }

    /// Link a media item to an account it mentions.
    ///
    /// # Returns
    /// `true` if linked, `false` if the pair already existed.
    pub async fn link_media_account(
        &self,
        media_id: i64,
        account_id: i64,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO media_account (media_id, account_id, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(media_id)
        .bind(account_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
