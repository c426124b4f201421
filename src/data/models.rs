//! Data models
//!
//! Rust structs representing database rows.
//! Integer primary keys are assigned by SQLite; timestamps use chrono.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// ID Types
// =============================================================================

/// Generated external identifier (ULID format, 26 characters)
///
/// Example: "01ARZ3NDEKTSV4RRFFQ69G5FAV"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(pub String);

impl Uid {
    /// Generate a new ULID
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
    }
}

impl Default for Uid {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Account
// =============================================================================

/// A monitored social-media profile
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    /// Generated on insert, never changes
    pub uid: String,
    /// Name shown in lists; see [`Account::display_name`]
    pub name: Option<String>,
    pub username: String,
    pub profile_pic_url: Option<String>,
    pub full_name: Option<String>,
    pub biography: Option<String>,
    pub external_url: Option<String>,
    pub instagram_id: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub monitoring: bool,
    pub proxy_id: Option<i64>,
    pub proxy_tag_id: Option<i64>,
    pub disabled: bool,
    /// How many levels of discovered accounts get monitored automatically
    pub accounts_monitoring_level: i64,
    /// Tags applied to discovered accounts
    pub accounts_default_tags: Option<String>,
    pub is_valid: bool,
    pub invalidation_type_id: Option<i64>,
    pub invalidation_count: i64,
    /// Stats are not refreshed before this moment
    pub update_stats_after: Option<DateTime<Utc>>,
}

impl Account {
    /// Name for lists: `name` when non-empty, otherwise `@username`
    pub fn display_name(&self) -> Cow<'_, str> {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => Cow::Borrowed(name),
            _ => Cow::Owned(self.username_prefixed()),
        }
    }

    /// Username with the `@` prefix
    pub fn username_prefixed(&self) -> String {
        format!("@{}", self.username)
    }

    /// Writable attributes of this record, for updates
    pub fn to_draft(&self) -> AccountDraft {
        AccountDraft {
            name: self.name.clone(),
            username: self.username.clone(),
            profile_pic_url: self.profile_pic_url.clone(),
            full_name: self.full_name.clone(),
            biography: self.biography.clone(),
            external_url: self.external_url.clone(),
            instagram_id: self.instagram_id.clone(),
            monitoring: self.monitoring,
            proxy_id: self.proxy_id,
            proxy_tag_id: self.proxy_tag_id,
            disabled: self.disabled,
            accounts_monitoring_level: self.accounts_monitoring_level,
            accounts_default_tags: self.accounts_default_tags.clone(),
            is_valid: self.is_valid,
            invalidation_type_id: self.invalidation_type_id,
            invalidation_count: self.invalidation_count,
            update_stats_after: self.update_stats_after,
        }
    }
}

/// Caller-writable account attributes
///
/// `id`, `uid` and the timestamps are owned by the persist operations
/// and cannot be set through a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDraft {
    pub name: Option<String>,
    pub username: String,
    pub profile_pic_url: Option<String>,
    pub full_name: Option<String>,
    pub biography: Option<String>,
    pub external_url: Option<String>,
    pub instagram_id: Option<String>,
    pub monitoring: bool,
    pub proxy_id: Option<i64>,
    pub proxy_tag_id: Option<i64>,
    pub disabled: bool,
    pub accounts_monitoring_level: i64,
    pub accounts_default_tags: Option<String>,
    pub is_valid: bool,
    pub invalidation_type_id: Option<i64>,
    pub invalidation_count: i64,
    pub update_stats_after: Option<DateTime<Utc>>,
}

impl AccountDraft {
    /// Draft with column defaults: valid, not monitored, level 0
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            name: None,
            username: username.into(),
            profile_pic_url: None,
            full_name: None,
            biography: None,
            external_url: None,
            instagram_id: None,
            monitoring: false,
            proxy_id: None,
            proxy_tag_id: None,
            disabled: false,
            accounts_monitoring_level: 0,
            accounts_default_tags: None,
            is_valid: true,
            invalidation_type_id: None,
            invalidation_count: 0,
            update_stats_after: None,
        }
    }

    /// Bounded string attribute by field, `None` for other fields
    pub(crate) fn bounded_string(&self, field: super::AccountField) -> Option<&str> {
        use super::AccountField as F;

        match field {
            F::Name => self.name.as_deref(),
            F::Username => Some(self.username.as_str()),
            F::ProfilePicUrl => self.profile_pic_url.as_deref(),
            F::FullName => self.full_name.as_deref(),
            F::Biography => self.biography.as_deref(),
            F::ExternalUrl => self.external_url.as_deref(),
            F::InstagramId => self.instagram_id.as_deref(),
            _ => None,
        }
    }
}

// =============================================================================
// Proxy
// =============================================================================

/// Network proxy used when fetching an account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Proxy {
    pub id: i64,
    pub ip: String,
    pub port: i64,
    pub username: Option<String>,
    pub password: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProxy {
    pub ip: String,
    pub port: i64,
    pub username: Option<String>,
    pub password: Option<String>,
}

// =============================================================================
// Tags
// =============================================================================

/// Tag, used both for labelling accounts and for proxy selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Join row between an account and a tag
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccountTag {
    pub account_id: i64,
    pub tag_id: i64,
    /// User that attached the tag, if any
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Account collaborators
// =============================================================================

/// Reason an account was marked invalid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccountInvalidationType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccountNote {
    pub id: i64,
    pub account_id: i64,
    pub user_id: Option<i64>,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Snapshot of an account's public counters
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccountStats {
    pub id: i64,
    pub account_id: i64,
    pub followed_by: i64,
    pub follows: i64,
    pub media: i64,
    /// Engagement rate
    pub er: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewAccountStats {
    pub followed_by: i64,
    pub follows: i64,
    pub media: i64,
    pub er: Option<f64>,
}

// =============================================================================
// Media
// =============================================================================

/// A post published by an account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Media {
    pub id: i64,
    pub account_id: i64,
    pub shortcode: String,
    pub is_video: bool,
    pub caption: Option<String>,
    pub taken_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMedia {
    pub shortcode: String,
    pub is_video: bool,
    pub caption: Option<String>,
    pub taken_at: Option<DateTime<Utc>>,
}

/// Join row between a media item and an account it mentions
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MediaAccount {
    pub media_id: i64,
    pub account_id: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(username: &str, name: Option<&str>) -> Account {
        let now = Utc::now();
        Account {
            id: 1,
            uid: Uid::new().0,
            name: name.map(str::to_string),
            username: username.to_string(),
            profile_pic_url: None,
            full_name: None,
            biography: None,
            external_url: None,
            instagram_id: None,
            updated_at: now,
            created_at: now,
            monitoring: false,
            proxy_id: None,
            proxy_tag_id: None,
            disabled: false,
            accounts_monitoring_level: 0,
            accounts_default_tags: None,
            is_valid: true,
            invalidation_type_id: None,
            invalidation_count: 0,
            update_stats_after: None,
        }
    }

    #[test]
    fn display_name_falls_back_to_prefixed_username() {
        assert_eq!(account("alice", Some("")).display_name(), "@alice");
        assert_eq!(account("alice", None).display_name(), "@alice");
    }

    #[test]
    fn display_name_prefers_name() {
        assert_eq!(account("bob", Some("Bob Smith")).display_name(), "Bob Smith");
    }

    #[test]
    fn username_prefixed_ignores_name() {
        assert_eq!(account("bob", Some("Bob Smith")).username_prefixed(), "@bob");
        assert_eq!(account("alice", None).username_prefixed(), "@alice");
    }

    #[test]
    fn draft_round_trip_keeps_writable_attributes() {
        let mut record = account("carol", Some("Carol"));
        record.proxy_id = Some(4);
        record.accounts_monitoring_level = 2;

        let draft = record.to_draft();
        assert_eq!(draft.username, "carol");
        assert_eq!(draft.proxy_id, Some(4));
        assert_eq!(draft.accounts_monitoring_level, 2);
    }

    #[test]
    fn uids_are_ulids() {
        let uid = Uid::new();
        assert_eq!(uid.0.len(), 26);
        assert_ne!(uid, Uid::new());
    }
}
