//! Relations of an account
//!
//! Every accessor returns a [`RecordQuery`]; nothing is loaded until the
//! caller executes it. A relation whose linking column is NULL, or whose
//! target row is gone, yields nothing rather than an error.

use super::models::*;
use super::query::RecordQuery;

impl Account {
    /// Proxy assigned to this account
    pub fn proxy(&self) -> RecordQuery<Proxy> {
        RecordQuery::keyed(
            "proxy",
            "SELECT proxy.* FROM proxy",
            ("proxy.id = ", ""),
            self.proxy_id,
        )
    }

    /// Tag used to pick a proxy for this account
    pub fn proxy_tag(&self) -> RecordQuery<Tag> {
        RecordQuery::keyed(
            "tag",
            "SELECT tag.* FROM tag",
            ("tag.id = ", ""),
            self.proxy_tag_id,
        )
    }

    pub fn invalidation_type(&self) -> RecordQuery<AccountInvalidationType> {
        RecordQuery::keyed(
            "account_invalidation_type",
            "SELECT account_invalidation_type.* FROM account_invalidation_type",
            ("account_invalidation_type.id = ", ""),
            self.invalidation_type_id,
        )
    }

    pub fn account_notes(&self) -> RecordQuery<AccountNote> {
        RecordQuery::keyed(
            "account_note",
            "SELECT account_note.* FROM account_note",
            ("account_note.account_id = ", ""),
            Some(self.id),
        )
    }

    pub fn account_stats(&self) -> RecordQuery<AccountStats> {
        RecordQuery::keyed(
            "account_stats",
            "SELECT account_stats.* FROM account_stats",
            ("account_stats.account_id = ", ""),
            Some(self.id),
        )
    }

    /// Most recent stats row (highest id)
    pub fn last_account_stats(&self) -> RecordQuery<AccountStats> {
        self.account_stats()
            .order_by("account_stats.id DESC")
            .limit(1)
    }

    pub fn account_tags(&self) -> RecordQuery<AccountTag> {
        RecordQuery::keyed(
            "account_tag",
            "SELECT account_tag.* FROM account_tag",
            ("account_tag.account_id = ", ""),
            Some(self.id),
        )
    }

    /// Tags attached through `account_tag`
    pub fn tags(&self) -> RecordQuery<Tag> {
        RecordQuery::keyed(
            "tag",
            "SELECT tag.* FROM tag",
            (
                "tag.id IN (SELECT account_tag.tag_id FROM account_tag \
                 WHERE account_tag.account_id = ",
                ")",
            ),
            Some(self.id),
        )
    }

    pub fn media(&self) -> RecordQuery<Media> {
        RecordQuery::keyed(
            "media",
            "SELECT media.* FROM media",
            ("media.account_id = ", ""),
            Some(self.id),
        )
    }

    /// `media_account` rows of this account's own media
    pub fn media_media_accounts(&self) -> RecordQuery<MediaAccount> {
        RecordQuery::keyed(
            "media_account",
            "SELECT media_account.* FROM media_account",
            (
                "media_account.media_id IN (SELECT media.id FROM media \
                 WHERE media.account_id = ",
                ")",
            ),
            Some(self.id),
        )
    }

    /// Accounts linked to this account's media through `media_account`
    pub fn accounts(&self) -> RecordQuery<Account> {
        RecordQuery::keyed(
            "account",
            "SELECT account.* FROM account",
            (
                "account.id IN (SELECT media_account.account_id FROM media_account \
                 WHERE media_account.media_id IN (SELECT media.id FROM media \
                 WHERE media.account_id = ",
                "))",
            ),
            Some(self.id),
        )
    }

    /// `media_account` rows pointing at this account
    pub fn media_accounts(&self) -> RecordQuery<MediaAccount> {
        RecordQuery::keyed(
            "media_account",
            "SELECT media_account.* FROM media_account",
            ("media_account.account_id = ", ""),
            Some(self.id),
        )
    }

    /// Tags attached to at least one account, by slug
    pub fn used_tags() -> RecordQuery<Tag> {
        RecordQuery::unkeyed(
            "tag",
            "SELECT DISTINCT tag.* FROM tag \
             INNER JOIN account_tag ON tag.id = account_tag.tag_id",
            None,
        )
        .order_by("tag.slug ASC")
    }

    /// Accounts with monitoring on that are not disabled
    pub fn monitored() -> RecordQuery<Account> {
        RecordQuery::unkeyed(
            "account",
            "SELECT account.* FROM account",
            Some("account.monitoring = 1 AND account.disabled = 0"),
        )
        .order_by("account.id ASC")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        let now = chrono::Utc::now();
        Account {
            id: 7,
            uid: Uid::new().0,
            name: None,
            username: "alice".to_string(),
            profile_pic_url: None,
            full_name: None,
            biography: None,
            external_url: None,
            instagram_id: None,
            updated_at: now,
            created_at: now,
            monitoring: true,
            proxy_id: None,
            proxy_tag_id: Some(2),
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
    fn last_stats_orders_by_descending_id() {
        assert!(
            account()
                .last_account_stats()
                .sql()
                .ends_with("ORDER BY account_stats.id DESC LIMIT ?")
        );
    }

    #[test]
    fn accounts_follow_the_media_join_chain() {
        let sql = account().accounts().sql();
        assert_eq!(
            sql,
            "SELECT account.* FROM account WHERE account.id IN \
             (SELECT media_account.account_id FROM media_account \
             WHERE media_account.media_id IN (SELECT media.id FROM media \
             WHERE media.account_id = ?))"
        );
    }

    #[test]
    fn used_tags_is_distinct_and_sorted_by_slug() {
        let sql = Account::used_tags().sql();
        assert!(sql.starts_with("SELECT DISTINCT tag.* FROM tag"));
        assert!(sql.ends_with("ORDER BY tag.slug ASC"));
    }
}
