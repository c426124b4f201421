//! Account attributes
//!
//! One variant per column of the `account` table, with the human-readable
//! label and optional hint shown next to the attribute in forms.

use serde::Serialize;

/// Maximum length (in characters) of bounded string attributes
pub const MAX_STRING_LENGTH: usize = 255;

/// An attribute of the `account` table
///
/// Variants are declared in column order; `Ord` follows that order so
/// validation errors are reported in a stable sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountField {
    Id,
    Uid,
    Name,
    Username,
    ProfilePicUrl,
    FullName,
    Biography,
    ExternalUrl,
    InstagramId,
    UpdatedAt,
    CreatedAt,
    Monitoring,
    ProxyId,
    ProxyTagId,
    Disabled,
    AccountsMonitoringLevel,
    AccountsDefaultTags,
    IsValid,
    InvalidationTypeId,
    InvalidationCount,
    UpdateStatsAfter,
}

impl AccountField {
    pub const ALL: [AccountField; 21] = [
        Self::Id,
        Self::Uid,
        Self::Name,
        Self::Username,
        Self::ProfilePicUrl,
        Self::FullName,
        Self::Biography,
        Self::ExternalUrl,
        Self::InstagramId,
        Self::UpdatedAt,
        Self::CreatedAt,
        Self::Monitoring,
        Self::ProxyId,
        Self::ProxyTagId,
        Self::Disabled,
        Self::AccountsMonitoringLevel,
        Self::AccountsDefaultTags,
        Self::IsValid,
        Self::InvalidationTypeId,
        Self::InvalidationCount,
        Self::UpdateStatsAfter,
    ];

    /// String attributes bounded to [`MAX_STRING_LENGTH`] characters
    pub const BOUNDED_STRINGS: [AccountField; 7] = [
        Self::Name,
        Self::Username,
        Self::ProfilePicUrl,
        Self::FullName,
        Self::Biography,
        Self::ExternalUrl,
        Self::InstagramId,
    ];

    /// Column name in the `account` table
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Uid => "uid",
            Self::Name => "name",
            Self::Username => "username",
            Self::ProfilePicUrl => "profile_pic_url",
            Self::FullName => "full_name",
            Self::Biography => "biography",
            Self::ExternalUrl => "external_url",
            Self::InstagramId => "instagram_id",
            Self::UpdatedAt => "updated_at",
            Self::CreatedAt => "created_at",
            Self::Monitoring => "monitoring",
            Self::ProxyId => "proxy_id",
            Self::ProxyTagId => "proxy_tag_id",
            Self::Disabled => "disabled",
            Self::AccountsMonitoringLevel => "accounts_monitoring_level",
            Self::AccountsDefaultTags => "accounts_default_tags",
            Self::IsValid => "is_valid",
            Self::InvalidationTypeId => "invalidation_type_id",
            Self::InvalidationCount => "invalidation_count",
            Self::UpdateStatsAfter => "update_stats_after",
        }
    }

    /// Look up an attribute by column name
    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.column() == column)
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Uid => "Uid",
            Self::Name => "Name",
            Self::Username => "Username",
            Self::ProfilePicUrl => "Profile Pic Url",
            Self::FullName => "Full Name",
            Self::Biography => "Biography",
            Self::ExternalUrl => "External Url",
            Self::InstagramId => "Instagram ID",
            Self::UpdatedAt => "Updated At",
            Self::CreatedAt => "Created At",
            Self::Monitoring => "Monitoring",
            Self::ProxyId => "Proxy ID",
            Self::ProxyTagId => "Proxy Tag ID",
            Self::Disabled => "Disabled",
            Self::AccountsMonitoringLevel => "Accounts Monitoring Level",
            Self::AccountsDefaultTags => "Accounts Default Tags",
            Self::IsValid => "Is Valid",
            Self::InvalidationTypeId => "Invalidation Type ID",
            Self::InvalidationCount => "Invalidation Count",
            Self::UpdateStatsAfter => "Update Stats After",
        }
    }

    /// Usage hint shown next to the input, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Name => Some(
                "The name displayed in the lists, if empty, the 'username' will be used.",
            ),
            Self::AccountsMonitoringLevel => {
                Some("Automatically monitors discovered accounts. Be careful.")
            }
            Self::AccountsDefaultTags => Some(
                "Automatically tag discovered accounts. If not set, parent tags will be used.",
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_round_trip_through_lookup() {
        for field in AccountField::ALL {
            assert_eq!(AccountField::from_column(field.column()), Some(field));
        }
        assert_eq!(AccountField::from_column("occurs"), None);
    }

    #[test]
    fn id_suffixes_are_upper_cased_in_labels() {
        assert_eq!(AccountField::ProxyId.label(), "Proxy ID");
        assert_eq!(AccountField::ProxyTagId.label(), "Proxy Tag ID");
        assert_eq!(AccountField::InstagramId.label(), "Instagram ID");
        assert_eq!(AccountField::ProfilePicUrl.label(), "Profile Pic Url");
    }

    #[test]
    fn only_three_attributes_carry_hints() {
        let hinted: Vec<_> = AccountField::ALL
            .into_iter()
            .filter(|field| field.hint().is_some())
            .collect();
        assert_eq!(
            hinted,
            vec![
                AccountField::Name,
                AccountField::AccountsMonitoringLevel,
                AccountField::AccountsDefaultTags,
            ]
        );
    }
}
