//! Loading submitted account attributes
//!
//! Submitted values arrive untyped (JSON from a form or an importer).
//! Type rules are applied here; the remaining rules run in
//! [`super::validation`] and on the store.

use serde_json::{Map, Value};

use super::fields::AccountField;
use super::models::AccountDraft;
use super::validation::ValidationErrors;

/// Submitted attributes for an account
#[derive(Debug, Clone, Default)]
pub struct AccountForm {
    attributes: Map<String, Value>,
}

impl AccountForm {
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    /// Wrap a JSON object; any other value yields an empty form
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(attributes) => Self { attributes },
            _ => Self::default(),
        }
    }

    /// Assign the submitted attributes on a fresh draft
    pub fn parse(&self) -> (AccountDraft, ValidationErrors) {
        let mut draft = AccountDraft::new(String::new());
        let errors = self.apply(&mut draft);
        (draft, errors)
    }

    /// Assign the submitted attributes on top of `draft`
    ///
    /// Attributes that fail their type rule leave the draft value untouched.
    /// `id`, `uid`, the timestamps and unknown keys are ignored.
    pub fn apply(&self, draft: &mut AccountDraft) -> ValidationErrors {
        use AccountField as F;

        let mut errors = ValidationErrors::default();

        for (key, value) in &self.attributes {
            let Some(field) = AccountField::from_column(key) else {
                tracing::trace!(attribute = %key, "Ignoring unknown attribute");
                continue;
            };

            match field {
                F::Id | F::Uid | F::CreatedAt | F::UpdatedAt => {
                    tracing::trace!(attribute = %key, "Ignoring unassignable attribute");
                }
                F::Username => {
                    if let Some(v) = string(field, value, &mut errors) {
                        draft.username = v.unwrap_or_default();
                    }
                }
                F::Name => assign(&mut draft.name, string(field, value, &mut errors)),
                F::ProfilePicUrl => {
                    assign(&mut draft.profile_pic_url, string(field, value, &mut errors))
                }
                F::FullName => assign(&mut draft.full_name, string(field, value, &mut errors)),
                F::Biography => assign(&mut draft.biography, string(field, value, &mut errors)),
                F::ExternalUrl => {
                    assign(&mut draft.external_url, string(field, value, &mut errors))
                }
                F::InstagramId => {
                    assign(&mut draft.instagram_id, string(field, value, &mut errors))
                }
                F::AccountsDefaultTags => assign(
                    &mut draft.accounts_default_tags,
                    string(field, value, &mut errors),
                ),
                F::ProxyId => assign(&mut draft.proxy_id, integer(field, value, &mut errors)),
                F::ProxyTagId => {
                    assign(&mut draft.proxy_tag_id, integer(field, value, &mut errors))
                }
                F::InvalidationTypeId => assign(
                    &mut draft.invalidation_type_id,
                    integer(field, value, &mut errors),
                ),
                F::AccountsMonitoringLevel => {
                    if let Some(v) = integer(field, value, &mut errors) {
                        draft.accounts_monitoring_level = v.unwrap_or(0);
                    }
                }
                F::InvalidationCount => {
                    if let Some(v) = integer(field, value, &mut errors) {
                        draft.invalidation_count = v.unwrap_or(0);
                    }
                }
                F::Monitoring => {
                    if let Some(v) = boolean(field, value, &mut errors) {
                        draft.monitoring = v;
                    }
                }
                F::Disabled => {
                    if let Some(v) = boolean(field, value, &mut errors) {
                        draft.disabled = v;
                    }
                }
                F::IsValid => {
                    if let Some(v) = boolean(field, value, &mut errors) {
                        draft.is_valid = v;
                    }
                }
                F::UpdateStatsAfter => match value {
                    Value::Null => draft.update_stats_after = None,
                    Value::String(raw) => match chrono::DateTime::parse_from_rfc3339(raw) {
                        Ok(parsed) => {
                            draft.update_stats_after = Some(parsed.with_timezone(&chrono::Utc))
                        }
                        Err(_) => errors.add(
                            field,
                            format!("The format of {} is invalid.", field.label()),
                        ),
                    },
                    _ => errors.add(
                        field,
                        format!("The format of {} is invalid.", field.label()),
                    ),
                },
            }
        }

        errors
    }
}

/// Store a successfully parsed optional value
fn assign<T>(slot: &mut Option<T>, parsed: Option<Option<T>>) {
    if let Some(value) = parsed {
        *slot = value;
    }
}

/// `Some(None)` for null, `Some(Some(_))` for a string, `None` on type error
fn string(field: AccountField, value: &Value, errors: &mut ValidationErrors) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        Value::String(s) => Some(Some(s.clone())),
        _ => {
            errors.add(field, format!("{} must be a string.", field.label()));
            None
        }
    }
}

fn integer(field: AccountField, value: &Value, errors: &mut ValidationErrors) -> Option<Option<i64>> {
    let parsed = match value {
        Value::Null => return Some(None),
        Value::Number(n) => n.as_i64(),
        Value::String(s) if s.trim().is_empty() => return Some(None),
        Value::String(s) => parse_integer(s),
        _ => None,
    };

    match parsed {
        Some(v) => Some(Some(v)),
        None => {
            errors.add(field, format!("{} must be an integer.", field.label()));
            None
        }
    }
}

/// Optional sign and digits, surrounding whitespace allowed
fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix('+')
        .or_else(|| trimmed.strip_prefix('-'))
        .unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.trim_start_matches('+').parse().ok()
}

fn boolean(field: AccountField, value: &Value, errors: &mut ValidationErrors) -> Option<bool> {
    let parsed = match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    };

    if parsed.is_none() {
        errors.add(
            field,
            format!("{} must be either true or false.", field.label()),
        );
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> (AccountDraft, ValidationErrors) {
        AccountForm::from_value(value).parse()
    }

    #[test]
    fn typed_values_are_assigned() {
        let (draft, errors) = parse(json!({
            "username": "alice",
            "name": "Alice",
            "proxy_id": 3,
            "proxy_tag_id": " 7 ",
            "accounts_monitoring_level": "2",
            "monitoring": "1",
            "disabled": false,
            "is_valid": 0,
            "accounts_default_tags": "travel, food",
        }));

        assert!(errors.is_empty(), "{errors}");
        assert_eq!(draft.username, "alice");
        assert_eq!(draft.name.as_deref(), Some("Alice"));
        assert_eq!(draft.proxy_id, Some(3));
        assert_eq!(draft.proxy_tag_id, Some(7));
        assert_eq!(draft.accounts_monitoring_level, 2);
        assert!(draft.monitoring);
        assert!(!draft.disabled);
        assert!(!draft.is_valid);
        assert_eq!(draft.accounts_default_tags.as_deref(), Some("travel, food"));
    }

    #[test]
    fn non_integers_are_rejected() {
        let (draft, errors) = parse(json!({
            "username": "alice",
            "proxy_id": "abc",
            "proxy_tag_id": 1.5,
            "accounts_monitoring_level": "-1",
        }));

        assert_eq!(errors.first(AccountField::ProxyId), Some("Proxy ID must be an integer."));
        assert_eq!(
            errors.first(AccountField::ProxyTagId),
            Some("Proxy Tag ID must be an integer.")
        );
        assert!(!errors.has(AccountField::AccountsMonitoringLevel));
        assert_eq!(draft.accounts_monitoring_level, -1);
        assert_eq!(draft.proxy_id, None);
    }

    #[test]
    fn booleans_outside_true_false_are_rejected() {
        let (_, errors) = parse(json!({ "username": "alice", "monitoring": "yes", "is_valid": 2 }));
        assert_eq!(
            errors.first(AccountField::Monitoring),
            Some("Monitoring must be either true or false.")
        );
        assert!(errors.has(AccountField::IsValid));
    }

    #[test]
    fn system_managed_attributes_are_ignored() {
        let (draft, errors) = parse(json!({
            "id": 99,
            "uid": "forged",
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2020-01-01T00:00:00Z",
            "username": "alice",
            "occurs": 4,
        }));

        assert!(errors.is_empty());
        assert_eq!(draft, AccountDraft::new("alice"));
    }

    #[test]
    fn null_clears_optional_attributes() {
        let mut draft = AccountDraft::new("alice");
        draft.proxy_id = Some(5);
        draft.name = Some("Alice".to_string());

        let errors = AccountForm::from_value(json!({ "proxy_id": null, "name": null }))
            .apply(&mut draft);

        assert!(errors.is_empty());
        assert_eq!(draft.proxy_id, None);
        assert_eq!(draft.name, None);
    }

    #[test]
    fn non_string_username_is_a_type_error() {
        let (draft, errors) = parse(json!({ "username": 12 }));
        assert_eq!(
            errors.first(AccountField::Username),
            Some("Username must be a string.")
        );
        assert!(draft.username.is_empty());
    }
}
