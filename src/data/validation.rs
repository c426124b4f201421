//! Account validation
//!
//! Rules run in declaration order. A rule skips any field that already
//! carries an error, so each field reports its first failure only.
//! Rules that need the store (uniqueness, references) live in
//! `Database` and run after the ones here.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::fields::{AccountField, MAX_STRING_LENGTH};
use super::models::AccountDraft;

/// Field errors collected during validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<AccountField, Vec<String>>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: AccountField, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn has(&self, field: AccountField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fields with at least one error, in column order
    pub fn fields(&self) -> Vec<AccountField> {
        self.errors.keys().copied().collect()
    }

    pub fn messages(&self, field: AccountField) -> &[String] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, field: AccountField) -> Option<&str> {
        self.messages(field).first().map(String::as_str)
    }

    /// Append every error of `other`
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
    }

    /// `Ok(())` when empty, the errors otherwise
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field.column(), message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A validation rule over the attributes of a draft
pub type FieldRule = fn(&AccountDraft, &mut ValidationErrors);

/// Rules that need no store access, in evaluation order
pub const FIELD_RULES: &[FieldRule] = &[
    username_required,
    monitoring_level_non_negative,
    strings_within_limit,
];

/// Run every rule of [`FIELD_RULES`], adding to `errors`
pub fn validate_fields(draft: &AccountDraft, errors: &mut ValidationErrors) {
    for rule in FIELD_RULES {
        rule(draft, errors);
    }
}

pub fn username_required(draft: &AccountDraft, errors: &mut ValidationErrors) {
    let field = AccountField::Username;
    if errors.has(field) {
        return;
    }
    if draft.username.trim().is_empty() {
        errors.add(field, format!("{} cannot be blank.", field.label()));
    }
}

pub fn monitoring_level_non_negative(draft: &AccountDraft, errors: &mut ValidationErrors) {
    let field = AccountField::AccountsMonitoringLevel;
    if errors.has(field) {
        return;
    }
    if draft.accounts_monitoring_level < 0 {
        errors.add(
            field,
            format!("{} must be no less than 0.", field.label()),
        );
    }
}

pub fn strings_within_limit(draft: &AccountDraft, errors: &mut ValidationErrors) {
    for field in AccountField::BOUNDED_STRINGS {
        if errors.has(field) {
            continue;
        }
        let Some(value) = draft.bounded_string(field) else {
            continue;
        };
        if value.chars().count() > MAX_STRING_LENGTH {
            errors.add(
                field,
                format!(
                    "{} should contain at most {} characters.",
                    field.label(),
                    MAX_STRING_LENGTH
                ),
            );
        }
    }
}
