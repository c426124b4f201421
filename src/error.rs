//! Error types for socialwatch
//!
//! All errors in the crate are converted to `AppError`. Store errors keep
//! the underlying `sqlx::Error` so callers can decide how to recover.

use thiserror::Error;

use crate::data::ValidationErrors;

/// Kind of store-level constraint that rejected a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    Check,
    NotNull,
}

impl ConstraintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::ForeignKey => "foreign_key",
            Self::Check => "check",
            Self::NotNull => "not_null",
        }
    }
}

/// Application-wide error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Record not found
    #[error("Resource not found")]
    NotFound,

    /// One or more attributes failed validation; nothing was written
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// The store rejected a write that bypassed validation
    #[error("Constraint violation ({kind:?}): {source}")]
    ConstraintViolation {
        kind: ConstraintKind,
        #[source]
        source: sqlx::Error,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short machine-readable name, used as a metric label
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::NotFound => "not_found",
            AppError::Validation(_) => "validation",
            AppError::ConstraintViolation { .. } => "constraint_violation",
            AppError::Database(_) => "database",
            AppError::Config(_) => "config",
            AppError::Internal(_) => "internal",
        }
    }

    /// Field errors, if this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        let kind = match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
                ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
                ErrorKind::CheckViolation => Some(ConstraintKind::Check),
                ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
                _ => None,
            },
            _ => None,
        };

        match kind {
            Some(kind) => {
                tracing::warn!(constraint = kind.as_str(), error = %err, "Store rejected write");
                AppError::ConstraintViolation { kind, source: err }
            }
            None => AppError::Database(err),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AccountField;

    #[test]
    fn row_not_found_is_a_plain_database_error() {
        let error = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, AppError::Database(sqlx::Error::RowNotFound)));
        assert_eq!(error.error_type(), "database");
    }

    #[test]
    fn validation_errors_are_exposed() {
        let mut errors = ValidationErrors::default();
        errors.add(AccountField::Username, "Username cannot be blank.");
        let error = AppError::from(errors);

        let errors = error.validation_errors().expect("validation variant");
        assert!(errors.has(AccountField::Username));
        assert!(error.to_string().contains("Username cannot be blank."));
    }
}
