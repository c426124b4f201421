//! Data layer module
//!
//! Handles all data persistence:
//! - SQLite database operations
//! - Account attributes, validation and form loading
//! - Lazy relation queries

mod database;
mod fields;
mod form;
mod models;
mod query;
mod relations;
pub mod validation;

pub use database::Database;
pub use fields::{AccountField, MAX_STRING_LENGTH};
pub use form::AccountForm;
pub use models::*;
pub use query::RecordQuery;
pub use validation::ValidationErrors;
