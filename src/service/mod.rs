//! Service layer
//!
//! Contains business logic separated from storage.
//! Services orchestrate database reads and writes for callers.

mod account;

pub use account::AccountService;
