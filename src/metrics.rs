//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use std::time::Duration;

use lazy_static::lazy_static;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // Database Metrics
    pub static ref DB_QUERIES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("socialwatch_db_queries_total", "Total number of database queries"),
        &["operation", "table"]
    ).expect("metric can be created");
    pub static ref DB_QUERY_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "socialwatch_db_query_duration_seconds",
            "Database query duration in seconds"
        ).buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        &["operation", "table"]
    ).expect("metric can be created");

    // Validation Metrics
    pub static ref VALIDATION_FAILURES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("socialwatch_validation_failures_total", "Total number of rejected attributes"),
        &["field"]
    ).expect("metric can be created");

    // Error Metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("socialwatch_errors_total", "Total number of errors"),
        &["error_type"]
    ).expect("metric can be created");
}

/// Initialize metrics registry.
pub fn init_metrics() {
    REGISTRY
        .register(Box::new(DB_QUERIES_TOTAL.clone()))
        .expect("DB_QUERIES_TOTAL can be registered");
    REGISTRY
        .register(Box::new(DB_QUERY_DURATION_SECONDS.clone()))
        .expect("DB_QUERY_DURATION_SECONDS can be registered");
    REGISTRY
        .register(Box::new(VALIDATION_FAILURES_TOTAL.clone()))
        .expect("VALIDATION_FAILURES_TOTAL can be registered");
    REGISTRY
        .register(Box::new(ERRORS_TOTAL.clone()))
        .expect("ERRORS_TOTAL can be registered");

    tracing::info!("Metrics registry initialized");
}

/// Record one executed query
pub fn observe_db_query(operation: &str, table: &str, elapsed: Duration) {
    DB_QUERIES_TOTAL
        .with_label_values(&[operation, table])
        .inc();
    DB_QUERY_DURATION_SECONDS
        .with_label_values(&[operation, table])
        .observe(elapsed.as_secs_f64());
}

/// Record every rejected attribute of a validation failure
pub fn observe_validation_failure(errors: &crate::data::ValidationErrors) {
    for field in errors.fields() {
        VALIDATION_FAILURES_TOTAL
            .with_label_values(&[field.column()])
            .inc();
    }
}

pub fn observe_error(error: &crate::error::AppError) {
    ERRORS_TOTAL.with_label_values(&[error.error_type()]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AccountField, ValidationErrors};

    #[test]
    fn validation_failures_are_counted_per_field() {
        let counter = VALIDATION_FAILURES_TOTAL.with_label_values(&["update_stats_after"]);
        let before = counter.get();

        let mut errors = ValidationErrors::default();
        errors.add(AccountField::UpdateStatsAfter, "The format of Update Stats After is invalid.");
        errors.add(AccountField::UpdateStatsAfter, "Update Stats After is too far away.");
        observe_validation_failure(&errors);

        assert_eq!(counter.get(), before + 1);
    }
}
