//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module is their common home for embedded PostgreSQL plumbing.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{drop_table, provision_template_database, shared_cluster};

/// Render a `postgres` error including SQLSTATE, detail and hint.
///
/// `postgres::Error`'s `Display` collapses server errors to `db error`, which
/// is useless in CI logs.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db) = error.as_db_error() else {
        return error.to_string();
    };
    let extras = [("detail", db.detail()), ("hint", db.hint())]
        .into_iter()
        .filter_map(|(label, value)| value.map(|text| format!("; {label}: {text}")))
        .collect::<String>();
    format!("postgres error {}: {}{extras}", db.code().code(), db.message())
}
