//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Repositories convert them into domain
//! types, re-validating values read back from storage.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{companies, users};

// ---------------------------------------------------------------------------
// Company models
// ---------------------------------------------------------------------------

/// Row struct for reading from the companies table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanyRow {
    pub id: i32,
    pub name: String,
    pub stock_ticker: String,
    pub exchange: String,
    pub isin: String,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating company records; the id is assigned by
/// the serial column.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companies)]
pub(crate) struct NewCompanyRow<'a> {
    pub name: &'a str,
    pub stock_ticker: &'a str,
    pub exchange: &'a str,
    pub isin: &'a str,
    pub website: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for overwriting a company's mutable columns.
///
/// `created_at` is not part of the changeset.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = companies)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CompanyUpdate<'a> {
    pub name: &'a str,
    pub stock_ticker: &'a str,
    pub exchange: &'a str,
    pub isin: &'a str,
    pub website: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub updated_at: DateTime<Utc>,
}
