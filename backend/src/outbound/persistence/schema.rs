//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Listed companies keyed by a serial id; `isin` carries a unique index
    /// (`companies_isin_key`).
    companies (id) {
        id -> Int4,
        #[max_length = 255]
        name -> Varchar,
        #[max_length = 50]
        stock_ticker -> Varchar,
        #[max_length = 100]
        exchange -> Varchar,
        #[max_length = 12]
        isin -> Varchar,
        #[max_length = 255]
        website -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// User accounts. `username` and `email` are unique
    /// (`users_username_key`, `users_email_key`).
    users (id) {
        id -> Uuid,
        #[max_length = 50]
        username -> Varchar,
        #[max_length = 100]
        email -> Varchar,
        /// PHC-encoded Argon2id hash.
        password_hash -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(companies, users);
