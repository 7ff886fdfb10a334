//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bearer;
pub mod companies;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
