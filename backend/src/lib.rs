//! Company registry backend library.
//!
//! Hexagonal layout: [`domain`] owns the types, rules and ports; [`inbound`]
//! adapts HTTP requests onto the driving ports; [`outbound`] implements the
//! driven ports against PostgreSQL, Argon2id and JWT.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
