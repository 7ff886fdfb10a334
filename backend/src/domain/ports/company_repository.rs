//! Port abstraction for company persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Company, CompanyDraft, CompanyId, Isin};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by company repository adapters.
    pub enum CompanyPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "company repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "company repository query failed: {message}",
        /// The unique index on `isin` rejected the write.
        DuplicateIsin { isin: String } => "company with isin {isin} already exists",
    }
}

/// Storage for [`Company`] records.
///
/// Each call is expected to be transactional on its own. Adapters perform no
/// business validation beyond what the physical schema enforces.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Fetch a company by its surrogate identifier.
    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, CompanyPersistenceError>;

    /// Fetch a company by exact ISIN match.
    async fn find_by_isin(&self, isin: &Isin) -> Result<Option<Company>, CompanyPersistenceError>;

    /// Every stored company ordered by id.
    async fn list_all(&self) -> Result<Vec<Company>, CompanyPersistenceError>;

    /// Insert a new record; storage assigns the identifier.
    async fn create(
        &self,
        draft: &CompanyDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Company, CompanyPersistenceError>;

    /// Overwrite the mutable columns of an existing record.
    ///
    /// Returns `None` when no row matched `company.id`.
    async fn update(&self, company: &Company) -> Result<Option<Company>, CompanyPersistenceError>;

    async fn exists_by_isin(&self, isin: &Isin) -> Result<bool, CompanyPersistenceError>;

    /// Remove a record, reporting whether a row was deleted.
    async fn delete(&self, id: CompanyId) -> Result<bool, CompanyPersistenceError>;
}
