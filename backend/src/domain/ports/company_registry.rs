//! Driving port for company lifecycle operations.
//!
//! Inbound adapters call [`CompanyRegistry`] with validated drafts; the
//! implementation decides whether a write is legal.

use async_trait::async_trait;

use crate::domain::{Company, CompanyDraft, CompanyId, Error, Isin};

/// Company use-cases consumed by inbound adapters.
///
/// Absence is reported through `Option`/`bool` rather than as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRegistry: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Company>, Error>;

    async fn get_by_id(&self, id: CompanyId) -> Result<Option<Company>, Error>;

    async fn get_by_isin(&self, isin: &Isin) -> Result<Option<Company>, Error>;

    /// Create a company, failing with a conflict if the ISIN is taken.
    async fn create(&self, draft: &CompanyDraft) -> Result<Company, Error>;

    /// Replace the mutable fields of an existing company.
    async fn update(&self, id: CompanyId, draft: &CompanyDraft) -> Result<Option<Company>, Error>;

    async fn delete(&self, id: CompanyId) -> Result<bool, Error>;
}
