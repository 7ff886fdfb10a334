//! Company registry service.
//!
//! Owns the ISIN uniqueness rule and timestamp bookkeeping for company
//! writes. The service-level existence check produces a descriptive conflict
//! in the common case; the storage unique index is the final authority and its
//! violation maps to the same error.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{CompanyPersistenceError, CompanyRegistry, CompanyRepository};
use crate::domain::{Company, CompanyDraft, CompanyId, Error, Isin};

/// Conflict raised when an ISIN is already owned by another company.
///
/// # Examples
/// ```
/// use company_api::domain::{ErrorCode, Isin, isin_conflict};
///
/// let isin = Isin::new("US0378331005").unwrap();
/// let err = isin_conflict(&isin);
/// assert_eq!(err.code(), ErrorCode::Conflict);
/// assert_eq!(err.message(), "A company with ISIN US0378331005 already exists.");
/// ```
pub fn isin_conflict(isin: &impl std::fmt::Display) -> Error {
    Error::conflict(format!("A company with ISIN {isin} already exists."))
}

/// Company registry implementing the [`CompanyRegistry`] driving port.
#[derive(Clone)]
pub struct CompanyRegistryService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CompanyRegistryService<R> {
    /// Create a registry over `repo`, stamping writes with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> CompanyRegistryService<R>
where
    R: CompanyRepository,
{
    fn map_persistence_error(error: CompanyPersistenceError) -> Error {
        match error {
            CompanyPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("company repository unavailable: {message}"))
            }
            CompanyPersistenceError::Query { message } => {
                Error::internal(format!("company repository error: {message}"))
            }
            CompanyPersistenceError::DuplicateIsin { isin } => {
                warn!(%isin, "isin unique index rejected a write that passed the pre-check");
                isin_conflict(&isin)
            }
        }
    }

    /// Clock reading at the microsecond precision storage keeps.
    fn stored_now(&self) -> DateTime<Utc> {
        self.clock.utc().trunc_subsecs(6)
    }

    /// Clock reading that is strictly later than `previous` once stored.
    fn next_timestamp(&self, previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = self.stored_now();
        if now > previous {
            now
        } else {
            previous + TimeDelta::microseconds(1)
        }
    }

    async fn ensure_isin_free(&self, isin: &Isin) -> Result<(), Error> {
        let taken = self
            .repo
            .exists_by_isin(isin)
            .await
            .map_err(Self::map_persistence_error)?;
        if taken {
            debug!(%isin, "rejecting write for taken isin");
            return Err(isin_conflict(isin));
        }
        Ok(())
    }
}

#[async_trait]
impl<R> CompanyRegistry for CompanyRegistryService<R>
where
    R: CompanyRepository,
{
    async fn list_all(&self) -> Result<Vec<Company>, Error> {
        self.repo
            .list_all()
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn get_by_id(&self, id: CompanyId) -> Result<Option<Company>, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn get_by_isin(&self, isin: &Isin) -> Result<Option<Company>, Error> {
        self.repo
            .find_by_isin(isin)
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn create(&self, draft: &CompanyDraft) -> Result<Company, Error> {
        self.ensure_isin_free(draft.isin()).await?;
        let now = self.stored_now();
        self.repo
            .create(draft, now)
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn update(&self, id: CompanyId, draft: &CompanyDraft) -> Result<Option<Company>, Error> {
        let Some(existing) = self
            .repo
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)?
        else {
            return Ok(None);
        };

        if existing.isin != *draft.isin() {
            self.ensure_isin_free(draft.isin()).await?;
        }

        let revised = existing.revised(draft, self.next_timestamp(existing.updated_at));
        self.repo
            .update(&revised)
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn delete(&self, id: CompanyId) -> Result<bool, Error> {
        let exists = self
            .repo
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)?
            .is_some();
        if !exists {
            return Ok(false);
        }
        self.repo
            .delete(id)
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[cfg(test)]
#[path = "company_registry_tests.rs"]
mod tests;
