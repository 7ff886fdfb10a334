//! PostgreSQL-backed `CompanyRepository` implementation using Diesel ORM.
//!
//! Rows are re-validated through the domain constructors when read back, so a
//! malformed stored value surfaces as a query error instead of leaking into
//! the domain.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CompanyPersistenceError, CompanyRepository};
use crate::domain::{Company, CompanyDraft, CompanyId, Isin};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, violated_unique_constraint,
};
use super::models::{CompanyRow, CompanyUpdate, NewCompanyRow};
use super::pool::{DbPool, PoolError};
use super::schema::companies;

/// Unique constraint guarding `companies.isin`.
pub(crate) const ISIN_UNIQUE_CONSTRAINT: &str = "companies_isin_key";

/// Diesel-backed implementation of the `CompanyRepository` port.
#[derive(Clone)]
pub struct DieselCompanyRepository {
    pool: DbPool,
}

impl DieselCompanyRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CompanyPersistenceError {
    map_basic_pool_error(error, CompanyPersistenceError::connection)
}

fn map_diesel_error(error: DieselError) -> CompanyPersistenceError {
    map_basic_diesel_error(
        error,
        CompanyPersistenceError::query,
        CompanyPersistenceError::connection,
    )
}

/// Map a failed write, turning an ISIN unique violation into `DuplicateIsin`.
fn map_write_error(error: DieselError, isin: &Isin) -> CompanyPersistenceError {
    if violated_unique_constraint(&error) == Some(ISIN_UNIQUE_CONSTRAINT) {
        return CompanyPersistenceError::duplicate_isin(isin.as_ref());
    }
    map_diesel_error(error)
}

fn row_to_company(row: CompanyRow) -> Result<Company, CompanyPersistenceError> {
    let isin = Isin::new(row.isin).map_err(|err| {
        CompanyPersistenceError::query(format!("stored company {} has invalid isin: {err}", row.id))
    })?;
    Ok(Company {
        id: CompanyId::new(row.id),
        name: row.name,
        stock_ticker: row.stock_ticker,
        exchange: row.exchange,
        isin,
        website: row.website,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl CompanyRepository for DieselCompanyRepository {
    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, CompanyPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CompanyRow> = companies::table
            .filter(companies::id.eq(id.get()))
            .select(CompanyRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_company).transpose()
    }

    async fn find_by_isin(&self, isin: &Isin) -> Result<Option<Company>, CompanyPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CompanyRow> = companies::table
            .filter(companies::isin.eq(isin.as_ref()))
            .select(CompanyRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_company).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Company>, CompanyPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CompanyRow> = companies::table
            .select(CompanyRow::as_select())
            .order_by(companies::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_company).collect()
    }

    async fn create(
        &self,
        draft: &CompanyDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Company, CompanyPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCompanyRow {
            name: draft.name(),
            stock_ticker: draft.stock_ticker(),
            exchange: draft.exchange(),
            isin: draft.isin().as_ref(),
            website: draft.website(),
            created_at,
            updated_at: created_at,
        };

        let row: CompanyRow = diesel::insert_into(companies::table)
            .values(&new_row)
            .returning(CompanyRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, draft.isin()))?;

        row_to_company(row)
    }

    async fn update(&self, company: &Company) -> Result<Option<Company>, CompanyPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = CompanyUpdate {
            name: &company.name,
            stock_ticker: &company.stock_ticker,
            exchange: &company.exchange,
            isin: company.isin.as_ref(),
            website: company.website.as_deref(),
            updated_at: company.updated_at,
        };

        let row: Option<CompanyRow> = diesel::update(companies::table)
            .filter(companies::id.eq(company.id.get()))
            .set(&changeset)
            .returning(CompanyRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, &company.isin))?;

        row.map(row_to_company).transpose()
    }

    async fn exists_by_isin(&self, isin: &Isin) -> Result<bool, CompanyPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            companies::table.filter(companies::isin.eq(isin.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: CompanyId) -> Result<bool, CompanyPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(companies::table.filter(companies::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
