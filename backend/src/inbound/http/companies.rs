//! Company registry HTTP handlers.
//!
//! ```text
//! GET    /api/companies
//! GET    /api/companies/{id}
//! GET    /api/companies/isin/{isin}
//! POST   /api/companies
//! PUT    /api/companies/{id}
//! DELETE /api/companies/{id}
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CompanyDraft, CompanyId, Error, Isin};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CompanySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{company_not_found, company_validation_error};

/// Request body for creating or replacing a company.
///
/// Example JSON:
/// `{"name":"Apple Inc","stockTicker":"AAPL","exchange":"NASDAQ","isin":"US0378331005"}`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRequest {
    pub name: String,
    pub stock_ticker: String,
    pub exchange: String,
    pub isin: String,
    #[serde(default)]
    pub website: Option<String>,
}

impl TryFrom<&CompanyRequest> for CompanyDraft {
    type Error = Error;

    fn try_from(value: &CompanyRequest) -> Result<Self, Self::Error> {
        CompanyDraft::try_from_parts(
            &value.name,
            &value.stock_ticker,
            &value.exchange,
            &value.isin,
            value.website.as_deref(),
        )
        .map_err(|err| company_validation_error(&err))
    }
}

/// List every company.
#[utoipa::path(
    get,
    path = "/api/companies",
    responses(
        (status = 200, description = "All companies", body = [CompanySchema]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "listCompanies",
    security([])
)]
#[get("/companies")]
pub async fn list_companies(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let companies = state.companies.list_all().await?;
    Ok(HttpResponse::Ok().json(companies))
}

/// Fetch a company by its surrogate id.
#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    params(("id" = i32, Path, description = "Company identifier")),
    responses(
        (status = 200, description = "Company", body = CompanySchema),
        (status = 404, description = "Unknown company", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "getCompany",
    security([])
)]
#[get("/companies/{id}")]
pub async fn get_company(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = CompanyId::new(path.into_inner());
    let company = state
        .companies
        .get_by_id(id)
        .await?
        .ok_or_else(|| company_not_found(id))?;
    Ok(HttpResponse::Ok().json(company))
}

/// Fetch a company by ISIN.
///
/// A malformed ISIN can never match a record, so it is reported as not found.
#[utoipa::path(
    get,
    path = "/api/companies/isin/{isin}",
    params(("isin" = String, Path, description = "12-character ISIN")),
    responses(
        (status = 200, description = "Company", body = CompanySchema),
        (status = 404, description = "Unknown ISIN", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "getCompanyByIsin",
    security([])
)]
#[get("/companies/isin/{isin}")]
pub async fn get_company_by_isin(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let not_found = || Error::not_found(format!("company with ISIN {raw} not found"));
    let isin = Isin::new(raw.as_str()).map_err(|_| not_found())?;
    let company = state
        .companies
        .get_by_isin(&isin)
        .await?
        .ok_or_else(not_found)?;
    Ok(HttpResponse::Ok().json(company))
}

/// Register a new company.
#[utoipa::path(
    post,
    path = "/api/companies",
    request_body = CompanyRequest,
    responses(
        (
            status = 201,
            description = "Company created",
            headers(("Location" = String, description = "URL of the new company")),
            body = CompanySchema
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "ISIN already registered", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "createCompany",
    security([])
)]
#[post("/companies")]
pub async fn create_company(
    state: web::Data<HttpState>,
    payload: web::Json<CompanyRequest>,
) -> ApiResult<HttpResponse> {
    let draft = CompanyDraft::try_from(&payload.into_inner())?;
    let company = state.companies.create(&draft).await?;
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("/api/companies/{}", company.id)))
        .json(company))
}

/// Replace the mutable fields of a company.
#[utoipa::path(
    put,
    path = "/api/companies/{id}",
    params(("id" = i32, Path, description = "Company identifier")),
    request_body = CompanyRequest,
    responses(
        (status = 200, description = "Company updated", body = CompanySchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown company", body = ErrorSchema),
        (status = 409, description = "ISIN owned by another company", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "updateCompany",
    security([])
)]
#[put("/companies/{id}")]
pub async fn update_company(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<CompanyRequest>,
) -> ApiResult<HttpResponse> {
    let id = CompanyId::new(path.into_inner());
    let draft = CompanyDraft::try_from(&payload.into_inner())?;
    let company = state
        .companies
        .update(id, &draft)
        .await?
        .ok_or_else(|| company_not_found(id))?;
    Ok(HttpResponse::Ok().json(company))
}

/// Remove a company.
#[utoipa::path(
    delete,
    path = "/api/companies/{id}",
    params(("id" = i32, Path, description = "Company identifier")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 404, description = "Unknown company", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "deleteCompany",
    security([])
)]
#[delete("/companies/{id}")]
pub async fn delete_company(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = CompanyId::new(path.into_inner());
    if state.companies.delete(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(company_not_found(id))
    }
}
