use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use models::company;
use service::job::domain::JobView;
use tracing::info;

use crate::errors::ApiError;
use crate::extract::{EntityId, ValidJson};
use crate::schemas::{CreateCompanyRequest, UpdateCompanyRequest};
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/companies", tag = "companies",
    responses(
        (status = 200, description = "All companies ordered by id", body = [crate::openapi::CompanyDoc]),
        (status = 500, description = "Unexpected error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<company::Model>>, ApiError> {
    let list = state.companies.list_companies().await.map_err(|e| state.fail(e))?;
    info!(count = list.len(), "list companies");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/api/companies", tag = "companies",
    request_body = crate::openapi::CreateCompanyDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Validation failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<company::Model>), ApiError> {
    let created = state.companies.create_company(input).await.map_err(|e| state.fail(e))?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/companies/{id}", tag = "companies",
    params(("id" = i64, Path, description = "Company id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::CompanyDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, EntityId(id): EntityId) -> Result<Json<company::Model>, ApiError> {
    state.companies.get_company(id).await.map(Json).map_err(|e| state.fail(e))
}

#[utoipa::path(
    patch, path = "/api/companies/{id}", tag = "companies",
    params(("id" = i64, Path, description = "Company id")),
    request_body = crate::openapi::UpdateCompanyDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Validation failed", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Modified concurrently", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(patch): ValidJson<UpdateCompanyRequest>,
) -> Result<Json<company::Model>, ApiError> {
    state.companies.update_company(id, patch).await.map(Json).map_err(|e| state.fail(e))
}

#[utoipa::path(
    delete, path = "/api/companies/{id}", tag = "companies",
    params(("id" = i64, Path, description = "Company id")),
    responses(
        (status = 204, description = "Deleted along with its jobs"),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, EntityId(id): EntityId) -> Result<StatusCode, ApiError> {
    state.companies.delete_company(id).await.map_err(|e| state.fail(e))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/companies/{id}/jobs", tag = "companies",
    params(("id" = i64, Path, description = "Company id")),
    responses(
        (status = 200, description = "Jobs of the company ordered by id", body = [crate::openapi::JobDoc]),
        (status = 404, description = "Company not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list_jobs(State(state): State<AppState>, EntityId(id): EntityId) -> Result<Json<Vec<JobView>>, ApiError> {
    state.jobs.list_jobs_for_company(id).await.map(Json).map_err(|e| state.fail(e))
}
