use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use service::job::domain::JobView;
use tracing::info;

use crate::errors::ApiError;
use crate::extract::{EntityId, ValidJson};
use crate::schemas::{CreateJobRequest, UpdateJobRequest};
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/jobs", tag = "jobs",
    responses(
        (status = 200, description = "All jobs ordered by id, each with its company", body = [crate::openapi::JobDoc]),
        (status = 500, description = "Unexpected error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<JobView>>, ApiError> {
    let list = state.jobs.list_jobs().await.map_err(|e| state.fail(e))?;
    info!(count = list.len(), "list jobs");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/api/jobs", tag = "jobs",
    request_body = crate::openapi::CreateJobDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::JobDoc),
        (status = 400, description = "Validation failed", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Company not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobView>), ApiError> {
    let created = state.jobs.create_job(input).await.map_err(|e| state.fail(e))?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/jobs/{id}", tag = "jobs",
    params(("id" = i64, Path, description = "Job id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::JobDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, EntityId(id): EntityId) -> Result<Json<JobView>, ApiError> {
    state.jobs.get_job(id).await.map(Json).map_err(|e| state.fail(e))
}

#[utoipa::path(
    patch, path = "/api/jobs/{id}", tag = "jobs",
    params(("id" = i64, Path, description = "Job id")),
    request_body = crate::openapi::UpdateJobDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::JobDoc),
        (status = 400, description = "Validation failed", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Job or company not found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Modified concurrently", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(patch): ValidJson<UpdateJobRequest>,
) -> Result<Json<JobView>, ApiError> {
    state.jobs.update_job(id, patch).await.map(Json).map_err(|e| state.fail(e))
}

#[utoipa::path(
    delete, path = "/api/jobs/{id}", tag = "jobs",
    params(("id" = i64, Path, description = "Job id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, EntityId(id): EntityId) -> Result<StatusCode, ApiError> {
    state.jobs.delete_job(id).await.map_err(|e| state.fail(e))?;
    Ok(StatusCode::NO_CONTENT)
}
