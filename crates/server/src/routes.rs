use axum::{
    middleware,
    routing::get,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::metrics;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod companies;
pub mod jobs;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, metrics, Swagger UI, companies and jobs
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::encode_metrics))
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let api = Router::new()
        .route("/api/companies", get(companies::list).post(companies::create))
        .route(
            "/api/companies/:id",
            get(companies::get).patch(companies::update).delete(companies::delete),
        )
        .route("/api/companies/:id/jobs", get(companies::list_jobs))
        .route("/api/jobs", get(jobs::list).post(jobs::create))
        .route("/api/jobs/:id", get(jobs::get).patch(jobs::update).delete(jobs::delete))
        .with_state(state);

    public.merge(api).layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    // 每次请求创建 span，包含方法和路径，日志级别为 INFO
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    // 响应返回时打点，包含状态码与耗时
                    .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                    // 失败（5xx 等）时以 ERROR 记录
                    .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
            )
            .layer(cors)
            .layer(middleware::from_fn(metrics::track)),
    )
}
