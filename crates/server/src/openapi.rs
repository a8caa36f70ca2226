use std::collections::HashMap;

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub message: String,
    pub status: u16,
    /// Present on 400: field name -> messages (`_body` for unreadable bodies).
    pub errors: Option<HashMap<String, Vec<String>>>,
    /// Present on 500 when `server.expose_error_details` is on.
    pub error: Option<String>,
}

#[derive(ToSchema)]
pub struct CompanyDoc {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: String,
    /// RFC 3339
    pub created_at: String,
    pub updated_at: String,
    pub version: i32,
}

#[derive(ToSchema)]
pub struct CompanySummaryDoc { pub id: i64, pub name: String, pub location: String }

#[derive(ToSchema)]
pub struct JobDoc {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub company_id: i64,
    pub location: String,
    /// Decimal string, e.g. "100000.00"
    pub salary_min: Option<String>,
    pub salary_max: Option<String>,
    #[schema(example = "FULL_TIME")]
    pub job_type: String,
    #[schema(example = "SENIOR")]
    pub experience_level: String,
    #[schema(example = "HYBRID")]
    pub remote_option: String,
    pub posted_date: String,
    pub expiry_date: Option<String>,
    pub is_active: bool,
    pub application_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub version: i32,
    pub company: CompanySummaryDoc,
}

#[derive(ToSchema)]
pub struct CreateCompanyDoc {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: String,
}

/// Any subset of fields; `description` and `website` accept null.
#[derive(ToSchema)]
pub struct UpdateCompanyDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateJobDoc {
    pub title: String,
    pub description: String,
    pub company_id: i64,
    pub location: String,
    pub salary_min: Option<String>,
    pub salary_max: Option<String>,
    #[schema(example = "FULL_TIME")]
    pub job_type: String,
    #[schema(example = "MID")]
    pub experience_level: String,
    #[schema(example = "REMOTE")]
    pub remote_option: String,
    pub expiry_date: Option<String>,
    pub application_url: Option<String>,
}

/// Any subset of fields; salary bounds, `expiry_date` and `application_url` accept null.
#[derive(ToSchema)]
pub struct UpdateJobDoc {
    pub title: Option<String>,
    pub description: Option<String>,
    pub company_id: Option<i64>,
    pub location: Option<String>,
    pub salary_min: Option<String>,
    pub salary_max: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub remote_option: Option<String>,
    pub expiry_date: Option<String>,
    pub is_active: Option<bool>,
    pub application_url: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::companies::list,
        crate::routes::companies::create,
        crate::routes::companies::get,
        crate::routes::companies::update,
        crate::routes::companies::delete,
        crate::routes::companies::list_jobs,
        crate::routes::jobs::list,
        crate::routes::jobs::create,
        crate::routes::jobs::get,
        crate::routes::jobs::update,
        crate::routes::jobs::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            CompanyDoc,
            CompanySummaryDoc,
            JobDoc,
            CreateCompanyDoc,
            UpdateCompanyDoc,
            CreateJobDoc,
            UpdateJobDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "companies"),
        (name = "jobs")
    )
)]
pub struct ApiDoc;
