use std::net::SocketAddr;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes;
use server::state::AppState;

mod racing {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use models::company;
    use service::company::domain::NewCompany;
    use service::company::repository::CompanyRepository;
    use service::errors::RepositoryError;
    use service::repo::memory::MemoryCompanyRepository;

    /// Another writer slips in between the first load and its save.
    pub struct RacingCompanies {
        pub inner: MemoryCompanyRepository,
        pub raced: AtomicBool,
    }

    #[async_trait]
    impl CompanyRepository for RacingCompanies {
        async fn find_all(&self) -> Result<Vec<company::Model>, RepositoryError> { self.inner.find_all().await }

        async fn find_by_id(&self, id: i64) -> Result<Option<company::Model>, RepositoryError> {
            let snapshot = self.inner.find_by_id(id).await?;
            if let Some(mut winner) = snapshot.clone() {
                if !self.raced.swap(true, Ordering::SeqCst) {
                    winner.location = "Boston".into();
                    self.inner.update(winner).await?;
                }
            }
            Ok(snapshot)
        }

        async fn insert(&self, input: NewCompany) -> Result<company::Model, RepositoryError> {
            self.inner.insert(input).await
        }

        async fn update(&self, c: company::Model) -> Result<company::Model, RepositoryError> { self.inner.update(c).await }

        async fn delete(&self, id: i64) -> Result<(), RepositoryError> { self.inner.delete(id).await }
    }
}

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

    async fn post(&self, path: &str, body: Value) -> anyhow::Result<(HttpStatusCode, Value)> {
        let res = self.client.post(self.url(path)).json(&body).send().await?;
        Ok((res.status(), res.json().await?))
    }

    async fn patch(&self, path: &str, body: Value) -> anyhow::Result<(HttpStatusCode, Value)> {
        let res = self.client.patch(self.url(path)).json(&body).send().await?;
        Ok((res.status(), res.json().await?))
    }

    async fn get(&self, path: &str) -> anyhow::Result<(HttpStatusCode, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        Ok((res.status(), res.json().await?))
    }

    async fn delete(&self, path: &str) -> anyhow::Result<HttpStatusCode> {
        Ok(self.client.delete(self.url(path)).send().await?.status())
    }
}

/// Router over in-memory gateways on an ephemeral port.
async fn start_server(expose_error_details: bool) -> anyhow::Result<TestApp> {
    start_with_state(AppState::in_memory(expose_error_details)).await
}

async fn start_with_state(state: AppState) -> anyhow::Result<TestApp> {
    let app: Router = routes::build_router(state, cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, client: reqwest::Client::new() })
}

fn acme() -> Value {
    json!({"name": "Acme", "location": "NYC"})
}

fn engineer(company_id: i64) -> Value {
    json!({
        "title": "Engineer",
        "description": "x",
        "company_id": company_id,
        "location": "NYC",
        "job_type": "FULL_TIME",
        "experience_level": "SENIOR",
        "remote_option": "HYBRID"
    })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let (status, body) = app.get("/health").await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_served() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let (status, body) = app.get("/api-docs/openapi.json").await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert!(body["paths"]["/api/jobs/{id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn e2e_metrics_exposition() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let _ = app.get("/health").await?;
    let res = app.client.get(app.url("/metrics")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let text = res.text().await?;
    assert!(text.contains("job_board_http_requests_total"));
    assert!(text.contains("job_board_request_duration_seconds"));
    Ok(())
}

#[tokio::test]
async fn e2e_swagger_ui_served() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let res = app.client.get(app.url("/swagger/")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.text().await?.to_lowercase().contains("swagger"));
    Ok(())
}

#[tokio::test]
async fn e2e_company_job_lifecycle() -> anyhow::Result<()> {
    let app = start_server(false).await?;

    let (status, company) = app.post("/api/companies", acme()).await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(company["version"], 0);
    let cid = company["id"].as_i64().unwrap();

    let (status, job) = app.post("/api/jobs", engineer(cid)).await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(job["is_active"], true);
    assert_eq!(job["version"], 0);
    assert_eq!(job["company"]["name"], "Acme");
    let jid = job["id"].as_i64().unwrap();

    let (status, patched) = app.patch(&format!("/api/jobs/{jid}"), json!({"title": "Staff Engineer"})).await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(patched["title"], "Staff Engineer");
    assert_eq!(patched["version"], 1);
    assert_eq!(patched["job_type"], "FULL_TIME");
    assert_eq!(patched["posted_date"], job["posted_date"]);

    let (status, listed) = app.get(&format!("/api/companies/{cid}/jobs")).await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    assert_eq!(app.delete(&format!("/api/companies/{cid}")).await?, HttpStatusCode::NO_CONTENT);

    let (status, body) = app.get(&format!("/api/jobs/{jid}")).await?;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": format!("Job not found with id: {jid}"), "status": 404}));
    Ok(())
}

#[tokio::test]
async fn e2e_missing_company_is_not_found() -> anyhow::Result<()> {
    let app = start_server(false).await?;

    let (status, body) = app.post("/api/jobs", engineer(999)).await?;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Company not found with id: 999");

    let (_, jobs) = app.get("/api/jobs").await?;
    assert_eq!(jobs, json!([]));

    let (status, _) = app.get("/api/companies/999/jobs").await?;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_moving_job_to_unknown_company_leaves_it_unchanged() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let (_, company) = app.post("/api/companies", acme()).await?;
    let cid = company["id"].as_i64().unwrap();
    let (_, job) = app.post("/api/jobs", engineer(cid)).await?;
    let jid = job["id"].as_i64().unwrap();

    let (status, _) = app.patch(&format!("/api/jobs/{jid}"), json!({"company_id": 4242, "title": "Moved"})).await?;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);

    let (_, stored) = app.get(&format!("/api/jobs/{jid}")).await?;
    assert_eq!(stored, job);
    Ok(())
}

#[tokio::test]
async fn e2e_validation_errors_are_field_level() -> anyhow::Result<()> {
    let app = start_server(false).await?;

    let (status, body) = app.post("/api/companies", json!({"website": "not-a-url"})).await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["status"], 400);
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["location"].is_array());
    assert!(body["errors"]["website"].is_array());

    let (_, company) = app.post("/api/companies", acme()).await?;
    let cid = company["id"].as_i64().unwrap();
    let mut bad = engineer(cid);
    bad["remote_option"] = json!("ON_MARS");
    bad["salary_min"] = json!(200);
    bad["salary_max"] = json!(100);
    let (status, body) = app.post("/api/jobs", bad).await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(body["errors"]["remote_option"].is_array());
    assert_eq!(body["errors"]["salary_max"][0], "salary_max must be >= salary_min");
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_body_reported_under_body_key() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let res = app
        .client
        .post(app.url("/api/companies"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["errors"]["_body"].is_array());
    Ok(())
}

#[tokio::test]
async fn e2e_patch_clears_nullable_and_keeps_rest() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let (_, company) = app
        .post("/api/companies", json!({"name": "Acme", "location": "NYC", "website": "https://acme.io", "description": "Widgets"}))
        .await?;
    let cid = company["id"].as_i64().unwrap();

    let (status, patched) = app.patch(&format!("/api/companies/{cid}"), json!({"website": null})).await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(patched["website"], Value::Null);
    assert_eq!(patched["description"], "Widgets");
    assert_eq!(patched["name"], "Acme");
    assert_eq!(patched["version"], 1);

    let (status, body) = app.patch(&format!("/api/companies/{cid}"), json!({"name": null})).await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(body["errors"]["name"].is_array());
    Ok(())
}

#[tokio::test]
async fn e2e_salaries_serialize_as_strings() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let (_, company) = app.post("/api/companies", acme()).await?;
    let mut body = engineer(company["id"].as_i64().unwrap());
    body["salary_min"] = json!("90000.00");
    let (status, job) = app.post("/api/jobs", body).await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(job["salary_min"], "90000.00");
    assert_eq!(job["salary_max"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn e2e_delete_twice_is_not_found() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let (_, company) = app.post("/api/companies", acme()).await?;
    let cid = company["id"].as_i64().unwrap();
    assert_eq!(app.delete(&format!("/api/companies/{cid}")).await?, HttpStatusCode::NO_CONTENT);
    assert_eq!(app.delete(&format!("/api/companies/{cid}")).await?, HttpStatusCode::NOT_FOUND);
    Ok(())
}

/// Same router over Postgres; skipped when no database is reachable.
#[tokio::test]
async fn e2e_database_backed_round_trip() -> anyhow::Result<()> {
    use migration::MigratorTrait;

    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let db = match models::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return Ok(());
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return Ok(());
    }

    let app: Router = routes::build_router(AppState::with_database(db, false), cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    let app = TestApp { base_url: format!("http://{}", addr), client: reqwest::Client::new() };

    let (status, company) = app.post("/api/companies", acme()).await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    let cid = company["id"].as_i64().unwrap();
    let (status, job) = app.post("/api/jobs", engineer(cid)).await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    let jid = job["id"].as_i64().unwrap();

    let (status, patched) = app.patch(&format!("/api/jobs/{jid}"), json!({"is_active": false})).await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(patched["version"], 1);

    assert_eq!(app.delete(&format!("/api/companies/{cid}")).await?, HttpStatusCode::NO_CONTENT);
    let (status, _) = app.get(&format!("/api/jobs/{jid}")).await?;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_empty_patch_keeps_version() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let (_, company) = app.post("/api/companies", acme()).await?;
    let cid = company["id"].as_i64().unwrap();
    let (_, job) = app.post("/api/jobs", engineer(cid)).await?;
    let jid = job["id"].as_i64().unwrap();

    let (status, same) = app.patch(&format!("/api/companies/{cid}"), json!({})).await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(same, company);

    let (status, same) = app.patch(&format!("/api/jobs/{jid}"), json!({"title": "Engineer"})).await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(same["version"], 0);
    assert_eq!(same["updated_at"], job["updated_at"]);
    Ok(())
}

#[tokio::test]
async fn e2e_salaries_take_two_decimal_places() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let (_, company) = app.post("/api/companies", acme()).await?;
    let mut body = engineer(company["id"].as_i64().unwrap());
    body["salary_min"] = json!(100000);
    body["salary_max"] = json!("123456.789");
    let (status, job) = app.post("/api/jobs", body).await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(job["salary_min"], "100000.00");
    assert_eq!(job["salary_max"], "123456.79");

    let jid = job["id"].as_i64().unwrap();
    let (_, patched) = app.patch(&format!("/api/jobs/{jid}"), json!({"salary_max": 150000})).await?;
    assert_eq!(patched["salary_max"], "150000.00");
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_update_is_conflict() -> anyhow::Result<()> {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    use service::repo::memory::MemoryStore;

    let store = MemoryStore::new();
    let companies = Arc::new(racing::RacingCompanies { inner: store.company_repository(), raced: AtomicBool::new(false) });
    let app = start_with_state(AppState::new(companies, Arc::new(store.job_repository()), false)).await?;

    let (_, company) = app.post("/api/companies", acme()).await?;
    let cid = company["id"].as_i64().unwrap();

    let (status, body) = app.patch(&format!("/api/companies/{cid}"), json!({"name": "Loser"})).await?;
    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body, json!({"message": "Resource modified by another user", "status": 409}));

    let (_, stored) = app.get(&format!("/api/companies/{cid}")).await?;
    assert_eq!(stored["name"], "Acme");
    assert_eq!(stored["location"], "Boston");
    assert_eq!(stored["version"], 1);
    Ok(())
}

#[tokio::test]
async fn e2e_non_numeric_id_is_json_not_found() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let (status, body) = app.get("/api/jobs/abc").await?;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert!(body["message"].as_str().unwrap().contains("/api/jobs/abc"));

    assert_eq!(app.delete("/api/companies/1.5").await?, HttpStatusCode::NOT_FOUND);
    Ok(())
}
