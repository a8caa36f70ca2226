use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::company::repository::CompanyRepository;
use service::errors::ServiceError;
use service::job::repository::JobRepository;
use service::repo::memory::MemoryStore;
use service::repo::seaorm::{SeaOrmCompanyRepository, SeaOrmJobRepository};
use service::{CompanyService, JobService};

use crate::errors::ApiError;

pub type Companies = CompanyService<dyn CompanyRepository>;
pub type Jobs = JobService<dyn JobRepository, dyn CompanyRepository>;

/// Shared handler state; the composition root for services and gateways.
#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<Companies>,
    pub jobs: Arc<Jobs>,
    pub expose_error_details: bool,
}

impl AppState {
    pub fn new(companies: Arc<dyn CompanyRepository>, jobs: Arc<dyn JobRepository>, expose_error_details: bool) -> Self {
        Self {
            companies: Arc::new(CompanyService::new(Arc::clone(&companies))),
            jobs: Arc::new(JobService::new(jobs, companies)),
            expose_error_details,
        }
    }

    /// Postgres-backed gateways.
    pub fn with_database(db: DatabaseConnection, expose_error_details: bool) -> Self {
        Self::new(
            Arc::new(SeaOrmCompanyRepository { db: db.clone() }),
            Arc::new(SeaOrmJobRepository { db }),
            expose_error_details,
        )
    }

    /// In-process gateways over one shared table set.
    pub fn in_memory(expose_error_details: bool) -> Self {
        let store = MemoryStore::new();
        Self::new(Arc::new(store.company_repository()), Arc::new(store.job_repository()), expose_error_details)
    }

    pub fn fail(&self, err: ServiceError) -> ApiError { ApiError::from_service(err, self.expose_error_details) }
}
