use async_trait::async_trait;
use models::job;

use super::domain::{JobDraft, JobView};
use crate::errors::RepositoryError;

/// Persistence gateway for jobs. Every read attaches the owning company.
///
/// `insert` and `update` enforce the company foreign key
/// (`RepositoryError::MissingReference`); `update` is version-checked the same
/// way as [`crate::company::repository::CompanyRepository::update`].
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<JobView>, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<JobView>, RepositoryError>;
    async fn find_by_company_id(&self, company_id: i64) -> Result<Vec<JobView>, RepositoryError>;
    async fn insert(&self, draft: JobDraft) -> Result<JobView, RepositoryError>;
    async fn update(&self, job: job::Model) -> Result<JobView, RepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
