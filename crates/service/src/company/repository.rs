use async_trait::async_trait;
use models::company;

use super::domain::NewCompany;
use crate::errors::RepositoryError;

/// Persistence gateway for companies.
///
/// `update` is version-checked: it succeeds only if the stored version still
/// equals `company.version`, then stores `version + 1`. A mismatch (or a row
/// deleted in the meantime) yields `RepositoryError::StaleVersion`.
/// `delete` removes the company's jobs with it.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<company::Model>, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<company::Model>, RepositoryError>;
    async fn insert(&self, draft: NewCompany) -> Result<company::Model, RepositoryError>;
    async fn update(&self, company: company::Model) -> Result<company::Model, RepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
