use std::sync::Arc;

use models::company;
use tracing::{debug, info, instrument, warn};

use super::domain::{CompanyPatch, NewCompany};
use super::repository::CompanyRepository;
use crate::errors::{EntityKind, RepositoryError, ServiceError};

/// Company business service independent of web framework
pub struct CompanyService<R: CompanyRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CompanyRepository + ?Sized> CompanyService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list_companies(&self) -> Result<Vec<company::Model>, ServiceError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_company(&self, id: i64) -> Result<company::Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Company, id))
    }

    /// Persist a new company; storage assigns id and timestamps, version starts at 0.
    ///
    /// # Examples
    /// ```
    /// use service::company::{domain::NewCompany, CompanyService};
    /// use service::repo::memory::MemoryStore;
    /// use std::sync::Arc;
    /// let store = MemoryStore::new();
    /// let svc = CompanyService::new(Arc::new(store.company_repository()));
    /// let input = NewCompany { name: "Acme".into(), description: None, website: None, location: "NYC".into() };
    /// let created = tokio_test::block_on(svc.create_company(input)).unwrap();
    /// assert_eq!(created.version, 0);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_company(&self, input: NewCompany) -> Result<company::Model, ServiceError> {
        let created = self.repo.insert(input).await?;
        info!(company_id = created.id, "company_created");
        Ok(created)
    }

    /// Merge the present fields of `patch` onto the stored company.
    ///
    /// A patch that changes nothing is not written and keeps the version.
    /// A concurrent writer that persisted first makes this fail with
    /// `OptimisticLockConflict`; the caller reloads and retries.
    #[instrument(skip(self, patch), fields(company_id = id))]
    pub async fn update_company(&self, id: i64, patch: CompanyPatch) -> Result<company::Model, ServiceError> {
        let loaded = self.get_company(id).await?;
        let loaded_version = loaded.version;
        debug!(fields = ?patch.fields(), version = loaded_version, "applying company patch");
        let mut company = loaded.clone();
        patch.apply(&mut company);
        if company == loaded {
            debug!(company_id = id, "company patch is a no-op");
            return Ok(loaded);
        }

        match self.repo.update(company).await {
            Ok(saved) => {
                info!(company_id = saved.id, version = saved.version, "company_updated");
                Ok(saved)
            }
            Err(e @ RepositoryError::StaleVersion { .. }) => {
                warn!(company_id = id, version = loaded_version, "optimistic_lock_conflict");
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a company and, through the gateway, all of its jobs.
    #[instrument(skip(self), fields(company_id = id))]
    pub async fn delete_company(&self, id: i64) -> Result<(), ServiceError> {
        let company = self.get_company(id).await?;
        self.repo.delete(company.id).await?;
        info!(company_id = id, "company_deleted");
        Ok(())
    }
}
