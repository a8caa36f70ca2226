use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use super::domain::{JobPatch, JobView, NewJob};
use super::repository::JobRepository;
use crate::company::repository::CompanyRepository;
use crate::errors::{EntityKind, RepositoryError, ServiceError};

/// Job business service. Holds the company gateway to enforce that every job
/// points at an existing company.
pub struct JobService<J: JobRepository + ?Sized, C: CompanyRepository + ?Sized> {
    jobs: Arc<J>,
    companies: Arc<C>,
}

impl<J, C> JobService<J, C>
where
    J: JobRepository + ?Sized,
    C: CompanyRepository + ?Sized,
{
    pub fn new(jobs: Arc<J>, companies: Arc<C>) -> Self { Self { jobs, companies } }

    pub async fn list_jobs(&self) -> Result<Vec<JobView>, ServiceError> {
        Ok(self.jobs.find_all().await?)
    }

    pub async fn get_job(&self, id: i64) -> Result<JobView, ServiceError> {
        self.jobs
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Job, id))
    }

    pub async fn list_jobs_for_company(&self, company_id: i64) -> Result<Vec<JobView>, ServiceError> {
        self.ensure_company(company_id).await?;
        Ok(self.jobs.find_by_company_id(company_id).await?)
    }

    /// Create a job under an existing company.
    ///
    /// The company is looked up before anything is built, so an unknown
    /// `company_id` fails with `NotFound(Company)` and persists nothing.
    #[instrument(skip(self, input), fields(company_id = input.company_id, title = %input.title))]
    pub async fn create_job(&self, input: NewJob) -> Result<JobView, ServiceError> {
        self.ensure_company(input.company_id).await?;
        let draft = input.into_draft(Utc::now().into())?;
        let created = self.jobs.insert(draft).await?;
        info!(job_id = created.job.id, company_id = created.job.company_id, "job_created");
        Ok(created)
    }

    /// Merge the present fields of `patch` onto the stored job.
    ///
    /// A new `company_id` is checked before any field is touched. A patch
    /// that changes nothing is not written. A stale version at save time
    /// fails with `OptimisticLockConflict`.
    #[instrument(skip(self, patch), fields(job_id = id))]
    pub async fn update_job(&self, id: i64, patch: JobPatch) -> Result<JobView, ServiceError> {
        let loaded = self.get_job(id).await?;
        if let Some(company_id) = patch.company_id {
            self.ensure_company(company_id).await?;
        }

        let loaded_version = loaded.job.version;
        debug!(fields = ?patch.fields(), version = loaded_version, "applying job patch");
        let mut job = loaded.job.clone();
        patch.apply(&mut job)?;
        if job == loaded.job {
            debug!(job_id = id, "job patch is a no-op");
            return Ok(loaded);
        }

        match self.jobs.update(job).await {
            Ok(saved) => {
                info!(job_id = saved.job.id, version = saved.job.version, "job_updated");
                Ok(saved)
            }
            Err(e @ RepositoryError::StaleVersion { .. }) => {
                warn!(job_id = id, version = loaded_version, "optimistic_lock_conflict");
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), fields(job_id = id))]
    pub async fn delete_job(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self.get_job(id).await?;
        self.jobs.delete(existing.job.id).await?;
        info!(job_id = id, "job_deleted");
        Ok(())
    }

    async fn ensure_company(&self, company_id: i64) -> Result<(), ServiceError> {
        match self.companies.find_by_id(company_id).await? {
            Some(_) => Ok(()),
            None => {
                debug!(company_id, "referenced company missing");
                Err(ServiceError::not_found(EntityKind::Company, company_id))
            }
        }
    }
}
