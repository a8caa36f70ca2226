use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use models::{company, job};
use sea_orm::prelude::DateTimeWithTimeZone;
use tokio::sync::Mutex;

use crate::company::domain::NewCompany;
use crate::company::repository::CompanyRepository;
use crate::errors::{EntityKind, RepositoryError};
use crate::job::domain::{JobDraft, JobView};
use crate::job::repository::JobRepository;

#[derive(Default)]
struct Tables {
    companies: BTreeMap<i64, company::Model>,
    jobs: BTreeMap<i64, job::Model>,
    company_seq: i64,
    job_seq: i64,
}

impl Tables {
    fn view(&self, j: &job::Model) -> Result<JobView, RepositoryError> {
        let owner = self
            .companies
            .get(&j.company_id)
            .ok_or_else(|| RepositoryError::Db(format!("job {} references missing company {}", j.id, j.company_id)))?;
        Ok(JobView::new(j.clone(), owner))
    }

    fn require_company(&self, id: i64) -> Result<(), RepositoryError> {
        if self.companies.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::MissingReference { kind: EntityKind::Company, id })
        }
    }
}

fn now() -> DateTimeWithTimeZone { Utc::now().into() }

/// Shared in-memory tables. Repositories handed out by one store see each
/// other's writes, so company deletion cascades to its jobs.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn company_repository(&self) -> MemoryCompanyRepository {
        MemoryCompanyRepository { store: self.clone() }
    }

    pub fn job_repository(&self) -> MemoryJobRepository {
        MemoryJobRepository { store: self.clone() }
    }
}

pub struct MemoryCompanyRepository {
    store: MemoryStore,
}

#[async_trait]
impl CompanyRepository for MemoryCompanyRepository {
    async fn find_all(&self) -> Result<Vec<company::Model>, RepositoryError> {
        let t = self.store.tables.lock().await;
        Ok(t.companies.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<company::Model>, RepositoryError> {
        let t = self.store.tables.lock().await;
        Ok(t.companies.get(&id).cloned())
    }

    async fn insert(&self, draft: NewCompany) -> Result<company::Model, RepositoryError> {
        let mut t = self.store.tables.lock().await;
        t.company_seq += 1;
        let ts = now();
        let created = company::Model {
            id: t.company_seq,
            name: draft.name,
            description: draft.description,
            website: draft.website,
            location: draft.location,
            created_at: ts,
            updated_at: ts,
            version: 0,
        };
        t.companies.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, mut company: company::Model) -> Result<company::Model, RepositoryError> {
        let mut t = self.store.tables.lock().await;
        let stale = RepositoryError::StaleVersion { kind: EntityKind::Company, id: company.id, expected: company.version };
        let Some(stored) = t.companies.get(&company.id) else { return Err(stale) };
        if stored.version != company.version {
            return Err(stale);
        }
        company.created_at = stored.created_at;
        company.updated_at = now();
        company.version += 1;
        t.companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut t = self.store.tables.lock().await;
        if t.companies.remove(&id).is_some() {
            t.jobs.retain(|_, j| j.company_id != id);
        }
        Ok(())
    }
}

pub struct MemoryJobRepository {
    store: MemoryStore,
}

#[async_trait]
impl JobRepository for MemoryJobRepository {
    async fn find_all(&self) -> Result<Vec<JobView>, RepositoryError> {
        let t = self.store.tables.lock().await;
        t.jobs.values().map(|j| t.view(j)).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<JobView>, RepositoryError> {
        let t = self.store.tables.lock().await;
        t.jobs.get(&id).map(|j| t.view(j)).transpose()
    }

    async fn find_by_company_id(&self, company_id: i64) -> Result<Vec<JobView>, RepositoryError> {
        let t = self.store.tables.lock().await;
        t.jobs
            .values()
            .filter(|j| j.company_id == company_id)
            .map(|j| t.view(j))
            .collect()
    }

    async fn insert(&self, draft: JobDraft) -> Result<JobView, RepositoryError> {
        let mut t = self.store.tables.lock().await;
        t.require_company(draft.company_id)?;
        t.job_seq += 1;
        let ts = now();
        let created = job::Model {
            id: t.job_seq,
            title: draft.title,
            description: draft.description,
            company_id: draft.company_id,
            location: draft.location,
            salary_min: draft.salary_min.map(job::to_salary_scale),
            salary_max: draft.salary_max.map(job::to_salary_scale),
            job_type: draft.job_type,
            experience_level: draft.experience_level,
            remote_option: draft.remote_option,
            posted_date: draft.posted_date,
            expiry_date: draft.expiry_date,
            is_active: draft.is_active,
            application_url: draft.application_url,
            created_at: ts,
            updated_at: ts,
            version: 0,
        };
        t.jobs.insert(created.id, created.clone());
        t.view(&created)
    }

    async fn update(&self, mut job: job::Model) -> Result<JobView, RepositoryError> {
        let mut t = self.store.tables.lock().await;
        let stale = RepositoryError::StaleVersion { kind: EntityKind::Job, id: job.id, expected: job.version };
        let Some(stored) = t.jobs.get(&job.id) else { return Err(stale) };
        if stored.version != job.version {
            return Err(stale);
        }
        job.posted_date = stored.posted_date;
        job.created_at = stored.created_at;
        job.salary_min = job.salary_min.map(job::to_salary_scale);
        job.salary_max = job.salary_max.map(job::to_salary_scale);
        t.require_company(job.company_id)?;
        job.updated_at = now();
        job.version += 1;
        t.jobs.insert(job.id, job.clone());
        t.view(&job)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut t = self.store.tables.lock().await;
        t.jobs.remove(&id);
        Ok(())
    }
}
