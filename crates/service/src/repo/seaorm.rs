use async_trait::async_trait;
use chrono::Utc;
use models::{company, job};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::debug;

use crate::company::domain::NewCompany;
use crate::company::repository::CompanyRepository;
use crate::errors::{EntityKind, RepositoryError};
use crate::job::domain::{JobDraft, JobView};
use crate::job::repository::JobRepository;

fn db_err(e: DbErr) -> RepositoryError { RepositoryError::Db(e.to_string()) }

/// Map a write failure, turning a foreign-key violation on `job.company_id`
/// into `MissingReference`.
fn job_write_err(e: DbErr, company_id: i64) -> RepositoryError {
    match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            RepositoryError::MissingReference { kind: EntityKind::Company, id: company_id }
        }
        _ => db_err(e),
    }
}

fn now() -> DateTimeWithTimeZone { Utc::now().into() }

fn joined(row: (job::Model, Option<company::Model>)) -> Result<JobView, RepositoryError> {
    match row {
        (j, Some(c)) => Ok(JobView::new(j, &c)),
        (j, None) => Err(RepositoryError::Db(format!("job {} references missing company {}", j.id, j.company_id))),
    }
}

async fn load_job<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Option<JobView>, RepositoryError> {
    job::Entity::find_by_id(id)
        .find_also_related(company::Entity)
        .one(conn)
        .await
        .map_err(db_err)?
        .map(joined)
        .transpose()
}

/// SeaORM-backed company gateway.
pub struct SeaOrmCompanyRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn find_all(&self) -> Result<Vec<company::Model>, RepositoryError> {
        company::Entity::find()
            .order_by_asc(company::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<company::Model>, RepositoryError> {
        company::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn insert(&self, draft: NewCompany) -> Result<company::Model, RepositoryError> {
        let ts = now();
        let am = company::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            description: Set(draft.description),
            website: Set(draft.website),
            location: Set(draft.location),
            created_at: Set(ts),
            updated_at: Set(ts),
            version: Set(0),
        };
        am.insert(&self.db).await.map_err(db_err)
    }

    async fn update(&self, company: company::Model) -> Result<company::Model, RepositoryError> {
        let (id, expected) = (company.id, company.version);
        let am = company::ActiveModel {
            id: NotSet,
            name: Set(company.name),
            description: Set(company.description),
            website: Set(company.website),
            location: Set(company.location),
            created_at: NotSet,
            updated_at: Set(now()),
            version: Set(expected + 1),
        };

        let txn = self.db.begin().await.map_err(db_err)?;
        let res = company::Entity::update_many()
            .set(am)
            .filter(company::Column::Id.eq(id))
            .filter(company::Column::Version.eq(expected))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            debug!(company_id = id, version = expected, "version predicate matched no row");
            return Err(RepositoryError::StaleVersion { kind: EntityKind::Company, id, expected });
        }
        let saved = company::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::StaleVersion { kind: EntityKind::Company, id, expected })?;
        txn.commit().await.map_err(db_err)?;
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        // jobs go with it via ON DELETE CASCADE
        company::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}

/// SeaORM-backed job gateway; every read joins the owning company.
pub struct SeaOrmJobRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl JobRepository for SeaOrmJobRepository {
    async fn find_all(&self) -> Result<Vec<JobView>, RepositoryError> {
        job::Entity::find()
            .find_also_related(company::Entity)
            .order_by_asc(job::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(joined)
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<JobView>, RepositoryError> {
        load_job(&self.db, id).await
    }

    async fn find_by_company_id(&self, company_id: i64) -> Result<Vec<JobView>, RepositoryError> {
        job::Entity::find()
            .filter(job::Column::CompanyId.eq(company_id))
            .find_also_related(company::Entity)
            .order_by_asc(job::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(joined)
            .collect()
    }

    async fn insert(&self, draft: JobDraft) -> Result<JobView, RepositoryError> {
        let company_id = draft.company_id;
        let ts = now();
        let am = job::ActiveModel {
            id: NotSet,
            title: Set(draft.title),
            description: Set(draft.description),
            company_id: Set(company_id),
            location: Set(draft.location),
            salary_min: Set(draft.salary_min),
            salary_max: Set(draft.salary_max),
            job_type: Set(draft.job_type),
            experience_level: Set(draft.experience_level),
            remote_option: Set(draft.remote_option),
            posted_date: Set(draft.posted_date),
            expiry_date: Set(draft.expiry_date),
            is_active: Set(draft.is_active),
            application_url: Set(draft.application_url),
            created_at: Set(ts),
            updated_at: Set(ts),
            version: Set(0),
        };

        let txn = self.db.begin().await.map_err(db_err)?;
        let created = am.insert(&txn).await.map_err(|e| job_write_err(e, company_id))?;
        let view = load_job(&txn, created.id)
            .await?
            .ok_or_else(|| RepositoryError::Db(format!("inserted job {} not readable", created.id)))?;
        txn.commit().await.map_err(db_err)?;
        Ok(view)
    }

    async fn update(&self, job: job::Model) -> Result<JobView, RepositoryError> {
        let (id, expected, company_id) = (job.id, job.version, job.company_id);
        let am = job::ActiveModel {
            id: NotSet,
            title: Set(job.title),
            description: Set(job.description),
            company_id: Set(company_id),
            location: Set(job.location),
            salary_min: Set(job.salary_min),
            salary_max: Set(job.salary_max),
            job_type: Set(job.job_type),
            experience_level: Set(job.experience_level),
            remote_option: Set(job.remote_option),
            posted_date: NotSet,
            expiry_date: Set(job.expiry_date),
            is_active: Set(job.is_active),
            application_url: Set(job.application_url),
            created_at: NotSet,
            updated_at: Set(now()),
            version: Set(expected + 1),
        };

        let txn = self.db.begin().await.map_err(db_err)?;
        let res = job::Entity::update_many()
            .set(am)
            .filter(job::Column::Id.eq(id))
            .filter(job::Column::Version.eq(expected))
            .exec(&txn)
            .await
            .map_err(|e| job_write_err(e, company_id))?;
        if res.rows_affected == 0 {
            debug!(job_id = id, version = expected, "version predicate matched no row");
            return Err(RepositoryError::StaleVersion { kind: EntityKind::Job, id, expected });
        }
        let saved = load_job(&txn, id)
            .await?
            .ok_or(RepositoryError::StaleVersion { kind: EntityKind::Job, id, expected })?;
        txn.commit().await.map_err(db_err)?;
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        job::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
