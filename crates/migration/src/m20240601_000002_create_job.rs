//! Create `job` table with FK to `company`.
//!
//! Jobs are removed together with their company (ON DELETE CASCADE).
//! Enum columns hold the upper-case variant names.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Job::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Job::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Job::Title, 255).not_null())
                    .col(text(Job::Description).not_null())
                    .col(big_integer(Job::CompanyId).not_null())
                    .col(string_len(Job::Location, 255).not_null())
                    .col(ColumnDef::new(Job::SalaryMin).decimal_len(10, 2).null())
                    .col(ColumnDef::new(Job::SalaryMax).decimal_len(10, 2).null())
                    .col(string_len(Job::JobType, 16).not_null())
                    .col(string_len(Job::ExperienceLevel, 16).not_null())
                    .col(string_len(Job::RemoteOption, 16).not_null())
                    .col(timestamp_with_time_zone(Job::PostedDate).not_null())
                    .col(ColumnDef::new(Job::ExpiryDate).timestamp_with_time_zone().null())
                    .col(boolean(Job::IsActive).not_null().default(true))
                    .col(ColumnDef::new(Job::ApplicationUrl).string_len(500).null())
                    .col(timestamp_with_time_zone(Job::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Job::UpdatedAt).not_null())
                    .col(integer(Job::Version).not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_company")
                            .from(Job::Table, Job::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Job::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Job {
    Table,
    Id,
    Title,
    Description,
    CompanyId,
    Location,
    SalaryMin,
    SalaryMax,
    JobType,
    ExperienceLevel,
    RemoteOption,
    PostedDate,
    ExpiryDate,
    IsActive,
    ApplicationUrl,
    CreatedAt,
    UpdatedAt,
    Version,
}

#[derive(DeriveIden)]
enum Company { Table, Id }
