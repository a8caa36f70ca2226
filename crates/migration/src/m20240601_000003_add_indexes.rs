use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Job: lookups by owning company
        manager
            .create_index(
                Index::create()
                    .name("idx_job_company")
                    .table(Job::Table)
                    .col(Job::CompanyId)
                    .to_owned(),
            )
            .await?;

        // Company: lookups by name
        manager
            .create_index(
                Index::create()
                    .name("idx_company_name")
                    .table(Company::Table)
                    .col(Company::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_company_name").table(Company::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_job_company").table(Job::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Job { Table, CompanyId }

#[derive(DeriveIden)]
enum Company { Table, Name }
