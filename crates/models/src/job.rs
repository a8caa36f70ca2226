use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enums::{ExperienceLevel, JobType, RemoteOption};
use crate::{company, errors, validate};

pub const TITLE_MAX: usize = 255;
pub const LOCATION_MAX: usize = 255;
pub const APPLICATION_URL_MAX: usize = 500;
pub const SALARY_SCALE: u32 = 2;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub company_id: i64,
    pub location: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub salary_min: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub salary_max: Option<Decimal>,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub remote_option: RemoteOption,
    pub posted_date: DateTimeWithTimeZone,
    pub expiry_date: Option<DateTimeWithTimeZone>,
    pub is_active: bool,
    pub application_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Company }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity)
                .from(Column::CompanyId)
                .to(company::Column::Id)
                .into(),
        }
    }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    validate::length(title, 1, TITLE_MAX)
}

pub fn validate_description(description: &str) -> Result<(), errors::ModelError> {
    validate::non_empty(description)
}

pub fn validate_location(location: &str) -> Result<(), errors::ModelError> {
    validate::length(location, 1, LOCATION_MAX)
}

/// Round to the column's two decimal places and pad to that scale.
pub fn to_salary_scale(amount: Decimal) -> Decimal {
    let mut scaled = amount.round_dp(SALARY_SCALE);
    scaled.rescale(SALARY_SCALE);
    scaled
}

pub fn validate_salary(amount: Decimal) -> Result<(), errors::ModelError> {
    validate::non_negative(amount)
}

/// Only checked when both bounds are supplied in the same payload.
pub fn validate_salary_range(min: Decimal, max: Decimal) -> Result<(), errors::ModelError> {
    if max < min {
        return Err(errors::ModelError::Validation("salary_max must be >= salary_min".into()));
    }
    Ok(())
}

pub fn validate_expiry_date(expiry: DateTimeWithTimeZone, now: DateTimeWithTimeZone) -> Result<(), errors::ModelError> {
    if expiry <= now {
        return Err(errors::ModelError::Validation("expiry_date must be in the future".into()));
    }
    Ok(())
}

pub fn validate_application_url(url: &str) -> Result<(), errors::ModelError> {
    validate::url(url)?;
    validate::length(url, 1, APPLICATION_URL_MAX)
}
