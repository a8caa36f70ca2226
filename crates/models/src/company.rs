use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, job, validate};

pub const NAME_MAX: usize = 255;
pub const LOCATION_MAX: usize = 255;
pub const WEBSITE_MAX: usize = 255;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Job }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Job => Entity::has_many(job::Entity).into(),
        }
    }
}

impl Related<job::Entity> for Entity {
    fn to() -> RelationDef { Relation::Job.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Compact view embedded in job responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub id: i64,
    pub name: String,
    pub location: String,
}

impl From<&Model> for Summary {
    fn from(m: &Model) -> Self {
        Self { id: m.id, name: m.name.clone(), location: m.location.clone() }
    }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    validate::length(name, 1, NAME_MAX)
}

pub fn validate_location(location: &str) -> Result<(), errors::ModelError> {
    validate::length(location, 1, LOCATION_MAX)
}

pub fn validate_website(website: &str) -> Result<(), errors::ModelError> {
    validate::url(website)?;
    validate::length(website, 1, WEBSITE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rules() {
        assert!(validate_name("Acme").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_ok());
        assert!(validate_name(&"x".repeat(NAME_MAX + 1)).is_err());
    }

    #[test]
    fn website_rules() {
        assert!(validate_website("https://acme.io").is_ok());
        assert!(validate_website("acme").is_err());
        assert!(validate_website("ftp://acme.io/brochure.pdf").is_ok());
        let long = format!("https://acme.io/{}", "p".repeat(WEBSITE_MAX));
        assert!(validate_website(&long).is_err());
    }
}
