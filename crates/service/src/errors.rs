use std::fmt;

use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Company,
    Job,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Company => f.write_str("Company"),
            EntityKind::Job => f.write_str("Job"),
        }
    }
}

/// Signals raised by a persistence gateway.
#[derive(Debug, Error, PartialEq)]
pub enum RepositoryError {
    /// The row changed (or vanished) since it was loaded.
    #[error("stale {kind} {id}: loaded at version {expected}")]
    StaleVersion { kind: EntityKind, id: i64, expected: i32 },
    /// Foreign-key check failed at the storage boundary.
    #[error("referenced {kind} {id} does not exist")]
    MissingReference { kind: EntityKind, id: i64 },
    #[error("database error: {0}")]
    Db(String),
}

/// Failures surfaced by the company and job services.
#[derive(Debug, Error, PartialEq)]
pub enum ServiceError {
    #[error("{kind} not found with id: {id}")]
    NotFound { kind: EntityKind, id: i64 },
    #[error("{kind} {id} was modified by another writer")]
    OptimisticLockConflict { kind: EntityKind, id: i64 },
    /// An enum string that upstream validation should have rejected.
    #[error("unmapped {field} value: {value}")]
    InvalidEnumValue { field: &'static str, value: String },
    #[error("internal invariant violated: {0}")]
    Invariant(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl ServiceError {
    pub fn not_found(kind: EntityKind, id: i64) -> Self { Self::NotFound { kind, id } }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::NotFound { .. } => 2001,
            ServiceError::OptimisticLockConflict { .. } => 2002,
            ServiceError::InvalidEnumValue { .. } => 2101,
            ServiceError::Invariant(_) => 2102,
            ServiceError::Repository(_) => 2200,
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::StaleVersion { kind, id, .. } => ServiceError::OptimisticLockConflict { kind, id },
            RepositoryError::MissingReference { kind, id } => ServiceError::NotFound { kind, id },
            RepositoryError::Db(msg) => ServiceError::Repository(msg),
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::UnknownVariant { field, value } => ServiceError::InvalidEnumValue { field, value },
            ModelError::Validation(msg) => ServiceError::Invariant(msg),
        }
    }
}
