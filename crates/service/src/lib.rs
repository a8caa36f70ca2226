//! Service layer for companies and job postings.
//! - Services own the business rules: referential checks, partial merges,
//!   optimistic-lock conflict reporting.
//! - Persistence sits behind per-entity repository traits with SeaORM and
//!   in-memory implementations.
//! - Payloads reaching this crate are assumed to be validated already.

pub mod errors;
pub mod company;
pub mod job;
pub mod repo;
#[cfg(test)]
pub mod test_support;

pub use company::CompanyService;
pub use job::JobService;
