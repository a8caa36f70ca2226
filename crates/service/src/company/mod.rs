//! Company module: domain payloads, repository contract, service.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::CompanyService;
