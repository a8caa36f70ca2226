//! Job module: domain payloads and read views, repository contract, service.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::JobService;
