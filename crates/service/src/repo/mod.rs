//! Repository implementations.
//!
//! - `seaorm`: Postgres-backed gateways used by the server.
//! - `memory`: in-process tables with the same version, foreign-key and
//!   cascade rules, for tests and local runs without a database.

pub mod memory;
pub mod seaorm;
