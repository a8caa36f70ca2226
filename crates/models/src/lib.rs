//! Persistence entities for the job board.
//!
//! Entities are SeaORM models; field rules shared with the HTTP layer live next
//! to the entity they constrain.

pub mod errors;
pub mod db;
pub mod enums;
pub mod validate;
pub mod company;
pub mod job;
