//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` entity structs matching the database rows
//! - `Deserialize` create DTOs whose fields are optional so missing values
//!   can be reported by name
//! - `Deserialize` update DTOs (all `Option` fields) for patches

pub mod person;
pub mod thesis;
