//! Domain primitives shared by the database and HTTP layers.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod messages;
pub mod roles;
pub mod types;
pub mod validation;
