//! Multi-step operations shared by handlers.
//!
//! Handlers stay thin: they extract, call a service, and wrap the result in
//! an [`Envelope`](crate::response::Envelope). Services own validation
//! ordering and transaction boundaries.

pub mod auth;
pub mod person;
pub mod thesis;
