//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated person from the `bku-token` header.
//! - [`rbac::RequireStaff`] -- Requires the faculty office or head-of-subject role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated person.

pub mod auth;
pub mod rbac;
