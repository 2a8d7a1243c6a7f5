pub mod auth;
pub mod person;
pub mod thesis;
