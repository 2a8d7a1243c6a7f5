//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Reads accept `&PgPool` as the first argument; writes that are part of a
//! multi-row operation accept the caller's transaction instead.

pub mod mission_repo;
pub mod person_repo;
pub mod program_repo;
pub mod thesis_repo;
pub mod thesis_task_repo;

pub use mission_repo::MissionRepo;
pub use person_repo::PersonRepo;
pub use program_repo::ProgramRepo;
pub use thesis_repo::{MemberKind, ThesisRepo};
pub use thesis_task_repo::ThesisTaskRepo;
