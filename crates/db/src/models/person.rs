//! Person entity model and DTOs.
//!
//! Students, advisors, council members, faculty office staff and subject
//! heads share one row shape; the table is chosen by [`Role`].

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesis_core::roles::Role;
use thesis_core::types::{DbId, Timestamp};
use thesis_core::validation;
use uuid::Uuid;

/// Full person row from one of the `tbl_*` person tables.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`PersonResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Person {
    pub id: DbId,
    pub uuid: Uuid,
    pub created_by: String,
    pub updated_by: String,
    pub deleted_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
    pub log_version: i32,
    pub is_deleted: bool,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub gender: String,
    pub phone_number: String,
    pub birthday: String,
    pub image: String,
    pub role: i32,
    pub code: String,
    pub status: bool,
}

/// Safe person representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub uuid: Uuid,
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub gender: String,
    pub phone_number: String,
    pub birthday: String,
    pub image: String,
    pub role: i32,
    pub status: bool,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub log_version: i32,
}

impl From<Person> for PersonResponse {
    fn from(p: Person) -> Self {
        Self {
            uuid: p.uuid,
            code: p.code,
            first_name: p.first_name,
            last_name: p.last_name,
            full_name: p.full_name,
            email: p.email,
            address: p.address,
            gender: p.gender,
            phone_number: p.phone_number,
            birthday: p.birthday,
            image: p.image,
            role: p.role,
            status: p.status,
            created_by: p.created_by,
            updated_by: p.updated_by,
            created_at: p.created_at,
            updated_at: p.updated_at,
            log_version: p.log_version,
        }
    }
}

/// Minimal account view returned by sign-in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub role: i32,
    pub status: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Person> for UserView {
    fn from(p: &Person) -> Self {
        Self {
            id: p.uuid,
            email: p.email.clone(),
            role: p.role,
            status: p.status,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// DTO for creating a person. Every field is optional on the wire so that
/// missing values can be reported together rather than as a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePerson {
    pub code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub birthday: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub password: Option<String>,
    pub image: Option<String>,
    pub status: Option<bool>,
}

impl CreatePerson {
    /// Names of required fields that are absent or blank, in wire form.
    pub fn missing_fields(&self) -> Vec<String> {
        validation::missing_fields(
            validation::PERSON_REQUIRED_FIELDS
                .into_iter()
                .zip(self.required_values()),
        )
    }

    fn required_values(&self) -> [Option<&str>; 10] {
        [
            self.code.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.full_name.as_deref(),
            self.email.as_deref(),
            self.phone_number.as_deref(),
            self.birthday.as_deref(),
            self.address.as_deref(),
            self.gender.as_deref(),
            self.password.as_deref(),
        ]
    }
}

/// DTO for one item of a batch update.
///
/// `None` leaves a column unchanged; `Some("")` clears an optional column.
/// Required columns cannot be cleared, and an empty `password` keeps the
/// stored hash. An item without `uuid` is treated as a creation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePerson {
    pub uuid: Option<Uuid>,
    pub is_deleted: Option<bool>,
    pub code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub birthday: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub password: Option<String>,
    pub image: Option<String>,
    pub status: Option<bool>,
}

impl UpdatePerson {
    /// Required fields supplied as blank, in wire form. `password` is never
    /// reported since an empty one means "unchanged".
    pub fn blanked_required_fields(&self) -> Vec<String> {
        let values = [
            self.code.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.full_name.as_deref(),
            self.email.as_deref(),
            self.phone_number.as_deref(),
            self.birthday.as_deref(),
            self.address.as_deref(),
            self.gender.as_deref(),
            None,
        ];
        validation::PERSON_REQUIRED_FIELDS
            .into_iter()
            .zip(values)
            .filter(|(_, value)| value.is_some_and(|v| v.trim().is_empty()))
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

impl From<UpdatePerson> for CreatePerson {
    fn from(u: UpdatePerson) -> Self {
        Self {
            code: u.code,
            first_name: u.first_name,
            last_name: u.last_name,
            full_name: u.full_name,
            email: u.email,
            phone_number: u.phone_number,
            birthday: u.birthday,
            address: u.address,
            gender: u.gender,
            password: u.password,
            image: u.image,
            status: u.status,
        }
    }
}

/// One sign-up entry: a person plus the role table it belongs in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpEntry {
    pub role: Option<i32>,
    pub password_confirm: Option<String>,
    #[serde(flatten)]
    pub person: CreatePerson,
}

impl SignUpEntry {
    pub fn role(&self) -> Option<Role> {
        self.role.and_then(Role::from_i32)
    }
}
