//! Account roles.
//!
//! Each role owns its own person table; the integer values are persisted in
//! every row's `role` column and embedded in session tokens, so they must not
//! change.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Role {
    Student,
    Advisor,
    HeadOfSubject,
    FacultyOffice,
    Council,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Student,
        Role::Advisor,
        Role::HeadOfSubject,
        Role::FacultyOffice,
        Role::Council,
    ];

    pub fn as_i32(self) -> i32 {
        match self {
            Role::Student => 1,
            Role::Advisor => 2,
            Role::HeadOfSubject => 3,
            Role::FacultyOffice => 4,
            Role::Council => 5,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        Role::ALL.into_iter().find(|r| r.as_i32() == value)
    }

    /// Human-readable entity name used in logs and `NotFound` errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Advisor => "Advisor",
            Role::HeadOfSubject => "HeadOfSubject",
            Role::FacultyOffice => "FacultyOffice",
            Role::Council => "Council",
        }
    }

    /// Roles allowed to manage person records and approve theses.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::FacultyOffice | Role::HeadOfSubject)
    }
}

impl TryFrom<i32> for Role {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Role::from_i32(value).ok_or_else(|| format!("unknown role {value}"))
    }
}

impl From<Role> for i32 {
    fn from(role: Role) -> Self {
        role.as_i32()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entity_name())
    }
}
