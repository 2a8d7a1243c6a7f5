//! Required-field and length validation shared by every create path.
//!
//! Field identifiers reported to clients are the camelCase names used in the
//! JSON payloads, so a client can highlight the offending inputs directly.

use validator::ValidationErrors;

use crate::error::CoreError;
use crate::messages;

/// Fields every person record (any role) must carry on creation.
pub const PERSON_REQUIRED_FIELDS: [&str; 10] = [
    "code",
    "firstName",
    "lastName",
    "fullName",
    "email",
    "phoneNumber",
    "birthday",
    "address",
    "gender",
    "password",
];

/// Returns `true` for absent, empty, or whitespace-only values.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Collect the names of all blank fields, preserving input order.
pub fn missing_fields<'a>(
    fields: impl IntoIterator<Item = (&'static str, Option<&'a str>)>,
) -> Vec<String> {
    fields
        .into_iter()
        .filter(|(_, value)| is_blank(*value))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Fail with [`CoreError::MissingFields`] if any of `fields` is blank.
pub fn require<'a>(
    fields: impl IntoIterator<Item = (&'static str, Option<&'a str>)>,
) -> Result<(), CoreError> {
    let missing = missing_fields(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::MissingFields(missing))
    }
}

/// Convert `validator` derive output into a [`CoreError::Validation`].
///
/// Length violations map to `MAX_LENGTH`; anything else is a generic
/// `PARAM_ERROR`. Field names are sorted for stable output.
pub fn from_validation_errors(errors: &ValidationErrors) -> CoreError {
    let field_errors = errors.field_errors();

    let only_length = field_errors
        .values()
        .flat_map(|errs| errs.iter())
        .all(|e| e.code == "length");

    let mut fields: Vec<String> = field_errors.keys().map(|f| f.to_string()).collect();
    fields.sort();

    CoreError::Validation {
        key: if only_length {
            messages::MAX_LENGTH
        } else {
            messages::PARAM_ERROR
        },
        fields,
    }
}
