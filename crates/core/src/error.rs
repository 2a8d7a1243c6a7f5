use crate::messages;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Malformed input. `key` is the message-registry key reported to the client.
    #[error("Validation failed ({key}): {}", fields.join(", "))]
    Validation {
        key: &'static str,
        fields: Vec<String>,
    },

    #[error("Password and confirmation do not match")]
    PasswordMismatch,

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Entity is not deleted")]
    AlreadyRestored,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Session token missing")]
    TokenMissing,

    #[error("Session token invalid")]
    TokenInvalid,

    #[error("Session token expired")]
    TokenExpired,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by any displayable identifier.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Message-registry key describing this error on the wire.
    pub fn message_key(&self) -> &'static str {
        match self {
            CoreError::MissingFields(_) => messages::MISSING_FIELDS,
            CoreError::Validation { key, .. } => key,
            CoreError::PasswordMismatch => messages::PASSWORD_MISMATCH,
            CoreError::NotFound { .. } => messages::NOT_FOUND,
            CoreError::AlreadyRestored => messages::ALREADY_RESTORED,
            CoreError::InvalidCredentials => messages::INVALID_EMAIL_PASSWORD,
            CoreError::TokenMissing => messages::TOKEN_MISSING,
            CoreError::TokenInvalid => messages::TOKEN_INCORRECT,
            CoreError::TokenExpired => messages::TOKEN_EXPIRED,
            CoreError::Forbidden(_) => messages::PERMISSION_DENIED,
            CoreError::Conflict(_) => messages::CONFLICT,
            CoreError::Internal(_) => messages::SYSTEM_ERROR,
        }
    }

    /// Field names to surface in the envelope's `validateError` list, if any.
    pub fn invalid_fields(&self) -> Option<&[String]> {
        match self {
            CoreError::MissingFields(fields) | CoreError::Validation { fields, .. } => {
                Some(fields)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_exposes_field_list() {
        let err = CoreError::MissingFields(vec!["email".into(), "code".into()]);
        assert_eq!(err.message_key(), messages::MISSING_FIELDS);
        assert_eq!(err.invalid_fields().unwrap(), ["email", "code"]);
        assert_eq!(err.to_string(), "Missing required fields: email, code");
    }

    #[test]
    fn validation_carries_its_own_key() {
        let err = CoreError::Validation {
            key: messages::MAX_LENGTH,
            fields: vec!["password".into()],
        };
        assert_eq!(err.message_key(), messages::MAX_LENGTH);
    }

    #[test]
    fn auth_errors_have_no_field_list() {
        assert!(CoreError::InvalidCredentials.invalid_fields().is_none());
        assert!(CoreError::TokenExpired.invalid_fields().is_none());
        assert_eq!(
            CoreError::TokenInvalid.message_key(),
            messages::TOKEN_INCORRECT
        );
    }

    #[test]
    fn not_found_formats_identifier() {
        let err = CoreError::not_found("Student", "S1");
        assert_eq!(err.to_string(), "Entity not found: Student with id S1");
    }
}
