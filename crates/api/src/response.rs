//! Shared response envelope for API handlers.
//!
//! Every endpoint except `/health` answers with
//! `{ "status": bool, "message": <code>, "data"?: T, "validateError"?: [..] }`.
//! `message` is always a wire code resolved through
//! [`thesis_core::messages::resolve`], never prose.

use serde::Serialize;
use thesis_core::messages;

/// Standard response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(Envelope::ok(messages::GET_DATA_SUCCESS, items)))
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T: Serialize> {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_error: Option<Vec<String>>,
}

impl<T: Serialize> Envelope<T> {
    /// Successful response carrying `data`.
    pub fn ok(key: &str, data: T) -> Self {
        Self {
            status: true,
            message: messages::resolve(key).to_string(),
            data: Some(data),
            validate_error: None,
        }
    }
}

impl Envelope<()> {
    /// Successful response with no payload.
    pub fn message(key: &str) -> Self {
        Self {
            status: true,
            message: messages::resolve(key).to_string(),
            data: None,
            validate_error: None,
        }
    }

    /// Failed response, optionally listing offending fields.
    pub fn failure(key: &str, fields: Option<Vec<String>>) -> Self {
        Self {
            status: false,
            message: messages::resolve(key).to_string(),
            data: None,
            validate_error: fields,
        }
    }
}
