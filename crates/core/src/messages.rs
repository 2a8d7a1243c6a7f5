//! Message code registry.
//!
//! Every `message` field in an API envelope carries an opaque code from this
//! table rather than prose. Clients switch on the code; translations live on
//! the client side.

pub const PARAM_ERROR: &str = "PARAM_ERROR";
pub const MAX_LENGTH: &str = "MAX_LENGTH";
pub const FIX_LENGTH: &str = "FIX_LENGTH";
pub const FORMAT_DATE: &str = "FORMAT_DATE";
pub const FORMAT_NUMBER: &str = "FORMAT_NUMBER";
pub const REQUIRE: &str = "REQUIRE";
pub const MISSING_FIELDS: &str = "MISSING_FIELDS";
pub const PASSWORD_MISMATCH: &str = "PASSWORD_MISMATCH";
pub const KEY_NOT_FOUND: &str = "KEY_NOT_FOUND";
pub const SYSTEM_ERROR: &str = "SYSTEM_ERROR";
pub const TOKEN_INCORRECT: &str = "TOKEN_INCORRECT";
pub const TOKEN_MISSING: &str = "TOKEN_MISSING";
pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
pub const FAILED_TO_GENERATE_TOKEN: &str = "FAILED_TO_GENERATE_TOKEN";
pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
pub const LOGIN_SUCCESS: &str = "LOGIN_SUCCESS";
pub const ERROR_GET_EMAIL: &str = "ERROR_GET_EMAIL";
pub const LOGOUT_SUCCESS: &str = "LOGOUT_SUCCESS";
pub const SIGN_UP_SUCCESS: &str = "SIGN_UP_SUCCESS";
pub const GET_DATA_FAIL: &str = "GET_DATA_FAIL";
pub const NOT_ID_EXISTS: &str = "NOT_ID_EXISTS";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const GET_DATA_SUCCESS: &str = "GET_DATA_SUCCESS";
pub const CREATE_SUCCESS: &str = "CREATE_SUCCESS";
pub const UPDATE_SUCCESS: &str = "UPDATE_SUCCESS";
pub const DELETE_SUCCESS: &str = "DELETE_SUCCESS";
pub const RESTORE_SUCCESS: &str = "RESTORE_SUCCESS";
pub const ALREADY_RESTORED: &str = "ALREADY_RESTORED";
pub const CONFLICT: &str = "CONFLICT";
pub const EMAIL_PASSWORD_INCORRECT: &str = "EMAIL_PASSWORD_INCORRECT";
pub const INVALID_EMAIL_PASSWORD: &str = "INVALID_EMAIL_PASSWORD";

/// Key -> wire code. Codes are stable; never renumber an existing entry.
const REGISTRY: &[(&str, &str)] = &[
    (PARAM_ERROR, "MSG_V0000"),
    (MAX_LENGTH, "MSG_V0001"),
    (FIX_LENGTH, "MSG_V0002"),
    (FORMAT_DATE, "MSG_V0003"),
    (FORMAT_NUMBER, "MSG_V0004"),
    (REQUIRE, "MSG_V0005"),
    (MISSING_FIELDS, "MSG_V1000"),
    (PASSWORD_MISMATCH, "MSG_V1001"),
    (KEY_NOT_FOUND, "MSG_S0000"),
    (SYSTEM_ERROR, "MSG_S0001"),
    (TOKEN_INCORRECT, "MSG_S0002"),
    (FAILED_TO_GENERATE_TOKEN, "MSG_S0003"),
    (LOGIN_SUCCESS, "MSG_S0004"),
    (ERROR_GET_EMAIL, "MSG_S0005"),
    (LOGOUT_SUCCESS, "MSG_S0006"),
    (SIGN_UP_SUCCESS, "MSG_S0007"),
    (TOKEN_EXPIRED, "MSG_S0008"),
    (TOKEN_MISSING, "MSG_S0009"),
    (PERMISSION_DENIED, "MSG_S0010"),
    (GET_DATA_FAIL, "MSG_RE0001"),
    (NOT_ID_EXISTS, "MSG_RE0002"),
    (NOT_FOUND, "MSG_RE0003"),
    (GET_DATA_SUCCESS, "MSG_RI0001"),
    (CREATE_SUCCESS, "MSG_CI0001"),
    (UPDATE_SUCCESS, "MSG_UI0001"),
    (DELETE_SUCCESS, "MSG_DI0001"),
    (RESTORE_SUCCESS, "MSG_RS0001"),
    (ALREADY_RESTORED, "MSG_AR0001"),
    (CONFLICT, "MSG_CF0001"),
    (EMAIL_PASSWORD_INCORRECT, "MSG_N0000"),
    (INVALID_EMAIL_PASSWORD, "MSG_N0001"),
];

/// Resolve a message key to its wire code.
///
/// Unknown keys are returned unchanged.
pub fn resolve(key: &str) -> &str {
    REGISTRY
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, code)| *code)
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn known_keys_resolve_to_codes() {
        assert_eq!(resolve(GET_DATA_SUCCESS), "MSG_RI0001");
        assert_eq!(resolve(MISSING_FIELDS), "MSG_V1000");
        assert_eq!(resolve(ALREADY_RESTORED), "MSG_AR0001");
        assert_eq!(resolve(INVALID_EMAIL_PASSWORD), "MSG_N0001");
    }

    #[test]
    fn unknown_key_falls_back_to_itself() {
        assert_eq!(resolve("SOMETHING_ELSE"), "SOMETHING_ELSE");
        assert_eq!(resolve(""), "");
    }

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = REGISTRY.iter().map(|(_, c)| *c).collect();
        assert_eq!(codes.len(), REGISTRY.len());
    }
}
