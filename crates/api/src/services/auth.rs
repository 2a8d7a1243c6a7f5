//! Sign-in and sign-up.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thesis_core::error::CoreError;
use thesis_core::messages;
use thesis_core::roles::Role;
use thesis_core::validation;
use thesis_db::models::person::{PersonResponse, SignUpEntry, UserView};
use thesis_db::repositories::PersonRepo;
use validator::Validate;

use crate::auth::jwt::{generate_access_token, JwtConfig};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};

/// Request body for `POST /signin`.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<i32>,
}

/// Length limits shared by every path that accepts an email or a password.
/// Absent fields are not checked.
#[derive(Debug, Validate)]
struct Credentials<'a> {
    #[validate(length(max = 30))]
    email: Option<&'a str>,
    #[validate(length(max = 20))]
    password: Option<&'a str>,
}

fn check_credential_lengths(
    email: Option<&str>,
    password: Option<&str>,
) -> Result<(), CoreError> {
    Credentials { email, password }
        .validate()
        .map_err(|e| validation::from_validation_errors(&e))
}

/// Credential rule for new or changed accounts: the sign-in length limits
/// plus the minimum password length.
pub fn validate_new_credentials(
    email: Option<&str>,
    password: Option<&str>,
) -> Result<(), CoreError> {
    check_credential_lengths(email, password)?;
    if let Some(password) = password {
        validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(|_| {
            CoreError::Validation {
                key: messages::PARAM_ERROR,
                fields: vec!["password".into()],
            }
        })?;
    }
    Ok(())
}

/// Successful sign-in payload.
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub user: UserView,
    pub token: String,
}

/// Authenticate a person against their role table and issue a session token.
pub async fn sign_in(
    pool: &PgPool,
    jwt: &JwtConfig,
    input: &SignInRequest,
) -> AppResult<SignInResponse> {
    validation::require([
        ("email", input.email.as_deref()),
        ("password", input.password.as_deref()),
    ])?;
    check_credential_lengths(input.email.as_deref(), input.password.as_deref())?;

    let role = input.role.and_then(Role::from_i32).ok_or_else(|| CoreError::Validation {
        key: messages::PARAM_ERROR,
        fields: vec!["role".into()],
    })?;

    let email = input.email.as_deref().unwrap_or_default();
    let password = input.password.as_deref().unwrap_or_default();

    let person = PersonRepo::find_by_email(pool, role, email)
        .await?
        .ok_or(CoreError::InvalidCredentials)?;

    let password_valid = verify_password(password, &person.password)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(role = %role, "Sign-in rejected: wrong password");
        return Err(CoreError::InvalidCredentials.into());
    }

    let token = generate_access_token(person.uuid, &person.full_name, &person.code, role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(role = %role, code = %person.code, "Signed in");

    Ok(SignInResponse {
        user: UserView::from(&person),
        token,
    })
}

/// Register every entry in its role table.
///
/// All entries are validated before anything is written; the inserts share
/// one transaction.
pub async fn sign_up(pool: &PgPool, entries: &[SignUpEntry]) -> AppResult<Vec<PersonResponse>> {
    let mut roles = Vec::with_capacity(entries.len());
    for entry in entries {
        roles.push(validate_sign_up(entry)?);
    }

    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(entries.len());
    for (entry, role) in entries.iter().zip(roles) {
        let password = entry.person.password.as_deref().unwrap_or_default();
        let hash = hash_password(password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        let actor = entry.person.code.as_deref().unwrap_or_default();
        let person = PersonRepo::create(&mut tx, role, &entry.person, &hash, actor).await?;
        created.push(PersonResponse::from(person));
    }
    tx.commit().await?;

    tracing::info!(count = created.len(), "Signed up persons");
    Ok(created)
}

/// Check one sign-up entry, returning the role it targets.
fn validate_sign_up(entry: &SignUpEntry) -> Result<Role, CoreError> {
    let role = entry.role().ok_or_else(|| CoreError::Validation {
        key: messages::PARAM_ERROR,
        fields: vec!["role".into()],
    })?;

    if role.is_staff() {
        return Err(CoreError::Forbidden(format!(
            "{role} accounts cannot be self-registered"
        )));
    }

    let missing = entry.person.missing_fields();
    if !missing.is_empty() {
        return Err(CoreError::MissingFields(missing));
    }

    let password = entry.person.password.as_deref().unwrap_or_default();
    validate_new_credentials(entry.person.email.as_deref(), Some(password))?;

    if entry.password_confirm.as_deref() != Some(password) {
        return Err(CoreError::PasswordMismatch);
    }

    Ok(role)
}
