//! Credential checks run before any request leaves the client.

use serde::Serialize;

use crate::error::{Field, ValidationError};

/// `local@domain.tld`: no whitespace, exactly one `@`, a non-empty local part
/// and a domain with a dot that is neither its first nor last character.
pub fn validate_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// First blank field in the given order, if any.
pub fn validate_required(fields: &[(Field, &str)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(ValidationError::MissingField(*field)),
        None => Ok(()),
    }
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    validate_required(&[(Field::Email, email)])?;
    if validate_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Body of the login request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_email(&self.email)?;
        validate_required(&[(Field::Password, self.password.as_str())])
    }
}

/// Body of the registration request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile_image_url: String,
    /// Opaque secret checked by the backend; empty for a regular account.
    pub admin_invite_token: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required(&[(Field::Name, self.name.as_str())])?;
        check_email(&self.email)?;
        validate_required(&[(Field::Password, self.password.as_str())])
    }
}
