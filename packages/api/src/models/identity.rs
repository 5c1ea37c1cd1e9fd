//! # Identity of the signed-in user
//!
//! Two representations cross this module:
//!
//! ## [`AuthPayload`]
//!
//! The raw body returned by login, registration and profile endpoints:
//! `{ _id, name, email, role, profileImageUrl, token? }`. The role is kept as a
//! plain string here because the backend is not trusted to send a known value.
//!
//! ## [`Identity`]
//!
//! The validated projection held by the session store. Converting a payload
//! with [`AuthPayload::identity`] parses the role and fails with
//! [`ApiError::UnknownRole`] for anything other than `admin` or `user`; an
//! empty `profileImageUrl` becomes `None`.
//!
//! [`IdentityPatch`] carries the fields a profile update may change. Role and
//! id are deliberately absent: they only change through a fresh auth response.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Coarse permission class of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(ApiError::UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated user's profile and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

/// Raw identity payload as sent by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl AuthPayload {
    /// Validate the payload into an [`Identity`].
    pub fn identity(&self) -> Result<Identity, ApiError> {
        Ok(Identity {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.parse()?,
            profile_image_url: self
                .profile_image_url
                .clone()
                .filter(|url| !url.is_empty()),
        })
    }

    /// The issued token, if the response carried a non-empty one.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }
}

/// Fields a profile update may change. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

impl IdentityPatch {
    pub fn apply(&self, identity: &mut Identity) {
        if let Some(name) = &self.name {
            identity.name = name.clone();
        }
        if let Some(email) = &self.email {
            identity.email = email.clone();
        }
        if let Some(url) = &self.profile_image_url {
            identity.profile_image_url = Some(url.clone()).filter(|url| !url.is_empty());
        }
    }

    /// A patch that replaces every mutable field with the identity's values.
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            name: Some(identity.name.clone()),
            email: Some(identity.email.clone()),
            profile_image_url: Some(identity.profile_image_url.clone().unwrap_or_default()),
        }
    }
}
