//! Error taxonomy for the client core.

use std::fmt;

use thiserror::Error;

/// Form fields checked before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "full name",
            Field::Email => "email address",
            Field::Password => "password",
        })
    }
}

/// Bad input shape, caught locally and displayed inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your {0}.")]
    MissingField(Field),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Transport-level failure: no HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub timeout: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("network error: {0}")]
    Network(#[from] TransportError),
    /// HTTP 401 on a credentialed request. The session has been ended.
    #[error("Your session has expired. Please log in again.")]
    AuthExpired,
    /// HTTP 403. The session is left untouched.
    #[error("{0}")]
    PermissionDenied(String),
    /// Any other 4xx, carrying the backend's message.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// 5xx, or a success response whose body could not be understood.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("unknown role `{0}`")]
    UnknownRole(String),
    #[error("no active session")]
    NoActiveSession,
    /// The session was cleared or replaced while the request was in flight.
    #[error("the session changed before the response arrived")]
    SessionChanged,
    #[error("could not encode request body: {0}")]
    Encode(String),
}

impl ApiError {
    /// Errors that already ended the session and should send the user to login.
    pub fn ends_session(&self) -> bool {
        matches!(self, ApiError::AuthExpired | ApiError::UnknownRole(_))
    }
}
