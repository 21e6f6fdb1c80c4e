//! Error types for the core library.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by manager operations.
///
/// Every gateway failure is reported as one of these four kinds.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing, detected by the client or the server.
    #[error("Validation failed: {}", describe(.0))]
    Validation(Vec<ValidationError>),

    /// The entity does not exist or is not visible to the caller.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The session token is missing, invalid or expired.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Network failure or unexpected server response.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Returns true for the kind that calls for a session-wide reaction
    /// (clear the token, authenticate again).
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Returns true if the error is a validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the entity was not found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<mailroom_api::Error> for Error {
    fn from(err: mailroom_api::Error) -> Self {
        use mailroom_api::Error as Api;

        match err {
            Api::Unauthorized(message) => Self::Authentication(message),
            Api::NotFound(message) => Self::NotFound(message),
            Api::Rejected(message) => Self::Validation(vec![ValidationError::Rejected(message)]),
            Api::Json(e) => Self::Transport(format!("invalid response payload: {e}")),
            other @ (Api::Http(_)
            | Api::UrlError(_)
            | Api::Status { .. }
            | Api::InvalidConfig(_)) => Self::Transport(other.to_string()),
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
