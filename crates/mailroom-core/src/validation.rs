//! Client-side validation.
//!
//! These checks only short-circuit obviously invalid submissions before a
//! round trip; the backend stays authoritative.

use mailroom_api::{MessageFields, ProfileUpdate, Registration};

/// Validation error for user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Subject, recipient and body are all blank.
    EmptyDraft,
    /// Subject is blank.
    EmptySubject,
    /// Recipient is blank.
    EmptyRecipient,
    /// Body is blank.
    EmptyBody,
    /// Display name is blank.
    EmptyName,
    /// Login address is blank.
    EmptyEmail,
    /// Login address format is invalid.
    InvalidEmail,
    /// Password is blank.
    EmptyPassword,
    /// The server rejected the submission.
    Rejected(String),
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::EmptyDraft => "At least one field must be filled to save a draft",
            Self::EmptySubject => "Subject is required",
            Self::EmptyRecipient => "Recipient is required",
            Self::EmptyBody => "Body is required",
            Self::EmptyName => "Name is required",
            Self::EmptyEmail => "Email address is required",
            Self::InvalidEmail => "Invalid email address format",
            Self::EmptyPassword => "Password is required",
            Self::Rejected(message) => message,
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyDraft => "draft",
            Self::EmptySubject => "subject",
            Self::EmptyRecipient => "recipient_email",
            Self::EmptyBody => "body",
            Self::EmptyName => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPassword => "password",
            Self::Rejected(_) => "server",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating user input.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Returns true if the value is empty after trimming whitespace.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate content for saving as a draft.
///
/// A draft is rejected only when subject, recipient and body are all blank.
///
/// # Errors
///
/// Returns `[ValidationError::EmptyDraft]` if every field is blank.
pub fn validate_draft(fields: &MessageFields) -> ValidationResult {
    if is_blank(&fields.subject) && is_blank(&fields.recipient_email) && is_blank(&fields.body) {
        Err(vec![ValidationError::EmptyDraft])
    } else {
        Ok(())
    }
}

/// Validate content for sending.
///
/// Returns `Ok(())` if valid, or every blank field.
///
/// # Errors
///
/// Returns a vector of `ValidationError` for each blank field.
pub fn validate_outgoing(fields: &MessageFields) -> ValidationResult {
    let mut errors = Vec::new();

    if is_blank(&fields.subject) {
        errors.push(ValidationError::EmptySubject);
    }
    if is_blank(&fields.recipient_email) {
        errors.push(ValidationError::EmptyRecipient);
    }
    if is_blank(&fields.body) {
        errors.push(ValidationError::EmptyBody);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate login credentials.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any field is blank.
pub fn validate_login(email: &str, password: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if is_blank(email) {
        errors.push(ValidationError::EmptyEmail);
    }
    if password.is_empty() {
        errors.push(ValidationError::EmptyPassword);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a new account registration.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_registration(registration: &Registration) -> ValidationResult {
    let mut errors = Vec::new();

    if is_blank(&registration.name) {
        errors.push(ValidationError::EmptyName);
    }

    if is_blank(&registration.email) {
        errors.push(ValidationError::EmptyEmail);
    } else if !is_valid_email(&registration.email) {
        errors.push(ValidationError::InvalidEmail);
    }

    if registration.password.is_empty() {
        errors.push(ValidationError::EmptyPassword);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a profile update.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if the name is blank or a new
/// password is given but empty.
pub fn validate_profile_update(update: &ProfileUpdate) -> ValidationResult {
    let mut errors = Vec::new();

    if is_blank(&update.name) {
        errors.push(ValidationError::EmptyName);
    }
    if update.password.as_deref().is_some_and(str::is_empty) {
        errors.push(ValidationError::EmptyPassword);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let email = email.trim();

    // Must contain exactly one @
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') || local.is_empty() {
        return false;
    }

    // Domain must contain at least one dot, with no empty labels
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}
