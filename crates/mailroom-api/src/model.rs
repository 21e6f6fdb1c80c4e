//! Wire and domain types shared by the client and the core services.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Backend-assigned draft identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(pub i64);

impl DraftId {
    /// Create a new draft ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend-assigned email identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailId(pub i64);

impl EmailId {
    /// Create a new email ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user-editable part of a message: subject, recipient and body.
///
/// This is the request body of draft creation and direct send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageFields {
    /// Message subject.
    #[serde(default, deserialize_with = "nullable_string")]
    pub subject: String,
    /// Recipient address (not validated as an address by the client).
    #[serde(default, deserialize_with = "nullable_string")]
    pub recipient_email: String,
    /// Plain text body.
    #[serde(default, deserialize_with = "nullable_string")]
    pub body: String,
}

impl MessageFields {
    /// Creates message fields.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        recipient_email: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            recipient_email: recipient_email.into(),
            body: body.into(),
        }
    }

    /// Sets the subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the recipient address.
    #[must_use]
    pub fn with_recipient(mut self, recipient_email: impl Into<String>) -> Self {
        self.recipient_email = recipient_email.into();
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// A saved, unsent message owned by the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Unique identifier.
    pub draft_id: DraftId,
    /// Draft content.
    #[serde(flatten)]
    pub fields: MessageFields,
}

impl Draft {
    /// Draft subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.fields.subject
    }

    /// Draft recipient.
    #[must_use]
    pub fn recipient_email(&self) -> &str {
        &self.fields.recipient_email
    }

    /// Draft body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.fields.body
    }
}

/// Status of an email from the point of view of the authenticated user.
///
/// `Unread` may become `Read`; `Read` and `Sent` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum EmailStatus {
    /// Outbound mail sent by the user.
    Sent,
    /// Inbound mail that has been opened.
    Read,
    /// Inbound mail not yet opened.
    Unread,
}

/// Error for a status string outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown email status: {0:?}")]
pub struct UnknownStatus(pub String);

impl EmailStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Read => "read",
            Self::Unread => "unread",
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Sent | Self::Read)
    }

    /// Returns true if a status may move from `self` to `next`.
    ///
    /// Only the identity transition and `Unread -> Read` are allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Sent, Self::Sent)
                | (Self::Read, Self::Read)
                | (Self::Unread, Self::Unread | Self::Read)
        )
    }

    /// Applies a server-observed status to a known one.
    ///
    /// Returns `observed` when the transition is allowed, otherwise keeps
    /// `self` so a cached status never regresses.
    #[must_use]
    pub fn merge(self, observed: Self) -> Self {
        if self.can_transition_to(observed) {
            observed
        } else {
            warn!(
                known = self.as_str(),
                observed = observed.as_str(),
                "Ignoring email status regression"
            );
            self
        }
    }
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(Self::Sent),
            "read" => Ok(Self::Read),
            "unread" => Ok(Self::Unread),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for EmailStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().inspect_err(|e| warn!("Rejecting email payload: {e}"))
    }
}

/// A sent message with its read state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    /// Unique identifier.
    pub email_id: EmailId,
    /// Message subject.
    #[serde(default, deserialize_with = "nullable_string")]
    pub subject: String,
    /// Sender address.
    #[serde(default, deserialize_with = "nullable_string")]
    pub sender_email: String,
    /// Recipient address.
    #[serde(default, deserialize_with = "nullable_string")]
    pub recipient_email: String,
    /// Plain text body.
    #[serde(default, deserialize_with = "nullable_string")]
    pub body: String,
    /// Read state.
    pub status: EmailStatus,
    /// Send date as an opaque display string.
    #[serde(default, deserialize_with = "nullable_string")]
    pub sent_date: String,
}

impl Email {
    /// Returns the subject, recipient and body of this email.
    #[must_use]
    pub fn fields(&self) -> MessageFields {
        MessageFields::new(&self.subject, &self.recipient_email, &self.body)
    }

    /// Returns true if this email has not been opened yet.
    #[must_use]
    pub fn is_unread(&self) -> bool {
        self.status == EmailStatus::Unread
    }

    /// The other party: the sender, or the recipient when no sender is known.
    #[must_use]
    pub fn correspondent(&self) -> &str {
        if self.sender_email.is_empty() {
            &self.recipient_email
        } else {
            &self.sender_email
        }
    }
}

/// Profile of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique identifier, when the backend exposes it.
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Display name.
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    /// Login address.
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
}

/// New account registration.
#[derive(Clone, Serialize)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Login address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl Registration {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Profile update; a missing password leaves it unchanged.
#[derive(Clone, Serialize)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: String,
    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProfileUpdate {
    /// Creates a profile update that only renames the user.
    #[must_use]
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: None,
        }
    }

    /// Also changes the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

impl fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileUpdate")
            .field("name", &self.name)
            .field("password_changed", &self.password.is_some())
            .finish()
    }
}

/// Treats `null` like a missing string.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use EmailStatus::{Read, Sent, Unread};

        assert!(Unread.can_transition_to(Read));
        assert!(Unread.can_transition_to(Unread));
        assert!(Read.can_transition_to(Read));
        assert!(Sent.can_transition_to(Sent));

        assert!(!Read.can_transition_to(Unread));
        assert!(!Sent.can_transition_to(Read));
        assert!(!Sent.can_transition_to(Unread));
        assert!(!Unread.can_transition_to(Sent));
        assert!(!Read.can_transition_to(Sent));
    }

    #[test]
    fn test_status_merge_never_regresses() {
        use EmailStatus::{Read, Sent, Unread};

        assert_eq!(Unread.merge(Read), Read);
        assert_eq!(Read.merge(Unread), Read);
        assert_eq!(Sent.merge(Read), Sent);
        assert_eq!(Sent.merge(Unread), Sent);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(EmailStatus::Sent.is_terminal());
        assert!(EmailStatus::Read.is_terminal());
        assert!(!EmailStatus::Unread.is_terminal());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{"emailId":1,"subject":"s","senderEmail":"a@b.c",
            "recipientEmail":"d@e.f","body":"b","status":"archived","sentDate":"01-02-2024"}"#;
        let err = serde_json::from_str::<Email>(json).unwrap_err();
        assert!(err.to_string().contains("unknown email status"));
    }

    #[test]
    fn test_email_round_trips_camel_case() {
        let json = r#"{"emailId":42,"subject":"Hi","senderEmail":"a@b.com",
            "recipientEmail":"c@d.com","body":"Hello","status":"unread","sentDate":"18-10-2026"}"#;
        let email: Email = serde_json::from_str(json).unwrap();
        assert_eq!(email.email_id, EmailId::new(42));
        assert_eq!(email.status, EmailStatus::Unread);
        assert_eq!(email.sent_date, "18-10-2026");

        let value = serde_json::to_value(&email).unwrap();
        assert_eq!(value["status"], "unread");
        assert_eq!(value["recipientEmail"], "c@d.com");
    }

    #[test]
    fn test_draft_accepts_null_fields() {
        let json = r#"{"draftId":7,"subject":"Hi","recipientEmail":null,"body":null}"#;
        let draft: Draft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.draft_id, DraftId::new(7));
        assert_eq!(draft.subject(), "Hi");
        assert_eq!(draft.recipient_email(), "");
        assert_eq!(draft.body(), "");
    }

    #[test]
    fn test_message_fields_wire_names() {
        let fields = MessageFields::new("s", "r@x.io", "b");
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"subject": "s", "recipientEmail": "r@x.io", "body": "b"})
        );
    }

    #[test]
    fn test_correspondent_falls_back_to_recipient() {
        let json = r#"{"emailId":1,"recipientEmail":"to@x.io","status":"sent"}"#;
        let email: Email = serde_json::from_str(json).unwrap();
        assert_eq!(email.correspondent(), "to@x.io");
    }

    #[test]
    fn test_profile_accepts_id_alias() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id":3,"name":"Ana","email":"ana@x.io"}"#).unwrap();
        assert_eq!(profile.user_id, Some(3));
    }

    #[test]
    fn test_secrets_not_in_debug() {
        let registration = Registration::new("Ana", "ana@x.io", "hunter2");
        assert!(!format!("{registration:?}").contains("hunter2"));

        let update = ProfileUpdate::rename("Ana").with_password("hunter2");
        assert!(!format!("{update:?}").contains("hunter2"));
    }
}
