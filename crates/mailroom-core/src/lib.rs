//! # mailroom-core
//!
//! Core business logic for the `mailroom` webmail client.
//!
//! This crate provides:
//! - **Session** - holder for the bearer token, passed explicitly to every call
//! - **Gateway** - the async contract to the remote mailbox, implemented for
//!   [`mailroom_api::ApiClient`]
//! - **Draft lifecycle** - create, update, delete, and one-way send of drafts
//! - **Mailbox read-state** - listing emails and the at-most-once
//!   `unread -> read` transition on open
//! - **Accounts** - login, registration, profile, logout
//! - **Settings** and keyring persistence of the session token

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
pub mod credentials;
pub mod drafts;
mod error;
pub mod gateway;
pub mod mailbox;
mod session;
pub mod settings;
mod validation;

pub use account::AccountManager;
pub use credentials::{CredentialError, CredentialResult};
pub use drafts::DraftManager;
pub use error::{Error, Result};
pub use gateway::{AccountGateway, MailboxGateway};
pub use mailbox::MailboxManager;
pub use session::Session;
pub use settings::{Settings, SettingsError};
pub use validation::{
    ValidationError, ValidationResult, is_blank, validate_draft, validate_login,
    validate_outgoing, validate_profile_update, validate_registration,
};

pub use mailroom_api::{
    ApiClient, ClientConfig, Draft, DraftId, Email, EmailId, EmailStatus, MessageFields,
    ProfileUpdate, Registration, Token, UserProfile,
};
