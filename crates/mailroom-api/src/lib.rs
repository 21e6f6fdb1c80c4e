//! # mailroom-api
//!
//! Typed HTTP client for the mailroom webmail backend.
//!
//! ## Features
//!
//! - **Drafts**: create, update, list, fetch, delete, send a draft as an email
//! - **Emails**: send, list, open (the open call marks unread mail as read)
//! - **Users**: login, registration, profile, account deletion, logout
//! - **Typed failures**: HTTP statuses are mapped to [`Error`] variants
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailroom_api::{ApiClient, ClientConfig, MessageFields};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::new("http://localhost:3333")?)?;
//!
//!     // Exchange credentials for a bearer token
//!     let token = client.login("ana@example.com", "secret").await?;
//!
//!     // Save a draft
//!     let fields = MessageFields::new("Hi", "", "");
//!     let draft = client.create_draft(&token, &fields).await?;
//!     println!("Draft {} saved", draft.draft_id);
//!
//!     // List the mailbox
//!     for email in client.list_emails(&token).await? {
//!         println!("{} [{}]", email.subject, email.status);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod client;
mod error;
pub mod model;
pub mod token;

pub use client::{ApiClient, ClientConfig};
pub use error::{Error, Result};
pub use model::{
    Draft, DraftId, Email, EmailId, EmailStatus, MessageFields, ProfileUpdate, Registration,
    UnknownStatus, UserProfile,
};
pub use token::Token;
