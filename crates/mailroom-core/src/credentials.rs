//! Secure session token storage using system keyring.
//!
//! Keeps the bearer token between runs using the platform's native
//! credential storage:
//! - Linux: Secret Service (GNOME Keyring, `KWallet`)
//! - macOS: Keychain
//! - Windows: Credential Manager
//!
//! Tokens are keyed by API base URL so several backends can be used side by side.

use keyring::Entry;
use mailroom_api::Token;
use tracing::{debug, warn};

/// Service name used for keyring entries.
const SERVICE_NAME: &str = "mailroom";

/// Credential type identifier for session tokens.
const SESSION_CREDENTIAL: &str = "session";

/// Error type for credential operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Failed to access keyring.
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type for credential operations.
pub type CredentialResult<T> = std::result::Result<T, CredentialError>;

/// Generates the keyring entry key for a backend.
fn credential_key(api_url: &str) -> String {
    format!("{SERVICE_NAME}_{SESSION_CREDENTIAL}_{}", api_url.trim_end_matches('/'))
}

/// Stores the session token securely in the system keyring.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn store_session_token(api_url: &str, token: &Token) -> CredentialResult<()> {
    let entry = Entry::new(SERVICE_NAME, &credential_key(api_url))?;
    entry.set_password(token.as_str())?;
    debug!("Stored session token for {api_url}");
    Ok(())
}

/// Retrieves the session token from the system keyring.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn load_session_token(api_url: &str) -> CredentialResult<Option<Token>> {
    let entry = Entry::new(SERVICE_NAME, &credential_key(api_url))?;
    match entry.get_password() {
        Ok(token) => Ok(Some(Token::new(token))),
        Err(keyring::Error::NoEntry) => {
            debug!("No session token found for {api_url}");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Deletes the session token from the keyring.
///
/// A missing entry is not an error.
///
/// # Errors
///
/// Returns an error if the keyring operation fails (except for missing entries).
pub fn delete_session_token(api_url: &str) -> CredentialResult<()> {
    let entry = Entry::new(SERVICE_NAME, &credential_key(api_url))?;
    match entry.delete_credential() {
        Ok(()) => {
            debug!("Deleted session token for {api_url}");
            Ok(())
        }
        Err(keyring::Error::NoEntry) => {
            debug!("No session token to delete for {api_url}");
            Ok(())
        }
        Err(e) => {
            warn!("Failed to delete session token: {e}");
            Err(e.into())
        }
    }
}
