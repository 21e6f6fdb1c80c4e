//! Account operations: login, registration, profile and logout.

use mailroom_api::{ProfileUpdate, Registration, UserProfile};
use tracing::info;

use crate::error::Result;
use crate::gateway::AccountGateway;
use crate::session::Session;
use crate::validation::{validate_login, validate_profile_update, validate_registration};

/// Orchestrates account operations and keeps the session in step with them.
#[derive(Debug)]
pub struct AccountManager<G> {
    gateway: G,
}

impl<G: AccountGateway> AccountManager<G> {
    /// Creates a new account manager.
    #[must_use]
    pub const fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Logs in and stores the returned token in `session`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank credentials and
    /// [`crate::Error::Authentication`] for wrong ones. The session is left
    /// untouched on failure.
    pub async fn login(&self, session: &mut Session, email: &str, password: &str) -> Result<()> {
        validate_login(email, password)?;

        let token = self.gateway.login(email.trim(), password).await?;
        session.set(token);
        info!("Logged in");
        Ok(())
    }

    /// Registers a new account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is missing or the address is
    /// malformed, otherwise any gateway error.
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        validate_registration(registration)?;

        self.gateway.register(registration).await?;
        info!("Account registered");
        Ok(())
    }

    /// Fetches the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns any gateway error.
    pub async fn profile(&self, session: &Session) -> Result<UserProfile> {
        self.gateway.profile(session).await
    }

    /// Updates the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, otherwise any gateway error.
    pub async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<Option<String>> {
        validate_profile_update(update)?;

        let message = self.gateway.update_profile(session, update).await?;
        info!("Profile updated");
        Ok(message)
    }

    /// Deletes the caller's account and clears the session.
    ///
    /// # Errors
    ///
    /// Returns any gateway error; the session is kept on failure.
    pub async fn delete_account(&self, session: &mut Session) -> Result<Option<String>> {
        let message = self.gateway.delete_account(session).await?;
        session.clear();
        info!("Account deleted");
        Ok(message)
    }

    /// Logs out server-side and clears the session.
    ///
    /// # Errors
    ///
    /// Returns any gateway error; the session is kept on failure.
    pub async fn logout(&self, session: &mut Session) -> Result<Option<String>> {
        let message = self.gateway.logout(session).await?;
        session.clear();
        info!("Logged out");
        Ok(message)
    }
}
