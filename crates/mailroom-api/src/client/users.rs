//! Authentication and user profile endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ApiClient, read_json, read_message};
use crate::error::Result;
use crate::model::{ProfileUpdate, Registration, UserProfile};
use crate::token::{Token, TokenResponse};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// The profile endpoint answers either `{"user": {...}}` or the bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProfileEnvelope {
    Wrapped { user: UserProfile },
    Bare(UserProfile),
}

impl ProfileEnvelope {
    fn into_profile(self) -> UserProfile {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

impl ApiClient {
    /// Exchanges credentials for a bearer token (`POST /api/login`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Unauthorized`] for wrong credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<Token> {
        let request = self
            .request(Method::POST, "api/login", None)?
            .json(&LoginRequest { email, password });
        let response: TokenResponse = read_json(Self::execute(request).await?).await?;
        debug!("Login succeeded");
        Ok(response.token)
    }

    /// Creates a new account (`POST /api/users`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Rejected`] if the server refuses the registration.
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        let request = self
            .request(Method::POST, "api/users", None)?
            .json(registration);
        Self::execute(request).await?;
        Ok(())
    }

    /// Fetches the caller's profile (`GET /api/users`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is invalid.
    pub async fn profile(&self, token: &Token) -> Result<UserProfile> {
        let request = self.request(Method::GET, "api/users", Some(token))?;
        let envelope: ProfileEnvelope = read_json(Self::execute(request).await?).await?;
        Ok(envelope.into_profile())
    }

    /// Updates the caller's name and optionally password (`PUT /api/users`).
    ///
    /// Returns the server's confirmation message, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_profile(
        &self,
        token: &Token,
        update: &ProfileUpdate,
    ) -> Result<Option<String>> {
        let request = self
            .request(Method::PUT, "api/users", Some(token))?
            .json(update);
        read_message(Self::execute(request).await?).await
    }

    /// Deletes the caller's account (`DELETE /api/users`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_account(&self, token: &Token) -> Result<Option<String>> {
        let request = self.request(Method::DELETE, "api/users", Some(token))?;
        read_message(Self::execute(request).await?).await
    }

    /// Invalidates the token server-side (`POST /api/logout`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn logout(&self, token: &Token) -> Result<Option<String>> {
        let request = self.request(Method::POST, "api/logout", Some(token))?;
        read_message(Self::execute(request).await?).await
    }
}
