//! Email endpoints.

use reqwest::Method;
use serde::Deserialize;

use super::drafts::EmailEnvelope;
use super::{ApiClient, read_json};
use crate::error::Result;
use crate::model::{Email, EmailId, MessageFields};
use crate::token::Token;

#[derive(Debug, Deserialize)]
struct EmailsEnvelope {
    emails: Vec<Email>,
}

impl ApiClient {
    /// Composes and sends an email directly (`POST /api/emails`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Rejected`] if the server refuses the content.
    pub async fn send_email(&self, token: &Token, fields: &MessageFields) -> Result<Email> {
        let request = self
            .request(Method::POST, "api/emails", Some(token))?
            .json(fields);
        let envelope: EmailEnvelope = read_json(Self::execute(request).await?).await?;
        Ok(envelope.email)
    }

    /// Lists sent and received emails (`GET /api/emails`), unsorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a payload has an unknown status.
    pub async fn list_emails(&self, token: &Token) -> Result<Vec<Email>> {
        let request = self.request(Method::GET, "api/emails", Some(token))?;
        let envelope: EmailsEnvelope = read_json(Self::execute(request).await?).await?;
        Ok(envelope.emails)
    }

    /// Opens an email (`GET /api/emails/{id}`).
    ///
    /// This fetch is not side-effect free: the server moves an `unread`
    /// email to `read` and returns the post-transition state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the email is absent or not
    /// visible to the caller.
    pub async fn open_email(&self, token: &Token, email_id: EmailId) -> Result<Email> {
        let request = self.request(Method::GET, &format!("api/emails/{email_id}"), Some(token))?;
        let envelope: EmailEnvelope = read_json(Self::execute(request).await?).await?;
        Ok(envelope.email)
    }
}
