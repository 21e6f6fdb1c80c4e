//! Gateway contracts to the remote mailbox.
//!
//! The managers only talk to remote state through these traits. The HTTP
//! implementation lives on [`ApiClient`]; tests substitute in-memory fakes.

use async_trait::async_trait;
use mailroom_api::{
    ApiClient, Draft, DraftId, Email, EmailId, MessageFields, ProfileUpdate, Registration, Token,
    UserProfile,
};

use crate::error::Result;
use crate::session::Session;

/// Draft and email operations against the backend.
///
/// Every method takes the session explicitly. A session without a token
/// fails with [`crate::Error::Authentication`] before any request is made.
#[async_trait]
pub trait MailboxGateway: Send + Sync {
    /// Creates a draft and returns it with its assigned identity.
    async fn create_draft(&self, session: &Session, fields: &MessageFields) -> Result<Draft>;

    /// Replaces the content of an existing draft.
    async fn update_draft(
        &self,
        session: &Session,
        draft_id: DraftId,
        fields: &MessageFields,
    ) -> Result<Draft>;

    /// Lists the caller's drafts in server order.
    async fn list_drafts(&self, session: &Session) -> Result<Vec<Draft>>;

    /// Fetches one draft.
    async fn get_draft(&self, session: &Session, draft_id: DraftId) -> Result<Draft>;

    /// Deletes a draft.
    async fn delete_draft(&self, session: &Session, draft_id: DraftId) -> Result<()>;

    /// Sends a draft as an email and retires the draft, atomically.
    async fn send_draft(&self, session: &Session, draft_id: DraftId) -> Result<Email>;

    /// Composes and sends an email.
    async fn send_email(&self, session: &Session, fields: &MessageFields) -> Result<Email>;

    /// Lists all emails visible to the caller.
    async fn list_emails(&self, session: &Session) -> Result<Vec<Email>>;

    /// Fetches an email for viewing, moving it from `unread` to `read`.
    async fn open_email(&self, session: &Session, email_id: EmailId) -> Result<Email>;
}

/// Authentication and profile operations against the backend.
#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<Token>;

    /// Creates a new account.
    async fn register(&self, registration: &Registration) -> Result<()>;

    /// Fetches the caller's profile.
    async fn profile(&self, session: &Session) -> Result<UserProfile>;

    /// Updates the caller's profile; returns the server's message.
    async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<Option<String>>;

    /// Deletes the caller's account; returns the server's message.
    async fn delete_account(&self, session: &Session) -> Result<Option<String>>;

    /// Invalidates the session server-side; returns the server's message.
    async fn logout(&self, session: &Session) -> Result<Option<String>>;
}

#[async_trait]
impl MailboxGateway for ApiClient {
    async fn create_draft(&self, session: &Session, fields: &MessageFields) -> Result<Draft> {
        Ok(ApiClient::create_draft(self, session.require()?, fields).await?)
    }

    async fn update_draft(
        &self,
        session: &Session,
        draft_id: DraftId,
        fields: &MessageFields,
    ) -> Result<Draft> {
        Ok(ApiClient::update_draft(self, session.require()?, draft_id, fields).await?)
    }

    async fn list_drafts(&self, session: &Session) -> Result<Vec<Draft>> {
        Ok(ApiClient::list_drafts(self, session.require()?).await?)
    }

    async fn get_draft(&self, session: &Session, draft_id: DraftId) -> Result<Draft> {
        Ok(ApiClient::get_draft(self, session.require()?, draft_id).await?)
    }

    async fn delete_draft(&self, session: &Session, draft_id: DraftId) -> Result<()> {
        Ok(ApiClient::delete_draft(self, session.require()?, draft_id).await?)
    }

    async fn send_draft(&self, session: &Session, draft_id: DraftId) -> Result<Email> {
        Ok(ApiClient::send_draft(self, session.require()?, draft_id).await?)
    }

    async fn send_email(&self, session: &Session, fields: &MessageFields) -> Result<Email> {
        Ok(ApiClient::send_email(self, session.require()?, fields).await?)
    }

    async fn list_emails(&self, session: &Session) -> Result<Vec<Email>> {
        Ok(ApiClient::list_emails(self, session.require()?).await?)
    }

    async fn open_email(&self, session: &Session, email_id: EmailId) -> Result<Email> {
        Ok(ApiClient::open_email(self, session.require()?, email_id).await?)
    }
}

#[async_trait]
impl AccountGateway for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<Token> {
        Ok(ApiClient::login(self, email, password).await?)
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        Ok(ApiClient::register(self, registration).await?)
    }

    async fn profile(&self, session: &Session) -> Result<UserProfile> {
        Ok(ApiClient::profile(self, session.require()?).await?)
    }

    async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<Option<String>> {
        Ok(ApiClient::update_profile(self, session.require()?, update).await?)
    }

    async fn delete_account(&self, session: &Session) -> Result<Option<String>> {
        Ok(ApiClient::delete_account(self, session.require()?).await?)
    }

    async fn logout(&self, session: &Session) -> Result<Option<String>> {
        Ok(ApiClient::logout(self, session.require()?).await?)
    }
}
