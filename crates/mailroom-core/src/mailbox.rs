//! Mailbox read state.
//!
//! Opening an email is a fetch that mutates: the backend moves an `unread`
//! email to `read` as part of the fetch. There is no peek. The cached list
//! is updated from the result of [`MailboxManager::open`] and never changes
//! status on its own.

use mailroom_api::{Email, EmailId, EmailStatus, MessageFields};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::gateway::MailboxGateway;
use crate::session::Session;
use crate::validation::validate_outgoing;

/// Orchestrates email operations and keeps the mailbox a view has seen.
#[derive(Debug)]
pub struct MailboxManager<G> {
    gateway: G,
    emails: Vec<Email>,
}

impl<G: MailboxGateway> MailboxManager<G> {
    /// Creates a manager with an empty cache.
    #[must_use]
    pub const fn new(gateway: G) -> Self {
        Self {
            gateway,
            emails: Vec::new(),
        }
    }

    /// Returns the underlying gateway.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Emails known to this manager, in the order last listed.
    #[must_use]
    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    /// Returns a cached email by identity.
    #[must_use]
    pub fn cached(&self, email_id: EmailId) -> Option<&Email> {
        self.emails.iter().find(|e| e.email_id == email_id)
    }

    /// Number of cached emails still unread.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.emails.iter().filter(|e| e.is_unread()).count()
    }

    /// Composes and sends an email.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming every blank field (no gateway call),
    /// otherwise any gateway error.
    pub async fn send(&mut self, session: &Session, fields: MessageFields) -> Result<Email> {
        validate_outgoing(&fields)?;

        let email = self.gateway.send_email(session, &fields).await?;
        if email.status != EmailStatus::Sent {
            warn!(email_id = %email.email_id, status = %email.status, "Sent email has unexpected status");
        }
        info!(email_id = %email.email_id, "Email sent");
        self.remember(email.clone());
        Ok(email)
    }

    /// Lists all emails visible to the caller and refreshes the cache.
    ///
    /// A cached status is never regressed by a listed one.
    ///
    /// # Errors
    ///
    /// Returns any gateway error; the cache is left untouched on failure.
    pub async fn list(&mut self, session: &Session) -> Result<&[Email]> {
        let mut emails = self.gateway.list_emails(session).await?;
        for email in &mut emails {
            if let Some(known) = self.cached(email.email_id) {
                email.status = known.status.merge(email.status);
            }
        }
        debug!(count = emails.len(), "Emails listed");
        self.emails = emails;
        Ok(&self.emails)
    }

    /// Opens an email for viewing.
    ///
    /// An `unread` email becomes `read` as part of this call; `read` and
    /// `sent` emails come back unchanged. Calling it again is a no-op
    /// transition, including when two calls race.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the email does not exist or is
    /// not visible to the caller.
    pub async fn open(&mut self, session: &Session, email_id: EmailId) -> Result<Email> {
        let mut email = self.gateway.open_email(session, email_id).await?;

        if let Some(known) = self.cached(email_id) {
            let previous = known.status;
            email.status = previous.merge(email.status);
            if previous == EmailStatus::Unread && email.status == EmailStatus::Read {
                info!(%email_id, "Email marked read");
            }
        }

        self.remember(email.clone());
        Ok(email)
    }

    fn remember(&mut self, email: Email) {
        match self.emails.iter_mut().find(|e| e.email_id == email.email_id) {
            Some(existing) => *existing = email,
            None => self.emails.push(email),
        }
    }
}
