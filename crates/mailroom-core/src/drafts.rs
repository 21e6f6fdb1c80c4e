//! Draft lifecycle.
//!
//! Drafts are created, edited freely, and either deleted or consumed once by
//! sending them. Sending is a single remote call, so a draft is never both
//! sent and still listed.

use mailroom_api::{Draft, DraftId, Email, MessageFields};
use tracing::{debug, info};

use crate::error::Result;
use crate::gateway::MailboxGateway;
use crate::session::Session;
use crate::validation::validate_draft;

/// Orchestrates draft operations and keeps the drafts a view has seen.
#[derive(Debug)]
pub struct DraftManager<G> {
    gateway: G,
    drafts: Vec<Draft>,
}

impl<G: MailboxGateway> DraftManager<G> {
    /// Creates a manager with an empty cache.
    #[must_use]
    pub const fn new(gateway: G) -> Self {
        Self {
            gateway,
            drafts: Vec::new(),
        }
    }

    /// Returns the underlying gateway.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Drafts known to this manager, in the order last listed.
    #[must_use]
    pub fn drafts(&self) -> &[Draft] {
        &self.drafts
    }

    /// Returns a cached draft by identity.
    #[must_use]
    pub fn cached(&self, draft_id: DraftId) -> Option<&Draft> {
        self.drafts.iter().find(|d| d.draft_id == draft_id)
    }

    /// Creates a new draft.
    ///
    /// # Errors
    ///
    /// Returns a validation error without contacting the gateway if subject,
    /// recipient and body are all blank; otherwise any gateway error.
    pub async fn create(&mut self, session: &Session, fields: MessageFields) -> Result<Draft> {
        validate_draft(&fields)?;

        let draft = self.gateway.create_draft(session, &fields).await?;
        info!(draft_id = %draft.draft_id, "Draft created");
        self.remember(draft.clone());
        Ok(draft)
    }

    /// Replaces the content of an existing draft.
    ///
    /// # Errors
    ///
    /// Returns a validation error if all fields are blank, or
    /// [`crate::Error::NotFound`] if the draft is absent or not owned.
    pub async fn update(
        &mut self,
        session: &Session,
        draft_id: DraftId,
        fields: MessageFields,
    ) -> Result<Draft> {
        validate_draft(&fields)?;

        let draft = self.gateway.update_draft(session, draft_id, &fields).await?;
        info!(%draft_id, "Draft updated");
        self.remember(draft.clone());
        Ok(draft)
    }

    /// Saves compose-form content: updates when the draft already has an
    /// identity, creates it otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`] and [`Self::update`].
    pub async fn save(
        &mut self,
        session: &Session,
        draft_id: Option<DraftId>,
        fields: MessageFields,
    ) -> Result<Draft> {
        match draft_id {
            Some(id) => self.update(session, id, fields).await,
            None => self.create(session, fields).await,
        }
    }

    /// Fetches one draft.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the draft does not exist.
    pub async fn get(&mut self, session: &Session, draft_id: DraftId) -> Result<Draft> {
        let draft = self.gateway.get_draft(session, draft_id).await?;
        self.remember(draft.clone());
        Ok(draft)
    }

    /// Lists the caller's drafts in gateway order and refreshes the cache.
    ///
    /// # Errors
    ///
    /// Returns any gateway error; the cache is left untouched on failure.
    pub async fn list(&mut self, session: &Session) -> Result<&[Draft]> {
        let drafts = self.gateway.list_drafts(session).await?;
        debug!(count = drafts.len(), "Drafts listed");
        self.drafts = drafts;
        Ok(&self.drafts)
    }

    /// Deletes a draft.
    ///
    /// Deleting a draft that does not exist is an error, not a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the draft does not exist.
    pub async fn delete(&mut self, session: &Session, draft_id: DraftId) -> Result<()> {
        self.gateway.delete_draft(session, draft_id).await?;
        info!(%draft_id, "Draft deleted");
        self.forget(draft_id);
        Ok(())
    }

    /// Sends a draft as an email and retires the draft.
    ///
    /// Completeness is decided by the backend against the draft's current
    /// content, never against the cached copy, which may be stale. A
    /// rejected send leaves the draft in place.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the backend finds subject, recipient or
    /// body blank, or [`crate::Error::NotFound`] if the draft does not exist.
    pub async fn send(&mut self, session: &Session, draft_id: DraftId) -> Result<Email> {
        let email = self.gateway.send_draft(session, draft_id).await?;
        info!(%draft_id, email_id = %email.email_id, "Draft sent");
        self.forget(draft_id);
        Ok(email)
    }

    fn remember(&mut self, draft: Draft) {
        match self.drafts.iter_mut().find(|d| d.draft_id == draft.draft_id) {
            Some(existing) => *existing = draft,
            None => self.drafts.push(draft),
        }
    }

    fn forget(&mut self, draft_id: DraftId) {
        self.drafts.retain(|d| d.draft_id != draft_id);
    }
}
