//! In-memory backend shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mailroom_core::{
    AccountGateway, Draft, DraftId, Email, EmailId, EmailStatus, Error, MailboxGateway,
    MessageFields, ProfileUpdate, Registration, Result, Session, Token, UserProfile,
    ValidationError, is_blank,
};

pub const ALICE: &str = "alice@example.com";
pub const BOB: &str = "bob@example.com";
pub const PASSWORD: &str = "hunter22";

#[derive(Debug, Default)]
struct State {
    users: HashMap<String, (String, String)>,
    tokens: HashMap<String, String>,
    drafts: Vec<(String, Draft)>,
    emails: Vec<Email>,
    next_id: i64,
    calls: usize,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn owner(&self, session: &Session) -> Result<String> {
        let token = session.require()?;
        self.tokens
            .get(token.as_str())
            .cloned()
            .ok_or_else(|| Error::Authentication("invalid token".to_string()))
    }

    fn draft_index(&self, owner: &str, draft_id: DraftId) -> Result<usize> {
        self.drafts
            .iter()
            .position(|(o, d)| o == owner && d.draft_id == draft_id)
            .ok_or_else(|| Error::NotFound(format!("draft {draft_id}")))
    }

    fn deliver(&mut self, sender: &str, fields: &MessageFields) -> Result<Email> {
        let mut rejected = Vec::new();
        if is_blank(&fields.subject) {
            rejected.push(ValidationError::Rejected("Subject is required".to_string()));
        }
        if is_blank(&fields.recipient_email) {
            rejected.push(ValidationError::Rejected("Recipient is required".to_string()));
        }
        if is_blank(&fields.body) {
            rejected.push(ValidationError::Rejected("Body is required".to_string()));
        }
        if !rejected.is_empty() {
            return Err(Error::Validation(rejected));
        }

        let email = Email {
            email_id: EmailId::new(self.next_id()),
            subject: fields.subject.clone(),
            sender_email: sender.to_string(),
            recipient_email: fields.recipient_email.clone(),
            body: fields.body.clone(),
            status: EmailStatus::Sent,
            sent_date: "2026-10-18T09:00:00Z".to_string(),
        };
        self.emails.push(email.clone());
        Ok(email)
    }
}

/// A backend that keeps everything in memory and counts gateway calls.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<State>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.add_user("Alice", ALICE, PASSWORD);
        backend.add_user("Bob", BOB, PASSWORD);
        backend
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn add_user(&self, name: &str, email: &str, password: &str) {
        self.lock()
            .users
            .insert(email.to_string(), (name.to_string(), password.to_string()));
    }

    /// Returns a session already logged in as `email`.
    pub fn session_for(&self, email: &str) -> Session {
        let token = format!("token-for-{email}");
        self.lock().tokens.insert(token.clone(), email.to_string());
        Session::with_token(Token::new(token))
    }

    /// Invalidates every issued token, as an expired session would.
    pub fn expire_sessions(&self) {
        self.lock().tokens.clear();
    }

    /// Places an inbound email with a fixed identity.
    pub fn seed_email(&self, email_id: i64, from: &str, to: &str, status: EmailStatus) {
        let mut state = self.lock();
        state.next_id = state.next_id.max(email_id);
        state.emails.push(Email {
            email_id: EmailId::new(email_id),
            subject: "Hello".to_string(),
            sender_email: from.to_string(),
            recipient_email: to.to_string(),
            body: "Seeded".to_string(),
            status,
            sent_date: "2026-10-17T08:30:00Z".to_string(),
        });
    }

    /// Server-side status of an email, regardless of caller.
    pub fn status_of(&self, email_id: i64) -> Option<EmailStatus> {
        self.lock()
            .emails
            .iter()
            .find(|e| e.email_id == EmailId::new(email_id))
            .map(|e| e.status)
    }

    pub fn draft_count(&self) -> usize {
        self.lock().drafts.len()
    }

    pub fn email_count(&self) -> usize {
        self.lock().emails.len()
    }

    /// Number of gateway calls made so far.
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    fn call(&self) -> MutexGuard<'_, State> {
        let mut state = self.lock();
        state.calls += 1;
        state
    }
}

#[async_trait]
impl MailboxGateway for FakeBackend {
    async fn create_draft(&self, session: &Session, fields: &MessageFields) -> Result<Draft> {
        let mut state = self.call();
        let owner = state.owner(session)?;
        let draft = Draft {
            draft_id: DraftId::new(state.next_id()),
            fields: fields.clone(),
        };
        state.drafts.push((owner, draft.clone()));
        Ok(draft)
    }

    async fn update_draft(
        &self,
        session: &Session,
        draft_id: DraftId,
        fields: &MessageFields,
    ) -> Result<Draft> {
        let mut state = self.call();
        let owner = state.owner(session)?;
        let index = state.draft_index(&owner, draft_id)?;
        state.drafts[index].1.fields = fields.clone();
        Ok(state.drafts[index].1.clone())
    }

    async fn list_drafts(&self, session: &Session) -> Result<Vec<Draft>> {
        let state = self.call();
        let owner = state.owner(session)?;
        Ok(state
            .drafts
            .iter()
            .filter(|(o, _)| *o == owner)
            .map(|(_, d)| d.clone())
            .collect())
    }

    async fn get_draft(&self, session: &Session, draft_id: DraftId) -> Result<Draft> {
        let state = self.call();
        let owner = state.owner(session)?;
        let index = state.draft_index(&owner, draft_id)?;
        Ok(state.drafts[index].1.clone())
    }

    async fn delete_draft(&self, session: &Session, draft_id: DraftId) -> Result<()> {
        let mut state = self.call();
        let owner = state.owner(session)?;
        let index = state.draft_index(&owner, draft_id)?;
        state.drafts.remove(index);
        Ok(())
    }

    async fn send_draft(&self, session: &Session, draft_id: DraftId) -> Result<Email> {
        let mut state = self.call();
        let owner = state.owner(session)?;
        let index = state.draft_index(&owner, draft_id)?;
        let fields = state.drafts[index].1.fields.clone();
        let email = state.deliver(&owner, &fields)?;
        state.drafts.remove(index);
        Ok(email)
    }

    async fn send_email(&self, session: &Session, fields: &MessageFields) -> Result<Email> {
        let mut state = self.call();
        let owner = state.owner(session)?;
        state.deliver(&owner, fields)
    }

    async fn list_emails(&self, session: &Session) -> Result<Vec<Email>> {
        let state = self.call();
        let owner = state.owner(session)?;
        Ok(state
            .emails
            .iter()
            .filter(|e| e.sender_email == owner || e.recipient_email == owner)
            .cloned()
            .collect())
    }

    async fn open_email(&self, session: &Session, email_id: EmailId) -> Result<Email> {
        let mut state = self.call();
        let owner = state.owner(session)?;
        let email = state
            .emails
            .iter_mut()
            .find(|e| {
                e.email_id == email_id
                    && (e.sender_email == owner || e.recipient_email == owner)
            })
            .ok_or_else(|| Error::NotFound(format!("email {email_id}")))?;
        if email.status == EmailStatus::Unread {
            email.status = EmailStatus::Read;
        }
        Ok(email.clone())
    }
}

#[async_trait]
impl AccountGateway for FakeBackend {
    async fn login(&self, email: &str, password: &str) -> Result<Token> {
        let mut state = self.call();
        let valid = matches!(state.users.get(email), Some((_, stored)) if stored == password);
        if !valid {
            return Err(Error::Authentication("Invalid email or password".to_string()));
        }
        let token = format!("token-{}", state.next_id());
        state.tokens.insert(token.clone(), email.to_string());
        Ok(Token::new(token))
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        let mut state = self.call();
        if state.users.contains_key(&registration.email) {
            return Err(Error::Validation(vec![ValidationError::Rejected(
                "Email already registered".to_string(),
            )]));
        }
        state.users.insert(
            registration.email.clone(),
            (registration.name.clone(), registration.password.clone()),
        );
        Ok(())
    }

    async fn profile(&self, session: &Session) -> Result<UserProfile> {
        let state = self.call();
        let owner = state.owner(session)?;
        let (name, _) = state
            .users
            .get(&owner)
            .cloned()
            .ok_or_else(|| Error::NotFound("user".to_string()))?;
        Ok(UserProfile {
            user_id: None,
            name,
            email: owner,
        })
    }

    async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<Option<String>> {
        let mut state = self.call();
        let owner = state.owner(session)?;
        let user = state
            .users
            .get_mut(&owner)
            .ok_or_else(|| Error::NotFound("user".to_string()))?;
        user.0.clone_from(&update.name);
        if let Some(password) = &update.password {
            user.1.clone_from(password);
        }
        Ok(Some("Profile updated".to_string()))
    }

    async fn delete_account(&self, session: &Session) -> Result<Option<String>> {
        let mut state = self.call();
        let owner = state.owner(session)?;
        state.users.remove(&owner);
        state.drafts.retain(|(o, _)| *o != owner);
        state.tokens.retain(|_, user| *user != owner);
        Ok(Some("Account deleted".to_string()))
    }

    async fn logout(&self, session: &Session) -> Result<Option<String>> {
        let mut state = self.call();
        state.owner(session)?;
        let token = session.require()?.as_str().to_string();
        state.tokens.remove(&token);
        Ok(None)
    }
}
