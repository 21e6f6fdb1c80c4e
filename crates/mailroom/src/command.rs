//! Command execution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mailroom_core::{
    AccountManager, ApiClient, DraftId, DraftManager, EmailId, MailboxManager, MessageFields,
    ProfileUpdate, Registration, Session, Settings, credentials, validate_outgoing,
};
use tracing::{debug, warn};

use crate::cli::{Cli, Command, ConfigCommand, DraftCommand, EmailCommand, ProfileCommand};
use crate::{prompt, render};

/// Everything a command needs: settings, the HTTP client and the session.
pub struct App {
    settings: Settings,
    settings_path: PathBuf,
    client: ApiClient,
    session: Session,
    assume_yes: bool,
}

impl App {
    /// Loads settings, applies overrides and restores a remembered session.
    pub async fn load(cli: &Cli) -> Result<Self> {
        let settings_path = cli.config.clone().unwrap_or_else(Settings::default_path);
        let mut settings = Settings::load(&settings_path)
            .await
            .with_context(|| format!("cannot load settings from {}", settings_path.display()))?;
        if let Some(api_url) = &cli.api_url {
            settings.api_url.clone_from(api_url);
        }

        let client = ApiClient::new(settings.client_config()?)?;
        debug!("Using backend {}", client.base_url());

        let mut session = Session::new();
        if settings.remember_session {
            match credentials::load_session_token(&settings.api_url) {
                Ok(Some(token)) => session.set(token),
                Ok(None) => {}
                Err(e) => warn!("Could not read stored session: {e}"),
            }
        }

        Ok(Self {
            settings,
            settings_path,
            client,
            session,
            assume_yes: cli.yes,
        })
    }

    /// Forgets the stored session, locally and in the keyring.
    pub fn forget_session(&mut self) {
        self.session.clear();
        if let Err(e) = credentials::delete_session_token(&self.settings.api_url) {
            warn!("Could not remove stored session: {e}");
        }
    }

    fn remember_session(&self) {
        if !self.settings.remember_session {
            return;
        }
        if let Some(token) = self.session.get()
            && let Err(e) = credentials::store_session_token(&self.settings.api_url, token)
        {
            warn!("Could not store session, you will need to log in again: {e}");
        }
    }

    fn accounts(&self) -> AccountManager<ApiClient> {
        AccountManager::new(self.client.clone())
    }

    fn drafts(&self) -> DraftManager<ApiClient> {
        DraftManager::new(self.client.clone())
    }

    fn mailbox(&self) -> MailboxManager<ApiClient> {
        MailboxManager::new(self.client.clone())
    }

    /// Runs one command.
    pub async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Login { email } => self.login(email).await,
            Command::Register { name, email } => self.register(name, email).await,
            Command::Logout => self.logout().await,
            Command::Profile(cmd) => self.profile(cmd).await,
            Command::Drafts(cmd) => self.draft(cmd).await,
            Command::Emails(cmd) => self.email(cmd).await,
            Command::Send(args) => {
                let fields = args.into_fields();
                ready_to_send(&fields)?;
                if !prompt::confirm(
                    self.assume_yes,
                    &format!("Send \"{}\" to {}?", fields.subject, fields.recipient_email),
                )? {
                    return Ok(());
                }
                let email = self.mailbox().send(&self.session, fields).await?;
                println!("Email {} sent.", email.email_id);
                Ok(())
            }
            Command::Config(cmd) => self.config(cmd).await,
        }
    }

    async fn login(&mut self, email: Option<String>) -> Result<()> {
        let email = prompt::text(email, "Email")?;
        let password = prompt::password("Password")?;

        self.accounts()
            .login(&mut self.session, &email, &password)
            .await?;
        self.remember_session();
        println!("Logged in as {}.", email.trim());
        Ok(())
    }

    async fn register(&self, name: Option<String>, email: Option<String>) -> Result<()> {
        let name = prompt::text(name, "Name")?;
        let email = prompt::text(email, "Email")?;
        let password = prompt::new_password()?;

        self.accounts()
            .register(&Registration::new(name, email, password))
            .await?;
        println!("Account created. Log in with `mailroom login`.");
        Ok(())
    }

    async fn logout(&mut self) -> Result<()> {
        let message = self.accounts().logout(&mut self.session).await?;
        self.forget_session();
        println!("{}", message.as_deref().unwrap_or("Logged out."));
        Ok(())
    }

    async fn profile(&mut self, command: ProfileCommand) -> Result<()> {
        match command {
            ProfileCommand::Show => {
                let profile = self.accounts().profile(&self.session).await?;
                print!("{}", render::profile(&profile));
            }
            ProfileCommand::Update { name, password } => {
                let mut update = ProfileUpdate::rename(name);
                if password {
                    update = update.with_password(prompt::new_password()?);
                }
                let message = self.accounts().update_profile(&self.session, &update).await?;
                println!("{}", message.as_deref().unwrap_or("Profile updated."));
            }
            ProfileCommand::Delete => {
                if !prompt::confirm(
                    self.assume_yes,
                    "Delete your account? This cannot be undone.",
                )? {
                    return Ok(());
                }
                let message = self.accounts().delete_account(&mut self.session).await?;
                self.forget_session();
                println!("{}", message.as_deref().unwrap_or("Account deleted."));
            }
        }
        Ok(())
    }

    async fn draft(&self, command: DraftCommand) -> Result<()> {
        let mut drafts = self.drafts();
        match command {
            DraftCommand::List => {
                let listed = drafts.list(&self.session).await?;
                print!("{}", render::draft_list(listed));
            }
            DraftCommand::Show { id } => {
                let draft = drafts.get(&self.session, DraftId::new(id)).await?;
                print!("{}", render::draft(&draft));
            }
            DraftCommand::New(args) => {
                let draft = drafts.save(&self.session, None, args.into_fields()).await?;
                println!("Draft {} saved.", draft.draft_id);
            }
            DraftCommand::Edit { id, fields } => {
                let draft_id = DraftId::new(id);
                let current = drafts.get(&self.session, draft_id).await?;
                let draft = drafts
                    .save(&self.session, Some(draft_id), fields.apply(current.fields))
                    .await?;
                println!("Draft {} saved.", draft.draft_id);
            }
            DraftCommand::Delete { id } => {
                if !prompt::confirm(self.assume_yes, &format!("Delete draft {id}?"))? {
                    return Ok(());
                }
                drafts.delete(&self.session, DraftId::new(id)).await?;
                println!("Draft {id} deleted.");
            }
            DraftCommand::Send { id } => {
                let draft_id = DraftId::new(id);
                let draft = drafts.get(&self.session, draft_id).await?;
                ready_to_send(&draft.fields)?;
                if !prompt::confirm(
                    self.assume_yes,
                    &format!("Send draft {id} to {}?", draft.recipient_email()),
                )? {
                    return Ok(());
                }
                let email = drafts.send(&self.session, draft_id).await?;
                println!("Draft {id} sent as email {}.", email.email_id);
            }
        }
        Ok(())
    }

    async fn email(&self, command: EmailCommand) -> Result<()> {
        let mut mailbox = self.mailbox();
        match command {
            EmailCommand::List { unread } => {
                let emails = mailbox.list(&self.session).await?;
                print!(
                    "{}",
                    render::email_list(emails.iter().filter(|e| !unread || e.is_unread()))
                );
                println!("{} unread.", mailbox.unread_count());
            }
            EmailCommand::Open { id } => {
                let email = mailbox.open(&self.session, EmailId::new(id)).await?;
                print!("{}", render::email(&email));
            }
        }
        Ok(())
    }

    async fn config(&mut self, command: ConfigCommand) -> Result<()> {
        match command {
            ConfigCommand::Show => {
                println!("# {}", self.settings_path.display());
                print!("{}", render::settings(&self.settings));
            }
            ConfigCommand::Set {
                url,
                timeout_secs,
                remember_session,
            } => {
                if let Some(url) = url {
                    self.settings.api_url = url;
                }
                if let Some(timeout_secs) = timeout_secs {
                    self.settings.timeout_secs = timeout_secs;
                }
                if let Some(remember_session) = remember_session {
                    self.settings.remember_session = remember_session;
                }
                self.settings.client_config()?;
                save(&self.settings, &self.settings_path).await?;
                print!("{}", render::settings(&self.settings));
            }
        }
        Ok(())
    }
}

/// Whether a failed command means the remembered session is no longer valid.
///
/// A failed login says nothing about a token saved by an earlier one.
#[must_use]
pub fn session_lost(err: &anyhow::Error, during_login: bool) -> bool {
    !during_login
        && err
            .downcast_ref::<mailroom_core::Error>()
            .is_some_and(mailroom_core::Error::is_authentication)
}

/// Rejects incomplete messages before the user is asked to confirm sending.
fn ready_to_send(fields: &MessageFields) -> Result<()> {
    validate_outgoing(fields).map_err(mailroom_core::Error::from)?;
    Ok(())
}

async fn save(settings: &Settings, path: &Path) -> Result<()> {
    settings
        .save(path)
        .await
        .with_context(|| format!("cannot save settings to {}", path.display()))
}
