//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mailroom_core::MessageFields;

#[derive(Parser, Debug)]
#[command(name = "mailroom", author, version, about, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the backend base URL
    #[arg(long, global = true, env = "MAILROOM_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the settings file path
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not ask for confirmation before destructive operations
    #[arg(long, short, global = true)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and remember the session
    Login {
        /// Login address
        #[arg(long, short)]
        email: Option<String>,
    },

    /// Create a new account
    Register {
        /// Display name
        #[arg(long, short)]
        name: Option<String>,

        /// Login address
        #[arg(long, short)]
        email: Option<String>,
    },

    /// End the session
    Logout,

    /// Show or change the profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Manage drafts
    #[command(subcommand)]
    #[command(alias = "draft")]
    Drafts(DraftCommand),

    /// Read the mailbox
    #[command(subcommand)]
    #[command(alias = "email")]
    Emails(EmailCommand),

    /// Compose and send an email
    Send(ComposeArgs),

    /// Show or change persisted settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show the profile of the logged-in user
    Show,

    /// Change the display name and optionally the password
    Update {
        /// New display name
        #[arg(long, short)]
        name: String,

        /// Also prompt for a new password
        #[arg(long)]
        password: bool,
    },

    /// Delete the account and everything in it
    Delete,
}

#[derive(Subcommand, Debug)]
pub enum DraftCommand {
    /// List drafts
    List,

    /// Show one draft
    Show {
        /// Draft identifier
        id: i64,
    },

    /// Save a new draft
    New(ComposeArgs),

    /// Change fields of an existing draft
    Edit {
        /// Draft identifier
        id: i64,

        #[command(flatten)]
        fields: ComposeArgs,
    },

    /// Delete a draft
    Delete {
        /// Draft identifier
        id: i64,
    },

    /// Send a draft as an email
    Send {
        /// Draft identifier
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum EmailCommand {
    /// List emails
    List {
        /// Only show unread emails
        #[arg(long, short)]
        unread: bool,
    },

    /// Open an email, marking it read
    Open {
        /// Email identifier
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print current settings
    Show,

    /// Change a setting and save it
    Set {
        /// Backend base URL
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Keep the session token in the system keyring.
        ///
        /// With `false` the token only lives as long as the `login` process,
        /// so every later command runs logged out.
        #[arg(long)]
        remember_session: Option<bool>,
    },
}

/// Message fields given on the command line. Omitted fields are left
/// unchanged when editing and blank when composing.
#[derive(Args, Debug, Default)]
pub struct ComposeArgs {
    /// Subject
    #[arg(long, short)]
    pub subject: Option<String>,

    /// Recipient address
    #[arg(long, short)]
    pub to: Option<String>,

    /// Plain text body
    #[arg(long, short)]
    pub body: Option<String>,
}

impl ComposeArgs {
    /// Applies the given fields on top of `base`.
    pub fn apply(self, mut base: MessageFields) -> MessageFields {
        if let Some(subject) = self.subject {
            base.subject = subject;
        }
        if let Some(to) = self.to {
            base.recipient_email = to;
        }
        if let Some(body) = self.body {
            base.body = body;
        }
        base
    }

    pub fn into_fields(self) -> MessageFields {
        self.apply(MessageFields::default())
    }
}
