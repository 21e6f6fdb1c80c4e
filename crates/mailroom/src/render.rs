//! Plain-text rendering of drafts, emails and profiles.

use std::fmt::Write as _;

use mailroom_core::{Draft, Email, EmailStatus, Settings, UserProfile};

/// Characters of body shown in list views.
const PREVIEW_CHARS: usize = 100;

/// Placeholder for blank fields.
const NONE: &str = "(none)";

/// First `max` characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let mut out: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        out.push_str("...");
    }
    out
}

fn or_none(value: &str) -> &str {
    if value.trim().is_empty() { NONE } else { value }
}

const fn marker(status: EmailStatus) -> char {
    match status {
        EmailStatus::Unread => '*',
        EmailStatus::Read => ' ',
        EmailStatus::Sent => '>',
    }
}

pub fn draft_list(drafts: &[Draft]) -> String {
    if drafts.is_empty() {
        return "No drafts.\n".to_string();
    }

    let mut out = String::new();
    for draft in drafts {
        let _ = writeln!(
            out,
            "[{}] {}  to: {}",
            draft.draft_id,
            or_none(draft.subject()),
            or_none(draft.recipient_email()),
        );
        if !draft.body().trim().is_empty() {
            let _ = writeln!(out, "      {}", preview(draft.body(), PREVIEW_CHARS));
        }
    }
    out
}

pub fn draft(draft: &Draft) -> String {
    format!(
        "Draft:   {}\nSubject: {}\nTo:      {}\n\n{}\n",
        draft.draft_id,
        or_none(draft.subject()),
        or_none(draft.recipient_email()),
        draft.body(),
    )
}

pub fn email_list<'a>(emails: impl IntoIterator<Item = &'a Email>) -> String {
    let mut out = String::new();
    for email in emails {
        let _ = writeln!(
            out,
            "{} [{}] {:<28} {}  {}",
            marker(email.status),
            email.email_id,
            email.correspondent(),
            or_none(&email.subject),
            email.sent_date,
        );
    }
    if out.is_empty() {
        out.push_str("No emails.\n");
    }
    out
}

pub fn email(email: &Email) -> String {
    format!(
        "Email:   {} ({})\nFrom:    {}\nTo:      {}\nDate:    {}\nSubject: {}\n\n{}\n",
        email.email_id,
        email.status,
        or_none(&email.sender_email),
        or_none(&email.recipient_email),
        email.sent_date,
        or_none(&email.subject),
        email.body,
    )
}

pub fn profile(profile: &UserProfile) -> String {
    format!("Name:  {}\nEmail: {}\n", profile.name, profile.email)
}

pub fn settings(settings: &Settings) -> String {
    format!(
        "api_url          = {}\ntimeout_secs     = {}\nremember_session = {}\n",
        settings.api_url, settings.timeout_secs, settings.remember_session,
    )
}
