//! Interactive prompts.

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

/// Asks for confirmation unless `assume_yes` is set. Returns false when the
/// user declines or closes the prompt.
pub fn confirm(assume_yes: bool, prompt: &str) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .report(false)
        .interact_opt()?;
    Ok(answer == Some(true))
}

/// Returns `value` or asks for it.
pub fn text(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

/// Asks for a password without echoing it.
pub fn password(prompt: &str) -> Result<String> {
    Ok(Password::new().with_prompt(prompt).interact()?)
}

/// Asks for a new password twice.
pub fn new_password() -> Result<String> {
    Ok(Password::new()
        .with_prompt("New password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?)
}
