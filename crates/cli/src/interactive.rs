//! User interaction utilities for the CLI.
//!
//! Responsibilities:
//! - Confirm destructive commands.
//! - Read secret values with masked input.
//! - Report whether the process is attached to a terminal.
//!
//! Does NOT handle:
//! - Deciding which commands need confirmation (callers pass `--force`).
//!
//! Invariants:
//! - Prompts never run without a terminal on stdin; callers get an error
//!   telling them which flag to pass instead.

use std::io::{IsTerminal, Read};

use anyhow::{Context, Result};
use runloop_client::ClientError;

/// True when both stdin and stdout are terminals.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Ask before deleting `item_type` `item_name`. Returns `false` when the
/// user declines.
pub fn confirm_delete(item_name: &str, item_type: &str) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(ClientError::validation(
            "force",
            format!("refusing to delete {item_type} '{item_name}' without --force when stdin is not a terminal"),
        )
        .into());
    }

    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!(
            "Are you sure you want to delete {item_type} '{item_name}'?"
        ))
        .default(false)
        .interact()
        .context("Failed to read confirmation")?;
    if !confirmed {
        eprintln!("Delete cancelled.");
    }
    Ok(confirmed)
}

/// Prompt for a secret value without echoing it.
pub fn prompt_secret(name: &str) -> Result<String> {
    if !std::io::stdin().is_terminal() {
        return Err(ClientError::validation(
            "value",
            "pass --value or --value-stdin when stdin is not a terminal",
        )
        .into());
    }

    dialoguer::Password::new()
        .with_prompt(format!("Value for secret '{name}'"))
        .allow_empty_password(false)
        .interact()
        .context("Failed to read secret value")
}

/// Read a secret value from stdin, dropping one trailing newline.
pub fn read_secret_stdin() -> Result<String> {
    let mut value = String::new();
    std::io::stdin()
        .read_to_string(&mut value)
        .context("Failed to read secret value from stdin")?;
    Ok(trim_newline(value))
}

fn trim_newline(mut value: String) -> String {
    if value.ends_with('\n') {
        value.pop();
        if value.ends_with('\r') {
            value.pop();
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_newline_keeps_inner_whitespace() {
        assert_eq!(trim_newline("s3cret\n".into()), "s3cret");
        assert_eq!(trim_newline("s3cret\r\n".into()), "s3cret");
        assert_eq!(trim_newline("two\nlines\n\n".into()), "two\nlines\n");
        assert_eq!(trim_newline(" padded ".into()), " padded ");
    }
}
