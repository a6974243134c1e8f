//! Classification of raw user input into scheduler events
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::features::reminders::AdminCommand;

/// Prefix marking an admin command
pub const COMMAND_PREFIX: char = '!';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Blank line
    Empty,
    /// The confirmation keyword
    Confirmation,
    /// `!<token>`, prefix stripped
    Admin(AdminCommand),
    /// Anything else, trimmed but with original case
    Unrecognized(String),
}

/// Classify one line: trimmed, case-insensitive
pub fn classify_input(raw: &str, keyword: &str) -> UserInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UserInput::Empty;
    }

    let lowered = trimmed.to_lowercase();
    if let Some(token) = lowered.strip_prefix(COMMAND_PREFIX) {
        return UserInput::Admin(AdminCommand::parse(token));
    }

    if lowered == keyword.to_lowercase() {
        UserInput::Confirmation
    } else {
        UserInput::Unrecognized(trimmed.to_string())
    }
}

/// Transcript line shown locally before the input is forwarded
pub fn echo_for(input: &UserInput, keyword: &str) -> Option<String> {
    match input {
        UserInput::Empty | UserInput::Confirmation => None,
        UserInput::Admin(AdminCommand::On) => {
            Some("Admin: Command 'on' received. Activating bot.".to_string())
        }
        UserInput::Admin(AdminCommand::Off) => {
            Some("Admin: Command 'off' received. Pausing bot.".to_string())
        }
        UserInput::Admin(AdminCommand::Debug) => {
            Some("Admin: Command 'debug' received. Requesting debug info.".to_string())
        }
        UserInput::Admin(AdminCommand::Other) => {
            Some("Admin: Command 'other' received.".to_string())
        }
        UserInput::Admin(AdminCommand::Unknown(token)) => {
            Some(format!("Admin: Unrecognized command '{}'.", token))
        }
        UserInput::Unrecognized(text) => Some(format!(
            "Unrecognized input '{}'. Please type '{}' to confirm, \
             or a command starting with '{}'.",
            text, keyword, COMMAND_PREFIX
        )),
    }
}
