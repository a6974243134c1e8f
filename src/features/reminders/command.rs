//! Admin control tokens accepted by the reminder scheduler
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::fmt;

/// Operator command, already stripped of its `!` prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    /// Resume reminders
    On,
    /// Pause reminders
    Off,
    /// Report current status
    Debug,
    /// Reserved, acknowledged without action
    Other,
    /// Anything else, kept lower-cased for reporting
    Unknown(String),
}

impl AdminCommand {
    /// Parse a bare token, case-insensitively
    pub fn parse(token: &str) -> Self {
        let token = token.trim().to_lowercase();
        match token.as_str() {
            "on" => AdminCommand::On,
            "off" => AdminCommand::Off,
            "debug" => AdminCommand::Debug,
            "other" => AdminCommand::Other,
            _ => AdminCommand::Unknown(token),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AdminCommand::On => "on",
            AdminCommand::Off => "off",
            AdminCommand::Debug => "debug",
            AdminCommand::Other => "other",
            AdminCommand::Unknown(token) => token,
        }
    }
}

impl fmt::Display for AdminCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
