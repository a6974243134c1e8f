//! # Feature: Notification Sinks
//!
//! Outbound notification events and the fire-and-forget sinks that surface
//! alerts outside the transcript. Sinks never report back to the caller:
//! dispatch failures are logged and dropped.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with notify-send desktop sink and log sink

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::fmt;
use tokio::process::Command;

/// Desktop helper invoked for alerts
pub const NOTIFY_SEND_COMMAND: &str = "notify-send";

/// Title used for first-tier reminders
pub const REMINDER_TITLE: &str = "💧 Time to Hydrate!";

/// Title used for escalated reminders
pub const ESCALATION_TITLE: &str = "HydroBot Escalation!";

/// What produced an outbound notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Normal reminder tick
    Reminder,
    /// Reminder tick while escalated
    Escalation,
    /// Reply to a hydration confirmation
    Acknowledgement,
    /// Reply to an admin command
    Control,
    /// Debug status report
    Status,
}

impl NotificationKind {
    /// Title for the external sink; `None` means transcript only
    pub fn alert_title(&self) -> Option<&'static str> {
        match self {
            NotificationKind::Reminder => Some(REMINDER_TITLE),
            NotificationKind::Escalation => Some(ESCALATION_TITLE),
            NotificationKind::Acknowledgement
            | NotificationKind::Control
            | NotificationKind::Status => None,
        }
    }
}

/// Event sent from the scheduler to the frontend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, text: impl Into<String>) -> Self {
        Notification {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Side channel that surfaces a titled alert to the user.
///
/// Implementations must return immediately; the scheduler never waits on them.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

/// Sends alerts through `notify-send` on a background task
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    command: String,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        DesktopNotifier {
            command: NOTIFY_SEND_COMMAND.to_string(),
        }
    }

    /// Use a different executable with the same `<title> <message>` arguments
    pub fn with_command(command: impl Into<String>) -> Self {
        DesktopNotifier {
            command: command.into(),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        DesktopNotifier::new()
    }
}

impl NotificationSink for DesktopNotifier {
    fn notify(&self, title: &str, message: &str) {
        let command = self.command.clone();
        let title = title.to_string();
        let message = message.to_string();

        tokio::spawn(async move {
            match send_desktop_notification(&command, &title, &message).await {
                Ok(()) => debug!("Desktop notification sent: {}", title),
                Err(e) => warn!("Failed to send notification: {:#}", e),
            }
        });
    }
}

async fn send_desktop_notification(command: &str, title: &str, message: &str) -> Result<()> {
    let status = Command::new(command)
        .arg(title)
        .arg(message)
        .kill_on_drop(true)
        .status()
        .await
        .with_context(|| format!("could not run {}", command))?;

    if !status.success() {
        return Err(anyhow!("{} exited with {}", command, status));
    }
    Ok(())
}

/// Writes alerts to the log only, for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, title: &str, message: &str) {
        info!("[{}] {}", title, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ticks_have_alert_titles() {
        assert_eq!(NotificationKind::Reminder.alert_title(), Some(REMINDER_TITLE));
        assert_eq!(
            NotificationKind::Escalation.alert_title(),
            Some("HydroBot Escalation!")
        );
        assert_eq!(NotificationKind::Acknowledgement.alert_title(), None);
        assert_eq!(NotificationKind::Control.alert_title(), None);
        assert_eq!(NotificationKind::Status.alert_title(), None);
    }

    #[test]
    fn test_notification_displays_text() {
        let n = Notification::new(NotificationKind::Reminder, "Drink!");
        assert_eq!(n.to_string(), "Drink!");
    }

    #[tokio::test]
    async fn test_missing_binary_is_reported() {
        let err = send_desktop_notification("hydrobot-no-such-notifier", "title", "message")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("could not run hydrobot-no-such-notifier"));
    }

    #[tokio::test]
    async fn test_failing_command_is_reported() {
        let err = send_desktop_notification("false", "title", "message")
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("false exited with"));
    }

    #[tokio::test]
    async fn test_successful_command() {
        assert!(send_desktop_notification("true", "title", "message").await.is_ok());
    }
}
