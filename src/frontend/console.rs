//! # Console Frontend
//!
//! Line-based stand-in for a chat window: reads user input, forwards
//! confirmations and admin commands to the scheduler, and prints every
//! notification as a timestamped transcript line.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial release replacing the desktop window

use crate::features::notifications::Notification;
use crate::features::reminders::{AdminCommand, Confirmation, FrontendLink};
use crate::features::{get_bot_version, get_features};
use crate::frontend::input::{classify_input, echo_for, UserInput};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::borrow::Cow;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, Mutex};

pub const WELCOME_MESSAGE: &str = "Welcome to GlouglouLand. I'll help you not keep dry at all!";

/// Output shared between the input loop and the notification printer
pub type SharedOutput<W> = Arc<Mutex<W>>;

pub struct ConsoleFrontend {
    keyword: String,
}

impl ConsoleFrontend {
    pub fn new(keyword: impl Into<String>) -> Self {
        ConsoleFrontend {
            keyword: keyword.into(),
        }
    }

    /// Run until `input` reaches EOF.
    ///
    /// Lines that are not valid UTF-8 are decoded lossily and handled like
    /// any other input.
    pub async fn run<R, W>(
        &self,
        link: FrontendLink,
        mut input: R,
        output: SharedOutput<W>,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let FrontendLink {
            confirmations,
            commands,
            notifications,
        } = link;

        write_line(&output, WELCOME_MESSAGE).await?;
        write_line(&output, &self.banner()).await?;

        let printer = tokio::spawn(print_notifications(notifications, output.clone()));

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .await
                .context("failed to read input")?;
            if read == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            if matches!(line, Cow::Owned(_)) {
                warn!("Input line was not valid UTF-8, invalid bytes replaced");
            }

            let parsed = classify_input(&line, &self.keyword);
            if let Some(echo) = echo_for(&parsed, &self.keyword) {
                write_line(&output, &echo).await?;
            }
            forward(parsed, &confirmations, &commands).await?;
        }

        info!("Input closed, leaving console frontend");
        printer.abort();
        Ok(())
    }

    fn banner(&self) -> String {
        let features: Vec<String> = get_features()
            .iter()
            .map(|f| format!("{} v{}", f.name, f.version))
            .collect();
        format!(
            "HydroBot v{} ({}). Type '{}' after drinking, or !on / !off / !debug.",
            get_bot_version(),
            features.join(", "),
            self.keyword
        )
    }
}

async fn forward(
    input: UserInput,
    confirmations: &mpsc::Sender<Confirmation>,
    commands: &mpsc::Sender<AdminCommand>,
) -> Result<()> {
    match input {
        UserInput::Confirmation => {
            confirmations
                .send(Confirmation)
                .await
                .context("reminder scheduler stopped")?;
        }
        UserInput::Admin(command) => {
            commands
                .send(command)
                .await
                .context("reminder scheduler stopped")?;
        }
        UserInput::Empty | UserInput::Unrecognized(_) => {}
    }
    Ok(())
}

/// Print notifications until the scheduler side closes
pub async fn print_notifications<W>(
    mut notifications: mpsc::Receiver<Notification>,
    output: SharedOutput<W>,
) where
    W: AsyncWrite + Unpin + Send + 'static,
{
    while let Some(notification) = notifications.recv().await {
        if let Err(e) = write_line(&output, &notification.text).await {
            warn!("Failed to print notification: {:#}", e);
            break;
        }
    }
    debug!("Notification channel closed");
}

async fn write_line<W>(output: &SharedOutput<W>, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let line = format_line(Local::now(), text);
    let mut out = output.lock().await;
    out.write_all(line.as_bytes())
        .await
        .context("failed to write transcript")?;
    out.flush().await.context("failed to flush transcript")?;
    Ok(())
}

/// `[HH:MM:SS] text\n`
pub fn format_line(at: DateTime<Local>, text: &str) -> String {
    format!("[{}] {}\n", at.format("%H:%M:%S"), text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notifications::NotificationKind;
    use chrono::TimeZone;

    fn output() -> SharedOutput<Vec<u8>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    async fn transcript(output: &SharedOutput<Vec<u8>>) -> String {
        String::from_utf8(output.lock().await.clone()).unwrap()
    }

    #[test]
    fn test_format_line() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).unwrap();
        assert_eq!(format_line(at, "Drink!"), "[09:05:07] Drink!\n");
    }

    #[tokio::test]
    async fn test_run_echoes_and_forwards() {
        let (link, mut scheduler_side) = channels_for_test();
        let out = output();
        let frontend = ConsoleFrontend::new("agua");

        let input: &[u8] = b"!nap\nhello\n\n";
        frontend.run(link, input, out.clone()).await.unwrap();

        let text = transcript(&out).await;
        assert!(text.contains(WELCOME_MESSAGE));
        assert!(text.contains("Type 'agua' after drinking"));
        assert!(text.contains("Admin: Unrecognized command 'nap'."));
        assert!(text.contains("Unrecognized input 'hello'."));

        assert_eq!(
            scheduler_side.commands.recv().await,
            Some(AdminCommand::Unknown("nap".to_string()))
        );
        assert!(scheduler_side.confirmations.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_run_forwards_confirmation() {
        let (link, mut scheduler_side) = channels_for_test();
        let frontend = ConsoleFrontend::new("agua");

        let input: &[u8] = b"  Agua \n";
        frontend.run(link, input, output()).await.unwrap();

        assert_eq!(scheduler_side.confirmations.recv().await, Some(Confirmation));
    }

    #[tokio::test]
    async fn test_run_survives_invalid_utf8_line() {
        let (link, mut scheduler_side) = channels_for_test();
        let out = output();
        let frontend = ConsoleFrontend::new("agua");

        let input: &[u8] = b"\xff\xfe\nagua\n";
        frontend.run(link, input, out.clone()).await.unwrap();

        assert_eq!(scheduler_side.confirmations.recv().await, Some(Confirmation));
        let text = transcript(&out).await;
        assert!(text.contains("Unrecognized input '\u{FFFD}\u{FFFD}'."));
    }

    #[tokio::test]
    async fn test_forward_fails_when_scheduler_gone() {
        let (link, scheduler_side) = channels_for_test();
        drop(scheduler_side);

        let err = forward(UserInput::Confirmation, &link.confirmations, &link.commands)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("reminder scheduler stopped"));
    }

    #[tokio::test]
    async fn test_print_notifications_in_order() {
        let (tx, rx) = mpsc::channel(4);
        let out = output();

        tx.send(Notification::new(NotificationKind::Reminder, "Drink!")).await.unwrap();
        tx.send(Notification::new(NotificationKind::Escalation, "NOW!")).await.unwrap();
        drop(tx);
        print_notifications(rx, out.clone()).await;

        let text = transcript(&out).await;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("] Drink!"));
        assert!(lines[1].ends_with("] NOW!"));
    }

    /// Scheduler-side receivers exposed for assertions
    struct SchedulerSide {
        confirmations: mpsc::Receiver<Confirmation>,
        commands: mpsc::Receiver<AdminCommand>,
        _notifications: mpsc::Sender<Notification>,
    }

    fn channels_for_test() -> (FrontendLink, SchedulerSide) {
        let (confirmation_tx, confirmation_rx) = mpsc::channel(4);
        let (command_tx, command_rx) = mpsc::channel(4);
        let (notification_tx, notification_rx) = mpsc::channel(4);
        (
            FrontendLink {
                confirmations: confirmation_tx,
                commands: command_tx,
                notifications: notification_rx,
            },
            SchedulerSide {
                confirmations: confirmation_rx,
                commands: command_rx,
                _notifications: notification_tx,
            },
        )
    }
}
