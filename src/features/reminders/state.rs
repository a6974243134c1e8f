//! # Reminder State Machine
//!
//! Mode / Active / Interval bookkeeping for the scheduler. Every inbound event
//! maps to one [`Step`]: an optional outbound notification plus what to do with
//! the timer. Nothing here touches a runtime, so transitions are tested
//! directly.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::core::Intervals;
use crate::features::get_bot_version;
use crate::features::messages::{MessageCatalog, MessageList};
use crate::features::notifications::{Notification, NotificationKind};
use crate::features::reminders::AdminCommand;
use log::debug;
use rand::Rng;
use std::fmt;
use std::time::Duration;

pub const ACTIVATED_MESSAGE: &str = "Hello! GlouglouBot is now active.";
pub const PAUSED_MESSAGE: &str = "GlouglouBot is going to sleep. No more reminders for now.";
pub const OTHER_COMMAND_MESSAGE: &str =
    "Received 'other' command. (No specific action defined yet)";
pub const UNHANDLED_COMMAND_MESSAGE: &str = "Received an unhandled admin command.";

/// Reminder urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Escalated,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "normal"),
            Mode::Escalated => write!(f, "escalated"),
        }
    }
}

/// Observable state derived from (Mode, Active)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NormalActive,
    EscalatedActive,
    Paused,
}

/// What the scheduler must do with its timer after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Cancel any pending firing and arm for the given duration
    Rearm(Duration),
    /// Cancel any pending firing without re-arming
    Stop,
    /// Leave the timer untouched
    Keep,
}

/// Result of handling one inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub notification: Option<Notification>,
    pub timer: TimerAction,
}

impl Step {
    fn new(notification: Option<Notification>, timer: TimerAction) -> Self {
        Step {
            notification,
            timer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderState {
    mode: Mode,
    active: bool,
    interval: Duration,
    intervals: Intervals,
}

impl ReminderState {
    /// Initial state: Normal, active, normal interval
    pub fn new(intervals: Intervals) -> Self {
        ReminderState {
            mode: Mode::Normal,
            active: true,
            interval: intervals.normal,
            intervals,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn intervals(&self) -> Intervals {
        self.intervals
    }

    pub fn phase(&self) -> Phase {
        match (self.active, self.mode) {
            (false, _) => Phase::Paused,
            (true, Mode::Normal) => Phase::NormalActive,
            (true, Mode::Escalated) => Phase::EscalatedActive,
        }
    }

    /// User confirmed hydration: always back to Normal-Active
    pub fn on_confirmation<R: Rng>(&mut self, catalog: &MessageCatalog, rng: &mut R) -> Step {
        let text = catalog.pick(MessageList::Confirmation, rng).to_string();

        self.interval = self.intervals.normal;
        self.mode = Mode::Normal;
        self.active = true;
        debug!("Confirmation received, back to normal cadence");

        Step::new(
            Some(Notification::new(NotificationKind::Acknowledgement, text)),
            TimerAction::Rearm(self.intervals.normal),
        )
    }

    pub fn on_command(&mut self, command: &AdminCommand) -> Step {
        match command {
            AdminCommand::On => {
                // Mode is deliberately left alone
                self.active = true;
                debug!("Reminders activated (mode: {})", self.mode);
                Step::new(
                    Some(control(ACTIVATED_MESSAGE)),
                    TimerAction::Rearm(self.intervals.normal),
                )
            }
            AdminCommand::Off => {
                self.active = false;
                debug!("Reminders paused");
                Step::new(Some(control(PAUSED_MESSAGE)), TimerAction::Stop)
            }
            AdminCommand::Debug => Step::new(
                Some(Notification::new(NotificationKind::Status, self.status_line())),
                TimerAction::Keep,
            ),
            AdminCommand::Other => {
                Step::new(Some(control(OTHER_COMMAND_MESSAGE)), TimerAction::Keep)
            }
            AdminCommand::Unknown(token) => {
                debug!("Unhandled admin command '{}'", token);
                Step::new(Some(control(UNHANDLED_COMMAND_MESSAGE)), TimerAction::Keep)
            }
        }
    }

    pub fn on_timer_expired<R: Rng>(&mut self, catalog: &MessageCatalog, rng: &mut R) -> Step {
        if !self.active {
            // Paused: tick silently on the last interval
            return Step::new(None, TimerAction::Rearm(self.interval));
        }

        let (kind, list) = match self.mode {
            Mode::Normal => (NotificationKind::Reminder, MessageList::Reminder),
            Mode::Escalated => (NotificationKind::Escalation, MessageList::Escalation),
        };
        let text = catalog.pick(list, rng).to_string();

        self.interval = self.intervals.elevated;
        self.mode = Mode::Escalated;
        debug!("Reminder sent, escalated cadence {}", format_interval(self.interval));

        Step::new(
            Some(Notification::new(kind, text)),
            TimerAction::Rearm(self.intervals.elevated),
        )
    }

    /// Human-readable status used by the `debug` command
    pub fn status_line(&self) -> String {
        format!(
            "HydroBot, version {}. Status: Alive={}, Mode={}, Escalation={}, Current Interval={}.",
            get_bot_version(),
            self.active,
            self.mode,
            self.mode == Mode::Escalated,
            format_interval(self.interval)
        )
    }
}

fn control(text: &str) -> Notification {
    Notification::new(NotificationKind::Control, text)
}

/// Format a duration as `1h5m0s`, `30m0s`, `2s` or `250ms`
pub fn format_interval(interval: Duration) -> String {
    let total = interval.as_secs();
    if total == 0 {
        return format!("{}ms", interval.as_millis());
    }

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
