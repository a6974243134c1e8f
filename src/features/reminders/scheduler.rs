//! # Feature: Reminder Scheduler
//!
//! Long-lived coordinator that owns the reminder timer and the Mode / Active /
//! Interval state. It waits on three sources at once (timer expiry, hydration
//! confirmations, admin commands), handles exactly one event at a time and
//! emits outbound notifications in order on a single channel.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Generation-tagged timer ticks, stale firings dropped on receipt
//! - 1.1.0: Alerts forwarded to the notification sink before the transcript
//! - 1.0.0: Initial release with normal / escalated / paused cadence

use crate::core::Intervals;
use crate::features::messages::MessageCatalog;
use crate::features::notifications::{Notification, NotificationSink};
use crate::features::reminders::state::{ReminderState, Step, TimerAction};
use crate::features::reminders::timer::RetriggerTimer;
use crate::features::reminders::AdminCommand;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Hand-off capacity of every scheduler channel. Senders wait for the
/// receiver once a single event is queued.
const HANDOFF_CAPACITY: usize = 1;

/// "User drank water" signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation;

/// Frontend side of the scheduler channels
pub struct FrontendLink {
    pub confirmations: mpsc::Sender<Confirmation>,
    pub commands: mpsc::Sender<AdminCommand>,
    pub notifications: mpsc::Receiver<Notification>,
}

/// Scheduler side of the scheduler channels
pub struct SchedulerLink {
    confirmations: mpsc::Receiver<Confirmation>,
    commands: mpsc::Receiver<AdminCommand>,
    notifications: mpsc::Sender<Notification>,
}

/// Create the confirmation, command and notification channels.
///
/// tokio has no zero-capacity channel, so each hand-off buffers one event.
/// This is weaker than a rendezvous: a sender can run one event ahead of the
/// receiver before it has to wait.
pub fn channels() -> (FrontendLink, SchedulerLink) {
    let (confirmation_tx, confirmation_rx) = mpsc::channel(HANDOFF_CAPACITY);
    let (command_tx, command_rx) = mpsc::channel(HANDOFF_CAPACITY);
    let (notification_tx, notification_rx) = mpsc::channel(HANDOFF_CAPACITY);

    (
        FrontendLink {
            confirmations: confirmation_tx,
            commands: command_tx,
            notifications: notification_rx,
        },
        SchedulerLink {
            confirmations: confirmation_rx,
            commands: command_rx,
            notifications: notification_tx,
        },
    )
}

pub struct ReminderScheduler {
    state: ReminderState,
    catalog: Arc<MessageCatalog>,
    sink: Arc<dyn NotificationSink>,
    rng: StdRng,
    timer: RetriggerTimer,
}

impl ReminderScheduler {
    pub fn new(
        intervals: Intervals,
        catalog: Arc<MessageCatalog>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        ReminderScheduler {
            state: ReminderState::new(intervals),
            catalog,
            sink,
            rng: StdRng::from_os_rng(),
            timer: RetriggerTimer::new(),
        }
    }

    /// Replace the OS-seeded RNG, for reproducible message picks
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Run the event loop for the rest of the process lifetime.
    ///
    /// A closed inbound channel only disables its branch; a closed outbound
    /// channel drops notifications. Neither stops the loop.
    pub async fn run(mut self, link: SchedulerLink) {
        let SchedulerLink {
            mut confirmations,
            mut commands,
            notifications,
        } = link;

        let intervals = self.state.intervals();
        info!(
            "Reminder scheduler started (normal: {:?}, elevated: {:?})",
            intervals.normal, intervals.elevated
        );
        self.timer.reset(self.state.interval());

        loop {
            let step = self.next_step(&mut confirmations, &mut commands).await;
            self.apply(step, &notifications).await;
        }
    }

    /// Wait for the next event from any source and run it through the state
    async fn next_step(
        &mut self,
        confirmations: &mut mpsc::Receiver<Confirmation>,
        commands: &mut mpsc::Receiver<AdminCommand>,
    ) -> Step {
        tokio::select! {
            () = self.timer.expired() => {
                debug!("Timer expired in phase {:?}", self.state.phase());
                self.state.on_timer_expired(&self.catalog, &mut self.rng)
            }
            Some(Confirmation) = confirmations.recv() => {
                self.state.on_confirmation(&self.catalog, &mut self.rng)
            }
            Some(command) = commands.recv() => {
                debug!("Admin command '{}' received", command);
                self.state.on_command(&command)
            }
        }
    }

    async fn apply(&mut self, step: Step, notifications: &mpsc::Sender<Notification>) {
        match step.timer {
            TimerAction::Rearm(period) => self.timer.reset(period),
            TimerAction::Stop => self.timer.cancel(),
            TimerAction::Keep => {}
        }

        let Some(notification) = step.notification else {
            return;
        };

        if let Some(title) = notification.kind.alert_title() {
            self.sink.notify(title, &notification.text);
        }

        if notifications.send(notification).await.is_err() {
            debug!("Frontend closed, notification dropped");
        }
    }
}
