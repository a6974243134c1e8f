//! # Reminders Feature
//!
//! Hydration reminder cadence with escalation when reminders go unanswered.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true

pub mod command;
pub mod scheduler;
pub mod state;
pub mod timer;

pub use command::AdminCommand;
pub use scheduler::{channels, Confirmation, FrontendLink, ReminderScheduler, SchedulerLink};
pub use state::{Mode, Phase, ReminderState};
pub use timer::RetriggerTimer;
