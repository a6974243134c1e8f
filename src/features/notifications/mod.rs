//! # Notifications Feature
//!
//! Outbound notification events and best-effort desktop alerts.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod sink;

pub use sink::{
    DesktopNotifier, LogNotifier, Notification, NotificationKind, NotificationSink,
    ESCALATION_TITLE, REMINDER_TITLE,
};
