// Core layer - configuration and build-time constants
pub mod core;

// Features layer - reminders, messages, notifications
pub mod features;

// Frontend layer - console input and transcript
pub mod frontend;

// Re-export core config
pub use crate::core::Config;

// Re-export feature items
pub use features::{
    // Messages
    MessageCatalog, MessageList,
    // Notifications
    DesktopNotifier, LogNotifier, Notification, NotificationKind, NotificationSink,
    // Reminders
    AdminCommand, Confirmation, ReminderScheduler,
};

pub use frontend::ConsoleFrontend;
