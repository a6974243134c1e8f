//! # Features Layer
//!
//! Feature modules plus the version / feature registry shown at startup and
//! in debug reports.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod messages;
pub mod notifications;
pub mod reminders;

pub use messages::{MessageCatalog, MessageList};
pub use notifications::{
    DesktopNotifier, LogNotifier, Notification, NotificationKind, NotificationSink,
};
pub use reminders::{AdminCommand, Confirmation, ReminderScheduler};

/// Version reported by the `debug` command. `HYDROBOT_VERSION` set at
/// compile time overrides the package version.
pub fn get_bot_version() -> &'static str {
    option_env!("HYDROBOT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Metadata for one feature module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub since: &'static str,
    pub toggleable: bool,
}

pub fn get_features() -> Vec<FeatureInfo> {
    vec![
        FeatureInfo {
            name: "Reminders",
            version: "1.2.0",
            since: "0.1.0",
            toggleable: true,
        },
        FeatureInfo {
            name: "Messages",
            version: "1.1.0",
            since: "0.1.0",
            toggleable: false,
        },
        FeatureInfo {
            name: "Notifications",
            version: "1.0.0",
            since: "0.1.0",
            toggleable: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_version_not_empty() {
        assert!(!get_bot_version().is_empty());
    }

    #[test]
    fn test_feature_names_unique() {
        let mut names: Vec<&str> = get_features().iter().map(|f| f.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), get_features().len(), "Duplicate feature names found");
    }
}
