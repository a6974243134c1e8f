//! # Feature: Message Catalog
//!
//! Three read-only message lists (reminders, escalations, confirmations) and a
//! uniform random picker over them. Lists are loaded once at startup from
//! newline-delimited files; an unreadable or empty file falls back to a
//! built-in default list so the catalog is never empty.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Confirmation fallback no longer overwrites the escalation list
//! - 1.0.0: Initial release with file loading and random selection

use crate::core::CatalogPaths;
use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use rand::Rng;
use std::path::Path;

/// Returned by the picker when a list has no entries
pub const NO_MESSAGES: &str = "No messages available.";

pub const DEFAULT_REMINDERS: &[&str] = &["Time to drink some water!", "Hydration check!"];

pub const DEFAULT_ESCALATIONS: &[&str] = &["Urgent: Drink NOW!", "Immediate hydration required!"];

pub const DEFAULT_CONFIRMATIONS: &[&str] = &[
    "Kipik est content, tu bois bien!",
    "Koya aussi est content que tu boives.",
];

/// Names one of the three catalog lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageList {
    Reminder,
    Escalation,
    Confirmation,
}

impl MessageList {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageList::Reminder => "reminder",
            MessageList::Escalation => "escalation",
            MessageList::Confirmation => "confirmation",
        }
    }

    fn defaults(&self) -> Vec<String> {
        let defaults = match self {
            MessageList::Reminder => DEFAULT_REMINDERS,
            MessageList::Escalation => DEFAULT_ESCALATIONS,
            MessageList::Confirmation => DEFAULT_CONFIRMATIONS,
        };
        defaults.iter().map(|s| s.to_string()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    reminders: Vec<String>,
    escalations: Vec<String>,
    confirmations: Vec<String>,
}

impl MessageCatalog {
    pub fn new(
        reminders: Vec<String>,
        escalations: Vec<String>,
        confirmations: Vec<String>,
    ) -> Self {
        MessageCatalog {
            reminders,
            escalations,
            confirmations,
        }
    }

    /// Catalog made only of the built-in default lists
    #[cfg(test)]
    pub(crate) fn defaults() -> Self {
        MessageCatalog::new(
            MessageList::Reminder.defaults(),
            MessageList::Escalation.defaults(),
            MessageList::Confirmation.defaults(),
        )
    }

    /// Load all three lists, substituting defaults for any that fail to load
    pub fn load(paths: &CatalogPaths) -> Self {
        MessageCatalog::new(
            load_or_default(MessageList::Reminder, &paths.reminders),
            load_or_default(MessageList::Escalation, &paths.escalations),
            load_or_default(MessageList::Confirmation, &paths.confirmations),
        )
    }

    pub fn messages(&self, list: MessageList) -> &[String] {
        match list {
            MessageList::Reminder => &self.reminders,
            MessageList::Escalation => &self.escalations,
            MessageList::Confirmation => &self.confirmations,
        }
    }

    pub fn pick<R: Rng>(&self, list: MessageList, rng: &mut R) -> &str {
        pick_random(self.messages(list), rng)
    }
}

/// Pick one message uniformly at random, or [`NO_MESSAGES`] for an empty list
pub fn pick_random<'a, R: Rng>(messages: &'a [String], rng: &mut R) -> &'a str {
    if messages.is_empty() {
        return NO_MESSAGES;
    }

    let index = rng.random_range(0..messages.len());
    &messages[index]
}

/// Read one message per non-blank line, trimmed
pub fn load_messages(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("error opening file {}", path.display()))?;
    let contents = String::from_utf8(bytes)
        .with_context(|| format!("error reading file {}", path.display()))?;

    let messages: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if messages.is_empty() {
        return Err(anyhow!("no messages found in {}", path.display()));
    }

    Ok(messages)
}

fn load_or_default(list: MessageList, path: &Path) -> Vec<String> {
    match load_messages(path) {
        Ok(messages) => {
            debug!(
                "Loaded {} {} messages from {}",
                messages.len(),
                list.as_str(),
                path.display()
            );
            messages
        }
        Err(e) => {
            warn!(
                "Error loading {} messages: {:#}. Using default messages.",
                list.as_str(),
                e
            );
            list.defaults()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_pick_random_returns_member() {
        let messages = strings(&["a", "b", "c", "d"]);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let picked = pick_random(&messages, &mut rng);
            assert!(messages.iter().any(|m| m == picked));
        }
    }

    #[test]
    fn test_pick_random_covers_every_entry() {
        let messages = strings(&["a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..300 {
            seen.insert(pick_random(&messages, &mut rng).to_string());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_pick_random_empty_returns_sentinel() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_random(&[], &mut rng), NO_MESSAGES);
    }

    #[test]
    fn test_catalog_pick_uses_named_list() {
        let catalog = MessageCatalog::new(
            strings(&["Drink!"]),
            strings(&["NOW!"]),
            strings(&["Good job"]),
        );
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(catalog.pick(MessageList::Reminder, &mut rng), "Drink!");
        assert_eq!(catalog.pick(MessageList::Escalation, &mut rng), "NOW!");
        assert_eq!(catalog.pick(MessageList::Confirmation, &mut rng), "Good job");
    }

    #[test]
    fn test_load_messages_trims_and_skips_blank_lines() {
        let file = write_temp("  Drink up!  \n\n\t\nHydrate now\r\n   \n");
        let messages = load_messages(file.path()).unwrap();
        assert_eq!(messages, strings(&["Drink up!", "Hydrate now"]));
    }

    #[test]
    fn test_load_messages_empty_file_is_error() {
        let file = write_temp("\n   \n\n");
        let err = load_messages(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("no messages found in"));
    }

    #[test]
    fn test_load_messages_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = load_messages(&path).unwrap_err();
        assert!(err.to_string().starts_with("error opening file"));
    }

    #[test]
    fn test_load_falls_back_per_list() {
        let dir = tempfile::tempdir().unwrap();
        let reminders = dir.path().join("reminders.txt");
        let confirmations = dir.path().join("confirmations.txt");
        std::fs::write(&reminders, "Custom reminder\n").unwrap();
        std::fs::write(&confirmations, "\n\n").unwrap();

        let paths = CatalogPaths {
            reminders,
            escalations: dir.path().join("escalations.txt"),
            confirmations,
        };
        let catalog = MessageCatalog::load(&paths);

        assert_eq!(
            catalog.messages(MessageList::Reminder),
            strings(&["Custom reminder"]).as_slice()
        );
        assert_eq!(
            catalog.messages(MessageList::Escalation),
            strings(DEFAULT_ESCALATIONS).as_slice()
        );
        assert_eq!(
            catalog.messages(MessageList::Confirmation),
            strings(DEFAULT_CONFIRMATIONS).as_slice()
        );
    }

    #[test]
    fn test_defaults_are_never_empty() {
        let catalog = MessageCatalog::defaults();
        for list in [MessageList::Reminder, MessageList::Escalation, MessageList::Confirmation] {
            assert!(!catalog.messages(list).is_empty(), "{} list empty", list.as_str());
        }
    }
}
