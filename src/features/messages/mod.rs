//! # Messages Feature
//!
//! Reminder, escalation and confirmation texts with random selection.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod catalog;

pub use catalog::{load_messages, pick_random, MessageCatalog, MessageList, NO_MESSAGES};
