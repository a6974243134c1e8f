//! # Frontend Module
//!
//! Console stand-in for the chat window: turns typed lines into scheduler
//! events and renders outbound notifications.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod console;
pub mod input;

pub use console::{ConsoleFrontend, SharedOutput};
pub use input::{classify_input, UserInput};
