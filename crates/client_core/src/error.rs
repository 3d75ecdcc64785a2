//! Failures surfaced by the assignment controller.
//!
//! The `Display` text of each variant is the exact message shown to the
//! user; the controller never propagates these past its own operations.

use thiserror::Error;

/// Shown when the initial load fails with an error that carries no text.
pub const LOAD_FALLBACK_MESSAGE: &str = "Failed to load data";
/// Shown when an assignment fails with an error that carries no text.
pub const ASSIGN_FALLBACK_MESSAGE: &str = "Failed to assign spool";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("Spool not found")]
    SpoolNotFound,
    #[error("Failed to load printers")]
    PrintersUnavailable,
    #[error("Please select a printer")]
    NoPrinterSelected,
    #[error("{0}")]
    Rejected(String),
    #[error("Failed to assign spool")]
    AssignFailed,
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Decode(String),
}

impl ControllerError {
    /// Message to store in the UI state, or `fallback` when this error
    /// renders as blank text.
    pub fn user_message(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for ControllerError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}
