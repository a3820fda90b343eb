//! services/journey/src/error.rs
//!
//! Defines the primary error type for the journey session host.

use crate::config::ConfigError;
use healing_journey_core::ports::PortError;

/// The primary error type for the `journey` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a standard Input/Output error on the visitor's stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A session message could not be encoded or decoded.
    #[error("Protocol error: {0}")]
    Json(#[from] serde_json::Error),

    /// The visitor's side of the session stopped listening for updates.
    #[error("The visitor disconnected")]
    Disconnected,

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
