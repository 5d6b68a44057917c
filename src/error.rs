//! Custom error types for the execution agent
//!
//! Provides structured, typed errors instead of generic Box<dyn Error>

use std::path::PathBuf;

use thiserror::Error;

/// Top-level agent errors. Only bootstrap can produce these; per-file
/// failures never escape the poll loop.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),

    #[error("Venue setup error: {0}")]
    Venue(#[from] VenueError),
}

/// The queued document could not be turned into an intent
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("Document is not an object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Semantic rule violations on a decoded intent
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid quantity {quantity}")]
    InvalidQuantity { quantity: f64 },

    #[error("Invalid side '{side}'")]
    InvalidSide { side: String },
}

impl ValidationError {
    /// Log event name for this rule violation
    pub fn event(&self) -> &'static str {
        match self {
            ValidationError::InvalidQuantity { .. } => crate::constants::events::INVALID_QUANTITY,
            ValidationError::InvalidSide { .. } => crate::constants::events::INVALID_SIDE,
        }
    }
}

/// Venue-specific errors
#[derive(Error, Debug)]
pub enum VenueError {
    #[error("Order rejected ({code}): {description}")]
    Rejected { code: i64, description: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected venue response: {0}")]
    Protocol(String),
}

/// Relocation out of `pending` failed; the file stays where it was
#[derive(Error, Debug)]
pub enum MoveError {
    #[error("Destination already exists: {}", path.display())]
    DestinationExists { path: PathBuf },

    #[error("Failed to move {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
