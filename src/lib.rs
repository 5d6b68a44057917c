//! Execution agent - consumes execution intents from a directory queue
//!
//! Each file dropped into `pending` is decoded, validated, sent to a trading
//! venue and then moved into `done` or `failed`. See [`services::poller`]
//! for the cycle itself.

pub mod api;
pub mod bus;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod events;
pub mod exchange;
pub mod intent;
pub mod queue;
pub mod services;

// Re-export commonly used types
pub use bus::EventBus;
pub use config::AppConfig;
pub use context::AgentContext;
pub use error::{AgentError, DecodeError, MoveError, ValidationError, VenueError};
pub use events::{CycleReport, Event, ExecutionOutcome, OutcomeReport, RejectCause};
pub use intent::{decode, Intent, Mode, Side};
pub use services::poller::Poller;

#[cfg(test)]
mod config_tests;
