//! Directory-backed intent queue: `pending`, `done` and `failed` folders
//! under one root.

pub mod fs;
pub mod layout;
pub mod sink;
pub mod transition;

pub use fs::{LocalFs, QueueFs};
pub use layout::{Destination, QueueLayout};
pub use sink::FileIntentSink;
pub use transition::QueueTransitioner;
