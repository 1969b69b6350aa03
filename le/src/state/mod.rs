//! Saved itinerary state with actor pattern
//!
//! StateManager owns the itinerary collection and processes messages via
//! channels, so every store access in one process goes through one task.

mod manager;
mod messages;

pub use manager::StateManager;
pub use messages::{StateCommand, StateError, StateResponse};
