//! State manager messages
//!
//! Commands and responses for the actor pattern.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::domain::Itinerary;

/// Errors from state operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Itinerary not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Channel error")]
    ChannelError,
}

/// Response from state operations
pub type StateResponse<T> = Result<T, StateError>;

/// Commands sent to the StateManager actor
#[derive(Debug)]
pub enum StateCommand {
    SaveItinerary {
        itinerary: Itinerary,
        reply: oneshot::Sender<StateResponse<()>>,
    },
    GetItinerary {
        id: String,
        reply: oneshot::Sender<StateResponse<Option<Itinerary>>>,
    },
    ListItineraries {
        reply: oneshot::Sender<StateResponse<Vec<Itinerary>>>,
    },
    DeleteItinerary {
        id: String,
        reply: oneshot::Sender<StateResponse<()>>,
    },

    /// Shutdown the actor
    Shutdown,
}
