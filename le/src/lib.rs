//! Local Explorer - trip itinerary generator
//!
//! Given a location, a set of interests and a duration category, asks a
//! text-completion service for a short itinerary of activities as JSON,
//! checks its shape, stamps identity, and optionally keeps it locally.
//!
//! # Data flow
//!
//! ```text
//! request -> prompts (system + user directive)
//!         -> gateway (one completion call, JSON check, id + dateCreated)
//!         -> Itinerary -> caller, and optionally state (saved collection)
//! ```
//!
//! # Modules
//!
//! - [`domain`] - Itinerary, request and duration types
//! - [`prompts`] - Directive templates and rendering
//! - [`llm`] - Completion service clients
//! - [`gateway`] - Itinerary generation
//! - [`state`] - Saved itinerary actor over a tripstore collection
//! - [`server`] - HTTP API
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod llm;
pub mod prompts;
pub mod server;
pub mod state;

pub use config::Config;
pub use domain::{Itinerary, ItineraryItem, ItineraryRequest, TripDuration};
pub use gateway::{GenerateError, ItineraryGateway};
pub use state::StateManager;
