//! Domain types for itineraries
//!
//! - [`TripDuration`] - the duration category controlling item count
//! - [`Itinerary`] / [`ItineraryItem`] - the generated and saved result
//! - [`GenerateParams`] / [`ItineraryRequest`] - raw and validated user input

mod duration;
mod itinerary;
mod request;

pub use duration::TripDuration;
pub use itinerary::{Itinerary, ItineraryDraft, ItineraryItem};
pub use request::{GenerateParams, INTERESTS, ItineraryRequest, RequestError};
