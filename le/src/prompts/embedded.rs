//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// System directive: output schema and item-count policy
pub const ITINERARY_SYSTEM: &str = include_str!("../../prompts/itinerary-system.pmt");

/// User directive: one trip request
pub const ITINERARY_USER: &str = include_str!("../../prompts/itinerary-user.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "itinerary-system" => Some(ITINERARY_SYSTEM),
        "itinerary-user" => Some(ITINERARY_USER),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
