//! Generation request input and validation

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::TripDuration;

/// Interests offered by the UI
///
/// Requests may carry interests outside this list; they are passed through.
pub const INTERESTS: [&str; 8] = [
    "History",
    "Food",
    "Art",
    "Nature",
    "Shopping",
    "Nightlife",
    "Hidden Gems",
    "Family Fun",
];

/// Reasons a generation request is rejected before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{0}")]
    InvalidDuration(String),
}

/// Raw generation request body; every field may be absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateParams {
    pub location: Option<String>,
    pub interests: Option<Vec<String>>,
    pub duration: Option<String>,
}

/// A validated generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryRequest {
    pub location: String,
    pub interests: Vec<String>,
    pub duration: TripDuration,
}

impl ItineraryRequest {
    pub fn new(location: impl Into<String>, interests: Vec<String>, duration: TripDuration) -> Self {
        Self {
            location: location.into(),
            interests,
            duration,
        }
    }

    /// Interests not in the UI vocabulary
    pub fn unlisted_interests(&self) -> Vec<&str> {
        self.interests
            .iter()
            .map(String::as_str)
            .filter(|i| !INTERESTS.contains(i))
            .collect()
    }
}

impl TryFrom<GenerateParams> for ItineraryRequest {
    type Error = RequestError;

    fn try_from(params: GenerateParams) -> Result<Self, Self::Error> {
        debug!(?params, "ItineraryRequest::try_from: called");
        let location = params.location.filter(|l| !l.trim().is_empty());
        let duration = params.duration.filter(|d| !d.trim().is_empty());

        let mut missing = Vec::new();
        if location.is_none() {
            missing.push("location");
        }
        if params.interests.is_none() {
            missing.push("interests");
        }
        if duration.is_none() {
            missing.push("duration");
        }

        match (location, params.interests, duration) {
            (Some(location), Some(interests), Some(duration)) => {
                let duration = duration.parse::<TripDuration>().map_err(RequestError::InvalidDuration)?;
                Ok(Self {
                    location,
                    interests,
                    duration,
                })
            }
            _ => {
                debug!(?missing, "ItineraryRequest::try_from: missing fields");
                Err(RequestError::MissingFields(missing))
            }
        }
    }
}
