//! Trip duration categories

use serde::{Deserialize, Serialize};
use tracing::debug;

/// How long the trip is, which controls how many items are requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TripDuration {
    Quick,
    HalfDay,
    FullDay,
}

impl TripDuration {
    /// Every category, in UI order
    pub const ALL: [TripDuration; 3] = [Self::Quick, Self::HalfDay, Self::FullDay];

    /// Wire value used in requests, responses and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::HalfDay => "half-day",
            Self::FullDay => "full-day",
        }
    }

    /// Rough time span the category stands for
    pub fn hours_label(&self) -> &'static str {
        match self {
            Self::Quick => "1-2 hours",
            Self::HalfDay => "3-4 hours",
            Self::FullDay => "6-8 hours",
        }
    }

    /// Inclusive (min, max) number of items to ask the completion service for
    pub fn item_range(&self) -> (u32, u32) {
        match self {
            Self::Quick => (1, 2),
            Self::HalfDay => (2, 3),
            Self::FullDay => (3, 5),
        }
    }

    /// Human-facing label for selection lists
    pub fn label(&self) -> &'static str {
        match self {
            Self::Quick => "Quick Trip (1-2 hours)",
            Self::HalfDay => "Half Day (3-4 hours)",
            Self::FullDay => "Full Day (6-8 hours)",
        }
    }
}

impl std::fmt::Display for TripDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TripDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "TripDuration::from_str: called");
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(Self::Quick),
            "half-day" => Ok(Self::HalfDay),
            "full-day" => Ok(Self::FullDay),
            other => {
                debug!(%other, "TripDuration::from_str: unknown duration");
                Err(format!(
                    "Unknown duration '{}'; expected one of quick, half-day, full-day",
                    other
                ))
            }
        }
    }
}

impl TryFrom<String> for TripDuration {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TripDuration> for String {
    fn from(value: TripDuration) -> Self {
        value.as_str().to_string()
    }
}
