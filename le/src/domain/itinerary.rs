//! Itinerary domain types
//!
//! An [`ItineraryDraft`] is what the completion service returns; stamping an
//! id and creation time turns it into an [`Itinerary`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use tripstore::Record;

use super::TripDuration;

/// One suggested activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryItem {
    /// Short activity title
    pub name: String,

    /// Two or three sentences about the activity
    pub description: String,

    /// Free-text duration label, e.g. "1.5 hours"
    pub estimated_time: String,
}

/// Itinerary fields produced by the completion service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryDraft {
    pub location: String,
    pub interests: Vec<String>,
    pub duration: TripDuration,
    pub items: Vec<ItineraryItem>,
}

/// A complete itinerary, as returned to callers and saved locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: String,
    pub location: String,
    pub interests: Vec<String>,
    pub duration: TripDuration,
    pub date_created: DateTime<Utc>,
    pub items: Vec<ItineraryItem>,
}

impl Itinerary {
    /// Stamp a fresh id and creation time onto a draft
    ///
    /// Ids are UUIDv7: time-ordered like a timestamp, but unique under
    /// rapid successive calls.
    pub fn from_draft(draft: ItineraryDraft) -> Self {
        debug!(location = %draft.location, item_count = draft.items.len(), "Itinerary::from_draft: called");
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            location: draft.location,
            interests: draft.interests,
            duration: draft.duration,
            date_created: Utc::now(),
            items: draft.items,
        }
    }

    /// Whether the item count falls in the range requested for the duration
    ///
    /// Advisory only; nothing rejects an itinerary outside the range.
    pub fn item_count_in_range(&self) -> bool {
        let (min, max) = self.duration.item_range();
        let count = self.items.len() as u32;
        count >= min && count <= max
    }
}

impl Record for Itinerary {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ItineraryDraft {
        ItineraryDraft {
            location: "Kyoto".to_string(),
            interests: vec!["History".to_string(), "Food".to_string()],
            duration: TripDuration::HalfDay,
            items: vec![
                ItineraryItem {
                    name: "Fushimi Inari".to_string(),
                    description: "Walk the torii gates.".to_string(),
                    estimated_time: "2 hours".to_string(),
                },
                ItineraryItem {
                    name: "Nishiki Market".to_string(),
                    description: "Graze on street food.".to_string(),
                    estimated_time: "1 hour".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_from_draft_stamps_identity() {
        let itinerary = Itinerary::from_draft(draft());

        assert!(!itinerary.id.is_empty());
        assert!(uuid::Uuid::parse_str(&itinerary.id).is_ok());
        assert_eq!(itinerary.location, "Kyoto");
        assert_eq!(itinerary.items.len(), 2);
        assert!(itinerary.date_created <= Utc::now());
    }

    #[test]
    fn test_from_draft_ids_are_unique() {
        let a = Itinerary::from_draft(draft());
        let b = Itinerary::from_draft(draft());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_wire_field_names() {
        let itinerary = Itinerary::from_draft(draft());
        let value = serde_json::to_value(&itinerary).unwrap();

        assert!(value.get("dateCreated").is_some());
        assert_eq!(value["duration"], "half-day");
        assert_eq!(value["items"][0]["estimatedTime"], "2 hours");
        assert!(value.get("date_created").is_none());
    }

    #[test]
    fn test_parses_browser_saved_itinerary() {
        let json = r#"{
            "id": "1717171717171",
            "location": "Paris",
            "interests": ["Food"],
            "duration": "quick",
            "dateCreated": "2024-05-31T15:48:37.171Z",
            "items": [{"name": "Café de Flore", "description": "Breakfast.", "estimatedTime": "1 hour"}]
        }"#;

        let itinerary: Itinerary = serde_json::from_str(json).unwrap();
        assert_eq!(itinerary.id, "1717171717171");
        assert_eq!(itinerary.duration, TripDuration::Quick);
        assert_eq!(itinerary.items[0].estimated_time, "1 hour");
    }

    #[test]
    fn test_item_count_in_range() {
        let mut itinerary = Itinerary::from_draft(draft());
        assert!(itinerary.item_count_in_range());

        itinerary.items.clear();
        assert!(!itinerary.item_count_in_range());
    }
}
