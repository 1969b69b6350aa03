//! Completion Gateway
//!
//! Turns a validated [`ItineraryRequest`] into an [`Itinerary`]: build the
//! prompt, make exactly one completion call asking for a JSON object, check
//! the returned object against the itinerary shape, then stamp identity.

mod error;

pub use error::GenerateError;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::{Itinerary, ItineraryDraft, ItineraryRequest};
use crate::llm::{CompletionRequest, LlmClient, Message, ResponseFormat, create_client};
use crate::prompts::{PromptBuilder, PromptLoader};

/// Generates itineraries through a completion service
pub struct ItineraryGateway {
    llm: Arc<dyn LlmClient>,
    prompts: PromptBuilder,
    max_tokens: u32,
}

impl ItineraryGateway {
    pub fn new(llm: Arc<dyn LlmClient>, max_tokens: u32) -> Self {
        debug!(%max_tokens, "ItineraryGateway::new: called");
        Self {
            llm,
            prompts: PromptBuilder::default(),
            max_tokens,
        }
    }

    /// Build from config: provider client plus prompt overrides
    pub fn from_config(config: &Config) -> eyre::Result<Self> {
        debug!(provider = %config.llm.provider, "ItineraryGateway::from_config: called");
        let llm = create_client(&config.llm)?;
        let prompts = PromptBuilder::new(PromptLoader::new(config.prompts_dir.clone()));
        Ok(Self::new(llm, config.llm.max_tokens).with_prompts(prompts))
    }

    /// Use a prompt builder with its own template sources
    pub fn with_prompts(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    pub async fn generate(&self, request: &ItineraryRequest) -> Result<Itinerary, GenerateError> {
        debug!(location = %request.location, duration = %request.duration, "generate: called");
        let unlisted = request.unlisted_interests();
        if !unlisted.is_empty() {
            debug!(?unlisted, "generate: passing through interests outside the UI vocabulary");
        }

        let prompt = self
            .prompts
            .build(request)
            .map_err(|e| GenerateError::Prompt(e.to_string()))?;

        let completion = CompletionRequest {
            system_prompt: prompt.system,
            messages: vec![Message::user(prompt.user)],
            max_tokens: self.max_tokens,
            response_format: ResponseFormat::JsonObject,
        };

        let response = self.llm.complete(completion).await.map_err(|e| {
            warn!(error = %e, "Completion service call failed");
            GenerateError::from(e)
        })?;
        debug!(stop_reason = ?response.stop_reason, usage = ?response.usage, "generate: response received");

        let raw = match response.content {
            Some(content) if !content.trim().is_empty() => content,
            _ => {
                warn!("Completion service returned no content");
                return Err(GenerateError::EmptyResponse);
            }
        };

        let draft = parse_draft(&raw)?;
        let itinerary = Itinerary::from_draft(draft);
        if !itinerary.item_count_in_range() {
            warn!(
                id = %itinerary.id,
                duration = %itinerary.duration,
                item_count = itinerary.items.len(),
                "Item count outside the range requested for this duration"
            );
        }

        info!(id = %itinerary.id, location = %itinerary.location, item_count = itinerary.items.len(), "Generated itinerary");
        Ok(itinerary)
    }
}

/// Parse service output into a draft
///
/// Syntax errors and shape mismatches are both reported as malformed, with
/// the raw text attached. Nothing is repaired.
fn parse_draft(raw: &str) -> Result<ItineraryDraft, GenerateError> {
    debug!(raw_len = raw.len(), "parse_draft: called");
    let malformed = |reason: String| {
        warn!(%reason, "Malformed itinerary from completion service");
        GenerateError::MalformedResponse {
            reason,
            raw: raw.to_string(),
        }
    };

    let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(malformed("expected a JSON object".to_string()));
    }

    serde_json::from_value(value).map_err(|e| malformed(format!("itinerary shape mismatch: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TripDuration;
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::{CompletionResponse, LlmError};
    use serde_json::json;

    fn kyoto() -> ItineraryRequest {
        ItineraryRequest::new(
            "Kyoto",
            vec!["History".to_string(), "Food".to_string()],
            TripDuration::HalfDay,
        )
    }

    fn kyoto_json() -> String {
        json!({
            "location": "Kyoto",
            "interests": ["History", "Food"],
            "duration": "half-day",
            "items": [
                {"name": "Fushimi Inari", "description": "Walk the torii gates.", "estimatedTime": "1.5 hours"},
                {"name": "Nishiki Market", "description": "Snack your way through.", "estimatedTime": "1 hour"},
                {"name": "Gion", "description": "Stroll the old streets.", "estimatedTime": "1 hour"}
            ]
        })
        .to_string()
    }

    fn gateway(mock: &Arc<MockLlmClient>) -> ItineraryGateway {
        ItineraryGateway::new(mock.clone() as Arc<dyn LlmClient>, 2048)
    }

    #[tokio::test]
    async fn test_generate_kyoto() {
        let mock = Arc::new(MockLlmClient::new(vec![CompletionResponse::text(kyoto_json())]));

        let itinerary = gateway(&mock).generate(&kyoto()).await.unwrap();

        assert_eq!(itinerary.items.len(), 3);
        assert!(!itinerary.id.is_empty());
        assert_eq!(itinerary.location, "Kyoto");
        assert_eq!(itinerary.duration, TripDuration::HalfDay);

        let stamped = serde_json::to_value(&itinerary).unwrap();
        let created = stamped["dateCreated"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(created).is_ok());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_sends_json_request() {
        let mock = Arc::new(MockLlmClient::new(vec![CompletionResponse::text(kyoto_json())]));

        gateway(&mock).generate(&kyoto()).await.unwrap();

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.response_format, ResponseFormat::JsonObject);
        assert_eq!(sent.max_tokens, 2048);
        assert!(sent.system_prompt.contains("generate 2-3 items"));
        assert_eq!(sent.messages.len(), 1);
        assert!(sent.messages[0].content.contains("trip to Kyoto"));
    }

    #[tokio::test]
    async fn test_not_json_is_malformed_with_raw() {
        let mock = Arc::new(MockLlmClient::new(vec![CompletionResponse::text("not json")]));

        let err = gateway(&mock).generate(&kyoto()).await.unwrap_err();

        assert!(matches!(err, GenerateError::MalformedResponse { .. }));
        assert_eq!(err.raw(), Some("not json"));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_malformed() {
        let raw = json!({"location": "Kyoto", "items": "lots"}).to_string();
        let mock = Arc::new(MockLlmClient::new(vec![CompletionResponse::text(raw.clone())]));

        let err = gateway(&mock).generate(&kyoto()).await.unwrap_err();

        assert_eq!(err.raw(), Some(raw.as_str()));
    }

    #[tokio::test]
    async fn test_unknown_duration_in_response_is_malformed() {
        let raw = kyoto_json().replace("half-day", "weekend");
        let mock = Arc::new(MockLlmClient::new(vec![CompletionResponse::text(raw)]));

        let err = gateway(&mock).generate(&kyoto()).await.unwrap_err();

        assert!(matches!(err, GenerateError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_json_array_is_malformed() {
        let mock = Arc::new(MockLlmClient::new(vec![CompletionResponse::text("[1, 2, 3]")]));

        let err = gateway(&mock).generate(&kyoto()).await.unwrap_err();

        assert!(matches!(err, GenerateError::MalformedResponse { ref reason, .. } if reason.contains("object")));
    }

    #[tokio::test]
    async fn test_empty_content() {
        let mock = Arc::new(MockLlmClient::new(vec![
            CompletionResponse::text("   "),
            CompletionResponse {
                content: None,
                ..CompletionResponse::text("")
            },
        ]));
        let gateway = gateway(&mock);

        assert!(matches!(gateway.generate(&kyoto()).await, Err(GenerateError::EmptyResponse)));
        assert!(matches!(gateway.generate(&kyoto()).await, Err(GenerateError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_retried() {
        let mock = Arc::new(MockLlmClient::with_outcomes(vec![
            Err(LlmError::ApiError {
                status: 503,
                message: "overloaded".to_string(),
            }),
            Ok(CompletionResponse::text(kyoto_json())),
        ]));

        let err = gateway(&mock).generate(&kyoto()).await.unwrap_err();

        assert!(matches!(err, GenerateError::UpstreamFailure(ref msg) if msg.contains("overloaded")));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_item_count_is_accepted() {
        let raw = json!({
            "location": "Kyoto",
            "interests": [],
            "duration": "full-day",
            "items": [{"name": "Kinkaku-ji", "description": "Golden.", "estimatedTime": "1 hour"}]
        })
        .to_string();
        let mock = Arc::new(MockLlmClient::new(vec![CompletionResponse::text(raw)]));

        let itinerary = gateway(&mock).generate(&kyoto()).await.unwrap();

        assert_eq!(itinerary.items.len(), 1);
        assert!(!itinerary.item_count_in_range());
    }

    #[test]
    fn test_parse_draft_ignores_extra_fields() {
        let raw = kyoto_json().replacen('{', r#"{"id": "model-made", "dateCreated": "yesterday", "#, 1);
        let draft = parse_draft(&raw).unwrap();
        assert_eq!(draft.items.len(), 3);
    }
}
