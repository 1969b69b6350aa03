//! Gateway error types

use thiserror::Error;

use crate::domain::RequestError;
use crate::llm::LlmError;

/// Ways generating an itinerary can fail
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Caller input rejected before any network call
    #[error("{0}")]
    InvalidRequest(String),

    /// The completion service was unreachable or returned an error
    #[error("Completion service error: {0}")]
    UpstreamFailure(String),

    /// The completion service answered with no usable content
    #[error("Failed to get response from completion service")]
    EmptyResponse,

    /// The content was not an itinerary-shaped JSON object
    #[error("Invalid JSON response from completion service: {reason}")]
    MalformedResponse { reason: String, raw: String },

    /// A prompt template could not be loaded or rendered
    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl GenerateError {
    /// Raw service output, for malformed responses
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl From<RequestError> for GenerateError {
    fn from(err: RequestError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<LlmError> for GenerateError {
    fn from(err: LlmError) -> Self {
        Self::UpstreamFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_only_for_malformed() {
        let err = GenerateError::MalformedResponse {
            reason: "expected value at line 1 column 1".to_string(),
            raw: "not json".to_string(),
        };
        assert_eq!(err.raw(), Some("not json"));
        assert!(err.to_string().starts_with("Invalid JSON response"));

        assert_eq!(GenerateError::EmptyResponse.raw(), None);
    }

    #[test]
    fn test_from_request_error() {
        let err: GenerateError = RequestError::MissingFields(vec!["duration"]).into();
        assert!(matches!(err, GenerateError::InvalidRequest(_)));
        assert_eq!(err.to_string(), "Missing required fields: duration");
    }

    #[test]
    fn test_from_llm_error_keeps_upstream_message() {
        let err: GenerateError = LlmError::ApiError {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        }
        .into();
        assert!(matches!(err, GenerateError::UpstreamFailure(_)));
        assert!(err.to_string().contains("Incorrect API key provided"));
    }
}
