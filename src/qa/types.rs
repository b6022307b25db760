//! Wire types for the question-answering endpoint

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shown when the endpoint returns no usable answer
pub const NO_ANSWER_TEXT: &str = "No answer available.";

/// Source value the backend sends when retrieval found nothing
pub const NO_SOURCE_SENTINEL: &str = "No source found";

/// Request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Response body as sent by the endpoint. Both fields are optional and `null`
/// is treated the same as a missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl QueryResponse {
    /// Parse a response body. The body must be a JSON object: derived struct
    /// deserialization would also fill the fields from an array by position.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let object: Map<String, Value> = serde_json::from_str(body)?;
        serde_json::from_value(Value::Object(object))
    }

    /// Resolve optional fields to concrete values.
    pub fn resolve(self) -> Answer {
        let text = self
            .answer
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| NO_ANSWER_TEXT.to_string());

        let source = self
            .source
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && s != NO_SOURCE_SENTINEL);

        Answer { text, source }
    }
}

/// A resolved answer, ready to become a bot message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub source: Option<String>,
}

impl Answer {
    #[cfg(test)]
    pub fn new(text: impl Into<String>, source: Option<&str>) -> Self {
        Self {
            text: text.into(),
            source: source.map(ToString::to_string),
        }
    }
}
