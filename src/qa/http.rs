//! HTTP implementation of the answer service

use super::types::{Answer, QueryRequest, QueryResponse};
use super::{AnswerService, QaError};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

/// Longest response body excerpt carried into error messages
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Posts `{"query": ...}` to a fixed endpoint and parses the JSON reply
pub struct HttpAnswerService {
    client: Client,
    endpoint: Url,
}

impl HttpAnswerService {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn ask(&self, query: &str) -> Result<Answer, QaError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&QueryRequest::new(query))
            .send()
            .await
            .map_err(|e| QaError::from_reqwest(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QaError::from_reqwest(&e))?;

        if !status.is_success() {
            return Err(QaError::from_status(status, &excerpt(&body)));
        }

        let parsed = QueryResponse::from_json(&body).map_err(|e| {
            QaError::malformed(format!(
                "Failed to parse response: {e} - body: {}",
                excerpt(&body)
            ))
        })?;

        Ok(parsed.resolve())
    }

    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() > MAX_ERROR_BODY_CHARS {
        let head: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{head}...")
    } else {
        trimmed.to_string()
    }
}
