//! AI assistant backend client
//!
//! Narrow request/response contract over HTTP:
//! - `POST {base}/chat {prompt, history}` -> `{text}`
//! - `POST {base}/map {sourceData}` -> array of mapping suggestions
//!
//! Chat failures propagate as [`crate::Error::Backend`]. Mapping degrades to
//! an empty suggestion list instead of surfacing an error; that swallow is
//! owned here, documented, and logged - the store and search engine never
//! swallow anything.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Error, Result};

/// Default backend address, matching the assistant server's dev setup
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One turn of a chat transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// A persisted chat transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    /// Unix timestamp in milliseconds
    pub created_at: i64,
}

impl ChatSession {
    /// Start a new session titled after its opening prompt
    pub fn new(title: impl Into<String>) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        Self {
            id: now.to_string(),
            title: title.into(),
            messages: Vec::new(),
            created_at: now,
        }
    }
}

/// One suggested source-to-CDM field mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingSuggestion {
    #[serde(rename = "sourceField")]
    pub source_field: String,
    #[serde(rename = "targetCDMField")]
    pub target_cdm_field: String,
    /// 0.0 - 1.0
    pub confidence: f32,
    pub reasoning: String,
}

/// HTTP client for the assistant backend
pub struct BackendClient {
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Ask the assistant a free-text question. Errors propagate.
    pub fn chat(&self, prompt: &str, history: &[ChatMessage]) -> Result<String> {
        let body = serde_json::json!({ "prompt": prompt, "history": history });

        let response = ureq::post(&format!("{}/chat", self.base_url))
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| Error::Backend(e.to_string()))?;

        let value: serde_json::Value = response
            .into_json()
            .map_err(|e| Error::Backend(e.to_string()))?;

        value["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::Backend("chat response missing 'text'".to_string()))
    }

    /// Request mapping suggestions for pasted source data.
    ///
    /// Degrades to an empty list on any transport or decode failure.
    pub fn map_fields(&self, source_data: &str) -> Vec<MappingSuggestion> {
        match self.try_map(source_data) {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::warn!("mapping suggestions unavailable: {e}");
                Vec::new()
            }
        }
    }

    fn try_map(&self, source_data: &str) -> Result<Vec<MappingSuggestion>> {
        let body = serde_json::json!({ "sourceData": source_data });

        let response = ureq::post(&format!("{}/map", self.base_url))
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| Error::Backend(e.to_string()))?;

        response
            .into_json()
            .map_err(|e| Error::Backend(e.to_string()))
    }
}

impl Default for BackendClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_suggestion_wire_names() {
        let json = r#"{
            "sourceField": "acct_id",
            "targetCDMField": "Account.AccountID",
            "confidence": 0.92,
            "reasoning": "Both identify the account."
        }"#;
        let suggestion: MappingSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(suggestion.source_field, "acct_id");
        assert_eq!(suggestion.target_cdm_field, "Account.AccountID");

        let back = serde_json::to_value(&suggestion).unwrap();
        assert!(back.get("targetCDMField").is_some());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_map_degrades_to_empty_on_unreachable_backend() {
        let client = BackendClient::new("http://127.0.0.1:1/api");
        assert!(client.map_fields("a,b,c").is_empty());
    }

    #[test]
    fn test_chat_errors_on_unreachable_backend() {
        let client = BackendClient::new("http://127.0.0.1:1/api");
        assert!(matches!(client.chat("hello", &[]), Err(Error::Backend(_))));
    }
}
