use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{
    ChatChoice, ChatMessage, ChatRequest, DomainError, FinishReason, SamplingParams,
    TokenLogprobs,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Connection settings for [`OpenAiChatClient`]. Immutable once the client is
/// built.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Transport-level timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read configuration from the environment:
    ///
    /// | Variable          | Default                  |
    /// |-------------------|--------------------------|
    /// | `OPENAI_API_KEY`  | required                 |
    /// | `OPENAI_MODEL`    | `gpt-3.5-turbo`          |
    /// | `OPENAI_BASE_URL` | `https://api.openai.com` |
    pub fn from_env() -> Result<Self, DomainError> {
        let key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| DomainError::config("OPENAI_API_KEY is required but not set"))?;
        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(key).with_model(model).with_base_url(base))
    }
}

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(flatten)]
    sampling: &'a SamplingParams,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
    finish_reason: Option<String>,
    #[serde(default)]
    logprobs: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ApiMessage {
    content: Option<String>,
}

impl ApiChoice {
    fn into_choice(self) -> Result<ChatChoice, DomainError> {
        let content = self
            .message
            .content
            .ok_or_else(|| DomainError::provider("OpenAiChatClient: choice has no message content"))?;
        let mut choice = ChatChoice::new(content, FinishReason::parse(self.finish_reason.as_deref()));

        if let Some(raw) = self.logprobs {
            match serde_json::from_value::<TokenLogprobs>(raw) {
                Ok(logprobs) => choice = choice.with_logprobs(logprobs),
                Err(e) => debug!("OpenAiChatClient: ignoring unrecognised logprobs: {e}"),
            }
        }
        Ok(choice)
    }
}

/// HTTP client for an OpenAI-style chat-completion endpoint.
///
/// Sends `Authorization: Bearer <key>` and a JSON body of model, messages and
/// sampling parameters. Only the first returned choice is used. No retries.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiChatClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, DomainError> {
        if config.api_key.trim().is_empty() {
            return Err(DomainError::invalid_input("API key must not be empty"));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DomainError::config(format!("failed to build HTTP client: {e}")))?;

        let url = format!("{}{}", config.base_url.trim_end_matches('/'), COMPLETIONS_PATH);
        Ok(Self {
            client,
            api_key: config.api_key,
            model: config.model,
            url,
        })
    }

    pub fn from_env() -> Result<Self, DomainError> {
        Self::new(OpenAiConfig::from_env()?)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatChoice, DomainError> {
        let body = ApiRequest {
            model: &self.model,
            messages: request.messages(),
            sampling: request.sampling(),
        };

        debug!(
            "OpenAiChatClient: POST {} ({} messages, max_tokens={})",
            self.url,
            request.messages().len(),
            request.sampling().max_tokens
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("OpenAiChatClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiChatClient: API returned {status}: {body}");
            return Err(DomainError::provider(format!(
                "OpenAiChatClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::provider(format!("OpenAiChatClient: failed to parse response: {e}"))
        })?;

        api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("OpenAiChatClient: response contained no choices"))?
            .into_choice()
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_api_key() {
        let err = OpenAiChatClient::new(OpenAiConfig::new(" ")).err().unwrap();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn builds_endpoint_url_from_base() {
        let client = OpenAiChatClient::new(
            OpenAiConfig::new("sk-test").with_base_url("http://localhost:8080/"),
        )
        .unwrap();
        assert_eq!(client.url(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.model(), "gpt-3.5-turbo");
    }

    #[test]
    fn request_body_flattens_sampling() {
        let messages = vec![ChatMessage::system("s"), ChatMessage::user("u")];
        let sampling = SamplingParams::new(0.7, 500).with_penalties(0.6, 0.5);
        let body = ApiRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
            sampling: &sampling,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "u");
        assert_eq!(json["max_tokens"], 500);
        assert!(json.get("presence_penalty").is_some());
        assert!(json.get("sampling").is_none());
    }

    #[test]
    fn choice_with_chat_style_logprobs_has_no_top_logprobs() {
        let api_choice: ApiChoice = serde_json::from_value(serde_json::json!({
            "message": {"content": "hi"},
            "finish_reason": "stop",
            "logprobs": {"content": [{"token": "hi", "logprob": -0.01, "top_logprobs": []}]}
        }))
        .unwrap();

        let choice = api_choice.into_choice().unwrap();
        assert!(choice.logprobs().unwrap().top_logprobs.is_empty());
    }

    #[test]
    fn choice_without_content_is_malformed() {
        let api_choice: ApiChoice = serde_json::from_value(serde_json::json!({
            "message": {"content": null},
            "finish_reason": "stop"
        }))
        .unwrap();
        assert!(api_choice.into_choice().unwrap_err().is_provider_error());
    }
}
