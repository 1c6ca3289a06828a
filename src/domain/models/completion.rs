use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ChatMessage;

/// Sampling knobs sent with every request. Penalties are optional and are
/// left out of the payload entirely when unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
}

impl SamplingParams {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            presence_penalty: None,
            frequency_penalty: None,
        }
    }

    pub fn with_penalties(mut self, presence: f32, frequency: f32) -> Self {
        self.presence_penalty = Some(presence);
        self.frequency_penalty = Some(frequency);
        self
    }
}

/// Provider-agnostic chat request. The model identifier is filled in by the
/// transport adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    messages: Vec<ChatMessage>,
    sampling: SamplingParams,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>, sampling: SamplingParams) -> Self {
        Self { messages, sampling }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn sampling(&self) -> &SamplingParams {
        &self.sampling
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    Other(String),
}

impl FinishReason {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("stop") => FinishReason::Stop,
            Some("length") => FinishReason::Length,
            Some(other) => FinishReason::Other(other.to_string()),
            None => FinishReason::Other(String::new()),
        }
    }
}

/// `top_logprobs` entries in payload order; each entry maps candidate tokens
/// to their log-probability, also in payload order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenLogprobs {
    #[serde(default)]
    pub top_logprobs: Vec<Map<String, Value>>,
}

impl TokenLogprobs {
    /// First value of every entry that has a numeric one.
    pub fn leading_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.top_logprobs
            .iter()
            .filter_map(|entry| entry.values().next().and_then(Value::as_f64))
    }
}

/// The first completion choice, reduced to what the use cases consume.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatChoice {
    content: String,
    finish_reason: FinishReason,
    logprobs: Option<TokenLogprobs>,
}

impl ChatChoice {
    pub fn new(content: impl Into<String>, finish_reason: FinishReason) -> Self {
        Self {
            content: content.into(),
            finish_reason,
            logprobs: None,
        }
    }

    pub fn with_logprobs(mut self, logprobs: TokenLogprobs) -> Self {
        self.logprobs = Some(logprobs);
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }

    pub fn finish_reason(&self) -> &FinishReason {
        &self.finish_reason
    }

    pub fn logprobs(&self) -> Option<&TokenLogprobs> {
        self.logprobs.as_ref()
    }
}
