use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    answer: String,
    confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sources: Option<Vec<String>>,
}

impl AnswerResult {
    pub fn new(answer: impl Into<String>, confidence: f64) -> Self {
        Self {
            answer: answer.into(),
            confidence,
            sources: None,
        }
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn sources(&self) -> Option<&[String]> {
        self.sources.as_deref()
    }

    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}
