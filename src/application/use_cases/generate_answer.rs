use std::sync::Arc;

use tracing::{debug, error};

use crate::application::ChatClient;
use crate::domain::prompts::{answer_prompt, TUTOR_SYSTEM_PROMPT};
use crate::domain::{
    estimate_confidence, AnswerResult, Category, ChatMessage, ChatRequest, DomainError,
    SamplingParams,
};

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;
const PRESENCE_PENALTY: f32 = 0.6;
const FREQUENCY_PENALTY: f32 = 0.5;

pub struct GenerateAnswerUseCase {
    chat_client: Arc<dyn ChatClient>,
}

impl GenerateAnswerUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub fn build_request(question: &str, category: Category) -> ChatRequest {
        ChatRequest::new(
            vec![
                ChatMessage::system(TUTOR_SYSTEM_PROMPT),
                ChatMessage::user(answer_prompt(question, category)),
            ],
            SamplingParams::new(TEMPERATURE, MAX_TOKENS)
                .with_penalties(PRESENCE_PENALTY, FREQUENCY_PENALTY),
        )
    }

    pub async fn execute(
        &self,
        question: &str,
        category: Category,
    ) -> Result<AnswerResult, DomainError> {
        debug!("Generating answer (category={category}, model={})", self.chat_client.model());

        let request = Self::build_request(question, category);
        let choice = self.chat_client.complete(&request).await.map_err(|e| {
            error!("AI service error: {e}");
            DomainError::GenerationFailed
        })?;

        let confidence = estimate_confidence(&choice);
        Ok(AnswerResult::new(choice.into_content(), confidence))
    }
}
