use std::sync::Arc;

use tracing::{debug, error};

use crate::application::ChatClient;
use crate::domain::prompts::FOLLOW_UP_SYSTEM_PROMPT;
use crate::domain::{
    estimate_confidence, AnswerResult, ChatMessage, ChatRequest, DomainError, SamplingParams,
};

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

pub struct FollowUpQuestionUseCase {
    chat_client: Arc<dyn ChatClient>,
}

impl FollowUpQuestionUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    /// Replays the earlier exchange before the new question:
    /// system, user (original), assistant (prior answer), user (follow-up).
    pub fn build_request(original_question: &str, prior_answer: &str, follow_up: &str) -> ChatRequest {
        ChatRequest::new(
            vec![
                ChatMessage::system(FOLLOW_UP_SYSTEM_PROMPT),
                ChatMessage::user(original_question),
                ChatMessage::assistant(prior_answer),
                ChatMessage::user(follow_up),
            ],
            SamplingParams::new(TEMPERATURE, MAX_TOKENS),
        )
    }

    pub async fn execute(
        &self,
        original_question: &str,
        prior_answer: &str,
        follow_up: &str,
    ) -> Result<AnswerResult, DomainError> {
        debug!("Answering follow-up (model={})", self.chat_client.model());

        let request = Self::build_request(original_question, prior_answer, follow_up);
        let choice = self.chat_client.complete(&request).await.map_err(|e| {
            error!("Follow-up question error: {e}");
            DomainError::GenerationFailed
        })?;

        let confidence = estimate_confidence(&choice);
        Ok(AnswerResult::new(choice.into_content(), confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn request_replays_exchange_in_order() {
        let request = FollowUpQuestionUseCase::build_request("q1", "a1", "q2");
        let turns: Vec<(Role, &str)> = request
            .messages()
            .iter()
            .map(|m| (m.role(), m.content()))
            .collect();

        assert_eq!(
            turns,
            vec![
                (Role::System, FOLLOW_UP_SYSTEM_PROMPT),
                (Role::User, "q1"),
                (Role::Assistant, "a1"),
                (Role::User, "q2"),
            ]
        );
        assert_eq!(request.sampling().presence_penalty, None);
        assert_eq!(request.sampling().max_tokens, 500);
    }
}
