use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::prompts::CLASSIFIER_SYSTEM_PROMPT;
use crate::domain::{Category, ChatMessage, ChatRequest, SamplingParams};

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 10;

/// Advisory classification. Never fails: provider errors and unexpected
/// output both degrade to [`Category::Other`].
pub struct CategorizeQuestionUseCase {
    chat_client: Arc<dyn ChatClient>,
}

impl CategorizeQuestionUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub fn build_request(question: &str) -> ChatRequest {
        ChatRequest::new(
            vec![
                ChatMessage::system(CLASSIFIER_SYSTEM_PROMPT),
                ChatMessage::user(question),
            ],
            SamplingParams::new(TEMPERATURE, MAX_TOKENS),
        )
    }

    pub async fn execute(&self, question: &str) -> Category {
        let request = Self::build_request(question);
        match self.chat_client.complete(&request).await {
            Ok(choice) => {
                let category = Category::from_model_output(choice.content());
                debug!("Classifier replied {:?} -> {category}", choice.content());
                category
            }
            Err(e) => {
                warn!("Category detection error: {e}. Falling back to '{}'.", Category::Other);
                Category::Other
            }
        }
    }
}
