use std::sync::{Arc, OnceLock};

use tracing::info;

use crate::application::{
    CategorizeQuestionUseCase, ChatClient, FollowUpQuestionUseCase, GenerateAnswerUseCase,
};
use crate::connector::{OpenAiChatClient, OpenAiConfig};
use crate::domain::{AnswerResult, Category, DomainError};

static SHARED: OnceLock<Arc<AiService>> = OnceLock::new();

/// Education-support facade over a [`ChatClient`]: answers questions, classifies
/// them, and continues an earlier exchange.
///
/// Construct one explicitly and hand it to whatever needs it. [`AiService::shared`]
/// exists for callers that want a single process-wide instance instead.
pub struct AiService {
    chat_client: Arc<dyn ChatClient>,
    generate: GenerateAnswerUseCase,
    categorize: CategorizeQuestionUseCase,
    follow_up: FollowUpQuestionUseCase,
}

impl AiService {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            generate: GenerateAnswerUseCase::new(chat_client.clone()),
            categorize: CategorizeQuestionUseCase::new(chat_client.clone()),
            follow_up: FollowUpQuestionUseCase::new(chat_client.clone()),
            chat_client,
        }
    }

    /// Build a service backed by the hosted chat-completion API.
    pub fn with_credentials(
        api_key: impl Into<String>,
        model: Option<String>,
    ) -> Result<Self, DomainError> {
        let mut config = OpenAiConfig::new(api_key);
        if let Some(model) = model {
            config = config.with_model(model);
        }
        Ok(Self::new(Arc::new(OpenAiChatClient::new(config)?)))
    }

    /// Process-wide instance. The first successful construction wins; later
    /// calls return it and ignore their arguments.
    pub fn shared(
        api_key: impl Into<String>,
        model: Option<String>,
    ) -> Result<Arc<AiService>, DomainError> {
        if let Some(service) = SHARED.get() {
            return Ok(service.clone());
        }

        let service = Arc::new(Self::with_credentials(api_key, model)?);
        if SHARED.set(service).is_ok() {
            info!("Initialized shared AI service");
        }
        SHARED
            .get()
            .cloned()
            .ok_or_else(|| DomainError::config("shared AI service was not initialized"))
    }

    pub fn model(&self) -> &str {
        self.chat_client.model()
    }

    pub async fn generate_answer(
        &self,
        question: &str,
        category: Category,
    ) -> Result<AnswerResult, DomainError> {
        self.generate.execute(question, category).await
    }

    pub async fn categorize_question(&self, question: &str) -> Category {
        self.categorize.execute(question).await
    }

    pub async fn follow_up_question(
        &self,
        original_question: &str,
        prior_answer: &str,
        follow_up: &str,
    ) -> Result<AnswerResult, DomainError> {
        self.follow_up
            .execute(original_question, prior_answer, follow_up)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::MockChatClient;
    use crate::domain::{ChatChoice, FinishReason, Role};

    #[tokio::test]
    async fn generate_answer_without_logprobs_scores_085() {
        let client = Arc::new(MockChatClient::new());
        client.push_choice(ChatChoice::new("answer text", FinishReason::Stop));
        let service = AiService::new(client.clone());

        let result = service
            .generate_answer("効率的な学習方法は？", Category::Study)
            .await
            .unwrap();

        assert_eq!(result.answer(), "answer text");
        assert_eq!(result.confidence(), 0.85);

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        let roles: Vec<Role> = requests[0].messages().iter().map(|m| m.role()).collect();
        assert_eq!(roles, vec![Role::System, Role::User]);
        assert!(requests[0].messages()[1].content().contains("カテゴリー: 学習"));
        assert_eq!(requests[0].sampling().presence_penalty, Some(0.6));
        assert_eq!(requests[0].sampling().frequency_penalty, Some(0.5));
    }

    #[tokio::test]
    async fn generate_answer_hides_provider_error() {
        let client = Arc::new(MockChatClient::new());
        client.push_error(DomainError::provider("API returned 500 Internal Server Error"));
        let service = AiService::new(client);

        let err = service
            .generate_answer("question", Category::Exam)
            .await
            .unwrap_err();
        assert!(err.is_generation_failed());
    }

    #[tokio::test]
    async fn categorize_question_degrades_to_other() {
        let client = Arc::new(MockChatClient::new());
        client.push_choice(ChatChoice::new(" Career \n", FinishReason::Stop));
        client.push_choice(ChatChoice::new("hobby", FinishReason::Stop));
        client.push_error(DomainError::provider("connection refused"));
        let service = AiService::new(client);

        assert_eq!(service.categorize_question("q").await, Category::Career);
        assert_eq!(service.categorize_question("q").await, Category::Other);
        assert_eq!(service.categorize_question("q").await, Category::Other);
    }

    #[tokio::test]
    async fn follow_up_truncated_scores_065() {
        let client = Arc::new(MockChatClient::new());
        client.push_choice(ChatChoice::new("more", FinishReason::Length));
        let service = AiService::new(client.clone());

        let result = service.follow_up_question("q1", "a1", "q2").await.unwrap();
        assert_eq!(result.confidence(), 0.65);
        assert_eq!(client.requests()[0].messages().len(), 4);
    }

    #[test]
    fn empty_credentials_are_rejected() {
        let err = AiService::with_credentials("   ", None).err().unwrap();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
