use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{Category, ChatChoice, ChatRequest, DomainError, FinishReason, Role};

/// Offline [`ChatClient`] that replays scripted outcomes in FIFO order and
/// records every request it receives.
///
/// When the script is empty it echoes a canned reply: a category token for
/// classification requests (`max_tokens` ≤ 10), otherwise a short answer that
/// quotes the last user turn.
pub struct MockChatClient {
    script: Mutex<VecDeque<Result<ChatChoice, DomainError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push_choice(&self, choice: ChatChoice) {
        self.lock_script().push_back(Ok(choice));
    }

    pub fn push_error(&self, error: DomainError) {
        self.lock_script().push_back(Err(error));
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<ChatChoice, DomainError>>> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn canned_reply(request: &ChatRequest) -> ChatChoice {
        if request.sampling().max_tokens <= 10 {
            return ChatChoice::new(Category::Study.as_str(), FinishReason::Stop);
        }

        let question = request
            .messages()
            .iter()
            .rev()
            .find(|m| m.role() == Role::User)
            .map(|m| m.content().lines().find(|l| l.starts_with("質問: ")).unwrap_or(m.content()))
            .unwrap_or_default();
        ChatChoice::new(
            format!("（モック回答）{question}"),
            FinishReason::Stop,
        )
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatChoice, DomainError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        let scripted = self.lock_script().pop_front();
        match scripted {
            Some(outcome) => outcome,
            None => {
                debug!("MockChatClient: script empty, returning canned reply");
                Ok(Self::canned_reply(request))
            }
        }
    }

    fn model(&self) -> &str {
        "mock-chat"
    }
}
