use async_trait::async_trait;

use crate::domain::{ChatChoice, ChatRequest, DomainError};

/// Sends a conversation to a chat-completion model and returns its first choice.
///
/// Implementors own transport, authentication and the provider's wire format.
/// Any failure (network, non-2xx status, malformed or empty payload) is
/// reported as an error; callers decide whether it is fatal.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatChoice, DomainError>;

    /// Model identifier sent with each request.
    fn model(&self) -> &str;
}
