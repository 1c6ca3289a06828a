use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Opaque failure surfaced by the generation operations. The underlying
    /// provider error is logged, never carried.
    #[error("AI回答の生成に失敗しました")]
    GenerationFailed,

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn is_generation_failed(&self) -> bool {
        matches!(self, Self::GenerationFailed)
    }

    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}
