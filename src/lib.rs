pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    AiService, CategorizeQuestionUseCase, ChatClient, FollowUpQuestionUseCase,
    GenerateAnswerUseCase,
};

pub use connector::{MockChatClient, OpenAiChatClient, OpenAiConfig};

pub use domain::{
    estimate_confidence, AnswerResult, Category, ChatChoice, ChatMessage, ChatRequest,
    DomainError, FinishReason, Role, SamplingParams, TokenLogprobs,
};
