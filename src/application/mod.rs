//! # Application Layer
//!
//! The chat-completion port, one use case per operation, and the
//! [`AiService`] facade that wires them to a single client.

mod ai_service;
pub mod interfaces;
pub mod use_cases;

pub use ai_service::*;
pub use interfaces::*;
pub use use_cases::*;
