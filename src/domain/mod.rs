//! # Domain Layer
//!
//! Conversation and answer models, the error type, and the pure logic that
//! builds prompts and scores completions. Nothing here touches the network.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
