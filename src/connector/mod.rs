//! # Connector Layer
//!
//! Implementations of the [`crate::application::ChatClient`] port:
//! - OpenAI-style chat-completion endpoint over HTTP (reqwest)
//! - Scripted in-memory client for offline runs and tests

pub mod adapter;

pub use adapter::*;
