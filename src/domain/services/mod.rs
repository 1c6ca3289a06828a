//! Domain services: prompt construction and confidence scoring.

pub mod confidence;
pub mod prompts;

pub use confidence::estimate_confidence;
