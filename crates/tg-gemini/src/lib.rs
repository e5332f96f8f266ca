//! # TruthGuard Gemini
//!
//! The model provider seam and its Gemini implementation.

pub mod gemini;
pub mod provider;

pub use gemini::GeminiClient;
pub use provider::CompletionProvider;
