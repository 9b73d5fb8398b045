//! LLM Layer
//!
//! Everything that talks to the generative-model service:
//! - Provider abstraction (so the generator can be driven by a mock)
//! - Gemini client

pub mod gemini;
pub mod provider;

// Re-export key types
pub use gemini::GeminiProvider;
pub use provider::TextProvider;
