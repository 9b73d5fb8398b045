//! The Provider Abstraction.
//!
//! This trait defines the standard interface for any generative-text backend.
//! The content generator only ever sees this seam, which keeps it testable
//! without network access.

use crate::error::GenerationError;
use async_trait::async_trait;

/// The core trait for prompt-in, text-out interactions.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Identifier of the model answering the prompts.
    fn model_id(&self) -> &str;

    /// Send a single prompt and return the model's text response.
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError>;
}
