//! GenQ - study material from your PDFs
//!
//! Load a PDF, send its text through the Gemini API three times (multiple
//! choice questions, descriptive questions, learning tips), and browse the
//! results across four pages in an interactive terminal session.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod generate;
pub mod llm;
pub mod render;
pub mod session;

// Re-export key types
pub use config::{Config, GeminiModel};
pub use error::{ExtractionError, GenerationError};
pub use extract::extract_text;
pub use generate::{Generator, Mcq, QaPair, StudySet, FALLBACK_TIPS, PROMPT_CONTEXT_LIMIT};
pub use llm::{GeminiProvider, TextProvider};
pub use render::{render_page, ViewState};
pub use session::{Page, Session};
