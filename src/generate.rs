//! Content Generator
//!
//! Turns extracted document text into study material: multiple-choice
//! questions, descriptive question/answer pairs, and learning tips. Three
//! prompts go to the provider strictly in sequence; the structured responses
//! are strict-decoded. Failure is all-or-nothing for the batch: the first
//! transport or parse error aborts the remaining calls and the caller resets
//! every stored result to its default.

use crate::error::GenerationError;
use crate::llm::TextProvider;
use serde::Deserialize;
use std::io::{self, Write};
use std::sync::Arc;

/// Per-request cap on document text passed to a prompt, in characters.
pub const PROMPT_CONTEXT_LIMIT: usize = 4000;

/// Every MCQ carries exactly this many options.
pub const MCQ_OPTION_COUNT: usize = 4;

/// Stored as the tips value when a generation batch fails.
pub const FALLBACK_TIPS: &str = "Unable to generate tips. Please try again.";

/// A multiple-choice question. The correct option carries an embedded ✓
/// marker by convention; nothing validates or scores it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mcq {
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Options")]
    pub options: Vec<String>,
}

/// A descriptive question with its model-provided answer.
#[derive(Debug, Clone, PartialEq)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// The all-or-nothing result bundle of one generation batch.
#[derive(Debug, Clone, Default)]
pub struct StudySet {
    pub mcqs: Vec<Mcq>,
    pub descriptive: Vec<QaPair>,
    pub tips: String,
}

/// Announces generation phases on stderr ("Generating X... done").
struct PhaseReporter {
    /// Whether to show output (false for tests/quiet mode)
    show_output: bool,
}

impl PhaseReporter {
    fn start(&self, phase: &str) {
        if self.show_output {
            eprint!("  {}... ", phase);
            let _ = io::stderr().flush();
        }
    }

    fn done(&self) {
        if self.show_output {
            eprintln!("done");
        }
    }

    fn failed(&self) {
        if self.show_output {
            eprintln!("failed");
        }
    }
}

/// Drives the three-step generation batch against a provider.
pub struct Generator {
    provider: Arc<dyn TextProvider>,
    reporter: PhaseReporter,
}

impl Generator {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self {
            provider,
            reporter: PhaseReporter { show_output: true },
        }
    }

    /// A generator that stays silent about its phases.
    pub fn quiet(provider: Arc<dyn TextProvider>) -> Self {
        Self {
            provider,
            reporter: PhaseReporter { show_output: false },
        }
    }

    /// Generate the full study set for `text`.
    ///
    /// The input is truncated to its first [`PROMPT_CONTEXT_LIMIT`]
    /// characters for every prompt. Calls run in sequence; the first error
    /// aborts the batch.
    pub async fn generate(&self, text: &str) -> Result<StudySet, GenerationError> {
        let context = truncate_context(text);

        let mcqs = self
            .run_phase("Generating multiple choice questions", &mcq_prompt(context), parse_mcqs)
            .await?;
        let descriptive = self
            .run_phase(
                "Generating descriptive questions",
                &descriptive_prompt(context),
                parse_descriptive,
            )
            .await?;
        let tips = self
            .run_phase("Generating learning tips", &tips_prompt(context), |raw| {
                Ok(raw.trim().to_string())
            })
            .await?;

        Ok(StudySet {
            mcqs,
            descriptive,
            tips,
        })
    }

    async fn run_phase<T>(
        &self,
        phase: &str,
        prompt: &str,
        parse: impl FnOnce(&str) -> Result<T, GenerationError>,
    ) -> Result<T, GenerationError> {
        self.reporter.start(phase);
        let result = match self.provider.generate_text(prompt).await {
            Ok(raw) => parse(&raw),
            Err(e) => Err(e),
        };
        match &result {
            Ok(_) => self.reporter.done(),
            Err(_) => self.reporter.failed(),
        }
        result
    }
}

/// First [`PROMPT_CONTEXT_LIMIT`] characters of `text`, on a UTF-8 boundary.
pub fn truncate_context(text: &str) -> &str {
    match text.char_indices().nth(PROMPT_CONTEXT_LIMIT) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn mcq_prompt(context: &str) -> String {
    format!(
        "Create 5 precise multiple-choice questions that test deep understanding \
         of the core concepts in the following text. Each question must have a \
         clear, concise stem and exactly 4 plausible, distinct answer options. \
         Mark the correct option by appending ' ✓' to its text.\n\n\
         Text: {context}\n\n\
         Return ONLY a JSON array in this format, with no commentary and no \
         Markdown fences:\n\
         [{{\"Question\": \"...\", \"Options\": [\"a) ...\", \"b) ...\", \"c) ... ✓\", \"d) ...\"]}}]"
    )
}

fn descriptive_prompt(context: &str) -> String {
    format!(
        "Generate 3 thought-provoking descriptive questions about the following \
         text. For each, provide a comprehensive answer that explains the \
         reasoning.\n\n\
         Text: {context}\n\n\
         Return ONLY a JSON array of two-element arrays, with no commentary and \
         no Markdown fences:\n\
         [[\"question\", \"answer\"]]"
    )
}

fn tips_prompt(context: &str) -> String {
    format!(
        "Generate 5-7 advanced learning tips that help a learner deeply \
         understand and retain the key concepts from the following text. Focus \
         on metacognitive strategies, practical application techniques, and \
         critical thinking approaches. Put each tip on its own line.\n\n\
         Text: {context}"
    )
}

/// Unwrap one outer Markdown code fence, if present. The API habitually
/// fences JSON payloads even when told not to; decoding after unfencing is
/// still strict.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => return trimmed,
    };
    match body.strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}

/// Strict decode of the MCQ response: a JSON array of `Question`/`Options`
/// records, each with exactly 4 options.
pub fn parse_mcqs(raw: &str) -> Result<Vec<Mcq>, GenerationError> {
    let mcqs: Vec<Mcq> = serde_json::from_str(strip_code_fence(raw))
        .map_err(|source| GenerationError::Parse { kind: "MCQ", source })?;

    for (idx, mcq) in mcqs.iter().enumerate() {
        if mcq.options.len() != MCQ_OPTION_COUNT {
            return Err(GenerationError::Shape {
                kind: "MCQ",
                detail: format!(
                    "question {} has {} options, expected {}",
                    idx + 1,
                    mcq.options.len(),
                    MCQ_OPTION_COUNT
                ),
            });
        }
    }

    Ok(mcqs)
}

/// Strict decode of the descriptive response: a JSON array of
/// `[question, answer]` pairs.
pub fn parse_descriptive(raw: &str) -> Result<Vec<QaPair>, GenerationError> {
    let pairs: Vec<(String, String)> = serde_json::from_str(strip_code_fence(raw))
        .map_err(|source| GenerationError::Parse {
            kind: "descriptive",
            source,
        })?;

    Ok(pairs
        .into_iter()
        .map(|(question, answer)| QaPair { question, answer })
        .collect())
}
