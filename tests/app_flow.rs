//! End-to-end flows for GenQ, driven against a scripted provider.

use async_trait::async_trait;
use genq::app::{handle_action, Action, Outcome};
use genq::generate::Generator;
use genq::render::{render_page, ViewState};
use genq::{GenerationError, Page, Session, TextProvider, FALLBACK_TIPS};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const MCQ_JSON: &str = r#"[{"Question":"What does photosynthesis convert?","Options":["a) Sound","b) Light ✓","c) Heat","d) Water"]}]"#;
const DESC_JSON: &str = r#"[["Why is light important?","It provides energy input."]]"#;
const TIPS_TEXT: &str = "Tip 1\nTip 2";

/// Replays canned responses in call order.
struct ScriptedProvider {
    responses: Mutex<Vec<Result<String, GenerationError>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn new(responses: Vec<Result<String, GenerationError>>) -> Arc<Self> {
        let mut responses = responses;
        responses.reverse();
        Arc::new(Self {
            responses: Mutex::new(responses),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for ScriptedProvider {
    fn model_id(&self) -> &str {
        "scripted"
    }

    async fn generate_text(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop()
            .expect("provider called more times than scripted")
    }
}

fn rendered(session: &Session, view: &ViewState) -> String {
    colored::control::set_override(false);
    let mut out = Vec::new();
    render_page(session, view, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

async fn apply(
    action: Action,
    session: &mut Session,
    view: &mut ViewState,
    generator: &Generator,
) -> (Outcome, String) {
    colored::control::set_override(false);
    let mut out = Vec::new();
    let outcome = handle_action(action, session, view, generator, &mut out)
        .await
        .unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_full_study_flow() {
    let provider = ScriptedProvider::new(vec![
        Ok(MCQ_JSON.to_string()),
        Ok(DESC_JSON.to_string()),
        Ok(TIPS_TEXT.to_string()),
    ]);
    let generator = Generator::quiet(Arc::clone(&provider) as Arc<dyn TextProvider>);

    let mut session = Session::new();
    let mut view = ViewState::new();
    session.source_text = "Photosynthesis converts light to energy.".to_string();

    let (_, feedback) = apply(Action::Generate, &mut session, &mut view, &generator).await;
    assert!(feedback.contains("Questions generated successfully!"));
    assert_eq!(provider.calls(), 3);

    // MCQs page: one question with its four options
    apply(
        Action::Navigate(Page::Mcqs),
        &mut session,
        &mut view,
        &generator,
    )
    .await;
    let output = rendered(&session, &view);
    assert!(output.contains("What does photosynthesis convert?"));
    assert!(output.contains("a) Sound"));
    assert!(output.contains("b) Light ✓"));
    assert!(output.contains("c) Heat"));
    assert!(output.contains("d) Water"));

    // Selecting an option marks it, and is never scored or stored
    apply(
        Action::Pick {
            question: 0,
            option: 1,
        },
        &mut session,
        &mut view,
        &generator,
    )
    .await;
    let output = rendered(&session, &view);
    assert!(output.contains("▸ b) Light ✓"));

    // Descriptive page: answer hidden until toggled
    apply(
        Action::Navigate(Page::Descriptive),
        &mut session,
        &mut view,
        &generator,
    )
    .await;
    let output = rendered(&session, &view);
    assert!(output.contains("Why is light important?"));
    assert!(!output.contains("It provides energy input."));

    apply(Action::Toggle(0), &mut session, &mut view, &generator).await;
    let output = rendered(&session, &view);
    assert!(output.contains("It provides energy input."));

    // Tips page: two lines
    apply(
        Action::Navigate(Page::Tips),
        &mut session,
        &mut view,
        &generator,
    )
    .await;
    let output = rendered(&session, &view);
    assert!(output.contains("Tip 1"));
    assert!(output.contains("Tip 2"));
}

#[tokio::test]
async fn test_pages_guide_the_user_before_generation() {
    let provider = ScriptedProvider::new(vec![]);
    let generator = Generator::quiet(provider as Arc<dyn TextProvider>);

    let mut session = Session::new();
    let mut view = ViewState::new();

    let (_, _) = apply(
        Action::Navigate(Page::Mcqs),
        &mut session,
        &mut view,
        &generator,
    )
    .await;
    let output = rendered(&session, &view);
    assert!(output.contains("run /generate first"));
    assert!(!output.contains("Question 1"));
}

#[tokio::test]
async fn test_transport_error_resets_results_and_keeps_page() {
    let provider = ScriptedProvider::new(vec![Err(GenerationError::HttpStatus(
        reqwest::StatusCode::INTERNAL_SERVER_ERROR,
    ))]);
    let generator = Generator::quiet(Arc::clone(&provider) as Arc<dyn TextProvider>);

    let mut session = Session::new();
    let mut view = ViewState::new();
    session.source_text = "Some document text.".to_string();
    // Stale results from an earlier batch must not survive the failure
    session.tips = "old tips".to_string();

    let (outcome, feedback) = apply(Action::Generate, &mut session, &mut view, &generator).await;

    assert_eq!(outcome, Outcome::Continue);
    assert!(feedback.contains("Error generating content:"));
    assert_eq!(session.page, Page::Home, "failure must not change the page");
    assert!(session.mcqs.is_empty());
    assert!(session.descriptive.is_empty());
    assert_eq!(session.tips, FALLBACK_TIPS);
    assert_eq!(provider.calls(), 1, "the batch aborts on the first error");
}

#[tokio::test]
async fn test_mcq_parse_failure_discards_the_whole_batch() {
    let provider = ScriptedProvider::new(vec![Ok("I'm sorry, here are questions:".to_string())]);
    let generator = Generator::quiet(Arc::clone(&provider) as Arc<dyn TextProvider>);

    let mut session = Session::new();
    let mut view = ViewState::new();
    session.source_text = "Some document text.".to_string();

    let (_, feedback) = apply(Action::Generate, &mut session, &mut view, &generator).await;

    assert!(feedback.contains("Error generating content:"));
    assert!(session.mcqs.is_empty());
    assert!(session.descriptive.is_empty());
    assert_eq!(session.tips, FALLBACK_TIPS);
    assert_eq!(
        provider.calls(),
        1,
        "descriptive and tips calls must not be attempted"
    );
}

#[test]
fn test_session_initialization_is_idempotent_across_the_flow() {
    let mut session = Session::new();
    session.source_text = "kept".to_string();
    session.page = Page::Descriptive;

    session.initialize();

    assert_eq!(session.source_text, "kept");
    assert_eq!(session.page, Page::Descriptive);
}
