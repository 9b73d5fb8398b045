//! Page Router / Renderer
//!
//! A finite-state router over the four pages. `render_page` reads the
//! session and the transient view state and writes the page to any
//! `io::Write` sink, so every view is testable without a terminal.

use crate::session::{Page, Session};
use colored::*;
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

const GUIDANCE: &str = "Nothing here yet. Load a PDF on the Home page and run /generate first.";

/// Transient UI state for the current page: MCQ selections and revealed
/// descriptive answers. Never written back to the session; cleared on
/// navigation.
#[derive(Debug, Default)]
pub struct ViewState {
    selections: HashMap<usize, usize>,
    revealed: HashSet<usize>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.selections.clear();
        self.revealed.clear();
    }

    /// Record the chosen option for a question (both zero-based).
    pub fn select(&mut self, question: usize, option: usize) {
        self.selections.insert(question, option);
    }

    pub fn selection(&self, question: usize) -> Option<usize> {
        self.selections.get(&question).copied()
    }

    /// Flip the reveal toggle for a descriptive item (zero-based).
    /// Toggles are independent across items.
    pub fn toggle(&mut self, item: usize) {
        if !self.revealed.remove(&item) {
            self.revealed.insert(item);
        }
    }

    pub fn is_revealed(&self, item: usize) -> bool {
        self.revealed.contains(&item)
    }
}

/// Render the session's current page.
pub fn render_page<W: Write>(session: &Session, view: &ViewState, out: &mut W) -> io::Result<()> {
    render_nav(session.page, out)?;
    match session.page {
        Page::Home => render_home(session, out),
        Page::Mcqs => render_mcqs(session, view, out),
        Page::Descriptive => render_descriptive(session, view, out),
        Page::Tips => render_tips(session, out),
    }
}

fn render_nav<W: Write>(current: Page, out: &mut W) -> io::Result<()> {
    let items: Vec<String> = Page::all()
        .iter()
        .map(|page| {
            if *page == current {
                page.name().green().bold().to_string()
            } else {
                page.name().dimmed().to_string()
            }
        })
        .collect();
    writeln!(out)?;
    writeln!(out, "  {}", items.join("  ·  "))?;
    writeln!(out, "  {}", "─".repeat(42).dimmed())?;
    Ok(())
}

fn render_home<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    writeln!(out, "  {}", "Upload a PDF for question generation".green().bold())?;
    writeln!(out)?;

    if session.source_text.is_empty() {
        writeln!(out, "  {}", "No document loaded.".yellow())?;
        writeln!(
            out,
            "  {}  {}",
            "/open <path>".white(),
            "Extract text from a PDF".dimmed()
        )?;
    } else {
        writeln!(
            out,
            "  {} ({} characters extracted)",
            "Document loaded".green(),
            session.source_text.chars().count()
        )?;
        writeln!(
            out,
            "  {}  {}",
            "/generate".white(),
            "Create MCQs, descriptive questions and tips".dimmed()
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        "Browse results with /mcqs, /descriptive and /tips.".dimmed()
    )?;
    Ok(())
}

fn render_mcqs<W: Write>(session: &Session, view: &ViewState, out: &mut W) -> io::Result<()> {
    if session.mcqs.is_empty() {
        writeln!(out, "  {}", GUIDANCE.yellow())?;
        return Ok(());
    }

    for (idx, mcq) in session.mcqs.iter().enumerate() {
        writeln!(out, "  {}", format!("Question {}", idx + 1).cyan().bold())?;
        writeln!(out, "  {}", mcq.question)?;
        for (opt_idx, option) in mcq.options.iter().enumerate() {
            if view.selection(idx) == Some(opt_idx) {
                writeln!(out, "   {} {}", "▸".green(), option.white().bold())?;
            } else {
                writeln!(out, "     {}", option)?;
            }
        }
        writeln!(out)?;
    }
    writeln!(
        out,
        "  {}",
        "/pick <question> <a-d> selects an option (not scored).".dimmed()
    )?;
    Ok(())
}

fn render_descriptive<W: Write>(session: &Session, view: &ViewState, out: &mut W) -> io::Result<()> {
    if session.descriptive.is_empty() {
        writeln!(out, "  {}", GUIDANCE.yellow())?;
        return Ok(());
    }

    for (idx, pair) in session.descriptive.iter().enumerate() {
        writeln!(out, "  {}", format!("Question {}", idx + 1).cyan().bold())?;
        writeln!(out, "  {}", pair.question)?;
        if view.is_revealed(idx) {
            writeln!(out, "  {}", "Answer".green().bold())?;
            writeln!(out, "  {}", pair.answer)?;
        } else {
            writeln!(
                out,
                "  {}",
                format!("Answer hidden. /toggle {} reveals it.", idx + 1).dimmed()
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_tips<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    if session.tips.is_empty() {
        writeln!(out, "  {}", GUIDANCE.yellow())?;
        return Ok(());
    }

    writeln!(out, "  {}", "Learning Tips".green().bold())?;
    for line in session.tips.lines() {
        writeln!(out, "  {}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{Mcq, QaPair};

    fn rendered(session: &Session, view: &ViewState) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        render_page(session, view, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn session_with_results() -> Session {
        let mut session = Session::new();
        session.mcqs = vec![Mcq {
            question: "What does photosynthesis convert?".to_string(),
            options: vec![
                "a) Sound".to_string(),
                "b) Light ✓".to_string(),
                "c) Heat".to_string(),
                "d) Water".to_string(),
            ],
        }];
        session.descriptive = vec![QaPair {
            question: "Why is light important?".to_string(),
            answer: "It provides energy input.".to_string(),
        }];
        session.tips = "Tip 1\nTip 2".to_string();
        session
    }

    #[test]
    fn test_empty_pages_show_guidance() {
        let mut session = Session::new();
        for page in [Page::Mcqs, Page::Descriptive, Page::Tips] {
            session.page = page;
            let output = rendered(&session, &ViewState::new());
            assert!(output.contains(GUIDANCE), "page {:?} lacks guidance", page);
            assert!(!output.contains("Question 1"));
        }
    }

    #[test]
    fn test_mcq_page_lists_question_and_options() {
        let mut session = session_with_results();
        session.page = Page::Mcqs;
        let output = rendered(&session, &ViewState::new());

        assert!(output.contains("Question 1"));
        assert!(output.contains("What does photosynthesis convert?"));
        for option in &session.mcqs[0].options {
            assert!(output.contains(option.as_str()));
        }
    }

    #[test]
    fn test_mcq_selection_is_marked() {
        let mut session = session_with_results();
        session.page = Page::Mcqs;
        let mut view = ViewState::new();
        view.select(0, 2);

        let output = rendered(&session, &view);
        assert!(output.contains("▸ c) Heat"));
    }

    #[test]
    fn test_descriptive_answer_hidden_until_toggled() {
        let mut session = session_with_results();
        session.page = Page::Descriptive;
        let mut view = ViewState::new();

        let output = rendered(&session, &view);
        assert!(output.contains("Why is light important?"));
        assert!(output.contains("Answer hidden"));
        assert!(!output.contains("It provides energy input."));

        view.toggle(0);
        let output = rendered(&session, &view);
        assert!(output.contains("It provides energy input."));

        view.toggle(0);
        let output = rendered(&session, &view);
        assert!(!output.contains("It provides energy input."));
    }

    #[test]
    fn test_tips_render_line_by_line() {
        let mut session = session_with_results();
        session.page = Page::Tips;
        let output = rendered(&session, &ViewState::new());

        assert!(output.contains("  Tip 1\n"));
        assert!(output.contains("  Tip 2\n"));
    }

    #[test]
    fn test_nav_highlights_current_page() {
        let mut session = Session::new();
        session.page = Page::Tips;
        let output = rendered(&session, &ViewState::new());
        assert!(output.contains("Home"));
        assert!(output.contains("Tips"));
    }
}
