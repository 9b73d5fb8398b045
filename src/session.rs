//! Session State Store
//!
//! One `Session` per user, owning everything the pages display: the current
//! page selector, the extracted document text, and the three generated
//! results. Access is single-threaded; renderers only borrow it for the
//! duration of a render pass.

use crate::generate::{Mcq, QaPair, StudySet, FALLBACK_TIPS};

/// The four navigable pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Mcqs,
    Descriptive,
    Tips,
}

impl Page {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Mcqs => "MCQs",
            Self::Descriptive => "Descriptive",
            Self::Tips => "Tips",
        }
    }

    /// All pages, in navigation order
    pub fn all() -> [Page; 4] {
        [Self::Home, Self::Mcqs, Self::Descriptive, Self::Tips]
    }
}

/// Per-session state. Created with defaults, mutated by the app loop, never
/// reset except through the initializer guard.
#[derive(Debug, Default)]
pub struct Session {
    pub page: Page,
    pub source_text: String,
    pub mcqs: Vec<Mcq>,
    pub descriptive: Vec<QaPair>,
    pub tips: String,
    initialized: bool,
}

impl Session {
    /// A fresh, initialized session.
    pub fn new() -> Self {
        let mut session = Self::default();
        session.initialize();
        session
    }

    /// Apply defaults to every field, once. Repeat calls are no-ops, so
    /// values written after the first call survive later calls.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.page = Page::Home;
        self.source_text.clear();
        self.mcqs.clear();
        self.descriptive.clear();
        self.tips.clear();
        self.initialized = true;
    }

    /// Store a completed generation batch.
    pub fn store_results(&mut self, set: StudySet) {
        self.mcqs = set.mcqs;
        self.descriptive = set.descriptive;
        self.tips = set.tips;
    }

    /// Reset all three results to their failure defaults. A failed batch
    /// discards everything, including steps that had already succeeded.
    pub fn reset_results(&mut self) {
        self.mcqs.clear();
        self.descriptive.clear();
        self.tips = FALLBACK_TIPS.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new();
        assert_eq!(session.page, Page::Home);
        assert!(session.source_text.is_empty());
        assert!(session.mcqs.is_empty());
        assert!(session.descriptive.is_empty());
        assert!(session.tips.is_empty());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut session = Session::new();
        session.source_text = "extracted".to_string();
        session.page = Page::Tips;

        session.initialize();

        assert_eq!(session.source_text, "extracted");
        assert_eq!(session.page, Page::Tips);
    }

    #[test]
    fn test_reset_results_applies_failure_defaults() {
        let mut session = Session::new();
        session.mcqs = vec![Mcq {
            question: "Q".to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        }];
        session.tips = "old tips".to_string();

        session.reset_results();

        assert!(session.mcqs.is_empty());
        assert!(session.descriptive.is_empty());
        assert_eq!(session.tips, FALLBACK_TIPS);
    }
}
