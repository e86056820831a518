// Critical-context guard: rejects candidates that lack the query's topic
use crate::normalize::strip_punctuation;
use crate::Corpus;
use ahash::AHashSet;

/// Default critical contexts, in priority order.
///
/// Activation is first-match in this order: a query carrying keywords of two
/// contexts activates whichever is declared first.
pub const DEFAULT_CONTEXTS: &[(&str, &[&str])] = &[
    (
        "malpractice",
        &["malpractice", "punishment", "caught", "cheating", "mobile", "copy"],
    ),
    (
        "revaluation",
        &["revaluation", "retotaling", "review", "photocopy"],
    ),
    ("duplicate", &["duplicate", "lost"]),
    (
        "attestation",
        &["esanad", "attestation", "verification", "apostille"],
    ),
];

pub trait QuestionFilter {
    fn permits(&self, question: &str) -> bool;
}

/// A topic whose presence in a query requires matching topical keywords in
/// the answer's question
#[derive(Debug, Clone)]
pub struct CriticalContext {
    pub label: String,
    keywords: Vec<String>,
    lookup: AHashSet<String>,
}

impl CriticalContext {
    pub fn new<S: Into<String>>(label: impl Into<String>, keywords: impl IntoIterator<Item = S>) -> Self {
        let mut ordered = Vec::new();
        let mut lookup = AHashSet::new();
        for keyword in keywords {
            let keyword = keyword.into().to_lowercase();
            if lookup.insert(keyword.clone()) {
                ordered.push(keyword);
            }
        }
        Self {
            label: label.into(),
            keywords: ordered,
            lookup,
        }
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when any query token is one of this context's keywords
    fn triggered_by(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|t| self.lookup.contains(*t))
    }
}

impl QuestionFilter for CriticalContext {
    /// Substring test against the lowercased question, so `copy` also
    /// retains a question about `copying`.
    fn permits(&self, question: &str) -> bool {
        let question = question.to_lowercase();
        self.keywords.iter().any(|k| question.contains(k.as_str()))
    }
}

/// Ordered table of critical contexts
#[derive(Debug, Clone, Default)]
pub struct ContextGuard {
    contexts: Vec<CriticalContext>,
}

impl ContextGuard {
    pub fn new(contexts: Vec<CriticalContext>) -> Self {
        Self { contexts }
    }

    pub fn from_table(table: &[(&str, &[&str])]) -> Self {
        Self::new(
            table
                .iter()
                .map(|(label, keywords)| CriticalContext::new(*label, keywords.iter().copied()))
                .collect(),
        )
    }

    /// A guard that never activates
    pub fn disabled() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contexts(&self) -> &[CriticalContext] {
        &self.contexts
    }

    /// First context, in declaration order, triggered by the raw query
    pub fn active_context(&self, raw_query: &str) -> Option<&CriticalContext> {
        let cleaned = strip_punctuation(raw_query);
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        self.contexts.iter().find(|c| c.triggered_by(&tokens))
    }

    /// Drop candidates whose question lacks the active context's keywords.
    /// Order and scores of survivors are untouched.
    pub fn filter(
        &self,
        raw_query: &str,
        candidates: Vec<(usize, f32)>,
        corpus: &Corpus,
    ) -> Vec<(usize, f32)> {
        match self.active_context(raw_query) {
            Some(context) => retain_permitted(context, candidates, corpus),
            None => candidates,
        }
    }
}

pub(crate) fn retain_permitted(
    filter: &dyn QuestionFilter,
    candidates: Vec<(usize, f32)>,
    corpus: &Corpus,
) -> Vec<(usize, f32)> {
    candidates
        .into_iter()
        .filter(|(index, _)| {
            corpus
                .get(*index)
                .map(|record| filter.permits(&record.question))
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KnowledgeRecord;

    fn corpus() -> Corpus {
        Corpus::from_categories(vec![
            ("results", vec![KnowledgeRecord::new("Why is my result held?", "Pending dues.")]),
            (
                "malpractice",
                vec![KnowledgeRecord::new(
                    "What happens to the result of a student caught in malpractice?",
                    "Result is withheld.",
                )],
            ),
            ("rules", vec![KnowledgeRecord::new("Is copying from notes allowed?", "No.")]),
        ])
    }

    #[test]
    fn test_active_context_first_match_wins() {
        let guard = ContextGuard::from_table(DEFAULT_CONTEXTS);
        assert_eq!(
            guard.active_context("Malpractice, held result!").map(|c| c.label.as_str()),
            Some("malpractice")
        );
        // both malpractice and duplicate keywords: declaration order decides
        assert_eq!(
            guard.active_context("lost my mobile during malpractice hearing").map(|c| c.label.as_str()),
            Some("malpractice")
        );
        assert_eq!(
            guard.active_context("I lost my certificate").map(|c| c.label.as_str()),
            Some("duplicate")
        );
        assert!(guard.active_context("when will results be out").is_none());
    }

    #[test]
    fn test_activation_is_token_based() {
        let guard = ContextGuard::from_table(DEFAULT_CONTEXTS);
        // "copyright" contains "copy" but is a different token
        assert!(guard.active_context("copyright notice").is_none());
    }

    #[test]
    fn test_filter_drops_off_topic_candidates() {
        let guard = ContextGuard::from_table(DEFAULT_CONTEXTS);
        let corpus = corpus();
        let candidates = vec![(0, 0.9), (1, 0.4), (2, 0.1)];

        // "copying" carries the "copy" keyword and survives
        let kept = guard.filter("malpractice held result", candidates, &corpus);
        assert_eq!(kept, vec![(1, 0.4), (2, 0.1)]);
    }

    #[test]
    fn test_filter_substring_retention() {
        let guard = ContextGuard::new(vec![CriticalContext::new("copying", ["copy"])]);
        let corpus = corpus();
        let kept = guard.filter("can I copy", vec![(2, 0.3), (0, 0.2)], &corpus);
        assert_eq!(kept, vec![(2, 0.3)]);
    }

    #[test]
    fn test_no_active_context_passes_everything() {
        let guard = ContextGuard::from_table(DEFAULT_CONTEXTS);
        let corpus = corpus();
        let candidates = vec![(0, 0.9), (1, 0.4)];
        assert_eq!(guard.filter("result held", candidates.clone(), &corpus), candidates);
        assert_eq!(ContextGuard::disabled().filter("malpractice", candidates.clone(), &corpus), candidates);
    }

    #[test]
    fn test_keywords_deduplicated_and_lowercased() {
        let context = CriticalContext::new("x", ["Lost", "lost", "DUPLICATE"]);
        assert_eq!(context.keywords(), &["lost", "duplicate"]);
    }
}
