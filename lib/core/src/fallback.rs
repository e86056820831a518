//! Lexical fallback matcher.
//!
//! Used when the vector stage has no confident candidate. Each corpus
//! question is scored by keyword overlap with the query: a verbatim keyword
//! earns `exact_award`, an approximate one (normalized Levenshtein at or
//! above `fuzzy_cutoff`) earns `fuzzy_award`. The sum is divided by
//! `question_keywords + length_smoothing`.

use crate::context::QuestionFilter;
use crate::normalize::Normalizer;
use crate::{Corpus, MatcherConfig};
use ahash::AHashSet;
use strsim::normalized_levenshtein;

/// Shortest token treated as a keyword
const MIN_KEYWORD_CHARS: usize = 3;

/// Best fallback candidate; `index` is `None` when nothing cleared the
/// threshold. `score` is the best raw overlap seen either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackOutcome {
    pub index: Option<usize>,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct FallbackMatcher {
    questions: Vec<Vec<String>>,
    stop_words: AHashSet<String>,
    config: MatcherConfig,
}

impl FallbackMatcher {
    pub fn build(
        corpus: &Corpus,
        normalizer: &Normalizer,
        stop_words: AHashSet<String>,
        config: MatcherConfig,
    ) -> Self {
        let questions = corpus
            .questions()
            .map(|q| extract_keywords(&normalizer.normalize(q), &stop_words))
            .collect();
        Self {
            questions,
            stop_words,
            config,
        }
    }

    /// Keywords of the question at a flattened corpus index
    #[must_use]
    pub fn question_keywords(&self, index: usize) -> Option<&[String]> {
        self.questions.get(index).map(Vec::as_slice)
    }

    pub fn keywords(&self, normalized_text: &str) -> Vec<String> {
        extract_keywords(normalized_text, &self.stop_words)
    }

    /// Overlap score of query keywords against one question's keywords
    pub fn score(&self, query_keywords: &[String], question_keywords: &[String]) -> f32 {
        if query_keywords.is_empty() || question_keywords.is_empty() {
            return 0.0;
        }

        let cutoff = f64::from(self.config.fuzzy_cutoff);
        let mut total = 0.0f32;
        for keyword in query_keywords {
            if question_keywords.iter().any(|q| q == keyword) {
                total += self.config.exact_award;
            } else if question_keywords
                .iter()
                .any(|q| normalized_levenshtein(keyword, q) >= cutoff)
            {
                total += self.config.fuzzy_award;
            }
        }

        total / (question_keywords.len() as f32 + self.config.length_smoothing)
    }

    /// Highest-scoring question for a normalized query. Questions rejected by
    /// `filter` are skipped; ties keep the earliest index.
    pub fn best_match(
        &self,
        normalized_query: &str,
        filter: Option<&dyn QuestionFilter>,
        corpus: &Corpus,
    ) -> FallbackOutcome {
        let query_keywords = self.keywords(normalized_query);
        if query_keywords.is_empty() {
            return FallbackOutcome { index: None, score: 0.0 };
        }

        let mut best: Option<usize> = None;
        let mut best_score = 0.0f32;
        for (index, question_keywords) in self.questions.iter().enumerate() {
            if let Some(filter) = filter {
                let permitted = corpus
                    .get(index)
                    .map(|record| filter.permits(&record.question))
                    .unwrap_or(false);
                if !permitted {
                    continue;
                }
            }

            let score = self.score(&query_keywords, question_keywords);
            if score > best_score {
                best_score = score;
                best = Some(index);
            }
        }

        let index = best.filter(|_| best_score > self.config.fallback_threshold);
        FallbackOutcome {
            index,
            score: best_score,
        }
    }
}

/// Tokens of at least three characters, minus stop words, de-duplicated in
/// first-seen order
pub fn extract_keywords(normalized_text: &str, stop_words: &AHashSet<String>) -> Vec<String> {
    let mut seen = AHashSet::new();
    normalized_text
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_KEYWORD_CHARS)
        .filter(|t| !stop_words.contains(*t))
        .filter(|t| seen.insert(*t))
        .map(|t| t.to_string())
        .collect()
}
