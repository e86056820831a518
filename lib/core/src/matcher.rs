//! Match selector: the normalize -> vector -> guard -> fallback cascade.
//!
//! Each stage runs at most once per query. The first stage that clears its
//! threshold decides the outcome; there is no backtracking.

use crate::context::{retain_permitted, ContextGuard, QuestionFilter, DEFAULT_CONTEXTS};
use crate::fallback::FallbackMatcher;
use crate::normalize::Normalizer;
use crate::stopwords::{fallback_stop_words, vector_stop_words};
use crate::tfidf::VectorRanker;
use crate::{Corpus, Error, KnowledgeRecord, MatcherConfig, Result};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Questions taken from each category when listing samples
pub const SAMPLES_PER_CATEGORY: usize = 5;

/// Category selector meaning "every category"
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    Vector,
    Fallback,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStrategy::Vector => write!(f, "vector"),
            MatchStrategy::Fallback => write!(f, "fallback"),
        }
    }
}

/// A successful match.
///
/// `confidence` is the raw cosine similarity for vector matches and the
/// configured constant (0.5 by default) for fallback matches; callers may
/// rely on the constant to tell the two apart.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub record: &'a KnowledgeRecord,
    pub category: &'a str,
    pub confidence: f32,
    pub strategy: MatchStrategy,
    pub corpus_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<'a> {
    Matched(MatchResult<'a>),
    /// Neither strategy cleared its threshold; confidence is 0
    NoMatch,
}

impl<'a> MatchOutcome<'a> {
    #[must_use]
    pub fn confidence(&self) -> f32 {
        match self {
            MatchOutcome::Matched(m) => m.confidence,
            MatchOutcome::NoMatch => 0.0,
        }
    }

    #[must_use]
    pub fn into_match(self) -> Option<MatchResult<'a>> {
        match self {
            MatchOutcome::Matched(m) => Some(m),
            MatchOutcome::NoMatch => None,
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }
}

/// The matching engine. Built once, read-only afterwards, safe to share
/// across threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    corpus: Corpus,
    normalizer: Normalizer,
    ranker: VectorRanker,
    guard: ContextGuard,
    fallback: FallbackMatcher,
    config: MatcherConfig,
}

impl Matcher {
    /// Build with the default substitution table, stop words and contexts
    pub fn new(corpus: Corpus, config: MatcherConfig) -> Result<Self> {
        MatcherBuilder::new(corpus).config(config).build()
    }

    pub fn builder(corpus: Corpus) -> MatcherBuilder {
        MatcherBuilder::new(corpus)
    }

    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[must_use]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    #[must_use]
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    #[must_use]
    pub fn ranker(&self) -> &VectorRanker {
        &self.ranker
    }

    #[must_use]
    pub fn guard(&self) -> &ContextGuard {
        &self.guard
    }

    #[must_use]
    pub fn fallback(&self) -> &FallbackMatcher {
        &self.fallback
    }

    /// Match a raw query against the corpus.
    ///
    /// Fails only with [`Error::EmptyQuery`]; every other problem degrades to
    /// [`MatchOutcome::NoMatch`].
    pub fn find_match(&self, raw_query: &str) -> Result<MatchOutcome<'_>> {
        if raw_query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }

        let normalized = self.normalizer.normalize(raw_query);
        debug!("Normalized {:?} -> {:?}", raw_query, normalized);

        let active = self.guard.active_context(raw_query);
        if let Some(context) = active {
            debug!("Critical context active: {}", context.label);
        }

        let ranked = self.ranker.rank(&normalized);
        let ranked_count = ranked.len();
        let candidates = match active {
            Some(context) => retain_permitted(context, ranked, &self.corpus),
            None => ranked,
        };
        debug!(
            "Vector stage: {} ranked, {} after context guard",
            ranked_count,
            candidates.len()
        );

        if let Some(&(index, score)) = candidates.first() {
            if score >= self.config.vector_threshold {
                if let Some(result) = self.result(index, score, MatchStrategy::Vector) {
                    debug!("Accepted vector match #{} (score {:.4})", index, score);
                    return Ok(MatchOutcome::Matched(result));
                }
            }
        }

        let filter = active.map(|c| c as &dyn QuestionFilter);
        let outcome = self.fallback.best_match(&normalized, filter, &self.corpus);
        if let Some(index) = outcome.index {
            if let Some(result) =
                self.result(index, self.config.fallback_confidence, MatchStrategy::Fallback)
            {
                debug!("Accepted fallback match #{} (overlap {:.4})", index, outcome.score);
                return Ok(MatchOutcome::Matched(result));
            }
        }

        debug!("No qualifying match (best overlap {:.4})", outcome.score);
        Ok(MatchOutcome::NoMatch)
    }

    fn result(&self, index: usize, confidence: f32, strategy: MatchStrategy) -> Option<MatchResult<'_>> {
        Some(MatchResult {
            record: self.corpus.get(index)?,
            category: self.corpus.category_of(index)?,
            confidence,
            strategy,
            corpus_index: index,
        })
    }

    /// Sample questions for `category` (or [`ALL_CATEGORIES`]): the first
    /// few non-empty questions of each selected category, in corpus order,
    /// truncated to `limit`.
    pub fn sample_questions(&self, category: &str, limit: usize) -> Vec<String> {
        self.corpus
            .categories()
            .iter()
            .filter(|c| category == ALL_CATEGORIES || c.name == category)
            .flat_map(|c| {
                c.records
                    .iter()
                    .filter(|r| r.has_question())
                    .take(SAMPLES_PER_CATEGORY)
                    .map(|r| r.question.clone())
            })
            .take(limit)
            .collect()
    }
}

/// Assembles a [`Matcher`] from injected components
pub struct MatcherBuilder {
    corpus: Corpus,
    config: MatcherConfig,
    normalizer: Normalizer,
    guard: ContextGuard,
    vector_stop_words: ahash::AHashSet<String>,
    fallback_stop_words: ahash::AHashSet<String>,
}

impl MatcherBuilder {
    pub fn new(corpus: Corpus) -> Self {
        Self {
            corpus,
            config: MatcherConfig::default(),
            normalizer: Normalizer::default(),
            guard: ContextGuard::from_table(DEFAULT_CONTEXTS),
            vector_stop_words: vector_stop_words(),
            fallback_stop_words: fallback_stop_words(),
        }
    }

    pub fn config(mut self, config: MatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn guard(mut self, guard: ContextGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn vector_stop_words(mut self, stop_words: ahash::AHashSet<String>) -> Self {
        self.vector_stop_words = stop_words;
        self
    }

    pub fn fallback_stop_words(mut self, stop_words: ahash::AHashSet<String>) -> Self {
        self.fallback_stop_words = stop_words;
        self
    }

    /// Validates the config and builds every derived structure. A corpus
    /// that cannot be vectorized is not an error: the matcher runs on the
    /// fallback stage alone.
    pub fn build(self) -> Result<Matcher> {
        self.config.validate()?;

        let ranker = VectorRanker::build(
            &self.corpus,
            &self.normalizer,
            self.vector_stop_words,
            self.config.top_k,
        );
        let fallback = FallbackMatcher::build(
            &self.corpus,
            &self.normalizer,
            self.fallback_stop_words,
            self.config,
        );

        Ok(Matcher {
            corpus: self.corpus,
            normalizer: self.normalizer,
            ranker,
            guard: self.guard,
            fallback,
            config: self.config,
        })
    }
}
