//! # faqmatch Core
//!
//! Matching engine for a small, static FAQ knowledge base.
//!
//! A query flows through:
//!
//! - [`Normalizer`] - lowercase, strip punctuation, canonicalize typos and synonyms
//! - [`VectorRanker`] - TF-IDF cosine ranking over every corpus question
//! - [`ContextGuard`] - drops candidates lacking a critical context's keywords
//! - [`FallbackMatcher`] - exact + fuzzy keyword overlap when ranking is not confident
//! - [`Matcher`] - runs the cascade and reports a [`MatchOutcome`]
//!
//! ## Example
//!
//! ```rust
//! use faqmatch_core::{Corpus, KnowledgeRecord, Matcher, MatcherConfig, MatchStrategy};
//!
//! let corpus = Corpus::from_categories(vec![(
//!     "fees",
//!     vec![KnowledgeRecord::new("What is the examination fee?", "Rs. 500 per course.")],
//! )]);
//! let matcher = Matcher::new(corpus, MatcherConfig::default()).unwrap();
//!
//! let outcome = matcher.find_match("exm fee").unwrap();
//! let matched = outcome.into_match().unwrap();
//! assert_eq!(matched.strategy, MatchStrategy::Vector);
//! assert_eq!(matched.category, "fees");
//! ```

pub mod config;
pub mod context;
pub mod corpus;
pub mod error;
pub mod fallback;
pub mod matcher;
pub mod normalize;
pub mod record;
pub mod stopwords;
pub mod tfidf;
pub mod vector;

pub use config::MatcherConfig;
pub use context::{ContextGuard, CriticalContext, QuestionFilter, DEFAULT_CONTEXTS};
pub use corpus::{Category, Corpus};
pub use error::{Error, Result};
pub use fallback::{FallbackMatcher, FallbackOutcome};
pub use matcher::{
    MatchOutcome, MatchResult, MatchStrategy, Matcher, MatcherBuilder, ALL_CATEGORIES,
    SAMPLES_PER_CATEGORY,
};
pub use normalize::{Normalizer, DEFAULT_SUBSTITUTIONS};
pub use record::KnowledgeRecord;
pub use tfidf::{VectorRanker, VectorSpace};
pub use vector::Vector;
