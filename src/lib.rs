//! # faqmatch
//!
//! A small, deterministic question matcher for a static FAQ knowledge base,
//! built for examination-policy queries with noisy phrasing.
//!
//! A raw query is normalized (typos and synonyms canonicalized), ranked by
//! TF-IDF cosine similarity against every corpus question, guarded against
//! off-topic matches by critical contexts, and, when no candidate is
//! confident enough, matched by exact + fuzzy keyword overlap.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! faqmatch --corpus ./data/knowledge_base.json --http-port 5000
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use faqmatch::prelude::*;
//!
//! let corpus = Corpus::from_json_str(r#"{
//!     "results": [
//!         { "question": "When will results be declared?", "answer": "Within 30 days." }
//!     ]
//! }"#).unwrap();
//! let matcher = Matcher::new(corpus, MatcherConfig::default()).unwrap();
//!
//! match matcher.find_match("when are results out?").unwrap() {
//!     MatchOutcome::Matched(m) => println!("{} ({:.2})", m.record.answer, m.confidence),
//!     MatchOutcome::NoMatch => println!("no answer"),
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `faqmatch-core` - Normalizer, vector ranker, context guard, fallback matcher, match selector
//! - `faqmatch-storage` - Corpus loading, feedback log, conversation log
//! - `faqmatch-api` - REST API

// Re-export core types
pub use faqmatch_core::{
    Corpus, KnowledgeRecord,
    Matcher, MatcherBuilder, MatcherConfig,
    MatchOutcome, MatchResult, MatchStrategy,
    Normalizer, ContextGuard, CriticalContext,
    VectorRanker, FallbackMatcher,
    Error, Result,
};

// Re-export storage
pub use faqmatch_storage::{load_corpus, ConversationLog, FeedbackLog};

// Re-export API
pub use faqmatch_api::{AppState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Corpus, KnowledgeRecord,
        Matcher, MatcherConfig,
        MatchOutcome, MatchStrategy,
        Error, Result,
        load_corpus,
    };
}
