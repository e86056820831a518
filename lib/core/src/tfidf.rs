//! Vector ranker: TF-IDF vector space over corpus questions.
//!
//! The space is built once from the (normalized) corpus questions and is
//! read-only afterwards. Vocabulary indices come from a sorted term list,
//! so two builds over the same corpus produce identical vectors.

use crate::normalize::Normalizer;
use crate::{Corpus, Error, Result, Vector};
use ahash::{AHashMap, AHashSet};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error, warn};

/// Minimum token length kept by the vector tokenizer
const MIN_TOKEN_CHARS: usize = 2;

/// Tokenize normalized text: alphanumeric runs of at least two characters,
/// stop words removed.
pub fn tokenize(text: &str, stop_words: &AHashSet<String>) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|t| !stop_words.contains(*t))
        .map(|t| t.to_string())
        .collect()
}

/// Term-weighted vector space over a fixed set of documents
#[derive(Debug, Clone)]
pub struct VectorSpace {
    terms: Vec<String>,
    vocabulary: AHashMap<String, usize>,
    idf: Vec<f32>,
    vectors: Vec<Vector>,
    stop_words: AHashSet<String>,
}

impl VectorSpace {
    /// Build from documents in index order.
    ///
    /// IDF is smoothed: `ln((1 + n) / (1 + df)) + 1`. Document vectors are
    /// raw term counts times IDF, L2-normalized.
    pub fn build<'a, I>(documents: I, stop_words: AHashSet<String>) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tokenized: Vec<Vec<String>> = documents
            .into_iter()
            .map(|d| tokenize(d, &stop_words))
            .collect();

        if tokenized.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let mut doc_freq: BTreeMap<&str, u32> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let n = tokenized.len() as f32;
        let terms: Vec<String> = doc_freq.keys().map(|t| t.to_string()).collect();
        let idf: Vec<f32> = doc_freq
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();
        let vocabulary: AHashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        let mut space = Self {
            terms,
            vocabulary,
            idf,
            vectors: Vec::with_capacity(tokenized.len()),
            stop_words,
        };

        for (i, tokens) in tokenized.iter().enumerate() {
            let vector = space.weigh(tokens);
            if !vector.is_finite() {
                return Err(Error::Vectorization(format!(
                    "document {} produced a non-finite weight",
                    i
                )));
            }
            space.vectors.push(vector);
        }

        debug!(
            "Vector space built: {} documents, {} terms",
            space.vectors.len(),
            space.terms.len()
        );
        Ok(space)
    }

    fn weigh(&self, tokens: &[String]) -> Vector {
        let mut vector = Vector::zeros(self.terms.len());
        let data = vector.as_mut_slice();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                data[idx] += self.idf[idx];
            }
        }
        vector.normalize();
        vector
    }

    /// Project text into the space; out-of-vocabulary terms contribute nothing
    pub fn embed(&self, text: &str) -> Vector {
        self.weigh(&tokenize(text, &self.stop_words))
    }

    /// Cosine similarity of `query` against every document, descending.
    /// Zero-similarity documents are dropped; ties keep index order.
    pub fn rank(&self, query: &str, limit: usize) -> Result<Vec<(usize, f32)>> {
        let query_vector = self.embed(query);
        if query_vector.is_zero() {
            return Ok(Vec::new());
        }

        let mut scored = Vec::new();
        for (i, doc) in self.vectors.iter().enumerate() {
            let score = query_vector.cosine_similarity(doc);
            if !score.is_finite() {
                return Err(Error::Vectorization(format!(
                    "non-finite similarity against document {}",
                    i
                )));
            }
            if score > 0.0 {
                scored.push((i, score));
            }
        }

        // sort_by is stable: equal scores stay in insertion order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        Ok(scored)
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn vector(&self, index: usize) -> Option<&Vector> {
        self.vectors.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Ranks corpus questions against a query.
///
/// When the space could not be built the ranker is still usable and
/// always returns an empty candidate list.
#[derive(Debug, Clone)]
pub struct VectorRanker {
    space: Option<VectorSpace>,
    top_k: usize,
}

impl VectorRanker {
    pub fn build(
        corpus: &Corpus,
        normalizer: &Normalizer,
        stop_words: AHashSet<String>,
        top_k: usize,
    ) -> Self {
        let documents: Vec<String> = corpus.questions().map(|q| normalizer.normalize(q)).collect();
        let space = match VectorSpace::build(documents.iter().map(String::as_str), stop_words) {
            Ok(space) => Some(space),
            Err(Error::EmptyCorpus) => {
                warn!("Corpus has no vectorizable questions; vector ranking disabled");
                None
            }
            Err(e) => {
                error!("Failed to build vector space: {}; vector ranking disabled", e);
                None
            }
        };
        Self { space, top_k }
    }

    /// A ranker with no vector space
    pub fn unavailable(top_k: usize) -> Self {
        Self { space: None, top_k }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.space.is_some()
    }

    #[must_use]
    pub fn space(&self) -> Option<&VectorSpace> {
        self.space.as_ref()
    }

    /// Top-k `(index, score)` pairs for an already-normalized query
    pub fn rank(&self, query: &str) -> Vec<(usize, f32)> {
        let Some(space) = &self.space else {
            return Vec::new();
        };
        match space.rank(query, self.top_k) {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("Vector ranking failed for {:?}: {}", query, e);
                Vec::new()
            }
        }
    }
}
