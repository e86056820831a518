// Query normalization: lowercase, strip punctuation, canonicalize tokens
use ahash::AHashMap;

/// Ordered token substitution table (typo/synonym/plural -> canonical).
///
/// Invariant: no token of a canonical value is itself a key, so normalizing
/// already-normalized text is a no-op.
pub const DEFAULT_SUBSTITUTIONS: &[(&str, &str)] = &[
    // examination
    ("exam", "examination"),
    ("exams", "examination"),
    ("exm", "examination"),
    ("exms", "examination"),
    ("examinations", "examination"),
    ("examintion", "examination"),
    // fees
    ("fees", "fee"),
    ("feee", "fee"),
    // results
    ("results", "result"),
    ("reslt", "result"),
    ("rslt", "result"),
    // certificates
    ("certificates", "certificate"),
    ("certifcate", "certificate"),
    ("certficate", "certificate"),
    ("certifcates", "certificate"),
    ("cert", "certificate"),
    ("certs", "certificate"),
    ("provisonal", "provisional"),
    ("degrees", "degree"),
    ("marksheet", "grade card"),
    ("marksheets", "grade card"),
    ("gradecard", "grade card"),
    ("gradecards", "grade card"),
    // transcripts
    ("transcripts", "transcript"),
    ("transcripttt", "transcript"),
    ("transcrpt", "transcript"),
    ("trancript", "transcript"),
    // registration
    ("regstr", "registration"),
    ("registr", "registration"),
    ("regestration", "registration"),
    ("registeration", "registration"),
    ("registrations", "registration"),
    // exam hall rules
    ("hallticket", "hall ticket"),
    ("halltickets", "hall ticket"),
    ("tickets", "ticket"),
    ("attendence", "attendance"),
    ("atendance", "attendance"),
    ("phone", "mobile"),
    ("phones", "mobile"),
    ("cellphone", "mobile"),
    ("mobiles", "mobile"),
    ("smartphone", "mobile"),
    // malpractice
    ("malpractise", "malpractice"),
    ("malpractices", "malpractice"),
    ("cheat", "cheating"),
    ("cheated", "cheating"),
    ("copied", "copy"),
    // review
    ("reval", "revaluation"),
    ("revaluations", "revaluation"),
    ("retotal", "retotaling"),
    ("retotalling", "retotaling"),
    ("duplicat", "duplicate"),
    ("dupliate", "duplicate"),
    // misc
    ("sem", "semester"),
    ("sems", "semester"),
    ("semesters", "semester"),
    ("pls", "please"),
    ("plz", "please"),
    ("ur", "your"),
    ("u", "you"),
];

/// Lowercase `text` and drop every character that is neither alphanumeric
/// nor whitespace. Whitespace is left as-is.
pub fn strip_punctuation(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Canonicalizes raw query text
#[derive(Debug, Clone)]
pub struct Normalizer {
    substitutions: AHashMap<String, String>,
}

impl Normalizer {
    /// Build from an ordered table; the first entry for a key wins.
    pub fn new(table: &[(&str, &str)]) -> Self {
        let mut substitutions = AHashMap::with_capacity(table.len());
        for (from, to) in table {
            substitutions
                .entry(from.to_string())
                .or_insert_with(|| to.to_string());
        }
        Self { substitutions }
    }

    /// A normalizer that only lowercases and strips punctuation
    pub fn identity() -> Self {
        Self {
            substitutions: AHashMap::new(),
        }
    }

    /// Lowercase, strip punctuation, substitute each whitespace-separated
    /// token independently and rejoin with single spaces.
    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = strip_punctuation(raw);
        let mut out = String::with_capacity(cleaned.len());
        for token in cleaned.split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            match self.substitutions.get(token) {
                Some(canonical) => out.push_str(canonical),
                None => out.push_str(token),
            }
        }
        out
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.substitutions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_SUBSTITUTIONS)
    }
}
