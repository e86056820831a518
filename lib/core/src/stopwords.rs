// Stop-word sets for the vector and fallback stages
use ahash::AHashSet;

/// Standard English stop words plus domain verbs that appear in most
/// questions of an examination FAQ and would otherwise dominate matches.
pub const VECTOR_STOP_WORDS: &[&str] = &[
    // english
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
    // domain verbs
    "get", "got", "apply", "need", "want", "know", "tell", "give", "find", "please", "may",
    "must", "shall",
];

/// Extra words removed only by the fallback stage: interrogative forms and
/// conversational filler that carry no topic.
pub const FALLBACK_EXTRA_STOP_WORDS: &[&str] = &[
    "whose", "whats", "hows", "whens", "wheres", "whos", "ask", "asking", "help",
    "regarding", "related", "info", "information", "details", "detail", "kindly", "hello", "hey",
    "thanks", "thank", "also", "anyone", "someone", "something", "thing", "things",
    "able", "going", "let", "like", "say", "said", "way", "ways",
];

pub fn vector_stop_words() -> AHashSet<String> {
    VECTOR_STOP_WORDS.iter().map(|w| w.to_string()).collect()
}

/// Superset of [`vector_stop_words`]
pub fn fallback_stop_words() -> AHashSet<String> {
    VECTOR_STOP_WORDS
        .iter()
        .chain(FALLBACK_EXTRA_STOP_WORDS)
        .map(|w| w.to_string())
        .collect()
}
