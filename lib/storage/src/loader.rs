use anyhow::{Context, Result};
use faqmatch_core::Corpus;
use std::path::Path;
use tracing::info;

/// Read and parse a corpus file (category name -> array of records)
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus file {}", path.display()))?;
    let corpus = Corpus::from_json_str(&json)
        .with_context(|| format!("failed to parse corpus file {}", path.display()))?;

    info!(
        "Loaded corpus from {}: {} categories, {} matchable records ({} total)",
        path.display(),
        corpus.categories().len(),
        corpus.len(),
        corpus.record_count()
    );
    Ok(corpus)
}
