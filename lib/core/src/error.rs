use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty query")]
    EmptyQuery,

    #[error("Corpus is empty: no question could be vectorized")]
    EmptyCorpus,

    #[error("Vectorization failed: {0}")]
    Vectorization(String),

    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
