use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReviewLdaError {
    #[error("user {0} has no reviews")]
    EmptyUserCorpus(String),

    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("topic {topic} out of range (num_topics = {num_topics})")]
    TopicOutOfRange { topic: usize, num_topics: usize },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("distance from {from} to {to} is {value} (must be finite and non-negative)")]
    InvalidDistance { from: String, to: String, value: f64 },

    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("corpus is empty after filtering")]
    EmptyCorpus,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("malformed review at {path}:{line}: {source}")]
    MalformedReview {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReviewLdaError {
    /// Errors caused by bad configuration rather than bad data or I/O.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidThreshold(_) | Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, ReviewLdaError>;
