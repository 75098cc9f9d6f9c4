use std::path::PathBuf;

use crate::error::{Result, ReviewLdaError};
use crate::lda::LdaParams;
use crate::similarity::Metric;
use crate::thresholds;

/// Everything one pipeline run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// JSON-lines review file.
    pub source: PathBuf,
    /// Directory for per-user neighbor files; `None` writes to the working
    /// directory.
    pub target: Option<PathBuf>,
    pub num_topics: usize,
    pub passes: usize,
    pub language: String,
    pub metric: Metric,
    /// Fraction of pairwise distances that count as "close".
    pub percentage: f64,
    pub seed: u64,
    /// Document-topic prior; `None` means `1 / num_topics`.
    pub alpha: Option<f64>,
    pub eta: f64,
    pub minimum_probability: f64,
    /// Precomputed model. Must come with `dictionary_path`.
    pub model_path: Option<PathBuf>,
    pub dictionary_path: Option<PathBuf>,
    /// Where tokenized reviews, dictionary and model are saved, if anywhere.
    pub artifacts_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            target: None,
            num_topics: thresholds::DEFAULT_NUM_TOPICS,
            passes: thresholds::DEFAULT_PASSES,
            language: thresholds::DEFAULT_LANGUAGE.to_string(),
            metric: Metric::default(),
            percentage: thresholds::DEFAULT_PERCENTAGE,
            seed: thresholds::DEFAULT_SEED,
            alpha: None,
            eta: thresholds::DEFAULT_ETA,
            minimum_probability: thresholds::MIN_TOPIC_PROBABILITY,
            model_path: None,
            dictionary_path: None,
            artifacts_dir: None,
        }
    }
}

impl PipelineConfig {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Reject values no run could succeed with. Checked before any input is
    /// read.
    pub fn validate(&self) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(ReviewLdaError::Validation("source path is empty".into()));
        }
        if self.num_topics == 0 {
            return Err(ReviewLdaError::Validation("num_topics must be positive".into()));
        }
        if self.passes == 0 {
            return Err(ReviewLdaError::Validation("passes must be positive".into()));
        }
        if self.language.trim().is_empty() {
            return Err(ReviewLdaError::Validation("language is empty".into()));
        }
        if self.percentage.is_nan() || self.percentage <= 0.0 {
            return Err(ReviewLdaError::InvalidThreshold(format!(
                "percentage must be positive, got {}",
                self.percentage
            )));
        }
        match (&self.model_path, &self.dictionary_path) {
            (Some(_), None) => {
                return Err(ReviewLdaError::Validation(
                    "a model path needs a dictionary path".into(),
                ))
            }
            (None, Some(_)) => {
                return Err(ReviewLdaError::Validation(
                    "a dictionary path needs a model path".into(),
                ))
            }
            _ => {}
        }
        Ok(())
    }

    /// Fitting parameters derived from this config.
    pub fn lda_params(&self) -> LdaParams {
        LdaParams {
            num_topics: self.num_topics,
            passes: self.passes,
            alpha: self.alpha,
            eta: self.eta,
            minimum_probability: self.minimum_probability,
            seed: self.seed,
        }
    }
}
