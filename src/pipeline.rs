//! End-to-end run: reviews in, one neighbor file per user out.
//!
//! load → language filter → tokenize → dictionary → fit (or load) model →
//! per-user posteriors → mean vectors → histogram → threshold → neighbors.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::corpus::{build_dtm, group_by_user, Dictionary};
use crate::error::{Result, ReviewLdaError};
use crate::lda::{LdaModel, ModelWrapper, TopicModel};
use crate::review::{filter_by_language, load_reviews, LanguageDetector, WhatlangDetector};
use crate::similarity::{
    aggregate, distance_histogram, resolve_neighbors, select_threshold, DistanceFn, Neighbor,
    UserCorpus,
};
use crate::text::{TokenizedReview, Tokenizer, TokenizerConfig};
use crate::util::write_atomic;

pub const TOKENIZED_FILE: &str = "tokenized.json";
pub const DICTIONARY_FILE: &str = "dictionary.json";
pub const MODEL_FILE: &str = "model.json";

/// Neighbor lists for every user plus the cutoff they were built with.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub threshold: f64,
    pub neighbors: BTreeMap<String, Vec<Neighbor>>,
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub reviews_read: usize,
    pub reviews_kept: usize,
    pub users: usize,
    pub num_topics: usize,
    pub threshold: f64,
    pub files_written: usize,
}

/// From per-user topic distributions to thresholded neighbor lists.
///
/// Every user gets an entry, possibly empty, in user-id order.
pub fn recommend<D: DistanceFn + ?Sized>(
    corpus: &UserCorpus,
    num_topics: usize,
    distance: &D,
    percentage: f64,
) -> Result<Recommendations> {
    let vectors = aggregate(corpus, num_topics)?;
    let hist = distance_histogram(&vectors, distance)?;
    let threshold = select_threshold(&hist, percentage)?;
    info!(users = vectors.len(), pairs = hist.total(), threshold, "neighbor threshold selected");

    let mut neighbors = BTreeMap::new();
    for user in vectors.keys() {
        let list = resolve_neighbors(user, &vectors, distance, Some(threshold))?;
        neighbors.insert(user.clone(), list);
    }
    Ok(Recommendations {
        threshold,
        neighbors,
    })
}

/// Write `<dir>/<user>.json` for each user, each holding a JSON array of
/// `[distance, user_id]` pairs. Returns the number of files written.
///
/// User ids that are not usable as a file name are skipped with a warning.
pub fn write_neighbors(dir: &Path, neighbors: &BTreeMap<String, Vec<Neighbor>>) -> Result<usize> {
    fs::create_dir_all(dir)?;
    let mut written = 0;
    for (user, list) in neighbors {
        if !is_safe_file_stem(user) {
            warn!(user = %user, "user id is not a valid file name, skipping");
            continue;
        }
        let json = serde_json::to_vec(list)?;
        write_atomic(&dir.join(format!("{user}.json")), &json)?;
        written += 1;
    }
    info!(dir = %dir.display(), files = written, "neighbor files written");
    Ok(written)
}

fn is_safe_file_stem(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\', '\0'])
}

/// A configured run with its language detector and tokenizer.
pub struct Pipeline<D = WhatlangDetector> {
    config: PipelineConfig,
    detector: D,
    tokenizer: Tokenizer,
}

impl Pipeline<WhatlangDetector> {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_detector(config, WhatlangDetector)
    }
}

impl<D: LanguageDetector> Pipeline<D> {
    pub fn with_detector(config: PipelineConfig, detector: D) -> Self {
        Self {
            config,
            detector,
            tokenizer: Tokenizer::new(TokenizerConfig::english()),
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        let cfg = &self.config;
        cfg.validate()?;

        let reviews = load_reviews(&cfg.source)?;
        let reviews_read = reviews.len();
        let reviews = filter_by_language(reviews, &cfg.language, &self.detector);
        let docs = self.tokenizer.tokenize_all(&reviews);
        if docs.is_empty() {
            return Err(ReviewLdaError::EmptyCorpus);
        }

        let wrapper = self.topic_model(&docs)?;
        let num_topics = wrapper.model().num_topics();

        let users = group_by_user(&docs);
        let corpus = wrapper.all_posteriors(&users);
        let recs = recommend(&corpus, num_topics, &cfg.metric, cfg.percentage)?;

        let target = cfg.target.clone().unwrap_or_else(|| PathBuf::from("."));
        let files_written = write_neighbors(&target, &recs.neighbors)?;

        let summary = RunSummary {
            reviews_read,
            reviews_kept: docs.len(),
            users: recs.neighbors.len(),
            num_topics,
            threshold: recs.threshold,
            files_written,
        };
        info!(
            reviews_read = summary.reviews_read,
            reviews_kept = summary.reviews_kept,
            users = summary.users,
            topics = summary.num_topics,
            threshold = summary.threshold,
            files = summary.files_written,
            metric = %cfg.metric,
            duration_ms = start.elapsed().as_millis() as u64,
            "run complete"
        );
        Ok(summary)
    }

    /// Load the configured model, or fit one on `docs`. Saves artifacts when
    /// an artifact directory is set.
    fn topic_model(&self, docs: &[TokenizedReview]) -> Result<ModelWrapper<LdaModel>> {
        let cfg = &self.config;
        if let Some(dir) = &cfg.artifacts_dir {
            fs::create_dir_all(dir)?;
            write_atomic(&dir.join(TOKENIZED_FILE), &serde_json::to_vec(docs)?)?;
        }

        if let (Some(model_path), Some(dict_path)) = (&cfg.model_path, &cfg.dictionary_path) {
            return ModelWrapper::from_path(model_path, dict_path);
        }

        let texts: Vec<Vec<&str>> = docs
            .iter()
            .map(|d| d.tokens.iter().map(String::as_str).collect())
            .collect();
        let dictionary = Dictionary::from_documents(&texts);
        let dtm = build_dtm(&dictionary, &texts);
        info!(docs = dtm.len(), vocab = dictionary.len(), "document-term matrix built");

        let model = LdaModel::fit(&dtm, dictionary.len(), &cfg.lda_params())?;

        if let Some(dir) = &cfg.artifacts_dir {
            dictionary.save(&dir.join(DICTIONARY_FILE))?;
            model.save(&dir.join(MODEL_FILE))?;
            info!(dir = %dir.display(), "artifacts saved");
        }
        Ok(ModelWrapper::from_value(model, dictionary))
    }
}
