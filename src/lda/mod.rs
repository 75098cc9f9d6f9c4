//! Latent Dirichlet Allocation over a bag-of-words corpus.
//!
//! Fitting uses collapsed Gibbs sampling with symmetric priors. Inferring a
//! document's topics runs a deterministic fixed-point fold-in against the
//! learned topic-word distribution, so the same document always gets the
//! same distribution from the same model.

mod wrapper;

pub use wrapper::ModelWrapper;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::corpus::Bow;
use crate::error::{Result, ReviewLdaError};
use crate::similarity::TopicDistribution;
use crate::thresholds;
use crate::util::write_atomic;

/// Anything that maps a bag of words to a sparse topic distribution.
pub trait TopicModel {
    fn num_topics(&self) -> usize;

    /// Topics of one document. Entries below the model's minimum probability
    /// are left out, so the result need not sum to 1.
    fn document_topics(&self, bow: &[(usize, u32)]) -> TopicDistribution;
}

/// Fitting parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LdaParams {
    pub num_topics: usize,
    pub passes: usize,
    /// Document-topic prior; `None` means `1 / num_topics`.
    pub alpha: Option<f64>,
    /// Topic-word prior.
    pub eta: f64,
    pub minimum_probability: f64,
    pub seed: u64,
}

impl Default for LdaParams {
    fn default() -> Self {
        Self {
            num_topics: thresholds::DEFAULT_NUM_TOPICS,
            passes: thresholds::DEFAULT_PASSES,
            alpha: None,
            eta: thresholds::DEFAULT_ETA,
            minimum_probability: thresholds::MIN_TOPIC_PROBABILITY,
            seed: thresholds::DEFAULT_SEED,
        }
    }
}

impl LdaParams {
    pub fn new(num_topics: usize, passes: usize) -> Self {
        Self {
            num_topics,
            passes,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_minimum_probability(mut self, p: f64) -> Self {
        self.minimum_probability = p;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.num_topics == 0 {
            return Err(ReviewLdaError::Validation("num_topics must be positive".into()));
        }
        if self.passes == 0 {
            return Err(ReviewLdaError::Validation("passes must be positive".into()));
        }
        if let Some(a) = self.alpha {
            if a.is_nan() || a <= 0.0 {
                return Err(ReviewLdaError::Validation(format!("alpha must be positive, got {a}")));
            }
        }
        if self.eta.is_nan() || self.eta <= 0.0 {
            return Err(ReviewLdaError::Validation(format!(
                "eta must be positive, got {}",
                self.eta
            )));
        }
        if !(0.0..=1.0).contains(&self.minimum_probability) {
            return Err(ReviewLdaError::Validation(format!(
                "minimum_probability must be in [0, 1], got {}",
                self.minimum_probability
            )));
        }
        Ok(())
    }
}

/// A fitted LDA model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdaModel {
    num_topics: usize,
    vocab_size: usize,
    alpha: f64,
    eta: f64,
    minimum_probability: f64,
    /// Row-major `num_topics × vocab_size`; each row sums to 1.
    topic_word: Vec<f64>,
}

impl LdaModel {
    /// Fit on a document-term matrix whose token ids are below `vocab_size`.
    pub fn fit(dtm: &[Bow], vocab_size: usize, params: &LdaParams) -> Result<Self> {
        params.validate()?;
        if dtm.is_empty() || vocab_size == 0 {
            return Err(ReviewLdaError::EmptyCorpus);
        }
        if let Some(&(w, _)) = dtm.iter().flatten().find(|(w, _)| *w >= vocab_size) {
            return Err(ReviewLdaError::Validation(format!(
                "token id {w} outside vocabulary of {vocab_size}"
            )));
        }

        let k = params.num_topics;
        let v = vocab_size;
        let alpha = params.alpha.unwrap_or(1.0 / k as f64);
        let eta = params.eta;
        let v_eta = v as f64 * eta;
        let mut rng = StdRng::seed_from_u64(params.seed);

        let docs: Vec<Vec<usize>> = dtm
            .iter()
            .map(|bow| {
                bow.iter()
                    .flat_map(|&(w, c)| std::iter::repeat(w).take(c as usize))
                    .collect()
            })
            .collect();
        let n_tokens: usize = docs.iter().map(Vec::len).sum();
        if n_tokens == 0 {
            return Err(ReviewLdaError::EmptyCorpus);
        }

        // counts: doc-topic, topic-word, topic totals
        let mut ndk = vec![0u32; docs.len() * k];
        let mut nkw = vec![0u32; k * v];
        let mut nk = vec![0u32; k];
        let mut z: Vec<Vec<usize>> = Vec::with_capacity(docs.len());

        for (d, doc) in docs.iter().enumerate() {
            let mut zd = Vec::with_capacity(doc.len());
            for &w in doc {
                let t = rng.gen_range(0..k);
                ndk[d * k + t] += 1;
                nkw[t * v + w] += 1;
                nk[t] += 1;
                zd.push(t);
            }
            z.push(zd);
        }

        let mut cumulative = vec![0.0f64; k];
        for pass in 0..params.passes {
            for (d, doc) in docs.iter().enumerate() {
                for (i, &w) in doc.iter().enumerate() {
                    let old = z[d][i];
                    ndk[d * k + old] -= 1;
                    nkw[old * v + w] -= 1;
                    nk[old] -= 1;

                    let mut total = 0.0;
                    for t in 0..k {
                        let p = (ndk[d * k + t] as f64 + alpha)
                            * (nkw[t * v + w] as f64 + eta)
                            / (nk[t] as f64 + v_eta);
                        total += p;
                        cumulative[t] = total;
                    }
                    let u = rng.gen::<f64>() * total;
                    let new = cumulative.iter().position(|&c| u < c).unwrap_or(k - 1);

                    ndk[d * k + new] += 1;
                    nkw[new * v + w] += 1;
                    nk[new] += 1;
                    z[d][i] = new;
                }
            }
            debug!(pass = pass + 1, passes = params.passes, "gibbs sweep done");
        }

        let mut topic_word = vec![0.0; k * v];
        for t in 0..k {
            let denom = nk[t] as f64 + v_eta;
            for w in 0..v {
                topic_word[t * v + w] = (nkw[t * v + w] as f64 + eta) / denom;
            }
        }

        info!(
            docs = docs.len(),
            tokens = n_tokens,
            vocab = v,
            topics = k,
            passes = params.passes,
            "lda model fitted"
        );

        Ok(Self {
            num_topics: k,
            vocab_size: v,
            alpha,
            eta,
            minimum_probability: params.minimum_probability,
            topic_word,
        })
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn minimum_probability(&self) -> f64 {
        self.minimum_probability
    }

    /// P(word | topic).
    pub fn word_probability(&self, topic: usize, word: usize) -> f64 {
        if topic >= self.num_topics || word >= self.vocab_size {
            return 0.0;
        }
        self.topic_word[topic * self.vocab_size + word]
    }

    /// The `n` most probable word ids of `topic`, most probable first.
    pub fn top_words(&self, topic: usize, n: usize) -> Vec<(usize, f64)> {
        if topic >= self.num_topics {
            return Vec::new();
        }
        let row = &self.topic_word[topic * self.vocab_size..(topic + 1) * self.vocab_size];
        let mut scored: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(n);
        scored
    }

    /// Dense topic mixture of a document, before truncation.
    pub fn infer(&self, bow: &[(usize, u32)]) -> Vec<f64> {
        let k = self.num_topics;
        let words: Vec<(usize, f64)> = bow
            .iter()
            .filter(|(w, c)| *w < self.vocab_size && *c > 0)
            .map(|&(w, c)| (w, c as f64))
            .collect();

        let mut theta = vec![1.0 / k as f64; k];
        if words.is_empty() {
            return theta;
        }

        let mut weights = vec![0.0; k];
        for _ in 0..thresholds::INFERENCE_ITERATIONS {
            let mut next = vec![self.alpha; k];
            for &(w, count) in &words {
                let mut norm = 0.0;
                for t in 0..k {
                    weights[t] = theta[t] * self.topic_word[t * self.vocab_size + w];
                    norm += weights[t];
                }
                if norm <= 0.0 {
                    continue;
                }
                for t in 0..k {
                    next[t] += count * weights[t] / norm;
                }
            }
            let sum: f64 = next.iter().sum();
            next.iter_mut().for_each(|x| *x /= sum);
            theta = next;
        }
        theta
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec(self)?;
        write_atomic(path, &json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let model: Self = serde_json::from_slice(&bytes)?;
        if model.num_topics == 0 {
            return Err(ReviewLdaError::Validation("stored model has no topics".into()));
        }
        if model.topic_word.len() != model.num_topics * model.vocab_size {
            return Err(ReviewLdaError::DimensionMismatch {
                expected: model.num_topics * model.vocab_size,
                actual: model.topic_word.len(),
            });
        }
        Ok(model)
    }
}

impl TopicModel for LdaModel {
    fn num_topics(&self) -> usize {
        self.num_topics
    }

    fn document_topics(&self, bow: &[(usize, u32)]) -> TopicDistribution {
        self.infer(bow)
            .into_iter()
            .enumerate()
            .filter(|&(_, p)| p >= self.minimum_probability)
            .collect()
    }
}
