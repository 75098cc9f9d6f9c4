//! Review text → token lists.

mod contractions;
pub mod stopwords;

pub use contractions::expand_contractions;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::info;

use crate::review::Review;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Immutable tokenizer settings, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    stop_words: HashSet<String>,
    expand_contractions: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self::english()
    }
}

impl TokenizerConfig {
    /// English stop words, contractions expanded.
    pub fn english() -> Self {
        Self {
            stop_words: stopwords::english(),
            expand_contractions: true,
        }
    }

    /// Custom stop word list (lowercased on construction).
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
            expand_contractions: true,
        }
    }

    pub fn expand_contractions(mut self, enabled: bool) -> Self {
        self.expand_contractions = enabled;
        self
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

/// A review reduced to its content tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenizedReview {
    pub review_id: String,
    pub user_id: String,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Strip "w/", turn newlines into spaces, lowercase, expand contractions,
    /// split on word characters and drop stop words.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = text.replace("w/", "").replace('\n', " ").to_lowercase();
        let cleaned = if self.config.expand_contractions {
            expand_contractions(&cleaned)
        } else {
            cleaned
        };
        WORD.find_iter(&cleaned)
            .map(|m| m.as_str())
            .filter(|t| !self.config.is_stop_word(t))
            .map(str::to_string)
            .collect()
    }

    /// Tokenize every review. A repeated review id replaces the earlier entry
    /// in place, so the result holds one entry per distinct review id.
    pub fn tokenize_all(&self, reviews: &[Review]) -> Vec<TokenizedReview> {
        let mut out: Vec<TokenizedReview> = Vec::with_capacity(reviews.len());
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(reviews.len());

        for review in reviews {
            let doc = TokenizedReview {
                review_id: review.review_id.clone(),
                user_id: review.user_id.clone(),
                tokens: self.tokenize(&review.text),
            };
            match index.get(review.review_id.as_str()) {
                Some(&slot) => out[slot] = doc,
                None => {
                    index.insert(review.review_id.as_str(), out.len());
                    out.push(doc);
                }
            }
        }

        let tokens: usize = out.iter().map(|d| d.tokens.len()).sum();
        info!(reviews = out.len(), tokens, "reviews tokenized");
        out
    }
}
