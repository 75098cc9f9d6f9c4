use std::path::Path;

use super::{LdaModel, TopicModel};
use crate::corpus::{Dictionary, UserTokens};
use crate::error::{Result, ReviewLdaError};
use crate::similarity::{TopicDistribution, UserCorpus};

/// A fitted topic model paired with the dictionary it was trained against.
/// Turns token lists into topic distributions.
#[derive(Debug, Clone)]
pub struct ModelWrapper<M = LdaModel> {
    model: M,
    dictionary: Dictionary,
}

impl<M: TopicModel> ModelWrapper<M> {
    pub fn from_value(model: M, dictionary: Dictionary) -> Self {
        Self { model, dictionary }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// One topic distribution per review, in the given order.
    pub fn user_posteriors(&self, docs: &[Vec<String>]) -> Vec<TopicDistribution> {
        docs.iter()
            .map(|tokens| {
                let bow = self.dictionary.doc2bow(tokens.as_slice());
                self.model.document_topics(&bow)
            })
            .collect()
    }

    /// Topic distributions for every user's reviews.
    pub fn all_posteriors(&self, users: &UserTokens) -> UserCorpus {
        let corpus: UserCorpus = users
            .iter()
            .map(|(user, docs)| (user.clone(), self.user_posteriors(docs)))
            .collect();
        tracing::info!(users = corpus.len(), "topic posteriors computed");
        corpus
    }
}

impl ModelWrapper<LdaModel> {
    /// Load a model and dictionary saved by an earlier run.
    pub fn from_path(model_path: &Path, dictionary_path: &Path) -> Result<Self> {
        let model = LdaModel::load(model_path)?;
        let dictionary = Dictionary::load(dictionary_path)?;
        if model.vocab_size() != dictionary.len() {
            return Err(ReviewLdaError::DimensionMismatch {
                expected: model.vocab_size(),
                actual: dictionary.len(),
            });
        }
        tracing::info!(
            model = %model_path.display(),
            dictionary = %dictionary_path.display(),
            topics = model.num_topics(),
            vocab = dictionary.len(),
            "loaded topic model"
        );
        Ok(Self::from_value(model, dictionary))
    }
}
