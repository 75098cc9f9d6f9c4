use super::{TopicDistribution, UserCorpus, UserVectors};
use crate::error::{Result, ReviewLdaError};

/// Write a sparse distribution into a dense vector of length `num_topics`.
/// Topics not mentioned stay at 0; a topic listed twice keeps its last value.
pub fn dense_vector(dist: &TopicDistribution, num_topics: usize) -> Result<Vec<f64>> {
    let mut dense = vec![0.0; num_topics];
    for &(topic, prob) in dist {
        let slot = dense
            .get_mut(topic)
            .ok_or(ReviewLdaError::TopicOutOfRange { topic, num_topics })?;
        *slot = prob;
    }
    Ok(dense)
}

/// Reduce each user's topic distributions to their coordinate-wise mean.
pub fn aggregate(corpus: &UserCorpus, num_topics: usize) -> Result<UserVectors> {
    if num_topics == 0 {
        return Err(ReviewLdaError::Validation("num_topics must be positive".into()));
    }

    let mut vectors = UserVectors::new();
    for (user, dists) in corpus {
        if dists.is_empty() {
            return Err(ReviewLdaError::EmptyUserCorpus(user.clone()));
        }
        let mut sum = vec![0.0f64; num_topics];
        for dist in dists {
            let dense = dense_vector(dist, num_topics)?;
            for (acc, v) in sum.iter_mut().zip(dense) {
                *acc += v;
            }
        }
        let n = dists.len() as f64;
        sum.iter_mut().for_each(|x| *x /= n);
        vectors.insert(user.clone(), sum);
    }

    tracing::debug!(users = vectors.len(), num_topics, "aggregated user vectors");
    Ok(vectors)
}
