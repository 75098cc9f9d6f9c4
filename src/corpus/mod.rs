//! Corpus construction: vocabulary, document-term matrix, per-user grouping.

mod dictionary;

pub use dictionary::{build_dtm, Bow, Dictionary};

use std::collections::BTreeMap;

use crate::text::TokenizedReview;

/// User id → token lists of that user's reviews, in review order.
pub type UserTokens = BTreeMap<String, Vec<Vec<String>>>;

/// Group tokenized reviews by author.
pub fn group_by_user(docs: &[TokenizedReview]) -> UserTokens {
    let mut users = UserTokens::new();
    for doc in docs {
        users
            .entry(doc.user_id.clone())
            .or_default()
            .push(doc.tokens.clone());
    }
    tracing::debug!(users = users.len(), reviews = docs.len(), "grouped reviews by user");
    users
}
