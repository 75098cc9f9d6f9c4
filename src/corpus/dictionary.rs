use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::util::write_atomic;

/// Bag of words: `(token id, count)` sorted by id.
pub type Bow = Vec<(usize, u32)>;

/// Token ↔ id mapping over a corpus, with document frequencies.
///
/// Ids are dense and assigned in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredDictionary", into = "StoredDictionary")]
pub struct Dictionary {
    token2id: HashMap<String, usize>,
    id2token: Vec<String>,
    dfs: Vec<u32>,
    num_docs: usize,
}

#[derive(Serialize, Deserialize)]
struct StoredDictionary {
    tokens: Vec<String>,
    dfs: Vec<u32>,
    num_docs: usize,
}

impl From<StoredDictionary> for Dictionary {
    fn from(s: StoredDictionary) -> Self {
        let token2id = s
            .tokens
            .iter()
            .enumerate()
            .map(|(id, t)| (t.clone(), id))
            .collect();
        let mut dfs = s.dfs;
        dfs.resize(s.tokens.len(), 0);
        Self {
            token2id,
            id2token: s.tokens,
            dfs,
            num_docs: s.num_docs,
        }
    }
}

impl From<Dictionary> for StoredDictionary {
    fn from(d: Dictionary) -> Self {
        Self {
            tokens: d.id2token,
            dfs: d.dfs,
            num_docs: d.num_docs,
        }
    }
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents<S: AsRef<str>>(docs: &[Vec<S>]) -> Self {
        let mut dict = Self::new();
        dict.add_documents(docs);
        dict
    }

    /// Extend the vocabulary with `docs` and update document frequencies.
    pub fn add_documents<S: AsRef<str>>(&mut self, docs: &[Vec<S>]) {
        for doc in docs {
            let mut seen: HashSet<usize> = HashSet::new();
            for token in doc {
                let token = token.as_ref();
                let id = match self.token2id.get(token) {
                    Some(&id) => id,
                    None => {
                        let id = self.id2token.len();
                        self.token2id.insert(token.to_string(), id);
                        self.id2token.push(token.to_string());
                        self.dfs.push(0);
                        id
                    }
                };
                if seen.insert(id) {
                    self.dfs[id] += 1;
                }
            }
            self.num_docs += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.id2token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2token.is_empty()
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn token_id(&self, token: &str) -> Option<usize> {
        self.token2id.get(token).copied()
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.id2token.get(id).map(String::as_str)
    }

    /// Number of documents containing token `id`.
    pub fn doc_freq(&self, id: usize) -> u32 {
        self.dfs.get(id).copied().unwrap_or(0)
    }

    /// Count known tokens of `doc`. Unknown tokens are ignored.
    pub fn doc2bow<S: AsRef<str>>(&self, doc: &[S]) -> Bow {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for token in doc {
            if let Some(id) = self.token_id(token.as_ref()) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        counts.into_iter().collect()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec(self)?;
        write_atomic(path, &json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// One bag of words per document.
pub fn build_dtm<S: AsRef<str>>(dict: &Dictionary, docs: &[Vec<S>]) -> Vec<Bow> {
    docs.iter().map(|d| dict.doc2bow(d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<Vec<&'static str>> {
        vec![
            vec!["pizza", "cheese", "pizza"],
            vec!["sushi", "rice"],
            vec!["cheese", "rice", "rice"],
        ]
    }

    #[test]
    fn ids_in_first_seen_order() {
        let d = Dictionary::from_documents(&docs());
        assert_eq!(d.len(), 4);
        assert_eq!(d.token_id("pizza"), Some(0));
        assert_eq!(d.token_id("cheese"), Some(1));
        assert_eq!(d.token_id("sushi"), Some(2));
        assert_eq!(d.token(3), Some("rice"));
        assert_eq!(d.num_docs(), 3);
    }

    #[test]
    fn document_frequencies_count_docs_not_tokens() {
        let d = Dictionary::from_documents(&docs());
        assert_eq!(d.doc_freq(0), 1); // pizza twice in one doc
        assert_eq!(d.doc_freq(3), 2); // rice
    }

    #[test]
    fn repeated_tokens_count_once_per_doc() {
        let doc: Vec<String> = (0..500).map(|i| format!("t{}", i % 50)).collect();
        let d = Dictionary::from_documents(&[doc.clone(), doc]);
        assert_eq!(d.len(), 50);
        assert!((0..50).all(|id| d.doc_freq(id) == 2));
    }

    #[test]
    fn doc2bow_counts_known_tokens() {
        let d = Dictionary::from_documents(&docs());
        let bow = d.doc2bow(&["rice", "pizza", "rice", "unknown"]);
        assert_eq!(bow, vec![(0, 1), (3, 2)]);
    }

    #[test]
    fn dtm_has_one_row_per_doc() {
        let d = Dictionary::from_documents(&docs());
        let dtm = build_dtm(&d, &docs());
        assert_eq!(dtm.len(), 3);
        assert_eq!(dtm[0], vec![(0, 2), (1, 1)]);
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.json");
        let d = Dictionary::from_documents(&docs());
        d.save(&path).unwrap();
        let back = Dictionary::load(&path).unwrap();
        assert_eq!(back, d);
        assert_eq!(back.token_id("sushi"), Some(2));
    }
}
