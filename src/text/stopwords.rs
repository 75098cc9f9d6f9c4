//! English stop words, grouped by word class.

use std::collections::HashSet;

const STOP_WORD_GROUPS: &[(&str, &[&str])] = &[
    ("articles", &["a", "an", "the"]),
    ("pronouns", &[
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves",
        "you", "your", "yours", "yourself", "yourselves",
        "he", "him", "his", "himself", "she", "her", "hers", "herself",
        "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
    ]),
    ("questions", &["what", "which", "who", "whom", "whose", "why", "when", "where", "how"]),
    ("prepositions", &[
        "about", "above", "after", "against", "at", "before", "below", "between",
        "by", "down", "during", "for", "from", "in", "into", "of", "off", "on",
        "out", "over", "through", "to", "under", "until", "up", "with",
    ]),
    ("conjunctions", &[
        "and", "as", "because", "but", "if", "nor", "or", "so", "than", "that", "while",
    ]),
    ("verbs", &[
        "am", "is", "are", "was", "were", "be", "been", "being",
        "have", "has", "had", "having", "do", "does", "did", "doing",
        "would", "should", "could", "ought", "can", "cannot", "will", "shall",
    ]),
    ("determiners", &[
        "all", "any", "both", "each", "few", "more", "most", "no", "not", "only",
        "other", "own", "same", "some", "such", "too", "very", "then", "there",
        "these", "this", "those", "here", "again", "further", "once",
    ]),
];

/// Every English stop word, lowercase.
pub fn english() -> HashSet<String> {
    STOP_WORD_GROUPS
        .iter()
        .flat_map(|(_, words)| words.iter())
        .map(|w| w.to_string())
        .collect()
}
