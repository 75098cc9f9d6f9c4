//! English contraction expansion ("don't" → "do not").
//!
//! Runs on lowercased text before tokenizing so the `\w+` split does not
//! leave fragments like "don" and "t" behind.

use regex::Regex;
use std::sync::LazyLock;

struct Pattern {
    re: Regex,
    replacement: &'static str,
}

// Irregular forms first; the generic suffix rules would mangle them.
static PATTERNS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    vec![
        Pattern {
            re: Regex::new(r"\bwon't\b").unwrap(),
            replacement: "will not",
        },
        Pattern {
            re: Regex::new(r"\bcan't\b").unwrap(),
            replacement: "cannot",
        },
        Pattern {
            re: Regex::new(r"\bshan't\b").unwrap(),
            replacement: "shall not",
        },
        Pattern {
            re: Regex::new(r"\bain't\b").unwrap(),
            replacement: "is not",
        },
        Pattern {
            re: Regex::new(r"\blet's\b").unwrap(),
            replacement: "let us",
        },
        Pattern {
            re: Regex::new(r"\b(it|that|he|she|what|there|here|who|where)'s\b").unwrap(),
            replacement: "$1 is",
        },
        Pattern {
            re: Regex::new(r"n't\b").unwrap(),
            replacement: " not",
        },
        Pattern {
            re: Regex::new(r"'re\b").unwrap(),
            replacement: " are",
        },
        Pattern {
            re: Regex::new(r"'ll\b").unwrap(),
            replacement: " will",
        },
        Pattern {
            re: Regex::new(r"'ve\b").unwrap(),
            replacement: " have",
        },
        Pattern {
            re: Regex::new(r"'m\b").unwrap(),
            replacement: " am",
        },
        Pattern {
            re: Regex::new(r"'d\b").unwrap(),
            replacement: " would",
        },
    ]
});

/// Expand contractions in already-lowercased text. Curly apostrophes are
/// treated like straight ones.
pub fn expand_contractions(text: &str) -> String {
    let mut out = text.replace('\u{2019}', "'");
    if !out.contains('\'') {
        return out;
    }
    for p in PATTERNS.iter() {
        if p.re.is_match(&out) {
            out = p.re.replace_all(&out, p.replacement).into_owned();
        }
    }
    out
}

#[cfg(test)]
#[path = "contractions_tests.rs"]
mod tests;
