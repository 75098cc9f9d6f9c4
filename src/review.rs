//! Review input: JSON-lines loading and language filtering.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, ReviewLdaError};

/// One review. Fields other than these three are ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: String,
    pub user_id: String,
    pub text: String,
}

/// Read one JSON review object per line. Blank lines are skipped; a line that
/// does not parse aborts the load with its line number.
pub fn load_reviews(path: &Path) -> Result<Vec<Review>> {
    let reader = BufReader::new(File::open(path)?);
    let mut reviews = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let review: Review =
            serde_json::from_str(&line).map_err(|source| ReviewLdaError::MalformedReview {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
        reviews.push(review);
    }
    info!(path = %path.display(), reviews = reviews.len(), "reviews loaded");
    Ok(reviews)
}

// ── Language detection ─────────────────────────────────────────────────────

/// Detects the language of a text. `None` means detection failed.
pub trait LanguageDetector {
    /// ISO 639-1 or 639-3 code of the detected language.
    fn detect(&self, text: &str) -> Option<String>;
}

/// Trigram-based detection via `whatlang`. Returns ISO 639-3 codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        whatlang::detect(text).map(|info| info.lang().code().to_string())
    }
}

const ISO_639_1_TO_3: &[(&str, &str)] = &[
    ("ar", "ara"),
    ("cs", "ces"),
    ("da", "dan"),
    ("de", "deu"),
    ("el", "ell"),
    ("en", "eng"),
    ("es", "spa"),
    ("fi", "fin"),
    ("fr", "fra"),
    ("he", "heb"),
    ("hi", "hin"),
    ("hu", "hun"),
    ("it", "ita"),
    ("ja", "jpn"),
    ("ko", "kor"),
    ("nl", "nld"),
    ("pl", "pol"),
    ("pt", "por"),
    ("ru", "rus"),
    ("sv", "swe"),
    ("tr", "tur"),
    ("zh", "cmn"),
];

/// Lowercase a language code and map two-letter codes to their three-letter
/// form, so "en", "EN" and "eng" compare equal.
pub fn normalize_language(code: &str) -> String {
    let code = code.trim().to_ascii_lowercase();
    ISO_639_1_TO_3
        .iter()
        .find(|(two, _)| *two == code)
        .map(|(_, three)| three.to_string())
        .unwrap_or(code)
}

/// Keep reviews written in `lang`. Reviews whose language cannot be detected
/// are dropped, never fatal.
pub fn filter_by_language<D: LanguageDetector + ?Sized>(
    reviews: Vec<Review>,
    lang: &str,
    detector: &D,
) -> Vec<Review> {
    let wanted = normalize_language(lang);
    let total = reviews.len();
    let mut undetected = 0usize;

    let kept: Vec<Review> = reviews
        .into_iter()
        .filter(|r| match detector.detect(&r.text) {
            Some(found) => normalize_language(&found) == wanted,
            None => {
                undetected += 1;
                debug!(review = %r.review_id, "language not detected, dropping review");
                false
            }
        })
        .collect();

    info!(
        lang = %wanted,
        total,
        kept = kept.len(),
        undetected,
        "language filter applied"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct Fixed;

    impl LanguageDetector for Fixed {
        fn detect(&self, text: &str) -> Option<String> {
            if text.starts_with("de:") {
                Some("deu".into())
            } else if text.is_empty() {
                None
            } else {
                Some("en".into())
            }
        }
    }

    fn review(id: &str, text: &str) -> Review {
        Review {
            review_id: id.into(),
            user_id: "u".into(),
            text: text.into(),
        }
    }

    #[test]
    fn normalizes_codes() {
        assert_eq!(normalize_language("en"), "eng");
        assert_eq!(normalize_language("EN"), "eng");
        assert_eq!(normalize_language("eng"), "eng");
        assert_eq!(normalize_language("xx"), "xx");
    }

    #[test]
    fn filter_keeps_matching_and_drops_undetected() {
        let reviews = vec![
            review("1", "great tacos"),
            review("2", "de: sehr gut"),
            review("3", ""),
            review("4", "slow service"),
        ];
        let kept = filter_by_language(reviews, "en", &Fixed);
        let ids: Vec<&str> = kept.iter().map(|r| r.review_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn whatlang_detects_english() {
        let text = "The food at this restaurant was absolutely wonderful and the staff were friendly.";
        assert_eq!(WhatlangDetector.detect(text).as_deref(), Some("eng"));
    }

    #[test]
    fn load_skips_blank_lines_and_extra_fields() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"{{"votes": {{"funny": 0}}, "user_id": "u1", "review_id": "r1", "text": "hi", "stars": 4}}"#
        )
        .unwrap();
        writeln!(f).unwrap();
        writeln!(f, r#"{{"user_id": "u2", "review_id": "r2", "text": "yo"}}"#).unwrap();
        let reviews = load_reviews(f.path()).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].user_id, "u1");
        assert_eq!(reviews[1].text, "yo");
    }

    #[test]
    fn load_reports_bad_line() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, r#"{{"user_id": "u1", "review_id": "r1", "text": "ok"}}"#).unwrap();
        writeln!(f, "not json").unwrap();
        let err = load_reviews(f.path()).unwrap_err();
        assert!(matches!(err, ReviewLdaError::MalformedReview { line: 2, .. }));
    }
}
