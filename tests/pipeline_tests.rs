use std::fs;
use std::path::Path;

use reviewlda::pipeline::{Pipeline, DICTIONARY_FILE, MODEL_FILE, TOKENIZED_FILE};
use reviewlda::review::LanguageDetector;
use reviewlda::text::{TokenizedReview, Tokenizer, TokenizerConfig};
use reviewlda::util::round_distance;
use reviewlda::{PipelineConfig, ReviewLdaError};

/// French when the text says "bonjour", undetectable when it is only
/// punctuation, English otherwise.
struct StubDetector;

impl LanguageDetector for StubDetector {
    fn detect(&self, text: &str) -> Option<String> {
        if !text.chars().any(char::is_alphanumeric) {
            None
        } else if text.contains("bonjour") {
            Some("fr".into())
        } else {
            Some("en".into())
        }
    }
}

const REVIEWS: &[(&str, &str, &str)] = &[
    ("r1", "amy", "Great pizza, crispy crust and fresh mozzarella cheese"),
    ("r2", "amy", "The pasta sauce was rich and the bread was warm"),
    ("r3", "bob", "Pizza with extra cheese, garlic bread and pasta"),
    ("r4", "cat", "Engine trouble again, the mechanic replaced brakes and tires"),
    ("r5", "cat", "Oil change was quick, they rotated the tires too"),
    ("r6", "dan", "Mechanic fixed the engine and checked the brakes"),
    ("r7", "eve", "bonjour, la pizza etait bonne"),
    ("r8", "eve", "?!?!"),
];

fn write_source(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("reviews.json");
    let lines: Vec<String> = REVIEWS
        .iter()
        .map(|(id, user, text)| {
            serde_json::json!({"review_id": id, "user_id": user, "text": text, "stars": 4})
                .to_string()
        })
        .collect();
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn config(dir: &Path, out: &str) -> PipelineConfig {
    let mut cfg = PipelineConfig::new(write_source(dir));
    cfg.target = Some(dir.join(out));
    cfg.num_topics = 2;
    cfg.passes = 10;
    cfg.percentage = 0.5;
    cfg
}

fn read_neighbors(path: &Path) -> Vec<(f64, String)> {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn run_writes_one_file_per_user() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), "out");
    let summary = Pipeline::with_detector(cfg, StubDetector).run().unwrap();

    assert_eq!(summary.reviews_read, 8);
    assert_eq!(summary.reviews_kept, 6);
    assert_eq!(summary.users, 4);
    assert_eq!(summary.files_written, 4);
    assert_eq!(summary.num_topics, 2);

    let out = dir.path().join("out");
    assert!(!out.join("eve.json").exists());
    for user in ["amy", "bob", "cat", "dan"] {
        let list = read_neighbors(&out.join(format!("{user}.json")));
        for (distance, other) in &list {
            assert_ne!(other, user);
            assert!(*distance >= 0.0);
            assert!(round_distance(*distance) <= summary.threshold);
        }
    }
}

#[test]
fn saved_artifacts_reproduce_neighbors() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = dir.path().join("artifacts");

    let mut first = config(dir.path(), "first");
    first.artifacts_dir = Some(artifacts.clone());
    Pipeline::with_detector(first, StubDetector).run().unwrap();
    for name in [TOKENIZED_FILE, DICTIONARY_FILE, MODEL_FILE] {
        assert!(artifacts.join(name).exists(), "{name} missing");
    }

    let mut second = config(dir.path(), "second");
    second.model_path = Some(artifacts.join(MODEL_FILE));
    second.dictionary_path = Some(artifacts.join(DICTIONARY_FILE));
    Pipeline::with_detector(second, StubDetector).run().unwrap();

    for user in ["amy", "bob", "cat", "dan"] {
        let a = read_neighbors(&dir.path().join("first").join(format!("{user}.json")));
        let b = read_neighbors(&dir.path().join("second").join(format!("{user}.json")));
        assert_eq!(a.len(), b.len(), "{user}");
        for ((da, ia), (db, ib)) in a.iter().zip(&b) {
            assert_eq!(ia, ib);
            assert!((da - db).abs() < 1e-9);
        }
    }
}

#[test]
fn zero_percentage_fails_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path(), "out");
    cfg.percentage = 0.0;
    let err = Pipeline::with_detector(cfg, StubDetector).run().unwrap_err();
    assert!(matches!(err, ReviewLdaError::InvalidThreshold(_)));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn malformed_line_reports_its_number() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path(), "out");
    let source = dir.path().join("bad.json");
    fs::write(
        &source,
        "{\"review_id\":\"r1\",\"user_id\":\"amy\",\"text\":\"fine\"}\n{not json\n",
    )
    .unwrap();
    cfg.source = source;
    let err = Pipeline::with_detector(cfg, StubDetector).run().unwrap_err();
    assert!(matches!(err, ReviewLdaError::MalformedReview { line: 2, .. }));
}

#[test]
fn nothing_in_language_is_empty_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path(), "out");
    cfg.language = "de".into();
    let err = Pipeline::with_detector(cfg, StubDetector).run().unwrap_err();
    assert!(matches!(err, ReviewLdaError::EmptyCorpus));
}

#[test]
fn missing_source_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path(), "out");
    cfg.source = dir.path().join("nope.json");
    let err = Pipeline::with_detector(cfg, StubDetector).run().unwrap_err();
    assert!(matches!(err, ReviewLdaError::Io(_)));
}

#[test]
fn custom_tokenizer_shapes_saved_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = dir.path().join("artifacts");
    let mut cfg = config(dir.path(), "out");
    cfg.artifacts_dir = Some(artifacts.clone());

    let tokenizer = Tokenizer::new(TokenizerConfig::with_stop_words(["the", "and", "pizza"]));
    let pipeline = Pipeline::with_detector(cfg, StubDetector).with_tokenizer(tokenizer);
    assert_eq!(pipeline.config().num_topics, 2);
    pipeline.run().unwrap();

    let docs: Vec<TokenizedReview> =
        serde_json::from_slice(&fs::read(artifacts.join(TOKENIZED_FILE)).unwrap()).unwrap();
    assert_eq!(docs.len(), 6);
    assert!(docs.iter().all(|d| !d.tokens.iter().any(|t| t == "pizza" || t == "the")));
    // "was" is only a stop word in the English list
    assert!(docs.iter().any(|d| d.tokens.iter().any(|t| t == "was")));
}
