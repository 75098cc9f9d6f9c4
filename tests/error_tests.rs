use reviewlda::ReviewLdaError;

#[test]
fn error_messages_are_human_readable() {
    assert_eq!(ReviewLdaError::EmptyUserCorpus("amy".into()).to_string(), "user amy has no reviews");
    assert_eq!(
        ReviewLdaError::TopicOutOfRange { topic: 5, num_topics: 3 }.to_string(),
        "topic 5 out of range (num_topics = 3)"
    );
    assert_eq!(ReviewLdaError::UnknownUser("zed".into()).to_string(), "unknown user: zed");
    assert!(ReviewLdaError::InvalidThreshold("percentage is 0".into())
        .to_string()
        .contains("percentage is 0"));
}

#[test]
fn config_errors_are_flagged() {
    assert!(ReviewLdaError::InvalidThreshold("x".into()).is_config());
    assert!(ReviewLdaError::Validation("x".into()).is_config());
    assert!(!ReviewLdaError::EmptyCorpus.is_config());
    assert!(!ReviewLdaError::UnknownUser("x".into()).is_config());
}

#[test]
fn io_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: ReviewLdaError = io.into();
    assert!(matches!(err, ReviewLdaError::Io(_)));
    assert!(err.to_string().contains("gone"));
}

#[test]
fn malformed_review_keeps_source() {
    use std::error::Error;
    let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
    let err = ReviewLdaError::MalformedReview {
        path: "reviews.json".into(),
        line: 3,
        source,
    };
    assert!(err.to_string().starts_with("malformed review at reviews.json:3"));
    assert!(err.source().is_some());
}
