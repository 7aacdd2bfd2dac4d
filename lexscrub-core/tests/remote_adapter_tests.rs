// lexscrub-core/tests/remote_adapter_tests.rs
//! HTTP-contract tests for the remote synonym-oracle and brand-extractor
//! adapters, using a mock chat-completion endpoint.

use lexscrub_core::{BrandExtractor, RemoteBrandExtractor, RemoteSynonymOracle, ScrubError, SynonymOracle};

fn completion_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

#[test]
fn oracle_accepts_yes_verdict() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("yes"))
        .create();

    let oracle = RemoteSynonymOracle::new(
        format!("{}/v1/chat/completions", server.url()),
        "test-key",
        "test-model",
    )
    .unwrap();
    assert!(oracle.check("nike", "nikes").unwrap());
    mock.assert();
}

#[test]
fn oracle_rejects_no_and_chatter() {
    for content in ["no", "No, they differ.", "I cannot tell"] {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(content))
            .create();
        let oracle = RemoteSynonymOracle::new(
            format!("{}/v1/chat/completions", server.url()),
            "test-key",
            "test-model",
        )
        .unwrap();
        assert!(!oracle.check("nike", "rolex").unwrap(), "content: {content}");
    }
}

#[test]
fn oracle_non_2xx_is_unavailable() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .create();

    let oracle = RemoteSynonymOracle::new(
        format!("{}/v1/chat/completions", server.url()),
        "test-key",
        "test-model",
    )
    .unwrap();
    assert!(matches!(
        oracle.check("nike", "nikes"),
        Err(ScrubError::OracleUnavailable(_))
    ));
}

#[test]
fn oracle_unreachable_endpoint_is_unavailable() {
    // Nothing listens here; the transport error must map to the degradable
    // variant, never a panic.
    let oracle =
        RemoteSynonymOracle::new("http://127.0.0.1:1/v1/chat/completions", "k", "m").unwrap();
    assert!(matches!(
        oracle.check("nike", "nikes"),
        Err(ScrubError::OracleUnavailable(_))
    ));
}

#[test]
fn extractor_parses_structured_array() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(r#"["Nike", "Rolex"]"#))
        .create();

    let extractor = RemoteBrandExtractor::new(
        format!("{}/v1/chat/completions", server.url()),
        "test-key",
        "test-model",
    )
    .unwrap();
    assert_eq!(
        extractor.extract("Nike shoes and a Rolex watch").unwrap(),
        vec!["Nike".to_string(), "Rolex".to_string()]
    );
}

#[test]
fn extractor_salvages_chatty_output() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(r#"Sure! Brands found: ["Puma"] — done."#))
        .create();

    let extractor = RemoteBrandExtractor::new(
        format!("{}/v1/chat/completions", server.url()),
        "test-key",
        "test-model",
    )
    .unwrap();
    assert_eq!(extractor.extract("Puma gear").unwrap(), vec!["Puma".to_string()]);
}

#[test]
fn extractor_falls_back_to_comma_split_and_filters() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("Nike, 4090, X, Adidas"))
        .create();

    let extractor = RemoteBrandExtractor::new(
        format!("{}/v1/chat/completions", server.url()),
        "test-key",
        "test-model",
    )
    .unwrap();
    assert_eq!(
        extractor.extract("whatever").unwrap(),
        vec!["Nike".to_string(), "Adidas".to_string()]
    );
}

#[test]
fn extractor_missing_content_is_malformed() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": []}"#)
        .create();

    let extractor = RemoteBrandExtractor::new(
        format!("{}/v1/chat/completions", server.url()),
        "test-key",
        "test-model",
    )
    .unwrap();
    assert!(matches!(
        extractor.extract("anything"),
        Err(ScrubError::MalformedExtractorOutput(_))
    ));
}

#[test]
fn extractor_non_2xx_is_unavailable() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .create();

    let extractor = RemoteBrandExtractor::new(
        format!("{}/v1/chat/completions", server.url()),
        "test-key",
        "test-model",
    )
    .unwrap();
    assert!(matches!(
        extractor.extract("anything"),
        Err(ScrubError::ExtractorUnavailable(_))
    ));
}
