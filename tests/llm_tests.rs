use sql_advisor::{
    app::{AnalyzeParams, run_analyze},
    cli::{Dialect, Format},
    config::{Config, LlmConfig, RetryConfig},
    llm::{CompletionOptions, LlmClient, UNAVAILABLE_PREFIX},
    query::SqlDialect
};

/// Nothing listens on the discard port
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_retries:      1,
        initial_delay_ms: 10,
        max_delay_ms:     20,
        backoff_factor:   2.0
    }
}

fn unreachable_config() -> LlmConfig {
    LlmConfig {
        ollama_url: UNREACHABLE.to_string(),
        timeout_secs: 2,
        ..LlmConfig::default()
    }
}

#[tokio::test]
async fn test_complete_fails_after_retries() {
    let client = LlmClient::new(&unreachable_config(), fast_retry());
    let result = client
        .complete("SELECT 1", &CompletionOptions::default())
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_suggest_degrades_to_placeholder() {
    let client = LlmClient::new(&unreachable_config(), fast_retry());
    let suggestion = client.suggest(SqlDialect::Postgres, "SELECT 1").await;
    assert!(suggestion.starts_with(UNAVAILABLE_PREFIX));
}

#[tokio::test]
async fn test_analyze_survives_unreachable_model() {
    let config = Config {
        llm: unreachable_config(),
        retry: fast_retry(),
        ..Config::default()
    };
    let params = AnalyzeParams {
        sql:           Some("SELECT * FROM users WHERE LOWER(email) = 'a'".to_string()),
        queries_path:  None,
        dialect:       Dialect::Postgres,
        use_llm:       true,
        model:         None,
        ollama_url:    None,
        output_format: Format::Json,
        verbose:       false,
        no_color:      true
    };
    let result = run_analyze(params, config).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&result.output).unwrap();

    assert_eq!(result.exit_code, 2);
    assert!(json["normalized"].as_str().unwrap().contains("SELECT"));
    assert_eq!(json["findings"].as_array().unwrap().len(), 2);
    assert!(
        json["suggestion"]
            .as_str()
            .unwrap()
            .starts_with("LLM unavailable")
    );
}

#[tokio::test]
async fn test_cli_url_overrides_config() {
    let config = Config {
        retry: fast_retry(),
        ..Config::default()
    };
    let params = AnalyzeParams {
        sql:           Some("SELECT id FROM users".to_string()),
        queries_path:  None,
        dialect:       Dialect::Postgres,
        use_llm:       true,
        model:         Some("tiny".to_string()),
        ollama_url:    Some(UNREACHABLE.to_string()),
        output_format: Format::Markdown,
        verbose:       false,
        no_color:      true
    };
    let result = run_analyze(params, config).await.unwrap();
    assert_eq!(result.exit_code, 0);
    assert!(result.output.contains("## Suggestion\n\nLLM unavailable"));
}
