//! Core analysis pipeline.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use super::{
    convert::convert_dialect,
    helpers::{
        calculate_exit_code, create_output_options, get_effective_model,
        get_effective_ollama_url, read_sql_input
    },
    types::{AnalyzeParams, AnalyzeResult}
};
use crate::{
    config::{Config, LlmConfig},
    error::AppResult,
    hints::baseline_hints,
    llm::LlmClient,
    output::format_report,
    query::{parse_statements, render_normalized},
    report::build_report,
    rules::RuleRunner
};

/// Executes the analysis pipeline.
///
/// 1. **Parsing**: reads the SQL and parses it under the chosen dialect
/// 2. **Normalization**: pretty-prints every statement
/// 3. **Rules and hints**: runs the enabled rules and the text hints
/// 4. **Suggestion** (optional): asks the local model for a rewrite
///
/// Rules always finish before the model is contacted; a model failure only
/// changes the suggestion text.
///
/// # Errors
///
/// Returns an error if the input cannot be read or does not parse.
///
/// # Example
///
/// ```no_run
/// use sql_advisor::{
///     app::{AnalyzeParams, run_analyze},
///     cli::{Dialect, Format},
///     config::Config
/// };
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let params = AnalyzeParams {
///     sql:           Some("SELECT * FROM users".to_string()),
///     queries_path:  None,
///     dialect:       Dialect::Postgres,
///     use_llm:       false,
///     model:         None,
///     ollama_url:    None,
///     output_format: Format::Markdown,
///     verbose:       false,
///     no_color:      true
/// };
///
/// let result = run_analyze(params, Config::default()).await?;
/// println!("{}", result.output);
/// # Ok(())
/// # }
/// ```
pub async fn run_analyze(params: AnalyzeParams, config: Config) -> AppResult<AnalyzeResult> {
    let sql = read_sql_input(params.sql, params.queries_path.as_deref())?;
    let dialect = convert_dialect(params.dialect);
    let statements = parse_statements(&sql, dialect)?;
    let normalized = render_normalized(&statements);
    let hints = baseline_hints(&normalized);
    let runner = RuleRunner::with_config(config.rules.clone());
    let findings = runner.evaluate(&statements);
    debug!(hints = hints.len(), findings = findings.len(), "static analysis done");

    let suggestion = if params.use_llm {
        let llm_config = LlmConfig {
            model: get_effective_model(params.model, &config.llm.model),
            ollama_url: get_effective_ollama_url(params.ollama_url, &config.llm.ollama_url),
            ..config.llm.clone()
        };
        let client = LlmClient::new(&llm_config, config.retry.clone());

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Asking {} for a rewrite...", client.model()));
        pb.enable_steady_tick(Duration::from_millis(100));
        let text = client.suggest(dialect, &normalized).await;
        pb.finish_and_clear();
        Some(text)
    } else {
        None
    };

    let report = build_report(&statements, normalized, hints, findings, suggestion);
    let output_opts = create_output_options(params.output_format, params.no_color, params.verbose);
    Ok(AnalyzeResult {
        exit_code: calculate_exit_code(&report),
        output:    format_report(&report, &output_opts)
    })
}
