//! Helper functions for CLI operations.
//!
//! Reading input, calculating exit codes and merging CLI options with
//! configuration.

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::Path
};

use super::convert::convert_format;
use crate::{
    cli::Format,
    error::{AppResult, config_error, file_read_error},
    output::OutputOptions,
    report::Report,
    rules::Severity
};

/// Calculates the process exit code from the findings of a report.
///
/// - `0` - No findings or only low severity
/// - `1` - At least one medium finding
/// - `2` - At least one high finding
///
/// # Example
///
/// ```
/// use sql_advisor::{
///     app::calculate_exit_code,
///     hints::Hints,
///     query::{SqlDialect, parse_statements},
///     report::build_report,
///     rules::RuleRunner
/// };
///
/// let statements = parse_statements("SELECT * FROM users", SqlDialect::Postgres).unwrap();
/// let findings = RuleRunner::new().evaluate(&statements);
/// let report = build_report(&statements, String::new(), Hints::new(), findings, None);
/// assert_eq!(calculate_exit_code(&report), 1);
/// ```
pub fn calculate_exit_code(report: &Report) -> i32 {
    match report.max_severity() {
        Some(Severity::High) => 2,
        Some(Severity::Medium) => 1,
        _ => 0
    }
}

/// Resolves the SQL text of a command.
///
/// Inline SQL wins; otherwise the file (or stdin for `-`) is read.
///
/// # Errors
///
/// Returns an error if neither is given or the input cannot be read.
pub fn read_sql_input(sql: Option<String>, path: Option<&Path>) -> AppResult<String> {
    match (sql, path) {
        (Some(sql), _) => Ok(sql),
        (None, Some(path)) => read_queries_input(path),
        (None, None) => Err(config_error(
            "No SQL given: pass it as an argument or use --queries <PATH|->"
        ))
    }
}

/// Reads SQL from a file path or from standard input when the path is "-".
pub fn read_queries_input(path: &Path) -> AppResult<String> {
    if path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(&path.display().to_string(), e))
    }
}

/// Creates output options from CLI parameters.
pub fn create_output_options(format: Format, no_color: bool, verbose: bool) -> OutputOptions {
    OutputOptions {
        format: convert_format(format),
        colored: !no_color,
        verbose
    }
}

/// Model name: CLI flag, then configuration (which already folds in
/// `LLM_MODEL`).
pub fn get_effective_model(model: Option<String>, config_model: &str) -> String {
    model.unwrap_or_else(|| config_model.to_string())
}

/// Ollama URL: CLI flag, then configuration (which already folds in
/// `OLLAMA_URL`).
pub fn get_effective_ollama_url(url: Option<String>, config_url: &str) -> String {
    url.unwrap_or_else(|| config_url.to_string())
}
