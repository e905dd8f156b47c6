//! Error types and constructors.
//!
//! Every fallible operation returns [`AppResult`]. Errors are created through
//! the constructor functions below.

use std::sync::LazyLock;

pub use masterror::{AppError, AppResult};
use regex::Regex;

/// `sqlparser` reports positions as `Line: X, Column: Y` (older releases omit
/// the colon after `Column`).
static POSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Line: (\d+), Column:? (\d+)").expect("position pattern is valid")
});

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create query parse error with optional position info
pub fn query_parse_error(message: impl Into<String>) -> AppError {
    let msg = message.into();
    AppError::bad_request(format_sql_error("Query parse error", &msg))
}

/// Create LLM API error
pub fn llm_api_error(message: impl Into<String>) -> AppError {
    AppError::service(message.into())
}

/// Create HTTP error
pub fn http_error(err: reqwest::Error) -> AppError {
    let msg = if err.is_timeout() {
        format!("Request timeout: {}", err)
    } else if err.is_connect() {
        format!("Connection failed: {}", err)
    } else if err.is_status() {
        format!("HTTP error {}: {}", err.status().unwrap_or_default(), err)
    } else if err.is_decode() {
        format!("Invalid response body: {}", err)
    } else {
        err.to_string()
    };
    AppError::service(msg)
}

/// Create EXPLAIN execution error
pub fn explain_error(message: impl Into<String>) -> AppError {
    AppError::service(message.into())
}

/// Create database error from a driver failure
pub fn database_error(context: &str, err: tokio_postgres::Error) -> AppError {
    let msg = match err.as_db_error() {
        Some(db) => format!("{}: {} ({})", context, db.message(), db.code().code()),
        None => format!("{}: {}", context, err)
    };
    AppError::service(msg)
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Format SQL error with position highlighting
fn format_sql_error(prefix: &str, message: &str) -> String {
    match extract_position(message) {
        Some(pos) => format!(
            "{} at line {}, column {}:\n  {}",
            prefix, pos.line, pos.column, message
        ),
        None => format!("{}:\n  {}", prefix, message)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct SqlPosition {
    line:   usize,
    column: usize
}

fn extract_position(message: &str) -> Option<SqlPosition> {
    let captures = POSITION.captures(message)?;
    let line = captures.get(1)?.as_str().parse().ok()?;
    let column = captures.get(2)?.as_str().parse().ok()?;
    Some(SqlPosition {
        line,
        column
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_position_with_colon() {
        let pos = extract_position("Expected: ), found: EOF at Line: 3, Column: 17");
        assert_eq!(
            pos,
            Some(SqlPosition {
                line:   3,
                column: 17
            })
        );
    }

    #[test]
    fn test_extract_position_without_colon() {
        let pos = extract_position("Missing semicolon at Line: 12, Column 4");
        assert_eq!(
            pos,
            Some(SqlPosition {
                line:   12,
                column: 4
            })
        );
    }

    #[test]
    fn test_extract_position_absent() {
        assert!(extract_position("Unexpected token").is_none());
    }

    #[test]
    fn test_format_sql_error_includes_position() {
        let msg = format_sql_error("Query parse error", "bad at Line: 1, Column: 9");
        assert!(msg.starts_with("Query parse error at line 1, column 9"));
    }

    #[test]
    fn test_format_sql_error_without_position() {
        let msg = format_sql_error("Query parse error", "bad input");
        assert_eq!(msg, "Query parse error:\n  bad input");
    }
}
