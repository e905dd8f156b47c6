//! Parameter and result types for CLI commands.

use std::path::PathBuf;

use crate::cli::{Dialect, Format, PlanFormat};

/// Parameters for the analyze command.
///
/// # Example
///
/// ```
/// use sql_advisor::{
///     app::AnalyzeParams,
///     cli::{Dialect, Format}
/// };
///
/// let params = AnalyzeParams {
///     sql:           Some("SELECT * FROM users".to_string()),
///     queries_path:  None,
///     dialect:       Dialect::Postgres,
///     use_llm:       false,
///     model:         None,
///     ollama_url:    None,
///     output_format: Format::Json,
///     verbose:       false,
///     no_color:      true
/// };
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzeParams {
    /// Inline SQL text
    pub sql:           Option<String>,
    /// Path to SQL file or "-" for stdin
    pub queries_path:  Option<PathBuf>,
    pub dialect:       Dialect,
    /// Request a rewrite from the local model
    pub use_llm:       bool,
    /// Overrides the configured model
    pub model:         Option<String>,
    /// Overrides the configured Ollama URL
    pub ollama_url:    Option<String>,
    pub output_format: Format,
    pub verbose:       bool,
    pub no_color:      bool
}

/// Result of the analyze command.
#[derive(Debug, Clone)]
pub struct AnalyzeResult {
    /// 2 for high findings, 1 for medium, otherwise 0
    pub exit_code: i32,
    /// Rendered report
    pub output:    String
}

/// Parameters for the explain command.
#[derive(Debug, Clone)]
pub struct ExplainParams {
    pub dsn:           String,
    pub sql:           Option<String>,
    pub queries_path:  Option<PathBuf>,
    pub analyze:       bool,
    pub buffers:       bool,
    /// Overrides the configured statement timeout
    pub timeout_ms:    Option<u64>,
    pub output_format: PlanFormat
}
