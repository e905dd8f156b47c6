//! Application logic for the `sql-advisor` CLI.
//!
//! Kept apart from the binary entry point so it can be tested.

mod analyze;
mod convert;
mod helpers;
mod plan;
mod types;

pub use analyze::run_analyze;
pub use convert::{convert_dialect, convert_format, convert_plan_format};
pub use helpers::{
    calculate_exit_code, create_output_options, get_effective_model, get_effective_ollama_url,
    read_queries_input, read_sql_input
};
pub use plan::run_explain;
pub use types::{AnalyzeParams, AnalyzeResult, ExplainParams};
