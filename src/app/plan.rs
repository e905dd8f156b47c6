//! Execution plan command.

use super::{convert::convert_plan_format, helpers::read_sql_input, types::ExplainParams};
use crate::{
    config::Config,
    error::AppResult,
    explain::{ExplainOptions, explain},
    output::format_plan
};

/// Fetches and renders the execution plan of a single statement.
///
/// # Errors
///
/// Returns an error if the input is not exactly one statement, if `--analyze`
/// targets something other than a query, or if both the JSON and the text
/// plan requests fail.
pub async fn run_explain(params: ExplainParams, config: Config) -> AppResult<String> {
    let sql = read_sql_input(params.sql, params.queries_path.as_deref())?;
    let options = ExplainOptions {
        analyze:    params.analyze,
        buffers:    params.buffers,
        timeout_ms: params.timeout_ms.unwrap_or(config.explain.timeout_ms)
    };
    let plan = explain(&params.dsn, &sql, options).await?;
    Ok(format_plan(&plan, convert_plan_format(params.output_format)))
}
