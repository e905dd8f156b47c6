//! PostgreSQL `EXPLAIN` connector.
//!
//! The JSON plan is requested first. If running it or decoding its output
//! fails, a fresh connection runs the plain-text variant instead.
//!
//! Only a single read-only query is accepted when `ANALYZE` is requested,
//! since `EXPLAIN ANALYZE` executes its target.

use std::ops::ControlFlow;

use serde::Serialize;
use serde_json::Value;
use sqlparser::{
    ast::{Statement, visit_statements},
    dialect::PostgreSqlDialect,
    parser::Parser
};
use tokio_postgres::{Client, NoTls, SimpleQueryMessage};
use tracing::{debug, warn};

use crate::error::{AppResult, database_error, explain_error, query_parse_error};

/// Options for an `EXPLAIN` run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplainOptions {
    /// Execute the query and report actual timings
    pub analyze:    bool,
    pub buffers:    bool,
    /// Session `statement_timeout`; `0` disables it
    pub timeout_ms: u64
}

impl Default for ExplainOptions {
    fn default() -> Self {
        Self {
            analyze:    false,
            buffers:    false,
            timeout_ms: 10_000
        }
    }
}

/// Execution plan as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", content = "plan", rename_all = "lowercase")]
pub enum ExplainPlan {
    /// Parsed `FORMAT JSON` document
    Json(Value),
    /// One entry per plan line
    Text(Vec<String>)
}

/// Build the `EXPLAIN` command for a statement.
///
/// Options appear in the order `ANALYZE`, `BUFFERS`, `FORMAT JSON` and the
/// parenthesised list is omitted when none is set.
///
/// # Example
///
/// ```
/// use sql_advisor::explain::build_explain_query;
///
/// assert_eq!(
///     build_explain_query("SELECT 1", true, false, true),
///     "EXPLAIN (ANALYZE, FORMAT JSON) SELECT 1"
/// );
/// assert_eq!(build_explain_query("SELECT 1", false, false, false), "EXPLAIN SELECT 1");
/// ```
pub fn build_explain_query(sql: &str, analyze: bool, buffers: bool, format_json: bool) -> String {
    let mut options = Vec::with_capacity(3);
    if analyze {
        options.push("ANALYZE");
    }
    if buffers {
        options.push("BUFFERS");
    }
    if format_json {
        options.push("FORMAT JSON");
    }
    if options.is_empty() {
        format!("EXPLAIN {}", sql)
    } else {
        format!("EXPLAIN ({}) {}", options.join(", "), sql)
    }
}

/// Check that `sql` is one statement safe to explain and return its
/// canonical text.
///
/// With `analyze` the statement must be a query that writes nothing: a
/// `WITH ... DELETE` body or a data-modifying CTE is rejected as well.
pub fn validate_target(sql: &str, analyze: bool) -> AppResult<String> {
    let mut statements = Parser::parse_sql(&PostgreSqlDialect {}, sql)
        .map_err(|e| query_parse_error(e.to_string()))?;
    if statements.len() != 1 {
        return Err(explain_error(format!(
            "EXPLAIN expects exactly one statement, got {}",
            statements.len()
        )));
    }
    let statement = statements.remove(0);
    if analyze && (!matches!(statement, Statement::Query(_)) || modifies_data(&statement)) {
        return Err(explain_error(
            "EXPLAIN ANALYZE is only allowed for SELECT queries"
        ));
    }
    Ok(statement.to_string())
}

/// Whether `statement` or any statement nested in it is DML
fn modifies_data(statement: &Statement) -> bool {
    visit_statements(statement, |nested| match nested {
        Statement::Insert { .. }
        | Statement::Update { .. }
        | Statement::Delete { .. }
        | Statement::Merge { .. } => ControlFlow::Break(()),
        _ => ControlFlow::Continue(())
    })
    .is_break()
}

/// Fetch the execution plan of `sql` from the database at `dsn`
pub async fn explain(dsn: &str, sql: &str, options: ExplainOptions) -> AppResult<ExplainPlan> {
    let target = validate_target(sql, options.analyze)?;
    let json_query = build_explain_query(&target, options.analyze, options.buffers, true);
    let client = connect(dsn, options.timeout_ms).await?;
    match json_plan(&client, &json_query).await {
        Ok(plan) => Ok(plan),
        Err(e) => {
            warn!(error = %e, "JSON plan failed, falling back to text plan");
            let text_query = build_explain_query(&target, options.analyze, options.buffers, false);
            let fallback = connect(dsn, options.timeout_ms).await?;
            let lines = plan_rows(&fallback, &text_query).await?;
            Ok(ExplainPlan::Text(lines))
        }
    }
}

async fn connect(dsn: &str, timeout_ms: u64) -> AppResult<Client> {
    let (client, connection) = tokio_postgres::connect(dsn, NoTls)
        .await
        .map_err(|e| database_error("Failed to connect to PostgreSQL", e))?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            warn!(error = %e, "PostgreSQL connection error");
        }
    });
    if timeout_ms > 0 {
        client
            .batch_execute(&format!("SET statement_timeout = {}", timeout_ms))
            .await
            .map_err(|e| database_error("Failed to set statement_timeout", e))?;
    }
    Ok(client)
}

async fn json_plan(client: &Client, query: &str) -> AppResult<ExplainPlan> {
    let rows = plan_rows(client, query).await?;
    let document = rows
        .first()
        .ok_or_else(|| explain_error("EXPLAIN returned no rows"))?;
    let plan: Value = serde_json::from_str(document)
        .map_err(|e| explain_error(format!("Invalid JSON plan: {}", e)))?;
    Ok(ExplainPlan::Json(plan))
}

/// First column of every row, as text
async fn plan_rows(client: &Client, query: &str) -> AppResult<Vec<String>> {
    debug!(%query, "running EXPLAIN");
    let messages = client
        .simple_query(query)
        .await
        .map_err(|e| database_error("EXPLAIN failed", e))?;
    let lines = messages
        .iter()
        .filter_map(|message| match message {
            SimpleQueryMessage::Row(row) => row.try_get(0).ok().flatten().map(str::to_string),
            _ => None
        })
        .collect();
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_options() {
        assert_eq!(
            build_explain_query("SELECT 1", true, true, true),
            "EXPLAIN (ANALYZE, BUFFERS, FORMAT JSON) SELECT 1"
        );
    }

    #[test]
    fn test_text_fallback_query() {
        assert_eq!(
            build_explain_query("SELECT 1", true, true, false),
            "EXPLAIN (ANALYZE, BUFFERS) SELECT 1"
        );
    }

    #[test]
    fn test_modifies_data_sees_nested_dml() {
        let parse = |sql: &str| {
            Parser::parse_sql(&PostgreSqlDialect {}, sql)
                .unwrap()
                .remove(0)
        };
        assert!(!modifies_data(&parse("WITH x AS (SELECT 1) SELECT * FROM x")));
        assert!(modifies_data(&parse("WITH x AS (SELECT 1) DELETE FROM users")));
        assert!(modifies_data(&parse("UPDATE users SET a = 1")));
    }

    #[test]
    fn test_plan_serializes_with_format_tag() {
        let plan = ExplainPlan::Text(vec!["Seq Scan on users".into()]);
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["format"], "text");
        assert_eq!(json["plan"][0], "Seq Scan on users");
    }
}
