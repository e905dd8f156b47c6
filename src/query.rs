//! SQL parsing, lowering and normalization.
//!
//! Parsing and pretty-printing are delegated to [`sqlparser`]. Each parsed
//! statement is lowered into the crate's own closed [`Node`] tree, which is
//! what the rule engine walks.

mod extract;
mod types;
mod walk;

use rayon::prelude::*;
use serde::Serialize;
use sqlparser::{
    dialect::{Dialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect},
    parser::Parser
};
use tracing::debug;
pub use types::{
    Func, In, InValues, Like, Literal, Node, Projection, Select, Statement, StatementKind
};
pub use walk::Descendants;

use crate::error::{AppResult, query_parse_error};

/// SQL dialect for parsing and rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SqlDialect {
    #[default]
    Postgres,
    MySql,
    TSql
}

impl SqlDialect {
    /// Convert to sqlparser dialect for parsing
    pub fn into_parser_dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Postgres => Box::new(PostgreSqlDialect {}),
            Self::MySql => Box::new(MySqlDialect {}),
            Self::TSql => Box::new(MsSqlDialect {})
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::MySql => "mysql",
            Self::TSql => "tsql"
        }
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a batch of SQL statements and lower each one
///
/// # Notes
///
/// - Lowering runs in parallel; the result keeps input order
/// - Fails with a parse error if any statement is invalid for the dialect
pub fn parse_statements(sql: &str, dialect: SqlDialect) -> AppResult<Vec<Statement>> {
    let parser_dialect = dialect.into_parser_dialect();
    let parsed = Parser::parse_sql(parser_dialect.as_ref(), sql)
        .map_err(|e| query_parse_error(e.to_string()))?;
    debug!(count = parsed.len(), %dialect, "parsed statements");
    let statements = parsed
        .par_iter()
        .enumerate()
        .map(|(index, stmt)| {
            let (kind, root) = extract::lower_statement(stmt);
            Statement {
                index,
                dialect,
                kind,
                raw: stmt.to_string(),
                pretty: format!("{:#}", stmt),
                root
            }
        })
        .collect();
    Ok(statements)
}

/// Canonical pretty-printed text of a batch
pub fn render_normalized(statements: &[Statement]) -> String {
    statements
        .iter()
        .map(|s| s.pretty.as_str())
        .collect::<Vec<_>>()
        .join(";\n\n")
}

/// Parse and re-render SQL in canonical form.
///
/// Purely syntactic: keyword case, spacing and line breaks are canonicalized,
/// nothing is rewritten.
///
/// # Example
///
/// ```
/// use sql_advisor::query::{SqlDialect, normalize};
///
/// let text = normalize("select id from users where id=1", SqlDialect::Postgres).unwrap();
/// assert!(text.contains("SELECT"));
/// assert_eq!(normalize(&text, SqlDialect::Postgres).unwrap(), text);
/// ```
pub fn normalize(sql: &str, dialect: SqlDialect) -> AppResult<String> {
    let statements = parse_statements(sql, dialect)?;
    Ok(render_normalized(&statements))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_default_is_postgres() {
        assert_eq!(SqlDialect::default(), SqlDialect::Postgres);
    }

    #[test]
    fn test_dialect_display() {
        assert_eq!(SqlDialect::Postgres.to_string(), "postgres");
        assert_eq!(SqlDialect::MySql.to_string(), "mysql");
        assert_eq!(SqlDialect::TSql.to_string(), "tsql");
    }

    #[test]
    fn test_parse_keeps_statement_order() {
        let statements =
            parse_statements("SELECT 1; SELECT 2; SELECT 3", SqlDialect::Postgres).unwrap();
        let indexes: Vec<usize> = statements.iter().map(|s| s.index).collect();
        assert_eq!(indexes, [0, 1, 2]);
        assert!(statements[2].raw.contains('3'));
    }

    #[test]
    fn test_parse_rejects_unbalanced_parentheses() {
        assert!(parse_statements("SELECT (1 FROM t", SqlDialect::Postgres).is_err());
    }

    #[test]
    fn test_render_joins_batch() {
        let statements = parse_statements("SELECT 1; SELECT 2", SqlDialect::Postgres).unwrap();
        let text = render_normalized(&statements);
        assert!(text.contains(";\n\n"));
    }
}
