//! Conversions from CLI-facing enums to domain types.

use crate::{
    cli::{Dialect, Format, PlanFormat},
    output::OutputFormat,
    query::SqlDialect
};

/// Converts a CLI dialect to the parser dialect.
///
/// # Example
///
/// ```
/// use sql_advisor::{app::convert_dialect, cli::Dialect, query::SqlDialect};
///
/// assert_eq!(convert_dialect(Dialect::Tsql), SqlDialect::TSql);
/// ```
pub fn convert_dialect(dialect: Dialect) -> SqlDialect {
    match dialect {
        Dialect::Postgres => SqlDialect::Postgres,
        Dialect::Mysql => SqlDialect::MySql,
        Dialect::Tsql => SqlDialect::TSql
    }
}

/// Converts a CLI report format to the output format.
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml,
        Format::Markdown => OutputFormat::Markdown
    }
}

/// Converts a CLI plan format to the output format.
pub fn convert_plan_format(format: PlanFormat) -> OutputFormat {
    match format {
        PlanFormat::Json => OutputFormat::Json,
        PlanFormat::Yaml => OutputFormat::Yaml
    }
}
