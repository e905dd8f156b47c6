//! Rendering of reports and plans.
//!
//! JSON and YAML expose the structured form of a [`Report`]; Markdown is the
//! document form; text is the colored terminal view.

use colored::Colorize;

use crate::{explain::ExplainPlan, report::Report, rules::Severity};

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
    Markdown
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Render a report in the requested format
pub fn format_report(report: &Report, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(report).unwrap_or_default(),
        OutputFormat::Markdown => render_markdown(report),
        OutputFormat::Text => format_text(report, opts)
    }
}

/// Markdown document form of a report
///
/// # Example
///
/// ```
/// use sql_advisor::{
///     hints::Hints,
///     output::render_markdown,
///     query::{SqlDialect, parse_statements, render_normalized},
///     report::build_report
/// };
///
/// let statements = parse_statements("SELECT 1", SqlDialect::Postgres).unwrap();
/// let normalized = render_normalized(&statements);
/// let report = build_report(&statements, normalized, Hints::new(), vec![], None);
/// assert!(render_markdown(&report).contains("```sql\nSELECT 1\n```"));
/// ```
pub fn render_markdown(report: &Report) -> String {
    let mut lines = vec![
        String::from("# SQL Advisor Report"),
        String::new(),
        String::from("## Normalized SQL"),
        String::new(),
        String::from("```sql"),
        report.normalized.clone(),
        String::from("```"),
    ];
    if !report.hints.is_empty() {
        lines.push(String::new());
        lines.push(String::from("## Hints"));
        lines.push(String::new());
        lines.extend(report.hints.iter().map(|h| format!("- {}", h)));
    }
    if !report.findings.is_empty() {
        lines.push(String::new());
        lines.push(String::from("## Findings"));
        lines.push(String::new());
        lines.extend(
            report
                .findings
                .iter()
                .map(|f| format!("- [{}] {}", f.severity, f.message))
        );
    }
    if let Some(suggestion) = &report.suggestion {
        lines.push(String::new());
        lines.push(String::from("## Suggestion"));
        lines.push(String::new());
        lines.push(suggestion.clone());
    }
    lines.push(String::new());
    lines.join("\n")
}

fn format_text(report: &Report, opts: &OutputOptions) -> String {
    let mut output = String::new();
    let header = "=== SQL Advisor ===";
    if opts.colored {
        output.push_str(&header.bold().to_string());
    } else {
        output.push_str(header);
    }
    output.push_str("\n\n");
    output.push_str(&report.normalized);
    output.push_str("\n\n");

    if !report.hints.is_empty() {
        output.push_str(&section("Hints:", opts));
        for hint in &report.hints {
            output.push_str(&format!("  - {}\n", hint));
        }
        output.push('\n');
    }

    if report.findings.is_empty() {
        let ok = "No findings.";
        if opts.colored {
            output.push_str(&ok.green().to_string());
        } else {
            output.push_str(ok);
        }
        output.push('\n');
    } else {
        output.push_str(&section("Findings:", opts));
        for finding in &report.findings {
            let label = format!("[{}]", finding.severity);
            let label = if opts.colored {
                paint_severity(&label, finding.severity)
            } else {
                label
            };
            if opts.verbose {
                output.push_str(&format!(
                    "  {} {} (#{}, {})\n",
                    label,
                    finding.message,
                    finding.statement_index + 1,
                    finding.rule
                ));
            } else {
                output.push_str(&format!("  {} {}\n", label, finding.message));
            }
        }
        output.push('\n');
        output.push_str(&section("Summary:", opts));
        for (rule, count) in report.summary() {
            output.push_str(&format!("  {:<20} {}\n", rule.as_str(), count));
        }
    }

    if let Some(suggestion) = &report.suggestion {
        output.push('\n');
        output.push_str(&section("Suggestion:", opts));
        output.push_str(suggestion);
        output.push('\n');
    }
    output
}

fn section(title: &str, opts: &OutputOptions) -> String {
    if opts.colored {
        format!("{}\n", title.cyan().bold())
    } else {
        format!("{}\n", title)
    }
}

fn paint_severity(text: &str, severity: Severity) -> String {
    match severity {
        Severity::High => text.red().bold().to_string(),
        Severity::Medium => text.yellow().to_string(),
        Severity::Low => text.blue().to_string()
    }
}

/// Render an execution plan; text and Markdown fall back to JSON
pub fn format_plan(plan: &ExplainPlan, format: OutputFormat) -> String {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(plan).unwrap_or_default(),
        _ => serde_json::to_string_pretty(plan).unwrap_or_default()
    }
}
