// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_advisor::{
    explain::ExplainPlan,
    hints::baseline_hints,
    output::{OutputFormat, OutputOptions, format_plan, format_report, render_markdown},
    query::{SqlDialect, parse_statements, render_normalized},
    report::{Report, build_report},
    rules::RuleRunner
};

fn sample_report(sql: &str, suggestion: Option<&str>) -> Report {
    let statements = parse_statements(sql, SqlDialect::Postgres).unwrap();
    let normalized = render_normalized(&statements);
    let hints = baseline_hints(&normalized);
    let findings = RuleRunner::new().evaluate(&statements);
    build_report(
        &statements,
        normalized,
        hints,
        findings,
        suggestion.map(String::from)
    )
}

fn options(format: OutputFormat) -> OutputOptions {
    OutputOptions {
        format,
        colored: false,
        verbose: false
    }
}

#[test]
fn test_output_format_default() {
    assert_eq!(OutputFormat::default(), OutputFormat::Text);
    assert!(OutputOptions::default().colored);
}

#[test]
fn test_json_structure() {
    let report = sample_report("SELECT * FROM users WHERE LOWER(email) = 'a'", None);
    let json: serde_json::Value =
        serde_json::from_str(&format_report(&report, &options(OutputFormat::Json))).unwrap();
    assert_eq!(json["dialect"], "postgres");
    assert_eq!(json["statements"], 1);
    assert!(json["normalized"].as_str().unwrap().contains("SELECT"));
    assert_eq!(json["hints"].as_array().unwrap().len(), 2);
    assert_eq!(json["findings"][0]["rule"], "select_star");
    assert_eq!(json["findings"][0]["severity"], "medium");
    assert_eq!(json["findings"][0]["statement"], 0);
    assert_eq!(json["findings"][1]["rule"], "predicate_function");
    assert_eq!(json["findings"][1]["severity"], "high");
    assert!(json.get("suggestion").is_none());
}

#[test]
fn test_json_with_suggestion() {
    let report = sample_report("SELECT id FROM t", Some("Looks fine."));
    let json: serde_json::Value =
        serde_json::from_str(&format_report(&report, &options(OutputFormat::Json))).unwrap();
    assert_eq!(json["suggestion"], "Looks fine.");
}

#[test]
fn test_yaml_output() {
    let report = sample_report("SELECT * FROM users", None);
    let yaml = format_report(&report, &options(OutputFormat::Yaml));
    assert!(yaml.contains("rule: select_star"));
    assert!(yaml.contains("severity: medium"));
}

#[test]
fn test_markdown_sections() {
    let report = sample_report("SELECT * FROM users", Some("Project only id."));
    let markdown = render_markdown(&report);
    assert!(markdown.starts_with("# SQL Advisor Report"));
    assert!(markdown.contains("## Normalized SQL\n\n```sql\n"));
    assert!(markdown.contains("## Hints\n\n- Avoid SELECT *"));
    assert!(markdown.contains("## Findings\n\n- [medium] Avoid SELECT *"));
    assert!(markdown.contains("## Suggestion\n\nProject only id."));
}

#[test]
fn test_markdown_skips_empty_sections() {
    let markdown = render_markdown(&sample_report("SELECT id FROM users", None));
    assert!(!markdown.contains("## Hints"));
    assert!(!markdown.contains("## Findings"));
    assert!(!markdown.contains("## Suggestion"));
}

#[test]
fn test_format_report_markdown_matches_render() {
    let report = sample_report("SELECT DISTINCT id FROM t", None);
    assert_eq!(
        format_report(&report, &options(OutputFormat::Markdown)),
        render_markdown(&report)
    );
}

#[test]
fn test_text_output() {
    let report = sample_report("SELECT * FROM a; SELECT * FROM b", None);
    let text = format_report(&report, &options(OutputFormat::Text));
    assert!(text.contains("=== SQL Advisor ==="));
    assert!(text.contains("[medium] Avoid SELECT *"));
    assert!(text.contains("Summary:"));
    assert!(text.contains("select_star"));
    assert!(text.contains(" 2\n"));
}

#[test]
fn test_text_output_no_findings() {
    let report = sample_report("SELECT id FROM a", None);
    let text = format_report(&report, &options(OutputFormat::Text));
    assert!(text.contains("No findings."));
    assert!(!text.contains("Summary:"));
}

#[test]
fn test_text_output_verbose_shows_rule_and_statement() {
    let report = sample_report("SELECT id FROM a; SELECT * FROM b", None);
    let opts = OutputOptions {
        verbose: true,
        ..options(OutputFormat::Text)
    };
    let text = format_report(&report, &opts);
    assert!(text.contains("(#2, select_star)"));
}

#[test]
fn test_text_output_colored() {
    colored::control::set_override(true);
    let report = sample_report("SELECT * FROM a", None);
    let opts = OutputOptions {
        colored: true,
        ..options(OutputFormat::Text)
    };
    let text = format_report(&report, &opts);
    assert!(text.contains("\u{1b}["));
}

#[test]
fn test_plan_json_and_yaml() {
    let plan = ExplainPlan::Text(vec!["Seq Scan on t".into()]);
    let json = format_plan(&plan, OutputFormat::Json);
    assert!(json.contains("\"format\": \"text\""));
    let yaml = format_plan(&plan, OutputFormat::Yaml);
    assert!(yaml.contains("format: text"));
    assert!(yaml.contains("Seq Scan on t"));
}
