//! Advisory report assembled from one analysis run.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    hints::Hints,
    query::{SqlDialect, Statement},
    rules::{Finding, RuleId, Severity}
};

/// Everything produced for one SQL input. Built once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub dialect:    SqlDialect,
    /// Number of statements in the batch
    pub statements: usize,
    pub normalized: String,
    pub hints:      Hints,
    pub findings:   Vec<Finding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>
}

/// Aggregate analysis results into a [`Report`]
pub fn build_report(
    statements: &[Statement],
    normalized: String,
    hints: Hints,
    findings: Vec<Finding>,
    suggestion: Option<String>
) -> Report {
    Report {
        dialect: statements.first().map(|s| s.dialect).unwrap_or_default(),
        statements: statements.len(),
        normalized,
        hints,
        findings,
        suggestion
    }
}

impl Report {
    /// Finding count per rule, in order of first appearance
    pub fn summary(&self) -> IndexMap<RuleId, usize> {
        let mut counts = IndexMap::new();
        for finding in &self.findings {
            *counts.entry(finding.rule).or_insert(0) += 1;
        }
        counts
    }

    /// Highest severity among the findings
    pub fn max_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hints::baseline_hints,
        query::{parse_statements, render_normalized},
        rules::RuleRunner
    };

    fn report_for(sql: &str) -> Report {
        let statements = parse_statements(sql, SqlDialect::Postgres).unwrap();
        let normalized = render_normalized(&statements);
        let hints = baseline_hints(&normalized);
        let findings = RuleRunner::new().evaluate(&statements);
        build_report(&statements, normalized, hints, findings, None)
    }

    #[test]
    fn test_summary_keeps_first_appearance_order() {
        let report = report_for("SELECT DISTINCT * FROM t WHERE a = 1 OR b = 2");
        let rules: Vec<RuleId> = report.summary().keys().copied().collect();
        assert_eq!(rules, [RuleId::SelectStar, RuleId::DistinctCheck, RuleId::OrToIn]);
    }

    #[test]
    fn test_max_severity() {
        assert_eq!(report_for("SELECT id FROM t").max_severity(), None);
        assert_eq!(
            report_for("SELECT id FROM t WHERE LOWER(name) = 'x'").max_severity(),
            Some(Severity::High)
        );
    }

    #[test]
    fn test_suggestion_omitted_from_json_when_absent() {
        let json = serde_json::to_value(report_for("SELECT 1")).unwrap();
        assert!(json.get("suggestion").is_none());
        assert_eq!(json["dialect"], "postgres");
        assert_eq!(json["statements"], 1);
    }
}
