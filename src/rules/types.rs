//! Type definitions for the rule engine.
//!
//! - [`Severity`] - Finding severity levels (low, medium, high)
//! - [`RuleId`] - Closed set of rule identifiers
//! - [`Finding`] - A single rule match in a statement

use serde::Serialize;

/// Severity level of a finding.
///
/// Ordered from lowest to highest. Exit codes are determined by the highest
/// severity found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth a look, does not affect exit code
    Low,
    /// Likely slow (exit code 1)
    Medium,
    /// Defeats index usage (exit code 2)
    High
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high")
        }
    }
}

/// Identifier of a detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    SelectStar,
    PredicateFunction,
    LeadingWildcard,
    LargeInList,
    DistinctCheck,
    OrToIn,
    NotInExists
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelectStar => "select_star",
            Self::PredicateFunction => "predicate_function",
            Self::LeadingWildcard => "leading_wildcard",
            Self::LargeInList => "large_in_list",
            Self::DistinctCheck => "distinct_check",
            Self::OrToIn => "or_to_in",
            Self::NotInExists => "not_in_exists"
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata about a rule for identification and configuration.
#[derive(Debug, Clone)]
pub struct RuleInfo {
    pub id:       RuleId,
    /// Severity of every finding the rule emits
    pub severity: Severity,
    /// Fixed English message attached to findings
    pub message:  &'static str
}

impl RuleInfo {
    /// Build a finding for the given statement
    pub fn finding(&self, statement_index: usize) -> Finding {
        Finding {
            rule: self.id,
            severity: self.severity,
            message: self.message.to_string(),
            statement_index
        }
    }
}

/// A single rule match.
///
/// Findings are plain values; identical findings are kept, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule:            RuleId,
    pub severity:        Severity,
    pub message:         String,
    /// Zero-based index of the statement in the input batch
    #[serde(rename = "statement")]
    pub statement_index: usize
}
