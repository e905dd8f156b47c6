//! Static rule engine over lowered SQL statements.
//!
//! Each detector is a type implementing [`Rule`]. The [`RuleRunner`] holds
//! the enabled detectors in a fixed order and evaluates them against every
//! statement of a batch.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ Statements  │────▶│  RuleRunner  │────▶│  Findings   │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                            │
//!                     ┌──────┴──────┐
//!                     │   Rules     │
//!                     │  (parallel) │
//!                     └─────────────┘
//! ```
//!
//! # Evaluation order
//!
//! Statements in input order; within a statement `select_star`,
//! `predicate_function`, `leading_wildcard`, `large_in_list`,
//! `distinct_check`, `or_to_in`, `not_in_exists`; within a rule, pre-order
//! traversal order. Work is spread over [`rayon`] but results are collected
//! in exactly this order.
//!
//! # Configuration
//!
//! ```toml
//! [rules]
//! disabled = ["distinct_check"]
//! ```

mod membership;
mod predicate;
mod projection;
mod types;

use rayon::prelude::*;
use tracing::debug;
pub use types::{Finding, RuleId, RuleInfo, Severity};

use crate::{config::RulesConfig, query::Statement};

/// Trait for implementing SQL analysis rules.
///
/// Rules are stateless and must be `Send + Sync` for parallel execution.
///
/// # Example
///
/// ```
/// use sql_advisor::{
///     query::{Node, Statement},
///     rules::{Finding, Rule, RuleId, RuleInfo, Severity}
/// };
///
/// struct AnyOr;
///
/// impl Rule for AnyOr {
///     fn info(&self) -> RuleInfo {
///         RuleInfo {
///             id:       RuleId::OrToIn,
///             severity: Severity::Low,
///             message:  "OR found"
///         }
///     }
///
///     fn check(&self, statement: &Statement) -> Vec<Finding> {
///         let info = self.info();
///         statement
///             .root
///             .descendants()
///             .filter(|n| matches!(n, Node::Or(..)))
///             .map(|_| info.finding(statement.index))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns metadata about this rule.
    fn info(&self) -> RuleInfo;

    /// Findings for one statement, in traversal order. Never mutates it.
    fn check(&self, statement: &Statement) -> Vec<Finding>;
}

/// Parallel rule execution engine.
///
/// # Example
///
/// ```
/// use sql_advisor::{
///     query::{SqlDialect, parse_statements},
///     rules::{RuleId, RuleRunner}
/// };
///
/// let statements = parse_statements("SELECT * FROM users", SqlDialect::Postgres).unwrap();
/// let findings = RuleRunner::new().evaluate(&statements);
///
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].rule, RuleId::SelectStar);
/// ```
pub struct RuleRunner {
    rules: Vec<Box<dyn Rule>>
}

impl Default for RuleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleRunner {
    /// Create a new runner with all rules enabled
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    /// Create a runner without the rules listed in `config.disabled`
    ///
    /// Ids are compared case-insensitively; unknown ids are ignored.
    pub fn with_config(config: RulesConfig) -> Self {
        let all_rules: Vec<Box<dyn Rule>> = vec![
            Box::new(projection::SelectStar),
            Box::new(predicate::PredicateFunction),
            Box::new(predicate::LeadingWildcard),
            Box::new(membership::LargeInList),
            Box::new(projection::DistinctCheck),
            Box::new(predicate::OrToIn),
            Box::new(membership::NotInExists),
        ];
        let rules: Vec<Box<dyn Rule>> = all_rules
            .into_iter()
            .filter(|r| {
                !config
                    .disabled
                    .iter()
                    .any(|d| d.eq_ignore_ascii_case(r.info().id.as_str()))
            })
            .collect();
        Self {
            rules
        }
    }

    /// Ids of the enabled rules in evaluation order
    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.info().id).collect()
    }

    /// Run all rules on every statement, concatenating in statement order
    pub fn evaluate(&self, statements: &[Statement]) -> Vec<Finding> {
        let per_statement: Vec<Vec<Finding>> = statements
            .par_iter()
            .map(|statement| self.evaluate_statement(statement))
            .collect();
        let findings: Vec<Finding> = per_statement.into_iter().flatten().collect();
        debug!(
            statements = statements.len(),
            rules = self.rules.len(),
            findings = findings.len(),
            "rule evaluation finished"
        );
        findings
    }

    /// Run all rules on a single statement
    pub fn evaluate_statement(&self, statement: &Statement) -> Vec<Finding> {
        let per_rule: Vec<Vec<Finding>> = self
            .rules
            .par_iter()
            .map(|rule| rule.check(statement))
            .collect();
        per_rule.into_iter().flatten().collect()
    }
}
