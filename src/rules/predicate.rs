use tracing::trace;

use super::{Finding, Rule, RuleId, RuleInfo, Severity};
use crate::query::{Node, Statement};

/// Every `WHERE` clause of the statement, outermost first
fn where_clauses(statement: &Statement) -> impl Iterator<Item = &Node> {
    statement
        .root
        .descendants()
        .filter(|node| matches!(node, Node::Where(_)))
}

/// Function applied to a column inside a `WHERE` clause.
///
/// Each `WHERE` is examined on its own, so a call inside a subquery filter is
/// reported once per enclosing clause.
pub struct PredicateFunction;

impl Rule for PredicateFunction {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       RuleId::PredicateFunction,
            severity: Severity::High,
            message:  "Avoid functions on filtered columns (use a functional index or normalize the data)."
        }
    }

    fn check(&self, statement: &Statement) -> Vec<Finding> {
        let info = self.info();
        let mut findings = Vec::new();
        for clause in where_clauses(statement) {
            for node in clause.descendants() {
                if let Node::Func(func) = node
                    && func
                        .args
                        .iter()
                        .any(|arg| arg.descendants().any(Node::is_column))
                {
                    findings.push(info.finding(statement.index));
                }
            }
        }
        findings
    }
}

/// `LIKE` pattern starting with `%`
pub struct LeadingWildcard;

impl Rule for LeadingWildcard {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       RuleId::LeadingWildcard,
            severity: Severity::Medium,
            message:  "LIKE with a leading wildcard disables index usage. Consider a trigram/GIN index (Postgres) or suffix search."
        }
    }

    fn check(&self, statement: &Statement) -> Vec<Finding> {
        let info = self.info();
        let mut findings = Vec::new();
        for node in statement.root.descendants() {
            let Node::Like(like) = node else {
                continue;
            };
            let Some(literal) = like
                .pattern
                .as_literal()
                .or_else(|| like.expr.as_literal())
            else {
                trace!(statement = statement.index, "LIKE without literal operand skipped");
                continue;
            };
            if literal.is_string() && literal.as_str().starts_with('%') {
                findings.push(info.finding(statement.index));
            }
        }
        findings
    }
}

/// `WHERE` clause containing `OR`; reported once per clause
pub struct OrToIn;

impl Rule for OrToIn {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       RuleId::OrToIn,
            severity: Severity::Low,
            message:  "Multiple ORs can be rewritten as IN to simplify and potentially optimize."
        }
    }

    fn check(&self, statement: &Statement) -> Vec<Finding> {
        let info = self.info();
        where_clauses(statement)
            .filter(|clause| clause.descendants().any(|n| matches!(n, Node::Or(..))))
            .map(|_| info.finding(statement.index))
            .collect()
    }
}
