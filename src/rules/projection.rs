use super::{Finding, Rule, RuleId, RuleInfo, Severity};
use crate::query::{Node, Statement};

/// `SELECT *` or `t.*` in a projection list
pub struct SelectStar;

impl Rule for SelectStar {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       RuleId::SelectStar,
            severity: Severity::Medium,
            message:  "Avoid SELECT *; project only the columns you need."
        }
    }

    fn check(&self, statement: &Statement) -> Vec<Finding> {
        let info = self.info();
        statement
            .root
            .descendants()
            .filter(|node| match node {
                Node::Select(select) => select.projection.iter().any(|p| p.is_wildcard()),
                _ => false
            })
            .map(|_| info.finding(statement.index))
            .collect()
    }
}

/// Any `DISTINCT`, select-level or inside an aggregate
pub struct DistinctCheck;

impl Rule for DistinctCheck {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       RuleId::DistinctCheck,
            severity: Severity::Low,
            message:  "Check whether DISTINCT is necessary; it may hide duplicates caused by a JOIN."
        }
    }

    fn check(&self, statement: &Statement) -> Vec<Finding> {
        let info = self.info();
        statement
            .root
            .descendants()
            .filter(|node| matches!(node, Node::Distinct(_)))
            .map(|_| info.finding(statement.index))
            .collect()
    }
}
