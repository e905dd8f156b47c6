use super::{Finding, Rule, RuleId, RuleInfo, Severity};
use crate::query::{InValues, Node, Statement};

/// Lists at or above this size are reported
const LARGE_IN_LIST_THRESHOLD: usize = 10;

/// `IN` with a long list made only of literals
pub struct LargeInList;

impl Rule for LargeInList {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       RuleId::LargeInList,
            severity: Severity::Low,
            message:  "Large IN list; consider a JOIN against a temporary table or CTE, or EXISTS."
        }
    }

    fn check(&self, statement: &Statement) -> Vec<Finding> {
        let info = self.info();
        statement
            .root
            .descendants()
            .filter(|node| match node {
                Node::In(isin) => match &isin.values {
                    InValues::List(values) => {
                        values.len() >= LARGE_IN_LIST_THRESHOLD
                            && values.iter().all(|v| v.as_literal().is_some())
                    }
                    InValues::Subquery(_) => false
                },
                _ => false
            })
            .map(|_| info.finding(statement.index))
            .collect()
    }
}

/// Negation directly wrapping `IN`
pub struct NotInExists;

impl Rule for NotInExists {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       RuleId::NotInExists,
            severity: Severity::Low,
            message:  "NOT IN may behave unexpectedly with NULLs; consider NOT EXISTS."
        }
    }

    fn check(&self, statement: &Statement) -> Vec<Finding> {
        let info = self.info();
        statement
            .root
            .descendants()
            .filter(|node| matches!(node, Node::Not(inner) if matches!(inner.as_ref(), Node::In(_))))
            .map(|_| info.finding(statement.index))
            .collect()
    }
}
