use sqlparser::ast::{TableFactor, TableWithJoins};

use super::{nested::lower_contents, set_expr::lower_query};
use crate::query::types::Node;

/// Lower a `FROM` item: every relation plus the condition of each join.
///
/// Join conditions are taken from any join operator (`JOIN`, `LEFT JOIN`,
/// `SEMI`, `ASOF` and so on), not only the `OUTER` spellings.
pub fn lower_table_with_joins(table: &TableWithJoins) -> Vec<Node> {
    let mut nodes = vec![lower_table_factor(&table.relation)];
    for join in &table.joins {
        nodes.push(lower_table_factor(&join.relation));
        nodes.extend(lower_contents(&join.join_operator));
    }
    nodes
}

fn lower_table_factor(table_factor: &TableFactor) -> Node {
    match table_factor {
        TableFactor::Derived {
            subquery, ..
        } => lower_query(subquery),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => Node::Other(lower_table_with_joins(table_with_joins)),
        _ => Node::Other(lower_contents(table_factor))
    }
}
