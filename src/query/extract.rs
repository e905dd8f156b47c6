mod expr;
mod nested;
mod set_expr;
mod table;

pub use expr::lower_expr;
pub use set_expr::lower_query;
use sqlparser::ast::{Expr, Query, SetExpr, Statement, Update};

use self::{nested::lower_contents, table::lower_table_with_joins};
use super::types::{Node, StatementKind};

/// Lower a parsed statement into its kind and root node.
///
/// Statements without a dedicated lowering keep the queries and expressions
/// they contain, so `CREATE VIEW ... AS SELECT` or `MERGE ... USING (SELECT
/// ...)` are still inspected.
pub fn lower_statement(stmt: &Statement) -> (StatementKind, Node) {
    match stmt {
        Statement::Query(query) => (query_kind(query), lower_query(query)),
        Statement::Insert(insert) => {
            let root = insert
                .source
                .as_deref()
                .map(lower_query)
                .unwrap_or_default();
            (StatementKind::Insert, root)
        }
        Statement::Update(Update {
            table,
            assignments,
            from,
            selection,
            ..
        }) => {
            let mut children = lower_table_with_joins(table);
            children.extend(
                assignments
                    .iter()
                    .map(|assignment| lower_expr(&assignment.value))
            );
            children.extend(lower_contents(from));
            children.extend(where_clause(selection.as_ref()));
            (StatementKind::Update, Node::Other(children))
        }
        Statement::Delete(delete) => {
            let mut children = lower_contents(&delete.from);
            children.extend(lower_contents(&delete.using));
            children.extend(where_clause(delete.selection.as_ref()));
            (StatementKind::Delete, Node::Other(children))
        }
        _ => (StatementKind::Other, Node::Other(lower_contents(stmt)))
    }
}

/// `WITH ... DELETE` and friends parse as queries; classify by their body
fn query_kind(query: &Query) -> StatementKind {
    match query.body.as_ref() {
        SetExpr::Insert(_) => StatementKind::Insert,
        SetExpr::Update(_) => StatementKind::Update,
        SetExpr::Delete(_) => StatementKind::Delete,
        SetExpr::Merge(_) => StatementKind::Other,
        _ => StatementKind::Select
    }
}

fn where_clause(selection: Option<&Expr>) -> Option<Node> {
    selection.map(|expr| Node::Where(Box::new(lower_expr(expr))))
}
