use sqlparser::ast::{Distinct, GroupByExpr, OrderByKind, Query, SelectItem, SetExpr};

use super::{
    expr::lower_expr, lower_statement, nested::lower_contents, table::lower_table_with_joins
};
use crate::query::types::{Node, Projection, Select};

/// Lower a full query: CTEs, body and `ORDER BY` expressions
pub fn lower_query(query: &Query) -> Node {
    let mut children = Vec::new();
    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            children.push(lower_query(&cte.query));
        }
    }
    children.push(lower_set_expr(&query.body));
    if let Some(order_by) = &query.order_by
        && let OrderByKind::Expressions(exprs) = &order_by.kind
    {
        for expr in exprs {
            children.push(lower_expr(&expr.expr));
        }
    }
    if children.len() == 1 {
        children.pop().unwrap_or_default()
    } else {
        Node::Other(children)
    }
}

pub fn lower_set_expr(set_expr: &SetExpr) -> Node {
    match set_expr {
        SetExpr::Select(select) => Node::Select(lower_select(select)),
        SetExpr::Query(query) => lower_query(query),
        SetExpr::SetOperation {
            left,
            right,
            ..
        } => Node::Other(vec![lower_set_expr(left), lower_set_expr(right)]),
        SetExpr::Values(values) => {
            Node::Other(values.rows.iter().flatten().map(lower_expr).collect())
        }
        SetExpr::Insert(statement)
        | SetExpr::Update(statement)
        | SetExpr::Delete(statement)
        | SetExpr::Merge(statement) => lower_statement(statement).1,
        _ => Node::Other(lower_contents(set_expr))
    }
}

fn lower_select(select: &sqlparser::ast::Select) -> Select {
    let distinct = match &select.distinct {
        Some(Distinct::Distinct) => Some(Box::new(Node::Distinct(Vec::new()))),
        Some(Distinct::On(exprs)) => Some(Box::new(Node::Distinct(
            exprs.iter().map(lower_expr).collect()
        ))),
        _ => None
    };
    let projection = select
        .projection
        .iter()
        .map(|item| match item {
            SelectItem::UnnamedExpr(expr)
            | SelectItem::ExprWithAlias {
                expr, ..
            } => Projection::Named(lower_expr(expr)),
            SelectItem::Wildcard(_) | SelectItem::QualifiedWildcard(..) => Projection::Wildcard
        })
        .collect();
    let from = select.from.iter().flat_map(lower_table_with_joins).collect();
    let selection = select
        .selection
        .as_ref()
        .map(|expr| Box::new(Node::Where(Box::new(lower_expr(expr)))));
    let mut rest = Vec::new();
    if let GroupByExpr::Expressions(exprs, _) = &select.group_by {
        rest.extend(exprs.iter().map(lower_expr));
    }
    if let Some(having) = &select.having {
        rest.push(lower_expr(having));
    }
    Select {
        distinct,
        projection,
        from,
        selection,
        rest
    }
}
