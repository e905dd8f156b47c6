use sqlparser::ast::{
    BinaryOperator, DuplicateTreatment, Expr, Function, FunctionArg, FunctionArgExpr,
    FunctionArguments, UnaryOperator, Value
};
use tracing::trace;

use super::{nested::lower_operands, set_expr::lower_query};
use crate::query::types::{Func, In, InValues, Like, Literal, Node};

/// Lower an expression into a [`Node`].
///
/// Parentheses are dropped, negated predicates become [`Node::Not`] around the
/// positive form, and expressions no rule inspects are kept as
/// [`Node::Other`] with their sub-expressions as children.
pub fn lower_expr(expr: &Expr) -> Node {
    match expr {
        Expr::Identifier(ident) => Node::Column(ident.value.as_str().into()),
        Expr::CompoundIdentifier(idents) => {
            let parts: Vec<&str> = idents.iter().map(|i| i.value.as_str()).collect();
            Node::Column(parts.join(".").into())
        }
        Expr::Value(val) => lower_value(&val.value),
        Expr::Nested(inner) => lower_expr(inner),
        Expr::BinaryOp {
            left,
            op: BinaryOperator::Or,
            right,
            ..
        } => Node::Or(Box::new(lower_expr(left)), Box::new(lower_expr(right))),
        Expr::BinaryOp {
            left,
            right,
            ..
        } => Node::Other(vec![lower_expr(left), lower_expr(right)]),
        Expr::UnaryOp {
            op: UnaryOperator::Not,
            expr,
            ..
        } => Node::Not(Box::new(lower_expr(expr))),
        Expr::UnaryOp {
            expr, ..
        } => Node::Other(vec![lower_expr(expr)]),
        Expr::Like {
            negated,
            expr,
            pattern,
            ..
        } => negate(*negated, like(false, expr, pattern)),
        Expr::ILike {
            negated,
            expr,
            pattern,
            ..
        } => negate(*negated, like(true, expr, pattern)),
        Expr::InList {
            expr,
            list,
            negated,
            ..
        } => negate(
            *negated,
            Node::In(In {
                expr:   Box::new(lower_expr(expr)),
                values: InValues::List(list.iter().map(lower_expr).collect())
            })
        ),
        Expr::InSubquery {
            expr,
            subquery,
            negated,
            ..
        } => negate(
            *negated,
            Node::In(In {
                expr:   Box::new(lower_expr(expr)),
                values: InValues::Subquery(Box::new(lower_query(subquery)))
            })
        ),
        Expr::Exists {
            subquery,
            negated,
            ..
        } => negate(*negated, Node::Other(vec![lower_query(subquery)])),
        Expr::Subquery(query) => lower_query(query),
        Expr::Function(func) => lower_function(func),
        Expr::Cast {
            expr, ..
        } => call("CAST", vec![lower_expr(expr)]),
        Expr::Extract {
            expr, ..
        } => call("EXTRACT", vec![lower_expr(expr)]),
        Expr::Substring {
            expr,
            substring_from,
            substring_for,
            ..
        } => {
            let mut args = vec![lower_expr(expr)];
            args.extend(substring_from.iter().map(|e| lower_expr(e)));
            args.extend(substring_for.iter().map(|e| lower_expr(e)));
            call("SUBSTRING", args)
        }
        Expr::Trim {
            expr, ..
        } => call("TRIM", vec![lower_expr(expr)]),
        Expr::Between {
            expr,
            negated,
            low,
            high,
            ..
        } => negate(
            *negated,
            Node::Other(vec![lower_expr(expr), lower_expr(low), lower_expr(high)])
        ),
        Expr::IsNull(e) | Expr::IsNotNull(e) => Node::Other(vec![lower_expr(e)]),
        Expr::Case {
            operand,
            conditions,
            else_result,
            ..
        } => {
            let mut children = Vec::new();
            if let Some(op) = operand {
                children.push(lower_expr(op));
            }
            for case_when in conditions {
                children.push(lower_expr(&case_when.condition));
                children.push(lower_expr(&case_when.result));
            }
            if let Some(else_res) = else_result {
                children.push(lower_expr(else_res));
            }
            Node::Other(children)
        }
        Expr::Tuple(items) => Node::Other(items.iter().map(lower_expr).collect()),
        Expr::Ceil { .. } => call("CEIL", lower_operands(expr)),
        Expr::Floor { .. } => call("FLOOR", lower_operands(expr)),
        Expr::Position { .. } => call("POSITION", lower_operands(expr)),
        Expr::Overlay { .. } => call("OVERLAY", lower_operands(expr)),
        _ => {
            trace!(expr = %expr, "expression lowered through its operands");
            Node::Other(lower_operands(expr))
        }
    }
}

fn lower_value(value: &Value) -> Node {
    match value {
        Value::SingleQuotedString(s)
        | Value::DoubleQuotedString(s)
        | Value::NationalStringLiteral(s)
        | Value::EscapedStringLiteral(s) => Node::Literal(Literal::String(s.clone())),
        Value::Number(n, _) => Node::Literal(Literal::Number(n.to_string().into())),
        _ => Node::leaf()
    }
}

fn lower_function(func: &Function) -> Node {
    let mut args = Vec::new();
    match &func.args {
        FunctionArguments::List(arg_list) => {
            let lowered: Vec<Node> = arg_list
                .args
                .iter()
                .filter_map(function_arg_expr)
                .map(lower_expr)
                .collect();
            if matches!(arg_list.duplicate_treatment, Some(DuplicateTreatment::Distinct)) {
                args.push(Node::Distinct(lowered));
            } else {
                args.extend(lowered);
            }
        }
        FunctionArguments::Subquery(query) => args.push(lower_query(query)),
        FunctionArguments::None => {}
    }
    Node::Func(Func {
        name: func.name.to_string().into(),
        args
    })
}

/// Expression behind a call argument; `*` arguments have none
fn function_arg_expr(arg: &FunctionArg) -> Option<&Expr> {
    let arg_expr = match arg {
        FunctionArg::Unnamed(arg_expr) => arg_expr,
        FunctionArg::Named {
            arg, ..
        } => arg,
        _ => return None
    };
    match arg_expr {
        FunctionArgExpr::Expr(e) => Some(e),
        _ => None
    }
}

fn like(case_insensitive: bool, expr: &Expr, pattern: &Expr) -> Node {
    Node::Like(Like {
        case_insensitive,
        expr: Box::new(lower_expr(expr)),
        pattern: Box::new(lower_expr(pattern))
    })
}

fn call(name: &str, args: Vec<Node>) -> Node {
    Node::Func(Func {
        name: name.into(),
        args
    })
}

fn negate(negated: bool, node: Node) -> Node {
    if negated { Node::Not(Box::new(node)) } else { node }
}
