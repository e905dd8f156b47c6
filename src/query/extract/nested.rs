use std::{convert::Infallible, ops::ControlFlow};

use sqlparser::ast::{Expr, Query, Visit, Visitor};

use super::{expr::lower_expr, set_expr::lower_query};
use crate::query::types::Node;

/// Lower the outermost queries and expressions contained in an AST node.
///
/// Covers constructs that are not lowered field by field. `node` itself must
/// not be a [`Query`] or an [`Expr`]; use [`lower_operands`] for expressions.
pub fn lower_contents<T: Visit>(node: &T) -> Vec<Node> {
    collect(node, 0)
}

/// Lower the direct operands of an expression
pub fn lower_operands(expr: &Expr) -> Vec<Node> {
    collect(expr, 1)
}

fn collect<T: Visit>(node: &T, level: usize) -> Vec<Node> {
    let mut outermost = Outermost {
        level,
        depth: 0,
        nodes: Vec::new()
    };
    let _ = node.visit(&mut outermost);
    outermost.nodes
}

/// Lowers every query or expression met at `level` and skips what is below
struct Outermost {
    level: usize,
    depth: usize,
    nodes: Vec<Node>
}

impl Outermost {
    fn enter(&mut self, lower: impl FnOnce() -> Node) -> ControlFlow<Infallible> {
        if self.depth == self.level {
            self.nodes.push(lower());
        }
        self.depth += 1;
        ControlFlow::Continue(())
    }

    fn leave(&mut self) -> ControlFlow<Infallible> {
        self.depth -= 1;
        ControlFlow::Continue(())
    }
}

impl Visitor for Outermost {
    type Break = Infallible;

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        self.enter(|| lower_query(query))
    }

    fn post_visit_query(&mut self, _query: &Query) -> ControlFlow<Self::Break> {
        self.leave()
    }

    fn pre_visit_expr(&mut self, expr: &Expr) -> ControlFlow<Self::Break> {
        self.enter(|| lower_expr(expr))
    }

    fn post_visit_expr(&mut self, _expr: &Expr) -> ControlFlow<Self::Break> {
        self.leave()
    }
}
