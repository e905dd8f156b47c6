use compact_str::CompactString;
use serde::Serialize;

use super::SqlDialect;

/// One parsed SQL statement of a batch.
///
/// Built once per request from `sqlparser` output and never mutated
/// afterwards; the rule engine and the normalizer only borrow it.
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    /// Zero-based position in the input batch
    pub index:   usize,
    pub dialect: SqlDialect,
    pub kind:    StatementKind,
    /// Single-line rendering
    pub raw:     String,
    /// Pretty-printed rendering used as normalized text
    pub pretty:  String,
    #[serde(skip)]
    pub root:    Node
}

/// Kind of SQL statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Other
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Other => write!(f, "OTHER")
        }
    }
}

/// Node of the lowered syntax tree.
///
/// Only the shapes that rules look at get their own variant. Everything else
/// is kept as [`Node::Other`] so that nested selects, predicates and calls
/// inside it stay reachable by traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Select(Select),
    /// Boolean condition of a `WHERE` clause
    Where(Box<Node>),
    Func(Func),
    Column(CompactString),
    Like(Like),
    Literal(Literal),
    In(In),
    /// `SELECT DISTINCT [ON (..)]` or an aggregate's `DISTINCT` arguments
    Distinct(Vec<Node>),
    Or(Box<Node>, Box<Node>),
    Not(Box<Node>),
    Other(Vec<Node>)
}

/// A single `SELECT` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Select {
    /// Always a [`Node::Distinct`] when present
    pub distinct:   Option<Box<Node>>,
    pub projection: Vec<Projection>,
    pub from:       Vec<Node>,
    /// Always a [`Node::Where`] when present
    pub selection:  Option<Box<Node>>,
    /// `GROUP BY` and `HAVING` expressions
    pub rest:       Vec<Node>
}

/// Item of a projection list
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// `*` or `table.*`
    Wildcard,
    Named(Node)
}

impl Projection {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

/// Function call, including `CAST`, `EXTRACT`, `SUBSTRING` and `TRIM`
#[derive(Debug, Clone, PartialEq)]
pub struct Func {
    pub name: CompactString,
    pub args: Vec<Node>
}

/// `LIKE` / `ILIKE` predicate in its positive form
#[derive(Debug, Clone, PartialEq)]
pub struct Like {
    pub case_insensitive: bool,
    pub expr:             Box<Node>,
    pub pattern:          Box<Node>
}

/// `IN` predicate in its positive form
#[derive(Debug, Clone, PartialEq)]
pub struct In {
    pub expr:   Box<Node>,
    pub values: InValues
}

#[derive(Debug, Clone, PartialEq)]
pub enum InValues {
    List(Vec<Node>),
    Subquery(Box<Node>)
}

/// String or numeric literal with its raw value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(CompactString)
}

impl Literal {
    pub fn as_str(&self) -> &str {
        match self {
            Self::String(s) => s,
            Self::Number(n) => n
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }
}

impl Node {
    /// Opaque node without children
    pub fn leaf() -> Self {
        Self::Other(Vec::new())
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None
        }
    }

    /// Direct children in source order
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Self::Select(select) => {
                let mut out = Vec::with_capacity(
                    select.projection.len() + select.from.len() + select.rest.len() + 2
                );
                if let Some(distinct) = &select.distinct {
                    out.push(distinct.as_ref());
                }
                out.extend(select.projection.iter().filter_map(|p| match p {
                    Projection::Named(node) => Some(node),
                    Projection::Wildcard => None
                }));
                out.extend(select.from.iter());
                if let Some(selection) = &select.selection {
                    out.push(selection.as_ref());
                }
                out.extend(select.rest.iter());
                out
            }
            Self::Where(cond) | Self::Not(cond) => vec![cond.as_ref()],
            Self::Func(func) => func.args.iter().collect(),
            Self::Like(like) => vec![like.expr.as_ref(), like.pattern.as_ref()],
            Self::In(isin) => {
                let mut out = vec![isin.expr.as_ref()];
                match &isin.values {
                    InValues::List(list) => out.extend(list.iter()),
                    InValues::Subquery(query) => out.push(query.as_ref())
                }
                out
            }
            Self::Or(left, right) => vec![left.as_ref(), right.as_ref()],
            Self::Distinct(nodes) | Self::Other(nodes) => nodes.iter().collect(),
            Self::Column(_) | Self::Literal(_) => Vec::new()
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::leaf()
    }
}
