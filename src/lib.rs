//! # SQL Advisor Library
//!
//! Parses SQL with [`sqlparser`], lowers each statement into a small owned
//! tree and runs a fixed set of detectors over it.
//!
//! # Modules
//!
//! - [`query`] - Parsing, lowering and normalization
//! - [`rules`] - Rule engine and detectors
//! - [`hints`] - Text-based baseline hints
//! - [`report`] - Report assembly
//! - [`output`] - Text, JSON, YAML and Markdown rendering
//! - [`llm`] - Ollama client for rewrite suggestions
//! - [`explain`] - PostgreSQL execution plans
//! - [`config`] - Configuration loading
//! - [`error`] - Error types and constructors
//!
//! # Example
//!
//! ```
//! use sql_advisor::{
//!     query::{SqlDialect, parse_statements},
//!     rules::{RuleId, RuleRunner}
//! };
//!
//! let sql = "SELECT * FROM users WHERE LOWER(email) = LOWER('a@b.com')";
//! let statements = parse_statements(sql, SqlDialect::Postgres).unwrap();
//! let rules: Vec<RuleId> = RuleRunner::new()
//!     .evaluate(&statements)
//!     .iter()
//!     .map(|f| f.rule)
//!     .collect();
//! assert_eq!(rules, [RuleId::SelectStar, RuleId::PredicateFunction]);
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod explain;
pub mod hints;
pub mod llm;
pub mod output;
pub mod query;
pub mod report;
pub mod rules;
