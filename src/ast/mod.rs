//! Abstract Syntax Tree definitions.
//!
//! These are the node shapes the semantic core consumes:
//!
//! - `ast`: top-level nodes, comments and directives
//! - `expressions`: the closed set of expression forms
//! - `statements`: scopes, statements, parameters and function declarations
//! - `types`: the type-kind model (primitive, named, reference, multi-return)
//!
//! Nodes are produced by the parser and treated as read-only by the
//! evaluator.

pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
