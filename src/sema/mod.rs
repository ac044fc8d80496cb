//! Semantic analysis.
//!
//! The evaluator maps each expression to a [`Data`]: its type plus whether
//! it is mutable, an lvalue or a compile-time constant. The checker walks
//! function declarations and their statements on top of it:
//!
//! - `data`: evaluated value data
//! - `lookup`: symbols and the scope chain they live in
//! - `types`: type resolution and compatibility
//! - `eval`: the expression evaluator
//! - `sema`: declaration and statement checking
//!
//! Failures are ordinary [`Error`](crate::errors::errors::Error) values.
//! The evaluator stops at the first one; the checker records it and moves on
//! to the next statement.

pub mod data;
pub mod eval;
pub mod lookup;
pub mod sema;
pub mod stack;
pub mod types;

pub use data::{Data, DataKind};
pub use eval::{evaluate, Eval};
pub use lookup::{Environment, Lookup, ScopeChain, Symbol, VarSymbol};
pub use sema::{check, Sema};
