//! Error types and the error registry.
//!
//! This module defines how ill-formed and ill-typed programs are rejected:
//!
//! - `ErrorKind`, the closed taxonomy of symbolic error keys
//! - `Error`, a kind plus source position plus optional context
//! - `registry`, the constant key → message template table
//! - `ConfigError` for build settings loading

pub mod errors;
pub mod registry;
