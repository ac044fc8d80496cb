//! Lexical analysis.
//!
//! Converts source text into the token stream the rest of the core consumes.
//! It handles:
//!
//! - Regex-driven recognition of identifiers, data-type keywords, keywords,
//!   literals, operators and punctuation
//! - String and rune literal decoding with escape validation
//! - Row/column tracking for diagnostics
//! - Line and block comments

pub mod lexer;
pub mod literals;
pub mod tokens;

#[cfg(test)]
mod tests;
