//! Predicates over literal lexemes.
//!
//! The lexer guarantees the forms are mutually exclusive; callers still test
//! them in a fixed order.

use super::tokens::{KND_FALSE, KND_NIL, KND_TRUE};

/// Reports whether the lexeme is an interpreted or raw string literal.
pub fn is_str(lexeme: &str) -> bool {
    lexeme.starts_with('"') || is_raw_str(lexeme)
}

pub fn is_raw_str(lexeme: &str) -> bool {
    lexeme.starts_with('`')
}

pub fn is_rune(lexeme: &str) -> bool {
    lexeme.starts_with('\'')
}

pub fn is_bool(lexeme: &str) -> bool {
    lexeme == KND_TRUE || lexeme == KND_FALSE
}

pub fn is_nil(lexeme: &str) -> bool {
    lexeme == KND_NIL
}

/// Reports whether the lexeme is a floating-point literal.
pub fn is_float(lexeme: &str) -> bool {
    if radix_prefix(lexeme).is_some() || !lexeme.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    lexeme.contains(['.', 'e', 'E']) && lexeme.parse::<f64>().is_ok()
}

/// Reports whether the lexeme is a decimal, hexadecimal, octal or binary
/// integer literal.
pub fn is_integer(lexeme: &str) -> bool {
    let (radix, digits) = split_radix(lexeme);
    !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix))
}

/// Parses an integer literal, returning `None` when it does not fit in 64 bits.
pub fn parse_integer(lexeme: &str) -> Option<u64> {
    let (radix, digits) = split_radix(lexeme);
    u64::from_str_radix(digits, radix).ok()
}

fn radix_prefix(lexeme: &str) -> Option<u32> {
    let prefix = lexeme.get(..2)?;
    match prefix {
        "0x" | "0X" => Some(16),
        "0b" | "0B" => Some(2),
        "0o" | "0O" => Some(8),
        _ => None,
    }
}

fn split_radix(lexeme: &str) -> (u32, &str) {
    if let Some(radix) = radix_prefix(lexeme) {
        return (radix, &lexeme[2..]);
    }
    // Leading zero means octal, as in C.
    if lexeme.len() > 1 && lexeme.starts_with('0') {
        return (8, &lexeme[1..]);
    }
    (10, lexeme)
}
