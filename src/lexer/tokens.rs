use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

use crate::Position;

pub const KND_I8: &str = "i8";
pub const KND_I16: &str = "i16";
pub const KND_I32: &str = "i32";
pub const KND_I64: &str = "i64";
pub const KND_U8: &str = "u8";
pub const KND_U16: &str = "u16";
pub const KND_U32: &str = "u32";
pub const KND_U64: &str = "u64";
pub const KND_F32: &str = "f32";
pub const KND_F64: &str = "f64";
pub const KND_INT: &str = "int";
pub const KND_UINT: &str = "uint";
pub const KND_UINTPTR: &str = "uintptr";
pub const KND_BOOL: &str = "bool";
pub const KND_STR: &str = "str";
pub const KND_ANY: &str = "any";

pub const KND_TRUE: &str = "true";
pub const KND_FALSE: &str = "false";
pub const KND_NIL: &str = "nil";

lazy_static! {
    pub static ref DATA_TYPES: HashSet<&'static str> = [
        KND_I8, KND_I16, KND_I32, KND_I64, KND_U8, KND_U16, KND_U32, KND_U64, KND_F32, KND_F64,
        KND_INT, KND_UINT, KND_UINTPTR, KND_BOOL, KND_STR, KND_ANY,
    ]
    .into_iter()
    .collect();

    pub static ref RESERVED_LOOKUP: HashSet<&'static str> = [
        "const", "ret", "type", "unsafe", "pub", "mut", "defer", "if", "else", "for", "break",
        "continue", "goto", "fallthrough", "match", "struct", "enum", "trait", "impl", "use", "co",
    ]
    .into_iter()
    .collect();
}

/// Coarse classification of a token.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenId {
    /// Not applicable; marks an absent (void) type.
    Na,
    Eof,
    Identifier,
    /// One of the built-in data-type keywords.
    DataType,
    Literal,
    Keyword,
    Operator,
    Brace,
    Comma,
    Colon,
    Semicolon,
    Dot,
}

impl Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A lexical token.
///
/// `kind` is the lexeme as written in the source. `text` is the decoded value
/// for string and rune literals and equals `kind` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: TokenId,
    pub kind: String,
    pub text: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} `{}` at {}", self.id, self.kind, self.position)
    }
}

impl Token {
    pub fn new(id: TokenId, kind: impl Into<String>, position: Position) -> Self {
        let kind = kind.into();
        Token {
            id,
            text: kind.clone(),
            kind,
            position,
        }
    }

    /// A token marking the absence of a type.
    pub fn na(position: Position) -> Self {
        Token::new(TokenId::Na, "", position)
    }

    pub fn is_data_type(&self, kind: &str) -> bool {
        self.id == TokenId::DataType && self.kind == kind
    }

    pub fn is_operator(&self, kind: &str) -> bool {
        self.id == TokenId::Operator && self.kind == kind
    }
}
