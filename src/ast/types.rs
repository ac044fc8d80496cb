//! Type model of the AST.
//!
//! A [`Type`] node starts out *unresolved*: it only carries the token it was
//! written with, and the primitive predicates (`is_i32`, `is_bool`, ...)
//! classify it by that token. Once a [`TypeKind`] is attached the node is
//! *resolved* and those predicates all report false; callers inspect the
//! attached kind instead.
//!
//! The canonical text form (`as_text`) is what types are compared by.
//! References render exactly like the type they refer to.

use std::fmt::Display;

use crate::{
    lexer::tokens::{
        Token, TokenId, KND_ANY, KND_BOOL, KND_F32, KND_F64, KND_I16, KND_I32, KND_I64, KND_I8,
        KND_INT, KND_STR, KND_U16, KND_U32, KND_U64, KND_U8, KND_UINT, KND_UINTPTR,
    },
    Position,
};

/// Built-in data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Int,
    Uint,
    Uintptr,
    Bool,
    Str,
    Any,
}

impl Primitive {
    pub const ALL: [Primitive; 16] = [
        Primitive::I8,
        Primitive::I16,
        Primitive::I32,
        Primitive::I64,
        Primitive::U8,
        Primitive::U16,
        Primitive::U32,
        Primitive::U64,
        Primitive::F32,
        Primitive::F64,
        Primitive::Int,
        Primitive::Uint,
        Primitive::Uintptr,
        Primitive::Bool,
        Primitive::Str,
        Primitive::Any,
    ];

    /// The data-type keyword naming this primitive.
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::I8 => KND_I8,
            Primitive::I16 => KND_I16,
            Primitive::I32 => KND_I32,
            Primitive::I64 => KND_I64,
            Primitive::U8 => KND_U8,
            Primitive::U16 => KND_U16,
            Primitive::U32 => KND_U32,
            Primitive::U64 => KND_U64,
            Primitive::F32 => KND_F32,
            Primitive::F64 => KND_F64,
            Primitive::Int => KND_INT,
            Primitive::Uint => KND_UINT,
            Primitive::Uintptr => KND_UINTPTR,
            Primitive::Bool => KND_BOOL,
            Primitive::Str => KND_STR,
            Primitive::Any => KND_ANY,
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Primitive> {
        Primitive::ALL.into_iter().find(|prim| prim.as_str() == keyword)
    }

    pub fn is_signed_integer(&self) -> bool {
        matches!(
            self,
            Primitive::I8 | Primitive::I16 | Primitive::I32 | Primitive::I64 | Primitive::Int
        )
    }

    pub fn is_unsigned_integer(&self) -> bool {
        matches!(
            self,
            Primitive::U8
                | Primitive::U16
                | Primitive::U32
                | Primitive::U64
                | Primitive::Uint
                | Primitive::Uintptr
        )
    }

    pub fn is_integer(&self) -> bool {
        self.is_signed_integer() || self.is_unsigned_integer()
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Primitive::F32 | Primitive::F64)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a type is, once known.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Primitive(Primitive),
    /// A user-declared type, by identifier.
    Named(String),
    Reference(Box<Type>),
    /// Result of a function returning several values.
    MultiReturn(Vec<Type>),
}

impl TypeKind {
    /// Returns the canonical text form of the kind.
    pub fn as_text(&self) -> String {
        match self {
            TypeKind::Primitive(prim) => prim.as_str().to_string(),
            TypeKind::Named(ident) => ident.clone(),
            TypeKind::Reference(elem) => elem.as_text(),
            TypeKind::MultiReturn(types) => {
                let texts: Vec<String> = types.iter().map(Type::as_text).collect();
                format!("({})", texts.join(","))
            }
        }
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            TypeKind::Primitive(prim) => Some(*prim),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, TypeKind::Reference(_))
    }

    /// The referenced type of a reference kind.
    pub fn elem(&self) -> Option<&Type> {
        match self {
            TypeKind::Reference(elem) => Some(elem),
            _ => None,
        }
    }
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// Type AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub token: Token,
    pub kind: Option<TypeKind>,
}

impl Type {
    /// An unresolved type written as `token`.
    pub fn new(token: Token) -> Self {
        Type { token, kind: None }
    }

    /// The absent type.
    pub fn void(position: Position) -> Self {
        Type::new(Token::na(position))
    }

    /// A resolved type that was not written in the source.
    pub fn from_kind(kind: TypeKind) -> Self {
        Type {
            token: Token::na(Position::null()),
            kind: Some(kind),
        }
    }

    pub fn prim(prim: Primitive) -> Self {
        Type::from_kind(TypeKind::Primitive(prim))
    }

    /// Attaches a kind, moving the node to the resolved state.
    pub fn attach(&mut self, kind: TypeKind) {
        self.kind = Some(kind);
    }

    pub fn is_resolved(&self) -> bool {
        self.kind.is_some()
    }

    fn is_primitive(&self, kind: &str) -> bool {
        if self.kind.is_some() {
            return false;
        }
        self.token.is_data_type(kind)
    }

    pub fn is_i8(&self) -> bool {
        self.is_primitive(KND_I8)
    }
    pub fn is_i16(&self) -> bool {
        self.is_primitive(KND_I16)
    }
    pub fn is_i32(&self) -> bool {
        self.is_primitive(KND_I32)
    }
    pub fn is_i64(&self) -> bool {
        self.is_primitive(KND_I64)
    }
    pub fn is_u8(&self) -> bool {
        self.is_primitive(KND_U8)
    }
    pub fn is_u16(&self) -> bool {
        self.is_primitive(KND_U16)
    }
    pub fn is_u32(&self) -> bool {
        self.is_primitive(KND_U32)
    }
    pub fn is_u64(&self) -> bool {
        self.is_primitive(KND_U64)
    }
    pub fn is_f32(&self) -> bool {
        self.is_primitive(KND_F32)
    }
    pub fn is_f64(&self) -> bool {
        self.is_primitive(KND_F64)
    }
    pub fn is_int(&self) -> bool {
        self.is_primitive(KND_INT)
    }
    pub fn is_uint(&self) -> bool {
        self.is_primitive(KND_UINT)
    }
    pub fn is_uintptr(&self) -> bool {
        self.is_primitive(KND_UINTPTR)
    }
    pub fn is_bool(&self) -> bool {
        self.is_primitive(KND_BOOL)
    }
    pub fn is_str(&self) -> bool {
        self.is_primitive(KND_STR)
    }
    pub fn is_any(&self) -> bool {
        self.is_primitive(KND_ANY)
    }

    pub fn is_void(&self) -> bool {
        self.kind.is_none() && self.token.id == TokenId::Na
    }

    /// Returns the type kind as text; empty when no kind is attached.
    pub fn as_text(&self) -> String {
        match &self.kind {
            Some(kind) => kind.as_text(),
            None => String::new(),
        }
    }
}

/// Return type AST.
///
/// `idents` names the values of a multi-value return, in which case `kind`
/// carries a [`TypeKind::MultiReturn`].
#[derive(Debug, Clone, PartialEq)]
pub struct RetType {
    pub kind: Type,
    pub idents: Vec<Token>,
}

impl RetType {
    pub fn void(position: Position) -> Self {
        RetType {
            kind: Type::void(position),
            idents: vec![],
        }
    }

    pub fn single(kind: Type) -> Self {
        RetType { kind, idents: vec![] }
    }

    pub fn is_void(&self) -> bool {
        self.kind.is_void()
    }
}

/// Generic type parameter AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Generic {
    pub token: Token,
    pub ident: String,
}
