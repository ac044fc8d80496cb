use std::fmt::Display;

use crate::ast::types::{Primitive, TypeKind};

/// Kind of an evaluated value. Holding no type kind means `void`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataKind {
    kind: Option<TypeKind>,
}

impl DataKind {
    pub fn new(kind: TypeKind) -> Self {
        DataKind { kind: Some(kind) }
    }

    pub fn prim(prim: Primitive) -> Self {
        DataKind::new(TypeKind::Primitive(prim))
    }

    pub fn void() -> Self {
        DataKind { kind: None }
    }

    pub fn kind(&self) -> Option<&TypeKind> {
        self.kind.as_ref()
    }

    pub fn is_void(&self) -> bool {
        self.kind.is_none()
    }

    pub fn as_text(&self) -> String {
        match &self.kind {
            Some(kind) => kind.as_text(),
            None => String::from("void"),
        }
    }
}

/// Value data: the type and attributes of one evaluated expression.
///
/// A missing kind is the `nil` literal, which is distinct from `void`.
/// Constants are never mutable and never lvalues; the constructors are the
/// only way to build a `Data`, so that holds for every value.
#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    kind: Option<DataKind>,
    mutable: bool,
    lvalue: bool,
    constant: bool,
}

impl Data {
    /// The `nil` literal.
    pub fn nil() -> Self {
        Data {
            kind: None,
            mutable: false,
            lvalue: false,
            constant: true,
        }
    }

    /// Absence of a value, e.g. the result of calling a void function.
    pub fn void() -> Self {
        Data {
            kind: Some(DataKind::void()),
            mutable: false,
            lvalue: false,
            constant: false,
        }
    }

    /// A compile-time constant.
    pub fn constant(kind: TypeKind) -> Self {
        Data {
            kind: Some(DataKind::new(kind)),
            mutable: false,
            lvalue: false,
            constant: true,
        }
    }

    /// A temporary value that is neither constant nor assignable.
    pub fn rvalue(kind: TypeKind) -> Self {
        Data {
            kind: Some(DataKind::new(kind)),
            mutable: false,
            lvalue: false,
            constant: false,
        }
    }

    /// A storage location.
    pub fn storage(kind: TypeKind, mutable: bool) -> Self {
        Data {
            kind: Some(DataKind::new(kind)),
            mutable,
            lvalue: true,
            constant: false,
        }
    }

    /// A constant when `constant` holds, an rvalue otherwise.
    pub fn computed(kind: TypeKind, constant: bool) -> Self {
        if constant {
            Data::constant(kind)
        } else {
            Data::rvalue(kind)
        }
    }

    /// Reports whether Data is the nil literal.
    pub fn is_nil(&self) -> bool {
        self.kind.is_none()
    }

    /// Reports whether Data is void.
    pub fn is_void(&self) -> bool {
        self.kind.as_ref().is_some_and(DataKind::is_void)
    }

    pub fn kind(&self) -> Option<&DataKind> {
        self.kind.as_ref()
    }

    /// The type kind of a value that is neither nil nor void.
    pub fn type_kind(&self) -> Option<&TypeKind> {
        self.kind.as_ref().and_then(DataKind::kind)
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        self.type_kind().and_then(TypeKind::as_primitive)
    }

    pub fn mutable(&self) -> bool {
        self.mutable
    }

    pub fn lvalue(&self) -> bool {
        self.lvalue
    }

    pub fn is_constant(&self) -> bool {
        self.constant
    }

    /// Canonical text of the value's kind; `nil` and `void` name themselves.
    pub fn as_text(&self) -> String {
        match &self.kind {
            Some(kind) => kind.as_text(),
            None => String::from("nil"),
        }
    }
}

impl Display for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_text())
    }
}
