//! Type resolution and compatibility rules.
//!
//! Compatibility is decided on canonical text, so a reference and the type it
//! refers to are interchangeable here.

use crate::{
    ast::types::{Generic, Primitive, Type, TypeKind},
    lexer::tokens::TokenId,
};

use super::data::Data;

/// Returns the kind a declared type stands for; `None` is void.
///
/// Resolved nodes keep their kind. Unresolved nodes are classified by their
/// token: a data-type keyword is a primitive, an identifier a named type.
pub fn resolve_type(ty: &Type) -> Option<TypeKind> {
    if let Some(kind) = &ty.kind {
        return Some(kind.clone());
    }
    match ty.token.id {
        TokenId::DataType => Primitive::from_keyword(&ty.token.kind).map(TypeKind::Primitive),
        TokenId::Identifier => Some(TypeKind::Named(ty.token.kind.clone())),
        _ => None,
    }
}

/// Reports whether a constant of primitive `from` can take on type `to`.
pub fn constant_fits(from: Primitive, to: Primitive) -> bool {
    (from.is_integer() && to.is_numeric()) || (from.is_float() && to.is_float())
}

/// Reports whether `data` can be stored where `expected` is required.
///
/// `generics` are the type parameters in scope; a parameter accepts any
/// value.
pub fn assignable(expected: &TypeKind, data: &Data, generics: &[Generic]) -> bool {
    if data.is_void() {
        return false;
    }
    if data.is_nil() {
        return expected.is_reference() || expected.as_primitive() == Some(Primitive::Any);
    }
    if expected.as_primitive() == Some(Primitive::Any) {
        return true;
    }
    if let TypeKind::Named(ident) = expected {
        if generics.iter().any(|generic| &generic.ident == ident) {
            return true;
        }
    }

    let Some(kind) = data.type_kind() else {
        return false;
    };
    if kind.as_text() == expected.as_text() {
        return true;
    }

    match (data.is_constant(), kind.as_primitive(), expected.as_primitive()) {
        (true, Some(from), Some(to)) => constant_fits(from, to),
        _ => false,
    }
}

/// Finds the common kind of two binary operands.
///
/// Equal texts agree; otherwise a constant numeric operand adopts the type of
/// the other operand.
pub fn unify(left: &Data, right: &Data) -> Option<TypeKind> {
    let left_kind = left.type_kind()?;
    let right_kind = right.type_kind()?;

    if left_kind.as_text() == right_kind.as_text() {
        return Some(left_kind.clone());
    }

    let (left_prim, right_prim) = (left_kind.as_primitive()?, right_kind.as_primitive()?);
    if left.is_constant() && constant_fits(left_prim, right_prim) {
        return Some(right_kind.clone());
    }
    if right.is_constant() && constant_fits(right_prim, left_prim) {
        return Some(left_kind.clone());
    }
    None
}
