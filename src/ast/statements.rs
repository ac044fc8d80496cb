use crate::lexer::tokens::Token;

use super::{
    ast::{CommentGroup, Directive},
    expressions::Expr,
    types::{Generic, RetType, Type},
};

/// Scope AST.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scope {
    pub is_unsafe: bool,
    pub is_deferred: bool,
    pub tree: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    VarDecl(VarDecl),
    Assign(Assign),
    Ret(Ret),
    Scope(Scope),
}

/// Variable or constant declaration.
///
/// A missing `data_type` means the type is inferred from `expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub token: Token,
    pub ident: String,
    pub is_const: bool,
    pub is_mut: bool,
    pub data_type: Option<Type>,
    pub expr: Option<Expr>,
}

/// `left op right`, where `op` is `=` or a compound assignment operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub left: Expr,
    pub op: Token,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ret {
    pub token: Token,
    pub expr: Option<Expr>,
}

/// Param AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub token: Token,
    pub is_mut: bool,
    pub is_variadic: bool,
    pub data_type: Type,
    pub ident: String,
}

/// Function declaration AST.
///
/// `scope` is `None` for a declaration without a body.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub token: Token,
    pub is_unsafe: bool,
    pub is_pub: bool,
    pub ident: String,
    pub directives: Vec<Directive>,
    pub doc_comments: Option<CommentGroup>,
    pub scope: Option<Scope>,
    pub generics: Vec<Generic>,
    pub ret_type: RetType,
    pub params: Vec<Param>,
}

impl FnDecl {
    /// A safe, private function with a void return type and no parameters.
    pub fn new(token: Token, scope: Option<Scope>) -> Self {
        FnDecl {
            ident: token.kind.clone(),
            ret_type: RetType::void(token.position.clone()),
            token,
            is_unsafe: false,
            is_pub: false,
            directives: vec![],
            doc_comments: None,
            scope,
            generics: vec![],
            params: vec![],
        }
    }

    pub fn is_variadic(&self) -> bool {
        self.params.last().is_some_and(|param| param.is_variadic)
    }
}
