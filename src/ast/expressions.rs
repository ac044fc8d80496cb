use crate::{
    lexer::{
        literals,
        tokens::{Token, TokenId},
    },
    Position,
};

use super::{statements::FnDecl, types::Type};

/// Expression AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub token: Token,
    pub kind: ExprKind,
}

/// Every expression form the evaluator dispatches on.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Lit(LitExpr),
    Ident(IdentExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
    Index(IndexExpr),
    Cast(CastExpr),
    Tuple(TupleExpr),
    /// Anonymous function literal.
    Fn(Box<FnDecl>),
}

/// Literal expression; `value` is the lexeme as written.
#[derive(Debug, Clone, PartialEq)]
pub struct LitExpr {
    pub token: Token,
    pub value: String,
}

impl LitExpr {
    pub fn is_nil(&self) -> bool {
        literals::is_nil(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdentExpr {
    pub token: Token,
    pub ident: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: Token,
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub expr: Box<Expr>,
    pub index: Box<Expr>,
}

/// `(T)expr`
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    pub data_type: Type,
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleExpr {
    pub exprs: Vec<Expr>,
}

impl Expr {
    pub fn position(&self) -> &Position {
        &self.token.position
    }

    /// Builds the single-token expression for a literal or identifier token.
    pub fn from_token(token: Token) -> Self {
        match token.id {
            TokenId::Identifier => Expr::ident(token),
            _ => Expr::lit(token),
        }
    }

    pub fn lit(token: Token) -> Self {
        Expr {
            kind: ExprKind::Lit(LitExpr {
                value: token.kind.clone(),
                token: token.clone(),
            }),
            token,
        }
    }

    pub fn ident(token: Token) -> Self {
        Expr {
            kind: ExprKind::Ident(IdentExpr {
                ident: token.kind.clone(),
                token: token.clone(),
            }),
            token,
        }
    }

    pub fn unary(op: Token, expr: Expr) -> Self {
        Expr {
            token: op.clone(),
            kind: ExprKind::Unary(UnaryExpr {
                op,
                expr: Box::new(expr),
            }),
        }
    }

    pub fn binary(left: Expr, op: Token, right: Expr) -> Self {
        Expr {
            token: op.clone(),
            kind: ExprKind::Binary(BinaryExpr {
                left: Box::new(left),
                op,
                right: Box::new(right),
            }),
        }
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr {
            token: callee.token.clone(),
            kind: ExprKind::Call(CallExpr {
                callee: Box::new(callee),
                args,
            }),
        }
    }

    pub fn index(expr: Expr, index: Expr) -> Self {
        Expr {
            token: expr.token.clone(),
            kind: ExprKind::Index(IndexExpr {
                expr: Box::new(expr),
                index: Box::new(index),
            }),
        }
    }

    pub fn cast(data_type: Type, expr: Expr) -> Self {
        Expr {
            token: data_type.token.clone(),
            kind: ExprKind::Cast(CastExpr {
                data_type,
                expr: Box::new(expr),
            }),
        }
    }

    pub fn tuple(token: Token, exprs: Vec<Expr>) -> Self {
        Expr {
            token,
            kind: ExprKind::Tuple(TupleExpr { exprs }),
        }
    }
}
