use crate::lexer::tokens::Token;

use super::statements::FnDecl;

/// Data of a top-level AST node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Comment(Comment),
    Directive(Directive),
    Fn(FnDecl),
}

/// AST Node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub token: Token,
    pub data: NodeData,
}

impl Node {
    pub fn fn_decl(decl: FnDecl) -> Self {
        Node {
            token: decl.token.clone(),
            data: NodeData::Fn(decl),
        }
    }
}

/// Group for AST model of comments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommentGroup {
    pub comments: Vec<Comment>,
}

/// AST model of just comment lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub token: Token,
    pub text: String,
}

/// Directive AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub token: Token,
    pub tag: String,
}
