//! Symbol lookup over a chain of scopes.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{statements::FnDecl, types::TypeKind},
    errors::errors::{Error, ErrorKind},
    lexer::tokens::Token,
};

#[derive(Debug, Clone, PartialEq)]
pub struct VarSymbol {
    pub token: Token,
    pub kind: TypeKind,
    pub mutable: bool,
    pub constant: bool,
}

/// What a name is declared as.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Var(VarSymbol),
    Fn(Rc<FnDecl>),
}

impl Symbol {
    pub fn token(&self) -> &Token {
        match self {
            Symbol::Var(var) => &var.token,
            Symbol::Fn(decl) => &decl.token,
        }
    }
}

/// The query side of a symbol table, as seen by the evaluator.
pub trait Lookup {
    /// Returns the symbol a name refers to from the current scope.
    fn lookup(&self, ident: &str) -> Option<&Symbol>;
    /// Reports whether the current scope is inside an unsafe scope.
    fn is_unsafe(&self) -> bool;
}

/// One frame of the scope chain.
#[derive(Debug, Default)]
pub struct Environment {
    pub symbols: HashMap<String, Symbol>,
    pub is_unsafe: bool,
}

impl Environment {
    pub fn new(is_unsafe: bool) -> Self {
        Environment {
            symbols: HashMap::new(),
            is_unsafe,
        }
    }

    pub fn declare(&mut self, ident: &str, symbol: Symbol) -> Result<(), Error> {
        if self.symbols.contains_key(ident) {
            return Err(Error::with_detail(
                ErrorKind::ExistName,
                symbol.token().position.clone(),
                ident,
            ));
        }
        self.symbols.insert(ident.to_string(), symbol);
        Ok(())
    }

    pub fn get(&self, ident: &str) -> Option<&Symbol> {
        self.symbols.get(ident)
    }
}

/// Stack of environments, innermost last. Starts with one safe global frame.
#[derive(Debug)]
pub struct ScopeChain {
    environments: Vec<Environment>,
}

impl Default for ScopeChain {
    fn default() -> Self {
        ScopeChain::new()
    }
}

impl ScopeChain {
    pub fn new() -> Self {
        ScopeChain {
            environments: vec![Environment::new(false)],
        }
    }

    pub fn push(&mut self, is_unsafe: bool) {
        self.environments.push(Environment::new(is_unsafe));
    }

    /// Drops the innermost frame. The global frame is never dropped.
    pub fn pop(&mut self) {
        if self.environments.len() > 1 {
            self.environments.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.environments.len()
    }

    /// Declares a name in the innermost frame.
    pub fn declare(&mut self, ident: &str, symbol: Symbol) -> Result<(), Error> {
        match self.environments.last_mut() {
            Some(environment) => environment.declare(ident, symbol),
            None => Err(Error::with_detail(
                ErrorKind::NotSupported,
                symbol.token().position.clone(),
                "declaration outside of any scope",
            )),
        }
    }

    pub fn global(&self) -> Option<&Environment> {
        self.environments.first()
    }
}

impl Lookup for ScopeChain {
    fn lookup(&self, ident: &str) -> Option<&Symbol> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get(ident))
    }

    fn is_unsafe(&self) -> bool {
        self.environments.iter().any(|environment| environment.is_unsafe)
    }
}
