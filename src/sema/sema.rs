use std::{collections::HashSet, rc::Rc};

use tracing::debug;

use crate::{
    ast::{
        ast::{Node, NodeData},
        expressions::{Expr, ExprKind},
        statements::{Assign, FnDecl, Ret, Scope, Stmt, VarDecl},
        types::{Generic, Primitive, Type, TypeKind},
    },
    config::Context,
    errors::errors::{Error, ErrorKind},
    lexer::tokens::Token,
    Position,
};

use super::{
    data::Data,
    eval::Eval,
    lookup::{ScopeChain, Symbol, VarSymbol},
    types::{assignable, resolve_type},
};

/// Checks every function declaration of a program.
///
/// Checking continues past failures; all diagnostics are returned together.
pub fn check(tree: &[Node], ctx: &Context) -> Result<(), Vec<Error>> {
    let mut sema = Sema::new(ctx);
    sema.check_tree(tree);
    sema.into_result()
}

/// Semantic checker for declarations and statements.
pub struct Sema<'ctx> {
    ctx: &'ctx Context,
    scopes: ScopeChain,
    errors: Vec<Error>,
    current_fn: Option<Rc<FnDecl>>,
}

impl<'ctx> Sema<'ctx> {
    pub fn new(ctx: &'ctx Context) -> Self {
        Sema {
            ctx,
            scopes: ScopeChain::new(),
            errors: vec![],
            current_fn: None,
        }
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_result(self) -> Result<(), Vec<Error>> {
        match self.errors.is_empty() {
            true => Ok(()),
            false => Err(self.errors),
        }
    }

    fn push_err(&mut self, error: Error) {
        debug!(
            kind = error.get_error_name(),
            at = %error.get_position(),
            "{}",
            error
        );
        self.errors.push(error);
    }

    /// Evaluates `expr` in the current scope.
    pub fn eval(&self, expr: &Expr) -> Result<Data, Error> {
        Eval::new(&self.scopes).evaluate(expr)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
    pub fn check_tree(&mut self, tree: &[Node]) {
        let decls: Vec<Rc<FnDecl>> = tree
            .iter()
            .filter_map(|node| match &node.data {
                NodeData::Fn(decl) => Some(Rc::new(decl.clone())),
                _ => None,
            })
            .collect();

        // Declare first so calls may precede the callee.
        let mut declared = Vec::with_capacity(decls.len());
        for decl in decls {
            match self.scopes.declare(&decl.ident, Symbol::Fn(Rc::clone(&decl))) {
                Ok(()) => declared.push(decl),
                Err(error) => self.push_err(error),
            }
        }

        if !declared.iter().any(|decl| decl.ident == self.ctx.entry_point) {
            let position = tree
                .first()
                .map(|node| node.token.position.clone())
                .unwrap_or_else(Position::null);
            self.push_err(Error::new(ErrorKind::NoEntryPoint, position));
        }

        for decl in &declared {
            self.check_fn_decl(decl);
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(name = %decl.ident))]
    pub fn check_fn_decl(&mut self, decl: &Rc<FnDecl>) {
        self.check_signature(decl);

        let Some(scope) = &decl.scope else {
            self.push_err(Error::with_detail(
                ErrorKind::FunctionBodyNotExist,
                decl.token.position.clone(),
                &decl.ident,
            ));
            return;
        };

        let outer_fn = self.current_fn.replace(Rc::clone(decl));
        self.scopes.push(decl.is_unsafe);
        self.declare_params(decl);
        self.declare_named_returns(decl);

        self.check_scope(scope);
        if !decl.ret_type.is_void() && !ends_with_ret(scope) {
            self.push_err(Error::with_detail(
                ErrorKind::MissingReturn,
                decl.token.position.clone(),
                &decl.ident,
            ));
        }

        self.scopes.pop();
        self.current_fn = outer_fn;
    }

    fn check_signature(&mut self, decl: &FnDecl) {
        let mut generics = HashSet::new();
        for generic in &decl.generics {
            if !generics.insert(generic.ident.as_str()) {
                self.push_err(Error::with_detail(
                    ErrorKind::ExistName,
                    generic.token.position.clone(),
                    &generic.ident,
                ));
            }
        }

        let mut params = HashSet::new();
        for param in &decl.params {
            if !params.insert(param.ident.as_str()) {
                self.push_err(Error::with_detail(
                    ErrorKind::ParameterExist,
                    param.token.position.clone(),
                    &param.ident,
                ));
            }
        }

        if decl.ident == self.ctx.entry_point {
            if !decl.ret_type.is_void() {
                self.push_err(Error::new(
                    ErrorKind::EntryPointHaveReturn,
                    decl.token.position.clone(),
                ));
            }
            if !decl.params.is_empty() {
                self.push_err(Error::new(
                    ErrorKind::EntryPointHaveParameters,
                    decl.token.position.clone(),
                ));
            }
        }
    }

    fn declare_params(&mut self, decl: &FnDecl) {
        for param in &decl.params {
            let Some(kind) = resolve_type(&param.data_type) else {
                self.push_err(Error::with_detail(
                    ErrorKind::InvalidType,
                    param.token.position.clone(),
                    "void",
                ));
                continue;
            };
            let symbol = Symbol::Var(VarSymbol {
                token: param.token.clone(),
                kind,
                mutable: param.is_mut,
                constant: false,
            });
            // Duplicates were reported by the signature check; the first one wins.
            if let Err(error) = self.scopes.declare(&param.ident, symbol) {
                debug!(name = %param.ident, "{}", error);
            }
        }
    }

    fn declare_named_returns(&mut self, decl: &FnDecl) {
        let Some(TypeKind::MultiReturn(types)) = resolve_type(&decl.ret_type.kind) else {
            return;
        };
        for (ident, ty) in decl.ret_type.idents.iter().zip(&types) {
            let Some(kind) = resolve_type(ty) else {
                continue;
            };
            let symbol = Symbol::Var(VarSymbol {
                token: ident.clone(),
                kind,
                mutable: true,
                constant: false,
            });
            if let Err(error) = self.scopes.declare(&ident.kind, symbol) {
                self.push_err(error);
            }
        }
    }

    /// Checks a scope in a fresh frame tagged with the scope's safety.
    pub fn check_scope(&mut self, scope: &Scope) {
        self.scopes.push(scope.is_unsafe);
        for stmt in &scope.tree {
            if let Err(error) = self.check_stmt(stmt) {
                self.push_err(error);
            }
        }
        self.scopes.pop();
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::Expr(expr) => self.eval(expr).map(|_| ()),
            Stmt::VarDecl(decl) => self.check_var_decl(decl),
            Stmt::Assign(assign) => self.check_assign(assign),
            Stmt::Ret(ret) => self.check_ret(ret),
            Stmt::Scope(scope) => {
                self.check_scope(scope);
                Ok(())
            }
        }
    }

    fn check_var_decl(&mut self, decl: &VarDecl) -> Result<(), Error> {
        let position = decl.token.position.clone();
        if decl.is_const && decl.expr.is_none() {
            return Err(Error::with_detail(
                ErrorKind::MissingConstValue,
                position,
                &decl.ident,
            ));
        }

        let declared = decl.data_type.as_ref().and_then(resolve_type);
        let data = match &decl.expr {
            Some(expr) => Some(self.eval(expr)?),
            None => None,
        };

        let kind = match (declared, &data) {
            (None, None) => {
                return Err(Error::with_detail(
                    ErrorKind::MissingAutotypeValue,
                    position,
                    &decl.ident,
                ))
            }
            (None, Some(data)) if data.is_nil() => {
                return Err(Error::new(ErrorKind::NullForAutotype, position))
            }
            (None, Some(data)) => match data.type_kind() {
                Some(kind) => kind.clone(),
                None => return Err(Error::new(ErrorKind::VoidForAutotype, position)),
            },
            (Some(kind), Some(data)) => {
                if !assignable(&kind, data, &self.generics()) {
                    return Err(Error::with_detail(
                        ErrorKind::IncompatibleType,
                        position,
                        format!("{} and {}", kind, data),
                    ));
                }
                kind
            }
            (Some(kind), None) => kind,
        };

        if decl.is_const {
            if !data.as_ref().is_some_and(Data::is_constant) {
                return Err(Error::with_detail(ErrorKind::ExprNotConst, position, &decl.ident));
            }
            if !kind.as_primitive().is_some_and(|prim| prim != Primitive::Any) {
                return Err(Error::with_detail(
                    ErrorKind::InvalidConstDataType,
                    position,
                    kind.as_text(),
                ));
            }
        }

        self.scopes.declare(
            &decl.ident,
            Symbol::Var(VarSymbol {
                token: decl.token.clone(),
                kind,
                mutable: decl.is_mut && !decl.is_const,
                constant: decl.is_const,
            }),
        )
    }

    fn check_assign(&mut self, assign: &Assign) -> Result<(), Error> {
        let operator = assign.op.kind.as_str();
        let Some(binary_operator) = compound_operator(operator) else {
            return Err(Error::with_detail(
                ErrorKind::InvalidOperator,
                assign.op.position.clone(),
                operator,
            ));
        };

        let left = self.eval(&assign.left)?;
        let position = assign.left.position().clone();
        if left.is_constant() {
            return Err(Error::new(ErrorKind::ConstValueUpdate, position));
        }
        if !left.lvalue() {
            return Err(Error::new(ErrorKind::TypeNotSupportValueUpdate, position));
        }
        if !left.mutable() {
            return Err(Error::with_detail(
                ErrorKind::AssignmentToNonMut,
                position,
                storage_name(&assign.left),
            ));
        }
        let Some(expected) = left.type_kind() else {
            return Err(Error::new(ErrorKind::TypeNotSupportValueUpdate, position));
        };

        let mut right = self.eval(&assign.right)?;
        if !binary_operator.is_empty() {
            let op = Token {
                kind: binary_operator.to_string(),
                ..assign.op.clone()
            };
            right = Eval::new(&self.scopes).binary(&left, &op, &right)?;
        }

        if !assignable(expected, &right, &self.generics()) {
            return Err(Error::with_detail(
                ErrorKind::IncompatibleType,
                assign.right.position().clone(),
                format!("{} and {}", expected, right),
            ));
        }
        Ok(())
    }

    fn check_ret(&mut self, ret: &Ret) -> Result<(), Error> {
        let position = ret.token.position.clone();
        let Some(decl) = self.current_fn.clone() else {
            return Err(Error::with_detail(ErrorKind::InvalidSyntax, position, "ret"));
        };

        if decl.ret_type.is_void() {
            return match &ret.expr {
                Some(_) => Err(Error::new(ErrorKind::VoidFunctionReturnValue, position)),
                None => Ok(()),
            };
        }

        let Some(expr) = &ret.expr else {
            // A bare `ret` returns the named results.
            return match decl.ret_type.idents.is_empty() {
                true => Err(Error::new(ErrorKind::RequireReturnValue, position)),
                false => Ok(()),
            };
        };
        let Some(expected) = resolve_type(&decl.ret_type.kind) else {
            return Err(Error::new(ErrorKind::VoidFunctionReturnValue, position));
        };

        match (&expected, &expr.kind) {
            (TypeKind::MultiReturn(types), ExprKind::Tuple(tuple)) => {
                if types.len() != tuple.exprs.len() {
                    return Err(Error::with_detail(
                        ErrorKind::IncompatibleType,
                        expr.position().clone(),
                        format!("{} and {} value(s)", expected, tuple.exprs.len()),
                    ));
                }
                for (ty, expr) in types.iter().zip(&tuple.exprs) {
                    self.check_returned(ty, expr)?;
                }
                Ok(())
            }
            _ => {
                let data = self.eval(expr)?;
                if !assignable(&expected, &data, &decl.generics) {
                    return Err(Error::with_detail(
                        ErrorKind::IncompatibleType,
                        expr.position().clone(),
                        format!("{} and {}", expected, data),
                    ));
                }
                Ok(())
            }
        }
    }

    fn check_returned(&self, ty: &Type, expr: &Expr) -> Result<(), Error> {
        let data = self.eval(expr)?;
        let matches = match resolve_type(ty) {
            Some(expected) => assignable(&expected, &data, &self.generics()),
            None => false,
        };
        match matches {
            true => Ok(()),
            false => Err(Error::with_detail(
                ErrorKind::IncompatibleType,
                expr.position().clone(),
                format!("{} and {}", ty.as_text(), data),
            )),
        }
    }

    fn generics(&self) -> Vec<Generic> {
        self.current_fn
            .as_ref()
            .map(|decl| decl.generics.clone())
            .unwrap_or_default()
    }
}

/// Returns the binary operator behind an assignment operator: empty for
/// plain `=`, `None` when `operator` assigns nothing.
fn compound_operator(operator: &str) -> Option<&str> {
    if operator == "=" {
        return Some("");
    }
    match operator.strip_suffix('=') {
        Some(binary) if !matches!(binary, "=" | "!" | "<" | ">" | "") => {
            super::eval::is_binary_operator(binary).then_some(binary)
        }
        _ => None,
    }
}

fn storage_name(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Ident(ident) => ident.ident.clone(),
        _ => expr.token.kind.clone(),
    }
}

/// Reports whether control cannot fall off the end of `scope`.
fn ends_with_ret(scope: &Scope) -> bool {
    match scope.tree.last() {
        Some(Stmt::Ret(_)) => true,
        Some(Stmt::Scope(inner)) => ends_with_ret(inner),
        _ => false,
    }
}
