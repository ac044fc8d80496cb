use tracing::trace;

use crate::{
    ast::{
        expressions::{
            BinaryExpr, CallExpr, CastExpr, Expr, ExprKind, IdentExpr, IndexExpr, LitExpr,
            TupleExpr, UnaryExpr,
        },
        statements::FnDecl,
        types::{Primitive, Type, TypeKind},
    },
    errors::errors::{Error, ErrorKind},
    lexer::{literals, tokens::Token},
    Position,
};

use super::{
    data::Data,
    lookup::{Lookup, Symbol},
    stack::ensure_sufficient_stack,
    types::{assignable, resolve_type, unify},
};

const ARITHMETIC_OPERATORS: [&str; 5] = ["+", "-", "*", "/", "%"];
const BITWISE_OPERATORS: [&str; 3] = ["&", "|", "^"];
const SHIFT_OPERATORS: [&str; 2] = ["<<", ">>"];
const EQUALITY_OPERATORS: [&str; 2] = ["==", "!="];
const ORDER_OPERATORS: [&str; 4] = ["<", ">", "<=", ">="];
const LOGICAL_OPERATORS: [&str; 2] = ["&&", "||"];

pub fn is_binary_operator(operator: &str) -> bool {
    [
        &ARITHMETIC_OPERATORS[..],
        &BITWISE_OPERATORS[..],
        &SHIFT_OPERATORS[..],
        &EQUALITY_OPERATORS[..],
        &ORDER_OPERATORS[..],
        &LOGICAL_OPERATORS[..],
    ]
    .iter()
    .any(|operators| operators.contains(&operator))
}

/// Evaluates `expr` against `lookup`. See [`Eval::evaluate`].
pub fn evaluate(lookup: &dyn Lookup, expr: &Expr) -> Result<Data, Error> {
    Eval::new(lookup).evaluate(expr)
}

/// Expression evaluator.
///
/// Holds a shared borrow of the scope it resolves names in, so the scope
/// cannot change while an evaluation is in flight.
pub struct Eval<'a> {
    lookup: &'a dyn Lookup,
}

impl<'a> Eval<'a> {
    pub fn new(lookup: &'a dyn Lookup) -> Self {
        Eval { lookup }
    }

    /// Reports whether evaluation happens inside an unsafe scope.
    pub fn is_unsafe(&self) -> bool {
        self.lookup.is_unsafe()
    }

    /// Maps one expression to its value data.
    ///
    /// Sub-expressions are evaluated depth first, left to right. The first
    /// failure aborts the whole expression.
    #[tracing::instrument(level = "trace", skip_all, fields(at = %expr.token.position))]
    pub fn evaluate(&self, expr: &Expr) -> Result<Data, Error> {
        let data = ensure_sufficient_stack(|| self.eval_expr(expr))?;
        trace!(kind = %data, constant = data.is_constant(), lvalue = data.lvalue(), "evaluated");
        Ok(data)
    }

    fn eval_expr(&self, expr: &Expr) -> Result<Data, Error> {
        match &expr.kind {
            ExprKind::Lit(lit) => self.eval_lit(lit),
            ExprKind::Ident(ident) => self.eval_ident(ident),
            ExprKind::Unary(unary) => self.eval_unary(unary),
            ExprKind::Binary(binary) => self.eval_binary(binary),
            ExprKind::Call(call) => self.eval_call(call),
            ExprKind::Index(index) => self.eval_index(index),
            ExprKind::Cast(cast) => self.eval_cast(cast),
            ExprKind::Tuple(tuple) => self.eval_tuple(tuple),
            ExprKind::Fn(_) => Err(Error::with_detail(
                ErrorKind::NotSupported,
                expr.position().clone(),
                "anonymous functions",
            )),
        }
    }

    // Literal forms are tested in a fixed order: nil, string, bool, rune,
    // float, integer.
    fn eval_lit(&self, lit: &LitExpr) -> Result<Data, Error> {
        let value = lit.value.as_str();
        if literals::is_nil(value) {
            Ok(lit_nil())
        } else if literals::is_str(value) || literals::is_raw_str(value) {
            Ok(lit_str())
        } else if literals::is_bool(value) {
            Ok(lit_bool())
        } else if literals::is_rune(value) {
            Ok(Data::constant(TypeKind::Primitive(Primitive::I32)))
        } else if literals::is_float(value) {
            Ok(Data::constant(TypeKind::Primitive(Primitive::F64)))
        } else if literals::is_integer(value) {
            lit_integer(lit)
        } else {
            Err(Error::with_detail(
                ErrorKind::InvalidSyntax,
                lit.token.position.clone(),
                value,
            ))
        }
    }

    fn eval_ident(&self, ident: &IdentExpr) -> Result<Data, Error> {
        match self.lookup.lookup(&ident.ident) {
            Some(Symbol::Var(var)) if var.constant => Ok(Data::constant(var.kind.clone())),
            Some(Symbol::Var(var)) => Ok(Data::storage(var.kind.clone(), var.mutable)),
            Some(Symbol::Fn(_)) => Err(Error::with_detail(
                ErrorKind::NotSupported,
                ident.token.position.clone(),
                format!("function value {}", ident.ident),
            )),
            None => Err(Error::with_detail(
                ErrorKind::NameNotDefined,
                ident.token.position.clone(),
                &ident.ident,
            )),
        }
    }

    fn eval_unary(&self, unary: &UnaryExpr) -> Result<Data, Error> {
        let data = self.evaluate(&unary.expr)?;
        let fail = |kind: ErrorKind| -> Result<Data, Error> {
            Err(Error::new(kind, unary.op.position.clone()))
        };
        let prim = data.as_primitive();

        match unary.op.kind.as_str() {
            "-" => match prim {
                Some(prim)
                    if prim.is_signed_integer()
                        || prim.is_float()
                        || (data.is_constant() && prim.is_integer()) =>
                {
                    Ok(Data::computed(TypeKind::Primitive(prim), data.is_constant()))
                }
                _ => fail(ErrorKind::InvalidDataUnary),
            },
            "+" => match prim {
                Some(prim) if prim.is_numeric() => {
                    Ok(Data::computed(TypeKind::Primitive(prim), data.is_constant()))
                }
                _ => fail(ErrorKind::InvalidDataPlus),
            },
            "~" => match prim {
                Some(prim) if prim.is_integer() => {
                    Ok(Data::computed(TypeKind::Primitive(prim), data.is_constant()))
                }
                _ => fail(ErrorKind::InvalidDataTilde),
            },
            "!" => match prim {
                Some(Primitive::Bool) => Ok(Data::computed(
                    TypeKind::Primitive(Primitive::Bool),
                    data.is_constant(),
                )),
                _ => fail(ErrorKind::InvalidDataLogicalNot),
            },
            "*" => {
                let elem = data
                    .type_kind()
                    .and_then(TypeKind::elem)
                    .and_then(resolve_type);
                match elem {
                    Some(kind) => Ok(Data::storage(kind, true)),
                    None => fail(ErrorKind::InvalidDataStar),
                }
            }
            "&" => match data.type_kind() {
                Some(kind) if data.lvalue() => Ok(Data::rvalue(TypeKind::Reference(Box::new(
                    Type::from_kind(kind.clone()),
                )))),
                _ => fail(ErrorKind::InvalidDataAmper),
            },
            operator => Err(Error::with_detail(
                ErrorKind::InvalidOperator,
                unary.op.position.clone(),
                operator,
            )),
        }
    }

    fn eval_binary(&self, binary: &BinaryExpr) -> Result<Data, Error> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;
        self.binary(&left, &binary.op, &right)
    }

    /// Applies binary operator `op` to two evaluated operands.
    ///
    /// The result is constant iff both operands are, and never an lvalue.
    pub fn binary(&self, left: &Data, op: &Token, right: &Data) -> Result<Data, Error> {
        let operator = op.kind.as_str();
        let position = op.position.clone();
        let constant = left.is_constant() && right.is_constant();

        if !is_binary_operator(operator) {
            return Err(Error::with_detail(ErrorKind::InvalidOperator, position, operator));
        }
        if left.is_void() || right.is_void() {
            return Err(Error::with_detail(ErrorKind::InvalidType, position, "void"));
        }

        if LOGICAL_OPERATORS.contains(&operator) {
            let boolean = Some(Primitive::Bool);
            if left.as_primitive() != boolean || right.as_primitive() != boolean {
                return Err(Error::new(ErrorKind::LogicalNotBool, position));
            }
            return Ok(Data::computed(TypeKind::Primitive(Primitive::Bool), constant));
        }

        if left.is_nil() || right.is_nil() {
            return nil_comparison(left, op, right);
        }

        if SHIFT_OPERATORS.contains(&operator) {
            return shift(left, op, right);
        }

        let has_reference = [left, right]
            .iter()
            .any(|data| data.type_kind().is_some_and(TypeKind::is_reference));
        if has_reference
            && (ARITHMETIC_OPERATORS.contains(&operator) || BITWISE_OPERATORS.contains(&operator))
        {
            return self.pointer_arithmetic(left, operator, right, position);
        }

        let Some(kind) = unify(left, right) else {
            return Err(Error::with_detail(
                ErrorKind::IncompatibleDatatype,
                position,
                format!("{} and {}", left, right),
            ));
        };

        match operator_result(&kind, operator) {
            Ok(result) => Ok(Data::computed(result, constant)),
            Err(ErrorKind::InvalidOperator) => Err(Error::with_detail(
                ErrorKind::InvalidOperator,
                position,
                format!("{} for {}", operator, kind),
            )),
            Err(kind) => Err(Error::new(kind, position)),
        }
    }

    /// `&T + int`, `int + &T` and `&T - int`, all gated on an unsafe scope.
    /// Any other arithmetic on a reference operand is rejected.
    fn pointer_arithmetic(
        &self,
        left: &Data,
        operator: &str,
        right: &Data,
        position: Position,
    ) -> Result<Data, Error> {
        let is_integer = |data: &Data| data.as_primitive().is_some_and(|prim| prim.is_integer());
        let reference = match (left.type_kind(), right.type_kind()) {
            (Some(kind @ TypeKind::Reference(_)), _)
                if (operator == "+" || operator == "-") && is_integer(right) =>
            {
                kind
            }
            (_, Some(kind @ TypeKind::Reference(_))) if operator == "+" && is_integer(left) => kind,
            _ => {
                return Err(Error::with_detail(
                    ErrorKind::OperatorNotForPointer,
                    position,
                    operator,
                ))
            }
        };

        if !self.is_unsafe() {
            return Err(Error::with_detail(
                ErrorKind::UnsafeBehaviorOutOfUnsafeScope,
                position,
                "pointer arithmetic",
            ));
        }
        Ok(Data::rvalue(reference.clone()))
    }

    fn eval_call(&self, call: &CallExpr) -> Result<Data, Error> {
        let decl: &FnDecl = match &call.callee.kind {
            ExprKind::Ident(ident) => match self.lookup.lookup(&ident.ident) {
                Some(Symbol::Fn(decl)) => &**decl,
                Some(Symbol::Var(_)) => {
                    return Err(Error::with_detail(
                        ErrorKind::NotFunctionCall,
                        ident.token.position.clone(),
                        &ident.ident,
                    ))
                }
                None => {
                    return Err(Error::with_detail(
                        ErrorKind::NameNotDefined,
                        ident.token.position.clone(),
                        &ident.ident,
                    ))
                }
            },
            _ => {
                self.evaluate(&call.callee)?;
                return Err(Error::new(
                    ErrorKind::NotFunctionCall,
                    call.callee.position().clone(),
                ));
            }
        };

        if decl.is_unsafe && !self.is_unsafe() {
            return Err(Error::with_detail(
                ErrorKind::UnsafeBehaviorOutOfUnsafeScope,
                call.callee.position().clone(),
                format!("call of unsafe function {}", decl.ident),
            ));
        }

        let args = call
            .args
            .iter()
            .map(|arg| self.evaluate(arg))
            .collect::<Result<Vec<_>, _>>()?;
        self.check_args(decl, call, &args)?;

        Ok(match resolve_type(&decl.ret_type.kind) {
            Some(kind) => Data::rvalue(kind),
            None => Data::void(),
        })
    }

    // The variadic last parameter absorbs every remaining argument.
    fn check_args(&self, decl: &FnDecl, call: &CallExpr, args: &[Data]) -> Result<(), Error> {
        let required = match decl.is_variadic() {
            true => decl.params.len() - 1,
            false => decl.params.len(),
        };

        if args.len() < required {
            let missing: Vec<&str> = decl.params[args.len()..required]
                .iter()
                .map(|param| param.ident.as_str())
                .collect();
            return Err(Error::with_detail(
                ErrorKind::MissingArgument,
                call.callee.position().clone(),
                missing.join(", "),
            ));
        }
        if !decl.is_variadic() && args.len() > decl.params.len() {
            return Err(Error::new(
                ErrorKind::ArgumentOverflow,
                call.args[decl.params.len()].position().clone(),
            ));
        }

        for (index, (arg, data)) in call.args.iter().zip(args).enumerate() {
            let Some(param) = decl.params.get(index).or_else(|| decl.params.last()) else {
                break;
            };
            let Some(expected) = resolve_type(&param.data_type) else {
                return Err(Error::with_detail(
                    ErrorKind::InvalidType,
                    param.token.position.clone(),
                    "void",
                ));
            };
            if !assignable(&expected, data, &decl.generics) {
                return Err(Error::with_detail(
                    ErrorKind::IncompatibleType,
                    arg.position().clone(),
                    format!("{} and {}", expected, data),
                ));
            }
        }
        Ok(())
    }

    fn eval_index(&self, index: &IndexExpr) -> Result<Data, Error> {
        let data = self.evaluate(&index.expr)?;
        let selector = self.evaluate(&index.index)?;

        if data.as_primitive() != Some(Primitive::Str) {
            return Err(Error::with_detail(
                ErrorKind::NotSupportsIndexing,
                index.expr.position().clone(),
                data.as_text(),
            ));
        }
        if !selector.as_primitive().is_some_and(|prim| prim.is_integer()) {
            return Err(Error::with_detail(
                ErrorKind::InvalidType,
                index.index.position().clone(),
                selector.as_text(),
            ));
        }
        Ok(Data::computed(
            TypeKind::Primitive(Primitive::U8),
            data.is_constant() && selector.is_constant(),
        ))
    }

    fn eval_cast(&self, cast: &CastExpr) -> Result<Data, Error> {
        let position = cast.data_type.token.position.clone();
        let Some(target) = resolve_type(&cast.data_type) else {
            return Err(Error::with_detail(ErrorKind::InvalidType, position, "void"));
        };
        let data = self.evaluate(&cast.expr)?;
        if data.is_void() {
            return Err(Error::with_detail(
                ErrorKind::InvalidType,
                cast.expr.position().clone(),
                "void",
            ));
        }

        let conversion = match data.type_kind() {
            Some(source) => classify_cast(source, &target),
            None if target.is_reference() || target.as_primitive() == Some(Primitive::Any) => {
                Conversion::Safe
            }
            None => Conversion::Invalid,
        };

        match conversion {
            Conversion::Invalid => Err(Error::with_detail(
                ErrorKind::TypeNotSupportsCasting,
                position,
                target.as_text(),
            )),
            Conversion::Unsafe if !self.is_unsafe() => Err(Error::with_detail(
                ErrorKind::UnsafeBehaviorOutOfUnsafeScope,
                position,
                format!("casting {} to {}", data, target),
            )),
            Conversion::Safe | Conversion::Unsafe => {
                let constant = data.is_constant()
                    && target
                        .as_primitive()
                        .is_some_and(|prim| prim != Primitive::Any);
                Ok(Data::computed(target, constant))
            }
        }
    }

    fn eval_tuple(&self, tuple: &TupleExpr) -> Result<Data, Error> {
        let mut types = Vec::with_capacity(tuple.exprs.len());
        for expr in &tuple.exprs {
            let data = self.evaluate(expr)?;
            match data.type_kind() {
                Some(kind) => types.push(Type::from_kind(kind.clone())),
                None => {
                    return Err(Error::with_detail(
                        ErrorKind::InvalidType,
                        expr.position().clone(),
                        data.as_text(),
                    ))
                }
            }
        }
        Ok(Data::rvalue(TypeKind::MultiReturn(types)))
    }
}

fn lit_nil() -> Data {
    Data::nil()
}

fn lit_str() -> Data {
    Data::constant(TypeKind::Primitive(Primitive::Str))
}

fn lit_bool() -> Data {
    Data::constant(TypeKind::Primitive(Primitive::Bool))
}

// `int` when the value fits, `u64` when only the unsigned range holds it.
fn lit_integer(lit: &LitExpr) -> Result<Data, Error> {
    match literals::parse_integer(&lit.value) {
        Some(value) if value <= i64::MAX as u64 => {
            Ok(Data::constant(TypeKind::Primitive(Primitive::Int)))
        }
        Some(_) => Ok(Data::constant(TypeKind::Primitive(Primitive::U64))),
        None => Err(Error::with_detail(
            ErrorKind::InvalidNumericRange,
            lit.token.position.clone(),
            &lit.value,
        )),
    }
}

fn nil_comparison(left: &Data, op: &Token, right: &Data) -> Result<Data, Error> {
    if !EQUALITY_OPERATORS.contains(&op.kind.as_str()) {
        return Err(Error::new(ErrorKind::OperatorNotForNull, op.position.clone()));
    }

    let other = if left.is_nil() { right } else { left };
    let comparable = match other.type_kind() {
        None => true,
        Some(kind) => kind.is_reference() || kind.as_primitive() == Some(Primitive::Any),
    };
    if !comparable {
        return Err(Error::with_detail(
            ErrorKind::IncompatibleDatatype,
            op.position.clone(),
            format!("{} and {}", left, right),
        ));
    }
    Ok(Data::computed(
        TypeKind::Primitive(Primitive::Bool),
        left.is_constant() && right.is_constant(),
    ))
}

fn shift(left: &Data, op: &Token, right: &Data) -> Result<Data, Error> {
    let Some(prim) = left.as_primitive().filter(Primitive::is_integer) else {
        return Err(Error::new(operator_not_for(left), op.position.clone()));
    };
    let unsigned = right
        .as_primitive()
        .is_some_and(|rhs| rhs.is_unsigned_integer() || (right.is_constant() && rhs.is_integer()));
    if !unsigned {
        return Err(Error::new(ErrorKind::BitshiftMustUnsigned, op.position.clone()));
    }
    Ok(Data::computed(
        TypeKind::Primitive(prim),
        left.is_constant() && right.is_constant(),
    ))
}

/// The error kind for an operator the operand's family does not define.
fn operator_not_for(data: &Data) -> ErrorKind {
    match data.type_kind() {
        None => ErrorKind::OperatorNotForNull,
        Some(TypeKind::Reference(_)) => ErrorKind::OperatorNotForPointer,
        Some(TypeKind::Named(_)) => ErrorKind::InvalidOperator,
        Some(TypeKind::MultiReturn(_)) => ErrorKind::InvalidType,
        Some(TypeKind::Primitive(prim)) => primitive_operator_error(*prim),
    }
}

fn primitive_operator_error(prim: Primitive) -> ErrorKind {
    match prim {
        Primitive::Str => ErrorKind::OperatorNotForString,
        Primitive::Bool => ErrorKind::OperatorNotForBool,
        Primitive::Any => ErrorKind::OperatorNotForAny,
        prim if prim.is_float() => ErrorKind::OperatorNotForFloat,
        prim if prim.is_signed_integer() => ErrorKind::OperatorNotForInt,
        _ => ErrorKind::OperatorNotForUint,
    }
}

/// Result kind of `operator` applied to two operands of `kind`.
fn operator_result(kind: &TypeKind, operator: &str) -> Result<TypeKind, ErrorKind> {
    let boolean = TypeKind::Primitive(Primitive::Bool);
    if let TypeKind::MultiReturn(_) = kind {
        return Err(ErrorKind::InvalidType);
    }
    if EQUALITY_OPERATORS.contains(&operator) {
        return Ok(boolean);
    }

    let TypeKind::Primitive(prim) = kind else {
        return Err(match kind {
            TypeKind::Reference(_) => ErrorKind::OperatorNotForPointer,
            _ => ErrorKind::InvalidOperator,
        });
    };
    let prim = *prim;

    let arithmetic = ARITHMETIC_OPERATORS.contains(&operator);
    let defined = match prim {
        Primitive::Str => operator == "+",
        Primitive::Bool | Primitive::Any => false,
        prim if prim.is_float() => {
            if ORDER_OPERATORS.contains(&operator) {
                return Ok(boolean);
            }
            arithmetic && operator != "%"
        }
        _ => {
            if ORDER_OPERATORS.contains(&operator) {
                return Ok(boolean);
            }
            arithmetic || BITWISE_OPERATORS.contains(&operator)
        }
    };

    match defined {
        true => Ok(kind.clone()),
        false => Err(primitive_operator_error(prim)),
    }
}

/// How a conversion between two kinds is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Safe,
    Unsafe,
    Invalid,
}

fn classify_cast(source: &TypeKind, target: &TypeKind) -> Conversion {
    if source.as_text() == target.as_text() {
        return Conversion::Safe;
    }

    let pointer_like =
        |kind: &TypeKind| kind.is_reference() || kind.as_primitive() == Some(Primitive::Uintptr);
    if pointer_like(source) && pointer_like(target) {
        return Conversion::Unsafe;
    }

    match (source.as_primitive(), target.as_primitive()) {
        (Some(Primitive::Any), _) | (_, Some(Primitive::Any)) => Conversion::Safe,
        (Some(from), Some(to)) if from.is_numeric() && to.is_numeric() => Conversion::Safe,
        (Some(Primitive::U8 | Primitive::I32), Some(Primitive::Str)) => Conversion::Safe,
        _ => Conversion::Invalid,
    }
}
