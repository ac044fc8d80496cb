use std::fmt::Display;

use thiserror::Error;

use crate::{Position, MK_ERROR_KINDS};

/// Broad family an error kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorGroup {
    Lexical,
    Syntactic,
    Declaration,
    Type,
    Constant,
    Internal,
}

MK_ERROR_KINDS! {
    FileNotX => "file_not_x", "this is not x source file: ", Internal;
    InvalidToken => "invalid_token", "undefined code content", Lexical;
    InvalidSyntax => "invalid_syntax", "invalid syntax", Syntactic;
    NoEntryPoint => "no_entry_point", "entry point (main) function is not defined", Declaration;
    ExistName => "exist_name", "name is already exist", Declaration;
    BraceNotClosed => "brace_not_closed", "brace is opened but not closed", Syntactic;
    FunctionBodyNotExist => "function_body_not_exist", "function body is not declared", Declaration;
    IncompatibleType => "incompatible_type", "incompatible value type", Type;
    OperatorOverflow => "operator_overflow", "operator overflow", Type;
    IncompatibleDatatype => "incompatible_datatype", "data type are not compatible", Type;
    OperatorNotForString => "operator_notfor_string", "this operator is not defined for string type", Type;
    OperatorNotForRune => "operator_notfor_rune", "this operator is not defined for rune type", Type;
    OperatorNotForNull => "operator_notfor_null", "this operator is not defined for null type", Type;
    OperatorNotForBool => "operator_notfor_bool", "this operator is not defined for boolean type", Type;
    OperatorNotForAny => "operator_notfor_any", "this operator is not defined for any type", Type;
    OperatorNotForFloat => "operator_notfor_float", "this operator is not defined for float type(s)", Type;
    OperatorNotForInt => "operator_notfor_int", "this operator is not defined for integer type(s)", Type;
    OperatorNotForUint => "operator_notfor_uint", "this operator is not defined for unsigned integer type(s)", Type;
    OperatorNotForPointer => "operator_notfor_pointer", "this operator is not defined for pointer type", Type;
    NameNotDefined => "name_not_defined", "name is not defined", Declaration;
    NotFunctionCall => "not_function_call", "value is not function", Type;
    ParameterExist => "parameter_exist", "parameter is already exist in this name", Declaration;
    ArgumentOverflow => "argument_overflow", "argument overflow", Type;
    EntryPointHaveReturn => "entrypoint_have_return", "entry point is cannot have return type", Declaration;
    EntryPointHaveParameters => "entrypoint_have_parameters", "entry point is cannot have parameter(s)", Declaration;
    RequireReturnValue => "require_return_value", "return statements of non-void functions should have return value", Type;
    VoidFunctionReturnValue => "void_function_return_value", "void functions is cannot returns any value", Type;
    BitshiftMustUnsigned => "bitshift_must_unsigned", "bit shifting value is must be unsigned", Type;
    LogicalNotBool => "logical_not_bool", "logical expression is have only boolean type values", Type;
    ConstValueUpdate => "const_value_update", "value is cannot update of constants", Constant;
    TypeNotSupportValueUpdate => "type_not_support_value_update", "type is not support value update", Constant;
    InvalidType => "invalid_type", "invalid data type", Type;
    InvalidAttribute => "invalid_attribute", "invalid attribute for type", Declaration;
    InvalidNumericRange => "invalid_numeric_range", "arithmetic value overflow", Type;
    InvalidDataUnary => "invalid_data_unary", "invalid data type for unary operator", Type;
    InvalidOperator => "invalid_operator", "invalid operator", Type;
    InvalidDataPlus => "invalid_data_plus", "invalid data type for plus operator", Type;
    InvalidDataTilde => "invalid_data_tilde", "invalid data type for tilde operator", Type;
    InvalidDataLogicalNot => "invalid_data_logical_not", "invalid data type for logical not operator", Type;
    InvalidDataStar => "invalid_data_star", "invalid data type for star operator", Type;
    InvalidDataAmper => "invalid_data_amper", "invalid data type for amper operator", Type;
    InvalidEscapeSequence => "invalid_escape_sequence", "invalid escape sequence", Lexical;
    InvalidConstDataType => "invalid_const_data_type", "invalid data type for constant", Constant;
    InvalidTypeSource => "invalid_type_source", "invalid data type source for type alias", Declaration;
    MissingAutotypeValue => "missing_autotype_value", "auto-type declarations should have a initializer", Constant;
    MissingType => "missing_type", "data type missing", Syntactic;
    MissingValue => "missing_value", "value is not given", Syntactic;
    MissingArgument => "missing_argument", "missing argument(s)", Type;
    MissingBlockComment => "missing_block_comment", "missing block comment close", Lexical;
    MissingSemicolon => "missing_semicolon", "missing statement terminator at end of statement", Syntactic;
    MissingRuneEnd => "missing_rune_end", "rune is not finished", Lexical;
    MissingReturn => "missing_return", "missing return at end of function", Declaration;
    MissingStringEnd => "missing_string_end", "string is not finished", Lexical;
    MissingConstValue => "missing_const_value", "constants must have value specification", Constant;
    NullForAutotype => "null_for_autotype", "null is cannot use with auto-type definations", Constant;
    VoidForAutotype => "void_for_autotype", "void data is cannot use for auto-type definations", Constant;
    RuneEmpty => "rune_empty", "rune is cannot empty", Lexical;
    RuneOverflow => "rune_overflow", "rune is should be single", Lexical;
    UnsafeBehaviorOutOfUnsafeScope => "unsafe_behavior_at_out_of_unsafe_scope", "unsafe behaviors are only allowed in unsafe scopes", Type;
    NotSupportsIndexing => "not_supports_indexing", "type is not support indexing", Type;
    TypeNotSupportsCasting => "type_not_supports_casting", "type is not supports casting to: ", Type;
    ExprNotConst => "expr_not_const", "expression is not constant", Constant;
    AssignmentToNonMut => "assignment_to_non_mut", "value is cannot update of immutable storage", Constant;
    NotSupported => "not_supported", "this expression is not supported yet", Internal;
}

/// A reported compile-time error: a stable kind, where it happened and an
/// optional piece of context appended to the kind's template.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}", render_message(.kind, .detail))]
pub struct Error {
    kind: ErrorKind,
    position: Position,
    detail: Option<String>,
}

fn render_message(kind: &ErrorKind, detail: &Option<String>) -> String {
    format!("{}{}", kind.template(), detail.as_deref().unwrap_or_default())
}

impl Error {
    pub fn new(kind: ErrorKind, position: Position) -> Self {
        Error {
            kind,
            position,
            detail: None,
        }
    }

    pub fn with_detail(kind: ErrorKind, position: Position, detail: impl Into<String>) -> Self {
        Error {
            kind,
            position,
            detail: Some(detail.into()),
        }
    }

    pub fn get_kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// The stable symbolic key of the error kind.
    pub fn get_error_name(&self) -> &'static str {
        self.kind.key()
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.detail {
            Some(detail) => ErrorTip::Detail(detail.clone()),
            None => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Detail(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Detail(detail) => write!(f, "{}", detail),
        }
    }
}

/// Errors raised while loading build settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed settings: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("cannot read settings file {path:?}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}
