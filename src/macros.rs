//! Utility macros for the semantic core.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed lexemes
//! - `MK_ERROR_KINDS!` - Declares the error taxonomy with its registry entries
//!
//! These macros reduce boilerplate in the lexer and error modules.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$id` - The TokenId
/// * `$kind` - The token's lexeme
/// * `$position` - The source position
///
/// An optional fourth argument sets the decoded `text`; it defaults to the
/// lexeme.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenId::Literal, "42".to_string(), position);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($id:expr, $kind:expr, $position:expr) => {{
        let kind: String = $kind;
        Token {
            id: $id,
            text: kind.clone(),
            kind,
            position: $position,
        }
    }};
    ($id:expr, $kind:expr, $position:expr, $text:expr) => {
        Token {
            id: $id,
            kind: $kind,
            text: $text,
            position: $position,
        }
    };
}

/// Creates a default lexer handler for fixed lexemes such as operators and
/// punctuation.
///
/// Generates a handler function that pushes a token with the given id and
/// the matched lexeme, then advances the lexer past it.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new(r"^(<<=|>>=|\+=|-=)").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenId::Operator),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($id:expr) => {
        |lexer: &mut Lexer, regex: &Regex| -> Result<(), Error> {
            let matched = match regex.find(lexer.remainder()) {
                Some(found) => found.as_str().to_string(),
                None => return Err(lexer.error(ErrorKind::InvalidToken)),
            };
            let position = lexer.position();
            lexer.advance_n(matched.len());
            lexer.push($crate::MK_TOKEN!($id, matched, position));
            Ok(())
        }
    };
}

/// Declares the `ErrorKind` enum together with its stable key, message
/// template and group.
///
/// Each line reads `Variant => "key", "template", Group;`.
#[macro_export]
macro_rules! MK_ERROR_KINDS {
    ($($variant:ident => $key:literal, $template:literal, $group:ident;)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorKind {
            $($variant,)*
        }

        impl ErrorKind {
            /// Every error kind, in declaration order.
            pub const ALL: &'static [ErrorKind] = &[$(ErrorKind::$variant,)*];

            /// Stable symbolic key, used by tooling and tests.
            pub fn key(&self) -> &'static str {
                match self {
                    $(ErrorKind::$variant => $key,)*
                }
            }

            /// Human-readable message template.
            pub fn template(&self) -> &'static str {
                match self {
                    $(ErrorKind::$variant => $template,)*
                }
            }

            pub fn group(&self) -> ErrorGroup {
                match self {
                    $(ErrorKind::$variant => ErrorGroup::$group,)*
                }
            }
        }
    };
}
