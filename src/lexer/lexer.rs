use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorKind},
    Position, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenId, DATA_TYPES, KND_FALSE, KND_NIL, KND_TRUE, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^/\*").unwrap(), handler: block_comment_handler },
        RegexPattern { regex: Regex::new(r"^`").unwrap(), handler: raw_string_handler },
        RegexPattern { regex: Regex::new(r#"^""#).unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r"^'").unwrap(), handler: rune_handler },
        RegexPattern {
            regex: Regex::new(r"^(0[xX][0-9a-fA-F]+|0[bB][01]+|0[oO][0-7]+|[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?)").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenId::Literal),
        },
        RegexPattern { regex: Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern {
            regex: Regex::new(r"^(<<=|>>=|\.\.\.|::|\+=|-=|\*=|/=|%=|&=|\|=|\^=|==|!=|<=|>=|&&|\|\||<<|>>|\+\+|--|[-+*/%&|^!~<>=])").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenId::Operator),
        },
        RegexPattern { regex: Regex::new(r"^[(){}\[\]]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenId::Brace) },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenId::Comma) },
        RegexPattern { regex: Regex::new(r"^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenId::Colon) },
        RegexPattern { regex: Regex::new(r"^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenId::Semicolon) },
        RegexPattern { regex: Regex::new(r"^\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenId::Dot) },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    row: u32,
    column: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            row: 1,
            column: 1,
            file: file_name,
        }
    }

    /// Moves the cursor `n` bytes forward, keeping row and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for c in self.source[self.pos..end].chars() {
            if c == '\n' {
                self.row += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.column, Rc::clone(&self.file))
    }

    pub fn error(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.position())
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).map(|m| m.end()).unwrap_or(0);
    lexer.advance_n(matched);
    Ok(())
}

fn block_comment_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    match lexer.remainder()[2..].find("*/") {
        Some(end) => {
            lexer.advance_n(end + 4);
            Ok(())
        }
        None => Err(lexer.error(ErrorKind::MissingBlockComment)),
    }
}

fn raw_string_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let position = lexer.position();
    let Some(end) = lexer.remainder()[1..].find('`') else {
        return Err(lexer.error(ErrorKind::MissingStringEnd));
    };

    let lexeme = lexer.remainder()[..end + 2].to_string();
    let text = lexeme[1..lexeme.len() - 1].to_string();
    lexer.advance_n(lexeme.len());
    lexer.push(MK_TOKEN!(TokenId::Literal, lexeme, position, text));
    Ok(())
}

fn string_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let (lexeme, text) = scan_quoted(lexer, '"', ErrorKind::MissingStringEnd)?;
    let position = lexer.position();
    lexer.advance_n(lexeme.len());
    lexer.push(MK_TOKEN!(TokenId::Literal, lexeme, position, text));
    Ok(())
}

fn rune_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let (lexeme, text) = scan_quoted(lexer, '\'', ErrorKind::MissingRuneEnd)?;
    match text.chars().count() {
        0 => return Err(lexer.error(ErrorKind::RuneEmpty)),
        1 => {}
        _ => return Err(lexer.error(ErrorKind::RuneOverflow)),
    }

    let position = lexer.position();
    lexer.advance_n(lexeme.len());
    lexer.push(MK_TOKEN!(TokenId::Literal, lexeme, position, text));
    Ok(())
}

/// Finds the quoted literal at the cursor and decodes its escapes.
///
/// Returns the raw lexeme (quotes included) and the decoded text. The literal
/// must close on the line it starts on.
fn scan_quoted(lexer: &Lexer, quote: char, unterminated: ErrorKind) -> Result<(String, String), Error> {
    let rest = lexer.remainder();
    let mut chars = rest.char_indices().skip(1);
    let mut end = None;

    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, '\n')) | None => break,
                Some(_) => {}
            },
            '\n' => break,
            c if c == quote => {
                end = Some(index);
                break;
            }
            _ => {}
        }
    }

    let Some(end) = end else {
        return Err(lexer.error(unterminated));
    };

    let lexeme = rest[..end + quote.len_utf8()].to_string();
    let text = unescape(&rest[1..end]).ok_or_else(|| lexer.error(ErrorKind::InvalidEscapeSequence))?;
    Ok((lexeme, text))
}

/// Decodes escape sequences. Returns `None` on an invalid sequence.
fn unescape(literal: &str) -> Option<String> {
    let mut result = String::new();
    let mut chars = literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let escape = chars.next()?;
        match escape {
            'a' => result.push('\x07'),
            'b' => result.push('\x08'),
            'f' => result.push('\x0C'),
            'n' => result.push('\n'),
            'r' => result.push('\r'),
            't' => result.push('\t'),
            'v' => result.push('\x0B'),
            '\\' => result.push('\\'),
            '\'' => result.push('\''),
            '"' => result.push('"'),
            'x' => result.push(read_hex(&mut chars, 2)?),
            'u' => result.push(read_hex(&mut chars, 4)?),
            'U' => result.push(read_hex(&mut chars, 8)?),
            '0'..='7' => {
                let mut value = escape.to_digit(8)?;
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                if value > 0xFF {
                    return None;
                }
                result.push(char::from_u32(value)?);
            }
            _ => return None,
        }
    }

    Some(result)
}

fn read_hex(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, digits: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(value)
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let Some(value) = regex.find(lexer.remainder()).map(|m| m.as_str().to_string()) else {
        return Err(lexer.error(ErrorKind::InvalidToken));
    };

    let id = if DATA_TYPES.contains(value.as_str()) {
        TokenId::DataType
    } else if [KND_TRUE, KND_FALSE, KND_NIL].contains(&value.as_str()) {
        TokenId::Literal
    } else if RESERVED_LOOKUP.contains(value.as_str()) {
        TokenId::Keyword
    } else {
        TokenId::Identifier
    };

    let position = lexer.position();
    lexer.advance_n(value.len());
    lexer.push(MK_TOKEN!(id, value, position));
    Ok(())
}

#[tracing::instrument(level = "debug", skip(source))]
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex)?,
            None => {
                let token = lex.at().map(String::from).unwrap_or_default();
                return Err(Error::with_detail(ErrorKind::InvalidToken, lex.position(), token));
            }
        }
    }

    let position = lex.position();
    lex.push(MK_TOKEN!(TokenId::Eof, String::from("EOF"), position));
    tracing::debug!(count = lex.tokens.len(), "tokenized");
    Ok(lex.tokens)
}
