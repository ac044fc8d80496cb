//! Unit tests for the lexer module.

use pretty_assertions::assert_eq;

use super::{
    lexer::tokenize,
    tokens::{Token, TokenId},
};
use crate::errors::errors::ErrorKind;

fn lex(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("test.xx".to_string())).unwrap()
}

fn lex_error(source: &str) -> ErrorKind {
    tokenize(source.to_string(), Some("test.xx".to_string()))
        .unwrap_err()
        .get_kind()
}

fn ids(tokens: &[Token]) -> Vec<TokenId> {
    tokens.iter().map(|token| token.id).collect()
}

#[test]
fn test_tokenize_data_types() {
    let tokens = lex("i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 int uint uintptr bool str any");

    assert_eq!(tokens.len(), 17);
    for token in &tokens[..16] {
        assert_eq!(token.id, TokenId::DataType, "{}", token.kind);
    }
    assert_eq!(tokens[2].kind, "i32");
    assert_eq!(tokens[16].id, TokenId::Eof);
}

#[test]
fn test_tokenize_keywords_and_identifiers() {
    let tokens = lex("unsafe ret const foo _bar baz_123");

    assert_eq!(
        ids(&tokens),
        vec![
            TokenId::Keyword,
            TokenId::Keyword,
            TokenId::Keyword,
            TokenId::Identifier,
            TokenId::Identifier,
            TokenId::Identifier,
            TokenId::Eof,
        ]
    );
    assert_eq!(tokens[4].kind, "_bar");
}

#[test]
fn test_tokenize_keyword_literals() {
    let tokens = lex("true false nil");

    assert_eq!(ids(&tokens[..3]), vec![TokenId::Literal; 3]);
    assert_eq!(tokens[2].kind, "nil");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = lex("42 3.14 0x1F 0b101 0o17 1e9 2.5E-3");

    let kinds: Vec<&str> = tokens[..7].iter().map(|token| token.kind.as_str()).collect();
    assert_eq!(kinds, vec!["42", "3.14", "0x1F", "0b101", "0o17", "1e9", "2.5E-3"]);
    assert_eq!(ids(&tokens[..7]), vec![TokenId::Literal; 7]);
}

#[test]
fn test_tokenize_strings_keep_lexeme_and_decode_text() {
    let tokens = lex(r#""hello\nworld" "tab\there" "hex\x41" "unié""#);

    assert_eq!(tokens[0].kind, r#""hello\nworld""#);
    assert_eq!(tokens[0].text, "hello\nworld");
    assert_eq!(tokens[1].text, "tab\there");
    assert_eq!(tokens[2].text, "hexA");
    assert_eq!(tokens[3].text, "unié");
}

#[test]
fn test_tokenize_escaped_quote_in_string() {
    let tokens = lex(r#""quote\"test""#);

    assert_eq!(tokens[0].text, "quote\"test");
    assert_eq!(tokens[1].id, TokenId::Eof);
}

#[test]
fn test_tokenize_raw_string_spans_lines() {
    let tokens = lex("`first\nsecond\\n` x");

    assert_eq!(tokens[0].text, "first\nsecond\\n");
    assert_eq!(tokens[1].kind, "x");
    assert_eq!(tokens[1].position.row, 2);
}

#[test]
fn test_tokenize_runes() {
    let tokens = lex(r"'a' '\n' '\'' '\x41'");

    assert_eq!(tokens[0].kind, "'a'");
    assert_eq!(tokens[0].text, "a");
    assert_eq!(tokens[1].text, "\n");
    assert_eq!(tokens[2].text, "'");
    assert_eq!(tokens[3].text, "A");
}

#[test]
fn test_tokenize_operators() {
    let tokens = lex("+ - * / % == != < > <= >= = && || << >> ! ~ & | ^ += <<=");

    assert!(tokens[..23].iter().all(|token| token.id == TokenId::Operator));
    assert_eq!(tokens[14].kind, "<<");
    assert_eq!(tokens[22].kind, "<<=");
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = lex("( ) { } [ ] . , ; :");

    assert_eq!(
        ids(&tokens),
        vec![
            TokenId::Brace,
            TokenId::Brace,
            TokenId::Brace,
            TokenId::Brace,
            TokenId::Brace,
            TokenId::Brace,
            TokenId::Dot,
            TokenId::Comma,
            TokenId::Semicolon,
            TokenId::Colon,
            TokenId::Eof,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let tokens = lex("x // line comment\n/* block\ncomment */ y");

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, "x");
    assert_eq!(tokens[1].kind, "y");
    assert_eq!(tokens[1].position.row, 3);
}

#[test]
fn test_tokenize_positions() {
    let tokens = lex("main() {\n    x := 10\n}");

    assert_eq!((tokens[0].position.row, tokens[0].position.column), (1, 1));
    assert_eq!((tokens[4].position.row, tokens[4].position.column), (2, 5));
    assert_eq!(tokens[4].kind, "x");
    assert_eq!(tokens[5].id, TokenId::Colon);
    assert_eq!(tokens[6].kind, "=");
    assert_eq!((tokens[7].position.row, tokens[7].position.column), (2, 10));
    assert_eq!(tokens[0].position.file.as_str(), "test.xx");
}

#[test]
fn test_lexical_errors() {
    assert_eq!(lex_error("\"unterminated"), ErrorKind::MissingStringEnd);
    assert_eq!(lex_error("\"broken\nline\""), ErrorKind::MissingStringEnd);
    assert_eq!(lex_error("`raw"), ErrorKind::MissingStringEnd);
    assert_eq!(lex_error("\"escaped \\\nnewline\""), ErrorKind::MissingStringEnd);
    assert_eq!(lex_error("\"trailing \\"), ErrorKind::MissingStringEnd);
    assert_eq!(lex_error("'a"), ErrorKind::MissingRuneEnd);
    assert_eq!(lex_error("''"), ErrorKind::RuneEmpty);
    assert_eq!(lex_error("'ab'"), ErrorKind::RuneOverflow);
    assert_eq!(lex_error(r#""bad \q escape""#), ErrorKind::InvalidEscapeSequence);
    assert_eq!(lex_error(r#""\xZZ""#), ErrorKind::InvalidEscapeSequence);
    assert_eq!(lex_error("/* never closed"), ErrorKind::MissingBlockComment);
    assert_eq!(lex_error("x @ y"), ErrorKind::InvalidToken);
}

#[test]
fn test_invalid_token_position() {
    let error = tokenize("x\n  $".to_string(), None).unwrap_err();

    assert_eq!(error.get_position().row, 2);
    assert_eq!(error.get_position().column, 3);
    assert_eq!(error.get_detail(), Some("$"));
    assert_eq!(error.get_position().file.as_str(), "shell");
}
