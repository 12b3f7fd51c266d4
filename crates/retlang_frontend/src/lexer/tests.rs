use retlang_diagnostic::span::Span;

use super::{Lexer, LexerError, LexerErrorKind};
use crate::token::{Token, TokenKind};

fn lex(source: &str) -> Result<Vec<Token>, LexerError> {
    Lexer::new(source.as_bytes()).lex()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn integer(digits: &str) -> TokenKind {
    TokenKind::IntegerLiteral(digits.to_owned())
}

#[test]
fn return_zero() {
    insta::assert_debug_snapshot!(lex("return 0;"), @r###"
    Ok(
        [
            Token {
                kind: Return,
                span: Span {
                    start: 0,
                    end: 6,
                },
            },
            Token {
                kind: IntegerLiteral(
                    "0",
                ),
                span: Span {
                    start: 7,
                    end: 8,
                },
            },
            Token {
                kind: Semicolon,
                span: Span {
                    start: 8,
                    end: 9,
                },
            },
        ],
    )
    "###);
}

#[test]
fn empty() {
    assert_eq!(lex(""), Ok(vec![]));
    assert_eq!(lex(" \t\r\n\x0b\x0c "), Ok(vec![]));
}

#[test]
fn newlines() {
    assert_eq!(
        kinds("\nreturn\n0\n;\n"),
        vec![TokenKind::Return, integer("0"), TokenKind::Semicolon]
    );
}

#[test]
fn no_spaces() {
    assert_eq!(
        kinds("return 2;return 3;"),
        vec![
            TokenKind::Return,
            integer("2"),
            TokenKind::Semicolon,
            TokenKind::Return,
            integer("3"),
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn long_literal_is_kept_verbatim() {
    let digits = "000123456789012345678901234567890123456789";
    let source = format!("return {digits};");

    assert_eq!(
        kinds(&source),
        vec![TokenKind::Return, integer(digits), TokenKind::Semicolon]
    );
}

#[test]
fn keyword_must_match_exactly() {
    insta::assert_debug_snapshot!(lex("returns 1;"), @r###"
    Err(
        LexerError {
            kind: InvalidToken {
                text: "returns",
            },
            span: Span {
                start: 0,
                end: 7,
            },
        },
    )
    "###);

    assert!(lex("RETURN 1;").is_err());
    assert!(lex("ret 1;").is_err());
}

#[test]
fn letters_directly_after_digits() {
    // `0return` is two tokens, there is no identifier rule to merge them
    assert_eq!(
        kinds("return 0return"),
        vec![TokenKind::Return, integer("0"), TokenKind::Return]
    );
}

#[test]
fn digits_end_a_keyword() {
    assert_eq!(
        kinds("return0;"),
        vec![TokenKind::Return, integer("0"), TokenKind::Semicolon]
    );
}

#[test]
fn invalid_character() {
    let err = lex("return 1 + 2;").unwrap_err();

    assert_eq!(
        err,
        LexerError {
            kind: LexerErrorKind::InvalidCharacter {
                position: 9,
                ch: '+',
            },
            span: Span::new(9, 10),
        }
    );
    assert_eq!(err.to_string(), "invalid character at position 9: '+'");
}

#[test]
fn missing_semicolon_is_not_a_lexer_error() {
    assert_eq!(kinds("return 1"), vec![TokenKind::Return, integer("1")]);
}

#[test]
fn sentinel_ends_input() {
    let mut buffer = [0u8; 32];
    buffer[..9].copy_from_slice(b"return 7;");

    assert_eq!(
        Lexer::new(&buffer).lex().unwrap().len(),
        3,
        "zero padding after the source is not lexed"
    );

    // anything after the sentinel is ignored, even invalid bytes
    assert_eq!(kinds("return 7;\0@@@"), kinds("return 7;"));
}

#[test]
fn non_ascii_byte() {
    let err = Lexer::new(b"return \xff;").lex().unwrap_err();

    assert_eq!(
        err.kind,
        LexerErrorKind::InvalidCharacter {
            position: 7,
            ch: '\u{ff}',
        }
    );
    assert_eq!(err.to_string(), r"invalid character at position 7: '\xFF'");
}

#[test]
fn multibyte_character_is_shown_as_its_first_byte() {
    let err = lex("return é;").unwrap_err();

    assert_eq!(err.span, Span::new(7, 8));
    assert_eq!(err.to_string(), r"invalid character at position 7: '\xC3'");
}

#[test]
fn lexing_is_repeatable() {
    let source = "  return 12 ;\n return 3;";
    assert_eq!(lex(source), lex(source));
}
