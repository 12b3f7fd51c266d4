//! Lexing and parsing of `return <integer>;` programs.

#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;

pub mod ast;
pub mod token;

pub use lexer::{LexerError, LexerErrorKind, LexerResult, TokenIter};
pub use parser::{ParseError, ParseResult, ReturnPolicy};

use ast::ReturnStatement;
use lexer::Lexer;
use parser::Parser;
use token::Token;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)];
}

/// Splits `source` into tokens, stopping at the end of the slice or at the
/// first zero byte, whichever comes first.
pub fn lex(source: &[u8]) -> LexerResult<Vec<Token>> {
    Lexer::new(source).lex()
}

/// Parses a token sequence. `Ok(None)` means there was no `return` statement.
pub fn parse(tokens: Vec<Token>, policy: ReturnPolicy) -> ParseResult<Option<ReturnStatement>> {
    Parser::new(tokens.into(), policy).parse()
}
