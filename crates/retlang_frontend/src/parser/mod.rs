
use retlang_diagnostic::span::Span;

use crate::ast::{IntegerLiteralExpression, ReturnStatement};
use crate::lexer::TokenIter;
use crate::token::{Token, TokenKind};
use crate::NodeCopy;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected an integer literal, found {}", describe(.found))]
    InvalidExpression { found: Option<Token>, span: Span },

    #[error("expected `;`, found {}", describe(.found))]
    MissingSemicolon { found: Option<Token>, span: Span },

    #[error("more than one return statement")]
    MultipleReturnStatements { first: Span, second: Span },
}

impl ParseError {
    /// Where the error should be reported.
    pub fn span(&self) -> Span {
        match self {
            ParseError::InvalidExpression { span, .. }
            | ParseError::MissingSemicolon { span, .. } => *span,
            ParseError::MultipleReturnStatements { second, .. } => *second,
        }
    }
}

fn describe(found: &Option<Token>) -> String {
    found
        .as_ref()
        .map_or_else(|| "end of input".to_owned(), Token::describe)
}

pub type ParseResult<T> = Result<T, ParseError>;

/// What to do when a program contains more than one `return` statement.
#[derive(NodeCopy!, Default)]
pub enum ReturnPolicy {
    /// Every statement is parsed and the last one is the result.
    #[default]
    LastWins,

    /// A second statement is a syntax error.
    RejectMultiple,
}

pub struct Parser {
    tokens: TokenIter,
    policy: ReturnPolicy,
}

impl Parser {
    pub fn new(tokens: TokenIter, policy: ReturnPolicy) -> Self {
        Self { tokens, policy }
    }

    pub fn parse(mut self) -> ParseResult<Option<ReturnStatement>> {
        let mut result: Option<ReturnStatement> = None;

        // tokens outside of a statement are passed over
        while let Some(token) = self.tokens.next() {
            if token.kind != TokenKind::Return {
                continue;
            }

            let statement = self.parse_return_statement(token.span)?;

            if let (ReturnPolicy::RejectMultiple, Some(first)) = (self.policy, &result) {
                return Err(ParseError::MultipleReturnStatements {
                    first: first.span,
                    second: statement.span,
                });
            }

            result = Some(statement);
        }

        Ok(result)
    }

    // the `return` keyword has already been consumed
    fn parse_return_statement(&mut self, keyword_span: Span) -> ParseResult<ReturnStatement> {
        let expr = self.parse_expr()?;
        self.expect_semicolon()?;

        Ok(ReturnStatement {
            expr,
            span: keyword_span.to(self.tokens.prev_span()),
        })
    }

    fn parse_expr(&mut self) -> ParseResult<IntegerLiteralExpression> {
        match self.tokens.next() {
            Some(token) => IntegerLiteralExpression::new(token).map_err(|token| {
                ParseError::InvalidExpression {
                    span: token.span,
                    found: Some(token),
                }
            }),

            None => Err(ParseError::InvalidExpression {
                found: None,
                span: self.tokens.eof_span(),
            }),
        }
    }

    fn expect_semicolon(&mut self) -> ParseResult<()> {
        match self.tokens.peek() {
            Some(t) if t.kind == TokenKind::Semicolon => {
                self.tokens.next();
                Ok(())
            }

            other => Err(ParseError::MissingSemicolon {
                found: other.cloned(),
                span: self.tokens.peek_span(),
            }),
        }
    }
}
