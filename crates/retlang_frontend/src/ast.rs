use retlang_diagnostic::span::Span;

use crate::token::{Token, TokenKind};
use crate::Node;

/// `return <expr>;`
#[derive(Node!)]
pub struct ReturnStatement {
    pub expr: IntegerLiteralExpression,
    /// From the `return` keyword through the semicolon.
    pub span: Span,
}

/// An expression made of a single integer literal token.
#[derive(Node!)]
pub struct IntegerLiteralExpression {
    token: Token,
}

impl IntegerLiteralExpression {
    /// Takes ownership of `token` if it is an integer literal, otherwise hands it back.
    pub fn new(token: Token) -> Result<Self, Token> {
        match token.kind {
            TokenKind::IntegerLiteral(_) => Ok(Self { token }),
            _ => Err(token),
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn digits(&self) -> &str {
        self.token.kind.literal_text().unwrap_or_default()
    }

    pub fn span(&self) -> Span {
        self.token.span
    }
}
