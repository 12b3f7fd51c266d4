use retlang_diagnostic::span::Span;

use crate::Node;

#[derive(Node!)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Node!)]
pub enum TokenKind {
    Return,
    /// The literal's decimal digits exactly as written.
    IntegerLiteral(String),
    Semicolon,
}

impl TokenKind {
    pub fn token_name(&self) -> &'static str {
        match self {
            TokenKind::Return => "keyword `return`",
            TokenKind::IntegerLiteral(_) => "integer literal",
            TokenKind::Semicolon => "`;`",
        }
    }

    pub fn literal_text(&self) -> Option<&str> {
        match self {
            TokenKind::IntegerLiteral(digits) => Some(digits),
            _ => None,
        }
    }
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Like [`TokenKind::token_name`], but includes the digits of literals.
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::IntegerLiteral(digits) => format!("integer literal `{digits}`"),
            kind => kind.token_name().to_owned(),
        }
    }
}
