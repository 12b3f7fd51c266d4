#[cfg(test)]
mod tests;

use retlang_diagnostic::span::Span;

use crate::token::{Token, TokenKind};

/// Marks the logical end of input, e.g. the unused tail of a fixed-size buffer.
const SENTINEL: u8 = 0;

const KEYWORD_RETURN: &[u8] = b"return";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct LexerError {
    pub kind: LexerErrorKind,
    pub span: Span,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerErrorKind {
    #[error("invalid character at position {position}: {}", display_char(.ch))]
    InvalidCharacter { position: usize, ch: char },

    #[error("invalid token: {text}")]
    InvalidToken { text: String },
}

pub type LexerResult<T> = Result<T, LexerError>;

pub struct Lexer<'src> {
    source: &'src [u8],
    pos: usize,

    token_start: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src [u8]) -> Self {
        Self {
            source,
            pos: 0,

            token_start: 0,
        }
    }

    /// Consumes the lexer; there is no resuming after an error or the sentinel.
    pub fn lex(mut self) -> LexerResult<Vec<Token>> {
        let mut tokens = vec![];
        while let Some(token) = self.lex_token()? {
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn lex_token(&mut self) -> LexerResult<Option<Token>> {
        loop {
            self.token_start = self.pos;

            let kind = match self.peek() {
                None | Some(SENTINEL) => return Ok(None),

                Some(byte) if is_whitespace(byte) => {
                    self.pos += 1;
                    continue;
                }

                Some(b';') => {
                    self.pos += 1;
                    TokenKind::Semicolon
                }

                Some(byte) if byte.is_ascii_digit() => self.lex_integer(),

                Some(byte) if byte.is_ascii_alphabetic() => self.lex_keyword()?,

                Some(byte) => {
                    self.pos += 1;
                    return Err(self.error(LexerErrorKind::InvalidCharacter {
                        position: self.token_start,
                        ch: char::from(byte),
                    }));
                }
            };

            return Ok(Some(Token::new(kind, self.token_span())));
        }
    }

    fn lex_integer(&mut self) -> TokenKind {
        self.eat_while(|byte| byte.is_ascii_digit());

        // digits are ASCII, so this never replaces anything
        let digits = String::from_utf8_lossy(self.token_bytes()).into_owned();
        TokenKind::IntegerLiteral(digits)
    }

    fn lex_keyword(&mut self) -> LexerResult<TokenKind> {
        self.eat_while(|byte| byte.is_ascii_alphabetic());

        match self.token_bytes() {
            KEYWORD_RETURN => Ok(TokenKind::Return),
            text => {
                let text = String::from_utf8_lossy(text).into_owned();
                Err(self.error(LexerErrorKind::InvalidToken { text }))
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
    }

    fn token_bytes(&self) -> &'src [u8] {
        &self.source[self.token_start..self.pos]
    }

    fn token_span(&self) -> Span {
        Span::new(self.token_start, self.pos)
    }

    fn error(&self, kind: LexerErrorKind) -> LexerError {
        LexerError {
            kind,
            span: self.token_span(),
        }
    }
}

/// Bytes above ASCII are shown as escapes, since they may be one byte of a
/// longer UTF-8 sequence.
fn display_char(ch: &char) -> String {
    if ch.is_ascii() {
        format!("{ch:?}")
    } else {
        format!("'\\x{:02X}'", u32::from(*ch))
    }
}

/// ASCII whitespace plus vertical tab, which `u8::is_ascii_whitespace` leaves out.
fn is_whitespace(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b'\x0b'
}

/// A token sequence read front to back through a cursor that only moves forward.
pub struct TokenIter {
    tokens: std::vec::IntoIter<Token>,
    prev_span: Span,
    eof_span: Span,
}

impl TokenIter {
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.as_slice().first()
    }

    pub fn prev_span(&self) -> Span {
        self.prev_span
    }

    pub fn peek_span(&self) -> Span {
        self.peek().map_or(self.eof_span, |t| t.span)
    }

    /// An empty span just after the last token.
    pub fn eof_span(&self) -> Span {
        self.eof_span
    }
}

impl From<Vec<Token>> for TokenIter {
    fn from(tokens: Vec<Token>) -> Self {
        let eof_span = Span::empty(tokens.last().map_or(0, |t| t.span.end));

        Self {
            tokens: tokens.into_iter(),
            prev_span: Span::empty(0),
            eof_span,
        }
    }
}

impl Iterator for TokenIter {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.next()?;
        self.prev_span = token.span;
        Some(token)
    }
}
